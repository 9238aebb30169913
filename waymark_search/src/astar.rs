// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A* shortest-path search.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::HashMap;
use waymark_graph::{Edge, Graph, GraphError};

use crate::path::{PartialPath, PartialPathList};

/// Edge costs and the goal-distance heuristic used by [`AStar`].
///
/// Costs must be non-negative. The heuristic should not overestimate the remaining
/// cost if the search is to return optimal paths; it is not checked.
pub trait CostEvaluator<V, E> {
    /// Cost of traversing `edge`.
    fn evaluate_cost(&self, edge: &E) -> f64;
    /// Estimated cost from `from` to `to`.
    fn estimate_cost(&self, from: &V, to: &V) -> f64;
}

/// A [`CostEvaluator`] built from two closures.
#[derive(Clone, Copy)]
pub struct FnEvaluator<C, H> {
    cost: C,
    heuristic: H,
}

impl<C, H> Debug for FnEvaluator<C, H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FnEvaluator").finish_non_exhaustive()
    }
}

impl<C, H> FnEvaluator<C, H> {
    /// Pair an edge-cost closure with a heuristic closure.
    pub fn new(cost: C, heuristic: H) -> Self {
        Self { cost, heuristic }
    }
}

impl<V, E, C, H> CostEvaluator<V, E> for FnEvaluator<C, H>
where
    C: Fn(&E) -> f64,
    H: Fn(&V, &V) -> f64,
{
    fn evaluate_cost(&self, edge: &E) -> f64 {
        (self.cost)(edge)
    }

    fn estimate_cost(&self, from: &V, to: &V) -> f64 {
        (self.heuristic)(from, to)
    }
}

/// A route found by [`AStar::find_path`].
#[derive(Clone, Debug, PartialEq)]
pub struct Path<V> {
    vertices: Vec<V>,
    cost: f64,
}

impl<V> Path<V> {
    /// Vertices from start to goal, both included.
    pub fn vertices(&self) -> &[V] {
        &self.vertices
    }

    /// Total cost of the edges along the route.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Number of vertices on the route.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// True if the route has no vertices. Found paths always hold at least one.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Take the vertex sequence.
    pub fn into_vertices(self) -> Vec<V> {
        self.vertices
    }
}

/// Result of a search over known vertices.
#[derive(Clone, Debug, PartialEq)]
pub enum SearchOutcome<V> {
    /// The goal was reached.
    Found(Path<V>),
    /// Every vertex reachable from the start was explored without meeting the goal.
    Unreachable,
}

impl<V> SearchOutcome<V> {
    /// The path, if one was found.
    pub fn path(&self) -> Option<&Path<V>> {
        match self {
            Self::Found(path) => Some(path),
            Self::Unreachable => None,
        }
    }

    /// Take the path, if one was found.
    pub fn into_path(self) -> Option<Path<V>> {
        match self {
            Self::Found(path) => Some(path),
            Self::Unreachable => None,
        }
    }

    /// True if a path was found.
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// A* search over a borrowed [`Graph`].
///
/// The search state lives only for one [`find_path`](Self::find_path) call, so one
/// `AStar` can serve any number of queries.
pub struct AStar<'g, V, E, C> {
    graph: &'g Graph<V, E>,
    evaluator: C,
}

impl<V, E, C> Debug for AStar<'_, V, E, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AStar")
            .field("graph", self.graph)
            .finish_non_exhaustive()
    }
}

impl<'g, V, E, C> AStar<'g, V, E, C>
where
    V: Eq + Hash + Clone,
    E: Edge<V>,
    C: CostEvaluator<V, E>,
{
    /// Search `graph` using `evaluator` for costs.
    pub fn new(graph: &'g Graph<V, E>, evaluator: C) -> Self {
        Self { graph, evaluator }
    }

    /// Find the cheapest route from `from` to `to`.
    ///
    /// Fails with [`GraphError::VertexNotFound`] if either vertex is not in the graph.
    /// A route from a vertex to itself is that single vertex at cost zero.
    pub fn find_path(&self, from: &V, to: &V) -> Result<SearchOutcome<V>, GraphError> {
        if !self.graph.contains_vertex(from) || !self.graph.contains_vertex(to) {
            return Err(GraphError::VertexNotFound);
        }
        if from == to {
            return Ok(SearchOutcome::Found(Path {
                vertices: vec![from.clone()],
                cost: 0.0,
            }));
        }

        let mut open = PartialPathList::new();
        let mut closed: HashMap<V, PartialPath<V>> = HashMap::new();
        let start = PartialPath::new(from.clone(), None, 0.0, self.evaluator.estimate_cost(from, to));
        closed.insert(from.clone(), start);
        self.relax(from, 0.0, to, &mut open, &mut closed)?;

        while let Some(current) = open.pop() {
            let end = current.end.clone();
            let cost = current.cost;
            closed.insert(end.clone(), current);
            if end == *to {
                tracing::debug!(closed = closed.len(), cost, "search reached goal");
                let vertices = reconstruct(&end, &open, &closed);
                return Ok(SearchOutcome::Found(Path { vertices, cost }));
            }
            self.relax(&end, cost, to, &mut open, &mut closed)?;
        }

        tracing::debug!(closed = closed.len(), "search exhausted without reaching goal");
        Ok(SearchOutcome::Unreachable)
    }

    /// Offer every edge leaving `at` (reached at cost `base`) to the frontier.
    fn relax(
        &self,
        at: &V,
        base: f64,
        to: &V,
        open: &mut PartialPathList<V>,
        closed: &mut HashMap<V, PartialPath<V>>,
    ) -> Result<(), GraphError> {
        for edge in self.graph.outgoing_edges(at)? {
            let next = edge.destination();
            let cost = base + self.evaluator.evaluate_cost(edge);

            if let Some(known) = open.get(next) {
                if known.cost > cost {
                    open.update(next, cost, Some(at.clone()));
                }
                continue;
            }
            if let Some(known) = closed.get(next) {
                // A cheaper route to an explored vertex sends it back to the frontier.
                if known.cost > cost {
                    let heuristic = known.heuristic;
                    closed.remove(next);
                    open.insert(PartialPath::new(next.clone(), Some(at.clone()), cost, heuristic));
                }
                continue;
            }
            let heuristic = self.evaluator.estimate_cost(next, to);
            open.insert(PartialPath::new(next.clone(), Some(at.clone()), cost, heuristic));
        }
        Ok(())
    }
}

/// Follow predecessors back from `goal` and return the route start-first.
///
/// A predecessor that was reopened may sit in the open list rather than the closed set.
fn reconstruct<V: Eq + Hash + Clone>(
    goal: &V,
    open: &PartialPathList<V>,
    closed: &HashMap<V, PartialPath<V>>,
) -> Vec<V> {
    let limit = open.len() + closed.len();
    let mut vertices = vec![goal.clone()];
    let mut cursor = closed.get(goal).and_then(|p| p.previous.clone());
    while let Some(v) = cursor {
        let step = closed
            .get(&v)
            .or_else(|| open.get(&v))
            .expect("predecessor chain left the explored vertices");
        cursor = step.previous.clone();
        vertices.push(v);
        assert!(vertices.len() <= limit, "predecessor chain loops");
    }
    vertices.reverse();
    vertices
}
