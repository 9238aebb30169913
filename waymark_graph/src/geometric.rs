// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A graph whose vertices and edges are also spatially indexed.

use core::fmt::Debug;
use core::hash::Hash;
use core::iter;

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;
use waymark_quadtree::{Bounded, Envelope, QuadTree, QuadTreeOptions};

use crate::graph::{Edge, Graph};

/// A [`Graph`] paired with two quadtrees, one over vertices and one over edges.
///
/// Every mutation goes to the graph first. The indices change only when the graph
/// accepted the mutation, so a rejected call leaves all three untouched.
///
/// Equal parallel edges share one entry in the edge index, next to a count of the
/// copies the graph holds; [`GeometricGraph::query_edges`] yields each hit once per copy.
pub struct GeometricGraph<V, E> {
    graph: Graph<V, E>,
    vertex_index: QuadTree<V>,
    edge_index: QuadTree<E>,
    edge_copies: HashMap<E, usize>,
}

impl<V, E> Debug for GeometricGraph<V, E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GeometricGraph")
            .field("graph", &self.graph)
            .field("vertex_index", &self.vertex_index)
            .field("edge_index", &self.edge_index)
            .finish_non_exhaustive()
    }
}

impl<V, E> GeometricGraph<V, E> {
    /// Create an empty graph whose indices cover `bounds`.
    pub fn new(bounds: Envelope) -> Self {
        Self::with_options(bounds, QuadTreeOptions::default())
    }

    /// Create an empty graph whose indices cover `bounds` and use `options`.
    pub fn with_options(bounds: Envelope, options: QuadTreeOptions) -> Self {
        Self {
            graph: Graph::new(),
            vertex_index: QuadTree::with_options(bounds, options),
            edge_index: QuadTree::with_options(bounds, options),
            edge_copies: HashMap::new(),
        }
    }

    /// The underlying graph, for traversal and search.
    pub fn graph(&self) -> &Graph<V, E> {
        &self.graph
    }

    /// Spatial index over the vertices.
    pub fn vertex_index(&self) -> &QuadTree<V> {
        &self.vertex_index
    }

    /// Spatial index over the distinct edges; equal parallel edges appear once.
    pub fn edge_index(&self) -> &QuadTree<E> {
        &self.edge_index
    }

    /// Vertices whose envelope intersects `rect`.
    pub fn query_vertices(&self, rect: Envelope) -> impl Iterator<Item = &V> + '_ {
        self.vertex_index.query_rect(rect)
    }

    /// Remove everything: both indices first, then the graph.
    pub fn clear(&mut self) {
        self.vertex_index.clear();
        self.edge_index.clear();
        self.edge_copies.clear();
        self.graph.clear();
    }
}

impl<V, E> GeometricGraph<V, E>
where
    V: Bounded + Eq + Hash + Clone,
    E: Edge<V> + Bounded + Eq + Hash + Clone,
{
    /// Edges whose envelope intersects `rect`, repeated once per parallel copy.
    pub fn query_edges(&self, rect: Envelope) -> impl Iterator<Item = &E> + '_ {
        self.edge_index.query_rect(rect).flat_map(|edge| {
            let copies = self
                .edge_copies
                .get(edge)
                .copied()
                .expect("edge index holds an edge with no recorded copies");
            iter::repeat_n(edge, copies)
        })
    }

    /// Add a vertex. Returns false if it is already present.
    pub fn add_vertex(&mut self, vertex: V) -> bool {
        if !self.graph.add_vertex(vertex.clone()) {
            return false;
        }
        let indexed = self.vertex_index.insert(vertex);
        assert!(indexed.is_ok(), "vertex index already held a vertex the graph did not");
        true
    }

    /// Add an edge. Returns false if either endpoint is missing.
    pub fn add_edge(&mut self, edge: E) -> bool {
        if !self.graph.add_edge(edge.clone()) {
            return false;
        }
        match self.edge_copies.entry(edge.clone()) {
            Entry::Occupied(mut copies) => *copies.get_mut() += 1,
            Entry::Vacant(slot) => {
                slot.insert(1);
                let indexed = self.edge_index.insert(edge);
                assert!(indexed.is_ok(), "edge index already held an edge with no copies");
            }
        }
        true
    }

    /// Remove a vertex with all its edges, from the graph and both indices.
    pub fn remove_vertex(&mut self, vertex: &V) -> bool {
        let Some((_, edges)) = self.graph.detach_vertex(vertex) else {
            return false;
        };
        let removed = self.vertex_index.remove(vertex);
        assert!(removed, "vertex index lost a vertex the graph held");
        for edge in &edges {
            self.forget_edge_copy(edge);
        }
        true
    }

    /// Remove the first edge equal to `edge`. Returns false if there is none.
    pub fn remove_edge(&mut self, edge: &E) -> bool {
        if !self.graph.remove_edge(edge) {
            return false;
        }
        self.forget_edge_copy(edge);
        true
    }

    /// Replace a vertex with an equal one carrying new geometry, and re-index it.
    ///
    /// Edges are not touched; re-send them through [`Self::update_edge`] if their
    /// geometry follows the vertex. Returns false if the vertex is absent.
    pub fn update_vertex(&mut self, vertex: V) -> bool {
        if !self.graph.replace_vertex(vertex.clone()) {
            return false;
        }
        let moved = self.vertex_index.update(vertex);
        assert!(moved, "vertex index lost a vertex the graph held");
        true
    }

    /// Replace every edge equal to `edge` and re-index it.
    ///
    /// Returns false if no such edge exists.
    pub fn update_edge(&mut self, edge: E) -> bool {
        if !self.graph.replace_edge(&edge) {
            return false;
        }
        let moved = self.edge_index.update(edge);
        assert!(moved, "edge index lost an edge the graph held");
        true
    }

    /// Drop one copy of `edge`; the index entry goes with the last copy.
    fn forget_edge_copy(&mut self, edge: &E) {
        let Some(copies) = self.edge_copies.get_mut(edge) else {
            panic!("graph held an edge with no recorded copies");
        };
        *copies -= 1;
        if *copies == 0 {
            self.edge_copies.remove(edge);
            let removed = self.edge_index.remove(edge);
            assert!(removed, "edge index lost an edge the graph held");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use core::hash::Hasher;

    /// A town: identity by name, position is geometry.
    #[derive(Clone, Debug)]
    struct Town {
        id: u32,
        x: f64,
        y: f64,
    }

    impl PartialEq for Town {
        fn eq(&self, other: &Self) -> bool {
            self.id == other.id
        }
    }

    impl Eq for Town {}

    impl Hash for Town {
        fn hash<H: Hasher>(&self, state: &mut H) {
            self.id.hash(state);
        }
    }

    impl Bounded for Town {
        fn envelope(&self) -> Envelope {
            Envelope::new(self.x, self.y, self.x, self.y)
        }
    }

    #[derive(Clone, Debug, PartialEq, Eq, Hash)]
    struct Road {
        from: Town,
        to: Town,
    }

    impl Edge<Town> for Road {
        fn source(&self) -> &Town {
            &self.from
        }

        fn destination(&self) -> &Town {
            &self.to
        }
    }

    impl Bounded for Road {
        fn envelope(&self) -> Envelope {
            let mut env = self.from.envelope();
            env.extend(&self.to.envelope());
            env
        }
    }

    fn town(id: u32, x: f64, y: f64) -> Town {
        Town { id, x, y }
    }

    fn road(from: &Town, to: &Town) -> Road {
        Road {
            from: from.clone(),
            to: to.clone(),
        }
    }

    fn world() -> Envelope {
        Envelope::new(0.0, 0.0, 100.0, 100.0)
    }

    fn town_ids<'a>(it: impl Iterator<Item = &'a Town>) -> Vec<u32> {
        let mut v: Vec<u32> = it.map(|t| t.id).collect();
        v.sort_unstable();
        v
    }

    fn road_ids<'a>(it: impl Iterator<Item = &'a Road>) -> Vec<(u32, u32)> {
        let mut v: Vec<(u32, u32)> = it.map(|r| (r.from.id, r.to.id)).collect();
        v.sort_unstable();
        v
    }

    #[test]
    fn rejected_mutations_leave_indices_alone() {
        let mut g = GeometricGraph::new(world());
        let a = town(1, 10.0, 10.0);
        let b = town(2, 90.0, 90.0);
        assert!(g.add_vertex(a.clone()));
        assert!(!g.add_vertex(town(1, 50.0, 50.0)), "same identity");
        assert!(!g.add_edge(road(&a, &b)), "destination missing");
        assert_eq!(g.vertex_index().len(), 1);
        assert!(g.edge_index().is_empty());
        assert!(!g.remove_edge(&road(&a, &b)));
        assert!(!g.remove_vertex(&b));
        assert!(!g.update_vertex(town(2, 0.0, 0.0)));
    }

    #[test]
    fn update_edge_on_absent_edge_changes_nothing() {
        let mut g = GeometricGraph::new(world());
        let a = town(1, 10.0, 10.0);
        let b = town(2, 90.0, 90.0);
        let c = town(3, 50.0, 10.0);
        assert!(g.add_vertex(a.clone()));
        assert!(g.add_vertex(b.clone()));
        assert!(g.add_vertex(c.clone()));
        assert!(g.add_edge(road(&a, &c)));

        assert!(!g.update_edge(road(&a, &b)), "no such edge");
        assert!(!g.update_edge(road(&town(9, 0.0, 0.0), &a)), "unknown source");
        assert_eq!(g.graph().edge_count(), 1);
        assert!(!g.graph().contains_edge(&road(&a, &b)));
        assert_eq!(road_ids(g.edge_index().items()), [(1, 3)]);
        assert_eq!(road_ids(g.query_edges(world())), [(1, 3)]);
    }

    #[test]
    fn remove_vertex_purges_incident_edges_from_the_index() {
        let mut g = GeometricGraph::new(world());
        let towns = [town(1, 10.0, 10.0), town(2, 20.0, 80.0), town(3, 70.0, 30.0)];
        for t in &towns {
            assert!(g.add_vertex(t.clone()));
        }
        assert!(g.add_edge(road(&towns[0], &towns[1])));
        assert!(g.add_edge(road(&towns[1], &towns[2])));
        assert!(g.add_edge(road(&towns[2], &towns[0])));

        assert!(g.remove_vertex(&towns[1]));
        assert_eq!(road_ids(g.edge_index().items()), [(3, 1)]);
        assert_eq!(town_ids(g.query_vertices(world())), [1, 3]);
        assert_eq!(g.graph().edge_count(), 1);
    }

    #[test]
    fn parallel_equal_edges_are_queried_once_per_copy() {
        let mut g = GeometricGraph::new(world());
        let a = town(1, 10.0, 10.0);
        let b = town(2, 30.0, 10.0);
        assert!(g.add_vertex(a.clone()));
        assert!(g.add_vertex(b.clone()));
        assert!(g.add_edge(road(&a, &b)));
        assert!(g.add_edge(road(&a, &b)));
        assert_eq!(g.graph().edge_count(), 2);
        assert_eq!(g.edge_index().len(), 1, "copies share one index entry");

        let all_edges = |g: &GeometricGraph<Town, Road>| road_ids(g.graph().edges());
        assert_eq!(road_ids(g.query_edges(world())), all_edges(&g));
        assert_eq!(road_ids(g.query_edges(world())), [(1, 2), (1, 2)]);

        assert!(g.remove_edge(&road(&a, &b)));
        assert_eq!(road_ids(g.query_edges(world())), all_edges(&g));
        assert_eq!(g.edge_index().len(), 1, "one copy remains in the graph");

        assert!(g.add_edge(road(&a, &b)));
        assert!(g.remove_vertex(&b), "drops both copies at once");
        assert!(g.edge_index().is_empty());
        assert_eq!(g.query_edges(world()).count(), 0);
    }

    #[test]
    fn updates_move_index_entries() {
        let mut g = GeometricGraph::new(world());
        let a = town(1, 10.0, 10.0);
        let b = town(2, 20.0, 10.0);
        assert!(g.add_vertex(a.clone()));
        assert!(g.add_vertex(b.clone()));
        assert!(g.add_edge(road(&a, &b)));

        let moved = town(2, 80.0, 80.0);
        assert!(g.update_vertex(moved.clone()));
        assert!(g.update_edge(road(&a, &moved)));

        let far = Envelope::new(70.0, 70.0, 90.0, 90.0);
        assert_eq!(town_ids(g.query_vertices(far)), [2]);
        assert_eq!(road_ids(g.query_edges(far)), [(1, 2)]);
        let near = Envelope::new(15.0, 5.0, 25.0, 15.0);
        assert!(town_ids(g.query_vertices(near)).is_empty());
        let stored = g.graph().outgoing_edges(&a).unwrap();
        assert_eq!(stored[0].to.x, 80.0, "graph holds the new edge value");
    }

    #[test]
    fn queries_match_brute_force() {
        let mut state = 0x9E37_79B9_7F4A_7C15_u64;
        let mut next = move || {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state
        };
        let mut unit = move || (next() >> 11) as f64 / (1_u64 << 53) as f64;

        let mut g = GeometricGraph::new(world());
        let mut towns = Vec::new();
        for id in 0..300 {
            let t = town(id, unit() * 100.0, unit() * 100.0);
            assert!(g.add_vertex(t.clone()));
            towns.push(t);
        }
        for i in 0..towns.len() {
            let j = (i * 7 + 3) % towns.len();
            assert!(g.add_edge(road(&towns[i], &towns[j])));
        }
        for i in (0..towns.len()).step_by(10) {
            let j = (i * 7 + 3) % towns.len();
            assert!(g.add_edge(road(&towns[i], &towns[j])), "parallel copy");
        }
        for id in (0..300).step_by(5) {
            assert!(g.remove_vertex(&towns[id as usize]));
        }

        for _ in 0..50 {
            let (x, y) = (unit() * 110.0 - 5.0, unit() * 110.0 - 5.0);
            let q = Envelope::new(x, y, x + unit() * 30.0, y + unit() * 30.0);

            let oracle_v = town_ids(g.graph().vertices().filter(|t| q.intersects(&t.envelope())));
            assert_eq!(town_ids(g.query_vertices(q)), oracle_v, "vertices in {q:?}");

            let oracle_e = road_ids(g.graph().edges().filter(|r| q.intersects(&r.envelope())));
            assert_eq!(road_ids(g.query_edges(q)), oracle_e, "edges in {q:?}");
        }
    }

    #[test]
    fn clear_resets_graph_and_indices() {
        let mut g = GeometricGraph::new(world());
        let a = town(1, 1.0, 1.0);
        assert!(g.add_vertex(a.clone()));
        assert!(g.add_edge(road(&a, &a)));
        g.clear();
        assert!(g.graph().is_empty());
        assert!(g.vertex_index().is_empty());
        assert!(g.edge_index().is_empty());
        assert!(g.add_vertex(a), "identity free again");
    }
}
