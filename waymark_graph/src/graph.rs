// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Directed graph stored as outgoing adjacency lists.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::HashMap;

use crate::error::GraphError;

/// A directed edge between two vertices.
///
/// Edges may carry any payload (length, name, geometry). Two edges are the same
/// edge when they compare equal, so parallel edges with different payloads are
/// distinct.
pub trait Edge<V> {
    /// Vertex the edge leaves.
    fn source(&self) -> &V;
    /// Vertex the edge enters.
    fn destination(&self) -> &V;
}

/// Directed graph: each vertex maps to the list of edges leaving it.
///
/// There is no reverse index; [`Graph::incoming_edges`] scans every list.
pub struct Graph<V, E> {
    adjacency: HashMap<V, Vec<E>>,
}

impl<V, E> Default for Graph<V, E> {
    fn default() -> Self {
        Self {
            adjacency: HashMap::new(),
        }
    }
}

impl<V, E> Debug for Graph<V, E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Graph")
            .field("vertices", &self.adjacency.len())
            .field("edges", &self.adjacency.values().map(Vec::len).sum::<usize>())
            .finish_non_exhaustive()
    }
}

impl<V, E> Graph<V, E> {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of edges, counting parallel edges separately.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    /// True if the graph has no vertices.
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Iterate over all vertices in unspecified order.
    pub fn vertices(&self) -> impl Iterator<Item = &V> + '_ {
        self.adjacency.keys()
    }

    /// Iterate over all edges, grouped by source vertex.
    pub fn edges(&self) -> impl Iterator<Item = &E> + '_ {
        self.adjacency.values().flatten()
    }

    /// Remove every vertex and edge.
    pub fn clear(&mut self) {
        self.adjacency.clear();
    }
}

impl<V: Eq + Hash, E: Edge<V>> Graph<V, E> {
    /// Add a vertex. Returns false if it is already present.
    pub fn add_vertex(&mut self, vertex: V) -> bool {
        if self.adjacency.contains_key(&vertex) {
            tracing::trace!("rejected duplicate vertex");
            return false;
        }
        self.adjacency.insert(vertex, Vec::new());
        true
    }

    /// Add an edge. Returns false if either endpoint is missing.
    ///
    /// Parallel edges are kept, even when equal.
    pub fn add_edge(&mut self, edge: E) -> bool {
        if !self.adjacency.contains_key(edge.destination()) {
            tracing::trace!("rejected edge with unknown destination");
            return false;
        }
        match self.adjacency.get_mut(edge.source()) {
            Some(out) => {
                out.push(edge);
                true
            }
            None => {
                tracing::trace!("rejected edge with unknown source");
                false
            }
        }
    }

    /// Remove a vertex and every edge leaving or entering it.
    ///
    /// Returns false if the vertex was not present.
    pub fn remove_vertex(&mut self, vertex: &V) -> bool {
        self.detach_vertex(vertex).is_some()
    }

    /// Remove a vertex, returning it with every edge that touched it.
    pub(crate) fn detach_vertex(&mut self, vertex: &V) -> Option<(V, Vec<E>)> {
        let (owned, mut removed) = self.adjacency.remove_entry(vertex)?;
        for out in self.adjacency.values_mut() {
            let mut i = 0;
            while i < out.len() {
                if out[i].destination() == vertex {
                    removed.push(out.remove(i));
                } else {
                    i += 1;
                }
            }
        }
        Some((owned, removed))
    }

    /// Swap in a new value for an existing vertex, keeping its edges.
    pub(crate) fn replace_vertex(&mut self, vertex: V) -> bool {
        match self.adjacency.remove_entry(&vertex) {
            Some((_, out)) => {
                self.adjacency.insert(vertex, out);
                true
            }
            None => false,
        }
    }

    /// True if the vertex is present.
    pub fn contains_vertex(&self, vertex: &V) -> bool {
        self.adjacency.contains_key(vertex)
    }

    /// Edges leaving `vertex`, in insertion order.
    pub fn outgoing_edges(&self, vertex: &V) -> Result<&[E], GraphError> {
        self.adjacency
            .get(vertex)
            .map(Vec::as_slice)
            .ok_or(GraphError::VertexNotFound)
    }

    /// Edges entering `vertex`. Scans every adjacency list.
    pub fn incoming_edges(&self, vertex: &V) -> Result<Vec<&E>, GraphError> {
        if !self.adjacency.contains_key(vertex) {
            return Err(GraphError::VertexNotFound);
        }
        Ok(self
            .adjacency
            .values()
            .flatten()
            .filter(|e| e.destination() == vertex)
            .collect())
    }
}

impl<V: Eq + Hash, E: Edge<V> + PartialEq> Graph<V, E> {
    /// Remove the first edge equal to `edge` from its source's list.
    ///
    /// Returns false if there is no such edge.
    pub fn remove_edge(&mut self, edge: &E) -> bool {
        let Some(out) = self.adjacency.get_mut(edge.source()) else {
            return false;
        };
        match out.iter().position(|e| e == edge) {
            Some(pos) => {
                out.remove(pos);
                true
            }
            None => false,
        }
    }

    /// True if an edge equal to `edge` is present.
    pub fn contains_edge(&self, edge: &E) -> bool {
        self.adjacency
            .get(edge.source())
            .is_some_and(|out| out.contains(edge))
    }

    /// Swap in `edge` for every equal edge in its source's list.
    pub(crate) fn replace_edge(&mut self, edge: &E) -> bool
    where
        E: Clone,
    {
        let Some(out) = self.adjacency.get_mut(edge.source()) else {
            return false;
        };
        let mut found = false;
        for slot in out.iter_mut().filter(|e| *e == edge) {
            *slot = edge.clone();
            found = true;
        }
        found
    }
}
