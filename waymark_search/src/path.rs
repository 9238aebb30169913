// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Search-frontier entries and the indexed open list.

use core::cmp::Ordering;
use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::HashMap;

use crate::heap::MinHeap;

/// A partially explored route ending at `end`.
///
/// Two paths are equal when they end at the same vertex, whatever their costs.
#[derive(Clone, Debug)]
pub struct PartialPath<V> {
    /// Vertex this route reaches.
    pub end: V,
    /// Vertex the route came from, `None` at the start.
    pub previous: Option<V>,
    /// Accumulated cost from the start.
    pub cost: f64,
    /// Estimated remaining cost to the goal.
    pub heuristic: f64,
}

impl<V> PartialPath<V> {
    /// Create a frontier entry.
    pub fn new(end: V, previous: Option<V>, cost: f64, heuristic: f64) -> Self {
        Self {
            end,
            previous,
            cost,
            heuristic,
        }
    }

    /// `cost + heuristic`, the key the open list orders by.
    pub fn estimate(&self) -> f64 {
        self.cost + self.heuristic
    }
}

impl<V: PartialEq> PartialEq for PartialPath<V> {
    fn eq(&self, other: &Self) -> bool {
        self.end == other.end
    }
}

impl<V: Eq> Eq for PartialPath<V> {}

/// Heap element ordered by the path estimate alone.
///
/// Equality and ordering both look only at the estimate, so the two agree.
#[derive(Clone, Debug)]
struct Ranked<V>(PartialPath<V>);

impl<V> PartialEq for Ranked<V> {
    fn eq(&self, other: &Self) -> bool {
        self.0.estimate() == other.0.estimate()
    }
}

impl<V> PartialOrd for Ranked<V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.0.estimate().partial_cmp(&other.0.estimate())
    }
}

/// Open list for A*: a min-heap by estimate plus a map from end vertex to entry.
///
/// Holds at most one entry per vertex. Both structures change together; a
/// mismatch between them is a bug and panics.
pub struct PartialPathList<V> {
    heap: MinHeap<Ranked<V>>,
    by_vertex: HashMap<V, PartialPath<V>>,
}

impl<V> Default for PartialPathList<V> {
    fn default() -> Self {
        Self {
            heap: MinHeap::new(),
            by_vertex: HashMap::new(),
        }
    }
}

impl<V> Debug for PartialPathList<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PartialPathList")
            .field("len", &self.by_vertex.len())
            .finish_non_exhaustive()
    }
}

impl<V> PartialPathList<V> {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.by_vertex.len()
    }

    /// True if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.by_vertex.is_empty()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.by_vertex.clear();
    }
}

impl<V: Eq + Hash + Clone> PartialPathList<V> {
    /// Add an entry. Returns false if its vertex already has one.
    pub fn insert(&mut self, path: PartialPath<V>) -> bool {
        if self.by_vertex.contains_key(&path.end) {
            return false;
        }
        self.by_vertex.insert(path.end.clone(), path.clone());
        self.heap.push(Ranked(path));
        true
    }

    /// Entry for `vertex`, if any.
    pub fn get(&self, vertex: &V) -> Option<&PartialPath<V>> {
        self.by_vertex.get(vertex)
    }

    /// True if `vertex` has an entry.
    pub fn contains(&self, vertex: &V) -> bool {
        self.by_vertex.contains_key(vertex)
    }

    /// Remove and return the entry for `vertex`.
    pub fn remove(&mut self, vertex: &V) -> Option<PartialPath<V>> {
        let path = self.by_vertex.remove(vertex)?;
        let ranked = self.heap.remove_where(|r| r.0.end == *vertex);
        assert!(ranked.is_some(), "open list heap lost an entry its map held");
        Some(path)
    }

    /// Remove and return the entry with the smallest estimate.
    pub fn pop(&mut self) -> Option<PartialPath<V>> {
        let Ranked(path) = self.heap.pop().ok()?;
        let mapped = self.by_vertex.remove(&path.end);
        assert!(mapped.is_some(), "open list map lost an entry its heap held");
        Some(path)
    }

    /// Give `vertex` a new cost and predecessor, keeping its heuristic.
    ///
    /// Returns false if `vertex` has no entry.
    pub fn update(&mut self, vertex: &V, cost: f64, previous: Option<V>) -> bool {
        let Some(mut path) = self.remove(vertex) else {
            return false;
        };
        path.cost = cost;
        path.previous = previous;
        let inserted = self.insert(path);
        debug_assert!(inserted, "vertex was just removed");
        true
    }
}
