// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Region quadtree: structure, updates, queries.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::HashMap;
use kurbo::Point;

use crate::error::IndexError;
use crate::node::{NodeIdx, QuadNode, covering_quadrant};
use crate::types::{Bounded, Envelope, Quadrant};

/// The root always lives in the first arena slot and is never freed.
const ROOT: NodeIdx = NodeIdx::new(0);

/// Tuning knobs for a [`QuadTree`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct QuadTreeOptions {
    /// Number of items a leaf holds before the next insert splits it.
    pub capacity: usize,
    /// Nodes at this depth never split; they hold any number of items.
    ///
    /// Bounds the tree height when many items share (nearly) the same location.
    pub max_depth: u32,
}

impl Default for QuadTreeOptions {
    fn default() -> Self {
        Self {
            capacity: 10,
            max_depth: 20,
        }
    }
}

#[derive(Clone, Debug)]
struct Entry<T> {
    item: T,
    envelope: Envelope, // cached at insert/update time
    owner: NodeIdx,
}

/// A region quadtree over items that report a bounding [`Envelope`].
///
/// Nodes live in an arena and refer to each other by index; each entry records
/// the node holding it, so removal and relocation start at that node instead of
/// descending from the root.
pub struct QuadTree<T> {
    options: QuadTreeOptions,
    nodes: Vec<Option<QuadNode>>,
    free_nodes: Vec<usize>,
    entries: Vec<Option<Entry<T>>>,
    free_entries: Vec<usize>,
    identity: HashMap<T, usize>,
}

impl<T> Debug for QuadTree<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let alive_nodes = self.nodes.iter().filter(|n| n.is_some()).count();
        f.debug_struct("QuadTree")
            .field("options", &self.options)
            .field("bounds", &self.node(ROOT).rect)
            .field("nodes_alive", &alive_nodes)
            .field("items", &self.identity.len())
            .finish_non_exhaustive()
    }
}

impl<T> QuadTree<T> {
    /// Create an empty tree over `bounds` with default options.
    pub fn new(bounds: Envelope) -> Self {
        Self::with_options(bounds, QuadTreeOptions::default())
    }

    /// Create an empty tree over `bounds`.
    ///
    /// Items outside `bounds` are still accepted; they are kept at the root.
    ///
    /// # Panics
    ///
    /// If `options.capacity` is zero.
    pub fn with_options(bounds: Envelope, options: QuadTreeOptions) -> Self {
        assert!(options.capacity > 0, "quadtree capacity must be at least one");
        Self {
            options,
            nodes: vec![Some(QuadNode::new(bounds, None, 0))],
            free_nodes: Vec::new(),
            entries: Vec::new(),
            free_entries: Vec::new(),
            identity: HashMap::new(),
        }
    }

    /// Envelope of the root node.
    pub fn bounds(&self) -> Envelope {
        self.node(ROOT).rect
    }

    /// Options this tree was built with.
    pub fn options(&self) -> QuadTreeOptions {
        self.options
    }

    /// Number of indexed items, counted by walking the nodes.
    pub fn len(&self) -> usize {
        self.nodes.iter().flatten().map(|n| n.items.len()).sum()
    }

    /// True if no items are indexed.
    pub fn is_empty(&self) -> bool {
        self.identity.is_empty()
    }

    /// Number of live nodes, including the root.
    pub fn node_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    /// Depth of the deepest live node; a lone root has depth 0.
    pub fn depth(&self) -> u32 {
        self.nodes.iter().flatten().map(|n| n.depth).max().unwrap_or(0)
    }

    /// Remove every item and collapse the tree to a single root leaf.
    pub fn clear(&mut self) {
        let bounds = self.bounds();
        self.nodes.clear();
        self.nodes.push(Some(QuadNode::new(bounds, None, 0)));
        self.free_nodes.clear();
        self.entries.clear();
        self.free_entries.clear();
        self.identity.clear();
    }

    /// All items, collected by walking the tree from the root.
    pub fn items(&self) -> impl Iterator<Item = &T> + '_ {
        let mut slots = Vec::new();
        self.collect_subtree(ROOT, &mut slots);
        slots.into_iter().map(|slot| &self.entry(slot).item)
    }

    /// Items whose envelope intersects `rect` (boundary-inclusive).
    ///
    /// Subtrees whose region lies inside `rect` are collected without testing each
    /// item; subtrees outside it are skipped.
    pub fn query_rect(&self, rect: Envelope) -> impl Iterator<Item = &T> + '_ {
        let mut out = Vec::new();
        let mut stack = vec![ROOT];
        while let Some(at) = stack.pop() {
            let node = self.node(at);
            let is_root = at == ROOT;
            // The root also holds out-of-bounds items, so its own list is always tested.
            if !is_root && rect.covers(&node.rect) {
                self.collect_subtree(at, &mut out);
                continue;
            }
            let overlaps = rect.intersects(&node.rect);
            if overlaps || is_root {
                for &slot in &node.items {
                    if rect.intersects(&self.entry(slot).envelope) {
                        out.push(slot);
                    }
                }
            }
            if overlaps && let Some(children) = node.children {
                stack.extend(children);
            }
        }
        out.into_iter().map(|slot| &self.entry(slot).item)
    }

    /// Items whose envelope contains the point.
    pub fn query_point(&self, p: Point) -> impl Iterator<Item = &T> + '_ {
        self.query_rect(Envelope::from_point(p))
    }

    fn collect_subtree(&self, at: NodeIdx, out: &mut Vec<usize>) {
        let mut stack = vec![at];
        while let Some(i) = stack.pop() {
            let node = self.node(i);
            out.extend_from_slice(&node.items);
            if let Some(children) = node.children {
                stack.extend(children);
            }
        }
    }

    fn node(&self, idx: NodeIdx) -> &QuadNode {
        self.nodes[idx.get()].as_ref().expect("dangling quadtree node index")
    }

    fn node_mut(&mut self, idx: NodeIdx) -> &mut QuadNode {
        self.nodes[idx.get()].as_mut().expect("dangling quadtree node index")
    }

    fn entry(&self, slot: usize) -> &Entry<T> {
        self.entries[slot].as_ref().expect("dangling quadtree entry slot")
    }

    fn entry_mut(&mut self, slot: usize) -> &mut Entry<T> {
        self.entries[slot].as_mut().expect("dangling quadtree entry slot")
    }

    fn alloc_node(&mut self, node: QuadNode) -> NodeIdx {
        if let Some(idx) = self.free_nodes.pop() {
            self.nodes[idx] = Some(node);
            NodeIdx::new(idx)
        } else {
            self.nodes.push(Some(node));
            NodeIdx::new(self.nodes.len() - 1)
        }
    }

    fn free_node(&mut self, idx: NodeIdx) {
        self.nodes[idx.get()] = None;
        self.free_nodes.push(idx.get());
    }

    fn alloc_entry(&mut self, entry: Entry<T>) -> usize {
        if let Some(slot) = self.free_entries.pop() {
            self.entries[slot] = Some(entry);
            slot
        } else {
            self.entries.push(Some(entry));
            self.entries.len() - 1
        }
    }

    fn take_entry(&mut self, slot: usize) -> Entry<T> {
        let entry = self.entries[slot].take().expect("dangling quadtree entry slot");
        self.free_entries.push(slot);
        entry
    }

    fn store(&mut self, at: NodeIdx, slot: usize) {
        self.node_mut(at).items.push(slot);
        self.entry_mut(slot).owner = at;
    }

    fn child_for(&self, at: NodeIdx, env: &Envelope) -> Option<NodeIdx> {
        let node = self.node(at);
        let children = node.children?;
        covering_quadrant(&node.rect, env).map(|q| children[q.index()])
    }

    /// Place `slot` at or below `start`.
    ///
    /// A full leaf splits at most once per insert: the item goes straight into the
    /// fresh child that covers it, and that child splits on a later insert if needed.
    fn insert_from(&mut self, start: NodeIdx, slot: usize) {
        let env = self.entry(slot).envelope;
        let mut at = start;
        loop {
            let node = self.node(at);
            assert!(
                at == ROOT || node.rect.covers(&env),
                "quadtree insert reached a non-root node that does not cover the item"
            );
            if node.is_leaf() {
                let fits = node.items.len() < self.options.capacity
                    || node.depth >= self.options.max_depth;
                if !fits {
                    self.subdivide(at);
                    let target = self.child_for(at, &env).unwrap_or(at);
                    self.store(target, slot);
                    return;
                }
                self.store(at, slot);
                return;
            }
            match self.child_for(at, &env) {
                Some(child) => at = child,
                None => {
                    self.store(at, slot);
                    return;
                }
            }
        }
    }

    /// Place `slot` at or below `start` through existing children only.
    ///
    /// Never subdivides, so a leaf already over capacity stays as it is.
    fn settle(&mut self, start: NodeIdx, slot: usize) {
        let env = self.entry(slot).envelope;
        let mut at = start;
        while let Some(child) = self.child_for(at, &env) {
            at = child;
        }
        self.store(at, slot);
    }

    /// Split a leaf into four quadrants and push down every local item one of them covers.
    fn subdivide(&mut self, at: NodeIdx) {
        let (rect, depth) = {
            let node = self.node(at);
            debug_assert!(node.is_leaf(), "only leaves subdivide");
            (node.rect, node.depth)
        };
        let quads = rect.quadrants();
        let mut children = [ROOT; 4];
        for q in Quadrant::ALL {
            children[q.index()] =
                self.alloc_node(QuadNode::new(quads[q.index()], Some(at), depth + 1));
        }
        let local = core::mem::take(&mut self.node_mut(at).items);
        self.node_mut(at).children = Some(children);
        let mut kept = Vec::new();
        let mut pushed = 0_usize;
        for slot in local {
            match covering_quadrant(&rect, &self.entry(slot).envelope) {
                Some(q) => {
                    self.store(children[q.index()], slot);
                    pushed += 1;
                }
                None => kept.push(slot),
            }
        }
        tracing::trace!(depth, pushed, kept = kept.len(), "subdivided quadtree node");
        self.node_mut(at).items = kept;
    }

    /// Collapse empty regions, starting at `start` and walking towards the root.
    fn clean_upwards(&mut self, start: NodeIdx) {
        let mut at = start;
        loop {
            if let Some(children) = self.node(at).children
                && children.iter().all(|&c| self.node(c).is_empty_leaf())
            {
                for c in children {
                    self.free_node(c);
                }
                self.node_mut(at).children = None;
                tracing::trace!(depth = self.node(at).depth, "collapsed quadtree node");
            }
            let node = self.node(at);
            match node.parent {
                Some(parent) if node.is_empty_leaf() => at = parent,
                _ => break,
            }
        }
    }
}

impl<T: Bounded + Eq + Hash + Clone> QuadTree<T> {
    /// Index a new item.
    ///
    /// Fails with [`IndexError::DuplicateItem`] if an equal item is already indexed.
    pub fn insert(&mut self, item: T) -> Result<(), IndexError> {
        if self.identity.contains_key(&item) {
            return Err(IndexError::DuplicateItem);
        }
        let envelope = item.envelope();
        let slot = self.alloc_entry(Entry {
            item: item.clone(),
            envelope,
            owner: ROOT,
        });
        self.identity.insert(item, slot);
        self.insert_from(ROOT, slot);
        Ok(())
    }

    /// Remove an item. Returns false if it was not indexed.
    pub fn remove(&mut self, item: &T) -> bool {
        let Some(slot) = self.identity.remove(item) else {
            return false;
        };
        let entry = self.take_entry(slot);
        let detached = self.node_mut(entry.owner).detach(slot);
        assert!(detached, "quadtree entry owner does not hold the entry");
        self.clean_upwards(entry.owner);
        true
    }

    /// Re-index an item whose envelope changed. Returns false if it was not indexed.
    ///
    /// The stored value is replaced by `item`. If its current node still covers the
    /// new envelope, the item only moves down into existing children. Otherwise it
    /// moves up to the nearest node covering it (or the root) and is inserted from
    /// there. Regions emptied by the move are collapsed.
    pub fn update(&mut self, item: T) -> bool {
        let Some(slot) = self.identity.remove(&item) else {
            return false;
        };
        self.identity.insert(item.clone(), slot);
        let envelope = item.envelope();
        let owner = {
            let entry = self.entry_mut(slot);
            entry.item = item;
            entry.envelope = envelope;
            entry.owner
        };
        let detached = self.node_mut(owner).detach(slot);
        assert!(detached, "quadtree entry owner does not hold the entry");

        let mut target = owner;
        while target != ROOT && !self.node(target).rect.covers(&envelope) {
            target = self
                .node(target)
                .parent
                .expect("non-root quadtree node without a parent");
        }
        if target == owner {
            self.settle(owner, slot);
        } else {
            self.insert_from(target, slot);
        }
        self.clean_upwards(owner);
        true
    }

    /// True if an equal item is indexed.
    pub fn contains(&self, item: &T) -> bool {
        self.identity.contains_key(item)
    }

    /// The stored value equal to `item`, if indexed.
    pub fn get(&self, item: &T) -> Option<&T> {
        let slot = *self.identity.get(item)?;
        Some(&self.entry(slot).item)
    }

    #[cfg(test)]
    fn owner_of(&self, item: &T) -> Option<NodeIdx> {
        let slot = *self.identity.get(item)?;
        Some(self.entry(slot).owner)
    }
}
