// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arena-resident quadtree nodes.

use alloc::vec::Vec;

use crate::types::{Envelope, Quadrant};

/// Index of a node in the quadtree arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeIdx(usize);

impl NodeIdx {
    pub(crate) const fn new(i: usize) -> Self {
        Self(i)
    }

    pub(crate) const fn get(self) -> usize {
        self.0
    }
}

/// A region of the tree. Children are either all present or all absent.
#[derive(Clone, Debug)]
pub(crate) struct QuadNode {
    pub(crate) rect: Envelope,
    pub(crate) parent: Option<NodeIdx>,
    pub(crate) children: Option<[NodeIdx; 4]>,
    /// Entry slots stored at this node.
    pub(crate) items: Vec<usize>,
    pub(crate) depth: u32,
}

impl QuadNode {
    pub(crate) fn new(rect: Envelope, parent: Option<NodeIdx>, depth: u32) -> Self {
        Self {
            rect,
            parent,
            children: None,
            items: Vec::new(),
            depth,
        }
    }

    #[inline]
    pub(crate) fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    #[inline]
    pub(crate) fn is_empty_leaf(&self) -> bool {
        self.is_leaf() && self.items.is_empty()
    }

    /// Drop `slot` from the local list. Returns false if it was not stored here.
    pub(crate) fn detach(&mut self, slot: usize) -> bool {
        match self.items.iter().position(|&s| s == slot) {
            Some(pos) => {
                self.items.swap_remove(pos);
                true
            }
            None => false,
        }
    }
}

/// The quadrant of `rect` that alone covers `env`.
///
/// Returns `None` when no quadrant covers it, or when it sits on a dividing line
/// and more than one does; such items stay at the parent.
pub(crate) fn covering_quadrant(rect: &Envelope, env: &Envelope) -> Option<Quadrant> {
    let quads = rect.quadrants();
    let mut found = None;
    for q in Quadrant::ALL {
        if quads[q.index()].covers(env) {
            if found.is_some() {
                return None;
            }
            found = Some(q);
        }
    }
    found
}
