// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Array-backed binary min-heap with removal of arbitrary elements.

use alloc::vec::Vec;

use crate::error::HeapError;

/// Binary min-heap over a `Vec`.
///
/// Unlike `alloc::collections::BinaryHeap` this keeps the smallest element on top,
/// orders by `PartialOrd`, and can remove any element, not only the top.
///
/// Invariant: for every index `i > 0`, `storage[(i - 1) / 2] <= storage[i]`.
/// Incomparable elements (such as NaN keys) never trigger a swap.
#[derive(Clone, Debug)]
pub struct MinHeap<T> {
    storage: Vec<T>,
}

impl<T> Default for MinHeap<T> {
    fn default() -> Self {
        Self {
            storage: Vec::new(),
        }
    }
}

impl<T> MinHeap<T> {
    /// Create an empty heap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty heap with room for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: Vec::with_capacity(capacity),
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// True if the heap holds no elements.
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Drop every element.
    pub fn clear(&mut self) {
        self.storage.clear();
    }

    /// Iterate in storage order, which is not sorted.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.storage.iter()
    }

    /// The smallest element.
    pub fn peek(&self) -> Result<&T, HeapError> {
        self.storage.first().ok_or(HeapError::Empty)
    }
}

impl<T: PartialOrd> MinHeap<T> {
    /// Add an element.
    pub fn push(&mut self, item: T) {
        self.storage.push(item);
        self.sift_up(self.storage.len() - 1);
    }

    /// Remove and return the smallest element.
    pub fn pop(&mut self) -> Result<T, HeapError> {
        if self.storage.is_empty() {
            return Err(HeapError::Empty);
        }
        Ok(self.remove_at(0))
    }

    /// Remove the first element (in storage order) matching `pred`.
    pub fn remove_where(&mut self, mut pred: impl FnMut(&T) -> bool) -> Option<T> {
        let pos = self.storage.iter().position(|x| pred(x))?;
        Some(self.remove_at(pos))
    }

    /// Remove an element equal to `item`. Returns false if there is none.
    pub fn remove(&mut self, item: &T) -> bool {
        self.remove_where(|x| x == item).is_some()
    }

    /// Consume the heap, yielding its elements smallest first.
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.storage.len());
        while let Ok(item) = self.pop() {
            out.push(item);
        }
        out
    }

    fn remove_at(&mut self, pos: usize) -> T {
        let item = self.storage.swap_remove(pos);
        if pos < self.storage.len() {
            if pos > 0 && self.storage[parent(pos)] > self.storage[pos] {
                self.sift_up(pos);
            } else {
                self.sift_down(pos);
            }
        }
        item
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let p = parent(i);
            if self.storage[p] > self.storage[i] {
                self.storage.swap(p, i);
                i = p;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let len = self.storage.len();
        loop {
            let left = 2 * i + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let smaller = if right < len && self.storage[right] < self.storage[left] {
                right
            } else {
                left
            };
            if self.storage[i] > self.storage[smaller] {
                self.storage.swap(i, smaller);
                i = smaller;
            } else {
                break;
            }
        }
    }
}

impl<T: PartialOrd> Extend<T> for MinHeap<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

impl<T: PartialOrd> FromIterator<T> for MinHeap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut heap = Self::new();
        heap.extend(iter);
        heap
    }
}

#[inline]
fn parent(i: usize) -> usize {
    (i - 1) / 2
}
