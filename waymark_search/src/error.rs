// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Heap errors.

/// Failure to read the top of a [`MinHeap`](crate::MinHeap).
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum HeapError {
    /// The heap holds no elements.
    #[error("heap is empty")]
    Empty,
}
