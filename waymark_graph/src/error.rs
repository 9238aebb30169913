// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Graph lookup errors.

/// A lookup named a vertex the graph does not hold.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// The vertex is not in the graph.
    #[error("vertex is not in the graph")]
    VertexNotFound,
}
