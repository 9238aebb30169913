// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by [`QuadTree`](crate::QuadTree).

/// Failure to insert into a [`QuadTree`](crate::QuadTree).
///
/// Absence on remove/update is an expected outcome and is reported as `false`
/// rather than through this type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum IndexError {
    /// An item with the same identity is already indexed.
    #[error("item is already indexed")]
    DuplicateItem,
}
