// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Waymark Quadtree: a region quadtree over items with bounding envelopes.
//!
//! - Insert, update (move), and remove items; each item is indexed at most once.
//! - Query by intersecting rectangle or by point. Boundaries are inclusive.
//! - A full leaf splits into four equal quadrants; items that straddle a dividing
//!   line stay at the splitting node.
//! - Items outside the tree bounds are accepted and kept at the root.
//! - Removal and moves collapse regions that become empty.
//!
//! Items implement [`Bounded`] to report their [`Envelope`], and `Eq + Hash` for
//! identity. The identity must not depend on the geometry, since a moved item is
//! found again by equality.
//!
//! # Example
//!
//! ```rust
//! use waymark_quadtree::{Bounded, Envelope, QuadTree};
//!
//! #[derive(Clone, Debug, PartialEq, Eq, Hash)]
//! struct Pin {
//!     id: u32,
//!     x: i32,
//!     y: i32,
//! }
//!
//! impl Bounded for Pin {
//!     fn envelope(&self) -> Envelope {
//!         let (x, y) = (f64::from(self.x), f64::from(self.y));
//!         Envelope::new(x, y, x, y)
//!     }
//! }
//!
//! let mut tree = QuadTree::new(Envelope::new(0.0, 0.0, 100.0, 100.0));
//! tree.insert(Pin { id: 1, x: 10, y: 10 }).unwrap();
//! tree.insert(Pin { id: 2, x: 80, y: 80 }).unwrap();
//!
//! let hits: Vec<_> = tree.query_rect(Envelope::new(0.0, 0.0, 50.0, 50.0)).collect();
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].id, 1);
//! assert!(tree.insert(Pin { id: 1, x: 10, y: 10 }).is_err());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod error;
mod node;
pub mod tree;
pub mod types;

pub use error::IndexError;
pub use tree::{QuadTree, QuadTreeOptions};
pub use types::{Bounded, Envelope, Quadrant};
