// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Waymark Search: A* routing over [`waymark_graph::Graph`].
//!
//! - [`AStar`] finds the cheapest route between two vertices, using a
//!   [`CostEvaluator`] for edge costs and the goal heuristic.
//! - [`MinHeap`] is the array-backed binary min-heap behind the frontier; it can
//!   remove arbitrary elements, which the standard heap cannot.
//! - [`PartialPathList`] pairs that heap with a vertex map so the frontier can be
//!   searched and re-prioritized by vertex.
//!
//! When a cheaper route reaches a vertex that was already explored, the vertex is
//! sent back to the frontier, so inconsistent heuristics still yield the cheapest
//! route found through the explored vertices.
//!
//! # Example
//!
//! ```rust
//! use waymark_graph::{Edge, Graph};
//! use waymark_search::{AStar, FnEvaluator};
//!
//! struct Leg(u8, u8, f64);
//!
//! impl Edge<u8> for Leg {
//!     fn source(&self) -> &u8 {
//!         &self.0
//!     }
//!     fn destination(&self) -> &u8 {
//!         &self.1
//!     }
//! }
//!
//! let mut g = Graph::new();
//! for v in 0..3 {
//!     g.add_vertex(v);
//! }
//! g.add_edge(Leg(0, 1, 1.0));
//! g.add_edge(Leg(1, 2, 1.0));
//! g.add_edge(Leg(0, 2, 5.0));
//!
//! let search = AStar::new(&g, FnEvaluator::new(|l: &Leg| l.2, |_: &u8, _: &u8| 0.0));
//! let outcome = search.find_path(&0, &2).unwrap();
//! let path = outcome.path().unwrap();
//! assert_eq!(path.vertices(), [0, 1, 2]);
//! assert_eq!(path.cost(), 2.0);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod astar;
pub mod error;
pub mod heap;
pub mod path;

pub use astar::{AStar, CostEvaluator, FnEvaluator, Path, SearchOutcome};
pub use error::HeapError;
pub use heap::MinHeap;
pub use path::{PartialPath, PartialPathList};
