// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Waymark Graph: directed graphs for routing, with optional spatial indexing.
//!
//! - [`Graph`] stores outgoing adjacency lists keyed by vertex. Edges are any type
//!   implementing [`Edge`]; parallel edges are allowed.
//! - [`GeometricGraph`] wraps a graph with two [`QuadTree`](waymark_quadtree::QuadTree)
//!   indices so vertices and edges can be found by rectangle. The indices follow
//!   every accepted mutation and ignore rejected ones.
//!
//! # Example
//!
//! ```rust
//! use waymark_graph::{Edge, Graph, GraphError};
//!
//! struct Hop(&'static str, &'static str);
//!
//! impl Edge<&'static str> for Hop {
//!     fn source(&self) -> &&'static str {
//!         &self.0
//!     }
//!     fn destination(&self) -> &&'static str {
//!         &self.1
//!     }
//! }
//!
//! let mut g = Graph::new();
//! g.add_vertex("dock");
//! g.add_vertex("gate");
//! assert!(g.add_edge(Hop("dock", "gate")));
//! assert!(!g.add_edge(Hop("dock", "moon")));
//!
//! assert_eq!(g.outgoing_edges(&"dock").map(<[_]>::len), Ok(1));
//! assert_eq!(g.incoming_edges(&"moon").err(), Some(GraphError::VertexNotFound));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod error;
pub mod geometric;
pub mod graph;

pub use error::GraphError;
pub use geometric::GeometricGraph;
pub use graph::{Edge, Graph};
