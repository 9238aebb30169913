// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quadtree basics.
//!
//! Index a handful of map markers, query a window, move a marker across the
//! center line, and watch the tree grow and collapse.
//!
//! Run:
//! - `RUST_LOG=trace cargo run -p waymark_demos --example quadtree_basics`

use std::hash::{Hash, Hasher};

use kurbo::{Point, Rect};
use tracing_subscriber::EnvFilter;
use waymark_quadtree::{Bounded, Envelope, QuadTree, QuadTreeOptions};

#[derive(Clone, Debug)]
struct Marker {
    name: &'static str,
    at: Point,
}

impl PartialEq for Marker {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Marker {}

impl Hash for Marker {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl Bounded for Marker {
    fn envelope(&self) -> Envelope {
        Envelope::from_point(self.at)
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let options = QuadTreeOptions {
        capacity: 2,
        ..Default::default()
    };
    let mut tree = QuadTree::with_options(Rect::new(0.0, 0.0, 100.0, 100.0).into(), options);

    let markers = [
        ("harbor", 12.0, 8.0),
        ("lighthouse", 4.0, 20.0),
        ("market", 30.0, 30.0),
        ("mill", 80.0, 75.0),
        ("chapel", 22.0, 14.0),
    ];
    for (name, x, y) in markers {
        tree.insert(Marker {
            name,
            at: Point::new(x, y),
        })
        .expect("marker names are unique");
    }
    println!("{} markers in {} nodes, depth {}", tree.len(), tree.node_count(), tree.depth());

    let window = Envelope::from(Rect::new(0.0, 0.0, 25.0, 25.0));
    let mut hits: Vec<_> = tree.query_rect(window).map(|m| m.name).collect();
    hits.sort_unstable();
    println!("in the south-west window: {hits:?}");

    // Move the mill next to the harbor; the north-east quadrant empties out.
    tree.update(Marker {
        name: "mill",
        at: Point::new(10.0, 10.0),
    });
    let near: Vec<_> = tree.query_point(Point::new(10.0, 10.0)).map(|m| m.name).collect();
    println!("at (10, 10): {near:?}");

    for name in ["harbor", "lighthouse", "market", "chapel", "mill"] {
        tree.remove(&Marker {
            name,
            at: Point::ZERO,
        });
    }
    println!("after removing everything: {} node(s)", tree.node_count());
}
