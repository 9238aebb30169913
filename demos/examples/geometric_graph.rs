// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometric graph example.
//!
//! Build a small road network and find the stops and roads inside a viewport.
//!
//! Run:
//! - `cargo run -p waymark_demos --example geometric_graph`

use std::hash::{Hash, Hasher};

use kurbo::{Point, Rect};
use tracing_subscriber::EnvFilter;
use waymark_graph::{Edge, GeometricGraph};
use waymark_quadtree::{Bounded, Envelope};

#[derive(Clone, Debug)]
struct Stop {
    id: u32,
    at: Point,
}

impl PartialEq for Stop {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Stop {}

impl Hash for Stop {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Bounded for Stop {
    fn envelope(&self) -> Envelope {
        Envelope::from_point(self.at)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct Road {
    from: Stop,
    to: Stop,
}

impl Edge<Stop> for Road {
    fn source(&self) -> &Stop {
        &self.from
    }
    fn destination(&self) -> &Stop {
        &self.to
    }
}

impl Bounded for Road {
    fn envelope(&self) -> Envelope {
        Envelope::from_points([self.from.at, self.to.at])
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut network = GeometricGraph::new(Envelope::new(0.0, 0.0, 1000.0, 1000.0));
    let stops: Vec<Stop> = [(100.0, 100.0), (300.0, 120.0), (320.0, 400.0), (800.0, 820.0)]
        .into_iter()
        .enumerate()
        .map(|(i, (x, y))| Stop {
            id: i as u32,
            at: Point::new(x, y),
        })
        .collect();
    for s in &stops {
        network.add_vertex(s.clone());
    }
    for (a, b) in [(0, 1), (1, 2), (2, 3), (3, 0)] {
        network.add_edge(Road {
            from: stops[a].clone(),
            to: stops[b].clone(),
        });
    }

    let viewport = Envelope::from(Rect::new(50.0, 50.0, 350.0, 200.0));
    let visible_stops: Vec<u32> = network.query_vertices(viewport).map(|s| s.id).collect();
    let visible_roads: Vec<(u32, u32)> = network
        .query_edges(viewport)
        .map(|r| (r.from.id, r.to.id))
        .collect();
    println!("stops in view: {visible_stops:?}");
    println!("roads in view: {visible_roads:?}");

    network.remove_vertex(&stops[1]);
    let remaining = network.query_edges(viewport).count();
    println!("roads in view after closing stop 1: {remaining}");
}
