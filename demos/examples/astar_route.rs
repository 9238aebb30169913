// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A* routing over a geometric graph.
//!
//! Edge cost is straight-line length; the heuristic is the straight-line
//! distance to the goal.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p waymark_demos --example astar_route`

use std::hash::{Hash, Hasher};

use kurbo::Point;
use tracing_subscriber::EnvFilter;
use waymark_graph::{Edge, GeometricGraph};
use waymark_quadtree::{Bounded, Envelope};
use waymark_search::{AStar, FnEvaluator, SearchOutcome};

#[derive(Clone, Debug)]
struct Junction {
    name: char,
    at: Point,
}

impl PartialEq for Junction {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Junction {}

impl Hash for Junction {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl Bounded for Junction {
    fn envelope(&self) -> Envelope {
        Envelope::from_point(self.at)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct Street(Junction, Junction);

impl Street {
    fn length(&self) -> f64 {
        self.0.at.distance(self.1.at)
    }
}

impl Edge<Junction> for Street {
    fn source(&self) -> &Junction {
        &self.0
    }
    fn destination(&self) -> &Junction {
        &self.1
    }
}

impl Bounded for Street {
    fn envelope(&self) -> Envelope {
        Envelope::from_points([self.0.at, self.1.at])
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let junctions: Vec<Junction> = [
        ('A', 0.0, 0.0),
        ('B', 40.0, 10.0),
        ('C', 80.0, 0.0),
        ('D', 40.0, 60.0),
        ('Z', 90.0, 90.0),
    ]
    .into_iter()
    .map(|(name, x, y)| Junction {
        name,
        at: Point::new(x, y),
    })
    .collect();
    let j = |name: char| junctions.iter().find(|j| j.name == name).cloned().expect("known junction");

    let mut city = GeometricGraph::new(Envelope::new(0.0, 0.0, 100.0, 100.0));
    for junction in &junctions {
        city.add_vertex(junction.clone());
    }
    for (a, b) in [('A', 'B'), ('B', 'C'), ('A', 'D'), ('D', 'C'), ('C', 'A')] {
        city.add_edge(Street(j(a), j(b)));
        city.add_edge(Street(j(b), j(a)));
    }

    let evaluator = FnEvaluator::new(Street::length, |a: &Junction, b: &Junction| a.at.distance(b.at));
    let search = AStar::new(city.graph(), evaluator);

    for goal in ['C', 'Z'] {
        match search.find_path(&j('A'), &j(goal)) {
            Ok(SearchOutcome::Found(path)) => {
                let names: String = path.vertices().iter().map(|v| v.name).collect();
                println!("A -> {goal}: {names} ({:.1})", path.cost());
            }
            Ok(SearchOutcome::Unreachable) => println!("A -> {goal}: no route"),
            Err(err) => println!("A -> {goal}: {err}"),
        }
    }
}
