// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use waymark_quadtree::{Bounded, Envelope, QuadTree};

use rstar::primitives::Rectangle;
use rstar::{AABB, RTree};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct Cell(u32, u32);

impl Bounded for Cell {
    fn envelope(&self) -> Envelope {
        let (x0, y0) = (f64::from(self.0) * 10.0, f64::from(self.1) * 10.0);
        Envelope::new(x0, y0, x0 + 10.0, y0 + 10.0)
    }
}

fn gen_grid_cells(n: u32) -> Vec<Cell> {
    (0..n).flat_map(|y| (0..n).map(move |x| Cell(x, y))).collect()
}

fn to_rstar_rects(v: &[Cell]) -> Vec<Rectangle<[f64; 2]>> {
    v.iter()
        .map(|c| {
            let e = c.envelope();
            Rectangle::from_corners([e.min_x, e.min_y], [e.max_x, e.max_y])
        })
        .collect()
}

fn bench_quadtree_vs_rstar(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree_vs_rstar");
    let query = Envelope::new(100.0, 100.0, 500.0, 500.0);
    for &n in &[64u32, 128] {
        let cells = gen_grid_cells(n);
        let extent = f64::from(n) * 10.0;
        group.throughput(Throughput::Elements(u64::from(n * n)));

        group.bench_function(format!("waymark_build_query_n{}", n), |b| {
            b.iter_batched(
                || QuadTree::new(Envelope::new(0.0, 0.0, extent, extent)),
                |mut tree| {
                    for cell in &cells {
                        tree.insert(cell.clone()).expect("cells are unique");
                    }
                    black_box(tree.query_rect(query).count());
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("rstar_build_query_n{}", n), |b| {
            b.iter_batched(
                || to_rstar_rects(&cells),
                |rectangles| {
                    let mut tree = RTree::new();
                    for r in rectangles {
                        tree.insert(r);
                    }
                    let aabb = AABB::from_corners([query.min_x, query.min_y], [query.max_x, query.max_y]);
                    black_box(tree.locate_in_envelope_intersecting(&aabb).count());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_quadtree_vs_rstar);
criterion_main!(benches);
