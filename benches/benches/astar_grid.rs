// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use waymark_graph::{Edge, Graph};
use waymark_search::{AStar, FnEvaluator, MinHeap};

type Cell = (u32, u32);

struct Step {
    from: Cell,
    to: Cell,
    cost: f64,
}

impl Edge<Cell> for Step {
    fn source(&self) -> &Cell {
        &self.from
    }
    fn destination(&self) -> &Cell {
        &self.to
    }
}

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

/// 4-connected grid with random step costs in `[1, 2)`.
fn gen_grid(n: u32, seed: u64) -> Graph<Cell, Step> {
    let mut rng = Rng::new(seed);
    let mut g = Graph::new();
    for y in 0..n {
        for x in 0..n {
            g.add_vertex((x, y));
        }
    }
    for y in 0..n {
        for x in 0..n {
            let mut link = |to: Cell| {
                g.add_edge(Step {
                    from: (x, y),
                    to,
                    cost: 1.0 + rng.next_f64(),
                });
            };
            if x > 0 {
                link((x - 1, y));
            }
            if x + 1 < n {
                link((x + 1, y));
            }
            if y > 0 {
                link((x, y - 1));
            }
            if y + 1 < n {
                link((x, y + 1));
            }
        }
    }
    g
}

fn manhattan(a: &Cell, b: &Cell) -> f64 {
    f64::from(a.0.abs_diff(b.0) + a.1.abs_diff(b.1))
}

fn bench_corner_to_corner(c: &mut Criterion) {
    let mut group = c.benchmark_group("astar_grid");
    for &n in &[16u32, 32, 64] {
        let g = gen_grid(n, 0xBADC_F00D_1234_5678);
        group.throughput(Throughput::Elements(u64::from(n * n)));
        group.bench_function(format!("manhattan_n{}", n), |b| {
            let search = AStar::new(&g, FnEvaluator::new(|s: &Step| s.cost, manhattan));
            b.iter(|| black_box(search.find_path(&(0, 0), &(n - 1, n - 1))))
        });
        group.bench_function(format!("dijkstra_n{}", n), |b| {
            let search = AStar::new(&g, FnEvaluator::new(|s: &Step| s.cost, |_: &Cell, _: &Cell| 0.0));
            b.iter(|| black_box(search.find_path(&(0, 0), &(n - 1, n - 1))))
        });
    }
    group.finish();
}

fn bench_heap(c: &mut Criterion) {
    let mut group = c.benchmark_group("min_heap");
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    let values: Vec<f64> = (0..4096).map(|_| rng.next_f64()).collect();
    group.throughput(Throughput::Elements(values.len() as u64));
    group.bench_function("push_pop_4096", |b| {
        b.iter(|| {
            let mut heap: MinHeap<f64> = values.iter().copied().collect();
            let mut sum = 0.0;
            while let Ok(v) = heap.pop() {
                sum += v;
            }
            black_box(sum);
        })
    });
    group.finish();
}

criterion_group!(benches, bench_corner_to_corner, bench_heap);
criterion_main!(benches);
