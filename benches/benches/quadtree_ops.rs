// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::hash::{Hash, Hasher};

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use waymark_quadtree::{Bounded, Envelope, QuadTree};

#[derive(Clone, Debug)]
struct Tile {
    id: u32,
    env: Envelope,
}

impl PartialEq for Tile {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Tile {}

impl Hash for Tile {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Bounded for Tile {
    fn envelope(&self) -> Envelope {
        self.env
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

fn gen_grid_tiles(n: usize, cell: f64) -> Vec<Tile> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * cell;
            let y0 = y as f64 * cell;
            out.push(Tile {
                id: out.len() as u32,
                env: Envelope::new(x0, y0, x0 + cell, y0 + cell),
            });
        }
    }
    out
}

fn gen_clustered_tiles(n_clusters: usize, per_cluster: usize, spread: f64) -> Vec<Tile> {
    let mut out = Vec::with_capacity(n_clusters * per_cluster);
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let mut centers = Vec::with_capacity(n_clusters);
    for _ in 0..n_clusters {
        centers.push((rng.next_f64() * 2000.0, rng.next_f64() * 2000.0));
    }
    for (cx, cy) in centers {
        for _ in 0..per_cluster {
            let x0 = cx + (rng.next_f64() - 0.5) * spread;
            let y0 = cy + (rng.next_f64() - 0.5) * spread;
            out.push(Tile {
                id: out.len() as u32,
                env: Envelope::new(x0, y0, x0 + 4.0, y0 + 4.0),
            });
        }
    }
    out
}

fn build(tiles: &[Tile], bounds: Envelope) -> QuadTree<Tile> {
    let mut tree = QuadTree::new(bounds);
    for t in tiles {
        tree.insert(t.clone()).expect("tile ids are unique");
    }
    tree
}

fn bench_build_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree_build_query");
    let query = Envelope::new(100.0, 100.0, 500.0, 500.0);
    for &n in &[32usize, 64, 128] {
        let tiles = gen_grid_tiles(n, 10.0);
        let bounds = Envelope::new(0.0, 0.0, n as f64 * 10.0, n as f64 * 10.0);
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("grid_n{}", n), |b| {
            b.iter(|| {
                let tree = build(&tiles, bounds);
                black_box(tree.query_rect(query).count());
            })
        });
    }
    let tiles = gen_clustered_tiles(32, 256, 80.0);
    group.bench_function("clustered_32x256", |b| {
        b.iter(|| {
            let tree = build(&tiles, Envelope::new(0.0, 0.0, 2000.0, 2000.0));
            black_box(tree.query_rect(query).count());
        })
    });
    group.finish();
}

fn bench_query_vs_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree_query_vs_scan");
    let tiles = gen_grid_tiles(128, 10.0);
    let tree = build(&tiles, Envelope::new(0.0, 0.0, 1280.0, 1280.0));
    let mut rng = Rng::new(0xFACE_FEED_CAFE_BABE);
    let queries: Vec<Envelope> = (0..64)
        .map(|_| {
            let x = rng.next_f64() * 1200.0;
            let y = rng.next_f64() * 1200.0;
            Envelope::new(x, y, x + 80.0, y + 80.0)
        })
        .collect();
    group.bench_function("quadtree", |b| {
        b.iter(|| {
            let hits: usize = queries.iter().map(|q| tree.query_rect(*q).count()).sum();
            black_box(hits);
        })
    });
    group.bench_function("linear_scan", |b| {
        b.iter(|| {
            let hits: usize = queries
                .iter()
                .map(|q| tiles.iter().filter(|t| q.intersects(&t.env)).count())
                .sum();
            black_box(hits);
        })
    });
    group.finish();
}

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree_update");
    let tiles = gen_grid_tiles(64, 10.0);
    let bounds = Envelope::new(0.0, 0.0, 640.0, 640.0);
    group.throughput(Throughput::Elements(tiles.len() as u64));
    group.bench_function("shift_all_n64", |b| {
        b.iter_batched(
            || build(&tiles, bounds),
            |mut tree| {
                for t in &tiles {
                    let env = t.env;
                    let moved = Tile {
                        id: t.id,
                        env: Envelope::new(env.min_x + 3.0, env.min_y + 3.0, env.max_x + 3.0, env.max_y + 3.0),
                    };
                    black_box(tree.update(moved));
                }
            },
            BatchSize::SmallInput,
        )
    });
    group.bench_function("remove_all_n64", |b| {
        b.iter_batched(
            || build(&tiles, bounds),
            |mut tree| {
                for t in &tiles {
                    black_box(tree.remove(t));
                }
                black_box(tree.node_count());
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(benches, bench_build_query, bench_query_vs_scan, bench_update);
criterion_main!(benches);
