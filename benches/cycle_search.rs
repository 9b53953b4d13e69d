//! Benchmarks for cycle participant search
//!
//! Compares the exhaustive per-root search with the strongly connected
//! components pass on ring-shaped graphs and on small dense graphs, where
//! the exhaustive search grows exponentially.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use findcycles::cycles::{find_cycle_participants_with, Strategy};
use findcycles::dot;
use findcycles::graph::{Attributes, Graph};

/// Create a graph of `rings` disjoint rings of `ring_len` nodes, each ring
/// with a dangling tail node.
fn create_rings(rings: usize, ring_len: usize) -> Graph {
    let mut graph = Graph::new("rings");
    for r in 0..rings {
        for i in 0..ring_len {
            let from = format!("r{}_{}", r, i);
            let to = format!("r{}_{}", r, (i + 1) % ring_len);
            graph.add_edge(&from, &to, true, Attributes::new());
        }
        graph.add_edge(&format!("r{}_0", r), &format!("tail{}", r), true, Attributes::new());
    }
    graph
}

/// Create a complete digraph on `nodes` nodes, without self-loops
fn create_complete(nodes: usize) -> Graph {
    let mut graph = Graph::new("complete");
    for a in 0..nodes {
        for b in 0..nodes {
            if a != b {
                graph.add_edge(&format!("n{}", a), &format!("n{}", b), true, Attributes::new());
            }
        }
    }
    graph
}

/// Benchmark both strategies on sparse ring graphs
fn bench_rings(c: &mut Criterion) {
    let mut group = c.benchmark_group("rings");

    for rings in [10, 100, 500].iter() {
        let graph = create_rings(*rings, 8);

        for strategy in [Strategy::Exhaustive, Strategy::Components] {
            group.bench_with_input(
                BenchmarkId::new(strategy.to_string(), rings),
                &graph,
                |b, graph| b.iter(|| black_box(find_cycle_participants_with(graph, strategy))),
            );
        }
    }

    group.finish();
}

/// Benchmark both strategies on dense complete graphs
fn bench_complete(c: &mut Criterion) {
    let mut group = c.benchmark_group("complete");

    for nodes in [4, 5, 6, 7].iter() {
        let graph = create_complete(*nodes);

        for strategy in [Strategy::Exhaustive, Strategy::Components] {
            group.bench_with_input(
                BenchmarkId::new(strategy.to_string(), nodes),
                &graph,
                |b, graph| b.iter(|| black_box(find_cycle_participants_with(graph, strategy))),
            );
        }
    }

    group.finish();
}

/// Benchmark reading and writing DOT text
fn bench_dot_round_trip(c: &mut Criterion) {
    let mut group = c.benchmark_group("dot_round_trip");

    for rings in [100, 1000].iter() {
        let text = dot::to_string(&create_rings(*rings, 8));

        group.bench_with_input(BenchmarkId::new("rings", rings), &text, |b, text| {
            b.iter(|| {
                let graph = dot::parse(black_box(text)).ok();
                black_box(graph.map(|g| dot::to_string(&g)))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_rings, bench_complete, bench_dot_round_trip);
criterion_main!(benches);
