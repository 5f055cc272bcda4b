// Copyright 2025 Cowboy AI, LLC.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use cim_catgraph::graph::{contract, tarjan};
use cim_catgraph::poset::simplify;
use cim_catgraph::GraphStore;

/// Layers of `width` vertices, each vertex below every vertex of the next
/// layer, with a cycle folded into every layer
fn layered(layers: usize, width: usize) -> GraphStore {
    let mut graph = GraphStore::new();
    for layer in 0..layers {
        for i in 0..width {
            let u = format!("l{layer}_{i}");
            if i + 1 < width {
                graph.add_edge(u.clone(), format!("l{layer}_{}", i + 1));
            }
            if layer + 1 < layers {
                for j in 0..width {
                    graph.add_edge(u.clone(), format!("l{}_{j}", layer + 1));
                }
            }
        }
        graph.add_edge(format!("l{layer}_{}", width - 1), format!("l{layer}_0"));
    }
    graph
}

fn chain(len: usize) -> GraphStore {
    let mut graph = GraphStore::new();
    graph.add_chain((0..len).map(|i| format!("n{i}")));
    graph
}

fn benchmark_tarjan(c: &mut Criterion) {
    let mut group = c.benchmark_group("tarjan_chain");

    for len in [1_000, 10_000, 100_000].iter() {
        let graph = chain(*len);
        group.bench_with_input(BenchmarkId::from_parameter(len), len, |b, _| {
            b.iter(|| tarjan(black_box(&graph)))
        });
    }

    group.finish();
}

fn benchmark_contract(c: &mut Criterion) {
    let mut group = c.benchmark_group("contract_layered");

    for layers in [4, 16, 64].iter() {
        let graph = layered(*layers, 4);
        group.bench_with_input(BenchmarkId::from_parameter(layers), layers, |b, _| {
            b.iter(|| contract(black_box(graph.clone())))
        });
    }

    group.finish();
}

fn benchmark_simplify(c: &mut Criterion) {
    let mut group = c.benchmark_group("simplify");

    for len in [50, 200, 800].iter() {
        let graph = chain(*len);
        group.bench_with_input(BenchmarkId::new("chain", len), len, |b, _| {
            b.iter(|| simplify(black_box(graph.clone())))
        });
    }
    for layers in [4, 16].iter() {
        let graph = layered(*layers, 6);
        group.bench_with_input(BenchmarkId::new("layered", layers), layers, |b, _| {
            b.iter(|| simplify(black_box(graph.clone())))
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_tarjan, benchmark_contract, benchmark_simplify);

criterion_main!(benches);
