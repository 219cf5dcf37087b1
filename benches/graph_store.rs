//! Criterion benchmarks for graph store operations
//!
//! Covers the hot paths of a clique-partitioning driver:
//! - Edge insertion (build from scratch)
//! - Common-neighbor enumeration
//! - Vertex deletion with mirror cleanup
//! - Text dump/reload

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use trueno_graphdb::GraphStore;

/// Generate a pseudo-random undirected edge list (LCG for reproducibility)
fn generate_edges(num_vertices: usize, edges_per_vertex: usize) -> Vec<(String, String, i32)> {
    let mut edges = Vec::new();
    let mut rng_state = 12345_u64;

    for vertex in 0..num_vertices {
        for _ in 0..edges_per_vertex {
            rng_state = rng_state.wrapping_mul(1103515245).wrapping_add(12345);
            let target = (rng_state % num_vertices as u64) as usize;

            if target != vertex {
                let weight = (rng_state % 100) as i32;
                edges.push((format!("v{vertex}"), format!("v{target}"), weight));
            }
        }
    }

    edges
}

fn build_graph(edges: &[(String, String, i32)]) -> GraphStore {
    let mut graph = GraphStore::new(false);
    for (x, y, w) in edges {
        graph.insert_edge(x, y, *w).unwrap();
    }
    graph
}

/// Benchmark: building a store edge by edge
fn bench_insert_edges(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_edges");

    for size in [100, 500, 1000].iter() {
        let edges = generate_edges(*size, 5);

        group.bench_with_input(BenchmarkId::new("undirected", size), &edges, |b, edges| {
            b.iter(|| black_box(build_graph(black_box(edges))));
        });
    }

    group.finish();
}

/// Benchmark: common-neighbor enumeration between two vertices
fn bench_common_neighbors(c: &mut Criterion) {
    let mut group = c.benchmark_group("common_neighbors");

    for size in [100, 500, 1000].iter() {
        let graph = build_graph(&generate_edges(*size, 10));

        group.bench_with_input(BenchmarkId::new("pair", size), &graph, |b, graph| {
            b.iter(|| black_box(graph.common_neighbors(black_box("v0"), black_box("v1"))));
        });
    }

    group.finish();
}

/// Benchmark: deleting a vertex (includes mirror cleanup)
fn bench_delete_vertex(c: &mut Criterion) {
    let mut group = c.benchmark_group("delete_vertex");

    for size in [100, 500, 1000].iter() {
        let graph = build_graph(&generate_edges(*size, 5));

        group.bench_with_input(BenchmarkId::new("clone_and_delete", size), &graph, |b, graph| {
            b.iter(|| {
                let mut copy = graph.clone();
                let _ = copy.delete_vertex("v0");
                black_box(copy);
            });
        });
    }

    group.finish();
}

/// Benchmark: write then read the text format
fn bench_text_roundtrip(c: &mut Criterion) {
    let mut group = c.benchmark_group("text_roundtrip");

    for size in [100, 1000].iter() {
        let graph = build_graph(&generate_edges(*size, 5));

        group.bench_with_input(BenchmarkId::new("write_read", size), &graph, |b, graph| {
            b.iter(|| {
                let mut buf = Vec::new();
                graph.write_graph(&mut buf).unwrap();
                let mut loaded = GraphStore::default();
                loaded.read_graph(buf.as_slice()).unwrap();
                black_box(loaded);
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_insert_edges,
    bench_common_neighbors,
    bench_delete_vertex,
    bench_text_roundtrip
);
criterion_main!(benches);
