use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use songgraph::algo::{sample_walks, WalkConfig};
use songgraph::{
    find_similar, EmbeddingStore, MusicGraph, MusicRecord, NodeKey, SimilarityEngine, SongQuery,
};
use std::sync::Arc;

/// Synthetic catalog: `size` songs over size/10 artists and 20 genres
fn catalog(size: usize) -> Vec<MusicRecord> {
    let artists = (size / 10).max(1);
    (0..size)
        .map(|i| {
            let record = MusicRecord::new(
                format!("Song{}", i),
                format!("Artist{}", i % artists),
                format!("Genre{}", i % 20),
            );
            if i % 3 == 0 {
                record.with_related(format!("Artist{}", (i + 1) % artists), "collaboratesWith")
            } else {
                record
            }
        })
        .collect()
}

/// Deterministic pseudo-random vectors for every node of `graph`
fn store(graph: &MusicGraph, dimensions: usize) -> EmbeddingStore {
    let entries = graph.nodes().enumerate().map(|(i, key)| {
        let vector = (0..dimensions)
            .map(|d| (((i * 31 + d * 17) % 97) as f32 / 97.0) - 0.5)
            .collect();
        (key.clone(), vector)
    });
    EmbeddingStore::new(dimensions, entries).unwrap()
}

/// Benchmark walk corpus generation
fn bench_walk_sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("walk_sampling");
    group.sample_size(10);

    for size in [100, 1000].iter() {
        let graph = MusicGraph::from_records(&catalog(*size));
        let config = WalkConfig {
            walks_per_node: 20,
            walk_length: 30,
            return_bias: 0.5,
            exploration_bias: 2.0,
            seed: 42,
        };

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let corpus = sample_walks(&graph, &config, 4).unwrap();
                criterion::black_box(corpus.token_count());
            });
        });
    }
    group.finish();
}

/// Benchmark one query: eager scan vs cached composites
fn bench_query_scoring(c: &mut Criterion) {
    let mut group = c.benchmark_group("query_scoring");

    for size in [1000, 10_000].iter() {
        let records = catalog(*size);
        let graph = MusicGraph::from_records(&records);
        let store = Arc::new(store(&graph, 64));
        let engine = SimilarityEngine::new(Arc::new(records.clone()), Arc::clone(&store));
        let query = SongQuery::new("Song0", "Artist0", "Genre0");

        group.bench_with_input(BenchmarkId::new("scan", size), size, |b, _| {
            b.iter(|| criterion::black_box(find_similar(&query, &records, &store, 5)));
        });

        group.bench_with_input(BenchmarkId::new("engine", size), size, |b, _| {
            b.iter(|| criterion::black_box(engine.find_similar(&query, 5)));
        });
    }
    group.finish();
}

/// Benchmark embedding lookup with hits and misses
fn bench_lookup(c: &mut Criterion) {
    let graph = MusicGraph::from_records(&catalog(1000));
    let store = store(&graph, 64);
    let hit = NodeKey::artist("Artist7");
    let miss = NodeKey::artist("Nobody");

    c.bench_function("lookup_hit", |b| b.iter(|| criterion::black_box(store.lookup(&hit))));
    c.bench_function("lookup_miss", |b| b.iter(|| criterion::black_box(store.lookup(&miss))));
}

criterion_group!(benches, bench_walk_sampling, bench_query_scoring, bench_lookup);
criterion_main!(benches);
