//! Benchmarks for the similarity scan and context merge.

#![allow(missing_docs, clippy::expect_used)]

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use opinion_contexts::core::Sentence;
use opinion_contexts::merge::merge_sentences;
use opinion_contexts::similarity::{GraphConfig, SimilarityGraph};
use std::hint::black_box;

const VOCABULARY: [&str; 16] = [
    "the", "cat", "sat", "ran", "birds", "fly", "south", "north", "rain", "sun", "work", "home",
    "city", "river", "market", "price",
];

/// Generates `n` sentences of six words drawn from a small vocabulary.
fn sentences(n: usize) -> Vec<Sentence> {
    (0..n)
        .map(|i| {
            let tokens: Vec<String> = (0..6)
                .map(|k| VOCABULARY[(i * 7 + k * k * 3) % VOCABULARY.len()].to_string())
                .collect();
            Sentence::new(i, tokens.join(" "), tokens, 0..0)
        })
        .collect()
}

fn bench_graph(c: &mut Criterion) {
    let mut group = c.benchmark_group("similarity_graph");

    for n in [128, 512, 2048] {
        let input = sentences(n);
        group.throughput(Throughput::Elements(n as u64));

        let sequential = GraphConfig::new().with_threshold(0.3).with_min_parallel(usize::MAX);
        group.bench_with_input(BenchmarkId::new("sequential", n), &input, |b, input| {
            b.iter(|| SimilarityGraph::from_sentences(black_box(input), &sequential));
        });

        let parallel = GraphConfig::new().with_threshold(0.3).with_min_parallel(1);
        group.bench_with_input(BenchmarkId::new("parallel", n), &input, |b, input| {
            b.iter(|| SimilarityGraph::from_sentences(black_box(input), &parallel));
        });
    }

    group.finish();
}

fn bench_merge(c: &mut Criterion) {
    let input = sentences(2048);
    let graph = SimilarityGraph::from_sentences(&input, &GraphConfig::new().with_threshold(0.3))
        .expect("graph");

    c.bench_function("merge_2048", |b| {
        b.iter(|| merge_sentences(black_box(&graph), black_box(&input)));
    });
}

criterion_group!(benches, bench_graph, bench_merge);
criterion_main!(benches);
