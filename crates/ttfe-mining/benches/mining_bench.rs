use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use ttfe_core::config::{RunSettings, StrategyFlags};
use ttfe_core::ItemId;
use ttfe_mining::{CorpusIndex, Miner, Occurrence, Transaction, Weights};

/// Deterministic synthetic corpus: `n` transactions of 3..10 items drawn
/// from 60 items, skewed towards low ids.
fn synthetic_corpus(n: usize) -> Vec<Transaction> {
    let mut state: u64 = 0x9E37_79B9_7F4A_7C15;
    let mut next = move || {
        state = state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        (state >> 33) as u32
    };
    (0..n)
        .map(|_| {
            let len = 3 + next() % 8;
            Transaction::new((0..len).map(|_| {
                let item = (next() % 60).min(next() % 60);
                let threat = f64::from(next() % 10 + 1);
                let frequency = f64::from(next() % 5 + 1);
                Occurrence::new(ItemId(item), threat, frequency)
            }))
        })
        .collect()
}

fn bench_corpus_index(c: &mut Criterion) {
    let corpus = synthetic_corpus(5_000);
    c.bench_function("corpus_index_5k", |b| {
        b.iter(|| CorpusIndex::load(black_box(corpus.clone()), Weights::default()));
    });
}

fn bench_mining_top_k(c: &mut Criterion) {
    let corpus = synthetic_corpus(2_000);
    let mut group = c.benchmark_group("mine_2k");
    group.sample_size(20);
    for top_k in [1usize, 10, 100] {
        let settings = RunSettings {
            top_k,
            ..RunSettings::default()
        };
        group.bench_with_input(BenchmarkId::new("default", top_k), &settings, |b, s| {
            b.iter(|| Miner::new(s.clone()).run(black_box(&corpus)).unwrap());
        });
        let mut all = settings.clone();
        all.strategies = StrategyFlags {
            pairwise_lower_bound: true,
            cooccurrence_pruning: true,
            ..StrategyFlags::default()
        };
        group.bench_with_input(BenchmarkId::new("all_strategies", top_k), &all, |b, s| {
            b.iter(|| Miner::new(s.clone()).run(black_box(&corpus)).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_corpus_index, bench_mining_top_k);
criterion_main!(benches);
