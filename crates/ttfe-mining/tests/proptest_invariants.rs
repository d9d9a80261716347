//! Property-based tests for the mining invariants.
//! Random small corpora are mined under random strategy switches and checked
//! against a brute-force enumeration of every supported itemset.

use std::collections::BTreeMap;

use proptest::prelude::*;
use ttfe_core::config::{RunSettings, StrategyFlags};
use ttfe_core::ItemId;
use ttfe_mining::{CorpusIndex, Miner, Occurrence, Threshold, Transaction, Weights};

/// Up to eight transactions over items 0..6. Integer threats and
/// frequencies keep every weighted sum exact at alpha = beta = 0.5.
fn corpus_strategy() -> impl Strategy<Value = Vec<Transaction>> {
    prop::collection::vec(
        prop::collection::vec((0u32..6, 0u32..5, 0u32..5), 1..5),
        0..8,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .map(|row| {
                Transaction::new(row.into_iter().map(|(item, t, f)| {
                    Occurrence::new(ItemId(item), f64::from(t), f64::from(f))
                }))
            })
            .collect()
    })
}

fn flags_strategy() -> impl Strategy<Value = StrategyFlags> {
    prop::array::uniform6(any::<bool>()).prop_map(|b| StrategyFlags {
        seed: false,
        realized_value: b[0],
        pairwise_exact: b[1],
        pairwise_lower_bound: b[2],
        prune_search: b[3],
        queue_feedback: b[4],
        cooccurrence_pruning: b[5],
    })
}

/// Values of every itemset occurring in at least one transaction, best first.
fn brute_force(transactions: &[Transaction]) -> Vec<f64> {
    let corpus = CorpusIndex::load(transactions.to_vec(), Weights::default());
    let mut items: Vec<ItemId> = corpus.items_ordered_by_bound().to_vec();
    items.sort();
    let mut values = Vec::new();
    for mask in 1u32..(1 << items.len()) {
        let subset: Vec<ItemId> = items
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, item)| *item)
            .collect();
        let supported = corpus
            .transactions()
            .iter()
            .any(|tx| subset.iter().all(|item| tx.contains(*item)));
        if supported {
            values.push(corpus.pattern_value(&subset));
        }
    }
    values.sort_by(|a, b| b.total_cmp(a));
    values
}

fn mined_values(transactions: &[Transaction], top_k: usize, flags: StrategyFlags) -> Vec<f64> {
    let settings = RunSettings {
        top_k,
        strategies: flags,
        ..RunSettings::default()
    };
    Miner::new(settings)
        .run(transactions)
        .unwrap()
        .patterns
        .iter()
        .map(|p| p.value)
        .collect()
}

/// Mine every supported itemset under `weights`, keyed by sorted items.
fn mine_all(
    transactions: &[Transaction],
    weights: Weights,
    flags: StrategyFlags,
) -> BTreeMap<Vec<ItemId>, f64> {
    let settings = RunSettings {
        // at most 2^6 - 1 itemsets over six items
        top_k: 64,
        strategies: flags,
        ..RunSettings::default()
    }
    .with_weights(weights.alpha, weights.beta);
    Miner::new(settings)
        .run(transactions)
        .unwrap()
        .patterns
        .iter()
        .map(|p| (p.canonical_items(), p.value))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_pruned_search_matches_brute_force(
        transactions in corpus_strategy(),
        top_k in 1usize..8,
        flags in flags_strategy(),
    ) {
        let mut expected = brute_force(&transactions);
        expected.truncate(top_k);
        let mined = mined_values(&transactions, top_k, flags);
        prop_assert_eq!(mined, expected);
    }

    #[test]
    fn prop_result_patterns_are_distinct(
        transactions in corpus_strategy(),
        top_k in 1usize..8,
    ) {
        let outcome = Miner::new(RunSettings { top_k, ..RunSettings::default() })
            .run(&transactions)
            .unwrap();
        let mut keys: Vec<Vec<ItemId>> =
            outcome.patterns.iter().map(|p| p.canonical_items()).collect();
        let count = keys.len();
        keys.sort();
        keys.dedup();
        prop_assert_eq!(keys.len(), count);
        prop_assert_eq!(count, top_k.min(brute_force(&transactions).len()));
    }

    #[test]
    fn prop_runs_are_deterministic(transactions in corpus_strategy(), top_k in 1usize..6) {
        let settings = RunSettings { top_k, ..RunSettings::default() };
        let a = Miner::new(settings.clone()).run(&transactions).unwrap();
        let b = Miner::new(settings).run(&transactions).unwrap();
        prop_assert_eq!(a.patterns, b.patterns);
        prop_assert_eq!(a.final_delta, b.final_delta);
    }

    #[test]
    fn prop_threshold_never_decreases(raises in prop::collection::vec(-10.0f64..10.0, 0..30)) {
        let mut threshold = Threshold::default();
        let mut previous = threshold.value();
        for candidate in raises {
            let raised = threshold.raise(candidate);
            let current = threshold.value();
            if let (Some(p), Some(c)) = (previous, current) {
                prop_assert!(c >= p);
                if candidate <= p {
                    prop_assert!(!raised);
                    prop_assert_eq!(c, p);
                }
            }
            prop_assert!(current.is_some());
            previous = current;
        }
    }

    #[test]
    fn prop_value_decomposes_into_components(
        transactions in corpus_strategy(),
        alpha in 0.0f64..=1.0,
        mask in 1u32..64,
    ) {
        let weights = Weights::new(alpha, 1.0 - alpha);
        let corpus = CorpusIndex::load(transactions, weights);
        let items: Vec<ItemId> = (0..6).filter(|i| mask & (1 << i) != 0).map(ItemId).collect();
        let combined = corpus.pattern_value(&items);
        let threat = corpus.pattern_value_with(&items, &Weights::threat_only());
        let frequency = corpus.pattern_value_with(&items, &Weights::frequency_only());
        let recombined = alpha * threat + (1.0 - alpha) * frequency;
        prop_assert!((combined - recombined).abs() <= 1e-9 * combined.abs().max(1.0));
    }

    #[test]
    fn prop_mined_values_decompose_into_components(
        transactions in corpus_strategy(),
        alpha in 0.0f64..=1.0,
        flags in flags_strategy(),
    ) {
        let threat = mine_all(&transactions, Weights::threat_only(), flags);
        let frequency = mine_all(&transactions, Weights::frequency_only(), flags);
        let combined = mine_all(&transactions, Weights::new(alpha, 1.0 - alpha), flags);

        prop_assert_eq!(threat.len(), combined.len());
        prop_assert_eq!(frequency.len(), combined.len());
        for (items, value) in &combined {
            let (Some(t), Some(f)) = (threat.get(items), frequency.get(items)) else {
                return Err(TestCaseError::fail(format!("{items:?} missing from a component run")));
            };
            let recombined = alpha * t + (1.0 - alpha) * f;
            prop_assert!(
                (value - recombined).abs() <= 1e-9 * value.abs().max(1.0),
                "{:?}: {} vs {}", items, value, recombined
            );
        }
    }
}
