//! Comprehensive property-based tests for pre-commit hook
//!
//! Covers the core comparison pipeline with proptest. Designed to run in a few
//! seconds as a pre-commit quality gate.
//!
//! Core features tested:
//! 1. Benchmark set construction (append on duplicate names)
//! 2. Mann-Whitney U p-values and symmetry
//! 3. Power means
//! 4. Ranking partition and ordering
//! 5. Engine idempotence

use perfdiff::benchmark_set::BenchmarkSet;
use perfdiff::comparison::{
    geometric_mean, mann_whitney_u, power_mean, ComparisonEngine, RankedResults, Verdict,
};
use proptest::prelude::*;

fn sample() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.1f64..100.0, 1..15)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_duplicate_names_append(a in sample(), b in sample()) {
        let set = BenchmarkSet::from_samples(vec![("x", a.clone()), ("x", b.clone())]);
        let mut expected = a;
        expected.extend(b);

        prop_assert_eq!(set.len(), 1);
        prop_assert_eq!(set.get("x").unwrap(), expected.as_slice());
        prop_assert_eq!(set.total_samples(), expected.len());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_p_value_in_unit_interval(x in sample(), y in sample()) {
        if let Ok(result) = mann_whitney_u(&x, &y) {
            prop_assert!(result.p_value >= 0.0 && result.p_value <= 1.0);
            prop_assert!(result.u_statistic >= 0.0);
            prop_assert!(result.u_statistic <= (x.len() * y.len()) as f64);
        }
    }

    #[test]
    fn prop_p_value_symmetric(x in sample(), y in sample()) {
        if let (Ok(xy), Ok(yx)) = (mann_whitney_u(&x, &y), mann_whitney_u(&y, &x)) {
            prop_assert!((xy.p_value - yx.p_value).abs() < 1e-9);
            prop_assert_eq!(xy.method, yx.method);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_geometric_mean_within_bounds(values in sample()) {
        let mean = geometric_mean(&values).unwrap();
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        prop_assert!(mean >= min * (1.0 - 1e-9));
        prop_assert!(mean <= max * (1.0 + 1e-9));
    }

    #[test]
    fn prop_power_means_ordered(values in sample()) {
        let harmonic = power_mean(&values, -1.0).unwrap();
        let geometric = power_mean(&values, 0.0).unwrap();
        let arithmetic = power_mean(&values, 1.0).unwrap();

        prop_assert!(harmonic <= geometric * (1.0 + 1e-9));
        prop_assert!(geometric <= arithmetic * (1.0 + 1e-9));
    }

    #[test]
    fn prop_scaled_sample_scales_geometric_mean(values in sample(), k in 0.5f64..4.0) {
        let scaled: Vec<f64> = values.iter().map(|v| v * k).collect();
        let ratio = geometric_mean(&scaled).unwrap() / geometric_mean(&values).unwrap();
        prop_assert!((ratio - k).abs() < 1e-9 * k);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_ranking_partition_complete(
        entries in prop::collection::vec(prop::option::of(0.2f64..5.0), 0..20),
    ) {
        let names: Vec<String> = (0..entries.len()).map(|i| format!("bench_{}", i)).collect();
        let verdicts: Vec<Verdict> = entries
            .iter()
            .map(|ratio| match ratio {
                Some(ratio) => Verdict::Significant { ratio: *ratio },
                None => Verdict::NotSignificant,
            })
            .collect();
        let ranked = RankedResults::from_verdicts(
            names.iter().map(String::as_str).zip(verdicts.iter()),
        );

        prop_assert_eq!(ranked.len(), entries.len());
        prop_assert_eq!(
            ranked.significant.len(),
            entries.iter().filter(|e| e.is_some()).count()
        );

        let mut seen: Vec<&str> = ranked
            .significant
            .iter()
            .map(|b| b.name.as_str())
            .chain(ranked.not_significant.iter().map(String::as_str))
            .collect();
        seen.sort();
        let mut expected: Vec<&str> = names.iter().map(String::as_str).collect();
        expected.sort();
        prop_assert_eq!(seen, expected);

        for pair in ranked.significant.windows(2) {
            prop_assert!(pair[0].ratio >= pair[1].ratio);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn prop_engine_partition_and_idempotence(
        benchmarks in prop::collection::vec((sample(), sample()), 1..6),
    ) {
        let baseline = BenchmarkSet::from_samples(
            benchmarks.iter().enumerate().map(|(i, (b, _))| (format!("b{}", i), b.clone())),
        );
        let candidate = BenchmarkSet::from_samples(
            benchmarks.iter().enumerate().map(|(i, (_, c))| (format!("b{}", i), c.clone())),
        );

        let engine = ComparisonEngine::default();
        let first = engine.compare(&baseline, &candidate);
        prop_assume!(first.is_ok());
        let first = first.unwrap();
        let second = engine.compare(&baseline, &candidate).unwrap();

        prop_assert_eq!(first.len(), baseline.len());
        for (name, verdict) in first.verdicts() {
            prop_assert_eq!(Some(verdict), second.verdict(name));
            if let Some(ratio) = verdict.ratio() {
                prop_assert!(ratio > 0.0 && ratio.is_finite());
            }
        }

        let ranked = first.rank();
        prop_assert_eq!(ranked.len(), baseline.len());
        prop_assert_eq!(ranked.significant.len(), first.significant_count());
    }
}
