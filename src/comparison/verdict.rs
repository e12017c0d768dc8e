// Per-benchmark verdicts: Mann-Whitney U significance gate + power-mean ratio
//
// For every benchmark of the baseline set:
//   1. look up the candidate samples (missing => error, never skipped)
//   2. two-sided Mann-Whitney U test
//   3. p < significance_level => ratio of power means (baseline / candidate)
//      otherwise => NotSignificant, no ratio at all

use crate::benchmark_set::BenchmarkSet;
use crate::comparison::config::ComparisonConfig;
use crate::comparison::error::{CompareError, Result, Side};
use crate::comparison::ranking::RankedResults;
use crate::comparison::statistics::{
    mann_whitney_u, power_mean, MannWhitneyResult, SampleSummary, StatisticsError,
};
use serde::{Deserialize, Serialize};

/// Outcome of comparing one benchmark
///
/// A ratio exists only in the `Significant` branch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
    /// The two samples are not distinguishable at the configured level
    NotSignificant,

    /// Statistically significant difference
    Significant {
        /// power_mean(baseline) / power_mean(candidate), always > 0.
        /// Above 1.0 the candidate measured smaller (e.g. faster).
        ratio: f64,
    },
}

impl Verdict {
    pub fn ratio(&self) -> Option<f64> {
        match self {
            Verdict::Significant { ratio } => Some(*ratio),
            Verdict::NotSignificant => None,
        }
    }

    pub fn is_significant(&self) -> bool {
        matches!(self, Verdict::Significant { .. })
    }
}

/// Verdict for one benchmark together with the evidence behind it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkComparison {
    pub name: String,
    pub verdict: Verdict,
    pub test: MannWhitneyResult,
    pub baseline: SampleSummary,
    pub candidate: SampleSummary,
}

/// All verdicts of one comparison run, in baseline order
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub results: Vec<BenchmarkComparison>,
    pub config: ComparisonConfig,
}

impl Comparison {
    /// Verdict for a single benchmark
    pub fn verdict(&self, name: &str) -> Option<&Verdict> {
        self.results
            .iter()
            .find(|r| r.name == name)
            .map(|r| &r.verdict)
    }

    /// (name, verdict) pairs
    pub fn verdicts(&self) -> impl Iterator<Item = (&str, &Verdict)> {
        self.results.iter().map(|r| (r.name.as_str(), &r.verdict))
    }

    pub fn get(&self, name: &str) -> Option<&BenchmarkComparison> {
        self.results.iter().find(|r| r.name == name)
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn significant_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| r.verdict.is_significant())
            .count()
    }

    /// Partition and order the verdicts for presentation
    pub fn rank(&self) -> RankedResults {
        RankedResults::from_verdicts(self.verdicts())
    }
}

/// Compares a baseline benchmark set against a candidate set
///
/// # Example
/// ```
/// use perfdiff::benchmark_set::BenchmarkSet;
/// use perfdiff::comparison::{ComparisonEngine, Verdict};
///
/// let baseline = BenchmarkSet::from_samples(vec![("bench_a", vec![10.0; 5])]);
/// let candidate = BenchmarkSet::from_samples(vec![("bench_a", vec![5.0; 5])]);
///
/// let comparison = ComparisonEngine::default().compare(&baseline, &candidate).unwrap();
/// let ratio = comparison.verdict("bench_a").and_then(Verdict::ratio).unwrap();
/// assert!((ratio - 2.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ComparisonEngine {
    config: ComparisonConfig,
}

impl ComparisonEngine {
    /// Create an engine, validating the configuration
    pub fn new(config: ComparisonConfig) -> Result<Self> {
        config.validate().map_err(CompareError::InvalidConfig)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ComparisonConfig {
        &self.config
    }

    /// Produce one verdict per benchmark name of `baseline`
    ///
    /// Benchmarks that only exist in `candidate` are ignored. The first
    /// benchmark that fails aborts the whole comparison.
    pub fn compare(&self, baseline: &BenchmarkSet, candidate: &BenchmarkSet) -> Result<Comparison> {
        let mut results = Vec::with_capacity(baseline.len());

        for collection in baseline.iter() {
            results.push(self.compare_one(&collection.name, baseline, candidate)?);
        }

        for extra in candidate.names().filter(|n| !baseline.contains(n)) {
            tracing::debug!("Ignoring candidate-only benchmark {}", extra);
        }

        let comparison = Comparison {
            results,
            config: self.config.clone(),
        };
        tracing::info!(
            "Compared {} benchmarks: {} significant (alpha={})",
            comparison.len(),
            comparison.significant_count(),
            self.config.significance_level
        );

        Ok(comparison)
    }

    /// Verdict for a single benchmark name of `baseline`
    pub fn compare_one(
        &self,
        name: &str,
        baseline: &BenchmarkSet,
        candidate: &BenchmarkSet,
    ) -> Result<BenchmarkComparison> {
        let missing = || CompareError::MissingBenchmark {
            name: name.to_string(),
        };
        let ours = baseline.get(name).ok_or_else(missing)?;
        let theirs = candidate.get(name).ok_or_else(missing)?;

        self.compare_benchmark(name, ours, theirs)
    }

    fn compare_benchmark(
        &self,
        name: &str,
        baseline: &[f64],
        candidate: &[f64],
    ) -> Result<BenchmarkComparison> {
        let baseline_summary = summarize(name, Side::Baseline, baseline)?;
        let candidate_summary = summarize(name, Side::Candidate, candidate)?;

        let test = mann_whitney_u(baseline, candidate).map_err(|e| CompareError::TestComputation {
            name: name.to_string(),
            reason: e.to_string(),
        })?;

        let verdict = if test.is_significant(self.config.significance_level) {
            let base_mean = self.mean_of(name, Side::Baseline, baseline)?;
            let cand_mean = self.mean_of(name, Side::Candidate, candidate)?;
            let ratio = base_mean / cand_mean;
            if !ratio.is_finite() || ratio <= 0.0 {
                return Err(degenerate(
                    name,
                    Side::Baseline,
                    format!("ratio {} / {} is not a positive finite number", base_mean, cand_mean),
                    baseline,
                ));
            }
            Verdict::Significant { ratio }
        } else {
            Verdict::NotSignificant
        };

        tracing::debug!(
            "{}: U={} p={:.6} ({}) -> {:?}",
            name,
            test.u_statistic,
            test.p_value,
            test.method,
            verdict
        );

        Ok(BenchmarkComparison {
            name: name.to_string(),
            verdict,
            test,
            baseline: baseline_summary,
            candidate: candidate_summary,
        })
    }

    fn mean_of(&self, name: &str, side: Side, values: &[f64]) -> Result<f64> {
        let mean = power_mean(values, self.config.power)
            .map_err(|e| degenerate(name, side, e.to_string(), values))?;

        if !mean.is_finite() || mean <= 0.0 {
            return Err(degenerate(
                name,
                side,
                format!("{} evaluated to {}", self.config.mean_name(), mean),
                values,
            ));
        }
        Ok(mean)
    }
}

fn summarize(name: &str, side: Side, values: &[f64]) -> Result<SampleSummary> {
    SampleSummary::from_values(values).map_err(|e| match e {
        StatisticsError::Summary(reason) => CompareError::TestComputation {
            name: name.to_string(),
            reason,
        },
        other => degenerate(name, side, other.to_string(), values),
    })
}

fn degenerate(name: &str, side: Side, reason: String, values: &[f64]) -> CompareError {
    CompareError::DegenerateSample {
        name: name.to_string(),
        side,
        reason,
        values: values.to_vec(),
    }
}

/// Compare two benchmark sets with the given configuration
pub fn compare_benchmark_sets(
    baseline: &BenchmarkSet,
    candidate: &BenchmarkSet,
    config: &ComparisonConfig,
) -> Result<Comparison> {
    ComparisonEngine::new(config.clone())?.compare(baseline, candidate)
}
