//! JSON report format for benchmark comparisons (`--format json`)

use crate::comparison::{
    BenchmarkComparison, Comparison, ComparisonConfig, PValueMethod, RankedResults, SampleSummary,
};
use serde::{Deserialize, Serialize};

/// One benchmark in the JSON report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonBenchmark {
    /// Benchmark name (e.g., "nbody")
    pub name: String,
    /// Whether p < significance level
    pub significant: bool,
    /// Baseline / candidate power-mean ratio (significant benchmarks only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ratio: Option<f64>,
    /// Two-sided Mann-Whitney U p-value
    pub p_value: f64,
    /// U statistic of the baseline sample
    pub u_statistic: f64,
    /// How the p-value was computed
    pub method: PValueMethod,
    pub baseline: SampleSummary,
    pub candidate: SampleSummary,
}

impl From<&BenchmarkComparison> for JsonBenchmark {
    fn from(result: &BenchmarkComparison) -> Self {
        Self {
            name: result.name.clone(),
            significant: result.verdict.is_significant(),
            ratio: result.verdict.ratio(),
            p_value: result.test.p_value,
            u_statistic: result.test.u_statistic,
            method: result.test.method,
            baseline: result.baseline.clone(),
            candidate: result.candidate.clone(),
        }
    }
}

/// Counts for the whole comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonSummary {
    pub total: usize,
    pub significant: usize,
    pub not_significant: usize,
    /// Significant with ratio > 1 (baseline larger)
    pub improvements: usize,
    /// Significant with ratio < 1 (candidate larger)
    pub regressions: usize,
}

/// Root JSON output structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonReport {
    /// Format version identifier
    pub version: String,
    /// Format name
    pub format: String,
    /// Statistical policy used
    pub config: ComparisonConfig,
    /// Benchmarks in ranked order: significant by descending ratio, then the rest
    pub benchmarks: Vec<JsonBenchmark>,
    pub summary: JsonSummary,
}

impl JsonReport {
    /// Build the report from a comparison
    pub fn from_comparison(comparison: &Comparison) -> Self {
        let ranked = comparison.rank();
        let benchmarks = ranked_names(&ranked)
            .filter_map(|name| comparison.get(name))
            .map(JsonBenchmark::from)
            .collect();

        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            format: "perfdiff-json-v1".to_string(),
            config: comparison.config.clone(),
            benchmarks,
            summary: JsonSummary {
                total: ranked.len(),
                significant: ranked.significant.len(),
                not_significant: ranked.not_significant.len(),
                improvements: ranked.improvements().count(),
                regressions: ranked.regressions().count(),
            },
        }
    }

    /// Serialize as pretty-printed JSON
    pub fn to_json_string(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Benchmark names in presentation order
pub(crate) fn ranked_names(ranked: &RankedResults) -> impl Iterator<Item = &str> {
    ranked
        .significant
        .iter()
        .map(|b| b.name.as_str())
        .chain(ranked.not_significant.iter().map(String::as_str))
}
