// Statistical comparison of two benchmark sets
//
// For each benchmark of the baseline, a two-sided Mann-Whitney U test decides
// whether baseline and candidate differ. Only significant benchmarks get a
// ratio: power_mean(baseline) / power_mean(candidate), the geometric mean by
// default. Results are then partitioned and ranked by ratio.
//
// Mann, H. B., & Whitney, D. R. (1947). On a test of whether one of two random
// variables is stochastically larger than the other. Ann. Math. Statist. 18(1).

mod config;
mod error;
mod ranking;
mod statistics;
mod verdict;

pub use config::ComparisonConfig;
pub use error::{CompareError, Side};
pub use ranking::{RankedBenchmark, RankedResults};
pub use statistics::{
    geometric_mean, mann_whitney_u, normal_sf, power_mean, MannWhitneyResult, PValueMethod,
    SampleSummary, StatisticsError, EXACT_MAX_SAMPLE_SIZE,
};
pub use verdict::{
    compare_benchmark_sets, BenchmarkComparison, Comparison, ComparisonEngine, Verdict,
};
