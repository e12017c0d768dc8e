// Statistical primitives for benchmark comparison
//
// - Two-sided Mann-Whitney U test (non-parametric, no normality assumption).
//   Exact permutation p-value for small tie-free samples, normal approximation
//   with tie and continuity correction otherwise.
// - Power means (geometric mean for exponent 0) for the robust ratio.
// - Descriptive summaries via trueno::Vector and aprender's DescriptiveStats.

#![allow(clippy::cast_precision_loss)] // usize -> f64 for sample sizes

use aprender::stats::DescriptiveStats;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use trueno::Vector;

/// Largest sample size (of the smaller sample) for which the exact
/// distribution of U is used when there are no ties
pub const EXACT_MAX_SAMPLE_SIZE: usize = 8;

/// Numeric failures of the statistical primitives
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatisticsError {
    #[error("empty sample")]
    EmptySample,

    #[error("non-finite value {0}")]
    NonFiniteValue(f64),

    #[error("non-positive value {0} (power mean requires strictly positive values)")]
    NonPositiveValue(f64),

    #[error("all {0} pooled values are identical, ranks carry no information")]
    ZeroVariance(usize),

    #[error("failed to summarize sample: {0}")]
    Summary(String),
}

/// How the p-value of a Mann-Whitney U test was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PValueMethod {
    /// Exact permutation distribution of U
    Exact,
    /// Normal approximation with tie and continuity correction
    Asymptotic,
}

impl fmt::Display for PValueMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PValueMethod::Exact => write!(f, "exact"),
            PValueMethod::Asymptotic => write!(f, "asymptotic"),
        }
    }
}

/// Result of a two-sided Mann-Whitney U test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MannWhitneyResult {
    /// U statistic of the first sample (number of pairs where it is larger,
    /// ties counting one half)
    pub u_statistic: f64,

    /// Two-sided p-value in [0, 1]
    pub p_value: f64,

    pub method: PValueMethod,

    /// z-score of the normal approximation (asymptotic method only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_score: Option<f64>,
}

impl MannWhitneyResult {
    pub fn is_significant(&self, significance_level: f64) -> bool {
        self.p_value < significance_level
    }
}

/// Descriptive summary of one sample collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleSummary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub median: f64,
    pub stddev: f64,
}

impl SampleSummary {
    /// Summarize a non-empty sample
    ///
    /// Median comes from aprender's quantile(0.5) (R-7 method), the standard
    /// deviation from trueno's SIMD population variance. Both run on f32
    /// deviations from the f64 mean, so tightly clustered timings far from
    /// zero keep their spread.
    pub fn from_values(values: &[f64]) -> Result<Self, StatisticsError> {
        check_finite(values)?;

        let mean = values.iter().sum::<f64>() / values.len() as f64;
        let deviations: Vec<f32> = values.iter().map(|&v| (v - mean) as f32).collect();
        let vector = Vector::from_slice(&deviations);

        let median = DescriptiveStats::new(&vector)
            .quantile(0.5)
            .map_err(|e| StatisticsError::Summary(format!("median: {}", e)))?;
        let variance = vector
            .variance()
            .map_err(|e| StatisticsError::Summary(format!("variance: {}", e)))?;

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Ok(Self {
            count: values.len(),
            min,
            max,
            median: mean + f64::from(median),
            stddev: f64::from(variance.max(0.0)).sqrt(),
        })
    }
}

fn check_finite(values: &[f64]) -> Result<(), StatisticsError> {
    if values.is_empty() {
        return Err(StatisticsError::EmptySample);
    }
    match values.iter().find(|v| !v.is_finite()) {
        Some(&bad) => Err(StatisticsError::NonFiniteValue(bad)),
        None => Ok(()),
    }
}

/// Two-sided Mann-Whitney U test of `x` against `y`
///
/// Method selection:
/// - **exact** when there are no ties and either sample has at most
///   [`EXACT_MAX_SAMPLE_SIZE`] values
/// - **asymptotic** otherwise (normal approximation, tie-corrected variance,
///   continuity correction of 0.5)
///
/// # Example
/// ```
/// use perfdiff::comparison::{mann_whitney_u, PValueMethod};
///
/// let fast = [1.0, 2.0, 3.0, 4.0, 5.0];
/// let slow = [10.0, 11.0, 12.0, 13.0, 14.0];
///
/// let result = mann_whitney_u(&fast, &slow).unwrap();
/// assert_eq!(result.method, PValueMethod::Exact);
/// assert!((result.p_value - 2.0 / 252.0).abs() < 1e-12);
/// ```
pub fn mann_whitney_u(x: &[f64], y: &[f64]) -> Result<MannWhitneyResult, StatisticsError> {
    check_finite(x)?;
    check_finite(y)?;

    let n1 = x.len();
    let n2 = y.len();

    // Pool both samples, tagging membership of the first
    let mut pooled: Vec<(f64, bool)> = x
        .iter()
        .map(|&v| (v, true))
        .chain(y.iter().map(|&v| (v, false)))
        .collect();
    pooled.sort_by(|a, b| a.0.total_cmp(&b.0));

    let ranking = rank_with_ties(&pooled);
    let u1 = ranking.first_rank_sum - (n1 * (n1 + 1)) as f64 / 2.0;
    let n1n2 = (n1 * n2) as f64;
    let u = u1.max(n1n2 - u1);

    let use_exact = !ranking.has_ties()
        && (n1 <= EXACT_MAX_SAMPLE_SIZE || n2 <= EXACT_MAX_SAMPLE_SIZE);

    if use_exact {
        match exact_survival(u, n1, n2) {
            Some(survival) => {
                return Ok(MannWhitneyResult {
                    u_statistic: u1,
                    p_value: (2.0 * survival).clamp(0.0, 1.0),
                    method: PValueMethod::Exact,
                    z_score: None,
                });
            }
            None => tracing::debug!(
                "U distribution for {}x{} overflows i128, using normal approximation",
                n1,
                n2
            ),
        }
    }

    let n = (n1 + n2) as f64;
    let variance = n1n2 / 12.0 * ((n + 1.0) - ranking.tie_term / (n * (n - 1.0)));
    if variance <= 0.0 {
        return Err(StatisticsError::ZeroVariance(n1 + n2));
    }

    let z = (u - n1n2 / 2.0 - 0.5) / variance.sqrt();
    let p_value = (2.0 * normal_sf(z)).clamp(0.0, 1.0);

    Ok(MannWhitneyResult {
        u_statistic: u1,
        p_value,
        method: PValueMethod::Asymptotic,
        z_score: Some(z),
    })
}

struct Ranking {
    /// Sum of (average) ranks of the first sample
    first_rank_sum: f64,
    /// Sum of t^3 - t over tie groups of size t
    tie_term: f64,
}

impl Ranking {
    fn has_ties(&self) -> bool {
        self.tie_term > 0.0
    }
}

/// Assign 1-based average ranks to a sorted pool
fn rank_with_ties(sorted: &[(f64, bool)]) -> Ranking {
    let mut first_rank_sum = 0.0;
    let mut tie_term = 0.0;
    let mut i = 0;

    while i < sorted.len() {
        let value = sorted[i].0;
        let mut j = i;
        while j < sorted.len() && sorted[j].0 == value {
            j += 1;
        }

        // Positions i..j hold ranks (i+1)..=j
        let avg_rank = (i + 1 + j) as f64 / 2.0;
        let in_first = sorted[i..j].iter().filter(|(_, first)| *first).count();
        first_rank_sum += avg_rank * in_first as f64;

        let t = (j - i) as f64;
        tie_term += t * t * t - t;

        i = j;
    }

    Ranking {
        first_rank_sum,
        tie_term,
    }
}

/// P(U >= u) under the null hypothesis, for tie-free samples
///
/// `None` when the permutation counts do not fit in an `i128`.
fn exact_survival(u: f64, n1: usize, n2: usize) -> Option<f64> {
    let counts = u_distribution(n1.min(n2), n1.max(n2))?;
    let total = counts
        .iter()
        .try_fold(0_i128, |acc, &c| acc.checked_add(c))?;
    let start = (u.round() as usize).min(counts.len());
    let tail: i128 = counts[start..].iter().sum();
    Some(tail as f64 / total as f64)
}

/// Frequencies of U = 0..=k*m for samples of sizes k and m
///
/// These are the coefficients of the Gaussian binomial [k+m choose k]_q,
/// built incrementally via [m+i choose i] = [m+i-1 choose i-1] (1-q^(m+i)) / (1-q^i).
/// Computed in `i128`: the intermediate products cancel large coefficients.
/// `None` on overflow.
fn u_distribution(k: usize, m: usize) -> Option<Vec<i128>> {
    let mut poly: Vec<i128> = vec![1];

    for i in 1..=k {
        let shift = m + i;
        let mut product = vec![0_i128; poly.len() + shift];
        for (j, &c) in poly.iter().enumerate() {
            product[j] = product[j].checked_add(c)?;
            product[j + shift] = product[j + shift].checked_sub(c)?;
        }

        // Exact division by (1 - q^i)
        let mut quotient = vec![0_i128; product.len() - i];
        for j in 0..quotient.len() {
            let carried = if j >= i { quotient[j - i] } else { 0 };
            quotient[j] = product[j].checked_add(carried)?;
        }
        poly = quotient;
    }

    Some(poly)
}

/// Survival function of the standard normal distribution
pub fn normal_sf(z: f64) -> f64 {
    0.5 * erfc(z / std::f64::consts::SQRT_2)
}

/// Complementary error function (Chebyshev fit, fractional error < 1.2e-7)
#[allow(clippy::unreadable_literal)] // Standard numerical constants
fn erfc(x: f64) -> f64 {
    let z = x.abs();
    let t = 1.0 / (1.0 + 0.5 * z);
    let poly = -z * z - 1.26551223
        + t * (1.00002368
            + t * (0.37409196
                + t * (0.09678418
                    + t * (-0.18628806
                        + t * (0.27886807
                            + t * (-1.13520398
                                + t * (1.48851587 + t * (-0.82215223 + t * 0.17087277))))))));
    let r = t * poly.exp();

    if x >= 0.0 {
        r
    } else {
        2.0 - r
    }
}

/// Generalized power mean with exponent `power`
///
/// `power == 0` is the geometric mean `exp(mean(ln x))`; otherwise
/// `(mean(x^p))^(1/p)`. All values must be finite and strictly positive.
pub fn power_mean(values: &[f64], power: f64) -> Result<f64, StatisticsError> {
    check_finite(values)?;
    if let Some(&bad) = values.iter().find(|&&v| v <= 0.0) {
        return Err(StatisticsError::NonPositiveValue(bad));
    }

    let n = values.len() as f64;
    let mean = if power == 0.0 {
        (values.iter().map(|v| v.ln()).sum::<f64>() / n).exp()
    } else {
        (values.iter().map(|v| v.powf(power)).sum::<f64>() / n).powf(1.0 / power)
    };

    Ok(mean)
}

/// Geometric mean (power mean with exponent 0)
pub fn geometric_mean(values: &[f64]) -> Result<f64, StatisticsError> {
    power_mean(values, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() < tol,
            "expected {} ± {}, got {}",
            expected,
            tol,
            actual
        );
    }

    #[test]
    fn test_mann_whitney_exact_fully_separated() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [10.0, 11.0, 12.0, 13.0, 14.0];

        let result = mann_whitney_u(&x, &y).unwrap();
        assert_eq!(result.method, PValueMethod::Exact);
        assert_eq!(result.u_statistic, 0.0);
        assert_close(result.p_value, 2.0 / 252.0, 1e-12);
        assert!(result.z_score.is_none());
    }

    #[test]
    fn test_mann_whitney_exact_overlapping() {
        let x = [1.0, 2.5, 3.1, 4.7];
        let y = [2.0, 3.0, 5.0, 6.0, 7.5, 8.0];

        let result = mann_whitney_u(&x, &y).unwrap();
        assert_eq!(result.method, PValueMethod::Exact);
        assert_eq!(result.u_statistic, 5.0);
        assert_close(result.p_value, 0.171_428_571_428_571_43, 1e-12);
    }

    #[test]
    fn test_mann_whitney_exact_p_capped_at_one() {
        let result = mann_whitney_u(&[1.0, 2.0], &[3.0]).unwrap();
        assert_eq!(result.method, PValueMethod::Exact);
        assert_close(result.p_value, 2.0 / 3.0, 1e-12);

        let single = mann_whitney_u(&[1.0], &[2.0]).unwrap();
        assert_eq!(single.p_value, 1.0);
    }

    #[test]
    fn test_mann_whitney_ties_use_asymptotic() {
        let x = [10.0; 5];
        let y = [5.0; 5];

        let result = mann_whitney_u(&x, &y).unwrap();
        assert_eq!(result.method, PValueMethod::Asymptotic);
        assert_eq!(result.u_statistic, 25.0);
        assert_close(result.p_value, 0.003_976_751_709_788_652, 1e-6);
    }

    #[test]
    fn test_mann_whitney_large_samples_use_asymptotic() {
        let x: Vec<f64> = (1..=10).map(f64::from).collect();
        let y: Vec<f64> = (11..=20).map(f64::from).collect();

        let result = mann_whitney_u(&x, &y).unwrap();
        assert_eq!(result.method, PValueMethod::Asymptotic);
        assert_close(result.p_value, 0.000_182_671_791_109_550_4, 1e-7);
        assert!(result.z_score.unwrap() > 3.0);
    }

    #[test]
    fn test_mann_whitney_partial_ties() {
        let x = [1.0, 2.0, 2.0, 3.0, 3.0];
        let y = [2.0, 3.0, 4.0, 4.0, 5.0];

        let result = mann_whitney_u(&x, &y).unwrap();
        assert_eq!(result.method, PValueMethod::Asymptotic);
        assert_eq!(result.u_statistic, 4.0);
        assert_close(result.p_value, 0.085_673_439_552_316_92, 1e-6);
    }

    #[test]
    fn test_mann_whitney_identical_samples_not_significant() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];

        let result = mann_whitney_u(&x, &x).unwrap();
        assert_eq!(result.p_value, 1.0);
        assert!(!result.is_significant(0.05));
    }

    #[test]
    fn test_mann_whitney_natural_variance() {
        let x = [100.0, 105.0, 98.0, 102.0, 101.0];
        let y = [102.0, 106.0, 99.0, 103.0, 100.0];

        let result = mann_whitney_u(&x, &y).unwrap();
        assert_close(result.p_value, 0.674_235_875_598_572_2, 1e-6);
    }

    #[test]
    fn test_mann_whitney_statistic_is_symmetric() {
        let x = [1.0, 4.0, 6.0, 9.0];
        let y = [2.0, 3.0, 5.0, 7.0, 8.0];

        let xy = mann_whitney_u(&x, &y).unwrap();
        let yx = mann_whitney_u(&y, &x).unwrap();
        assert_eq!(xy.u_statistic + yx.u_statistic, 20.0);
        assert_close(xy.p_value, yx.p_value, 1e-12);
    }

    #[test]
    fn test_mann_whitney_all_identical_is_error() {
        let err = mann_whitney_u(&[5.0, 5.0], &[5.0, 5.0, 5.0]).unwrap_err();
        assert_eq!(err, StatisticsError::ZeroVariance(5));
    }

    #[test]
    fn test_mann_whitney_rejects_empty_and_non_finite() {
        assert_eq!(
            mann_whitney_u(&[], &[1.0]).unwrap_err(),
            StatisticsError::EmptySample
        );
        assert!(matches!(
            mann_whitney_u(&[1.0, f64::NAN], &[1.0]).unwrap_err(),
            StatisticsError::NonFiniteValue(_)
        ));
    }

    #[test]
    fn test_u_distribution_matches_binomial_total() {
        let counts = u_distribution(5, 5).unwrap();
        assert_eq!(counts.len(), 26);
        assert_eq!(counts.iter().sum::<i128>(), 252);
        assert_eq!(counts[0], 1);
        assert_eq!(counts[25], 1);

        // Symmetric around k*m/2
        for u in 0..counts.len() {
            assert_eq!(counts[u], counts[counts.len() - 1 - u]);
        }
    }

    #[test]
    fn test_u_distribution_long_sample_non_negative() {
        let counts = u_distribution(8, 1000).unwrap();
        assert_eq!(counts.len(), 8001);
        assert_eq!(counts[0], 1);
        assert_eq!(counts[8000], 1);
        assert!(counts.iter().all(|&c| c > 0));
        assert_eq!(counts.iter().sum::<i128>(), binomial(1008, 8));
    }

    #[test]
    fn test_exact_survival_small_cases() {
        assert_close(exact_survival(19.0, 4, 6).unwrap(), 0.085_714_285_714_285_72, 1e-12);
        assert_close(exact_survival(30.0, 3, 12).unwrap(), 0.050_549_450_549_450_55, 1e-12);
        assert_close(exact_survival(40.0, 8, 9).unwrap(), 0.371_493_212_669_683_27, 1e-12);
        assert_eq!(exact_survival(0.0, 3, 3), Some(1.0));
    }

    fn binomial(n: i128, k: i128) -> i128 {
        (0..k).fold(1, |acc, i| acc * (n - i) / (i + 1))
    }

    #[test]
    fn test_mann_whitney_exact_short_against_long_sample() {
        let short: Vec<f64> = (1..=8).map(f64::from).collect();
        let long: Vec<f64> = (0..1000).map(|i| 100.0 + f64::from(i)).collect();

        let result = mann_whitney_u(&short, &long).unwrap();
        assert_eq!(result.method, PValueMethod::Exact);
        assert_eq!(result.u_statistic, 0.0);

        let expected = 2.0 / binomial(1008, 8) as f64;
        assert!(result.p_value > 0.0);
        assert!((result.p_value - expected).abs() < expected * 1e-9);
    }

    #[test]
    fn test_normal_sf() {
        assert_close(normal_sf(0.0), 0.5, 1e-7);
        assert_close(normal_sf(1.96), 0.024_997_895, 1e-7);
        assert_close(normal_sf(-1.96), 0.975_002_105, 1e-7);
        assert_eq!(normal_sf(f64::NEG_INFINITY), 1.0);
    }

    #[test]
    fn test_geometric_mean_constant() {
        assert_close(geometric_mean(&[10.0; 5]).unwrap(), 10.0, 1e-12);
    }

    #[test]
    fn test_geometric_mean_known_values() {
        assert_close(geometric_mean(&[1.0, 4.0]).unwrap(), 2.0, 1e-12);
        assert_close(geometric_mean(&[2.0, 8.0, 4.0]).unwrap(), 4.0, 1e-12);
    }

    #[test]
    fn test_geometric_mean_damps_outlier() {
        let values = [10.0, 10.0, 10.0, 10.0, 1000.0];
        let geometric = geometric_mean(&values).unwrap();
        let arithmetic = power_mean(&values, 1.0).unwrap();
        assert!(geometric < arithmetic / 4.0);
    }

    #[test]
    fn test_power_mean_exponents() {
        let values = [1.0, 2.0, 4.0];
        assert_close(power_mean(&values, 1.0).unwrap(), 7.0 / 3.0, 1e-12);
        assert_close(power_mean(&values, -1.0).unwrap(), 3.0 / 1.75, 1e-12);
        let quadratic = (21.0_f64 / 3.0).sqrt();
        assert_close(power_mean(&values, 2.0).unwrap(), quadratic, 1e-12);
    }

    #[test]
    fn test_power_mean_rejects_non_positive() {
        assert_eq!(
            geometric_mean(&[1.0, 0.0, 2.0]).unwrap_err(),
            StatisticsError::NonPositiveValue(0.0)
        );
        assert_eq!(
            power_mean(&[3.0, -1.0], 1.0).unwrap_err(),
            StatisticsError::NonPositiveValue(-1.0)
        );
        assert_eq!(
            geometric_mean(&[]).unwrap_err(),
            StatisticsError::EmptySample
        );
    }

    #[test]
    fn test_sample_summary() {
        let summary = SampleSummary::from_values(&[1.0, 3.0, 5.0, 7.0, 9.0]).unwrap();
        assert_eq!(summary.count, 5);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 9.0);
        assert_close(summary.median, 5.0, 1e-5);
        // Population stddev: sqrt(40 / 5)
        assert_close(summary.stddev, 8.0_f64.sqrt(), 1e-4);
    }

    #[test]
    fn test_sample_summary_clustered_far_from_zero() {
        let values = [1000.1, 1000.2, 1000.1, 1000.3, 1000.2, 1000.1, 1000.2];
        let summary = SampleSummary::from_values(&values).unwrap();

        assert!(summary.stddev.is_finite());
        assert_close(summary.stddev, 0.069_985_421_222_376_75, 1e-4);
        assert_close(summary.median, 1000.2, 1e-4);
    }

    #[test]
    fn test_sample_summary_single_value() {
        let summary = SampleSummary::from_values(&[3.0]).unwrap();
        assert_eq!(summary.stddev, 0.0);
        assert_close(summary.median, 3.0, 1e-6);
    }

    #[test]
    fn test_sample_summary_empty() {
        assert_eq!(
            SampleSummary::from_values(&[]).unwrap_err(),
            StatisticsError::EmptySample
        );
    }
}
