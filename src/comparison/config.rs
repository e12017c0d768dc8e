// Configuration for the benchmark comparison engine
//
// Statistical policy: significance level of the Mann-Whitney U test and the
// power-mean exponent of the ratio. Defaults: alpha = 0.05, geometric mean.

use serde::{Deserialize, Serialize};

/// Configuration for comparing two benchmark sets
///
/// # Example
/// ```
/// use perfdiff::comparison::ComparisonConfig;
///
/// let config = ComparisonConfig::default();
/// assert_eq!(config.significance_level, 0.05); // 95% confidence
/// assert_eq!(config.power, 0.0); // geometric mean
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonConfig {
    /// Significance level (alpha) for the two-sided Mann-Whitney U test
    ///
    /// A benchmark is significant when `p < significance_level`.
    /// - 0.05 (default): 95% confidence level
    /// - 0.01: stricter, fewer false positives
    /// - 0.10: looser, more false positives
    pub significance_level: f64,

    /// Exponent of the power mean used for the baseline/candidate ratio
    ///
    /// - 0.0 (default): geometric mean, `exp(mean(ln x))`
    /// - 1.0: arithmetic mean
    /// - -1.0: harmonic mean
    pub power: f64,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            significance_level: 0.05, // 95% confidence
            power: 0.0,               // Geometric mean
        }
    }
}

impl ComparisonConfig {
    /// Strict configuration: 99% confidence
    pub fn strict() -> Self {
        Self {
            significance_level: 0.01,
            ..Self::default()
        }
    }

    /// Permissive configuration: 90% confidence
    pub fn permissive() -> Self {
        Self {
            significance_level: 0.10,
            ..Self::default()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(self.significance_level > 0.0 && self.significance_level < 1.0) {
            return Err(format!(
                "significance_level must be in (0, 1), got {}",
                self.significance_level
            ));
        }

        if !self.power.is_finite() {
            return Err(format!("power must be finite, got {}", self.power));
        }

        Ok(())
    }

    /// Human-readable name of the configured mean
    pub fn mean_name(&self) -> String {
        if self.power == 0.0 {
            "geometric mean".to_string()
        } else if self.power == 1.0 {
            "arithmetic mean".to_string()
        } else if self.power == -1.0 {
            "harmonic mean".to_string()
        } else {
            format!("power mean (p={})", self.power)
        }
    }
}
