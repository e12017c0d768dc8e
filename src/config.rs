//! perfdiff configuration file (`perfdiff.toml`)
//!
//! ```toml
//! [comparison]
//! significance_level = 0.01
//! power = 0.0
//!
//! [chart]
//! floor = 0.9
//! width = 60
//! ```
//!
//! Every key is optional; missing keys take their defaults. Command-line flags
//! override values read from the file.

use crate::chart::ChartConfig;
use crate::comparison::ComparisonConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Complete perfdiff configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PerfdiffConfig {
    pub comparison: ComparisonConfig,
    pub chart: ChartConfig,
}

impl PerfdiffConfig {
    /// Load configuration from a TOML file
    ///
    /// # Example
    ///
    /// ```no_run
    /// use perfdiff::config::PerfdiffConfig;
    ///
    /// # fn main() -> anyhow::Result<()> {
    /// let config = PerfdiffConfig::from_file("perfdiff.toml")?;
    /// println!("alpha = {}", config.comparison.significance_level);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::from_toml_str(&content).with_context(|| format!("Invalid config {}", path.display()))
    }

    /// Load configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Apply command-line overrides
    pub fn with_overrides(mut self, significance_level: Option<f64>, power: Option<f64>) -> Self {
        if let Some(alpha) = significance_level {
            self.comparison.significance_level = alpha;
        }
        if let Some(power) = power {
            self.comparison.power = power;
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.comparison.validate().map_err(|e| anyhow::anyhow!(e))?;
        self.chart.validate().map_err(|e| anyhow::anyhow!(e))?;
        Ok(())
    }
}
