//! CLI argument parsing for perfdiff

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for the comparison report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable bar chart (default)
    Text,
    /// JSON format for machine parsing
    Json,
    /// CSV format for spreadsheet analysis
    Csv,
    /// Standalone HTML page with an SVG chart
    Html,
}

#[derive(Parser, Debug)]
#[command(name = "perfdiff")]
#[command(version)]
#[command(
    about = "Compare two benchmark result files with the Mann-Whitney U test",
    long_about = None
)]
pub struct Cli {
    /// Baseline pyperf JSON result file
    #[arg(value_name = "BASELINE")]
    pub baseline: PathBuf,

    /// Candidate pyperf JSON result file
    #[arg(value_name = "CANDIDATE")]
    pub candidate: PathBuf,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Write the report to a file instead of stdout
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Significance level for the two-sided test (overrides config file)
    #[arg(long = "alpha", value_name = "P")]
    pub alpha: Option<f64>,

    /// Power-mean exponent for the ratio, 0 = geometric (overrides config file)
    #[arg(long = "power", value_name = "P", allow_hyphen_values = true)]
    pub power: Option<f64>,

    /// TOML configuration file
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Only compare benchmarks whose name matches this regex
    #[arg(long = "filter", value_name = "REGEX")]
    pub filter: Option<String>,

    /// Drop benchmarks that fail to compare (with a warning) instead of aborting
    #[arg(long = "skip-errors")]
    pub skip_errors: bool,

    /// Enable debug tracing output to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}
