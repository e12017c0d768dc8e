// Errors raised by the comparison engine
//
// The engine never skips a benchmark on its own: the first failure aborts the
// whole comparison and carries the offending benchmark name back to the caller.

use std::fmt;
use thiserror::Error;

/// Which side of the comparison a sample collection belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Baseline,
    Candidate,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Baseline => write!(f, "baseline"),
            Side::Candidate => write!(f, "candidate"),
        }
    }
}

/// Errors that can occur while comparing two benchmark sets
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompareError {
    #[error("benchmark '{name}' is present in the baseline but missing from the candidate")]
    MissingBenchmark { name: String },

    #[error("benchmark '{name}': degenerate {side} sample ({reason})")]
    DegenerateSample {
        name: String,
        side: Side,
        reason: String,
        values: Vec<f64>,
    },

    #[error("benchmark '{name}': Mann-Whitney U test could not be computed: {reason}")]
    TestComputation { name: String, reason: String },

    #[error("invalid comparison config: {0}")]
    InvalidConfig(String),
}

impl CompareError {
    /// Name of the benchmark that caused the failure, if any
    pub fn benchmark(&self) -> Option<&str> {
        match self {
            CompareError::MissingBenchmark { name }
            | CompareError::DegenerateSample { name, .. }
            | CompareError::TestComputation { name, .. } => Some(name),
            CompareError::InvalidConfig(_) => None,
        }
    }
}

/// Result type for comparison operations
pub type Result<T> = std::result::Result<T, CompareError>;
