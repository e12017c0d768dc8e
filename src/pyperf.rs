//! pyperf JSON result reader
//!
//! Reads the benchmark suite files written by pyperf / pyperformance:
//!
//! ```json
//! {
//!   "version": "1.0",
//!   "metadata": {"python_version": "3.14.0a0"},
//!   "benchmarks": [
//!     {
//!       "metadata": {"name": "nbody"},
//!       "runs": [
//!         {"metadata": {"calibrate_loops": 16}, "warmups": [[16, 0.1]]},
//!         {"warmups": [[16, 0.13]], "values": [0.130, 0.131, 0.129]}
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! Only `values` are used. Calibration runs carry no `values` and contribute
//! nothing. When a benchmark has no `metadata.name`, the suite-level
//! `metadata.name` is used (single-benchmark files store it there).

use crate::benchmark_set::{BenchmarkRecord, BenchmarkRun, BenchmarkSet};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct SuiteFile {
    #[serde(default)]
    metadata: Metadata,
    benchmarks: Vec<BenchmarkEntry>,
}

#[derive(Debug, Default, Deserialize)]
struct Metadata {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BenchmarkEntry {
    #[serde(default)]
    metadata: Metadata,
    #[serde(default)]
    runs: Vec<RunEntry>,
}

#[derive(Debug, Deserialize)]
struct RunEntry {
    #[serde(default)]
    values: Vec<f64>,
}

/// Parse a pyperf suite into reader records, one per benchmark entry
pub fn parse_benchmark_records(json: &str) -> Result<Vec<BenchmarkRecord>> {
    let suite: SuiteFile =
        serde_json::from_str(json).context("Failed to parse pyperf benchmark JSON")?;

    let suite_name = suite.metadata.name;
    suite
        .benchmarks
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            let name = entry
                .metadata
                .name
                .or_else(|| suite_name.clone())
                .with_context(|| format!("Benchmark #{} has no metadata.name", index))?;
            let runs = entry
                .runs
                .into_iter()
                .map(|run| BenchmarkRun::new(run.values))
                .collect();
            Ok(BenchmarkRecord::new(name, runs))
        })
        .collect()
}

/// Parse a pyperf suite into a benchmark set
pub fn parse_benchmark_suite(json: &str) -> Result<BenchmarkSet> {
    Ok(BenchmarkSet::from_records(parse_benchmark_records(json)?))
}

/// Read a pyperf suite file into a benchmark set
///
/// # Example
///
/// ```no_run
/// use perfdiff::pyperf::read_benchmark_file;
///
/// # fn main() -> anyhow::Result<()> {
/// let baseline = read_benchmark_file("bm-optimizer_off.json")?;
/// println!("Loaded {} benchmarks", baseline.len());
/// # Ok(())
/// # }
/// ```
pub fn read_benchmark_file<P: AsRef<Path>>(path: P) -> Result<BenchmarkSet> {
    let path = path.as_ref();
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;

    let set = parse_benchmark_suite(&content)
        .with_context(|| format!("Invalid benchmark file {}", path.display()))?;
    tracing::debug!(
        "Loaded {} benchmarks ({} values) from {}",
        set.len(),
        set.total_samples(),
        path.display()
    );

    Ok(set)
}
