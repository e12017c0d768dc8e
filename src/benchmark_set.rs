//! Benchmark sets: benchmark name → flattened sample values
//!
//! A `BenchmarkSet` is built once from the records of one result source and is
//! immutable afterwards. Every run of a record is concatenated into a single
//! sample collection. When the same benchmark name appears in several records,
//! the later values are **appended** to the existing collection; nothing is
//! ever overwritten, so no measurement is silently dropped.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single run of a benchmark (one process, one batch of measured values)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRun {
    pub values: Vec<f64>,
}

impl BenchmarkRun {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }
}

/// A benchmark record as produced by a result reader
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRecord {
    /// Benchmark name (e.g., "nbody", "json_dumps")
    pub name: String,
    /// Runs in the order the reader produced them
    pub runs: Vec<BenchmarkRun>,
}

impl BenchmarkRecord {
    pub fn new(name: impl Into<String>, runs: Vec<BenchmarkRun>) -> Self {
        Self {
            name: name.into(),
            runs,
        }
    }
}

/// All observed values of one benchmark under one configuration
#[derive(Debug, Clone, PartialEq)]
pub struct SampleCollection {
    pub name: String,
    pub values: Vec<f64>,
}

/// Mapping from benchmark name to its sample collection
///
/// Iteration follows the order in which names were first seen. The comparison
/// engine relies on this to produce deterministic output.
///
/// # Example
/// ```
/// use perfdiff::benchmark_set::{BenchmarkRecord, BenchmarkRun, BenchmarkSet};
///
/// let set = BenchmarkSet::from_records(vec![
///     BenchmarkRecord::new("nbody", vec![BenchmarkRun::new(vec![1.0, 2.0])]),
///     BenchmarkRecord::new("nbody", vec![BenchmarkRun::new(vec![3.0])]),
/// ]);
/// assert_eq!(set.get("nbody"), Some(&[1.0, 2.0, 3.0][..]));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BenchmarkSet {
    collections: Vec<SampleCollection>,
    index: HashMap<String, usize>,
}

impl BenchmarkSet {
    /// Build a set from reader records, concatenating runs and appending on
    /// repeated names
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = BenchmarkRecord>,
    {
        let mut set = Self::default();
        for record in records {
            let values = record.runs.into_iter().flat_map(|run| run.values);
            set.append(record.name, values);
        }
        set
    }

    /// Build a set directly from (name, values) pairs
    ///
    /// Same merge policy as [`BenchmarkSet::from_records`]: repeated names append.
    pub fn from_samples<I, S>(samples: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<f64>)>,
        S: Into<String>,
    {
        let mut set = Self::default();
        for (name, values) in samples {
            set.append(name.into(), values);
        }
        set
    }

    fn append(&mut self, name: String, values: impl IntoIterator<Item = f64>) {
        match self.index.get(&name) {
            Some(&slot) => self.collections[slot].values.extend(values),
            None => {
                self.index.insert(name.clone(), self.collections.len());
                self.collections.push(SampleCollection {
                    name,
                    values: values.into_iter().collect(),
                });
            }
        }
    }

    /// Sample values for a benchmark, if present
    pub fn get(&self, name: &str) -> Option<&[f64]> {
        self.index
            .get(name)
            .map(|&slot| self.collections[slot].values.as_slice())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Benchmark names in first-seen order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.collections.iter().map(|c| c.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &SampleCollection> {
        self.collections.iter()
    }

    pub fn len(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    /// Total number of values across all benchmarks
    pub fn total_samples(&self) -> usize {
        self.collections.iter().map(|c| c.values.len()).sum()
    }

    /// Copy of this set without one benchmark
    pub fn without(&self, name: &str) -> Self {
        self.select(|c| c.name != name)
    }

    /// Copy of this set keeping only benchmarks whose name matches `pattern`
    pub fn filtered(&self, pattern: &Regex) -> Self {
        self.select(|c| pattern.is_match(&c.name))
    }

    fn select(&self, keep: impl Fn(&SampleCollection) -> bool) -> Self {
        let mut set = Self::default();
        for collection in self.collections.iter().filter(|c| keep(c)) {
            set.append(collection.name.clone(), collection.values.iter().copied());
        }
        set
    }
}

impl FromIterator<BenchmarkRecord> for BenchmarkSet {
    fn from_iter<I: IntoIterator<Item = BenchmarkRecord>>(iter: I) -> Self {
        Self::from_records(iter)
    }
}
