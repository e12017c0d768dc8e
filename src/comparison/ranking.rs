// Ranking of verdicts for presentation
//
// Significant benchmarks are ordered by ratio, largest first (baseline much
// larger than candidate at the top). The sort is stable, so equal ratios keep
// the order in which the verdicts were produced (baseline insertion order).

use crate::comparison::verdict::Verdict;
use serde::{Deserialize, Serialize};

/// A significant benchmark and its ratio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedBenchmark {
    pub name: String,
    pub ratio: f64,
}

/// Verdicts partitioned into significant (ranked) and not significant
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankedResults {
    /// Sorted by descending ratio
    pub significant: Vec<RankedBenchmark>,
    /// Names without a significant difference, in input order
    pub not_significant: Vec<String>,
}

impl RankedResults {
    /// Partition and sort (name, verdict) pairs
    ///
    /// # Example
    /// ```
    /// use perfdiff::comparison::{RankedResults, Verdict};
    ///
    /// let ranked = RankedResults::from_verdicts(vec![
    ///     ("a", &Verdict::Significant { ratio: 0.9 }),
    ///     ("b", &Verdict::NotSignificant),
    ///     ("c", &Verdict::Significant { ratio: 1.4 }),
    /// ]);
    /// assert_eq!(ranked.significant[0].name, "c");
    /// assert_eq!(ranked.not_significant, vec!["b".to_string()]);
    /// ```
    pub fn from_verdicts<'a, I>(verdicts: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a Verdict)>,
    {
        let mut ranked = Self::default();

        for (name, verdict) in verdicts {
            match verdict {
                Verdict::Significant { ratio } => ranked.significant.push(RankedBenchmark {
                    name: name.to_string(),
                    ratio: *ratio,
                }),
                Verdict::NotSignificant => ranked.not_significant.push(name.to_string()),
            }
        }

        // Stable: ties keep input order
        ranked
            .significant
            .sort_by(|a, b| b.ratio.total_cmp(&a.ratio));

        ranked
    }

    /// Total number of benchmarks across both partitions
    pub fn len(&self) -> usize {
        self.significant.len() + self.not_significant.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Significant benchmarks where the baseline was larger (ratio > 1)
    pub fn improvements(&self) -> impl Iterator<Item = &RankedBenchmark> {
        self.significant.iter().filter(|b| b.ratio > 1.0)
    }

    /// Significant benchmarks where the candidate was larger (ratio < 1)
    pub fn regressions(&self) -> impl Iterator<Item = &RankedBenchmark> {
        self.significant.iter().filter(|b| b.ratio < 1.0)
    }

    /// Largest ratio, if any benchmark is significant
    pub fn max_ratio(&self) -> Option<f64> {
        self.significant.first().map(|b| b.ratio)
    }

    /// Smallest ratio, if any benchmark is significant
    pub fn min_ratio(&self) -> Option<f64> {
        self.significant.last().map(|b| b.ratio)
    }
}
