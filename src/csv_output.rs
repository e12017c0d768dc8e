//! CSV report format for benchmark comparisons (`--format csv`)
//!
//! One row per benchmark in ranked order: significant benchmarks by descending
//! ratio, then the not significant ones with an empty ratio column.

use crate::comparison::{BenchmarkComparison, Comparison};
use crate::json_output::ranked_names;

/// CSV output formatter
#[derive(Debug)]
pub struct CsvReport<'a> {
    comparison: &'a Comparison,
}

impl<'a> CsvReport<'a> {
    pub fn new(comparison: &'a Comparison) -> Self {
        Self { comparison }
    }

    fn header() -> &'static str {
        "benchmark,significant,ratio,p_value,method,baseline_median,candidate_median,baseline_count,candidate_count"
    }

    /// Escape CSV field (handle commas, quotes, newlines)
    fn escape_field(field: &str) -> String {
        if field.contains(',') || field.contains('"') || field.contains('\n') {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }

    fn format_row(result: &BenchmarkComparison) -> String {
        let ratio = result
            .verdict
            .ratio()
            .map(|r| format!("{:.6}", r))
            .unwrap_or_default();

        [
            Self::escape_field(&result.name),
            result.verdict.is_significant().to_string(),
            ratio,
            format!("{:.6}", result.test.p_value),
            result.test.method.to_string(),
            format!("{:.6}", result.baseline.median),
            format!("{:.6}", result.candidate.median),
            result.baseline.count.to_string(),
            result.candidate.count.to_string(),
        ]
        .join(",")
    }

    /// Render the complete CSV document
    pub fn render(&self) -> String {
        let ranked = self.comparison.rank();
        let mut output = String::new();

        output.push_str(Self::header());
        output.push('\n');

        for result in ranked_names(&ranked).filter_map(|name| self.comparison.get(name)) {
            output.push_str(&Self::format_row(result));
            output.push('\n');
        }

        output
    }
}
