//! perfdiff - Statistical comparison of two benchmark result sets
//!
//! This library loads benchmark samples, decides per benchmark whether the
//! baseline and candidate differ using a two-sided Mann-Whitney U test, and
//! ranks the significant differences by their power-mean ratio. Text, JSON,
//! CSV and HTML renderers present the ranked results.

pub mod benchmark_set;
pub mod chart;
pub mod cli;
pub mod comparison;
pub mod config;
pub mod csv_output;
pub mod html_output;
pub mod json_output;
pub mod pyperf;
