//! Text bar chart of ranked benchmark ratios
//!
//! One horizontal bar per significant benchmark, largest ratio first. The axis
//! starts at `floor` (ratios below it are drawn as empty bars) and a `│` marker
//! shows the reference ratio 1.0 (no change).

use crate::comparison::RankedResults;
use serde::{Deserialize, Serialize};

/// Chart layout settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Lowest ratio on the axis
    pub floor: f64,
    /// Bar area width in columns
    pub width: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            floor: 0.95,
            width: 50,
        }
    }
}

impl ChartConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !(self.floor >= 0.0 && self.floor < 1.0) {
            return Err(format!("chart floor must be in [0, 1), got {}", self.floor));
        }
        if self.width < 10 {
            return Err(format!("chart width must be >= 10, got {}", self.width));
        }
        Ok(())
    }

    /// Column of a ratio on an axis spanning floor..=top
    fn column(&self, ratio: f64, top: f64) -> usize {
        let fraction = (ratio - self.floor) / (top - self.floor);
        let col = (fraction * self.width as f64).round();
        col.clamp(0.0, self.width as f64) as usize
    }
}

const BAR: char = '█';
const REFERENCE: char = '│';

/// Render ranked results as a text bar chart
///
/// # Example
/// ```
/// use perfdiff::chart::{render_text_chart, ChartConfig};
/// use perfdiff::comparison::{RankedResults, Verdict};
///
/// let ranked = RankedResults::from_verdicts(vec![
///     ("nbody", &Verdict::Significant { ratio: 1.3 }),
///     ("richards", &Verdict::NotSignificant),
/// ]);
/// let chart = render_text_chart(&ranked, &ChartConfig::default());
/// assert!(chart.contains("nbody"));
/// assert!(chart.contains("Not significant (1): richards"));
/// ```
pub fn render_text_chart(ranked: &RankedResults, config: &ChartConfig) -> String {
    let mut out = String::new();

    if ranked.significant.is_empty() {
        out.push_str("No statistically significant differences.\n");
    } else {
        out.push_str("Significant differences (ratio = baseline / candidate, >1.0: candidate smaller)\n\n");

        let top = ranked.max_ratio().unwrap_or(1.0).max(1.0);
        let reference_col = config.column(1.0, top);
        let name_width = ranked
            .significant
            .iter()
            .map(|b| b.name.chars().count())
            .max()
            .unwrap_or(0);

        for bench in &ranked.significant {
            let len = config.column(bench.ratio, top);
            let bar: String = (0..=config.width)
                .map(|col| {
                    if col == reference_col {
                        REFERENCE
                    } else if col < len {
                        BAR
                    } else {
                        ' '
                    }
                })
                .collect();

            out.push_str(&format!(
                "{:<width$}  {:>7.3}x  {}\n",
                bench.name,
                bench.ratio,
                bar.trim_end(),
                width = name_width
            ));
        }

        // Axis label under the reference marker
        let indent = name_width + 2 + 8 + 2 + reference_col;
        out.push_str(&format!("{:>width$}\n", "1.0", width = indent + 2));

        let improved = ranked.improvements().count();
        let regressed = ranked.regressions().count();
        out.push_str(&format!(
            "\n{} larger in baseline, {} larger in candidate\n",
            improved, regressed
        ));
    }

    if !ranked.not_significant.is_empty() {
        out.push_str(&format!(
            "\nNot significant ({}): {}\n",
            ranked.not_significant.len(),
            ranked.not_significant.join(", ")
        ));
    }

    out
}
