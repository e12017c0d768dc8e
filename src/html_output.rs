//! HTML report format for benchmark comparisons (`--format html`)
//!
//! Standalone page with an inline SVG bar chart of the significant ratios
//! (red reference line at 1.0) and a table of every benchmark.

use crate::chart::ChartConfig;
use crate::comparison::{BenchmarkComparison, Comparison, RankedResults};
use crate::json_output::ranked_names;

const BAR_WIDTH: f64 = 24.0;
const BAR_GAP: f64 = 8.0;
const PLOT_HEIGHT: f64 = 300.0;
const MARGIN_LEFT: f64 = 50.0;
const LABEL_SPACE: f64 = 160.0;

/// HTML output formatter
#[derive(Debug)]
pub struct HtmlReport<'a> {
    comparison: &'a Comparison,
    chart: &'a ChartConfig,
}

impl<'a> HtmlReport<'a> {
    pub fn new(comparison: &'a Comparison, chart: &'a ChartConfig) -> Self {
        Self { comparison, chart }
    }

    /// Escape HTML special characters to prevent XSS
    fn escape_html(text: &str) -> String {
        text.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&#39;")
    }

    fn generate_styles() -> &'static str {
        r#"
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            margin: 20px;
            background-color: #f5f5f5;
        }
        h1, h2 {
            color: #333;
        }
        table {
            border-collapse: collapse;
            width: 100%;
            background-color: white;
            box-shadow: 0 1px 3px rgba(0,0,0,0.1);
            margin-bottom: 20px;
        }
        th, td {
            border: 1px solid #ddd;
            padding: 8px;
            text-align: left;
        }
        th {
            background-color: #4a90d9;
            color: white;
        }
        tr:nth-child(even) {
            background-color: #f9f9f9;
        }
        .benchmark {
            font-family: monospace;
            font-weight: bold;
        }
        .number {
            font-family: monospace;
            text-align: right;
        }
        .not-significant {
            color: #888;
        }
        .chart {
            background-color: white;
            box-shadow: 0 1px 3px rgba(0,0,0,0.1);
            margin-bottom: 20px;
        }
        .footer {
            margin-top: 20px;
            font-size: 0.8em;
            color: #888;
            text-align: center;
        }
        "#
    }

    /// y coordinate of a ratio on the plot
    fn y_of(&self, ratio: f64, top: f64) -> f64 {
        let fraction = ((ratio - self.chart.floor) / (top - self.chart.floor)).clamp(0.0, 1.0);
        PLOT_HEIGHT * (1.0 - fraction) + 10.0
    }

    /// Inline SVG bar chart of significant ratios
    fn render_svg(&self, ranked: &RankedResults) -> String {
        let top = ranked.max_ratio().unwrap_or(1.0).max(1.0) * 1.05;
        let plot_width = ranked.significant.len() as f64 * (BAR_WIDTH + BAR_GAP) + BAR_GAP;
        let width = MARGIN_LEFT + plot_width + 10.0;
        let height = PLOT_HEIGHT + 10.0 + LABEL_SPACE;
        let baseline_y = self.y_of(self.chart.floor, top);

        let mut svg = format!(
            r#"    <svg class="chart" width="{:.0}" height="{:.0}" xmlns="http://www.w3.org/2000/svg">"#,
            width, height
        );
        svg.push('\n');

        for (i, bench) in ranked.significant.iter().enumerate() {
            let x = MARGIN_LEFT + BAR_GAP + i as f64 * (BAR_WIDTH + BAR_GAP);
            let y = self.y_of(bench.ratio, top);
            let name = Self::escape_html(&bench.name);

            svg.push_str(&format!(
                r#"        <rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="blue"><title>{} {:.3}</title></rect>"#,
                x,
                y,
                BAR_WIDTH,
                baseline_y - y,
                name,
                bench.ratio
            ));
            svg.push('\n');

            let label_x = x + BAR_WIDTH / 2.0;
            let label_y = baseline_y + 6.0;
            svg.push_str(&format!(
                r#"        <text x="{:.1}" y="{:.1}" font-size="11" text-anchor="end" transform="rotate(-90 {:.1} {:.1})">{}</text>"#,
                label_x, label_y, label_x, label_y, name
            ));
            svg.push('\n');
        }

        // Reference line at ratio 1.0
        let ref_y = self.y_of(1.0, top);
        svg.push_str(&format!(
            r#"        <line class="reference" x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="red" stroke-width="1.5"/>"#,
            MARGIN_LEFT,
            ref_y,
            MARGIN_LEFT + plot_width,
            ref_y
        ));
        svg.push('\n');
        svg.push_str(&format!(
            r#"        <text x="{:.1}" y="{:.1}" font-size="11" text-anchor="end">1.0</text>"#,
            MARGIN_LEFT - 4.0,
            ref_y + 4.0
        ));
        svg.push('\n');
        svg.push_str(&format!(
            r#"        <text x="{:.1}" y="{:.1}" font-size="11" text-anchor="end">{:.2}</text>"#,
            MARGIN_LEFT - 4.0,
            baseline_y,
            self.chart.floor
        ));
        svg.push('\n');

        svg.push_str("    </svg>\n");
        svg
    }

    fn format_row(result: &BenchmarkComparison) -> String {
        let (class, ratio) = match result.verdict.ratio() {
            Some(ratio) => ("", format!("{:.3}", ratio)),
            None => (" class=\"not-significant\"", "not significant".to_string()),
        };

        format!(
            r#"<tr{}><td class="benchmark">{}</td><td class="number">{}</td><td class="number">{:.4}</td><td>{}</td><td class="number">{:.6}</td><td class="number">{:.6}</td><td class="number">{}/{}</td></tr>"#,
            class,
            Self::escape_html(&result.name),
            ratio,
            result.test.p_value,
            result.test.method,
            result.baseline.median,
            result.candidate.median,
            result.baseline.count,
            result.candidate.count
        )
    }

    /// Generate complete HTML document
    pub fn to_html(&self) -> String {
        let ranked = self.comparison.rank();
        let config = &self.comparison.config;
        let mut html = String::new();

        html.push_str("<!DOCTYPE html>\n");
        html.push_str("<html lang=\"en\">\n");

        html.push_str("<head>\n");
        html.push_str("    <meta charset=\"UTF-8\">\n");
        html.push_str(
            "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
        );
        html.push_str("    <title>perfdiff Benchmark Comparison</title>\n");
        html.push_str("    <style>");
        html.push_str(Self::generate_styles());
        html.push_str("</style>\n");
        html.push_str("</head>\n");

        html.push_str("<body>\n");
        html.push_str("    <h1>Benchmark Comparison</h1>\n");
        html.push_str(&format!(
            "    <p>Ratio = {} of baseline / {} of candidate. Mann-Whitney U, alpha = {}. {} of {} benchmarks significant.</p>\n",
            config.mean_name(),
            config.mean_name(),
            config.significance_level,
            ranked.significant.len(),
            ranked.len()
        ));

        if ranked.significant.is_empty() {
            html.push_str("    <p>No statistically significant differences.</p>\n");
        } else {
            html.push_str(&self.render_svg(&ranked));
        }

        html.push_str("    <h2>All Benchmarks</h2>\n");
        html.push_str("    <table>\n");
        html.push_str("        <tr><th>Benchmark</th><th>Ratio</th><th>p-value</th><th>Method</th><th>Baseline median</th><th>Candidate median</th><th>Samples</th></tr>\n");
        for result in ranked_names(&ranked).filter_map(|name| self.comparison.get(name)) {
            html.push_str("        ");
            html.push_str(&Self::format_row(result));
            html.push('\n');
        }
        html.push_str("    </table>\n");

        html.push_str("    <div class=\"footer\">\n");
        html.push_str("        Generated by perfdiff\n");
        html.push_str("    </div>\n");

        html.push_str("</body>\n");
        html.push_str("</html>\n");

        html
    }
}
