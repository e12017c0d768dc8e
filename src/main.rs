use anyhow::{Context, Result};
use clap::Parser;
use perfdiff::benchmark_set::BenchmarkSet;
use perfdiff::chart::{render_text_chart, ChartConfig};
use perfdiff::cli::{Cli, OutputFormat};
use perfdiff::comparison::{Comparison, ComparisonEngine};
use perfdiff::config::PerfdiffConfig;
use perfdiff::csv_output::CsvReport;
use perfdiff::html_output::HtmlReport;
use perfdiff::json_output::JsonReport;
use perfdiff::pyperf;
use regex::Regex;
use std::fs;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Load the config file (if any) and apply command-line overrides
fn load_config(args: &Cli) -> Result<PerfdiffConfig> {
    let config = match &args.config {
        Some(path) => PerfdiffConfig::from_file(path)?,
        None => PerfdiffConfig::default(),
    };
    let config = config.with_overrides(args.alpha, args.power);
    config.validate().context("Invalid command-line override")?;
    Ok(config)
}

/// Run the comparison; with `skip_errors`, failing benchmarks are dropped
/// with a warning instead of aborting
fn run_comparison(
    engine: &ComparisonEngine,
    baseline: &BenchmarkSet,
    candidate: &BenchmarkSet,
    skip_errors: bool,
) -> Result<Comparison> {
    if !skip_errors {
        return Ok(engine.compare(baseline, candidate)?);
    }

    let mut results = Vec::with_capacity(baseline.len());
    for name in baseline.names() {
        match engine.compare_one(name, baseline, candidate) {
            Ok(result) => results.push(result),
            Err(err) => {
                tracing::warn!(benchmark = %name, error = %err, "skipping benchmark");
                eprintln!("warning: skipping {}: {}", name, err);
            }
        }
    }

    Ok(Comparison {
        results,
        config: engine.config().clone(),
    })
}

fn render(comparison: &Comparison, format: OutputFormat, chart: &ChartConfig) -> Result<String> {
    let report = match format {
        OutputFormat::Text => render_text_chart(&comparison.rank(), chart),
        OutputFormat::Json => {
            let mut json = JsonReport::from_comparison(comparison)
                .to_json_string()
                .context("Failed to serialize JSON report")?;
            json.push('\n');
            json
        }
        OutputFormat::Csv => CsvReport::new(comparison).render(),
        OutputFormat::Html => HtmlReport::new(comparison, chart).to_html(),
    };
    Ok(report)
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(args.debug);

    let config = load_config(&args)?;

    let mut baseline = pyperf::read_benchmark_file(&args.baseline)?;
    let mut candidate = pyperf::read_benchmark_file(&args.candidate)?;

    if let Some(pattern) = &args.filter {
        let regex = Regex::new(pattern)
            .with_context(|| format!("Invalid --filter regex: {}", pattern))?;
        baseline = baseline.filtered(&regex);
        candidate = candidate.filtered(&regex);
        tracing::debug!(
            pattern = %pattern,
            baseline = baseline.len(),
            candidate = candidate.len(),
            "applied benchmark filter"
        );
    }

    let engine = ComparisonEngine::new(config.comparison.clone())?;
    let comparison = run_comparison(&engine, &baseline, &candidate, args.skip_errors)?;
    let report = render(&comparison, args.format, &config.chart)?;

    match &args.output {
        Some(path) => {
            fs::write(path, report)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
        }
        None => print!("{}", report),
    }

    Ok(())
}
