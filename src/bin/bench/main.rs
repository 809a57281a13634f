// House Engine Benchmark Runner — Monte Carlo over spare-token counts and stop thresholds
// Seedable ChaCha8 runs, per-scenario mean ± 95% CI, optional per-iteration JSONL
//
// Usage:
//   cargo run --release --bin bench                        # All built-in scenarios (100 runs each)
//   cargo run --release --bin bench -- --runs 20           # Quick mode
//   cargo run --release --bin bench -- SPARE               # Filter by name/label/category
//   cargo run --release --bin bench -- --config sweep.json # Scenarios from a JSON file
//   cargo run --release --bin bench -- --time-series       # Enable JSONL output
//   cargo run --release --bin bench -- --seed 42           # Custom base seed

mod config;
mod monte_carlo;
mod report;
mod scenarios;
mod time_series;

use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use config::BenchConfig;
use house_engine::{ProductionOdds, PRNG_NAME};
use report::BenchReport;

const RESULTS_DIR: &str = "benchmark-results";

// ─── CLI Parsing ────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(author, version, about = "Monte Carlo runner for the house engine", long_about = None)]
struct Cli {
    /// Samples per scenario (overrides the config file)
    #[arg(long)]
    runs: Option<usize>,

    /// Base seed; sample i uses base + i (overrides the config file)
    #[arg(long, allow_negative_numbers = true)]
    seed: Option<i64>,

    /// JSON file with runs, base_seed and scenarios
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write per-iteration JSONL trajectories
    #[arg(long)]
    time_series: bool,

    /// Only run scenarios whose name, label or category contains this
    filter: Option<String>,
}

// ─── Main ───────────────────────────────────────────────────────────────────

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => match BenchConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => BenchConfig::default(),
    };
    if let Some(runs) = cli.runs {
        config.runs = runs;
    }
    if let Some(seed) = cli.seed {
        config.base_seed = seed;
    }

    let to_run = config.matching(cli.filter.as_deref());
    if to_run.is_empty() {
        log::error!("no scenarios match filter: {:?}", cli.filter);
        return ExitCode::FAILURE;
    }

    let ts_dir = cli.time_series.then(|| Path::new(RESULTS_DIR).join("time-series"));
    let odds = ProductionOdds::d20();

    println!("\n  House Engine Benchmark Runner v{}", env!("CARGO_PKG_VERSION"));
    println!("  PRNG: {} | Runs/scenario: {} | Base seed: {}", PRNG_NAME, config.runs, config.base_seed);
    println!(
        "  Production: E[A]={} E[B]={} net untapped/cycle={}",
        odds.expected_a, odds.expected_b, odds.expected_net_untapped
    );
    println!("  Running {} scenario(s)...\n", to_run.len());
    println!("  {:<36} {:>14} {:>10} {:>8} {:>7} {:>7} {:>7}",
        "Scenario", "Iterations", "Counters", "Robots", "Stop%", "Stuck%", "Cap%");
    println!("  {}", "-".repeat(96));

    let suite_start = Instant::now();
    let mut reports = Vec::with_capacity(to_run.len());

    for scenario in &to_run {
        let report = monte_carlo::run_monte_carlo(
            scenario,
            config.runs,
            config.base_seed,
            &odds,
            ts_dir.as_deref(),
        );

        println!("  {:<36} {:>7.1}±{:<6.1} {:>10.1} {:>8.1} {:>6.1}% {:>6.1}% {:>6.1}%",
            report.label,
            report.iterations.mean, report.iterations.half_width(),
            report.counters.mean,
            report.resource_a_total.mean,
            report.stop_rate * 100.0,
            report.stuck_rate * 100.0,
            report.exhausted_rate * 100.0,
        );

        reports.push(report);
    }

    println!("  {}", "-".repeat(96));
    println!("  Scenarios: {}  Suite time: {:.1}s\n", reports.len(), suite_start.elapsed().as_secs_f64());

    // ─── Write JSON Report ──────────────────────────────────────────────

    let timestamp = chrono::Utc::now().timestamp_millis().to_string();
    let report = BenchReport {
        timestamp: timestamp.clone(),
        version: env!("CARGO_PKG_VERSION"),
        prng: PRNG_NAME,
        n_runs_per_scenario: config.runs,
        base_seed: config.base_seed,
        production_odds: odds,
        scenarios: reports,
    };

    let path = Path::new(RESULTS_DIR).join(format!("bench-{}.json", timestamp));
    match write_report(&report, &path) {
        Ok(()) => {
            println!("  Results saved to: {}\n", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("failed to write {}: {}", path.display(), e);
            ExitCode::FAILURE
        }
    }
}

fn write_report(report: &BenchReport, path: &Path) -> std::io::Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(report)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    std::fs::write(path, json)
}
