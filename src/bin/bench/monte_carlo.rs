// Monte Carlo Infrastructure — N seeded runs per scenario with statistical aggregation
// Samples use seeds base_seed..base_seed+N and run in parallel; each owns its own engine state

use rayon::prelude::*;
use std::path::Path;
use std::time::Instant;

use house_engine::{run, ProductionOdds, Termination};

use crate::config::ScenarioConfig;
use crate::report::*;
use crate::time_series;

/// Run a single scenario sample with a specific seed.
pub fn run_single(scenario: &ScenarioConfig, seed: i64, time_series_dir: Option<&Path>) -> RunSample {
    let request = scenario.request.clone().with_seed(Some(seed));
    let start = Instant::now();
    let result = run(&request);
    let elapsed_us = start.elapsed().as_micros();

    if let Some(dir) = time_series_dir {
        let path = dir.join(format!("{}-seed-{}.jsonl", scenario.name.to_lowercase(), seed));
        if let Err(e) = time_series::write_jsonl(&result, &path) {
            log::warn!("failed to write time series {}: {}", path.display(), e);
        }
    }

    let fs = &result.final_state;
    RunSample {
        seed,
        iterations: result.iterations,
        mana: fs.mana,
        counters: fs.counters,
        resource_a_total: fs.resource_a.total,
        resource_b_total: fs.resource_b.total,
        resource_a_untapped: fs.resource_a.untapped,
        termination: result.termination.label(),
        stop_reason: match result.termination {
            Termination::StoppedByThreshold { reason } => Some(reason),
            _ => None,
        },
        elapsed_us,
    }
}

/// Run Monte Carlo: N samples of a scenario, aggregate stats.
pub fn run_monte_carlo(
    scenario: &ScenarioConfig,
    n_runs: usize,
    base_seed: i64,
    odds: &ProductionOdds,
    time_series_dir: Option<&Path>,
) -> ScenarioReport {
    let samples: Vec<RunSample> = (0..n_runs)
        .into_par_iter()
        .map(|i| run_single(scenario, base_seed.wrapping_add(i as i64), time_series_dir))
        .collect();
    log::info!("{}: {} samples done", scenario.name, samples.len());
    aggregate(scenario, odds, samples)
}

fn rate(samples: &[RunSample], label: &str) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().filter(|s| s.termination == label).count() as f64 / samples.len() as f64
}

/// Aggregate individual samples into a ScenarioReport.
fn aggregate(scenario: &ScenarioConfig, odds: &ProductionOdds, samples: Vec<RunSample>) -> ScenarioReport {
    let spares = scenario.request.initial_spare_tokens();
    ScenarioReport {
        scenario_name: scenario.name.clone(),
        label: scenario.label.clone(),
        category: scenario.category.clone(),
        initial_spare_tokens: spares,
        n_runs: samples.len(),
        stop_rate: rate(&samples, "stopped"),
        stuck_rate: rate(&samples, "stuck"),
        exhausted_rate: rate(&samples, "exhausted"),
        iterations: Stats::of(&samples, |s| s.iterations as f64),
        mana: Stats::of(&samples, |s| s.mana as f64),
        counters: Stats::of(&samples, |s| s.counters as f64),
        resource_a_total: Stats::of(&samples, |s| s.resource_a_total as f64),
        resource_b_total: Stats::of(&samples, |s| s.resource_b_total as f64),
        elapsed_us: Stats::of(&samples, |s| s.elapsed_us as f64),
        expected_cycles_from_spares: odds.expected_cycles_from_spares(spares),
        individual_runs: samples,
    }
}
