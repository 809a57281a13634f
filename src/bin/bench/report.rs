// Bench report types — per-run samples, per-scenario aggregation, top-level JSON

use house_engine::{ProductionOdds, StopReason};
use serde::Serialize;

// ─── Statistics (per-metric Monte Carlo aggregation) ────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct Stats {
    pub mean: f64,
    pub std_dev: f64,
    pub ci_lower: f64,
    pub ci_upper: f64,
    pub min: f64,
    pub max: f64,
    pub n: usize,
}

impl Stats {
    pub fn from_samples(samples: &[f64]) -> Self {
        let n = samples.len();
        if n == 0 {
            return Self { mean: 0.0, std_dev: 0.0, ci_lower: 0.0, ci_upper: 0.0, min: 0.0, max: 0.0, n: 0 };
        }
        let mean = samples.iter().sum::<f64>() / n as f64;
        let variance = if n > 1 {
            samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
        } else {
            0.0
        };
        let std_dev = variance.sqrt();
        let half_width = 1.96 * std_dev / (n as f64).sqrt(); // 95% CI
        Self {
            mean,
            std_dev,
            ci_lower: mean - half_width,
            ci_upper: mean + half_width,
            min: samples.iter().copied().fold(f64::INFINITY, f64::min),
            max: samples.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            n,
        }
    }

    pub fn of<T>(items: &[T], metric: impl Fn(&T) -> f64) -> Self {
        Self::from_samples(&items.iter().map(metric).collect::<Vec<_>>())
    }

    pub fn half_width(&self) -> f64 {
        (self.ci_upper - self.ci_lower) / 2.0
    }
}

// ─── Single-Run Sample ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct RunSample {
    pub seed: i64,
    pub iterations: u64,
    pub mana: u64,
    pub counters: u64,
    pub resource_a_total: u64,
    pub resource_b_total: u64,
    pub resource_a_untapped: u64,
    pub termination: &'static str,
    pub stop_reason: Option<StopReason>,
    pub elapsed_us: u128,
}

// ─── Scenario Report ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub scenario_name: String,
    pub label: String,
    pub category: String,
    pub initial_spare_tokens: u64,
    pub n_runs: usize,
    pub stop_rate: f64,
    pub stuck_rate: f64,
    pub exhausted_rate: f64,
    pub iterations: Stats,
    pub mana: Stats,
    pub counters: Stats,
    pub resource_a_total: Stats,
    pub resource_b_total: Stats,
    pub elapsed_us: Stats,
    /// Paid cycles the spare tokens alone cover at the table's expected drift.
    pub expected_cycles_from_spares: Option<f64>,
    pub individual_runs: Vec<RunSample>,
}

// ─── Top-Level Report ───────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct BenchReport {
    pub timestamp: String,
    pub version: &'static str,
    pub prng: &'static str,
    pub n_runs_per_scenario: usize,
    pub base_seed: i64,
    pub production_odds: ProductionOdds,
    pub scenarios: Vec<ScenarioReport>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_of_constant_samples() {
        let s = Stats::from_samples(&[4.0, 4.0, 4.0]);
        assert_eq!(s.n, 3);
        assert!((s.mean - 4.0).abs() < 1e-12);
        assert!(s.std_dev.abs() < 1e-12);
        assert!(s.half_width().abs() < 1e-12);
    }

    #[test]
    fn stats_bounds() {
        let s = Stats::of(&[1u64, 2, 3, 4], |&v| v as f64);
        assert!((s.mean - 2.5).abs() < 1e-12);
        assert!((s.min - 1.0).abs() < 1e-12);
        assert!((s.max - 4.0).abs() < 1e-12);
        assert!(s.ci_lower < s.mean && s.mean < s.ci_upper);
    }

    #[test]
    fn stats_of_nothing() {
        let s = Stats::from_samples(&[]);
        assert_eq!(s.n, 0);
        assert!(s.mean.abs() < 1e-12);
    }
}
