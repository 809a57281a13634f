// Copyright 2026 Hypermesh Foundation. All rights reserved.
// House Engine - Trace & Result Assembly

use chrono::Local;
use serde::Serialize;

use crate::pool::ResourcePool;
use crate::types::*;

/// Accumulates the per-iteration log and roll histogram of one run.
#[derive(Debug, Default)]
pub struct Trace {
    log: Vec<IterationLogEntry>,
    histogram: RollHistogram,
}

/// Final values the assembler reads once the loop has exited.
#[derive(Debug, Clone, Copy)]
pub struct FinalState<'a> {
    pub pool: &'a ResourcePool,
    pub counters: u64,
    pub mana: u64,
    pub generator_ready: bool,
    pub termination: Termination,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_roll(&mut self, roll: u8) {
        self.histogram.record(roll);
    }

    pub fn push(&mut self, entry: IterationLogEntry) {
        self.log.push(entry);
    }

    pub fn len(&self) -> usize {
        self.log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    pub fn last(&self) -> Option<&IterationLogEntry> {
        self.log.last()
    }

    pub fn histogram(&self) -> &RollHistogram {
        &self.histogram
    }

    /// Builds the result. Reads final state only.
    pub fn assemble(self, seed: i64, prng: &'static str, state: FinalState<'_>) -> SimulationResult {
        let snapshot = BoardStateSnapshot {
            resource_a: state.pool.get(ResourceKind::A).snapshot(),
            resource_b: state.pool.get(ResourceKind::B).snapshot(),
            resource_c: state.pool.get(ResourceKind::C).snapshot(),
            counters: state.counters,
            mana: state.mana,
            generator_ready: state.generator_ready,
        };
        SimulationResult {
            run_timestamp: Local::now().format("%Y-%m-%dT%H:%M:%S").to_string(),
            seed,
            prng,
            iterations: self.log.len() as u64,
            termination: state.termination,
            log: self.log,
            final_state: snapshot,
            roll_histogram: self.histogram,
        }
    }
}

// ─── Trajectory ──────────────────────────────────────────────────────────────

/// Board totals at the end of one iteration, rebuilt from the log.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct TrajectoryPoint {
    pub iteration: u64,
    pub roll: u8,
    pub resource_a: KindSnapshot,
    pub resource_b: KindSnapshot,
    pub resource_c: KindSnapshot,
    pub counters: u64,
    pub mana: u64,
    pub generator_ready: bool,
}

impl SimulationResult {
    /// Replays the log into per-iteration board totals.
    ///
    /// Kind C starts at the final snapshot's total, which never changes
    /// during a run.
    pub fn trajectory(&self) -> Vec<TrajectoryPoint> {
        let mut a = KindSnapshot::default();
        let mut b = KindSnapshot::default();
        let mut c = KindSnapshot {
            total: self.final_state.resource_c.total,
            tapped: 0,
            untapped: self.final_state.resource_c.total,
        };
        let mut counters = 0u64;

        self.log
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                grow(&mut a, entry.created.a);
                grow(&mut b, entry.created.b);
                for kind in &entry.tapped {
                    let slot = match kind {
                        ResourceKind::A => &mut a,
                        ResourceKind::B => &mut b,
                        ResourceKind::C => &mut c,
                    };
                    slot.tapped += 1;
                    slot.untapped = slot.untapped.saturating_sub(1);
                }
                counters += u64::from(entry.roll);
                TrajectoryPoint {
                    iteration: entry.iteration,
                    roll: entry.roll,
                    resource_a: a,
                    resource_b: b,
                    resource_c: c,
                    counters,
                    mana: i as u64 + 1,
                    generator_ready: !entry.tapped.is_empty(),
                }
            })
            .collect()
    }

    /// One-line text summary of the run.
    pub fn summary(&self) -> String {
        let fs = &self.final_state;
        let kind = |label: &str, k: &KindSnapshot| {
            format!("{label}: {} ({} untapped)", k.total, k.untapped)
        };
        format!(
            "Iterations: {} | {} | {} | {} | Counters: {} | Mana: {} | Ended: {} | Seed: {}",
            self.iterations,
            kind("A", &fs.resource_a),
            kind("B", &fs.resource_b),
            kind("C", &fs.resource_c),
            fs.counters,
            fs.mana,
            self.termination.label(),
            self.seed,
        )
    }
}

fn grow(slot: &mut KindSnapshot, by: u64) {
    slot.total += by;
    slot.untapped += by;
}
