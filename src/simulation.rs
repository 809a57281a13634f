// Copyright 2026 Hypermesh Foundation. All rights reserved.
// House Engine - Simulation Core

use chrono::Utc;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::pool::ResourcePool;
use crate::production::production_for_roll;
use crate::request::SimulationRequest;
use crate::selector::{choose_tap_targets, TapDecision, UNTAP_COST};
use crate::stop::{StopConditions, StopProbe};
use crate::trace::{FinalState, Trace};
use crate::types::*;

/// Name of the generator behind every seed. A seed reproduces a run only
/// under this generator and `rand` 0.8's `gen_range`.
pub const PRNG_NAME: &str = "ChaCha8Rng";

const NOTE_UNPAYABLE: &str = "Could not find two valid resources to tap.";
const NOTE_INSUFFICIENT: &str = "Insufficient untapped resources to pay the untap cost.";

/// Runs a request to completion.
pub fn run(request: &SimulationRequest) -> SimulationResult {
    let mut sim = Simulation::new(request);
    while sim.step().is_none() {}
    sim.finish()
}

/// Seed for a request without one: wall-clock microseconds.
pub fn time_derived_seed() -> i64 {
    Utc::now().timestamp_micros()
}

// ─── Simulation struct ───────────────────────────────────────────────────────

/// One in-flight run. Owns its pool, generator state and random source.
#[derive(Debug)]
pub struct Simulation {
    pool: ResourcePool,
    rng: ChaCha8Rng,
    seed: i64,
    stop_conditions: StopConditions,
    max_iterations: u64,

    generator_ready: bool,
    counters: u64,
    mana: u64,
    iterations: u64,

    trace: Trace,
    termination: Option<Termination>,
}

impl Simulation {
    pub fn new(request: &SimulationRequest) -> Self {
        let seed = request.seed().unwrap_or_else(time_derived_seed);
        log::debug!(
            "simulation start: seed={seed} spare_tokens={} max_iterations={}",
            request.initial_spare_tokens(),
            request.max_iterations()
        );
        Self {
            pool: ResourcePool::new(request.initial_spare_tokens()),
            // Bit-cast so negative seeds stay distinct
            rng: ChaCha8Rng::seed_from_u64(seed as u64),
            seed,
            stop_conditions: StopConditions::from_request(request),
            max_iterations: request.max_iterations().max(1),
            generator_ready: true,
            counters: 0,
            mana: 0,
            iterations: 0,
            trace: Trace::new(),
            termination: None,
        }
    }

    pub fn seed(&self) -> i64 {
        self.seed
    }

    pub fn pool(&self) -> &ResourcePool {
        &self.pool
    }

    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    pub fn generator_ready(&self) -> bool {
        self.generator_ready
    }

    pub fn termination(&self) -> Option<Termination> {
        self.termination
    }

    /// Most recent log entry.
    pub fn last_entry(&self) -> Option<&IterationLogEntry> {
        self.trace.last()
    }

    /// Runs one activation cycle. Returns the termination once the run has
    /// ended; further calls do nothing and return it again.
    pub fn step(&mut self) -> Option<Termination> {
        if self.termination.is_some() {
            return self.termination;
        }

        // Activate
        self.generator_ready = false;
        self.mana += 1;

        let roll: u8 = self.rng.gen_range(1..=DIE_FACES);
        self.trace.record_roll(roll);

        let created = production_for_roll(roll);
        self.pool.produce(created);
        self.counters += u64::from(roll);

        let probe = StopProbe { pool: &self.pool, counters: self.counters, mana: self.mana };
        if let Some(reason) = self.stop_conditions.evaluate(&probe) {
            self.record(roll, created, Vec::new(), reason.note());
            return self.terminate(Termination::StoppedByThreshold { reason });
        }

        let mut tapped = Vec::with_capacity(UNTAP_COST);
        let mut note = String::new();
        if self.pool.untapped_count() >= UNTAP_COST as u64 {
            match choose_tap_targets(&self.pool) {
                TapDecision::Pay(kinds) => {
                    for kind in kinds {
                        if self.pool.tap_one(kind) {
                            tapped.push(kind);
                        }
                    }
                    self.generator_ready = tapped.len() == UNTAP_COST;
                }
                TapDecision::Unpayable => note = NOTE_UNPAYABLE.to_string(),
            }
        } else {
            note = NOTE_INSUFFICIENT.to_string();
        }

        log::trace!(
            "iteration {}: roll={roll} created={created:?} tapped={tapped:?}",
            self.iterations + 1
        );
        self.record(roll, created, tapped, note);

        if !self.generator_ready {
            return self.terminate(Termination::Stuck);
        }
        if self.iterations >= self.max_iterations {
            return self.terminate(Termination::ExhaustedIterations);
        }
        None
    }

    fn record(&mut self, roll: u8, created: CreatedCounts, tapped: Vec<ResourceKind>, note: String) {
        self.iterations += 1;
        self.trace.push(IterationLogEntry {
            iteration: self.iterations,
            roll,
            created,
            tapped,
            note,
        });
    }

    fn terminate(&mut self, termination: Termination) -> Option<Termination> {
        log::debug!(
            "simulation end: seed={} iterations={} termination={}",
            self.seed,
            self.iterations,
            termination.label()
        );
        self.termination = Some(termination);
        self.termination
    }

    /// Assembles the result. A run that was never stepped to completion is
    /// reported as exhausted at its current iteration count.
    pub fn finish(self) -> SimulationResult {
        let termination = self.termination.unwrap_or(Termination::ExhaustedIterations);
        self.trace.assemble(
            self.seed,
            PRNG_NAME,
            FinalState {
                pool: &self.pool,
                counters: self.counters,
                mana: self.mana,
                generator_ready: self.generator_ready,
                termination,
            },
        )
    }
}
