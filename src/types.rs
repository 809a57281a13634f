// Copyright 2026 Hypermesh Foundation. All rights reserved.
// House Engine - Type Definitions

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

// ─── Resource Kind ───────────────────────────────────────────────────────────

/// The three resource kinds that can pay the generator's untap cost.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// Robot: produced on rolls 4-20, the scarcest kind, spent last.
    A,
    /// Treasure: produced on rolls 6-20, spent freely.
    B,
    /// Spare token: fixed at the request's starting count, spent first.
    C,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [Self::A, Self::B, Self::C];

    pub fn description(&self) -> &'static str {
        match self {
            Self::A => "robot",
            Self::B => "treasure",
            Self::C => "spare token",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
        };
        f.write_str(code)
    }
}

// ─── Created Counts ──────────────────────────────────────────────────────────

/// Units produced by a single roll. Kind C is never produced.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreatedCounts {
    pub a: u64,
    pub b: u64,
}

// ─── Termination ─────────────────────────────────────────────────────────────

/// Which stop threshold ended a run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "condition", content = "threshold", rename_all = "snake_case")]
pub enum StopReason {
    CounterThreshold(u64),
    ResourceBThreshold(u64),
    ResourceAThreshold(u64),
    ManaThreshold(u64),
}

impl StopReason {
    pub fn note(&self) -> String {
        match self {
            Self::CounterThreshold(t) => format!("Reached cumulative roll total >= {t}"),
            Self::ResourceBThreshold(t) => format!("Reached resource B total >= {t}"),
            Self::ResourceAThreshold(t) => format!("Reached resource A total >= {t}"),
            Self::ManaThreshold(t) => format!("Reached mana >= {t}"),
        }
    }
}

/// How a run ended. All three are normal outcomes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Termination {
    /// An enabled stop threshold was reached.
    StoppedByThreshold { reason: StopReason },
    /// The iteration cap was reached with the generator ready.
    ExhaustedIterations,
    /// The untap cost could not be paid; the generator stays tapped.
    Stuck,
}

impl Termination {
    pub fn label(&self) -> &'static str {
        match self {
            Self::StoppedByThreshold { .. } => "stopped",
            Self::ExhaustedIterations => "exhausted",
            Self::Stuck => "stuck",
        }
    }
}

// ─── Iteration Log ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IterationLogEntry {
    /// 1-based iteration index.
    pub iteration: u64,
    pub roll: u8,
    pub created: CreatedCounts,
    /// Kinds tapped to untap the generator: empty or exactly two.
    pub tapped: Vec<ResourceKind>,
    pub note: String,
}

// ─── Board Snapshot ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct KindSnapshot {
    pub total: u64,
    pub tapped: u64,
    pub untapped: u64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BoardStateSnapshot {
    pub resource_a: KindSnapshot,
    pub resource_b: KindSnapshot,
    pub resource_c: KindSnapshot,
    /// Cumulative roll total.
    pub counters: u64,
    pub mana: u64,
    pub generator_ready: bool,
}

impl BoardStateSnapshot {
    pub fn kind(&self, kind: ResourceKind) -> &KindSnapshot {
        match kind {
            ResourceKind::A => &self.resource_a,
            ResourceKind::B => &self.resource_b,
            ResourceKind::C => &self.resource_c,
        }
    }
}

// ─── Roll Histogram ──────────────────────────────────────────────────────────

pub const DIE_FACES: u8 = 20;

/// Observed count per d20 face. Serializes as a map with all 20 keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RollHistogram([u64; DIE_FACES as usize]);

impl RollHistogram {
    /// Rolls outside 1..=20 are ignored.
    pub fn record(&mut self, roll: u8) {
        if let Some(slot) = roll.checked_sub(1).and_then(|i| self.0.get_mut(i as usize)) {
            *slot += 1;
        }
    }

    pub fn count(&self, face: u8) -> u64 {
        face.checked_sub(1)
            .and_then(|i| self.0.get(i as usize))
            .copied()
            .unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.0.iter().sum()
    }

    /// `(face, count)` pairs for faces 1..=20.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        (1..=DIE_FACES).zip(self.0.iter().copied())
    }
}

impl Serialize for RollHistogram {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(DIE_FACES as usize))?;
        for (face, count) in self.iter() {
            map.serialize_entry(&face, &count)?;
        }
        map.end()
    }
}

// ─── SimulationResult ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SimulationResult {
    /// Local time at assembly, ISO-8601 to the second.
    pub run_timestamp: String,
    /// Seed actually used, whether supplied or time-derived.
    pub seed: i64,
    /// Pseudorandom generator the seed is defined against.
    pub prng: &'static str,
    pub iterations: u64,
    pub termination: Termination,
    pub log: Vec<IterationLogEntry>,
    pub final_state: BoardStateSnapshot,
    pub roll_histogram: RollHistogram,
}
