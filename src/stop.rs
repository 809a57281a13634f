// Copyright 2026 Hypermesh Foundation. All rights reserved.
// House Engine - Stop Conditions

//! Ordered stop thresholds, evaluated after production each cycle.
//!
//! Priority: cumulative roll total, resource B total, resource A total,
//! mana. Only enabled conditions are present in the list and the first one
//! satisfied wins.

use crate::pool::ResourcePool;
use crate::request::SimulationRequest;
use crate::types::{ResourceKind, StopReason};

/// Cumulative roll total that ends a run when the counter stop is enabled.
pub const COUNTER_STOP_THRESHOLD: u64 = 100;

/// Board values the stop conditions read.
#[derive(Debug, Clone, Copy)]
pub struct StopProbe<'a> {
    pub pool: &'a ResourcePool,
    pub counters: u64,
    pub mana: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopConditions {
    rules: Vec<StopReason>,
}

impl StopConditions {
    pub fn from_request(request: &SimulationRequest) -> Self {
        let candidates = [
            request
                .stop_on_counter_threshold()
                .then_some(StopReason::CounterThreshold(COUNTER_STOP_THRESHOLD)),
            request.stop_on_resource_b_threshold().map(StopReason::ResourceBThreshold),
            request.stop_on_resource_a_threshold().map(StopReason::ResourceAThreshold),
            request.stop_on_mana_threshold().map(StopReason::ManaThreshold),
        ];
        Self { rules: candidates.into_iter().flatten().collect() }
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// First enabled condition that `probe` satisfies.
    pub fn evaluate(&self, probe: &StopProbe<'_>) -> Option<StopReason> {
        self.rules.iter().copied().find(|rule| is_satisfied(rule, probe))
    }
}

fn is_satisfied(rule: &StopReason, probe: &StopProbe<'_>) -> bool {
    match *rule {
        StopReason::CounterThreshold(t) => probe.counters >= t,
        StopReason::ResourceBThreshold(t) => probe.pool.get(ResourceKind::B).total() >= t,
        StopReason::ResourceAThreshold(t) => probe.pool.get(ResourceKind::A).total() >= t,
        StopReason::ManaThreshold(t) => probe.mana >= t,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::KindCount;

    fn pool(a: u64, b: u64) -> ResourcePool {
        ResourcePool::from_counts(KindCount::untapped(a), KindCount::untapped(b), KindCount::default())
    }

    #[test]
    fn disabled_request_has_no_rules() {
        let conditions = StopConditions::from_request(&SimulationRequest::new(3));
        assert!(conditions.is_empty());
        let p = pool(50, 50);
        let probe = StopProbe { pool: &p, counters: 1_000, mana: 1_000 };
        assert_eq!(conditions.evaluate(&probe), None);
    }

    #[test]
    fn counter_wins_over_everything() {
        let request = SimulationRequest::new(0)
            .with_counter_stop(true)
            .with_resource_a_threshold(Some(1))
            .with_resource_b_threshold(Some(1))
            .with_mana_threshold(Some(1));
        let conditions = StopConditions::from_request(&request);
        let p = pool(5, 5);
        let probe = StopProbe { pool: &p, counters: 100, mana: 9 };
        assert_eq!(conditions.evaluate(&probe), Some(StopReason::CounterThreshold(100)));
    }

    #[test]
    fn resource_b_checked_before_a_and_mana() {
        let request = SimulationRequest::new(0)
            .with_counter_stop(true)
            .with_resource_a_threshold(Some(2))
            .with_resource_b_threshold(Some(2))
            .with_mana_threshold(Some(2));
        let conditions = StopConditions::from_request(&request);

        let p = pool(2, 2);
        let probe = StopProbe { pool: &p, counters: 99, mana: 2 };
        assert_eq!(conditions.evaluate(&probe), Some(StopReason::ResourceBThreshold(2)));

        let p = pool(2, 1);
        let probe = StopProbe { pool: &p, counters: 99, mana: 2 };
        assert_eq!(conditions.evaluate(&probe), Some(StopReason::ResourceAThreshold(2)));

        let p = pool(1, 1);
        let probe = StopProbe { pool: &p, counters: 99, mana: 2 };
        assert_eq!(conditions.evaluate(&probe), Some(StopReason::ManaThreshold(2)));

        let probe = StopProbe { pool: &p, counters: 99, mana: 1 };
        assert_eq!(conditions.evaluate(&probe), None);
    }
}
