// Copyright 2026 Hypermesh Foundation. All rights reserved.
// House Engine - Tap-Target Selector

//! Chooses which two resources pay the generator's untap cost.
//!
//! The policy is an ordered list of preference rules. While fewer than two
//! picks exist, each rule takes the first kind in its list that still has an
//! untapped unit. Spare tokens go first, treasures are preferred over robots,
//! and robots are only spent when nothing else is left.

use serde::Serialize;

use crate::pool::ResourcePool;
use crate::types::ResourceKind::{self, A, B, C};

/// Units consumed per untap.
pub const UNTAP_COST: usize = 2;

const TAP_RULES: [&[ResourceKind]; 3] = [
    // Spare token first
    &[C],
    // Treasure over spare over robot
    &[B, C, A],
    // Fill
    &[C, B, A],
];

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(tag = "decision", content = "kinds", rename_all = "snake_case")]
pub enum TapDecision {
    Pay([ResourceKind; UNTAP_COST]),
    Unpayable,
}

impl TapDecision {
    pub fn kinds(&self) -> Option<&[ResourceKind; UNTAP_COST]> {
        match self {
            Self::Pay(kinds) => Some(kinds),
            Self::Unpayable => None,
        }
    }
}

/// Decides the untap payment for `pool` without touching it.
pub fn choose_tap_targets(pool: &ResourcePool) -> TapDecision {
    if pool.untapped_count() < UNTAP_COST as u64 {
        return TapDecision::Unpayable;
    }

    let mut remaining = [pool.available(A), pool.available(B), pool.available(C)];
    let slot = |kind: ResourceKind| match kind {
        A => 0,
        B => 1,
        C => 2,
    };

    let mut picks: Vec<ResourceKind> = Vec::with_capacity(UNTAP_COST);
    for rule in TAP_RULES {
        if picks.len() >= UNTAP_COST {
            break;
        }
        if let Some(&kind) = rule.iter().find(|&&k| remaining[slot(k)] > 0) {
            remaining[slot(kind)] -= 1;
            picks.push(kind);
        }
    }

    match picks.as_slice() {
        &[first, second] => TapDecision::Pay([first, second]),
        _ => TapDecision::Unpayable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::KindCount;

    fn pool(a: (u64, u64), b: (u64, u64), c: (u64, u64)) -> ResourcePool {
        ResourcePool::from_counts(
            KindCount::new(a.0, a.1),
            KindCount::new(b.0, b.1),
            KindCount::new(c.0, c.1),
        )
    }

    #[test]
    fn spare_then_robot_when_no_treasure() {
        let p = pool((1, 0), (0, 0), (1, 0));
        assert_eq!(choose_tap_targets(&p), TapDecision::Pay([C, A]));
    }

    #[test]
    fn single_unit_is_unpayable() {
        let p = pool((0, 0), (0, 0), (1, 0));
        assert_eq!(p.untapped_count(), 1);
        assert_eq!(choose_tap_targets(&p), TapDecision::Unpayable);
    }

    #[test]
    fn spare_then_treasure() {
        let p = pool((3, 0), (2, 0), (5, 0));
        assert_eq!(choose_tap_targets(&p), TapDecision::Pay([C, B]));
    }

    #[test]
    fn two_spares_when_nothing_else() {
        let p = pool((0, 0), (0, 0), (2, 0));
        assert_eq!(choose_tap_targets(&p), TapDecision::Pay([C, C]));
    }

    #[test]
    fn treasure_then_robot_without_spares() {
        let p = pool((1, 0), (1, 0), (4, 4));
        assert_eq!(choose_tap_targets(&p), TapDecision::Pay([B, A]));
    }

    #[test]
    fn two_treasures_before_any_robot() {
        let p = pool((3, 0), (2, 0), (0, 0));
        assert_eq!(choose_tap_targets(&p), TapDecision::Pay([B, B]));
    }

    #[test]
    fn robots_only_as_last_resort() {
        let p = pool((2, 0), (1, 1), (0, 0));
        assert_eq!(choose_tap_targets(&p), TapDecision::Pay([A, A]));
    }

    #[test]
    fn tapped_units_are_not_available() {
        let p = pool((1, 1), (1, 1), (1, 0));
        assert_eq!(choose_tap_targets(&p), TapDecision::Unpayable);
    }

    #[test]
    fn never_mutates_the_pool() {
        let p = pool((1, 0), (1, 0), (1, 0));
        let before = p;
        let first = choose_tap_targets(&p);
        let second = choose_tap_targets(&p);
        assert_eq!(first, second);
        assert_eq!(p, before);
    }

    #[test]
    fn decision_serializes_kinds() {
        let json = serde_json::to_value(TapDecision::Pay([C, B])).expect("test: serialize");
        assert_eq!(json["decision"], "pay");
        assert_eq!(json["kinds"], serde_json::json!(["c", "b"]));
    }
}
