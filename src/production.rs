// Copyright 2026 Hypermesh Foundation. All rights reserved.
// House Engine - Production Table

//! Maps each d20 roll to the units it creates, and derives the exact odds
//! of that table.
//!
//! | roll  | created        |
//! |-------|----------------|
//! | 1-3   | nothing        |
//! | 4-5   | +1 A           |
//! | 6-20  | +1 A and +1 B  |

use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::selector::UNTAP_COST;
use crate::types::{CreatedCounts, DIE_FACES};

const ROBOT_FROM: u8 = 4;
const TREASURE_FROM: u8 = 6;

/// Units created by `roll`. Rolls outside 1..=20 create nothing.
pub fn production_for_roll(roll: u8) -> CreatedCounts {
    match roll {
        r if (TREASURE_FROM..=DIE_FACES).contains(&r) => CreatedCounts { a: 1, b: 1 },
        r if (ROBOT_FROM..TREASURE_FROM).contains(&r) => CreatedCounts { a: 1, b: 0 },
        _ => CreatedCounts::default(),
    }
}

/// Exact per-roll expectations of the production table on a fair d20.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ProductionOdds {
    pub p_nothing: Decimal,
    pub p_a_only: Decimal,
    pub p_a_and_b: Decimal,
    pub expected_a: Decimal,
    pub expected_b: Decimal,
    /// Expected change in untapped units over one paid cycle.
    pub expected_net_untapped: Decimal,
}

impl ProductionOdds {
    pub fn d20() -> Self {
        let faces = Decimal::from(DIE_FACES);
        let mut nothing = 0u32;
        let mut a_only = 0u32;
        let mut a_and_b = 0u32;
        let mut a_total = 0u64;
        let mut b_total = 0u64;

        for roll in 1..=DIE_FACES {
            let created = production_for_roll(roll);
            a_total += created.a;
            b_total += created.b;
            match (created.a, created.b) {
                (0, 0) => nothing += 1,
                (_, 0) => a_only += 1,
                _ => a_and_b += 1,
            }
        }

        let expected_a = Decimal::from(a_total) / faces;
        let expected_b = Decimal::from(b_total) / faces;
        Self {
            p_nothing: Decimal::from(nothing) / faces,
            p_a_only: Decimal::from(a_only) / faces,
            p_a_and_b: Decimal::from(a_and_b) / faces,
            expected_a,
            expected_b,
            expected_net_untapped: expected_a + expected_b - Decimal::from(UNTAP_COST as u64),
        }
    }

    /// Expected number of paid cycles a stock of `spare_tokens` can cover
    /// on its own, before roll growth runs dry. `None` when the pool is
    /// expected to grow rather than shrink.
    pub fn expected_cycles_from_spares(&self, spare_tokens: u64) -> Option<f64> {
        if self.expected_net_untapped >= dec!(0) {
            return None;
        }
        let cycles = Decimal::from(spare_tokens) / -self.expected_net_untapped;
        cycles.to_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_boundaries() {
        assert_eq!(production_for_roll(1), CreatedCounts { a: 0, b: 0 });
        assert_eq!(production_for_roll(3), CreatedCounts { a: 0, b: 0 });
        assert_eq!(production_for_roll(4), CreatedCounts { a: 1, b: 0 });
        assert_eq!(production_for_roll(5), CreatedCounts { a: 1, b: 0 });
        assert_eq!(production_for_roll(6), CreatedCounts { a: 1, b: 1 });
        assert_eq!(production_for_roll(20), CreatedCounts { a: 1, b: 1 });
        assert_eq!(production_for_roll(21), CreatedCounts::default());
    }

    #[test]
    fn d20_odds_are_exact() {
        let odds = ProductionOdds::d20();
        assert_eq!(odds.p_nothing, dec!(0.15));
        assert_eq!(odds.p_a_only, dec!(0.1));
        assert_eq!(odds.p_a_and_b, dec!(0.75));
        assert_eq!(odds.expected_a, dec!(0.85));
        assert_eq!(odds.expected_b, dec!(0.75));
        assert_eq!(odds.expected_net_untapped, dec!(-0.4));
    }

    #[test]
    fn spare_tokens_drain_at_expected_rate() {
        let odds = ProductionOdds::d20();
        let cycles = odds.expected_cycles_from_spares(10).expect("test: pool shrinks");
        assert!((cycles - 25.0).abs() < 1e-9, "got {cycles}");
    }
}
