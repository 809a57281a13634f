// Copyright 2026 Hypermesh Foundation. All rights reserved.
// House Engine - Resource Pool

//! Tapped/untapped counters for the three resource kinds.
//!
//! A pool is owned by exactly one run. Kind A and B totals only grow through
//! the driver's production step; kind C stays at its starting total.

use serde::Serialize;

use crate::types::{CreatedCounts, KindSnapshot, ResourceKind};

/// `(total, tapped)` for one kind, with `tapped <= total`.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct KindCount {
    total: u64,
    tapped: u64,
}

impl KindCount {
    /// `tapped` is clamped to `total`.
    pub fn new(total: u64, tapped: u64) -> Self {
        Self { total, tapped: tapped.min(total) }
    }

    pub fn untapped(total: u64) -> Self {
        Self::new(total, 0)
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn tapped(&self) -> u64 {
        self.tapped
    }

    pub fn available(&self) -> u64 {
        self.total - self.tapped
    }

    pub fn snapshot(&self) -> KindSnapshot {
        KindSnapshot { total: self.total, tapped: self.tapped, untapped: self.available() }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct ResourcePool {
    a: KindCount,
    b: KindCount,
    c: KindCount,
}

impl ResourcePool {
    /// Fresh pool for a run: `spare_tokens` untapped units of kind C.
    pub fn new(spare_tokens: u64) -> Self {
        Self { c: KindCount::untapped(spare_tokens), ..Self::default() }
    }

    pub fn from_counts(a: KindCount, b: KindCount, c: KindCount) -> Self {
        Self { a, b, c }
    }

    pub fn get(&self, kind: ResourceKind) -> &KindCount {
        match kind {
            ResourceKind::A => &self.a,
            ResourceKind::B => &self.b,
            ResourceKind::C => &self.c,
        }
    }

    fn get_mut(&mut self, kind: ResourceKind) -> &mut KindCount {
        match kind {
            ResourceKind::A => &mut self.a,
            ResourceKind::B => &mut self.b,
            ResourceKind::C => &mut self.c,
        }
    }

    pub fn available(&self, kind: ResourceKind) -> u64 {
        self.get(kind).available()
    }

    pub fn untapped_count(&self) -> u64 {
        ResourceKind::ALL.iter().map(|&k| self.available(k)).sum()
    }

    /// Taps one unit of `kind`. Returns false, leaving the pool unchanged,
    /// when none is untapped.
    pub fn tap_one(&mut self, kind: ResourceKind) -> bool {
        let count = self.get_mut(kind);
        if count.available() == 0 {
            return false;
        }
        count.tapped += 1;
        true
    }

    /// Untaps one unit of `kind`; no-op when none is tapped.
    pub fn untap_one(&mut self, kind: ResourceKind) {
        let count = self.get_mut(kind);
        count.tapped = count.tapped.saturating_sub(1);
    }

    /// Adds freshly produced, untapped units of kinds A and B.
    pub(crate) fn produce(&mut self, created: CreatedCounts) {
        self.a.total += created.a;
        self.b.total += created.b;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_pool_holds_only_spare_tokens() {
        let pool = ResourcePool::new(4);
        assert_eq!(pool.untapped_count(), 4);
        assert_eq!(pool.get(ResourceKind::C).total(), 4);
        assert_eq!(pool.get(ResourceKind::A).total(), 0);
        assert_eq!(pool.get(ResourceKind::B).total(), 0);
    }

    #[test]
    fn tap_one_refuses_when_exhausted() {
        let mut pool = ResourcePool::new(1);
        assert!(pool.tap_one(ResourceKind::C));
        assert!(!pool.tap_one(ResourceKind::C));
        assert!(!pool.tap_one(ResourceKind::A));
        assert_eq!(pool.get(ResourceKind::C).tapped(), 1);
        assert_eq!(pool.untapped_count(), 0);
    }

    #[test]
    fn untap_one_is_noop_at_zero() {
        let mut pool = ResourcePool::new(2);
        pool.untap_one(ResourceKind::C);
        assert_eq!(pool.get(ResourceKind::C).tapped(), 0);

        pool.tap_one(ResourceKind::C);
        pool.tap_one(ResourceKind::C);
        pool.untap_one(ResourceKind::C);
        assert_eq!(pool.get(ResourceKind::C).tapped(), 1);
        assert_eq!(pool.untapped_count(), 1);
    }

    #[test]
    fn produce_grows_a_and_b_only() {
        let mut pool = ResourcePool::new(3);
        pool.produce(CreatedCounts { a: 1, b: 1 });
        pool.produce(CreatedCounts { a: 1, b: 0 });
        assert_eq!(pool.get(ResourceKind::A).total(), 2);
        assert_eq!(pool.get(ResourceKind::B).total(), 1);
        assert_eq!(pool.get(ResourceKind::C).total(), 3);
        assert_eq!(pool.untapped_count(), 6);
    }

    #[test]
    fn kind_count_clamps_tapped() {
        let count = KindCount::new(2, 5);
        assert_eq!(count.tapped(), 2);
        assert_eq!(count.available(), 0);
        assert_eq!(count.snapshot(), KindSnapshot { total: 2, tapped: 2, untapped: 0 });
    }
}
