//! Anytime controller: one object owning the clock, the budget and the
//! active scoring tier.
//!
//! The search algorithms never read the clock themselves; they ask this
//! controller, which keeps all wall-clock comparisons in one place. The
//! tier only ever moves towards cheaper rules within a run, and the hard
//! cutoff stops a run even mid-selection.

use crate::config::PlannerConfig;
use crate::domain::value_objects::{ScoreTier, SizeClass};
use crate::ports::outbound::{Clock, Pacer};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

pub struct AnytimeController {
    clock: Arc<dyn Clock>,
    start: Duration,
    budget: Duration,
    downgrade_approx: Duration,
    downgrade_sampled: Duration,
    poll_stride: u64,
    scan_poll_stride: u64,
    tier: ScoreTier,
}

impl AnytimeController {
    /// Build a controller for one run, picking the initial tier from the
    /// batch's size class.
    pub fn new(clock: Arc<dyn Clock>, config: &PlannerConfig, transaction_count: usize) -> Self {
        let tier = match config.size_class(transaction_count) {
            SizeClass::Small | SizeClass::Medium => ScoreTier::Exact,
            SizeClass::Large => ScoreTier::Approximate,
            SizeClass::Huge => ScoreTier::Sampled,
        };
        let start = clock.now();

        Self {
            clock,
            start,
            budget: Duration::from_millis(config.budget_ms),
            downgrade_approx: Duration::from_millis(config.downgrade_approx_ms),
            downgrade_sampled: Duration::from_millis(config.downgrade_sampled_ms),
            poll_stride: config.poll_stride.max(1),
            scan_poll_stride: config.scan_poll_stride.max(1),
            tier,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.clock.now().saturating_sub(self.start)
    }

    pub fn active_tier(&self) -> ScoreTier {
        self.tier
    }

    fn hard_expired(&self) -> bool {
        self.elapsed() >= self.budget
    }

    /// Force the tier down to whatever the elapsed time demands. Never
    /// upgrades back.
    fn refresh_tier(&mut self) {
        let elapsed = self.elapsed();
        let forced = if elapsed >= self.downgrade_sampled {
            ScoreTier::Sampled
        } else if elapsed >= self.downgrade_approx {
            ScoreTier::Approximate
        } else {
            ScoreTier::Exact
        };

        let next = self.tier.cheapest_with(forced);
        if next != self.tier {
            debug!(
                elapsed_ms = elapsed.as_millis() as u64,
                ?next,
                "Downgrading scoring tier"
            );
            self.tier = next;
        }
    }
}

impl Pacer for AnytimeController {
    fn tier(&mut self, iteration: u64) -> Option<ScoreTier> {
        // On the cheapest tier the clock is read only every poll_stride
        // iterations; there is nothing left to downgrade to, only the
        // hard cutoff remains.
        if self.tier == ScoreTier::Sampled && iteration % self.poll_stride != 0 {
            return Some(self.tier);
        }

        if self.hard_expired() {
            return None;
        }
        self.refresh_tier();
        Some(self.tier)
    }

    fn expired_mid_scan(&mut self, scanned: u64) -> bool {
        if scanned % self.scan_poll_stride != 0 {
            return false;
        }
        self.hard_expired()
    }

    fn remaining_ms(&mut self) -> u64 {
        let budget = self.budget.as_millis() as u64;
        budget.saturating_sub(self.elapsed().as_millis() as u64)
    }
}
