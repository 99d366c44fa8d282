//! Configuration for the schedule planner.
//!
//! Every cutoff in here is a tuning constant, not a semantic boundary:
//! schedules stay valid under any setting, only length and latency move.

use crate::domain::value_objects::SizeClass;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Planner configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Maximum transactions accepted in one batch (anti-DoS).
    pub max_batch_size: usize,
    /// Total wall-clock budget for one planning run, in milliseconds.
    /// Crossing it stops the run immediately with the best schedule so far.
    pub budget_ms: u64,
    /// Elapsed time after which impact scoring is abandoned for
    /// approximate scoring.
    pub downgrade_approx_ms: u64,
    /// Elapsed time after which approximate scoring is abandoned for
    /// sampled minimal-write scoring.
    pub downgrade_sampled_ms: u64,
    /// Largest batch still searched exhaustively.
    pub small_max: usize,
    /// Largest batch that starts on the impact-scoring tier.
    pub medium_max: usize,
    /// Largest batch that runs the tiered sequencer at all; anything
    /// bigger goes straight to restart exploration.
    pub large_max: usize,
    /// Candidate sample size per step under the sampled tier.
    pub sample_cap: usize,
    /// Under the sampled tier, read the clock only every this many
    /// sequencer iterations.
    pub poll_stride: u64,
    /// Inside selection scans, probe the deadline every this many
    /// candidates.
    pub scan_poll_stride: u64,
    /// Under the sampled tier, prune the candidate pool only every this
    /// many iterations; selection re-checks eligibility either way.
    pub prune_stride: u64,
    /// Remaining budget below which the explorer stops starting attempts.
    pub explorer_safety_margin_ms: u64,
    /// Random restart attempts after the deterministic orders.
    pub max_random_attempts: usize,
    /// Random restart attempts for batches above `large_max`.
    pub huge_random_attempts: usize,
    /// Seed for the sampled tier and shuffled restarts. `None` draws from
    /// the OS; fix it for reproducible runs.
    pub rng_seed: Option<u64>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_batch_size: 100_000,
            budget_ms: 900,
            downgrade_approx_ms: 360,
            downgrade_sampled_ms: 675,
            small_max: 12,
            medium_max: 200,
            large_max: 3000,
            sample_cap: 50,
            poll_stride: 64,
            scan_poll_stride: 1024,
            prune_stride: 4,
            explorer_safety_margin_ms: 20,
            max_random_attempts: 16,
            huge_random_attempts: 3,
            rng_seed: None,
        }
    }
}

impl PlannerConfig {
    /// Classify a batch by transaction count.
    pub fn size_class(&self, transaction_count: usize) -> SizeClass {
        if transaction_count <= self.small_max {
            SizeClass::Small
        } else if transaction_count <= self.medium_max {
            SizeClass::Medium
        } else if transaction_count <= self.large_max {
            SizeClass::Large
        } else {
            SizeClass::Huge
        }
    }

    /// Random source for this run, seeded when configured.
    pub fn rng(&self) -> StdRng {
        match self.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
