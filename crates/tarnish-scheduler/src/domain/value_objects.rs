//! Value objects for schedule planning.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Storage cell identifier (positive integer).
pub type CellId = u64;

/// Transaction identifier, 1-based as seen on the wire.
pub type TxId = u32;

/// Declared storage footprint of a transaction.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AccessProfile {
    /// Cells read during execution.
    pub reads: HashSet<CellId>,
    /// Cells written during execution.
    pub writes: HashSet<CellId>,
}

impl AccessProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reads(mut self, reads: Vec<CellId>) -> Self {
        self.reads = reads.into_iter().collect();
        self
    }

    pub fn with_writes(mut self, writes: Vec<CellId>) -> Self {
        self.writes = writes.into_iter().collect();
        self
    }

    /// Total number of declared cells, reads and writes combined.
    pub fn footprint(&self) -> usize {
        self.reads.len() + self.writes.len()
    }
}

/// Batch size class. Bigger classes start on cheaper scoring tiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizeClass {
    /// Small enough for exhaustive search.
    Small,
    /// Full impact scoring is affordable.
    Medium,
    /// Start directly on approximate scoring.
    Large,
    /// Even one tiered pass may not finish; restart exploration only.
    Huge,
}

/// Scoring tier used to rank eligible candidates.
///
/// Tiers trade per-step cost for expected schedule length. The controller
/// only ever moves towards cheaper tiers within a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreTier {
    /// Impact-aware ranking over the whole candidate pool.
    Exact,
    /// Ranking by the candidate's own read/write sets only.
    Approximate,
    /// Minimal-write ranking over a bounded random sample of the pool.
    Sampled,
}

impl ScoreTier {
    fn quality(self) -> u8 {
        match self {
            ScoreTier::Exact => 2,
            ScoreTier::Approximate => 1,
            ScoreTier::Sampled => 0,
        }
    }

    /// The cheaper of the two tiers. Used for monotonic degradation.
    pub fn cheapest_with(self, other: ScoreTier) -> ScoreTier {
        if other.quality() < self.quality() {
            other
        } else {
            self
        }
    }
}
