//! Greedy sequencer: the SELECTING → EXTENDING → PRUNING loop.
//!
//! Validity is structural: a candidate is only appended while its reads are
//! clean, and corruption never recedes, so the schedule under construction
//! satisfies the no-stale-reads invariant at every iteration no matter
//! which scoring tier picked the candidate. Tier choice affects length
//! only.

use crate::algorithms::conflict::eligible;
use crate::algorithms::scorers::{
    select_approximate, select_exact, select_sampled, Selection,
};
use crate::config::PlannerConfig;
use crate::domain::entities::{Batch, CellReaders, CorruptedCells, Schedule};
use crate::domain::value_objects::ScoreTier;
use crate::ports::outbound::Pacer;
use rand::rngs::StdRng;
use tracing::debug;

/// One tiered greedy run over a batch.
pub struct GreedySequencer<'a> {
    batch: &'a Batch,
    readers: &'a CellReaders,
    corrupted: CorruptedCells,
    pool: Vec<usize>,
    schedule: Schedule,
    iterations: u64,
}

impl<'a> GreedySequencer<'a> {
    pub fn new(batch: &'a Batch, readers: &'a CellReaders) -> Self {
        Self {
            batch,
            readers,
            corrupted: CorruptedCells::new(),
            pool: (0..batch.len()).collect(),
            schedule: Schedule::new(),
            iterations: 0,
        }
    }

    /// Run to completion or deadline, returning the accumulated schedule.
    pub fn run(
        mut self,
        pacer: &mut dyn Pacer,
        rng: &mut StdRng,
        config: &PlannerConfig,
    ) -> Schedule {
        loop {
            if self.pool.is_empty() {
                break;
            }

            // Deadline check at the top of every iteration; the pacer may
            // rate-limit actual clock reads on the cheapest tier.
            let Some(tier) = pacer.tier(self.iterations) else {
                debug!(
                    placed = self.schedule.len(),
                    iterations = self.iterations,
                    "Hard cutoff reached, returning best-so-far schedule"
                );
                break;
            };

            let selection = match tier {
                ScoreTier::Exact => {
                    select_exact(self.batch, &self.pool, &self.corrupted, self.readers, pacer)
                }
                ScoreTier::Approximate => {
                    select_approximate(self.batch, &self.pool, &self.corrupted, pacer)
                }
                ScoreTier::Sampled => select_sampled(
                    self.batch,
                    &self.pool,
                    &self.corrupted,
                    config.sample_cap,
                    rng,
                    pacer,
                ),
            };

            let position = match selection {
                Selection::Chosen(position) => position,
                Selection::NoneEligible | Selection::Expired => break,
            };

            self.extend(position);
            self.prune(tier, config);
            self.iterations += 1;
        }

        self.schedule
    }

    /// Append the chosen transaction and absorb its writes.
    fn extend(&mut self, position: usize) {
        let tx = self.batch.get(position);
        self.schedule.push(tx.id);
        self.pool.retain(|&p| p != position);
        self.corrupted.absorb(&tx.profile);
    }

    /// Drop newly ineligible candidates from the pool.
    ///
    /// Skipped on most iterations under the sampled tier; selection
    /// re-checks eligibility, so skipping costs extra re-checks later but
    /// never correctness.
    fn prune(&mut self, tier: ScoreTier, config: &PlannerConfig) {
        if tier == ScoreTier::Sampled && self.iterations % config.prune_stride != 0 {
            return;
        }
        let batch = self.batch;
        let corrupted = &self.corrupted;
        self.pool.retain(|&p| eligible(batch.get(p), corrupted));
    }
}

/// Cheapest possible pass: visit candidates in the given order and take
/// every one still eligible. Used by multi-start exploration.
pub fn first_eligible_pass(batch: &Batch, order: &[usize]) -> Schedule {
    let mut corrupted = CorruptedCells::new();
    let mut schedule = Schedule::new();

    for &position in order {
        let tx = batch.get(position);
        if corrupted.allows(&tx.profile) {
            schedule.push(tx.id);
            corrupted.absorb(&tx.profile);
        }
    }

    schedule
}
