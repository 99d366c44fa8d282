//! Domain invariants for planned schedules.
//!
//! These checks replay a schedule against its batch and are used by unit,
//! property and integration tests alike.

use super::entities::{Batch, CorruptedCells, Schedule};
use super::value_objects::TxId;

/// INVARIANT-1: No stale reads.
/// Every scheduled transaction's reads are disjoint from the union of
/// writes of all transactions placed strictly before it.
pub fn invariant_no_stale_reads(batch: &Batch, schedule: &Schedule) -> bool {
    let mut corrupted = CorruptedCells::new();

    for &id in schedule.order() {
        let Some(tx) = lookup(batch, id) else {
            return false;
        };
        if !corrupted.allows(&tx.profile) {
            return false;
        }
        corrupted.absorb(&tx.profile);
    }

    true
}

/// INVARIANT-2: Each transaction appears at most once.
pub fn invariant_no_duplicates(schedule: &Schedule) -> bool {
    let mut seen = std::collections::HashSet::new();
    schedule.order().iter().all(|id| seen.insert(*id))
}

/// INVARIANT-3: Monotone corruption.
/// Replaying the schedule never shrinks the corrupted set.
pub fn invariant_monotone_corruption(batch: &Batch, schedule: &Schedule) -> bool {
    let mut corrupted = CorruptedCells::new();
    let mut previous = 0;

    for &id in schedule.order() {
        let Some(tx) = lookup(batch, id) else {
            return false;
        };
        corrupted.absorb(&tx.profile);
        if corrupted.len() < previous {
            return false;
        }
        previous = corrupted.len();
    }

    true
}

fn lookup(batch: &Batch, id: TxId) -> Option<&crate::domain::entities::Transaction> {
    (id as usize)
        .checked_sub(1)
        .and_then(|position| batch.transactions.get(position))
}

/// Why a transaction was left out of the final schedule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExclusionReason {
    /// Reads a cell corrupted by the schedule; could never be appended.
    ReadsCorrupted,
    /// Still eligible against the final corrupted set; excluded only by
    /// the heuristic's choices, not by invalidity.
    HeuristicSkip,
}

/// Classify every transaction absent from the schedule against the final
/// corrupted set. Each excluded transaction has exactly one reason.
pub fn classify_excluded(batch: &Batch, schedule: &Schedule) -> Vec<(TxId, ExclusionReason)> {
    let mut corrupted = CorruptedCells::new();
    for &id in schedule.order() {
        if let Some(tx) = lookup(batch, id) {
            corrupted.absorb(&tx.profile);
        }
    }

    batch
        .transactions
        .iter()
        .filter(|tx| !schedule.contains(tx.id))
        .map(|tx| {
            let reason = if corrupted.allows(&tx.profile) {
                ExclusionReason::HeuristicSkip
            } else {
                ExclusionReason::ReadsCorrupted
            };
            (tx.id, reason)
        })
        .collect()
}
