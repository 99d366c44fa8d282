//! Conflict model: eligibility and write impact.
//!
//! Pure set operations with no failure modes. Corruption is monotone, so a
//! transaction that loses eligibility can never regain it within a run.

use crate::domain::entities::{Batch, CellReaders, CorruptedCells, Transaction};
use std::collections::HashSet;

/// True iff the transaction reads no corrupted cell.
///
/// A transaction with an empty write set never corrupts anything and stays
/// eligible for as long as its own reads are clean.
pub fn eligible(tx: &Transaction, corrupted: &CorruptedCells) -> bool {
    corrupted.allows(&tx.profile)
}

/// Positions of transactions (other than `position`) reading at least one
/// cell the transaction at `position` writes.
///
/// This is the set of peers that would become permanently ineligible if the
/// transaction ran, and serves as the opportunity-cost proxy for the
/// impact-scoring tier.
pub fn impact(position: usize, batch: &Batch, readers: &CellReaders) -> HashSet<usize> {
    let mut hit = HashSet::new();
    for &cell in &batch.get(position).profile.writes {
        for &reader in readers.readers_of(cell) {
            if reader != position {
                hit.insert(reader);
            }
        }
    }
    hit
}
