//! Heuristic scorers: interchangeable ranking rules for the sequencer.
//!
//! All scorers rank eligible candidates under a total order and selection
//! picks the maximum; ties go to the lowest transaction id, so a run under
//! a fixed tier and seed is reproducible.

use crate::algorithms::conflict::{eligible, impact};
use crate::domain::entities::{Batch, CellReaders, CorruptedCells};
use crate::ports::outbound::Pacer;
use rand::rngs::StdRng;
use std::collections::HashSet;

/// Outcome of one selection step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    /// Best eligible candidate position.
    Chosen(usize),
    /// No candidate in the pool is eligible.
    NoneEligible,
    /// The deadline fired mid-scan; stop with the schedule built so far.
    Expired,
}

/// Impact-aware ranking over the whole pool.
///
/// Maximises `(-|impact ∩ pool|, |reads not yet corrupted|)`: prefer the
/// candidate that invalidates the fewest still-available peers, then the
/// one that spends more of its own reads.
pub fn select_exact(
    batch: &Batch,
    pool: &[usize],
    corrupted: &CorruptedCells,
    readers: &CellReaders,
    pacer: &mut dyn Pacer,
) -> Selection {
    let pool_set: HashSet<usize> = pool.iter().copied().collect();
    let mut best: Option<((i64, i64), usize)> = None;
    let mut scanned: u64 = 0;

    for &position in pool {
        scanned += 1;
        if pacer.expired_mid_scan(scanned) {
            return Selection::Expired;
        }

        let tx = batch.get(position);
        if !eligible(tx, corrupted) {
            continue;
        }

        let hit = impact(position, batch, readers)
            .intersection(&pool_set)
            .count();
        let score = (
            -(hit as i64),
            corrupted.clean_reads(&tx.profile) as i64,
        );

        if best.map_or(true, |(s, _)| score > s) {
            best = Some((score, position));
        }
    }

    match best {
        Some((_, position)) => Selection::Chosen(position),
        None => Selection::NoneEligible,
    }
}

/// Ranking by the candidate's own sets only.
///
/// Maximises `(|reads not yet corrupted|, -|writes on clean cells|)`:
/// cheaper than impact scoring because no cross-transaction state is
/// consulted.
pub fn select_approximate(
    batch: &Batch,
    pool: &[usize],
    corrupted: &CorruptedCells,
    pacer: &mut dyn Pacer,
) -> Selection {
    let mut best: Option<((i64, i64), usize)> = None;
    let mut scanned: u64 = 0;

    for &position in pool {
        scanned += 1;
        if pacer.expired_mid_scan(scanned) {
            return Selection::Expired;
        }

        let tx = batch.get(position);
        if !eligible(tx, corrupted) {
            continue;
        }

        let score = (
            corrupted.clean_reads(&tx.profile) as i64,
            -(corrupted.fresh_writes(&tx.profile) as i64),
        );

        if best.map_or(true, |(s, _)| score > s) {
            best = Some((score, position));
        }
    }

    match best {
        Some((_, position)) => Selection::Chosen(position),
        None => Selection::NoneEligible,
    }
}

/// Minimal-write ranking over a bounded random sample of the pool.
///
/// O(sample) per step instead of O(pool). When the sample holds no eligible
/// candidate but the pool might, falls back to the first eligible candidate
/// found by a linear scan so progress is never lost to sampling luck.
pub fn select_sampled(
    batch: &Batch,
    pool: &[usize],
    corrupted: &CorruptedCells,
    sample_cap: usize,
    rng: &mut StdRng,
    pacer: &mut dyn Pacer,
) -> Selection {
    if pool.is_empty() {
        return Selection::NoneEligible;
    }

    let k = sample_cap.min(pool.len());
    let mut sampled: Vec<usize> = rand::seq::index::sample(rng, pool.len(), k)
        .into_iter()
        .map(|i| pool[i])
        .collect();
    sampled.sort_unstable();

    let mut best: Option<(usize, usize)> = None;
    for &position in &sampled {
        let tx = batch.get(position);
        if !eligible(tx, corrupted) {
            continue;
        }
        let writes = tx.profile.writes.len();
        if best.map_or(true, |(w, _)| writes < w) {
            best = Some((writes, position));
        }
    }

    if let Some((_, position)) = best {
        return Selection::Chosen(position);
    }
    if k == pool.len() {
        return Selection::NoneEligible;
    }

    // Unlucky sample; take whatever is eligible rather than stopping early.
    let mut scanned: u64 = 0;
    for &position in pool {
        scanned += 1;
        if pacer.expired_mid_scan(scanned) {
            return Selection::Expired;
        }
        if eligible(batch.get(position), corrupted) {
            return Selection::Chosen(position);
        }
    }
    Selection::NoneEligible
}
