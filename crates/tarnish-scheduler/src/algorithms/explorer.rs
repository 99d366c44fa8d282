//! Multi-start exploration: cheap restarts under alternative orders.
//!
//! Every attempt is an independent first-eligible pass with its own
//! corrupted set and pool copy; attempts never share mutable state. The
//! incumbent schedule is kept unless an attempt strictly beats its length.

use crate::algorithms::sequencer::first_eligible_pass;
use crate::domain::entities::{Batch, Schedule};
use crate::ports::outbound::Pacer;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::debug;

/// Run restart attempts for as long as the remaining budget allows.
///
/// Deterministic visiting orders first, then up to `random_attempts`
/// seeded shuffles. Returns as soon as the remaining budget falls under
/// `safety_margin_ms`.
pub fn explore(
    batch: &Batch,
    incumbent: Schedule,
    pacer: &mut dyn Pacer,
    rng: &mut StdRng,
    safety_margin_ms: u64,
    random_attempts: usize,
) -> Schedule {
    let mut best = incumbent;
    if batch.is_empty() {
        return best;
    }

    let mut attempts = 0usize;
    for order in deterministic_orders(batch) {
        if pacer.remaining_ms() < safety_margin_ms {
            debug!(attempts, best_len = best.len(), "Exploration budget spent");
            return best;
        }
        attempts += 1;
        let candidate = first_eligible_pass(batch, &order);
        if candidate.len() > best.len() {
            best = candidate;
        }
    }

    let mut order: Vec<usize> = (0..batch.len()).collect();
    for _ in 0..random_attempts {
        if pacer.remaining_ms() < safety_margin_ms {
            break;
        }
        attempts += 1;
        order.shuffle(rng);
        let candidate = first_eligible_pass(batch, &order);
        if candidate.len() > best.len() {
            best = candidate;
        }
    }

    debug!(attempts, best_len = best.len(), "Exploration finished");
    best
}

/// Fixed visiting orders, cheapest-to-corrupt first.
fn deterministic_orders(batch: &Batch) -> Vec<Vec<usize>> {
    let n = batch.len();
    let input: Vec<usize> = (0..n).collect();

    let mut by_write_size = input.clone();
    by_write_size.sort_by_key(|&p| (batch.get(p).profile.writes.len(), p));

    // Descending read/write ratio via cross-multiplication; the +1 keeps
    // write-free transactions comparable.
    let mut by_read_write_ratio = input.clone();
    by_read_write_ratio.sort_by(|&a, &b| {
        let (ra, wa) = side_counts(batch, a);
        let (rb, wb) = side_counts(batch, b);
        (rb * wa).cmp(&(ra * wb)).then(a.cmp(&b))
    });

    let mut by_footprint = input.clone();
    by_footprint.sort_by_key(|&p| (batch.get(p).profile.footprint(), p));

    let reversed: Vec<usize> = input.iter().rev().copied().collect();

    vec![by_write_size, by_read_write_ratio, by_footprint, input, reversed]
}

fn side_counts(batch: &Batch, position: usize) -> (u64, u64) {
    let profile = &batch.get(position).profile;
    (profile.reads.len() as u64 + 1, profile.writes.len() as u64 + 1)
}
