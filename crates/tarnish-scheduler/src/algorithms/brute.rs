//! Exhaustive branch-and-bound search for small batches.
//!
//! Corruption is monotone, so any transaction placed later in an ordering
//! must already be eligible now. That makes `placed + currently eligible`
//! an admissible upper bound and lets the search discard whole subtrees
//! without visiting them.

use crate::domain::entities::{Batch, Schedule};
use crate::domain::value_objects::CellId;
use crate::ports::outbound::Pacer;
use std::collections::HashSet;

struct SearchState<'a> {
    batch: &'a Batch,
    used: Vec<bool>,
    corrupted: HashSet<CellId>,
    current: Vec<usize>,
    best: Vec<usize>,
    nodes: u64,
    aborted: bool,
}

/// Find the longest schedule by exhaustive search.
///
/// Returns the best ordering found and whether the search ran to
/// completion. On `true` the result is the true maximum; on `false` the
/// deadline fired and the result is only the best seen, suitable as a seed
/// for the heuristic passes.
pub fn exhaustive_longest(batch: &Batch, pacer: &mut dyn Pacer) -> (Schedule, bool) {
    let mut state = SearchState {
        batch,
        used: vec![false; batch.len()],
        corrupted: HashSet::new(),
        current: Vec::new(),
        best: Vec::new(),
        nodes: 0,
        aborted: false,
    };

    descend(&mut state, pacer);

    let order = state
        .best
        .iter()
        .map(|&p| batch.get(p).id)
        .collect::<Vec<_>>();
    (Schedule::from_order(order), !state.aborted)
}

fn descend(state: &mut SearchState<'_>, pacer: &mut dyn Pacer) {
    if state.aborted {
        return;
    }
    state.nodes += 1;
    if pacer.expired_mid_scan(state.nodes) {
        state.aborted = true;
        return;
    }

    if state.current.len() > state.best.len() {
        state.best = state.current.clone();
    }

    let batch = state.batch;
    let eligible: Vec<usize> = (0..batch.len())
        .filter(|&p| !state.used[p] && batch.get(p).profile.reads.is_disjoint(&state.corrupted))
        .collect();

    // No extension of this prefix can beat the incumbent.
    if state.current.len() + eligible.len() <= state.best.len() {
        return;
    }

    for position in eligible {
        let profile = &batch.get(position).profile;

        state.used[position] = true;
        state.current.push(position);
        let added: Vec<CellId> = profile
            .writes
            .iter()
            .copied()
            .filter(|cell| state.corrupted.insert(*cell))
            .collect();

        descend(state, pacer);

        for cell in added {
            state.corrupted.remove(&cell);
        }
        state.current.pop();
        state.used[position] = false;

        if state.aborted {
            return;
        }
    }
}
