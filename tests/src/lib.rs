//! Shared helpers for the Tarnish test suite.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tarnish_scheduler::{AccessProfile, Batch};

/// Build a batch from `(reads, writes)` pairs in input order.
pub fn batch_of(profiles: Vec<(Vec<u64>, Vec<u64>)>) -> Batch {
    Batch::from_profiles(
        profiles
            .into_iter()
            .map(|(reads, writes)| {
                AccessProfile::new()
                    .with_reads(reads)
                    .with_writes(writes)
            })
            .collect(),
    )
}

/// Deterministic random batch: `n` transactions over `cells` distinct
/// cells, with up to `max_set` reads and writes each.
pub fn random_batch(seed: u64, n: usize, cells: u64, max_set: usize) -> Batch {
    let mut rng = StdRng::seed_from_u64(seed);
    let profiles = (0..n)
        .map(|_| {
            let reads = (0..rng.gen_range(0..=max_set))
                .map(|_| rng.gen_range(1..=cells))
                .collect();
            let writes = (0..rng.gen_range(0..=max_set))
                .map(|_| rng.gen_range(1..=cells))
                .collect();
            (reads, writes)
        })
        .collect();
    batch_of(profiles)
}

/// Longest schedule length by unpruned recursive enumeration. Only usable
/// for tiny batches; serves as an independent reference for the search.
pub fn reference_longest(batch: &Batch) -> usize {
    fn walk(batch: &Batch, used: &mut Vec<bool>, corrupted: &mut Vec<u64>) -> usize {
        let mut best = 0;
        for p in 0..batch.len() {
            if used[p] {
                continue;
            }
            let profile = &batch.get(p).profile;
            if profile.reads.iter().any(|c| corrupted.contains(c)) {
                continue;
            }

            used[p] = true;
            let added: Vec<u64> = profile
                .writes
                .iter()
                .copied()
                .filter(|c| !corrupted.contains(c))
                .collect();
            corrupted.extend(added.iter().copied());

            best = best.max(1 + walk(batch, used, corrupted));

            corrupted.retain(|c| !added.contains(c));
            used[p] = false;
        }
        best
    }

    let mut used = vec![false; batch.len()];
    let mut corrupted = Vec::new();
    walk(batch, &mut used, &mut corrupted)
}
