//! Property tests: schedule validity, small-batch maximality and
//! exclusion accounting over randomized batches.

use proptest::prelude::*;
use tarnish_scheduler::algorithms::{exhaustive_longest, explore, GreedySequencer};
use tarnish_scheduler::domain::invariants::{
    classify_excluded, invariant_monotone_corruption, invariant_no_duplicates,
    invariant_no_stale_reads, ExclusionReason,
};
use tarnish_scheduler::{
    AccessProfile, AnytimeController, Batch, CellReaders, ManualClock, PlannerApi, PlannerConfig,
    Schedule, SchedulePlanner,
};
use tarnish_tests::reference_longest;

use std::sync::Arc;

/// Strategy: a batch of up to `max_n` transactions over a small cell
/// universe, so conflicts are frequent.
fn arb_batch(max_n: usize) -> impl Strategy<Value = Batch> {
    prop::collection::vec(
        (
            prop::collection::vec(1u64..=12, 0..4),
            prop::collection::vec(1u64..=12, 0..4),
        ),
        0..=max_n,
    )
    .prop_map(|pairs| {
        Batch::from_profiles(
            pairs
                .into_iter()
                .map(|(reads, writes)| {
                    AccessProfile::new()
                        .with_reads(reads)
                        .with_writes(writes)
                })
                .collect(),
        )
    })
}

/// Frozen-clock controller: never expires, so runs are exhaustive.
fn unhurried_controller(config: &PlannerConfig, n: usize) -> AnytimeController {
    AnytimeController::new(Arc::new(ManualClock::new()), config, n)
}

fn plan(batch: Batch) -> Schedule {
    let config = PlannerConfig {
        rng_seed: Some(99),
        ..Default::default()
    };
    let planner = SchedulePlanner::with_clock(config, Arc::new(ManualClock::new()));
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
        .block_on(planner.plan_schedule(batch))
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn planned_schedules_are_always_valid(batch in arb_batch(30)) {
        let schedule = plan(batch.clone());

        prop_assert!(invariant_no_stale_reads(&batch, &schedule));
        prop_assert!(invariant_no_duplicates(&schedule));
        prop_assert!(invariant_monotone_corruption(&batch, &schedule));
    }

    #[test]
    fn exhaustive_search_matches_the_reference_maximum(batch in arb_batch(6)) {
        let config = PlannerConfig::default();
        let mut controller = unhurried_controller(&config, batch.len());

        let (schedule, completed) = exhaustive_longest(&batch, &mut controller);

        prop_assert!(completed);
        prop_assert_eq!(schedule.len(), reference_longest(&batch));
        prop_assert!(invariant_no_stale_reads(&batch, &schedule));
    }

    #[test]
    fn greedy_never_beats_the_true_maximum(batch in arb_batch(8)) {
        let config = PlannerConfig {
            rng_seed: Some(3),
            ..Default::default()
        };
        let readers = CellReaders::build(&batch);
        let mut rng = config.rng();

        let mut controller = unhurried_controller(&config, batch.len());
        let greedy =
            GreedySequencer::new(&batch, &readers).run(&mut controller, &mut rng, &config);

        let mut brute_controller = unhurried_controller(&config, batch.len());
        let (best, completed) = exhaustive_longest(&batch, &mut brute_controller);

        prop_assert!(completed);
        prop_assert!(greedy.len() <= best.len());
        prop_assert!(invariant_no_stale_reads(&batch, &greedy));
    }

    #[test]
    fn unhurried_runs_leave_no_eligible_transaction_behind(batch in arb_batch(20)) {
        // With no deadline pressure every strategy runs until nothing is
        // eligible, so exclusion can only ever mean corrupted reads.
        let schedule = plan(batch.clone());

        for (_, reason) in classify_excluded(&batch, &schedule) {
            prop_assert_eq!(reason, ExclusionReason::ReadsCorrupted);
        }
    }

    #[test]
    fn exploration_only_improves_the_incumbent(batch in arb_batch(20)) {
        let config = PlannerConfig {
            rng_seed: Some(17),
            ..Default::default()
        };
        let readers = CellReaders::build(&batch);
        let mut rng = config.rng();

        let mut controller = unhurried_controller(&config, batch.len());
        let incumbent =
            GreedySequencer::new(&batch, &readers).run(&mut controller, &mut rng, &config);
        let incumbent_len = incumbent.len();

        let best = explore(&batch, incumbent, &mut controller, &mut rng, 0, 8);

        prop_assert!(best.len() >= incumbent_len);
        prop_assert!(invariant_no_stale_reads(&batch, &best));
    }
}
