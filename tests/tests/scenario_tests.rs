//! End-to-end scenarios through the wire parser, the planner and the
//! renderer.

use tarnish_scheduler::domain::invariants::{
    classify_excluded, invariant_no_duplicates, invariant_no_stale_reads, ExclusionReason,
};
use tarnish_scheduler::{
    parse_batch, PlanError, PlanTextHandler, PlannerApi, PlannerConfig, SchedulePlanner,
};
use tarnish_tests::batch_of;

fn handler() -> PlanTextHandler {
    PlanTextHandler::new(SchedulePlanner::with_config(PlannerConfig {
        rng_seed: Some(1),
        ..Default::default()
    }))
}

#[tokio::test]
async fn ring_of_three_keeps_two() {
    // 1 reads {1} writes {2}; 2 reads {2} writes {3}; 3 reads {3} writes {1}.
    let input = "3 3\n1 1\n1\n2\n1 1\n2\n3\n1 1\n3\n1\n";

    let output = handler().handle(input).await.unwrap();

    let mut lines = output.lines();
    assert_eq!(lines.next(), Some("2"));

    let ids: Vec<u32> = lines
        .next()
        .unwrap()
        .split_whitespace()
        .map(|t| t.parse().unwrap())
        .collect();
    let batch = parse_batch(input).unwrap();
    let schedule = tarnish_scheduler::Schedule::from_order(ids);
    assert!(invariant_no_stale_reads(&batch, &schedule));
}

#[tokio::test]
async fn single_transaction_with_empty_sets() {
    let output = handler().handle("1 1\n0 0\n\n\n").await.unwrap();
    assert_eq!(output, "1\n1\n");
}

#[tokio::test]
async fn fully_disjoint_batch_schedules_everything() {
    let mut input = String::from("4 100\n");
    for i in 0..4u64 {
        input.push_str(&format!("1 1\n{}\n{}\n", i * 2 + 1, i * 2 + 2));
    }

    let output = handler().handle(&input).await.unwrap();

    let mut lines = output.lines();
    assert_eq!(lines.next(), Some("4"));
    let mut ids: Vec<u32> = lines
        .next()
        .unwrap()
        .split_whitespace()
        .map(|t| t.parse().unwrap())
        .collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn poison_writer_is_dropped_when_exclusion_wins() {
    // Transaction 1 writes the cell every peer reads and reads a cell
    // every peer writes: using it caps the schedule at one, so the best
    // plan drops it and keeps the other four.
    let planner = SchedulePlanner::new();
    let batch = batch_of(vec![
        (vec![50], vec![7]),
        (vec![7], vec![50, 100]),
        (vec![7], vec![50, 101]),
        (vec![7], vec![50, 102]),
        (vec![7], vec![50, 103]),
    ]);

    let schedule = planner.plan_schedule(batch.clone()).await.unwrap();

    assert_eq!(schedule.len(), 4);
    assert!(!schedule.contains(1));
    assert_eq!(
        classify_excluded(&batch, &schedule),
        vec![(1, ExclusionReason::ReadsCorrupted)]
    );
}

#[tokio::test]
async fn harmless_poison_writer_goes_last() {
    // When the heavy writer reads nothing it can close the schedule, so
    // the full batch fits with the writer in final position.
    let planner = SchedulePlanner::new();
    let batch = batch_of(vec![
        (vec![], vec![7]),
        (vec![7], vec![100]),
        (vec![7], vec![101]),
        (vec![7], vec![102]),
    ]);

    let schedule = planner.plan_schedule(batch.clone()).await.unwrap();

    assert_eq!(schedule.len(), 4);
    assert_eq!(schedule.order().last(), Some(&1));
    assert!(invariant_no_stale_reads(&batch, &schedule));
    assert!(invariant_no_duplicates(&schedule));
}

#[tokio::test]
async fn empty_batch_renders_empty_schedule() {
    let output = handler().handle("0 5\n").await.unwrap();
    assert_eq!(output, "0\n\n");
}

#[tokio::test]
async fn malformed_input_is_rejected() {
    let result = handler().handle("2 2\n1 1\n3\n").await;
    assert!(matches!(result, Err(PlanError::Wire(_))));
}
