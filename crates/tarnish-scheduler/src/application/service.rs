//! Schedule planning service.
//!
//! Orchestrates one planning run:
//! 1. Validate input
//! 2. Classify the batch and build the reader index
//! 3. Exhaustive search (small) or tiered greedy sequencing
//! 4. Spend leftover budget on multi-start exploration
//! 5. Return the longest schedule seen

use crate::algorithms::{exhaustive_longest, explore, GreedySequencer};
use crate::application::anytime::AnytimeController;
use crate::adapters::clock::MonotonicClock;
use crate::config::PlannerConfig;
use crate::domain::entities::{Batch, CellReaders, Schedule};
use crate::domain::errors::PlanError;
use crate::domain::value_objects::SizeClass;
use crate::ports::inbound::PlannerApi;
use crate::ports::outbound::{Clock, Pacer};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Schedule planner.
pub struct SchedulePlanner {
    config: PlannerConfig,
    clock: Arc<dyn Clock>,
}

impl SchedulePlanner {
    /// Create a planner with default config and the system clock.
    pub fn new() -> Self {
        Self::with_config(PlannerConfig::default())
    }

    /// Create a planner with custom config and the system clock.
    pub fn with_config(config: PlannerConfig) -> Self {
        Self {
            config,
            clock: Arc::new(MonotonicClock::new()),
        }
    }

    /// Create a planner with an injected clock. The controller measures
    /// elapsed time from the moment a run starts, so one clock can serve
    /// many runs.
    pub fn with_clock(config: PlannerConfig, clock: Arc<dyn Clock>) -> Self {
        Self { config, clock }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    fn validate_batch(&self, batch: &Batch) -> Result<(), PlanError> {
        if batch.len() > self.config.max_batch_size {
            return Err(PlanError::BatchTooLarge {
                size: batch.len(),
                max: self.config.max_batch_size,
            });
        }
        Ok(())
    }
}

impl Default for SchedulePlanner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlannerApi for SchedulePlanner {
    async fn plan_schedule(&self, batch: Batch) -> Result<Schedule, PlanError> {
        self.validate_batch(&batch)?;

        if batch.is_empty() {
            return Ok(Schedule::new());
        }

        let class = self.config.size_class(batch.len());
        info!(
            tx_count = batch.len(),
            ?class,
            budget_ms = self.config.budget_ms,
            "Planning transaction schedule"
        );

        let mut controller = AnytimeController::new(self.clock.clone(), &self.config, batch.len());
        let mut rng = self.config.rng();
        let mut best = Schedule::new();

        if class == SizeClass::Huge {
            // Even one pass of the cheapest tier may overrun; restart
            // exploration alone fits the budget.
            best = explore(
                &batch,
                best,
                &mut controller,
                &mut rng,
                self.config.explorer_safety_margin_ms,
                self.config.huge_random_attempts,
            );
            info!(schedule_len = best.len(), "Planning complete (exploration only)");
            return Ok(best);
        }

        if class == SizeClass::Small {
            let (found, completed) = exhaustive_longest(&batch, &mut controller);
            if completed {
                debug!(schedule_len = found.len(), "Exhaustive search completed");
                return Ok(found);
            }
            warn!(
                best_so_far = found.len(),
                "Exhaustive search hit the deadline, continuing with heuristics"
            );
            best = found;
        }

        let readers = CellReaders::build(&batch);
        let sequenced =
            GreedySequencer::new(&batch, &readers).run(&mut controller, &mut rng, &self.config);
        debug!(
            schedule_len = sequenced.len(),
            tier = ?controller.active_tier(),
            "Tiered sequencing finished"
        );
        if sequenced.len() > best.len() {
            best = sequenced;
        }

        best = explore(
            &batch,
            best,
            &mut controller,
            &mut rng,
            self.config.explorer_safety_margin_ms,
            self.config.max_random_attempts,
        );

        info!(
            schedule_len = best.len(),
            remaining_ms = controller.remaining_ms(),
            "Planning complete"
        );
        Ok(best)
    }

    fn classify_batch(&self, transaction_count: usize) -> SizeClass {
        self.config.size_class(transaction_count)
    }
}
