//! Text handler: raw input text in, raw schedule text out.
//!
//! The outer edge of the subsystem. Decodes the batch, delegates to the
//! planning service and renders the response, measuring elapsed time for
//! observability.

use crate::application::service::SchedulePlanner;
use crate::domain::errors::PlanError;
use crate::ports::inbound::PlannerApi;
use crate::wire::parser::parse_batch;
use crate::wire::writer::render_schedule;
use std::time::Instant;
use tracing::{error, info};

pub struct PlanTextHandler {
    planner: SchedulePlanner,
}

impl PlanTextHandler {
    pub fn new(planner: SchedulePlanner) -> Self {
        Self { planner }
    }

    /// Handle one batch request end to end.
    pub async fn handle(&self, input: &str) -> Result<String, PlanError> {
        let started = Instant::now();

        let batch = parse_batch(input)?;
        let tx_count = batch.len();

        match self.planner.plan_schedule(batch).await {
            Ok(schedule) => {
                info!(
                    tx_count,
                    schedule_len = schedule.len(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Planned schedule"
                );
                Ok(render_schedule(&schedule))
            }
            Err(e) => {
                error!(tx_count, "Planning failed: {e}");
                Err(e)
            }
        }
    }
}

impl Default for PlanTextHandler {
    fn default() -> Self {
        Self::new(SchedulePlanner::new())
    }
}
