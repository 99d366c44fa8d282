//! Inbound ports (driving ports / API).

use crate::domain::entities::{Batch, Schedule};
use crate::domain::errors::PlanError;
use crate::domain::value_objects::SizeClass;
use async_trait::async_trait;

/// Primary planning API.
#[async_trait]
pub trait PlannerApi: Send + Sync {
    /// Plan the longest schedule found within the wall-clock budget.
    ///
    /// This is the main entry point. It:
    /// 1. Validates the batch against the size bound
    /// 2. Classifies the batch and picks a search strategy
    /// 3. Runs the tiered greedy sequencer under the anytime controller
    /// 4. Spends any remaining budget on multi-start exploration
    ///
    /// Budget exhaustion is not an error: the result is always a valid
    /// schedule, merely shorter when time ran out.
    async fn plan_schedule(&self, batch: Batch) -> Result<Schedule, PlanError>;

    /// Size class a batch of this many transactions falls into.
    fn classify_batch(&self, transaction_count: usize) -> SizeClass;
}
