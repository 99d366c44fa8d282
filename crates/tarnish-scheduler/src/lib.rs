//! # Tarnish Scheduler
//!
//! Anytime transaction-ordering planner. Given a batch of transactions,
//! each declaring the storage cells it reads and writes, plan the longest
//! schedule in which no transaction reads a cell already written by an
//! earlier one (writes tarnish cells for every later reader).
//!
//! ## Architecture
//!
//! - **Domain**: Core entities (Transaction, Batch, CorruptedCells,
//!   Schedule) and the schedule invariants
//! - **Algorithms**: Exhaustive search, tiered greedy sequencing, scoring
//!   rules, multi-start exploration
//! - **Ports**: Inbound (PlannerApi) and outbound (Clock, Pacer)
//! - **Application**: Anytime controller and service orchestration
//! - **Wire**: Line-oriented text interface
//!
//! ## Anytime behavior
//!
//! A run carries a wall-clock budget. As time runs out the controller
//! forces ever-cheaper scoring tiers and finally a hard stop; whatever
//! prefix was built by then is still a valid schedule.

pub mod adapters;
pub mod algorithms;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod wire;

pub use adapters::clock::{ManualClock, MonotonicClock};
pub use application::anytime::AnytimeController;
pub use application::service::SchedulePlanner;
pub use config::PlannerConfig;
pub use domain::entities::*;
pub use domain::errors::{PlanError, WireError};
pub use domain::value_objects::*;
pub use ports::inbound::PlannerApi;
pub use ports::outbound::{Clock, Pacer};
pub use wire::{parse_batch, render_schedule, PlanTextHandler};
