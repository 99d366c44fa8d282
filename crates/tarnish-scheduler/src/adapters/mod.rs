//! Adapters implementing the outbound ports.

pub mod clock;

pub use clock::{ManualClock, MonotonicClock};
