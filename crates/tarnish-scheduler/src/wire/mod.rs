//! Line-oriented text interface: parsing, rendering and the handler tying
//! them to the planner.

pub mod handler;
pub mod parser;
pub mod writer;

pub use handler::PlanTextHandler;
pub use parser::parse_batch;
pub use writer::render_schedule;
