//! Error types for schedule planning.
//!
//! Budget exhaustion is deliberately absent: running out of time yields a
//! valid, possibly shorter, schedule rather than an error.

use thiserror::Error;

/// Errors surfaced by the planning service.
#[derive(Debug, Error)]
pub enum PlanError {
    /// Batch size exceeded limits (anti-DoS bound).
    #[error("Batch size exceeded: {size} > {max}")]
    BatchTooLarge { size: usize, max: usize },

    /// Malformed input text.
    #[error(transparent)]
    Wire(#[from] WireError),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Errors produced while decoding the line-oriented input text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WireError {
    /// Input ended before all declared transactions were read.
    #[error("Unexpected end of input at line {line}")]
    UnexpectedEof { line: usize },

    /// A field could not be parsed as an integer.
    #[error("Malformed integer {token:?} at line {line}")]
    InvalidInteger { token: String, line: usize },

    /// A line carried a different number of fields than its header declared.
    #[error("Expected {expected} fields at line {line}, found {found}")]
    FieldCountMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },
}
