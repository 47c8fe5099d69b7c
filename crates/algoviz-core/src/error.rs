//! Error types for trace generation.
//!
//! Uses `thiserror` for structured, matchable variants. Generators only fail
//! on resource limits or arithmetic overflow; malformed user input is rejected
//! before a generator ever runs.

use thiserror::Error;

/// Errors produced while recording a trace.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraceError {
    /// The generator tried to emit more steps than the configured limit.
    #[error("trace exceeded the limit of {limit} steps")]
    StepLimitExceeded { limit: usize },

    /// A checked arithmetic operation overflowed.
    #[error("arithmetic overflow while {context}")]
    Overflow { context: String },

    /// The finished trace does not start with an init step or end with a
    /// terminal step.
    #[error("malformed trace: {reason}")]
    Malformed { reason: String },
}

impl TraceError {
    pub fn overflow(context: impl Into<String>) -> Self {
        TraceError::Overflow {
            context: context.into(),
        }
    }
}
