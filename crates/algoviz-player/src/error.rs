use algoviz_core::ProblemId;
use algoviz_trace::InputError;
use thiserror::Error;

/// Errors from [`Session`](crate::Session) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("no visualizer is registered for problem {id}")]
    UnknownProblem { id: ProblemId },

    #[error("test case {index} does not exist ({count} available)")]
    NoSuchTestCase { index: usize, count: usize },

    #[error(transparent)]
    Input(#[from] InputError),
}

/// Errors from talking to a running player task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlayerError {
    /// The player task has stopped.
    #[error("player task is no longer running")]
    Closed,

    /// The player task panicked; its playback is lost.
    #[error("player task panicked")]
    Panicked,
}
