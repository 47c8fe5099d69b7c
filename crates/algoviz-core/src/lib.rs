pub mod error;
pub mod id;
pub mod step;
pub mod trace;
pub mod value;

// Re-export commonly used types
pub use error::TraceError;
pub use id::{ProblemId, StepId};
pub use step::{Snapshot, Step, StepKind};
pub use trace::{StepBuilder, Trace, TraceConfig, TraceRecorder};
pub use value::Value;
