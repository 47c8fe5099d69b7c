//! Trace generators for algorithm walkthroughs.
//!
//! Each generator is a pure function from a typed input to a [`Trace`]: an
//! ordered list of steps, each a snapshot of the algorithm's state at one
//! transition. Around the generators sit the pieces a front end needs to
//! drive them:
//!
//! - [`input`]: form-style [`RawInput`] and the parsers that validate it.
//! - [`visualizer`]: the typed [`Algorithm`] capability set and its
//!   object-safe [`Visualizer`] view.
//! - [`registry`]: explicit `ProblemId -> factory` lookup table.
//! - [`random`]: seeded random inputs for "shuffle" buttons and tests.
//! - [`generators`]: one module per algorithm family.
//!
//! [`Trace`]: algoviz_core::Trace

pub mod generators;
pub mod input;
pub mod random;
pub mod registry;
pub mod visualizer;

pub use input::{InputError, RawInput};
pub use registry::{Registry, RegistryError};
pub use visualizer::{
    Algorithm, AlgorithmInfo, Category, FieldKind, FieldSpec, TestCase, VisualizeError, Visualizer,
};
