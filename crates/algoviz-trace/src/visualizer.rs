//! The capability set every algorithm visualizer implements.
//!
//! [`Algorithm`] is the typed side: each problem declares its own input type,
//! parses a [`RawInput`] into it, and runs its generator. [`Visualizer`] is
//! the object-safe view the registry hands out; a blanket impl covers every
//! `Algorithm`, so the two can never drift apart.

use algoviz_core::{ProblemId, Trace, TraceConfig, TraceError};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use thiserror::Error;

use crate::input::{InputError, RawInput};

/// Algorithm family, used to group the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    TwoPointers,
    BinarySearch,
    Stack,
    Backtracking,
    DynamicProgramming,
    Heap,
    Matrix,
    Sorting,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::TwoPointers => "Two Pointers",
            Category::BinarySearch => "Binary Search",
            Category::Stack => "Stack",
            Category::Backtracking => "Backtracking",
            Category::DynamicProgramming => "Dynamic Programming",
            Category::Heap => "Heap",
            Category::Matrix => "Matrix",
            Category::Sorting => "Sorting",
        }
    }
}

/// How a form field should be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Int,
    IntList,
    Text,
    Matrix,
}

/// Describes one input field of a visualizer's form.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    /// Example value shown in an empty field.
    pub placeholder: &'static str,
}

/// Static metadata for one visualizer.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AlgorithmInfo {
    pub id: ProblemId,
    pub title: &'static str,
    pub category: Category,
    pub summary: &'static str,
    pub fields: &'static [FieldSpec],
}

/// A named example input shipped with a visualizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    pub name: &'static str,
    pub input: RawInput,
}

impl TestCase {
    pub fn new(name: &'static str, input: RawInput) -> Self {
        TestCase { name, input }
    }
}

/// Why a visualizer could not produce a trace.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VisualizeError {
    /// The user's input was rejected before generation.
    #[error("invalid input: {0}")]
    Input(#[from] InputError),

    /// The generator itself failed.
    #[error("trace generation failed: {0}")]
    Trace(#[from] TraceError),
}

/// Typed capability set of one algorithm.
pub trait Algorithm: Send + Sync + 'static {
    /// Validated input accepted by the generator.
    type Input;

    fn info(&self) -> &'static AlgorithmInfo;

    /// Example inputs, each of which parses successfully.
    fn test_cases(&self) -> Vec<TestCase>;

    /// Validates raw form input. This is the only place input is rejected.
    fn parse(&self, raw: &RawInput) -> Result<Self::Input, InputError>;

    /// Runs the trace generator on validated input.
    fn run(&self, input: &Self::Input, config: &TraceConfig) -> Result<Trace, TraceError>;

    /// A random valid input drawn from `rng`.
    fn random_input(&self, rng: &mut ChaCha8Rng) -> RawInput;
}

/// Object-safe view of an [`Algorithm`], as handed out by the registry.
pub trait Visualizer: Send + Sync {
    fn info(&self) -> &'static AlgorithmInfo;

    fn test_cases(&self) -> Vec<TestCase>;

    /// Checks raw input without generating a trace (form feedback).
    fn validate(&self, raw: &RawInput) -> Result<(), InputError>;

    /// Validates and generates in one call.
    fn generate(&self, raw: &RawInput, config: &TraceConfig) -> Result<Trace, VisualizeError>;

    fn random_input(&self, rng: &mut ChaCha8Rng) -> RawInput;
}

impl<A: Algorithm> Visualizer for A {
    fn info(&self) -> &'static AlgorithmInfo {
        Algorithm::info(self)
    }

    fn test_cases(&self) -> Vec<TestCase> {
        Algorithm::test_cases(self)
    }

    fn validate(&self, raw: &RawInput) -> Result<(), InputError> {
        self.parse(raw).map(|_| ())
    }

    fn generate(&self, raw: &RawInput, config: &TraceConfig) -> Result<Trace, VisualizeError> {
        let input = self.parse(raw)?;
        Ok(self.run(&input, config)?)
    }

    fn random_input(&self, rng: &mut ChaCha8Rng) -> RawInput {
        Algorithm::random_input(self, rng)
    }
}
