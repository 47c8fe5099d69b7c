//! The unit of a trace: one inspectable snapshot of algorithm state.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::id::StepId;
use crate::value::Value;

/// Named values captured into a step, in insertion order.
pub type Snapshot = IndexMap<String, Value>;

/// What kind of transition a step represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    /// Initial state before the algorithm does any work. Always first.
    Init,
    /// An ordinary state transition (compare, swap, push, fill a cell).
    Transition,
    /// Entry into a recursive frame.
    Enter,
    /// Exit from a recursive frame (return or backtrack).
    Return,
    /// The completed or early-terminated result. Always last.
    Terminal,
}

/// One discrete, inspectable step of a trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    /// Sequence number, equal to this step's index in the trace.
    pub id: StepId,
    pub kind: StepKind,
    /// Narration of this transition.
    pub description: String,
    /// Structure snapshots (arrays, matrices, stacks, result lists).
    pub data: Snapshot,
    /// Highlighted scalar or aggregate values (pointers, sums, flags).
    pub variables: Snapshot,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub highlighted_indices: Vec<usize>,
    /// (row, col) positions for matrix visualizers.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub highlighted_cells: Vec<(usize, usize)>,
}

impl Step {
    /// Looks up a variable by name.
    pub fn var(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    /// Looks up a data snapshot by name.
    pub fn datum(&self, name: &str) -> Option<&Value> {
        self.data.get(name)
    }
}
