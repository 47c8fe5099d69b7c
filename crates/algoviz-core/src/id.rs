//! Stable ID newtypes for visualizers and trace steps.
//!
//! Both IDs are distinct newtype wrappers over `u32`, so a `StepId` cannot be
//! accidentally used where a `ProblemId` is expected.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Numeric problem identifier used to look up a visualizer in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProblemId(pub u32);

/// Sequence number of a step within one trace. Equal to the step's index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepId(pub u32);

// Display implementations -- just print the inner value.

impl fmt::Display for ProblemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StepId {
    /// Position of the step inside its trace.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn problem_id_display() {
        assert_eq!(format!("{}", ProblemId(283)), "283");
    }

    #[test]
    fn step_id_index() {
        assert_eq!(StepId(7).index(), 7);
    }

    #[test]
    fn problem_ids_order_numerically() {
        let mut ids = vec![ProblemId(283), ProblemId(11), ProblemId(35)];
        ids.sort();
        assert_eq!(ids, vec![ProblemId(11), ProblemId(35), ProblemId(283)]);
    }

    #[test]
    fn serde_is_transparent() {
        let json = serde_json::to_string(&ProblemId(42)).unwrap();
        assert_eq!(json, "42");
        let back: StepId = serde_json::from_str("3").unwrap();
        assert_eq!(back, StepId(3));
    }
}
