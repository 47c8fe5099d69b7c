//! Traces and the recorder that generators use to build them.
//!
//! A [`Trace`] is the full ordered list of [`Step`]s produced for one input.
//! It is immutable once built: a non-empty trace comes either from
//! [`TraceRecorder::finish`] or from deserialization, and both check that the
//! first step is [`StepKind::Init`], the last is [`StepKind::Terminal`] and
//! every step id equals its position.
//!
//! # Usage
//!
//! ```ignore
//! let mut rec = TraceRecorder::new(&TraceConfig::default());
//! rec.step(StepKind::Init, "Start").data("nums", &nums).var("i", 0usize).emit()?;
//! rec.step(StepKind::Terminal, "Done").var("result", 3i64).emit()?;
//! let trace = rec.finish()?;
//! ```

use serde::{Deserialize, Serialize};

use crate::error::TraceError;
use crate::id::StepId;
use crate::step::{Snapshot, Step, StepKind};
use crate::value::Value;

/// Limits applied while recording a trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceConfig {
    /// Maximum number of steps a single trace may hold. Default: 10 000.
    pub max_steps: usize,
}

impl Default for TraceConfig {
    fn default() -> Self {
        TraceConfig { max_steps: 10_000 }
    }
}

/// An ordered, finite, immutable sequence of steps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedTrace")]
pub struct Trace {
    steps: Vec<Step>,
}

/// Wire form of a [`Trace`] before its framing is checked.
#[derive(Deserialize)]
struct UncheckedTrace {
    steps: Vec<Step>,
}

impl TryFrom<UncheckedTrace> for Trace {
    type Error = TraceError;

    fn try_from(raw: UncheckedTrace) -> Result<Self, TraceError> {
        if !raw.steps.is_empty() {
            check_framing(&raw.steps)?;
        }
        if let Some(step) = raw.steps.iter().enumerate().find(|(i, s)| s.id.index() != *i) {
            return Err(TraceError::Malformed {
                reason: format!("step {} has id {}", step.0, step.1.id),
            });
        }
        Ok(Trace { steps: raw.steps })
    }
}

fn check_framing(steps: &[Step]) -> Result<(), TraceError> {
    match (steps.first(), steps.last()) {
        (None, _) | (_, None) => Err(TraceError::Malformed {
            reason: "no steps were recorded".into(),
        }),
        (Some(first), _) if first.kind != StepKind::Init => Err(TraceError::Malformed {
            reason: format!("first step is {:?}, expected Init", first.kind),
        }),
        (_, Some(last)) if last.kind != StepKind::Terminal => Err(TraceError::Malformed {
            reason: format!("last step is {:?}, expected Terminal", last.kind),
        }),
        _ => Ok(()),
    }
}

impl Trace {
    /// A trace with no steps. Used when generation fails.
    pub fn empty() -> Self {
        Trace { steps: Vec::new() }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    pub fn first(&self) -> Option<&Step> {
        self.steps.first()
    }

    pub fn last(&self) -> Option<&Step> {
        self.steps.last()
    }

    /// Index of the final step, or `None` for an empty trace.
    pub fn last_index(&self) -> Option<usize> {
        self.steps.len().checked_sub(1)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.steps.iter()
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// Accumulates steps for one generator run.
#[derive(Debug)]
pub struct TraceRecorder {
    steps: Vec<Step>,
    limit: usize,
}

impl TraceRecorder {
    pub fn new(config: &TraceConfig) -> Self {
        TraceRecorder {
            steps: Vec::new(),
            limit: config.max_steps,
        }
    }

    /// Starts a new step. Nothing is recorded until [`StepBuilder::emit`].
    pub fn step(&mut self, kind: StepKind, description: impl Into<String>) -> StepBuilder<'_> {
        StepBuilder {
            step: Step {
                id: StepId(0),
                kind,
                description: description.into(),
                data: Snapshot::new(),
                variables: Snapshot::new(),
                highlighted_indices: Vec::new(),
                highlighted_cells: Vec::new(),
            },
            recorder: self,
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Closes the recording and returns the trace.
    pub fn finish(self) -> Result<Trace, TraceError> {
        check_framing(&self.steps)?;
        Ok(Trace { steps: self.steps })
    }

    fn push(&mut self, mut step: Step) -> Result<(), TraceError> {
        if self.steps.len() >= self.limit {
            return Err(TraceError::StepLimitExceeded { limit: self.limit });
        }
        let id = u32::try_from(self.steps.len())
            .map_err(|_| TraceError::StepLimitExceeded { limit: self.limit })?;
        step.id = StepId(id);
        self.steps.push(step);
        Ok(())
    }
}

/// A step under construction. Values passed in are copied into the step.
#[must_use = "a step is only recorded once `emit` is called"]
pub struct StepBuilder<'r> {
    recorder: &'r mut TraceRecorder,
    step: Step,
}

impl StepBuilder<'_> {
    pub fn data(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.step.data.insert(name.to_string(), value.into());
        self
    }

    pub fn var(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.step.variables.insert(name.to_string(), value.into());
        self
    }

    pub fn index(mut self, index: usize) -> Self {
        self.step.highlighted_indices.push(index);
        self
    }

    pub fn indices(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.step.highlighted_indices.extend(indices);
        self
    }

    pub fn cell(mut self, row: usize, col: usize) -> Self {
        self.step.highlighted_cells.push((row, col));
        self
    }

    pub fn cells(mut self, cells: impl IntoIterator<Item = (usize, usize)>) -> Self {
        self.step.highlighted_cells.extend(cells);
        self
    }

    /// Appends the step to the recorder.
    pub fn emit(self) -> Result<(), TraceError> {
        self.recorder.push(self.step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn framed(config: &TraceConfig, middle: usize) -> Result<Trace, TraceError> {
        let mut rec = TraceRecorder::new(config);
        rec.step(StepKind::Init, "start").var("i", 0usize).emit()?;
        for i in 0..middle {
            rec.step(StepKind::Transition, format!("step {i}"))
                .var("i", i)
                .index(i)
                .emit()?;
        }
        rec.step(StepKind::Terminal, "done").var("finished", true).emit()?;
        rec.finish()
    }

    #[test]
    fn ids_match_positions() {
        let trace = framed(&TraceConfig::default(), 4).unwrap();
        assert_eq!(trace.len(), 6);
        for (i, step) in trace.iter().enumerate() {
            assert_eq!(step.id.index(), i);
        }
        assert_eq!(trace.last_index(), Some(5));
    }

    #[test]
    fn step_limit_is_enforced() {
        let config = TraceConfig { max_steps: 3 };
        let err = framed(&config, 5).unwrap_err();
        assert_eq!(err, TraceError::StepLimitExceeded { limit: 3 });
    }

    #[test]
    fn finish_rejects_empty_recorder() {
        let rec = TraceRecorder::new(&TraceConfig::default());
        assert!(matches!(rec.finish(), Err(TraceError::Malformed { .. })));
    }

    #[test]
    fn finish_rejects_missing_terminal() {
        let mut rec = TraceRecorder::new(&TraceConfig::default());
        rec.step(StepKind::Init, "start").emit().unwrap();
        rec.step(StepKind::Transition, "work").emit().unwrap();
        let err = rec.finish().unwrap_err();
        assert!(err.to_string().contains("expected Terminal"));
    }

    #[test]
    fn finish_rejects_missing_init() {
        let mut rec = TraceRecorder::new(&TraceConfig::default());
        rec.step(StepKind::Terminal, "done").emit().unwrap();
        assert!(matches!(rec.finish(), Err(TraceError::Malformed { .. })));
    }

    #[test]
    fn captured_data_is_independent_of_scratch_state() {
        let mut nums = vec![3i64, 1, 2];
        let mut rec = TraceRecorder::new(&TraceConfig::default());
        rec.step(StepKind::Init, "start").data("nums", &nums).emit().unwrap();
        nums.sort();
        rec.step(StepKind::Terminal, "sorted").data("nums", &nums).emit().unwrap();
        let trace = rec.finish().unwrap();

        assert_eq!(trace.steps()[0].datum("nums").unwrap().to_int_vec(), Some(vec![3, 1, 2]));
        assert_eq!(trace.steps()[1].datum("nums").unwrap().to_int_vec(), Some(vec![1, 2, 3]));
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let trace = framed(&TraceConfig::default(), 1).unwrap();
        let json = serde_json::to_value(&trace).unwrap();
        let step = &json["steps"][1];
        assert_eq!(step["kind"], "transition");
        assert_eq!(step["highlightedIndices"], serde_json::json!([0]));
        assert!(step.get("highlightedCells").is_none());
    }

    #[test]
    fn deserialized_trace_keeps_framing() {
        let trace = framed(&TraceConfig::default(), 2).unwrap();
        let json = serde_json::to_string(&trace).unwrap();
        let back: Trace = serde_json::from_str(&json).unwrap();
        assert_eq!(back, trace);

        let empty: Trace = serde_json::from_str(r#"{"steps":[]}"#).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn deserialize_rejects_unframed_steps() {
        let trace = framed(&TraceConfig::default(), 2).unwrap();
        let mut json = serde_json::to_value(&trace).unwrap();
        json["steps"].as_array_mut().unwrap().pop();
        let err = serde_json::from_value::<Trace>(json).unwrap_err();
        assert!(err.to_string().contains("expected Terminal"), "{err}");

        let mut json = serde_json::to_value(&trace).unwrap();
        json["steps"][0]["kind"] = serde_json::json!("transition");
        assert!(serde_json::from_value::<Trace>(json).is_err());
    }

    #[test]
    fn deserialize_rejects_out_of_order_ids() {
        let trace = framed(&TraceConfig::default(), 2).unwrap();
        let mut json = serde_json::to_value(&trace).unwrap();
        json["steps"][1]["id"] = serde_json::json!(7);
        let err = serde_json::from_value::<Trace>(json).unwrap_err();
        assert!(err.to_string().contains("step 1 has id 7"), "{err}");
    }

    proptest! {
        #[test]
        fn ids_strictly_increase(middle in 0usize..50) {
            let trace = framed(&TraceConfig::default(), middle).unwrap();
            prop_assert_eq!(trace.len(), middle + 2);
            for pair in trace.steps().windows(2) {
                prop_assert!(pair[0].id < pair[1].id);
            }
            prop_assert_eq!(trace.first().unwrap().kind, StepKind::Init);
            prop_assert_eq!(trace.last().unwrap().kind, StepKind::Terminal);
        }
    }
}
