//! Backtracking walkthroughs: subsets and permutations.
//!
//! The recursion is linearized into the trace: every call records an `Enter`
//! step and every undo records a `Return` step, so scrubbing backwards
//! through the trace retraces the call tree. Input size is capped at
//! parse time, which keeps both the recursion depth and the trace small.

use algoviz_core::{ProblemId, StepKind, Trace, TraceConfig, TraceError, TraceRecorder};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::input::{ensure_max_len, InputError, RawInput};
use crate::random;
use crate::visualizer::{Algorithm, AlgorithmInfo, Category, FieldKind, FieldSpec, TestCase};

const MAX_SUBSET_INPUT: usize = 5;
const MAX_PERMUTATION_INPUT: usize = 4;

fn distinct_list(raw: &RawInput, max: usize) -> Result<Vec<i64>, InputError> {
    let nums = raw.int_list("nums")?;
    ensure_max_len("nums", nums.len(), max)?;
    let mut sorted = nums.clone();
    sorted.sort_unstable();
    if sorted.windows(2).any(|w| w[0] == w[1]) {
        return Err(InputError::invalid("nums", "must not contain duplicates"));
    }
    Ok(nums)
}

// ---------------------------------------------------------------------------
// Subsets
// ---------------------------------------------------------------------------

struct SubsetSearch<'a> {
    nums: &'a [i64],
    path: Vec<i64>,
    result: Vec<Vec<i64>>,
}

impl SubsetSearch<'_> {
    fn explore(&mut self, rec: &mut TraceRecorder, start: usize) -> Result<(), TraceError> {
        self.result.push(self.path.clone());
        rec.step(
            StepKind::Enter,
            format!("Enter with path {:?}: record it as subset #{}", self.path, self.result.len()),
        )
        .data("nums", self.nums)
        .data("path", &self.path)
        .data("result", &self.result)
        .var("start", start)
        .var("depth", self.path.len())
        .emit()?;

        for i in start..self.nums.len() {
            let choice = self.nums[i];
            self.path.push(choice);
            rec.step(StepKind::Transition, format!("Choose nums[{i}] = {choice}"))
                .data("nums", self.nums)
                .data("path", &self.path)
                .data("result", &self.result)
                .var("start", start)
                .var("depth", self.path.len())
                .var("choice", choice)
                .index(i)
                .emit()?;

            self.explore(rec, i + 1)?;

            self.path.pop();
            rec.step(StepKind::Return, format!("Backtrack: remove {choice} from the path"))
                .data("nums", self.nums)
                .data("path", &self.path)
                .data("result", &self.result)
                .var("start", start)
                .var("depth", self.path.len())
                .var("choice", choice)
                .index(i)
                .emit()?;
        }
        Ok(())
    }
}

/// Enumerates every subset of `nums` by choosing, for each position after
/// `start`, whether to extend the current path with it.
pub fn subsets(nums: &[i64], config: &TraceConfig) -> Result<Trace, TraceError> {
    let mut rec = TraceRecorder::new(config);
    rec.step(StepKind::Init, "Start from the empty path")
        .data("nums", nums)
        .data("path", Vec::<i64>::new())
        .data("result", Vec::<Vec<i64>>::new())
        .var("start", 0usize)
        .var("depth", 0usize)
        .emit()?;

    let mut search = SubsetSearch {
        nums,
        path: Vec::new(),
        result: Vec::new(),
    };
    search.explore(&mut rec, 0)?;

    rec.step(
        StepKind::Terminal,
        format!("Found all {} subsets", search.result.len()),
    )
    .data("nums", nums)
    .data("path", &search.path)
    .data("result", &search.result)
    .var("count", search.result.len())
    .emit()?;

    rec.finish()
}

static SUBSETS_INFO: AlgorithmInfo = AlgorithmInfo {
    id: ProblemId(78),
    title: "Subsets",
    category: Category::Backtracking,
    summary: "Enumerate every subset by choosing and un-choosing elements",
    fields: &[FieldSpec {
        name: "nums",
        label: "Distinct values",
        kind: FieldKind::IntList,
        placeholder: "1,2,3",
    }],
};

#[derive(Debug, Default, Clone, Copy)]
pub struct Subsets;

impl Subsets {
    pub const ID: ProblemId = ProblemId(78);
}

impl Algorithm for Subsets {
    type Input = Vec<i64>;

    fn info(&self) -> &'static AlgorithmInfo {
        &SUBSETS_INFO
    }

    fn test_cases(&self) -> Vec<TestCase> {
        vec![
            TestCase::new("Example", RawInput::new().with("nums", "1,2,3")),
            TestCase::new("Single", RawInput::new().with("nums", "0")),
            TestCase::new("Empty", RawInput::new().with("nums", "[]")),
        ]
    }

    fn parse(&self, raw: &RawInput) -> Result<Vec<i64>, InputError> {
        distinct_list(raw, MAX_SUBSET_INPUT)
    }

    fn run(&self, input: &Vec<i64>, config: &TraceConfig) -> Result<Trace, TraceError> {
        subsets(input, config)
    }

    fn random_input(&self, rng: &mut ChaCha8Rng) -> RawInput {
        let len = rng.gen_range(1..=MAX_SUBSET_INPUT);
        let nums = random::distinct_ints(rng, len, 1, 9);
        RawInput::new().with("nums", random::format_list(&nums))
    }
}

// ---------------------------------------------------------------------------
// Permutations
// ---------------------------------------------------------------------------

struct PermutationSearch<'a> {
    nums: &'a [i64],
    path: Vec<i64>,
    used: Vec<bool>,
    result: Vec<Vec<i64>>,
}

impl PermutationSearch<'_> {
    fn explore(&mut self, rec: &mut TraceRecorder) -> Result<(), TraceError> {
        let depth = self.path.len();
        if depth == self.nums.len() {
            self.result.push(self.path.clone());
            rec.step(
                StepKind::Enter,
                format!("Path {:?} uses every value: record permutation #{}", self.path, self.result.len()),
            )
            .data("nums", self.nums)
            .data("path", &self.path)
            .data("used", &self.used)
            .data("result", &self.result)
            .var("depth", depth)
            .emit()?;
            return Ok(());
        }

        rec.step(
            StepKind::Enter,
            format!("Enter depth {depth} with path {:?}", self.path),
        )
        .data("nums", self.nums)
        .data("path", &self.path)
        .data("used", &self.used)
        .data("result", &self.result)
        .var("depth", depth)
        .emit()?;

        for i in 0..self.nums.len() {
            if self.used[i] {
                continue;
            }
            let choice = self.nums[i];
            self.used[i] = true;
            self.path.push(choice);
            rec.step(StepKind::Transition, format!("Place nums[{i}] = {choice} at position {depth}"))
                .data("nums", self.nums)
                .data("path", &self.path)
                .data("used", &self.used)
                .data("result", &self.result)
                .var("depth", depth)
                .var("choice", choice)
                .index(i)
                .emit()?;

            self.explore(rec)?;

            self.path.pop();
            self.used[i] = false;
            rec.step(StepKind::Return, format!("Backtrack: free {choice} for other positions"))
                .data("nums", self.nums)
                .data("path", &self.path)
                .data("used", &self.used)
                .data("result", &self.result)
                .var("depth", depth)
                .var("choice", choice)
                .index(i)
                .emit()?;
        }
        Ok(())
    }
}

/// Enumerates every ordering of `nums`, marking values as used while they
/// sit on the current path.
pub fn permutations(nums: &[i64], config: &TraceConfig) -> Result<Trace, TraceError> {
    let mut rec = TraceRecorder::new(config);
    let used = vec![false; nums.len()];
    rec.step(StepKind::Init, "Start with an empty path and every value unused")
        .data("nums", nums)
        .data("path", Vec::<i64>::new())
        .data("used", &used)
        .data("result", Vec::<Vec<i64>>::new())
        .var("depth", 0usize)
        .emit()?;

    let mut search = PermutationSearch {
        nums,
        path: Vec::new(),
        used,
        result: Vec::new(),
    };
    search.explore(&mut rec)?;

    rec.step(
        StepKind::Terminal,
        format!("Found all {} permutations", search.result.len()),
    )
    .data("nums", nums)
    .data("path", &search.path)
    .data("used", &search.used)
    .data("result", &search.result)
    .var("count", search.result.len())
    .emit()?;

    rec.finish()
}

static PERMUTATIONS_INFO: AlgorithmInfo = AlgorithmInfo {
    id: ProblemId(46),
    title: "Permutations",
    category: Category::Backtracking,
    summary: "Enumerate every ordering by placing unused values one position at a time",
    fields: &[FieldSpec {
        name: "nums",
        label: "Distinct values",
        kind: FieldKind::IntList,
        placeholder: "1,2,3",
    }],
};

#[derive(Debug, Default, Clone, Copy)]
pub struct Permutations;

impl Permutations {
    pub const ID: ProblemId = ProblemId(46);
}

impl Algorithm for Permutations {
    type Input = Vec<i64>;

    fn info(&self) -> &'static AlgorithmInfo {
        &PERMUTATIONS_INFO
    }

    fn test_cases(&self) -> Vec<TestCase> {
        vec![
            TestCase::new("Example", RawInput::new().with("nums", "1,2,3")),
            TestCase::new("Pair", RawInput::new().with("nums", "0,1")),
            TestCase::new("Single", RawInput::new().with("nums", "1")),
        ]
    }

    fn parse(&self, raw: &RawInput) -> Result<Vec<i64>, InputError> {
        distinct_list(raw, MAX_PERMUTATION_INPUT)
    }

    fn run(&self, input: &Vec<i64>, config: &TraceConfig) -> Result<Trace, TraceError> {
        permutations(input, config)
    }

    fn random_input(&self, rng: &mut ChaCha8Rng) -> RawInput {
        let len = rng.gen_range(2..=MAX_PERMUTATION_INPUT);
        let nums = random::distinct_ints(rng, len, 1, 9);
        RawInput::new().with("nums", random::format_list(&nums))
    }
}
