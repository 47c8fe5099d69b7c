//! Dynamic programming walkthroughs: climbing stairs (table fill) and maximum
//! subarray (Kadane's running state).

use algoviz_core::{ProblemId, StepKind, Trace, TraceConfig, TraceError, TraceRecorder};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use super::bounded_list;
use crate::input::{ensure_range, InputError, RawInput};
use crate::random;
use crate::visualizer::{Algorithm, AlgorithmInfo, Category, FieldKind, FieldSpec, TestCase};

const MAX_STAIRS: i64 = 45;

// ---------------------------------------------------------------------------
// Climbing Stairs
// ---------------------------------------------------------------------------

/// Counts the ways to climb `n` stairs taking one or two steps at a time.
///
/// Fills `dp[i] = dp[i - 1] + dp[i - 2]` bottom-up with `dp[0] = dp[1] = 1`.
/// Cells not yet computed are shown as `null`. The trace holds `n + 1`
/// steps, so an `n` over the step limit fails before the table is built.
pub fn climbing_stairs(n: usize, config: &TraceConfig) -> Result<Trace, TraceError> {
    if n >= config.max_steps {
        return Err(TraceError::StepLimitExceeded {
            limit: config.max_steps,
        });
    }
    let mut dp: Vec<Option<i64>> = vec![None; n + 1];
    dp[0] = Some(1);
    if n >= 1 {
        dp[1] = Some(1);
    }
    let mut rec = TraceRecorder::new(config);

    rec.step(
        StepKind::Init,
        "Base cases: one way to stand at step 0, one way to reach step 1",
    )
    .data("dp", &dp)
    .var("n", n)
    .var("i", None::<usize>)
    .var("result", None::<i64>)
    .indices(0..dp.len().min(2))
    .emit()?;

    for i in 2..=n {
        let (one_back, two_back) = match (dp[i - 1], dp[i - 2]) {
            (Some(a), Some(b)) => (a, b),
            _ => {
                return Err(TraceError::Malformed {
                    reason: format!("dp[{i}] read an unfilled cell"),
                })
            }
        };
        let ways = one_back
            .checked_add(two_back)
            .ok_or_else(|| TraceError::overflow(format!("filling dp[{i}]")))?;
        dp[i] = Some(ways);
        rec.step(
            StepKind::Transition,
            format!("dp[{i}] = dp[{}] + dp[{}] = {one_back} + {two_back} = {ways}", i - 1, i - 2),
        )
        .data("dp", &dp)
        .var("n", n)
        .var("i", i)
        .var("result", None::<i64>)
        .indices([i - 2, i - 1, i])
        .emit()?;
    }

    let result = dp[n].unwrap_or(1);
    rec.step(
        StepKind::Terminal,
        format!("There are {result} way(s) to climb {n} stair(s)"),
    )
    .data("dp", &dp)
    .var("n", n)
    .var("i", None::<usize>)
    .var("result", result)
    .index(n)
    .emit()?;

    rec.finish()
}

static CLIMBING_STAIRS_INFO: AlgorithmInfo = AlgorithmInfo {
    id: ProblemId(70),
    title: "Climbing Stairs",
    category: Category::DynamicProgramming,
    summary: "Count the ways to climb n stairs one or two at a time",
    fields: &[FieldSpec {
        name: "n",
        label: "Stairs",
        kind: FieldKind::Int,
        placeholder: "5",
    }],
};

#[derive(Debug, Default, Clone, Copy)]
pub struct ClimbingStairs;

impl ClimbingStairs {
    pub const ID: ProblemId = ProblemId(70);
}

impl Algorithm for ClimbingStairs {
    type Input = usize;

    fn info(&self) -> &'static AlgorithmInfo {
        &CLIMBING_STAIRS_INFO
    }

    fn test_cases(&self) -> Vec<TestCase> {
        vec![
            TestCase::new("Five stairs", RawInput::new().with("n", "5")),
            TestCase::new("Two stairs", RawInput::new().with("n", "2")),
            TestCase::new("One stair", RawInput::new().with("n", "1")),
        ]
    }

    fn parse(&self, raw: &RawInput) -> Result<usize, InputError> {
        let n = raw.int("n")?;
        ensure_range("n", n, 0, MAX_STAIRS)?;
        usize::try_from(n).map_err(|_| InputError::invalid("n", "must not be negative"))
    }

    fn run(&self, input: &usize, config: &TraceConfig) -> Result<Trace, TraceError> {
        climbing_stairs(*input, config)
    }

    fn random_input(&self, rng: &mut ChaCha8Rng) -> RawInput {
        RawInput::new().with("n", rng.gen_range(2..=12).to_string())
    }
}

// ---------------------------------------------------------------------------
// Maximum Subarray
// ---------------------------------------------------------------------------

/// Finds the largest sum of a contiguous subarray with Kadane's algorithm.
///
/// `current` is the best sum of a subarray ending at `i`: either extend the
/// previous run or restart at `nums[i]`. `best` tracks the maximum seen and
/// its bounds. An empty array has no subarray, so `result` stays `null`.
pub fn max_subarray(nums: &[i64], config: &TraceConfig) -> Result<Trace, TraceError> {
    let mut rec = TraceRecorder::new(config);

    let Some(&first) = nums.first() else {
        rec.step(StepKind::Init, "The array is empty")
            .data("nums", nums)
            .var("current", None::<i64>)
            .var("best", None::<i64>)
            .emit()?;
        rec.step(StepKind::Terminal, "An empty array has no subarray")
            .data("nums", nums)
            .var("current", None::<i64>)
            .var("best", None::<i64>)
            .var("result", None::<i64>)
            .emit()?;
        return rec.finish();
    };

    let mut current = first;
    let mut best = first;
    let (mut run_start, mut best_start, mut best_end) = (0usize, 0usize, 0usize);

    rec.step(
        StepKind::Init,
        format!("Start with the first element: current = best = {first}"),
    )
    .data("nums", nums)
    .var("i", 0usize)
    .var("current", current)
    .var("best", best)
    .var("bestStart", best_start)
    .var("bestEnd", best_end)
    .index(0)
    .emit()?;

    for (i, &value) in nums.iter().enumerate().skip(1) {
        let extended = current
            .checked_add(value)
            .ok_or_else(|| TraceError::overflow(format!("extending the run with nums[{i}]")))?;
        let mut description = if extended >= value {
            current = extended;
            format!("Extend the run with {value}: current = {current}")
        } else {
            current = value;
            run_start = i;
            format!("Restart at nums[{i}]: {value} beats extending ({extended})")
        };
        if current > best {
            best = current;
            best_start = run_start;
            best_end = i;
            description.push_str(&format!(", new best {best}"));
        }

        rec.step(StepKind::Transition, description)
            .data("nums", nums)
            .var("i", i)
            .var("current", current)
            .var("best", best)
            .var("bestStart", best_start)
            .var("bestEnd", best_end)
            .indices(run_start..=i)
            .emit()?;
    }

    rec.step(
        StepKind::Terminal,
        format!("The maximum subarray is nums[{best_start}..={best_end}] with sum {best}"),
    )
    .data("nums", nums)
    .var("current", current)
    .var("best", best)
    .var("bestStart", best_start)
    .var("bestEnd", best_end)
    .var("result", best)
    .indices(best_start..=best_end)
    .emit()?;

    rec.finish()
}

static MAX_SUBARRAY_INFO: AlgorithmInfo = AlgorithmInfo {
    id: ProblemId(53),
    title: "Maximum Subarray",
    category: Category::DynamicProgramming,
    summary: "Find the contiguous run with the largest sum",
    fields: &[FieldSpec {
        name: "nums",
        label: "Array",
        kind: FieldKind::IntList,
        placeholder: "-2,1,-3,4,-1,2,1,-5,4",
    }],
};

#[derive(Debug, Default, Clone, Copy)]
pub struct MaxSubarray;

impl MaxSubarray {
    pub const ID: ProblemId = ProblemId(53);
}

impl Algorithm for MaxSubarray {
    type Input = Vec<i64>;

    fn info(&self) -> &'static AlgorithmInfo {
        &MAX_SUBARRAY_INFO
    }

    fn test_cases(&self) -> Vec<TestCase> {
        vec![
            TestCase::new("Example", RawInput::new().with("nums", "-2,1,-3,4,-1,2,1,-5,4")),
            TestCase::new("All negative", RawInput::new().with("nums", "-3,-1,-2")),
            TestCase::new("Whole array", RawInput::new().with("nums", "5,4,-1,7,8")),
        ]
    }

    fn parse(&self, raw: &RawInput) -> Result<Vec<i64>, InputError> {
        bounded_list(raw, "nums")
    }

    fn run(&self, input: &Vec<i64>, config: &TraceConfig) -> Result<Trace, TraceError> {
        max_subarray(input, config)
    }

    fn random_input(&self, rng: &mut ChaCha8Rng) -> RawInput {
        let len = rng.gen_range(5..=12);
        let nums = random::int_list(rng, len, -9, 9);
        RawInput::new().with("nums", random::format_list(&nums))
    }
}
