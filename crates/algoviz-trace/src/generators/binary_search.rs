//! Binary search for the insert position of a target in a sorted array.

use algoviz_core::{ProblemId, StepKind, Trace, TraceConfig, TraceError, TraceRecorder};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use super::bounded_list;
use crate::input::{ensure_sorted, InputError, RawInput};
use crate::random;
use crate::visualizer::{Algorithm, AlgorithmInfo, Category, FieldKind, FieldSpec, TestCase};

/// Returns, in the terminal step's `result`, the index of `target` in `nums`
/// or the index where it would be inserted to keep `nums` sorted.
///
/// `left` and `right` bound the remaining search window (inclusive). `right`
/// is signed because it drops to -1 when the target is below every element.
pub fn search_insert(nums: &[i64], target: i64, config: &TraceConfig) -> Result<Trace, TraceError> {
    let mut rec = TraceRecorder::new(config);
    let mut left: i64 = 0;
    let mut right: i64 = nums.len() as i64 - 1;

    rec.step(
        StepKind::Init,
        format!("Search for {target} in the window [{left}, {right}]"),
    )
    .data("nums", nums)
    .var("target", target)
    .var("left", left)
    .var("right", right)
    .var("mid", None::<i64>)
    .var("result", None::<i64>)
    .emit()?;

    while left <= right {
        let mid = left + (right - left) / 2;
        let value = nums[mid as usize];

        if value == target {
            rec.step(
                StepKind::Terminal,
                format!("nums[{mid}] = {value} equals the target: it sits at index {mid}"),
            )
            .data("nums", nums)
            .var("target", target)
            .var("left", left)
            .var("right", right)
            .var("mid", mid)
            .var("result", mid)
            .index(mid as usize)
            .emit()?;
            return rec.finish();
        }

        let description = if value < target {
            format!("nums[{mid}] = {value} < {target}: discard the left half, left = {}", mid + 1)
        } else {
            format!("nums[{mid}] = {value} > {target}: discard the right half, right = {}", mid - 1)
        };
        rec.step(StepKind::Transition, description)
            .data("nums", nums)
            .var("target", target)
            .var("left", left)
            .var("right", right)
            .var("mid", mid)
            .var("result", None::<i64>)
            .index(mid as usize)
            .emit()?;

        if value < target {
            left = mid + 1;
        } else {
            right = mid - 1;
        }
    }

    rec.step(
        StepKind::Terminal,
        format!("The window is empty: {target} belongs at index {left}"),
    )
    .data("nums", nums)
    .var("target", target)
    .var("left", left)
    .var("right", right)
    .var("mid", None::<i64>)
    .var("result", left)
    .emit()?;

    rec.finish()
}

static SEARCH_INSERT_INFO: AlgorithmInfo = AlgorithmInfo {
    id: ProblemId(35),
    title: "Search Insert Position",
    category: Category::BinarySearch,
    summary: "Find where a target is, or where it would be inserted, in a sorted array",
    fields: &[
        FieldSpec {
            name: "nums",
            label: "Sorted array",
            kind: FieldKind::IntList,
            placeholder: "1,3,5,6",
        },
        FieldSpec {
            name: "target",
            label: "Target",
            kind: FieldKind::Int,
            placeholder: "5",
        },
    ],
};

/// Validated input for [`SearchInsert`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchInsertInput {
    pub nums: Vec<i64>,
    pub target: i64,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SearchInsert;

impl SearchInsert {
    pub const ID: ProblemId = ProblemId(35);
}

impl Algorithm for SearchInsert {
    type Input = SearchInsertInput;

    fn info(&self) -> &'static AlgorithmInfo {
        &SEARCH_INSERT_INFO
    }

    fn test_cases(&self) -> Vec<TestCase> {
        let case = |name, target: &str| {
            TestCase::new(
                name,
                RawInput::new().with("nums", "1,3,5,6").with("target", target),
            )
        };
        vec![
            case("Target present", "5"),
            case("Insert in the middle", "2"),
            case("Insert at the end", "7"),
            case("Insert at the start", "0"),
        ]
    }

    fn parse(&self, raw: &RawInput) -> Result<SearchInsertInput, InputError> {
        let nums = bounded_list(raw, "nums")?;
        ensure_sorted("nums", &nums)?;
        if nums.windows(2).any(|w| w[0] == w[1]) {
            return Err(InputError::invalid("nums", "must not contain duplicates"));
        }
        let target = raw.int("target")?;
        Ok(SearchInsertInput { nums, target })
    }

    fn run(&self, input: &SearchInsertInput, config: &TraceConfig) -> Result<Trace, TraceError> {
        search_insert(&input.nums, input.target, config)
    }

    fn random_input(&self, rng: &mut ChaCha8Rng) -> RawInput {
        let len = rng.gen_range(4..=12);
        let mut nums = random::distinct_ints(rng, len, 0, 40);
        nums.sort_unstable();
        let target = rng.gen_range(-2..=42);
        RawInput::new()
            .with("nums", random::format_list(&nums))
            .with("target", target.to_string())
    }
}
