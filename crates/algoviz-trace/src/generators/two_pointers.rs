//! Two-pointer walkthroughs: move zeroes, two sum on a sorted array and
//! container with most water.

use algoviz_core::{ProblemId, StepKind, Trace, TraceConfig, TraceError, TraceRecorder};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use super::bounded_list;
use crate::input::{ensure_sorted, InputError, RawInput};
use crate::random;
use crate::visualizer::{Algorithm, AlgorithmInfo, Category, FieldKind, FieldSpec, TestCase};

// ---------------------------------------------------------------------------
// Move Zeroes
// ---------------------------------------------------------------------------

/// Moves every zero to the end while keeping the relative order of the
/// non-zero values.
///
/// `slow` marks where the next non-zero value belongs; `fast` scans. A step
/// is recorded for every value `fast` visits.
pub fn move_zeroes(nums: &[i64], config: &TraceConfig) -> Result<Trace, TraceError> {
    let mut nums = nums.to_vec();
    let mut rec = TraceRecorder::new(config);
    let mut slow = 0usize;

    rec.step(
        StepKind::Init,
        "Start with slow = 0: slow marks where the next non-zero value belongs",
    )
    .data("nums", &nums)
    .var("slow", slow)
    .var("fast", 0usize)
    .var("finished", false)
    .emit()?;

    for fast in 0..nums.len() {
        if nums[fast] == 0 {
            rec.step(
                StepKind::Transition,
                format!("nums[{fast}] is 0, leave it for the tail"),
            )
            .data("nums", &nums)
            .var("slow", slow)
            .var("fast", fast)
            .var("swapped", false)
            .var("finished", false)
            .index(fast)
            .emit()?;
            continue;
        }

        let step = if slow == fast {
            let description = format!("nums[{fast}] = {} is already in place", nums[fast]);
            rec.step(StepKind::Transition, description).index(fast)
        } else {
            nums.swap(slow, fast);
            let description = format!(
                "Swap nums[{slow}] and nums[{fast}] to move {} forward",
                nums[slow]
            );
            rec.step(StepKind::Transition, description).indices([slow, fast])
        };
        step.data("nums", &nums)
            .var("slow", slow)
            .var("fast", fast)
            .var("swapped", slow != fast)
            .var("finished", false)
            .emit()?;
        slow += 1;
    }

    rec.step(
        StepKind::Terminal,
        format!("Done: {slow} non-zero value(s) at the front, zeroes fill the tail"),
    )
    .data("nums", &nums)
    .var("slow", slow)
    .var("fast", nums.len())
    .var("finished", true)
    .emit()?;

    rec.finish()
}

static MOVE_ZEROES_INFO: AlgorithmInfo = AlgorithmInfo {
    id: ProblemId(283),
    title: "Move Zeroes",
    category: Category::TwoPointers,
    summary: "Shift non-zero values forward in place, keeping their order",
    fields: &[FieldSpec {
        name: "nums",
        label: "Array",
        kind: FieldKind::IntList,
        placeholder: "0,1,0,3,12",
    }],
};

#[derive(Debug, Default, Clone, Copy)]
pub struct MoveZeroes;

impl MoveZeroes {
    pub const ID: ProblemId = ProblemId(283);
}

impl Algorithm for MoveZeroes {
    type Input = Vec<i64>;

    fn info(&self) -> &'static AlgorithmInfo {
        &MOVE_ZEROES_INFO
    }

    fn test_cases(&self) -> Vec<TestCase> {
        vec![
            TestCase::new("Example", RawInput::new().with("nums", "0,1,0,3,12")),
            TestCase::new("Single zero", RawInput::new().with("nums", "0")),
            TestCase::new("No zeroes", RawInput::new().with("nums", "4,2,7")),
            TestCase::new("Zeroes first", RawInput::new().with("nums", "0,0,0,5,6")),
        ]
    }

    fn parse(&self, raw: &RawInput) -> Result<Vec<i64>, InputError> {
        bounded_list(raw, "nums")
    }

    fn run(&self, input: &Vec<i64>, config: &TraceConfig) -> Result<Trace, TraceError> {
        move_zeroes(input, config)
    }

    fn random_input(&self, rng: &mut ChaCha8Rng) -> RawInput {
        let len = rng.gen_range(5..=10);
        let nums = random::int_list_with_zeros(rng, len, 20);
        RawInput::new().with("nums", random::format_list(&nums))
    }
}

// ---------------------------------------------------------------------------
// Two Sum II (sorted input)
// ---------------------------------------------------------------------------

/// Finds two entries of a sorted array that add up to `target`.
///
/// The pointers start at both ends; a sum that is too small moves `left`
/// right, a sum that is too large moves `right` left. The terminal `result`
/// holds the 1-based positions of the pair, or is empty when none exists.
pub fn two_sum_sorted(numbers: &[i64], target: i64, config: &TraceConfig) -> Result<Trace, TraceError> {
    let mut rec = TraceRecorder::new(config);
    let mut left = 0usize;
    let mut right = numbers.len().saturating_sub(1);

    rec.step(
        StepKind::Init,
        format!("Place left at the start and right at the end, looking for sum {target}"),
    )
    .data("numbers", numbers)
    .var("left", left)
    .var("right", right)
    .var("target", target)
    .var("sum", None::<i64>)
    .var("found", false)
    .emit()?;

    while left < right {
        let sum = numbers[left]
            .checked_add(numbers[right])
            .ok_or_else(|| TraceError::overflow(format!("adding numbers[{left}] and numbers[{right}]")))?;

        if sum == target {
            rec.step(
                StepKind::Terminal,
                format!(
                    "numbers[{left}] + numbers[{right}] = {} + {} = {target}: pair found",
                    numbers[left], numbers[right]
                ),
            )
            .data("numbers", numbers)
            .var("left", left)
            .var("right", right)
            .var("target", target)
            .var("sum", sum)
            .var("found", true)
            .var("result", vec![left + 1, right + 1])
            .indices([left, right])
            .emit()?;
            return rec.finish();
        }

        let description = if sum < target {
            format!("Sum {sum} is less than {target}: move left forward")
        } else {
            format!("Sum {sum} is greater than {target}: move right back")
        };
        rec.step(StepKind::Transition, description)
            .data("numbers", numbers)
            .var("left", left)
            .var("right", right)
            .var("target", target)
            .var("sum", sum)
            .var("found", false)
            .indices([left, right])
            .emit()?;

        if sum < target {
            left += 1;
        } else {
            right -= 1;
        }
    }

    rec.step(
        StepKind::Terminal,
        format!("The pointers met: no two values add up to {target}"),
    )
    .data("numbers", numbers)
    .var("left", left)
    .var("right", right)
    .var("target", target)
    .var("sum", None::<i64>)
    .var("found", false)
    .var("result", Vec::<usize>::new())
    .emit()?;

    rec.finish()
}

static TWO_SUM_INFO: AlgorithmInfo = AlgorithmInfo {
    id: ProblemId(167),
    title: "Two Sum II",
    category: Category::TwoPointers,
    summary: "Find two values of a sorted array that add up to a target",
    fields: &[
        FieldSpec {
            name: "numbers",
            label: "Sorted array",
            kind: FieldKind::IntList,
            placeholder: "2,7,11,15",
        },
        FieldSpec {
            name: "target",
            label: "Target",
            kind: FieldKind::Int,
            placeholder: "9",
        },
    ],
};

/// Validated input for [`TwoSumSorted`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TwoSumInput {
    pub numbers: Vec<i64>,
    pub target: i64,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TwoSumSorted;

impl TwoSumSorted {
    pub const ID: ProblemId = ProblemId(167);
}

impl Algorithm for TwoSumSorted {
    type Input = TwoSumInput;

    fn info(&self) -> &'static AlgorithmInfo {
        &TWO_SUM_INFO
    }

    fn test_cases(&self) -> Vec<TestCase> {
        vec![
            TestCase::new(
                "Example",
                RawInput::new().with("numbers", "2,7,11,15").with("target", "9"),
            ),
            TestCase::new(
                "Pair in the middle",
                RawInput::new().with("numbers", "1,3,4,5,7,11").with("target", "9"),
            ),
            TestCase::new(
                "Negative values",
                RawInput::new().with("numbers", "-3,-1,0,2").with("target", "-1"),
            ),
            TestCase::new(
                "No pair",
                RawInput::new().with("numbers", "1,2,3").with("target", "10"),
            ),
        ]
    }

    fn parse(&self, raw: &RawInput) -> Result<TwoSumInput, InputError> {
        let numbers = bounded_list(raw, "numbers")?;
        ensure_sorted("numbers", &numbers)?;
        let target = raw.int("target")?;
        Ok(TwoSumInput { numbers, target })
    }

    fn run(&self, input: &TwoSumInput, config: &TraceConfig) -> Result<Trace, TraceError> {
        two_sum_sorted(&input.numbers, input.target, config)
    }

    fn random_input(&self, rng: &mut ChaCha8Rng) -> RawInput {
        let len = rng.gen_range(4..=10);
        let numbers = random::sorted_int_list(rng, len, -10, 20);
        let i = rng.gen_range(0..len - 1);
        let j = rng.gen_range(i + 1..len);
        RawInput::new()
            .with("numbers", random::format_list(&numbers))
            .with("target", (numbers[i] + numbers[j]).to_string())
    }
}

// ---------------------------------------------------------------------------
// Container With Most Water
// ---------------------------------------------------------------------------

/// Finds the largest area between two lines of the given heights.
///
/// Each step measures the area between the two pointers, then moves the
/// pointer at the shorter line inward.
pub fn container_with_most_water(height: &[i64], config: &TraceConfig) -> Result<Trace, TraceError> {
    let mut rec = TraceRecorder::new(config);
    let mut left = 0usize;
    let mut right = height.len().saturating_sub(1);
    let mut best = 0i64;

    rec.step(StepKind::Init, "Start with the widest container: left at 0, right at the end")
        .data("height", height)
        .var("left", left)
        .var("right", right)
        .var("area", None::<i64>)
        .var("best", best)
        .emit()?;

    while left < right {
        let width = (right - left) as i64;
        let h = height[left].min(height[right]);
        let area = h
            .checked_mul(width)
            .ok_or_else(|| TraceError::overflow(format!("computing the area between {left} and {right}")))?;
        let improved = area > best;
        if improved {
            best = area;
        }

        let mut description = format!("Area between {left} and {right} is {h} x {width} = {area}");
        if improved {
            description.push_str(", a new best");
        }
        rec.step(StepKind::Transition, description)
            .data("height", height)
            .var("left", left)
            .var("right", right)
            .var("area", area)
            .var("best", best)
            .indices([left, right])
            .emit()?;

        if height[left] < height[right] {
            left += 1;
        } else {
            right -= 1;
        }
    }

    rec.step(StepKind::Terminal, format!("The pointers met: the largest area is {best}"))
        .data("height", height)
        .var("left", left)
        .var("right", right)
        .var("area", None::<i64>)
        .var("best", best)
        .var("result", best)
        .emit()?;

    rec.finish()
}

static CONTAINER_INFO: AlgorithmInfo = AlgorithmInfo {
    id: ProblemId(11),
    title: "Container With Most Water",
    category: Category::TwoPointers,
    summary: "Pick two lines that hold the most water between them",
    fields: &[FieldSpec {
        name: "height",
        label: "Heights",
        kind: FieldKind::IntList,
        placeholder: "1,8,6,2,5,4,8,3,7",
    }],
};

#[derive(Debug, Default, Clone, Copy)]
pub struct ContainerWithMostWater;

impl ContainerWithMostWater {
    pub const ID: ProblemId = ProblemId(11);
}

impl Algorithm for ContainerWithMostWater {
    type Input = Vec<i64>;

    fn info(&self) -> &'static AlgorithmInfo {
        &CONTAINER_INFO
    }

    fn test_cases(&self) -> Vec<TestCase> {
        vec![
            TestCase::new("Example", RawInput::new().with("height", "1,8,6,2,5,4,8,3,7")),
            TestCase::new("Two lines", RawInput::new().with("height", "1,1")),
            TestCase::new("Descending", RawInput::new().with("height", "9,7,5,3,1")),
        ]
    }

    fn parse(&self, raw: &RawInput) -> Result<Vec<i64>, InputError> {
        let height = bounded_list(raw, "height")?;
        if height.iter().any(|h| *h < 0) {
            return Err(InputError::invalid("height", "must not contain negative heights"));
        }
        Ok(height)
    }

    fn run(&self, input: &Vec<i64>, config: &TraceConfig) -> Result<Trace, TraceError> {
        container_with_most_water(input, config)
    }

    fn random_input(&self, rng: &mut ChaCha8Rng) -> RawInput {
        let len = rng.gen_range(5..=10);
        let height = random::int_list(rng, len, 0, 10);
        RawInput::new().with("height", random::format_list(&height))
    }
}
