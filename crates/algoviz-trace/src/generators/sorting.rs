//! Sorting walkthrough: top-down merge sort.

use algoviz_core::{ProblemId, StepKind, Trace, TraceConfig, TraceError, TraceRecorder};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::input::{ensure_max_len, InputError, RawInput};
use crate::random;
use crate::visualizer::{Algorithm, AlgorithmInfo, Category, FieldKind, FieldSpec, TestCase};

const MAX_SORT_LEN: usize = 16;

struct MergeWalk<'r> {
    rec: &'r mut TraceRecorder,
    nums: Vec<i64>,
    depth: usize,
}

impl MergeWalk<'_> {
    /// Sorts `nums[lo..hi]`.
    fn sort(&mut self, lo: usize, hi: usize) -> Result<(), TraceError> {
        self.rec
            .step(StepKind::Enter, format!("Sort range [{lo}, {hi})"))
            .data("nums", &self.nums)
            .var("lo", lo)
            .var("hi", hi)
            .var("depth", self.depth)
            .indices(lo..hi)
            .emit()?;

        if hi - lo > 1 {
            let mid = lo + (hi - lo) / 2;
            self.depth += 1;
            self.sort(lo, mid)?;
            self.sort(mid, hi)?;
            self.depth -= 1;
            self.merge(lo, mid, hi)?;
        }

        self.rec
            .step(StepKind::Return, format!("Merged range [{lo}, {hi})"))
            .data("nums", &self.nums)
            .var("lo", lo)
            .var("hi", hi)
            .var("depth", self.depth)
            .indices(lo..hi)
            .emit()
    }

    fn merge(&mut self, lo: usize, mid: usize, hi: usize) -> Result<(), TraceError> {
        let left = self.nums[lo..mid].to_vec();
        let right = self.nums[mid..hi].to_vec();
        let (mut i, mut j) = (0, 0);

        for k in lo..hi {
            let take_left = match (left.get(i), right.get(j)) {
                (Some(a), Some(b)) => a <= b,
                (Some(_), None) => true,
                _ => false,
            };
            let (value, description) = if take_left {
                i += 1;
                let v = left[i - 1];
                (v, format!("Place {v} from the left half at index {k}"))
            } else {
                j += 1;
                let v = right[j - 1];
                (v, format!("Place {v} from the right half at index {k}"))
            };
            self.nums[k] = value;

            self.rec
                .step(StepKind::Transition, description)
                .data("nums", &self.nums)
                .data("left", &left)
                .data("right", &right)
                .var("lo", lo)
                .var("mid", mid)
                .var("hi", hi)
                .var("k", k)
                .var("depth", self.depth)
                .index(k)
                .emit()?;
        }
        Ok(())
    }
}

/// Sorts `nums` ascending with top-down merge sort.
///
/// Each call on `[lo, hi)` opens with an `Enter` step and closes with a
/// `Return` step once the range is sorted; every placement made while merging
/// is a `Transition`. Merging takes from the left half on ties, so the sort
/// is stable.
pub fn merge_sort(nums: &[i64], config: &TraceConfig) -> Result<Trace, TraceError> {
    let mut rec = TraceRecorder::new(config);
    rec.step(StepKind::Init, "Split the array in halves, sort each, then merge")
        .data("nums", nums)
        .var("depth", 0usize)
        .emit()?;

    let mut walk = MergeWalk {
        rec: &mut rec,
        nums: nums.to_vec(),
        depth: 0,
    };
    if !nums.is_empty() {
        walk.sort(0, nums.len())?;
    }
    let sorted = walk.nums;

    rec.step(StepKind::Terminal, "The array is sorted")
        .data("nums", &sorted)
        .var("depth", 0usize)
        .indices(0..sorted.len())
        .emit()?;

    rec.finish()
}

static MERGE_SORT_INFO: AlgorithmInfo = AlgorithmInfo {
    id: ProblemId(912),
    title: "Merge Sort",
    category: Category::Sorting,
    summary: "Sort an array by recursively merging sorted halves",
    fields: &[FieldSpec {
        name: "nums",
        label: "Array",
        kind: FieldKind::IntList,
        placeholder: "5,2,3,1",
    }],
};

#[derive(Debug, Default, Clone, Copy)]
pub struct MergeSort;

impl MergeSort {
    pub const ID: ProblemId = ProblemId(912);
}

impl Algorithm for MergeSort {
    type Input = Vec<i64>;

    fn info(&self) -> &'static AlgorithmInfo {
        &MERGE_SORT_INFO
    }

    fn test_cases(&self) -> Vec<TestCase> {
        vec![
            TestCase::new("Example", RawInput::new().with("nums", "5,2,3,1")),
            TestCase::new("Duplicates", RawInput::new().with("nums", "5,1,1,2,0,0")),
            TestCase::new("Already sorted", RawInput::new().with("nums", "1,2,3,4,5")),
        ]
    }

    fn parse(&self, raw: &RawInput) -> Result<Vec<i64>, InputError> {
        let nums = raw.int_list("nums")?;
        ensure_max_len("nums", nums.len(), MAX_SORT_LEN)?;
        Ok(nums)
    }

    fn run(&self, input: &Vec<i64>, config: &TraceConfig) -> Result<Trace, TraceError> {
        merge_sort(input, config)
    }

    fn random_input(&self, rng: &mut ChaCha8Rng) -> RawInput {
        let len = rng.gen_range(4..=10);
        let nums = random::int_list(rng, len, -20, 20);
        RawInput::new().with("nums", random::format_list(&nums))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sorted_output(trace: &Trace) -> Vec<i64> {
        trace.last().unwrap().datum("nums").unwrap().to_int_vec().unwrap()
    }

    #[test]
    fn sorts_example() {
        let trace = merge_sort(&[5, 2, 3, 1], &TraceConfig::default()).unwrap();
        assert_eq!(sorted_output(&trace), vec![1, 2, 3, 5]);
        assert_eq!(
            trace.first().unwrap().datum("nums").unwrap().to_int_vec(),
            Some(vec![5, 2, 3, 1])
        );
    }

    #[test]
    fn enter_and_return_balance() {
        let trace = merge_sort(&[4, 3, 2, 1, 0], &TraceConfig::default()).unwrap();
        let enters = trace.iter().filter(|s| s.kind == StepKind::Enter).count();
        let returns = trace.iter().filter(|s| s.kind == StepKind::Return).count();
        // one call per node of the split tree: 2n - 1
        assert_eq!(enters, 9);
        assert_eq!(enters, returns);
    }

    #[test]
    fn empty_and_single() {
        let empty = merge_sort(&[], &TraceConfig::default()).unwrap();
        assert_eq!(empty.len(), 2);
        let single = merge_sort(&[7], &TraceConfig::default()).unwrap();
        // init, enter, return, terminal
        assert_eq!(single.len(), 4);
        assert_eq!(sorted_output(&single), vec![7]);
    }

    #[test]
    fn parse_limits_length() {
        let raw = RawInput::new().with("nums", "1,2,3,4,5,6,7,8,9,10,11,12,13,14,15,16,17");
        assert!(matches!(MergeSort.parse(&raw), Err(InputError::TooLong { .. })));
    }

    proptest! {
        #[test]
        fn matches_std_sort(nums in proptest::collection::vec(-100i64..100, 0..16)) {
            let trace = merge_sort(&nums, &TraceConfig::default()).unwrap();
            let mut expected = nums.clone();
            expected.sort();
            prop_assert_eq!(sorted_output(&trace), expected);
        }
    }
}
