//! Heap walkthrough: k-th largest element with a size-k min-heap.
//!
//! The heap is kept as an array so each snapshot shows its real layout;
//! `highlighted_indices` point into the heap array, while `i` points into
//! the input.

use algoviz_core::{ProblemId, StepKind, Trace, TraceConfig, TraceError, TraceRecorder};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use super::bounded_list;
use crate::input::{InputError, RawInput};
use crate::random;
use crate::visualizer::{Algorithm, AlgorithmInfo, Category, FieldKind, FieldSpec, TestCase};

struct MinHeapWalk<'a> {
    nums: &'a [i64],
    k: usize,
    heap: Vec<i64>,
}

impl MinHeapWalk<'_> {
    fn emit(
        &self,
        rec: &mut TraceRecorder,
        description: String,
        i: usize,
        highlight: impl IntoIterator<Item = usize>,
    ) -> Result<(), TraceError> {
        rec.step(StepKind::Transition, description)
            .data("nums", self.nums)
            .data("heap", &self.heap)
            .var("k", self.k)
            .var("i", i)
            .var("size", self.heap.len())
            .indices(highlight)
            .emit()
    }

    fn sift_up(&mut self, rec: &mut TraceRecorder, i: usize) -> Result<(), TraceError> {
        let mut pos = self.heap.len() - 1;
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if self.heap[parent] <= self.heap[pos] {
                break;
            }
            self.heap.swap(parent, pos);
            let description = format!(
                "Sift up: {} is smaller than its parent {}, swap them",
                self.heap[parent], self.heap[pos]
            );
            self.emit(rec, description, i, [parent, pos])?;
            pos = parent;
        }
        Ok(())
    }

    fn sift_down(&mut self, rec: &mut TraceRecorder, i: usize) -> Result<(), TraceError> {
        let len = self.heap.len();
        let mut pos = 0;
        loop {
            let left = 2 * pos + 1;
            let right = left + 1;
            let mut smallest = pos;
            if left < len && self.heap[left] < self.heap[smallest] {
                smallest = left;
            }
            if right < len && self.heap[right] < self.heap[smallest] {
                smallest = right;
            }
            if smallest == pos {
                return Ok(());
            }
            self.heap.swap(pos, smallest);
            let description = format!(
                "Sift down: {} is larger than child {}, swap them",
                self.heap[smallest], self.heap[pos]
            );
            self.emit(rec, description, i, [pos, smallest])?;
            pos = smallest;
        }
    }

    fn pop_min(&mut self, rec: &mut TraceRecorder, i: usize) -> Result<(), TraceError> {
        let smallest = self.heap[0];
        if let Some(last) = self.heap.pop() {
            if !self.heap.is_empty() {
                self.heap[0] = last;
            }
        }
        let description = format!(
            "The heap holds more than {} values: pop the minimum {smallest} and move the last value to the root",
            self.k
        );
        self.emit(rec, description, i, [0])?;
        self.sift_down(rec, i)
    }
}

/// Finds the `k`-th largest value by streaming `nums` through a min-heap
/// that never holds more than `k` values. The root is the answer.
///
/// A `k` outside `1..=nums.len()` has no answer: the trace ends right after
/// initialization with `result = null`.
pub fn kth_largest(nums: &[i64], k: usize, config: &TraceConfig) -> Result<Trace, TraceError> {
    let mut rec = TraceRecorder::new(config);
    rec.step(
        StepKind::Init,
        format!("Keep the {k} largest values seen so far in a min-heap"),
    )
    .data("nums", nums)
    .data("heap", Vec::<i64>::new())
    .var("k", k)
    .var("i", None::<usize>)
    .var("size", 0usize)
    .var("result", None::<i64>)
    .emit()?;

    if k == 0 || k > nums.len() {
        rec.step(
            StepKind::Terminal,
            format!("k = {k} is outside 1..={}: there is no answer", nums.len()),
        )
        .data("nums", nums)
        .data("heap", Vec::<i64>::new())
        .var("k", k)
        .var("result", None::<i64>)
        .emit()?;
        return rec.finish();
    }

    let mut walk = MinHeapWalk {
        nums,
        k,
        heap: Vec::with_capacity(k + 1),
    };
    for (i, &value) in nums.iter().enumerate() {
        walk.heap.push(value);
        let pos = walk.heap.len() - 1;
        walk.emit(&mut rec, format!("Push nums[{i}] = {value} onto the heap"), i, [pos])?;
        walk.sift_up(&mut rec, i)?;
        if walk.heap.len() > k {
            walk.pop_min(&mut rec, i)?;
        }
    }

    let root = walk.heap[0];
    rec.step(
        StepKind::Terminal,
        format!("The root {root} is the smallest of the {k} largest values: the answer"),
    )
    .data("nums", nums)
    .data("heap", &walk.heap)
    .var("k", k)
    .var("size", walk.heap.len())
    .var("result", root)
    .index(0)
    .emit()?;

    rec.finish()
}

static KTH_LARGEST_INFO: AlgorithmInfo = AlgorithmInfo {
    id: ProblemId(215),
    title: "Kth Largest Element",
    category: Category::Heap,
    summary: "Stream values through a size-k min-heap; the root is the answer",
    fields: &[
        FieldSpec {
            name: "nums",
            label: "Array",
            kind: FieldKind::IntList,
            placeholder: "3,2,1,5,6,4",
        },
        FieldSpec {
            name: "k",
            label: "k",
            kind: FieldKind::Int,
            placeholder: "2",
        },
    ],
};

/// Validated input for [`KthLargest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KthLargestInput {
    pub nums: Vec<i64>,
    pub k: usize,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct KthLargest;

impl KthLargest {
    pub const ID: ProblemId = ProblemId(215);
}

impl Algorithm for KthLargest {
    type Input = KthLargestInput;

    fn info(&self) -> &'static AlgorithmInfo {
        &KTH_LARGEST_INFO
    }

    fn test_cases(&self) -> Vec<TestCase> {
        vec![
            TestCase::new(
                "Example",
                RawInput::new().with("nums", "3,2,1,5,6,4").with("k", "2"),
            ),
            TestCase::new(
                "With duplicates",
                RawInput::new().with("nums", "3,2,3,1,2,4,5,5,6").with("k", "4"),
            ),
            TestCase::new("Single", RawInput::new().with("nums", "7").with("k", "1")),
        ]
    }

    fn parse(&self, raw: &RawInput) -> Result<KthLargestInput, InputError> {
        let nums = bounded_list(raw, "nums")?;
        let k = raw.int("k")?;
        if k < 1 || k as usize > nums.len() {
            return Err(InputError::invalid(
                "k",
                format!("must be between 1 and {}, got {k}", nums.len()),
            ));
        }
        Ok(KthLargestInput {
            nums,
            k: k as usize,
        })
    }

    fn run(&self, input: &KthLargestInput, config: &TraceConfig) -> Result<Trace, TraceError> {
        kth_largest(&input.nums, input.k, config)
    }

    fn random_input(&self, rng: &mut ChaCha8Rng) -> RawInput {
        let len = rng.gen_range(4..=10);
        let nums = random::int_list(rng, len, 0, 30);
        let k = rng.gen_range(1..=len);
        RawInput::new()
            .with("nums", random::format_list(&nums))
            .with("k", k.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use algoviz_core::Value;

    fn is_min_heap(heap: &[i64]) -> bool {
        (1..heap.len()).all(|i| heap[(i - 1) / 2] <= heap[i])
    }

    #[test]
    fn example_answer() {
        let trace = kth_largest(&[3, 2, 1, 5, 6, 4], 2, &TraceConfig::default()).unwrap();
        let last = trace.last().unwrap();
        assert_eq!(last.var("result"), Some(&Value::Int(5)));
        assert_eq!(last.datum("heap").unwrap().to_int_vec(), Some(vec![5, 6]));
    }

    #[test]
    fn duplicates_answer() {
        let trace = kth_largest(&[3, 2, 3, 1, 2, 4, 5, 5, 6], 4, &TraceConfig::default()).unwrap();
        assert_eq!(trace.last().unwrap().var("result"), Some(&Value::Int(4)));
    }

    #[test]
    fn heap_never_exceeds_k_plus_one() {
        let trace = kth_largest(&[9, 8, 7, 6, 5, 4, 3], 3, &TraceConfig::default()).unwrap();
        for step in trace.iter() {
            let heap = step.datum("heap").unwrap().to_int_vec().unwrap();
            assert!(heap.len() <= 4);
        }
    }

    #[test]
    fn finished_sifts_leave_a_valid_heap() {
        let trace = kth_largest(&[5, 1, 4, 2, 8, 0, 3], 4, &TraceConfig::default()).unwrap();
        // The state after each push-and-settle is a heap again by the time
        // the next value is pushed.
        let heaps = trace
            .iter()
            .filter(|s| s.description.starts_with("Push"))
            .map(|s| s.datum("heap").unwrap().to_int_vec().unwrap());
        for heap in heaps {
            let without_new = &heap[..heap.len() - 1];
            assert!(is_min_heap(without_new), "{heap:?}");
        }
        assert!(is_min_heap(
            &trace.last().unwrap().datum("heap").unwrap().to_int_vec().unwrap()
        ));
    }

    #[test]
    fn k_out_of_range_has_no_answer() {
        let trace = kth_largest(&[1, 2], 3, &TraceConfig::default()).unwrap();
        assert_eq!(trace.len(), 2);
        assert_eq!(trace.last().unwrap().var("result"), Some(&Value::Null));

        let empty = kth_largest(&[], 1, &TraceConfig::default()).unwrap();
        assert_eq!(empty.len(), 2);
    }

    #[test]
    fn parse_checks_k_bounds() {
        let raw = RawInput::new().with("nums", "1,2,3").with("k", "0");
        assert!(KthLargest.parse(&raw).is_err());
        let raw = RawInput::new().with("nums", "1,2,3").with("k", "4");
        assert!(KthLargest.parse(&raw).is_err());
        let raw = RawInput::new().with("nums", "1,2,3").with("k", "3");
        assert_eq!(KthLargest.parse(&raw).unwrap().k, 3);
    }
}
