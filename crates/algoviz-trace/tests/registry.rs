//! Integration tests across every built-in visualizer.
//!
//! Covers the properties every trace must hold regardless of algorithm:
//! framing (Init first, Terminal last, dense ids), determinism for equal
//! inputs and equal seeds, and snapshot independence. Two generators also
//! get property tests against a reference computation.

use algoviz_core::{StepKind, Trace, TraceConfig, Value};
use algoviz_trace::generators::binary_search::search_insert;
use algoviz_trace::generators::two_pointers::move_zeroes;
use algoviz_trace::random::rng_from_seed;
use algoviz_trace::{InputError, RawInput, Registry, VisualizeError};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn assert_framed(trace: &Trace, context: &str) {
    assert!(!trace.is_empty(), "{context}: empty trace");
    assert_eq!(trace.first().unwrap().kind, StepKind::Init, "{context}");
    assert_eq!(trace.last().unwrap().kind, StepKind::Terminal, "{context}");
    for (i, step) in trace.iter().enumerate() {
        assert_eq!(step.id.index(), i, "{context}: id out of place");
    }
    let terminals = trace.iter().filter(|s| s.kind == StepKind::Terminal).count();
    assert_eq!(terminals, 1, "{context}: exactly one terminal step");
}

// ---------------------------------------------------------------------------
// Every visualizer
// ---------------------------------------------------------------------------

#[test]
fn every_test_case_produces_a_framed_trace() {
    let reg = Registry::builtin();
    let config = TraceConfig::default();
    for id in reg.ids() {
        let vis = reg.resolve(id).unwrap();
        let cases = vis.test_cases();
        assert!(!cases.is_empty(), "problem {id} ships no test cases");
        for case in cases {
            let context = format!("problem {id} / {}", case.name);
            vis.validate(&case.input)
                .unwrap_or_else(|e| panic!("{context}: {e}"));
            let trace = vis
                .generate(&case.input, &config)
                .unwrap_or_else(|e| panic!("{context}: {e}"));
            assert_framed(&trace, &context);
        }
    }
}

#[test]
fn equal_inputs_give_equal_traces() {
    let reg = Registry::builtin();
    let config = TraceConfig::default();
    for id in reg.ids() {
        let vis = reg.resolve(id).unwrap();
        for case in vis.test_cases() {
            let a = vis.generate(&case.input, &config).unwrap();
            let b = vis.generate(&case.input.clone(), &config).unwrap();
            assert_eq!(a, b, "problem {id} / {}", case.name);
        }
    }
}

#[test]
fn equal_seeds_give_equal_traces() {
    let reg = Registry::builtin();
    let config = TraceConfig::default();
    for id in reg.ids() {
        let vis = reg.resolve(id).unwrap();
        for seed in [0u64, 7, 42, 1234] {
            let first = vis.random_input(&mut rng_from_seed(seed));
            let second = vis.random_input(&mut rng_from_seed(seed));
            assert_eq!(first, second, "problem {id}, seed {seed}");

            let trace = vis
                .generate(&first, &config)
                .unwrap_or_else(|e| panic!("problem {id}, seed {seed}: {e}"));
            assert_framed(&trace, &format!("problem {id}, seed {seed}"));
            assert_eq!(trace, vis.generate(&second, &config).unwrap());
        }
    }
}

#[test]
fn invalid_input_is_rejected_before_generation() {
    let reg = Registry::builtin();
    let vis = reg.resolve(algoviz_trace::generators::two_pointers::MoveZeroes::ID).unwrap();
    let raw = RawInput::new().with("nums", "1,x,3");
    assert!(matches!(
        vis.generate(&raw, &TraceConfig::default()),
        Err(VisualizeError::Input(InputError::NotANumber { .. }))
    ));
}

#[test]
fn tight_step_limit_surfaces_as_trace_error() {
    let reg = Registry::builtin();
    let vis = reg.resolve(algoviz_trace::generators::sorting::MergeSort::ID).unwrap();
    let raw = RawInput::new().with("nums", "5,4,3,2,1");
    let err = vis
        .generate(&raw, &TraceConfig { max_steps: 4 })
        .unwrap_err();
    assert!(matches!(err, VisualizeError::Trace(_)));
}

// ---------------------------------------------------------------------------
// Snapshot independence
// ---------------------------------------------------------------------------

#[test]
fn earlier_snapshots_do_not_change() {
    let trace = move_zeroes(&[0, 1, 0, 3, 12], &TraceConfig::default()).unwrap();
    let snapshots: Vec<Vec<i64>> = trace
        .iter()
        .map(|s| s.datum("nums").unwrap().to_int_vec().unwrap())
        .collect();
    assert_eq!(snapshots[0], vec![0, 1, 0, 3, 12]);
    assert_eq!(snapshots.last().unwrap(), &vec![1, 3, 12, 0, 0]);
    // each snapshot differs from the next by at most one swap
    for pair in snapshots.windows(2) {
        let changed = pair[0].iter().zip(&pair[1]).filter(|(a, b)| a != b).count();
        assert!(changed == 0 || changed == 2, "{pair:?}");
    }
}

// ---------------------------------------------------------------------------
// Property tests
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn move_zeroes_keeps_order_and_pushes_zeroes_back(
        nums in proptest::collection::vec(prop_oneof![Just(0i64), -9i64..10], 0..20)
    ) {
        let trace = move_zeroes(&nums, &TraceConfig::default()).unwrap();
        let last = trace.last().unwrap();
        let out = last.datum("nums").unwrap().to_int_vec().unwrap();

        let non_zero: Vec<i64> = nums.iter().copied().filter(|&n| n != 0).collect();
        prop_assert_eq!(&out[..non_zero.len()], &non_zero[..]);
        prop_assert!(out[non_zero.len()..].iter().all(|&n| n == 0));
        prop_assert_eq!(last.var("finished"), Some(&Value::Bool(true)));
        // init + one step per element + terminal
        prop_assert_eq!(trace.len(), nums.len() + 2);
    }

    #[test]
    fn search_insert_matches_partition_point(
        set in proptest::collection::btree_set(-50i64..50, 0..20),
        target in -60i64..60,
    ) {
        let nums: Vec<i64> = set.into_iter().collect();
        let trace = search_insert(&nums, target, &TraceConfig::default()).unwrap();
        let expected = nums.partition_point(|&n| n < target) as i64;
        prop_assert_eq!(trace.last().unwrap().var("result"), Some(&Value::Int(expected)));
        // binary search never needs more than log2(n) + 1 probes
        let probes = trace.len() - 1;
        prop_assert!(probes <= 6);
    }
}
