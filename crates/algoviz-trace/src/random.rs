//! Seeded random inputs.
//!
//! Visualizers draw random inputs from a [`ChaCha8Rng`] so that a seed fully
//! determines the input, and therefore the trace. The helpers return the
//! text a user would have typed, so random inputs go through the same
//! validation as typed ones.

use rand::seq::SliceRandom;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Creates the generator used for random inputs.
pub fn rng_from_seed(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Formats integers the way the list parser reads them back. The empty list
/// is spelled `[]`, since a blank field counts as missing.
pub fn format_list(values: &[i64]) -> String {
    if values.is_empty() {
        return "[]".to_string();
    }
    values
        .iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Formats a matrix as `;`-separated rows.
pub fn format_matrix(rows: &[Vec<i64>]) -> String {
    rows.iter()
        .map(|row| format_list(row))
        .collect::<Vec<_>>()
        .join(";")
}

/// `len` integers drawn uniformly from `lo..=hi`.
pub fn int_list(rng: &mut ChaCha8Rng, len: usize, lo: i64, hi: i64) -> Vec<i64> {
    (0..len).map(|_| rng.gen_range(lo..=hi)).collect()
}

/// Like [`int_list`], but roughly a third of the entries are zero.
pub fn int_list_with_zeros(rng: &mut ChaCha8Rng, len: usize, hi: i64) -> Vec<i64> {
    (0..len)
        .map(|_| {
            if rng.gen_ratio(1, 3) {
                0
            } else {
                rng.gen_range(1..=hi)
            }
        })
        .collect()
}

/// `len` distinct integers from `lo..=hi`, in random order.
///
/// Falls back to fewer values when the range is smaller than `len`.
pub fn distinct_ints(rng: &mut ChaCha8Rng, len: usize, lo: i64, hi: i64) -> Vec<i64> {
    let mut pool: Vec<i64> = (lo..=hi).collect();
    pool.shuffle(rng);
    pool.truncate(len);
    pool
}

/// A sorted list of `len` integers from `lo..=hi`.
pub fn sorted_int_list(rng: &mut ChaCha8Rng, len: usize, lo: i64, hi: i64) -> Vec<i64> {
    let mut values = int_list(rng, len, lo, hi);
    values.sort_unstable();
    values
}

/// A `rows x cols` matrix of integers from `lo..=hi`.
pub fn matrix(rng: &mut ChaCha8Rng, rows: usize, cols: usize, lo: i64, hi: i64) -> Vec<Vec<i64>> {
    (0..rows).map(|_| int_list(rng, cols, lo, hi)).collect()
}

/// A bracket string of length `len`. Balanced about half the time.
pub fn brackets(rng: &mut ChaCha8Rng, len: usize) -> String {
    const PAIRS: [(char, char); 3] = [('(', ')'), ('[', ']'), ('{', '}')];

    if rng.gen_bool(0.5) {
        let mut out = String::with_capacity(len);
        let mut open: Vec<char> = Vec::new();
        for remaining in (0..len).rev() {
            let must_close = open.len() > remaining;
            let can_open = open.len() < remaining;
            if !open.is_empty() && (must_close || !can_open || rng.gen_bool(0.5)) {
                if let Some(close) = open.pop() {
                    out.push(close);
                }
            } else {
                let (o, c) = PAIRS[rng.gen_range(0..PAIRS.len())];
                out.push(o);
                open.push(c);
            }
        }
        out
    } else {
        (0..len)
            .map(|_| {
                let (o, c) = PAIRS[rng.gen_range(0..PAIRS.len())];
                if rng.gen_bool(0.5) {
                    o
                } else {
                    c
                }
            })
            .collect()
    }
}
