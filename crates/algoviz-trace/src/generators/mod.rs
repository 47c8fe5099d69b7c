//! Trace generators, one module per algorithm family.
//!
//! Every generator is a pure function `(&input, &TraceConfig) ->
//! Result<Trace, TraceError>`. Generators work on a private copy of their
//! input, emit an `Init` step first and a `Terminal` step last, and accept
//! degenerate input (empty, single element) without failing. Next to each
//! generator sits the [`Algorithm`](crate::visualizer::Algorithm) impl that
//! validates form input for it.

pub mod backtracking;
pub mod binary_search;
pub mod dynamic_programming;
pub mod heap;
pub mod matrix;
pub mod sorting;
pub mod stack;
pub mod two_pointers;

use crate::input::{ensure_max_len, InputError, RawInput};

/// Longest list accepted by list-based visualizers.
pub(crate) const MAX_LIST_LEN: usize = 20;

/// Parses an integer list field and applies [`MAX_LIST_LEN`].
pub(crate) fn bounded_list(raw: &RawInput, field: &str) -> Result<Vec<i64>, InputError> {
    let values = raw.int_list(field)?;
    ensure_max_len(field, values.len(), MAX_LIST_LEN)?;
    Ok(values)
}
