//! Matrix walkthroughs: in-place rotation and spiral traversal.
//!
//! Matrix steps highlight `(row, col)` cells rather than flat indices.

use algoviz_core::{ProblemId, StepKind, Trace, TraceConfig, TraceError, TraceRecorder};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::input::{InputError, RawInput};
use crate::random;
use crate::visualizer::{Algorithm, AlgorithmInfo, Category, FieldKind, FieldSpec, TestCase};

const MAX_SIDE: usize = 8;

fn is_rectangular(matrix: &[Vec<i64>]) -> bool {
    matrix.windows(2).all(|w| w[0].len() == w[1].len())
}

fn is_square(matrix: &[Vec<i64>]) -> bool {
    matrix.iter().all(|row| row.len() == matrix.len())
}

fn parse_matrix(raw: &RawInput) -> Result<Vec<Vec<i64>>, InputError> {
    let matrix = raw.matrix("matrix")?;
    if !is_rectangular(&matrix) {
        return Err(InputError::invalid("matrix", "rows must all have the same length"));
    }
    let cols = matrix.first().map_or(0, Vec::len);
    if matrix.len() > MAX_SIDE || cols > MAX_SIDE {
        return Err(InputError::invalid(
            "matrix",
            format!("may be at most {MAX_SIDE} x {MAX_SIDE}"),
        ));
    }
    Ok(matrix)
}

// ---------------------------------------------------------------------------
// Rotate Image
// ---------------------------------------------------------------------------

/// Rotates a square matrix 90 degrees clockwise: transpose across the main
/// diagonal, then reverse every row.
///
/// A matrix that is not square cannot be rotated in place; the trace stops
/// after initialization and leaves it unchanged.
pub fn rotate_image(matrix: &[Vec<i64>], config: &TraceConfig) -> Result<Trace, TraceError> {
    let mut m = matrix.to_vec();
    let n = m.len();
    let mut rec = TraceRecorder::new(config);

    rec.step(
        StepKind::Init,
        "Rotate clockwise: transpose, then reverse each row",
    )
    .data("matrix", &m)
    .var("n", n)
    .var("phase", "transpose")
    .emit()?;

    if !is_square(&m) {
        rec.step(StepKind::Terminal, "The matrix is not square: it cannot be rotated in place")
            .data("matrix", &m)
            .var("n", n)
            .var("phase", "done")
            .emit()?;
        return rec.finish();
    }

    for i in 0..n {
        for j in i + 1..n {
            let upper = m[i][j];
            m[i][j] = m[j][i];
            m[j][i] = upper;
            rec.step(
                StepKind::Transition,
                format!("Transpose: swap ({i},{j}) and ({j},{i})"),
            )
            .data("matrix", &m)
            .var("n", n)
            .var("phase", "transpose")
            .var("row", i)
            .var("col", j)
            .cells([(i, j), (j, i)])
            .emit()?;
        }
    }

    for i in 0..n {
        m[i].reverse();
        rec.step(StepKind::Transition, format!("Reverse row {i}"))
            .data("matrix", &m)
            .var("n", n)
            .var("phase", "reverse")
            .var("row", i)
            .cells((0..n).map(|c| (i, c)))
            .emit()?;
    }

    rec.step(StepKind::Terminal, "The matrix is rotated 90 degrees clockwise")
        .data("matrix", &m)
        .var("n", n)
        .var("phase", "done")
        .emit()?;

    rec.finish()
}

static ROTATE_INFO: AlgorithmInfo = AlgorithmInfo {
    id: ProblemId(48),
    title: "Rotate Image",
    category: Category::Matrix,
    summary: "Rotate a square matrix clockwise in place",
    fields: &[FieldSpec {
        name: "matrix",
        label: "Square matrix",
        kind: FieldKind::Matrix,
        placeholder: "1,2,3;4,5,6;7,8,9",
    }],
};

#[derive(Debug, Default, Clone, Copy)]
pub struct RotateImage;

impl RotateImage {
    pub const ID: ProblemId = ProblemId(48);
}

impl Algorithm for RotateImage {
    type Input = Vec<Vec<i64>>;

    fn info(&self) -> &'static AlgorithmInfo {
        &ROTATE_INFO
    }

    fn test_cases(&self) -> Vec<TestCase> {
        vec![
            TestCase::new("3 x 3", RawInput::new().with("matrix", "1,2,3;4,5,6;7,8,9")),
            TestCase::new(
                "4 x 4",
                RawInput::new().with("matrix", "5,1,9,11;2,4,8,10;13,3,6,7;15,14,12,16"),
            ),
            TestCase::new("1 x 1", RawInput::new().with("matrix", "1")),
        ]
    }

    fn parse(&self, raw: &RawInput) -> Result<Vec<Vec<i64>>, InputError> {
        let matrix = parse_matrix(raw)?;
        if !is_square(&matrix) {
            return Err(InputError::invalid("matrix", "must be square"));
        }
        Ok(matrix)
    }

    fn run(&self, input: &Vec<Vec<i64>>, config: &TraceConfig) -> Result<Trace, TraceError> {
        rotate_image(input, config)
    }

    fn random_input(&self, rng: &mut ChaCha8Rng) -> RawInput {
        let n = rng.gen_range(2..=5);
        let m = random::matrix(rng, n, n, 1, 99);
        RawInput::new().with("matrix", random::format_matrix(&m))
    }
}

// ---------------------------------------------------------------------------
// Spiral Matrix
// ---------------------------------------------------------------------------

/// Lists the cells of a rectangular matrix in clockwise spiral order.
///
/// Four bounds shrink as each edge is consumed: the top row left to right,
/// the right column downwards, the bottom row right to left and the left
/// column upwards. Bounds are signed because `right` and `bottom` can drop
/// below zero on the last lap.
pub fn spiral_order(matrix: &[Vec<i64>], config: &TraceConfig) -> Result<Trace, TraceError> {
    let rows = matrix.len();
    let cols = matrix.first().map_or(0, Vec::len);
    let mut rec = TraceRecorder::new(config);
    let mut result: Vec<i64> = Vec::with_capacity(rows * cols);

    let (mut top, mut bottom) = (0i64, rows as i64 - 1);
    let (mut left, mut right) = (0i64, cols as i64 - 1);

    rec.step(StepKind::Init, "Start at the top-left corner with the full matrix in bounds")
        .data("matrix", matrix)
        .data("result", &result)
        .var("top", top)
        .var("bottom", bottom)
        .var("left", left)
        .var("right", right)
        .emit()?;

    if !is_rectangular(matrix) {
        rec.step(StepKind::Terminal, "Rows have different lengths: there is no spiral")
            .data("matrix", matrix)
            .data("result", &result)
            .emit()?;
        return rec.finish();
    }

    // Each lap visits up to four edges.
    while top <= bottom && left <= right {
        let mut path: Vec<(i64, i64, &str)> = Vec::new();
        path.extend((left..=right).map(|c| (top, c, "top row")));
        path.extend((top + 1..=bottom).map(|r| (r, right, "right column")));
        if top < bottom {
            path.extend((left..right).rev().map(|c| (bottom, c, "bottom row")));
        }
        if left < right {
            path.extend((top + 1..bottom).rev().map(|r| (r, left, "left column")));
        }

        for (r, c, edge) in path {
            let (r, c) = (r as usize, c as usize);
            let value = matrix[r][c];
            result.push(value);
            rec.step(
                StepKind::Transition,
                format!("Visit ({r},{c}) = {value} along the {edge}"),
            )
            .data("matrix", matrix)
            .data("result", &result)
            .var("top", top)
            .var("bottom", bottom)
            .var("left", left)
            .var("right", right)
            .cell(r, c)
            .emit()?;
        }

        top += 1;
        bottom -= 1;
        left += 1;
        right -= 1;
    }

    rec.step(
        StepKind::Terminal,
        format!("Visited all {} cells", result.len()),
    )
    .data("matrix", matrix)
    .data("result", &result)
    .var("top", top)
    .var("bottom", bottom)
    .var("left", left)
    .var("right", right)
    .emit()?;

    rec.finish()
}

static SPIRAL_INFO: AlgorithmInfo = AlgorithmInfo {
    id: ProblemId(54),
    title: "Spiral Matrix",
    category: Category::Matrix,
    summary: "Walk a matrix clockwise from the outside in",
    fields: &[FieldSpec {
        name: "matrix",
        label: "Matrix",
        kind: FieldKind::Matrix,
        placeholder: "1,2,3;4,5,6;7,8,9",
    }],
};

#[derive(Debug, Default, Clone, Copy)]
pub struct SpiralMatrix;

impl SpiralMatrix {
    pub const ID: ProblemId = ProblemId(54);
}

impl Algorithm for SpiralMatrix {
    type Input = Vec<Vec<i64>>;

    fn info(&self) -> &'static AlgorithmInfo {
        &SPIRAL_INFO
    }

    fn test_cases(&self) -> Vec<TestCase> {
        vec![
            TestCase::new("3 x 3", RawInput::new().with("matrix", "1,2,3;4,5,6;7,8,9")),
            TestCase::new("3 x 4", RawInput::new().with("matrix", "1,2,3,4;5,6,7,8;9,10,11,12")),
            TestCase::new("Single column", RawInput::new().with("matrix", "1;2;3")),
        ]
    }

    fn parse(&self, raw: &RawInput) -> Result<Vec<Vec<i64>>, InputError> {
        parse_matrix(raw)
    }

    fn run(&self, input: &Vec<Vec<i64>>, config: &TraceConfig) -> Result<Trace, TraceError> {
        spiral_order(input, config)
    }

    fn random_input(&self, rng: &mut ChaCha8Rng) -> RawInput {
        let rows = rng.gen_range(2..=5);
        let cols = rng.gen_range(2..=5);
        let m = random::matrix(rng, rows, cols, 1, 99);
        RawInput::new().with("matrix", random::format_matrix(&m))
    }
}
