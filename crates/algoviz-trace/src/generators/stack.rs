//! Stack walkthrough: balanced brackets.

use algoviz_core::{ProblemId, StepKind, Trace, TraceConfig, TraceError, TraceRecorder};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::input::{ensure_max_len, InputError, RawInput};
use crate::random;
use crate::visualizer::{Algorithm, AlgorithmInfo, Category, FieldKind, FieldSpec, TestCase};

const MAX_BRACKETS: usize = 40;

fn opener_for(close: char) -> Option<char> {
    match close {
        ')' => Some('('),
        ']' => Some('['),
        '}' => Some('{'),
        _ => None,
    }
}

fn is_opener(c: char) -> bool {
    matches!(c, '(' | '[' | '{')
}

/// Checks whether every bracket in `s` is closed by the matching bracket in
/// the right order.
///
/// Openers are pushed; a closer must match the top of the stack. The first
/// mismatch ends the trace immediately with `isValid = false`. Characters
/// that are not brackets are skipped with a step of their own.
///
/// Highlighted indices are positions in `chars`. The final step highlights
/// the openers left unclosed.
pub fn valid_parentheses(s: &str, config: &TraceConfig) -> Result<Trace, TraceError> {
    let chars: Vec<char> = s.chars().collect();
    let mut stack: Vec<char> = Vec::new();
    // position in `chars` of each stacked opener
    let mut opened_at: Vec<usize> = Vec::new();
    let mut rec = TraceRecorder::new(config);

    rec.step(StepKind::Init, "Start with an empty stack")
        .data("chars", &chars)
        .data("stack", &stack)
        .var("index", None::<usize>)
        .var("char", None::<char>)
        .var("isValid", None::<bool>)
        .emit()?;

    for (index, &c) in chars.iter().enumerate() {
        if is_opener(c) {
            stack.push(c);
            opened_at.push(index);
            rec.step(StepKind::Transition, format!("'{c}' opens a group: push it"))
                .data("chars", &chars)
                .data("stack", &stack)
                .var("index", index)
                .var("char", c)
                .var("isValid", None::<bool>)
                .index(index)
                .emit()?;
            continue;
        }

        let Some(expected) = opener_for(c) else {
            rec.step(StepKind::Transition, format!("'{c}' is not a bracket: skip it"))
                .data("chars", &chars)
                .data("stack", &stack)
                .var("index", index)
                .var("char", c)
                .var("isValid", None::<bool>)
                .index(index)
                .emit()?;
            continue;
        };

        match stack.last().copied() {
            Some(top) if top == expected => {
                stack.pop();
                opened_at.pop();
                rec.step(
                    StepKind::Transition,
                    format!("'{c}' closes the '{top}' on top of the stack: pop it"),
                )
                .data("chars", &chars)
                .data("stack", &stack)
                .var("index", index)
                .var("char", c)
                .var("isValid", None::<bool>)
                .index(index)
                .emit()?;
            }
            top => {
                let description = match top {
                    Some(top) => format!("'{c}' cannot close '{top}': the string is invalid"),
                    None => format!("'{c}' has nothing to close: the string is invalid"),
                };
                rec.step(StepKind::Terminal, description)
                    .data("chars", &chars)
                    .data("stack", &stack)
                    .var("index", index)
                    .var("char", c)
                    .var("isValid", false)
                    .index(index)
                    .emit()?;
                return rec.finish();
            }
        }
    }

    let is_valid = stack.is_empty();
    let description = if is_valid {
        "Every bracket was closed: the string is valid".to_string()
    } else {
        format!("{} bracket(s) were never closed: the string is invalid", stack.len())
    };
    rec.step(StepKind::Terminal, description)
        .data("chars", &chars)
        .data("stack", &stack)
        .var("index", None::<usize>)
        .var("char", None::<char>)
        .var("isValid", is_valid)
        .indices(opened_at.iter().copied())
        .emit()?;

    rec.finish()
}

static VALID_PARENTHESES_INFO: AlgorithmInfo = AlgorithmInfo {
    id: ProblemId(20),
    title: "Valid Parentheses",
    category: Category::Stack,
    summary: "Check that every bracket is closed in the right order",
    fields: &[FieldSpec {
        name: "s",
        label: "Brackets",
        kind: FieldKind::Text,
        placeholder: "()[]{}",
    }],
};

#[derive(Debug, Default, Clone, Copy)]
pub struct ValidParentheses;

impl ValidParentheses {
    pub const ID: ProblemId = ProblemId(20);
}

impl Algorithm for ValidParentheses {
    type Input = String;

    fn info(&self) -> &'static AlgorithmInfo {
        &VALID_PARENTHESES_INFO
    }

    fn test_cases(&self) -> Vec<TestCase> {
        vec![
            TestCase::new("All pairs", RawInput::new().with("s", "()[]{}")),
            TestCase::new("Mismatch", RawInput::new().with("s", "(]")),
            TestCase::new("Nested", RawInput::new().with("s", "{[()]}")),
            TestCase::new("Unclosed", RawInput::new().with("s", "((")),
        ]
    }

    fn parse(&self, raw: &RawInput) -> Result<String, InputError> {
        let s: String = raw.text("s")?.chars().filter(|c| !c.is_whitespace()).collect();
        ensure_max_len("s", s.chars().count(), MAX_BRACKETS)?;
        if let Some(bad) = s.chars().find(|c| !is_opener(*c) && opener_for(*c).is_none()) {
            return Err(InputError::invalid(
                "s",
                format!("may only contain ()[]{{}}, found '{bad}'"),
            ));
        }
        Ok(s)
    }

    fn run(&self, input: &String, config: &TraceConfig) -> Result<Trace, TraceError> {
        valid_parentheses(input, config)
    }

    fn random_input(&self, rng: &mut ChaCha8Rng) -> RawInput {
        let len = rng.gen_range(2..=8) * 2;
        RawInput::new().with("s", random::brackets(rng, len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use algoviz_core::Value;

    fn run(s: &str) -> Trace {
        valid_parentheses(s, &TraceConfig::default()).unwrap()
    }

    #[test]
    fn all_pairs_is_valid_with_empty_stack() {
        let trace = run("()[]{}");
        let last = trace.last().unwrap();
        assert_eq!(last.var("isValid"), Some(&Value::Bool(true)));
        assert_eq!(last.datum("stack").unwrap().as_list(), Some(&[][..]));
        // init + one step per char + terminal
        assert_eq!(trace.len(), 8);
    }

    #[test]
    fn mismatch_terminates_at_the_offending_char() {
        let trace = run("(]");
        assert_eq!(trace.len(), 3);
        let last = trace.last().unwrap();
        assert_eq!(last.kind, StepKind::Terminal);
        assert_eq!(last.var("isValid"), Some(&Value::Bool(false)));
        assert_eq!(last.var("index"), Some(&Value::Int(1)));
        assert_eq!(last.var("char"), Some(&Value::Str("]".into())));
    }

    #[test]
    fn stack_snapshots_track_pushes_and_pops() {
        let trace = run("{[]}");
        let depths: Vec<usize> = trace
            .iter()
            .map(|s| s.datum("stack").unwrap().as_list().unwrap().len())
            .collect();
        assert_eq!(depths, vec![0, 1, 2, 1, 0, 0]);
    }

    #[test]
    fn unclosed_openers_are_invalid() {
        let trace = run("((");
        assert_eq!(trace.last().unwrap().var("isValid"), Some(&Value::Bool(false)));
    }

    #[test]
    fn unclosed_openers_are_highlighted_in_chars() {
        let trace = run("(()[");
        let last = trace.last().unwrap();
        assert_eq!(last.datum("stack").unwrap().as_list().unwrap().len(), 2);
        assert_eq!(last.highlighted_indices, vec![0, 3]);

        assert!(run("()").last().unwrap().highlighted_indices.is_empty());
    }

    #[test]
    fn closer_on_empty_stack_is_invalid() {
        let trace = run(")");
        assert_eq!(trace.len(), 2);
        assert_eq!(trace.last().unwrap().var("isValid"), Some(&Value::Bool(false)));
    }

    #[test]
    fn empty_string_is_valid() {
        let trace = run("");
        assert_eq!(trace.len(), 2);
        assert_eq!(trace.last().unwrap().var("isValid"), Some(&Value::Bool(true)));
    }

    #[test]
    fn parse_rejects_letters_and_strips_spaces() {
        let raw = RawInput::new().with("s", "(a)");
        assert!(matches!(
            ValidParentheses.parse(&raw),
            Err(InputError::Invalid { .. })
        ));
        let spaced = RawInput::new().with("s", "( )");
        assert_eq!(ValidParentheses.parse(&spaced).unwrap(), "()");
    }
}
