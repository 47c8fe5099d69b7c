//! Form-style input and validation.
//!
//! A front end submits a [`RawInput`]: an ordered map of field name to the
//! text the user typed. Each algorithm parses it into its own typed input
//! before any generator runs, so malformed input surfaces as an
//! [`InputError`] next to the offending field and never reaches a generator.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation failures, each naming the field it applies to.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// A required field is absent or blank.
    #[error("'{field}' is required")]
    Missing { field: String },

    /// A numeric field contains a token that is not an integer.
    #[error("'{field}' contains a non-numeric value '{token}'")]
    NotANumber { field: String, token: String },

    /// The value parsed but breaks a rule of the algorithm.
    #[error("'{field}' {message}")]
    Invalid { field: String, message: String },

    /// Too many values for a readable walkthrough.
    #[error("'{field}' accepts at most {max} values, got {len}")]
    TooLong { field: String, max: usize, len: usize },

    /// A `field=value` assignment could not be split.
    #[error("expected field=value, got '{text}'")]
    BadAssignment { text: String },
}

impl InputError {
    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        InputError::Invalid {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// The field this error refers to, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            InputError::Missing { field }
            | InputError::NotANumber { field, .. }
            | InputError::Invalid { field, .. }
            | InputError::TooLong { field, .. } => Some(field),
            InputError::BadAssignment { .. } => None,
        }
    }
}

/// Field name to raw text, in the order the form declares them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawInput {
    fields: IndexMap<String, String>,
}

impl RawInput {
    pub fn new() -> Self {
        RawInput::default()
    }

    /// Builder form of [`RawInput::set`].
    pub fn with(mut self, field: &str, text: impl Into<String>) -> Self {
        self.set(field, text);
        self
    }

    /// Sets a field. The last write for a field wins.
    pub fn set(&mut self, field: &str, text: impl Into<String>) {
        self.fields.insert(field.to_string(), text.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Builds an input from `field=value` assignments, e.g. command-line
    /// arguments. Only the first `=` splits, so values may contain `=`.
    pub fn from_assignments<I, S>(assignments: I) -> Result<Self, InputError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut input = RawInput::new();
        for assignment in assignments {
            let text = assignment.as_ref();
            match text.split_once('=') {
                Some((field, value)) if !field.trim().is_empty() => {
                    input.set(field.trim(), value);
                }
                _ => {
                    return Err(InputError::BadAssignment {
                        text: text.to_string(),
                    })
                }
            }
        }
        Ok(input)
    }

    /// Text field. Present-but-empty is allowed; absent is not.
    pub fn text(&self, field: &str) -> Result<&str, InputError> {
        self.get(field).ok_or_else(|| missing(field))
    }

    /// A single integer.
    pub fn int(&self, field: &str) -> Result<i64, InputError> {
        let text = self.required(field)?;
        parse_int(field, text)
    }

    /// A list of integers: `1,2,3`, `1 2 3` or `[1, 2, 3]`. `[]` is the empty
    /// list.
    pub fn int_list(&self, field: &str) -> Result<Vec<i64>, InputError> {
        let text = self.required(field)?;
        parse_ints(field, strip_brackets(text))
    }

    /// An integer matrix: rows separated by `;` or newlines (`1,2;3,4`), or a
    /// JSON array of arrays (`[[1,2],[3,4]]`).
    pub fn matrix(&self, field: &str) -> Result<Vec<Vec<i64>>, InputError> {
        let text = self.required(field)?;
        if text.starts_with('[') {
            return parse_json_matrix(field, text);
        }
        text.split(|c: char| c == ';' || c == '\n')
            .filter(|row| !row.trim().is_empty())
            .map(|row| parse_ints(field, strip_brackets(row.trim())))
            .collect()
    }

    fn required(&self, field: &str) -> Result<&str, InputError> {
        match self.get(field).map(str::trim) {
            Some(text) if !text.is_empty() => Ok(text),
            _ => Err(missing(field)),
        }
    }
}

/// Rejects inputs whose size would make a walkthrough unreadable.
pub fn ensure_max_len(field: &str, len: usize, max: usize) -> Result<(), InputError> {
    if len > max {
        return Err(InputError::TooLong {
            field: field.to_string(),
            max,
            len,
        });
    }
    Ok(())
}

/// Rejects values outside `min..=max`.
pub fn ensure_range(field: &str, value: i64, min: i64, max: i64) -> Result<(), InputError> {
    if value < min || value > max {
        return Err(InputError::invalid(
            field,
            format!("must be between {min} and {max}, got {value}"),
        ));
    }
    Ok(())
}

/// Rejects lists that are not sorted in non-decreasing order.
pub fn ensure_sorted(field: &str, values: &[i64]) -> Result<(), InputError> {
    if values.windows(2).any(|w| w[0] > w[1]) {
        return Err(InputError::invalid(field, "must be sorted in ascending order"));
    }
    Ok(())
}

fn missing(field: &str) -> InputError {
    InputError::Missing {
        field: field.to_string(),
    }
}

fn strip_brackets(text: &str) -> &str {
    let text = text.trim();
    let text = text.strip_prefix('[').unwrap_or(text);
    text.strip_suffix(']').unwrap_or(text)
}

fn parse_int(field: &str, token: &str) -> Result<i64, InputError> {
    token.trim().parse::<i64>().map_err(|_| InputError::NotANumber {
        field: field.to_string(),
        token: token.trim().to_string(),
    })
}

fn parse_ints(field: &str, text: &str) -> Result<Vec<i64>, InputError> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| parse_int(field, token))
        .collect()
}

fn parse_json_matrix(field: &str, text: &str) -> Result<Vec<Vec<i64>>, InputError> {
    let rows: Vec<Vec<serde_json::Value>> = serde_json::from_str(text)
        .map_err(|e| InputError::invalid(field, format!("is not a valid matrix: {e}")))?;
    rows.into_iter()
        .map(|row| {
            row.into_iter()
                .map(|cell| {
                    cell.as_i64().ok_or_else(|| InputError::NotANumber {
                        field: field.to_string(),
                        token: cell.to_string(),
                    })
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_list_accepts_common_spellings() {
        for text in ["0,1,0,3,12", "0 1 0 3 12", "[0, 1, 0, 3, 12]", " 0,1 ,0, 3,12 "] {
            let input = RawInput::new().with("nums", text);
            assert_eq!(input.int_list("nums").unwrap(), vec![0, 1, 0, 3, 12], "{text}");
        }
    }

    #[test]
    fn empty_brackets_are_an_empty_list() {
        let input = RawInput::new().with("nums", "[]");
        assert_eq!(input.int_list("nums").unwrap(), Vec::<i64>::new());
    }

    #[test]
    fn blank_required_field_is_missing() {
        let input = RawInput::new().with("nums", "   ");
        assert_eq!(
            input.int_list("nums").unwrap_err(),
            InputError::Missing { field: "nums".into() }
        );
        assert!(matches!(RawInput::new().int("k"), Err(InputError::Missing { .. })));
    }

    #[test]
    fn non_numeric_token_is_named() {
        let input = RawInput::new().with("nums", "1,two,3");
        assert_eq!(
            input.int_list("nums").unwrap_err(),
            InputError::NotANumber {
                field: "nums".into(),
                token: "two".into(),
            }
        );
    }

    #[test]
    fn text_allows_empty_but_not_absent() {
        let input = RawInput::new().with("s", "");
        assert_eq!(input.text("s").unwrap(), "");
        assert!(input.text("t").is_err());
    }

    #[test]
    fn matrix_accepts_rows_and_json() {
        let rows = RawInput::new().with("matrix", "1,2,3; 4,5,6");
        assert_eq!(rows.matrix("matrix").unwrap(), vec![vec![1, 2, 3], vec![4, 5, 6]]);

        let json = RawInput::new().with("matrix", "[[1,2],[3,4]]");
        assert_eq!(json.matrix("matrix").unwrap(), vec![vec![1, 2], vec![3, 4]]);
    }

    #[test]
    fn matrix_rejects_non_integers() {
        let json = RawInput::new().with("matrix", r#"[[1,"x"]]"#);
        assert!(matches!(json.matrix("matrix"), Err(InputError::NotANumber { .. })));

        let broken = RawInput::new().with("matrix", "[[1,2]");
        assert!(matches!(broken.matrix("matrix"), Err(InputError::Invalid { .. })));
    }

    #[test]
    fn assignments_split_on_first_equals() {
        let input = RawInput::from_assignments(["nums=1,2", "s=a=b"]).unwrap();
        assert_eq!(input.get("nums"), Some("1,2"));
        assert_eq!(input.get("s"), Some("a=b"));

        let err = RawInput::from_assignments(["oops"]).unwrap_err();
        assert_eq!(err, InputError::BadAssignment { text: "oops".into() });
        assert_eq!(err.field(), None);
    }

    #[test]
    fn last_write_wins() {
        let input = RawInput::new().with("k", "1").with("k", "2");
        assert_eq!(input.int("k").unwrap(), 2);
        assert_eq!(input.fields().count(), 1);
    }

    #[test]
    fn guards_report_limits() {
        assert!(ensure_max_len("nums", 3, 3).is_ok());
        assert_eq!(
            ensure_max_len("nums", 4, 3).unwrap_err().to_string(),
            "'nums' accepts at most 3 values, got 4"
        );
        assert!(ensure_range("n", 0, 0, 45).is_ok());
        assert!(ensure_range("n", 46, 0, 45).is_err());
        assert!(ensure_sorted("nums", &[1, 1, 2]).is_ok());
        assert!(ensure_sorted("nums", &[2, 1]).is_err());
    }
}
