//! Parsing of raw console input.
//!
//! The interactive shell calls these in its retry loops so the rules stay
//! testable without a terminal.

use crate::error::ValidationError;

/// Parse a marks value. Surrounding whitespace is ignored.
pub fn parse_marks(input: &str) -> Result<i64, ValidationError> {
    let trimmed = input.trim();
    trimmed
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidMarks(trimmed.to_string()))
}

/// Parse a marks value where blank means "keep the current one".
pub fn parse_optional_marks(input: &str) -> Result<Option<i64>, ValidationError> {
    if input.trim().is_empty() {
        Ok(None)
    } else {
        parse_marks(input).map(Some)
    }
}

/// Blank input means "keep the current value".
pub fn optional_field(input: &str) -> Option<String> {
    let trimmed = input.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Only an explicit "yes" confirms a destructive action.
pub fn is_confirmed(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case("yes")
}
