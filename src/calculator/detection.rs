//! Expression detection.
//!
//! Decides whether a line of text should be handed to the calculator at all,
//! so front ends can tell expressions apart from their own commands.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Matches strings made only of calculator characters.
    static ref CALCULATOR_CHARS: Regex = Regex::new(r"^[0-9\s\.\+\-\*/()]+$").unwrap();
}

/// Check if input looks like something the calculator can evaluate.
///
/// Returns `true` if the trimmed input is non-empty, contains only
/// calculator characters and has at least one digit. Whether it actually
/// evaluates is left to [`evaluate`](super::evaluate).
pub fn looks_like_expression(input: &str) -> bool {
    let trimmed = input.trim();

    !trimmed.is_empty()
        && CALCULATOR_CHARS.is_match(trimmed)
        && trimmed.chars().any(|c| c.is_ascii_digit())
}
