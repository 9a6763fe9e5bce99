//! Operator adjacency guard.
//!
//! Two operators in a row are refused, except a single `-` standing in a
//! unary position: at the start, right after `(`, or right after a binary
//! operator. The parser enforces the full grammar on its own; this only
//! catches the common typing mistakes early.

use super::error::EvalError;

/// What the last significant character was.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Prev {
    Start,
    Open,
    Operand,
    Binary,
    Unary,
}

fn is_operator(c: char) -> bool {
    matches!(c, '+' | '-' | '*' | '/')
}

impl Prev {
    /// Advance past `c`, or `None` if `c` may not follow.
    fn step(self, c: char) -> Option<Self> {
        if c.is_whitespace() {
            return Some(self);
        }
        if c == '(' {
            return Some(Self::Open);
        }
        if !is_operator(c) {
            // Digits, dots and ')' end an operand. Anything else is the
            // tokenizer's business.
            return Some(Self::Operand);
        }

        match self {
            Self::Operand => Some(Self::Binary),
            Self::Start | Self::Open if c == '-' => Some(Self::Unary),
            // A leading `+`, `*` or `/` is a grammar error, not an adjacency one.
            Self::Start | Self::Open => Some(Self::Binary),
            Self::Binary if c == '-' => Some(Self::Unary),
            Self::Binary | Self::Unary => None,
        }
    }
}

/// Reject adjacent operators in `input`.
pub fn check_operators(input: &str) -> Result<(), EvalError> {
    let mut prev = Prev::Start;

    for (position, c) in input.chars().enumerate() {
        prev = prev
            .step(c)
            .ok_or(EvalError::ConsecutiveOperators { position })?;
    }

    Ok(())
}

/// Check whether `next` may be typed after `current`.
pub fn can_append(current: &str, next: char) -> bool {
    current
        .chars()
        .try_fold(Prev::Start, Prev::step)
        .and_then(|prev| prev.step(next))
        .is_some()
}
