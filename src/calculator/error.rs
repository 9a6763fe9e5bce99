//! Error types for expression evaluation.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

use super::token::Token;

/// Which configured limit an expression exceeded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Limit {
    /// Input length, in characters.
    Length,
    /// Nesting depth of parentheses.
    Depth,
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Length => f.write_str("length"),
            Self::Depth => f.write_str("nesting depth"),
        }
    }
}

/// Everything that can go wrong while evaluating an expression.
///
/// Positions are character offsets into the original input.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum EvalError {
    #[error("invalid character '{ch}' at position {position}")]
    InvalidCharacter { ch: char, position: usize },

    #[error("malformed number '{literal}' at position {position}")]
    MalformedNumber { literal: String, position: usize },

    #[error("consecutive operators at position {position}")]
    ConsecutiveOperators { position: usize },

    #[error("unbalanced parentheses")]
    UnbalancedParentheses,

    #[error("unexpected end of input")]
    UnexpectedEndOfInput,

    #[error("unexpected token '{token}'")]
    UnexpectedToken { token: Token },

    #[error("division by zero")]
    DivisionByZero,

    #[error("result is not a finite number")]
    NonFiniteResult,

    #[error("expression too complex: {limit} exceeds the limit of {max}")]
    ExpressionTooComplex { limit: Limit, max: usize },
}

/// Fieldless classification of an [`EvalError`], for logs, tests and JSON output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidCharacter,
    MalformedNumber,
    ConsecutiveOperators,
    UnbalancedParentheses,
    UnexpectedEndOfInput,
    UnexpectedToken,
    DivisionByZero,
    NonFiniteResult,
    ExpressionTooComplex,
}

impl EvalError {
    /// Get the kind of this error without its details.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidCharacter { .. } => ErrorKind::InvalidCharacter,
            Self::MalformedNumber { .. } => ErrorKind::MalformedNumber,
            Self::ConsecutiveOperators { .. } => ErrorKind::ConsecutiveOperators,
            Self::UnbalancedParentheses => ErrorKind::UnbalancedParentheses,
            Self::UnexpectedEndOfInput => ErrorKind::UnexpectedEndOfInput,
            Self::UnexpectedToken { .. } => ErrorKind::UnexpectedToken,
            Self::DivisionByZero => ErrorKind::DivisionByZero,
            Self::NonFiniteResult => ErrorKind::NonFiniteResult,
            Self::ExpressionTooComplex { .. } => ErrorKind::ExpressionTooComplex,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = EvalError::InvalidCharacter { ch: 'x', position: 3 };
        assert_eq!(err.to_string(), "invalid character 'x' at position 3");

        let err = EvalError::UnexpectedToken {
            token: Token::RParen,
        };
        assert_eq!(err.to_string(), "unexpected token ')'");

        let err = EvalError::ExpressionTooComplex {
            limit: Limit::Depth,
            max: 100,
        };
        assert_eq!(
            err.to_string(),
            "expression too complex: nesting depth exceeds the limit of 100"
        );
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let kind = EvalError::DivisionByZero.kind();
        assert_eq!(kind, ErrorKind::DivisionByZero);
        assert_eq!(
            serde_json::to_string(&kind).unwrap(),
            "\"division_by_zero\""
        );
    }
}
