//! Expression evaluation entry points and result formatting.

use serde::Deserialize;

use super::error::{EvalError, Limit};
use super::guard::check_operators;
use super::parser::evaluate_tokens;
use super::token::tokenize;

/// Limits applied to a single evaluation.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EvalOptions {
    /// Maximum input length, in characters.
    pub max_length: usize,
    /// Maximum nesting depth of parentheses.
    pub max_depth: usize,
}

impl Default for EvalOptions {
    fn default() -> Self {
        Self {
            max_length: 1000,
            max_depth: 100,
        }
    }
}

/// Evaluate an arithmetic expression.
///
/// Runs the length limit, the operator guard, the tokenizer and the parser,
/// in that order. The returned value is always finite.
pub fn evaluate(input: &str, options: &EvalOptions) -> Result<f64, EvalError> {
    let result = evaluate_unlogged(input, options);

    match &result {
        Ok(value) => tracing::debug!(len = input.len(), value, "evaluated expression"),
        Err(err) => tracing::debug!(len = input.len(), kind = ?err.kind(), %err, "evaluation failed"),
    }

    result
}

fn evaluate_unlogged(input: &str, options: &EvalOptions) -> Result<f64, EvalError> {
    if input.chars().nth(options.max_length).is_some() {
        return Err(EvalError::ExpressionTooComplex {
            limit: Limit::Length,
            max: options.max_length,
        });
    }

    check_operators(input)?;
    let tokens = tokenize(input)?;
    evaluate_tokens(&tokens, options.max_depth)
}

/// Result of evaluating a calculator expression, ready for display.
#[derive(Clone, Debug)]
pub enum CalcResult {
    /// Successful calculation.
    Success {
        /// The original expression, trimmed.
        expression: String,
        /// The numeric value.
        value: f64,
        /// Formatted for display (grouped if requested).
        display_result: String,
        /// Canonical form that evaluates back to `value`.
        plain_result: String,
    },
    /// Evaluation failed.
    Error {
        /// The original expression, trimmed.
        expression: String,
        /// Why it failed.
        error: EvalError,
    },
}

impl CalcResult {
    /// Text shown in place of a result when evaluation fails.
    pub const ERROR_DISPLAY: &'static str = "Error";

    /// Get the expression that was evaluated.
    pub fn expression(&self) -> &str {
        match self {
            Self::Success { expression, .. } => expression,
            Self::Error { expression, .. } => expression,
        }
    }

    /// Check if this is a successful result.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Get the display string (result, or the generic error text).
    pub fn display(&self) -> &str {
        match self {
            Self::Success { display_result, .. } => display_result,
            Self::Error { .. } => Self::ERROR_DISPLAY,
        }
    }

    /// Get the canonical result string (only for successful results).
    pub fn plain(&self) -> Option<&str> {
        match self {
            Self::Success { plain_result, .. } => Some(plain_result),
            Self::Error { .. } => None,
        }
    }

    /// Get the error (only for failed results).
    pub fn error(&self) -> Option<&EvalError> {
        match self {
            Self::Success { .. } => None,
            Self::Error { error, .. } => Some(error),
        }
    }
}

/// Evaluate an expression and format the outcome.
pub fn evaluate_expression(input: &str, options: &EvalOptions, grouped: bool) -> CalcResult {
    let expression = input.trim().to_string();

    match evaluate(&expression, options) {
        Ok(value) => CalcResult::Success {
            display_result: if grouped {
                format_display(value)
            } else {
                format_result(value)
            },
            plain_result: format_result(value),
            value,
            expression,
        },
        Err(error) => CalcResult::Error { expression, error },
    }
}

/// Format a result so that evaluating the text gives the same value back.
pub fn format_result(value: f64) -> String {
    if value == 0.0 {
        // Covers -0 as well.
        "0".to_string()
    } else {
        format!("{}", value)
    }
}

/// Format a result with thousand separators in the integer part.
pub fn format_display(value: f64) -> String {
    let plain = format_result(value);
    let (sign, unsigned) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain.as_str()),
    };
    let (int_part, frac_part) = match unsigned.find('.') {
        Some(dot) => unsigned.split_at(dot),
        None => (unsigned, ""),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("{}{}{}", sign, grouped, frac_part)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::error::ErrorKind;

    fn eval(input: &str) -> Result<f64, EvalError> {
        evaluate(input, &EvalOptions::default())
    }

    #[test]
    fn test_basic_evaluation() {
        assert_eq!(eval("2+3*4"), Ok(14.0));
        assert_eq!(eval("(2+3)*4"), Ok(20.0));
        assert_eq!(eval("-5*-2"), Ok(10.0));
        assert_eq!(eval(" 1.5 + .5 "), Ok(2.0));
    }

    #[test]
    fn test_error_kinds() {
        let kind = |input: &str| eval(input).unwrap_err().kind();

        assert_eq!(kind("2+x"), ErrorKind::InvalidCharacter);
        assert_eq!(kind("1.2.3"), ErrorKind::MalformedNumber);
        assert_eq!(kind("5++3"), ErrorKind::ConsecutiveOperators);
        assert_eq!(kind("3+(4*2"), ErrorKind::UnbalancedParentheses);
        assert_eq!(kind(""), ErrorKind::UnexpectedEndOfInput);
        assert_eq!(kind("3+"), ErrorKind::UnexpectedEndOfInput);
        assert_eq!(kind("3 4"), ErrorKind::UnexpectedToken);
        assert_eq!(kind("10/0"), ErrorKind::DivisionByZero);
        assert_eq!(kind(&"9".repeat(400)), ErrorKind::MalformedNumber);
        assert_eq!(kind(&format!("{}*10", "9".repeat(308))), ErrorKind::NonFiniteResult);
    }

    #[test]
    fn test_guard_runs_before_tokenizer() {
        // Both problems present; the adjacency guard reports first.
        assert_eq!(eval("5+*a").unwrap_err().kind(), ErrorKind::ConsecutiveOperators);
    }

    #[test]
    fn test_length_limit() {
        let options = EvalOptions {
            max_length: 5,
            ..EvalOptions::default()
        };
        assert_eq!(evaluate("1+2+3", &options), Ok(6.0));
        assert_eq!(
            evaluate("1+2+34", &options),
            Err(EvalError::ExpressionTooComplex {
                limit: Limit::Length,
                max: 5
            })
        );

        let long = "1+".repeat(600) + "1";
        assert_eq!(
            eval(&long).unwrap_err().kind(),
            ErrorKind::ExpressionTooComplex
        );
    }

    #[test]
    fn test_depth_limit_from_options() {
        let options = EvalOptions {
            max_depth: 2,
            ..EvalOptions::default()
        };
        assert_eq!(evaluate("((1))", &options), Ok(1.0));
        assert_eq!(
            evaluate("(((1)))", &options).unwrap_err().kind(),
            ErrorKind::ExpressionTooComplex
        );
    }

    #[test]
    fn test_calc_result_success() {
        let result = evaluate_expression(" 1000 * 1000 ", &EvalOptions::default(), true);
        assert!(result.is_success());
        assert_eq!(result.expression(), "1000 * 1000");
        assert_eq!(result.display(), "1,000,000");
        assert_eq!(result.plain(), Some("1000000"));
        assert!(result.error().is_none());
    }

    #[test]
    fn test_calc_result_error() {
        let result = evaluate_expression("1/0", &EvalOptions::default(), false);
        assert!(!result.is_success());
        assert_eq!(result.display(), "Error");
        assert_eq!(result.plain(), None);
        assert_eq!(result.error(), Some(&EvalError::DivisionByZero));
    }

    #[test]
    fn test_format_result() {
        assert_eq!(format_result(14.0), "14");
        assert_eq!(format_result(-0.0), "0");
        assert_eq!(format_result(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(format_result(-2.5), "-2.5");
    }

    #[test]
    fn test_format_display() {
        assert_eq!(format_display(0.0), "0");
        assert_eq!(format_display(999.0), "999");
        assert_eq!(format_display(1000.0), "1,000");
        assert_eq!(format_display(-1234567.25), "-1,234,567.25");
        assert_eq!(format_display(123456.0), "123,456");
    }
}
