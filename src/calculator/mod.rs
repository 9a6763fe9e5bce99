//! Calculator module for evaluating arithmetic expressions.
//!
//! This module provides functionality to:
//! - Tokenize expressions made of numbers, `+ - * /` and parentheses
//! - Evaluate them with standard precedence, without any code evaluation
//! - Guard against adjacent operators while an expression is being typed
//! - Detect whether a line of text looks like an expression
//! - Format results for display

mod detection;
mod error;
mod evaluation;
mod guard;
mod parser;
mod token;

pub use detection::looks_like_expression;
pub use error::{ErrorKind, EvalError, Limit};
pub use evaluation::{
    CalcResult, EvalOptions, evaluate, evaluate_expression, format_display, format_result,
};
pub use guard::{can_append, check_operators};
pub use parser::evaluate_tokens;
pub use token::{Token, format_tokens, tokenize};
