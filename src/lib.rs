//! Safe arithmetic expression evaluation.
//!
//! [`calculator::evaluate`] turns text such as `(2+3)*4` into a finite `f64`
//! or a typed [`calculator::EvalError`]. Input is tokenized and parsed by an
//! explicit grammar; nothing is ever executed as code.

pub mod calculator;
pub mod config;
pub mod session;

pub use calculator::{EvalError, EvalOptions, evaluate};
