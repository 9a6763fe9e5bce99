//! Recursive-descent evaluator.
//!
//! Grammar:
//!
//! ```text
//! expression := term (('+' | '-') term)*
//! term       := factor (('*' | '/') factor)*
//! factor     := Number | '(' expression ')' | '-' factor
//! ```
//!
//! Each rule reduces to a value as soon as it is recognised; no tree is built.

use super::error::{EvalError, Limit};
use super::token::Token;

/// Evaluate a token stream.
///
/// Does not rely on any earlier validation: parenthesis balance and nesting
/// depth are checked here before descending.
pub fn evaluate_tokens(tokens: &[Token], max_depth: usize) -> Result<f64, EvalError> {
    check_parentheses(tokens, max_depth)?;

    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
        max_depth,
    };
    let value = parser.expression()?;

    match parser.peek() {
        None => {}
        Some(Token::RParen) => return Err(EvalError::UnbalancedParentheses),
        Some(token) => return Err(EvalError::UnexpectedToken { token }),
    }

    if value.is_finite() {
        Ok(value)
    } else {
        Err(EvalError::NonFiniteResult)
    }
}

/// Reject mismatched parentheses and over-deep nesting without recursing.
fn check_parentheses(tokens: &[Token], max_depth: usize) -> Result<(), EvalError> {
    let mut depth = 0usize;

    for token in tokens {
        match token {
            Token::LParen => {
                depth += 1;
                if depth > max_depth {
                    return Err(EvalError::ExpressionTooComplex {
                        limit: Limit::Depth,
                        max: max_depth,
                    });
                }
            }
            Token::RParen => {
                depth = depth
                    .checked_sub(1)
                    .ok_or(EvalError::UnbalancedParentheses)?;
            }
            _ => {}
        }
    }

    if depth == 0 {
        Ok(())
    } else {
        Err(EvalError::UnbalancedParentheses)
    }
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
    max_depth: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expression(&mut self) -> Result<f64, EvalError> {
        let mut value = self.term()?;

        while let Some(op @ (Token::Plus | Token::Minus)) = self.peek() {
            self.pos += 1;
            let rhs = self.term()?;
            value = match op {
                Token::Plus => value + rhs,
                _ => value - rhs,
            };
        }

        Ok(value)
    }

    fn term(&mut self) -> Result<f64, EvalError> {
        let mut value = self.factor()?;

        while let Some(op @ (Token::Star | Token::Slash)) = self.peek() {
            self.pos += 1;
            let rhs = self.factor()?;
            value = match op {
                Token::Star => value * rhs,
                _ => {
                    if rhs == 0.0 {
                        return Err(EvalError::DivisionByZero);
                    }
                    value / rhs
                }
            };
        }

        Ok(value)
    }

    fn factor(&mut self) -> Result<f64, EvalError> {
        // Unary minus is folded in a loop so only parentheses add recursion.
        let mut negations = 0usize;
        while let Some(Token::Minus) = self.peek() {
            self.pos += 1;
            negations += 1;
        }

        let value = self.primary()?;
        Ok(if negations % 2 == 1 { -value } else { value })
    }

    fn primary(&mut self) -> Result<f64, EvalError> {
        match self.advance() {
            Some(Token::Number(value)) => Ok(value),
            Some(Token::LParen) => {
                let value = self.nested(Self::expression)?;
                match self.advance() {
                    Some(Token::RParen) => Ok(value),
                    // Balance was checked up front, so this is a stray token.
                    Some(token) => Err(EvalError::UnexpectedToken { token }),
                    None => Err(EvalError::UnbalancedParentheses),
                }
            }
            Some(token) => Err(EvalError::UnexpectedToken { token }),
            None => Err(EvalError::UnexpectedEndOfInput),
        }
    }

    /// Run `rule` one parenthesis level deeper, enforcing the depth limit.
    fn nested(&mut self, rule: fn(&mut Self) -> Result<f64, EvalError>) -> Result<f64, EvalError> {
        if self.depth >= self.max_depth {
            return Err(EvalError::ExpressionTooComplex {
                limit: Limit::Depth,
                max: self.max_depth,
            });
        }

        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;
        result
    }
}
