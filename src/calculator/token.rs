//! Tokenizer for calculator expressions.
//!
//! Only digits, `.`, the four operators, parentheses and whitespace are
//! accepted. Anything else is refused here, before the parser ever sees it.

use std::fmt;

use super::error::EvalError;

/// A single lexical unit of an expression.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // f64's Display is the shortest round-trip form and never uses
            // exponent notation, so it re-tokenizes to the same value.
            Self::Number(value) => write!(f, "{}", value),
            Self::Plus => f.write_str("+"),
            Self::Minus => f.write_str("-"),
            Self::Star => f.write_str("*"),
            Self::Slash => f.write_str("/"),
            Self::LParen => f.write_str("("),
            Self::RParen => f.write_str(")"),
        }
    }
}

/// Split an expression into tokens, in input order.
pub fn tokenize(input: &str) -> Result<Vec<Token>, EvalError> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().enumerate().peekable();

    while let Some((position, c)) = chars.next() {
        let token = match c {
            c if c.is_whitespace() => continue,
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '(' => Token::LParen,
            ')' => Token::RParen,
            '0'..='9' | '.' => {
                let mut literal = String::from(c);
                while let Some(&(_, next)) = chars.peek() {
                    if !(next.is_ascii_digit() || next == '.') {
                        break;
                    }
                    literal.push(next);
                    chars.next();
                }
                Token::Number(parse_number(&literal, position)?)
            }
            _ => return Err(EvalError::InvalidCharacter { ch: c, position }),
        };
        tokens.push(token);
    }

    tracing::trace!(tokens = %format_tokens(&tokens), "tokenized expression");
    Ok(tokens)
}

/// Parse a run of digits and dots as a number.
fn parse_number(literal: &str, position: usize) -> Result<f64, EvalError> {
    let malformed = || EvalError::MalformedNumber {
        literal: literal.to_string(),
        position,
    };

    let dots = literal.chars().filter(|&c| c == '.').count();
    if dots > 1 || !literal.chars().any(|c| c.is_ascii_digit()) {
        return Err(malformed());
    }

    // Literals too large for f64 would parse to infinity, which has no
    // source form to render back.
    match literal.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(malformed()),
    }
}

/// Render tokens back to expression text, separated by spaces.
pub fn format_tokens(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(Token::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
