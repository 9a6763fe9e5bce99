//! Interactive calculator session.
//!
//! Holds the expression being typed and what the display shows. Typing goes
//! through the operator guard; calculating replaces the expression with its
//! result so the next keystrokes continue from it, and a failed calculation
//! shows `Error` and starts over.

mod key;

pub use key::Key;

use crate::calculator::{CalcResult, EvalError, EvalOptions, can_append, evaluate, format_result};

/// State of one calculator session.
#[derive(Clone, Debug, Default)]
pub struct Session {
    expression: String,
    display: String,
    options: EvalOptions,
}

impl Session {
    /// Create an empty session evaluating with `options`.
    pub fn new(options: EvalOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// The expression typed so far.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// What the display currently shows.
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Append typed text, one character at a time.
    ///
    /// Characters refused by the operator guard are skipped. Returns whether
    /// anything was appended.
    pub fn append(&mut self, value: &str) -> bool {
        let mut appended = false;

        for c in value.chars() {
            if can_append(&self.expression, c) {
                self.expression.push(c);
                appended = true;
            } else {
                tracing::trace!(expression = %self.expression, %c, "refused keystroke");
            }
        }

        if appended {
            self.display.clone_from(&self.expression);
        }
        appended
    }

    /// Clear the expression and the display.
    pub fn clear(&mut self) {
        self.expression.clear();
        self.display.clear();
    }

    /// Delete the last character of the expression.
    pub fn backspace(&mut self) {
        self.expression.pop();
        self.display.clone_from(&self.expression);
    }

    /// Evaluate the current expression.
    ///
    /// Returns `None` when there is nothing to evaluate.
    pub fn calculate(&mut self) -> Option<Result<f64, EvalError>> {
        if self.expression.is_empty() {
            return None;
        }

        let result = evaluate(&self.expression, &self.options);
        match &result {
            Ok(value) => {
                self.expression = format_result(*value);
                self.display.clone_from(&self.expression);
            }
            Err(_) => {
                self.expression.clear();
                self.display = CalcResult::ERROR_DISPLAY.to_string();
            }
        }

        Some(result)
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: Key) {
        match key {
            Key::Char(c) if key.is_calculator_char() => {
                self.append(c.encode_utf8(&mut [0; 4]));
            }
            Key::Enter => {
                self.calculate();
            }
            Key::Escape => self.clear(),
            Key::Backspace => self.backspace(),
            Key::Char(_) => {}
        }
    }
}
