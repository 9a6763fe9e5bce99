//! Keys understood by a calculator session.

/// A key press delivered to a [`Session`](super::Session).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// A printable character.
    Char(char),
    /// Calculate the current expression.
    Enter,
    /// Clear everything.
    Escape,
    /// Delete the last character.
    Backspace,
}

impl Key {
    /// Check if this key types a character the calculator accepts.
    pub fn is_calculator_char(&self) -> bool {
        matches!(self, Self::Char(c) if c.is_ascii_digit() || "+-*/().".contains(*c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculator_chars() {
        for c in "0123456789+-*/().".chars() {
            assert!(Key::Char(c).is_calculator_char(), "{c}");
        }
        assert!(!Key::Char('a').is_calculator_char());
        assert!(!Key::Char(' ').is_calculator_char());
        assert!(!Key::Char('=').is_calculator_char());
        assert!(!Key::Enter.is_calculator_char());
    }
}
