//! Lexer error conditions.

use crate::token::Position;
use gql_util::diagnostic::{Diagnostic, DiagnosticBuilder};
use gql_util::Span;
use thiserror::Error;

/// A lexical error, fatal to the token currently being read.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum LexError {
    /// A `.` was not immediately followed by `..` to complete `...`.
    #[error("invalid '.' at {0:?}: expected '...'")]
    InvalidSpread(Position),

    /// `$` was immediately followed by whitespace, a comma, or EOF.
    #[error("variable at {0:?} must be followed by a name with no whitespace")]
    VariableWithoutName(Position),

    /// A `.` in a number run was not followed by at least one digit.
    #[error("incomplete float at {0:?}: expected a digit after '.'")]
    IncompleteFloat(Position),

    /// Input ended before a string's closing quote was found.
    #[error("unterminated string starting at {0:?}")]
    UnterminatedString(Position),
}

impl LexError {
    /// The position the error was raised at.
    pub fn position(&self) -> Position {
        match *self {
            LexError::InvalidSpread(p)
            | LexError::VariableWithoutName(p)
            | LexError::IncompleteFloat(p)
            | LexError::UnterminatedString(p) => p,
        }
    }

    /// Render this error as a positioned [`Diagnostic`].
    pub fn to_diagnostic(&self) -> Diagnostic {
        let position = self.position();
        let span = Span::point(0, position.line, position.char);
        DiagnosticBuilder::error(self.to_string()).span(span).build()
    }
}
