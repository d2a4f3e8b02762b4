//! Fluent construction of [`Diagnostic`]s.

use super::{Diagnostic, Handler, Level};
use crate::Span;

/// Builds a [`Diagnostic`] one call at a time, then emits it to a [`Handler`].
///
/// ```
/// use gql_util::diagnostic::{DiagnosticBuilder, Handler, Span};
///
/// let handler = Handler::new();
/// DiagnosticBuilder::error("invalid spread")
///     .span(Span::new(3, 4, 1, 4))
///     .note("expected '...'")
///     .emit(&handler);
/// ```
pub struct DiagnosticBuilder {
    level: Level,
    message: String,
    span: Span,
    notes: Vec<String>,
}

impl DiagnosticBuilder {
    /// Start building an error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
            span: Span::DUMMY,
            notes: Vec::new(),
        }
    }

    /// Start building a warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: Level::Warning,
            message: message.into(),
            span: Span::DUMMY,
            notes: Vec::new(),
        }
    }

    /// Attach a source span.
    pub fn span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Attach a note.
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Finish building without emitting.
    pub fn build(self) -> Diagnostic {
        let mut diag = Diagnostic::new(self.level, self.message, self.span);
        diag.notes = self.notes;
        diag
    }

    /// Finish building and record the diagnostic on `handler`.
    pub fn emit(self, handler: &Handler) {
        handler.emit_diagnostic(self.build());
    }
}
