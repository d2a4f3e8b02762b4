//! Shared foundation for the GraphQL lexer and complexity analyzer crates.
//!
//! This crate carries the ambient machinery that both `gql-lexer` and
//! `gql-complexity` build on: source spans, diagnostics, and a typed
//! arena index (`IndexVec`/`Idx`). None of it is GraphQL-specific.

pub mod diagnostic;
pub mod index_vec;
pub mod span;

pub use diagnostic::{Diagnostic, DiagnosticBuilder, Handler, Level};
pub use index_vec::{Idx, IndexVec};
pub use span::Span;
