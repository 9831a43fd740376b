//! Shared models

mod diagnostic;
mod span;

pub use diagnostic::{Diagnostic, DiagnosticKind, Severity};
pub use span::{Location, Span};
