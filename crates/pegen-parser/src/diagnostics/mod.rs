//! Diagnostics and error reporting module.
//!
//! This module provides types and functions for reporting and formatting
//! diagnostic messages, such as errors, warnings, and notes. It includes:
//!
//! - `DiagnosticLevel`: Enum for categorizing diagnostics by severity
//! - `Diagnostic`: Struct representing a diagnostic message with source location
//! - `DiagnosticReporter`: Struct for collecting and formatting diagnostics
//! - `SyntaxErrorKind` / `SyntaxError` / `ParseError`: the runtime's own error taxonomy
//!
//! The diagnostics system is designed to provide rich, contextual error messages
//! similar to those produced by rustc, with source code snippets, underlines,
//! and helpful suggestions.
//!
//! This library has no error-recovery story (see the grammar-rule design
//! notes), so in practice a `DiagnosticReporter` built around a parse holds
//! at most one `Error`-level diagnostic — parsing stops at the first one.
//! It can still accumulate several `Warning`-level ones, since the
//! invalid-escape-sequence path reports a warning and keeps going unless
//! the parser is configured to promote it to a hard error.

mod error;
mod reporter;

// Re-export public types
pub use error::{
    Diagnostic,
    DiagnosticLevel,
    ParseError,
    ParseResult,
    SyntaxError,
    SyntaxErrorBox,
    SyntaxErrorKind,
};
pub use reporter::{DiagnosticReporter, format_error_context, format_with_line_numbers};
use pegen_source::types::SourceSpan;

/// Creates an "expected X, found Y" diagnostic
#[must_use]
pub fn expected_found_error(expected: &str, found: &str, span: SourceSpan) -> Diagnostic {
    Diagnostic::error(format!("Expected {expected}, found {found}"), span)
        .with_suggestion(format!("Try using {expected} here"))
}

/// Creates a "unexpected end of file" diagnostic
#[must_use]
pub fn unexpected_eof_error(expected: &str, span: SourceSpan) -> Diagnostic {
    Diagnostic::error(format!("Unexpected end of file, expected {expected}"), span)
}

/// Creates a "missing X" diagnostic
#[must_use]
pub fn missing_error(missing: &str, span: SourceSpan) -> Diagnostic {
    Diagnostic::error(format!("Missing {missing}"), span)
        .with_suggestion(format!("Add {missing} here"))
}

/// Creates an "invalid X" diagnostic
#[must_use]
pub fn invalid_error(item: &str, reason: &str, span: SourceSpan) -> Diagnostic {
    Diagnostic::error(format!("Invalid {item}: {reason}"), span)
}
