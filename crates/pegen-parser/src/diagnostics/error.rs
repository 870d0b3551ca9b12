//! Error types surfaced by the parser runtime.
//!
//! Every failure the runtime can produce collapses into one of three shapes
//! at the top level: a [`SyntaxError`] (the overwhelming majority — a single
//! `SyntaxErrorKind` plus source location), a memory-allocation failure, or
//! an I/O failure opening a source file. The latter two are propagated
//! unchanged rather than folded into `SyntaxError`, since neither is
//! something a caller can usefully recover from at the syntax level.

use std::{fmt, io};

use pegen_source::types::SourceSpan;
use thiserror::Error;

/// The fixed set of syntax-error kinds this runtime can raise.
///
/// One variant per row of the error table: everything from a failed
/// top-level rule match down to the individual f-string malformations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    /// The lexer returned an error token.
    TokenizerFailure,
    /// A top-level rule failed to match.
    InvalidSyntax,
    /// Annotated assignment with a list or multi-element tuple LHS.
    AnnotatedListOrMultiTuple,
    /// Unrecognized `\x` in a non-raw literal (deprecation promoted to error).
    InvalidEscape,
    /// A non-raw bytes literal contains a byte `>= 0x80`.
    BytesNonAscii,
    /// `{}` or `{ }` in an f-string.
    FstringEmpty,
    /// `\` inside an f-string expression body.
    FstringBackslash,
    /// `#` inside an f-string expression body.
    FstringHash,
    /// Expression nesting exceeds the configured limit.
    FstringNestingDeep,
    /// Bracket stack exceeds the configured limit.
    FstringParenDeep,
    /// `!c` with `c` not one of `s`, `r`, `a`.
    FstringBadConversion,
    /// `]`/`)`/`}` not matching the top of the bracket stack.
    FstringMismatchedBrace,
    /// End of body without the expected `}`.
    FstringUnexpectedEnd,
    /// A lone `}` at top level.
    FstringSingleCloseBrace,
}

impl SyntaxErrorKind {
    /// The default message used when no more specific text is supplied.
    #[must_use]
    pub const fn default_message(self) -> &'static str {
        match self {
            Self::TokenizerFailure => "invalid token",
            Self::InvalidSyntax => "invalid syntax",
            Self::AnnotatedListOrMultiTuple => {
                "only single target (not list) can be annotated"
            }
            Self::InvalidEscape => "invalid escape sequence",
            Self::BytesNonAscii => "bytes can only contain ASCII literal characters",
            Self::FstringEmpty => "f-string: empty expression not allowed",
            Self::FstringBackslash => {
                "f-string expression part cannot include a backslash"
            }
            Self::FstringHash => "f-string expression part cannot include '#'",
            Self::FstringNestingDeep => "f-string: expressions nested too deeply",
            Self::FstringParenDeep => "f-string: too many nested parentheses",
            Self::FstringBadConversion => "f-string: invalid conversion character",
            Self::FstringMismatchedBrace => "f-string: mismatched '(', '{', or '['",
            Self::FstringUnexpectedEnd => "f-string: expecting '}'",
            Self::FstringSingleCloseBrace => "f-string: single '}' is not allowed",
        }
    }
}

impl fmt::Display for SyntaxErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.default_message())
    }
}

/// A single syntax error: kind, message, and enough location context to
/// render a rustc-style diagnostic without consulting anything else.
#[derive(Debug, Clone)]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    pub message: String,
    pub filename: String,
    pub line: usize,
    pub column: usize,
    pub source_line: Option<String>,
}

impl SyntaxError {
    /// Builds a syntax error using the kind's default message text.
    #[must_use]
    pub fn new(
        kind: SyntaxErrorKind,
        filename: impl Into<String>,
        line: usize,
        column: usize,
        source_line: Option<String>,
    ) -> Self {
        Self {
            kind,
            message: kind.default_message().to_string(),
            filename: filename.into(),
            line,
            column,
            source_line,
        }
    }

    /// Builds a syntax error with a caller-supplied message overriding the
    /// kind's default text (used when the kind alone is too generic, e.g.
    /// `InvalidSyntax` with the specific rule/token that failed).
    #[must_use]
    pub fn with_message(
        kind: SyntaxErrorKind,
        message: impl Into<String>,
        filename: impl Into<String>,
        line: usize,
        column: usize,
        source_line: Option<String>,
    ) -> Self {
        Self { kind, message: message.into(), filename: filename.into(), line, column, source_line }
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}: {}", self.filename, self.line, self.column, self.message)
    }
}

/// Top-level error type for the parser runtime.
///
/// `Syntax` is the overwhelming common case; `Memory` and `Os` are
/// propagated from the collaborator layer unchanged, per §7's propagation
/// policy — neither is something the syntax-error channel can represent.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error(transparent)]
    Syntax(#[from] SyntaxErrorBox),
    /// Arena or buffer allocation failed.
    #[error("out of memory: {0}")]
    Memory(String),
    /// The collaborator lexer failed to open or read its source.
    #[error(transparent)]
    Os(#[from] io::Error),
}

/// Newtype so `SyntaxError` (which doesn't implement `std::error::Error`
/// itself, since it is a plain data record rather than a formatted error
/// type) can participate in `thiserror`'s `#[from]` plumbing.
#[derive(Debug, Clone)]
pub struct SyntaxErrorBox(pub SyntaxError);

impl fmt::Display for SyntaxErrorBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

impl std::error::Error for SyntaxErrorBox {}

impl From<SyntaxError> for ParseError {
    fn from(err: SyntaxError) -> Self { Self::Syntax(SyntaxErrorBox(err)) }
}

impl ParseError {
    /// Returns the underlying [`SyntaxError`], if this is that variant.
    #[must_use]
    pub const fn as_syntax(&self) -> Option<&SyntaxError> {
        match self {
            Self::Syntax(boxed) => Some(&boxed.0),
            Self::Memory(_) | Self::Os(_) => None,
        }
    }
}

/// Result alias used throughout the runtime.
pub type ParseResult<T> = Result<T, ParseError>;

/// Severity level of a rendered diagnostic.
///
/// The runtime's own error channel only ever produces `Error`-level
/// diagnostics (there is no recovery, so there is nothing to downgrade to a
/// warning after the fact) but `Warning` is used directly by the invalid-
/// escape deprecation path before it is (optionally) promoted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DiagnosticLevel {
    Error,
    Warning,
    Info,
    Note,
}

impl DiagnosticLevel {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Note => "note",
        }
    }

    #[must_use]
    pub const fn color_code(&self) -> &'static str {
        match self {
            Self::Error => "\x1b[31m",
            Self::Warning => "\x1b[33m",
            Self::Info => "\x1b[36m",
            Self::Note => "\x1b[34m",
        }
    }

    #[must_use]
    pub const fn reset_code() -> &'static str { "\x1b[0m" }
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.as_str()) }
}

/// A diagnostic message with source location information, rendered
/// rustc-style by the reporter.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub message: String,
    pub span: SourceSpan,
    pub notes: Vec<String>,
    pub suggestions: Vec<String>,
    pub code: Option<String>,
}

impl Diagnostic {
    #[must_use]
    pub const fn error(message: String, span: SourceSpan) -> Self {
        Self {
            level: DiagnosticLevel::Error,
            message,
            span,
            notes: Vec::new(),
            suggestions: Vec::new(),
            code: None,
        }
    }

    #[must_use]
    pub const fn warning(message: String, span: SourceSpan) -> Self {
        Self {
            level: DiagnosticLevel::Warning,
            message,
            span,
            notes: Vec::new(),
            suggestions: Vec::new(),
            code: None,
        }
    }

    #[must_use]
    pub const fn info(message: String, span: SourceSpan) -> Self {
        Self {
            level: DiagnosticLevel::Info,
            message,
            span,
            notes: Vec::new(),
            suggestions: Vec::new(),
            code: None,
        }
    }

    #[must_use]
    pub const fn note(message: String, span: SourceSpan) -> Self {
        Self {
            level: DiagnosticLevel::Note,
            message,
            span,
            notes: Vec::new(),
            suggestions: Vec::new(),
            code: None,
        }
    }

    #[must_use]
    pub fn with_note(mut self, note: String) -> Self {
        self.notes.push(note);
        self
    }

    #[must_use]
    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }

    #[must_use]
    pub fn with_code(mut self, code: String) -> Self {
        self.code = Some(code);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let color = self.level.color_code();
        let reset = DiagnosticLevel::reset_code();

        write!(f, "{}{}{}: {}", color, self.level, reset, self.message)?;

        if let Some(code) = &self.code {
            write!(f, " [{code}]")?;
        }

        write!(f, " at {}", self.span)?;

        for note in &self.notes {
            write!(f, "\n  note: {note}")?;
        }

        for suggestion in &self.suggestions {
            write!(f, "\n  suggestion: {suggestion}")?;
        }

        Ok(())
    }
}

/// Converts a [`SyntaxError`] into a renderable [`Diagnostic`].
///
/// `SyntaxError` carries a pre-resolved filename/line/column rather than a
/// `SourceSpan`, so this constructs a single-point span; callers that have
/// the originating token's full span should prefer building a `Diagnostic`
/// directly and reserve this conversion for cases where only the resolved
/// location survived (e.g. after crossing the f-string sub-parser boundary).
impl From<&SyntaxError> for Diagnostic {
    fn from(error: &SyntaxError) -> Self {
        use pegen_source::types::Position;

        let pos = Position::new(error.line, error.column, 0);
        let span = SourceSpan::new(pos, pos, pegen_source::types::FileID::new(0));
        let mut diagnostic = Self::error(error.message.clone(), span);

        if let Some(line) = &error.source_line {
            diagnostic = diagnostic.with_note(line.clone());
        }

        diagnostic
    }
}

impl From<SyntaxError> for Diagnostic {
    fn from(error: SyntaxError) -> Self { Self::from(&error) }
}
