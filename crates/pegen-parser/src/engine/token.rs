//! The token shape the engine operates on, and the lexer collaborator
//! contract.
//!
//! The runtime never constructs tokens itself — it only ever reads ones
//! produced by a [`TokenSource`]. Keeping the token shape this small (a
//! tag, the raw text, and a span) is what lets a fixture as simple as
//! `pegen-demos`'s lexer satisfy the contract without pulling in any of
//! this crate's own types.

use pegen_source::types::Span;

/// The closed set of token tags the grammar-rule layer distinguishes.
///
/// This intentionally mirrors the reference tokenizer's coarse
/// categories rather than spelling out every operator as its own
/// variant: `Op` tokens are told apart by their `text`, the same way
/// `expect_token` callers compare a `NAME` token's text against a
/// keyword table rather than the lexer minting a separate variant per
/// keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokKind {
    Name,
    Number,
    String,
    FstringStart,
    FstringMiddle,
    FstringEnd,
    Newline,
    Indent,
    Dedent,
    EndMarker,
    Op,
    ErrorTok,
}

/// A single token as the engine sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokKind,
    pub text: String,
    pub span: Span,
}

impl Token {
    #[must_use]
    pub const fn new(kind: TokKind, text: String, span: Span) -> Self { Self { kind, text, span } }

    /// True for the whitespace-shaped tokens `last_nonwhitespace_token`
    /// skips over: `NEWLINE`, `INDENT`, `DEDENT`.
    #[must_use]
    pub const fn is_whitespace_shaped(&self) -> bool {
        matches!(self.kind, TokKind::Newline | TokKind::Indent | TokKind::Dedent)
    }
}

/// The lexer collaborator.
///
/// The runtime pulls tokens one at a time and caches them itself (see
/// [`crate::engine::buffer::TokenBuffer`]); a `TokenSource` need not
/// support rewinding or lookahead of its own. Implementations report a
/// tokenizer failure by returning `Err` from `next_token` exactly once —
/// the buffer remembers that error and replays it for any further fill
/// at or past that slot, per §2's "sticky" requirement.
pub trait TokenSource {
    /// The error type this lexer can fail with, convertible into the
    /// runtime's own error channel.
    type Error: Into<crate::diagnostics::ParseError>;

    /// Produce the next token, or the terminal `EndMarker` token forever
    /// once the input is exhausted.
    fn next_token(&mut self) -> Result<Token, Self::Error>;
}
