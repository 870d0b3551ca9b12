//! A Python-style indentation-aware lexer wrapping [`RawTok`], implementing
//! [`pegen_parser::engine::token::TokenSource`].
//!
//! A `logos::Lexer` is pulled one raw token at a time, with a
//! pending-token queue holding synthesized `INDENT`/`DEDENT` tokens and a
//! bracket-depth counter suppressing `NEWLINE` inside
//! `(...)`/`[...]`/`{...}`. Kept deliberately simple by dropping the
//! diagnostic-reporter plumbing (this crate logs through the `log` facade
//! directly, same as
//! [`pegen_parser::strings::warn_invalid_escape`]) and implicit string
//! concatenation (not exercised by any scenario this crate's grammar
//! covers).

mod token;

use std::collections::VecDeque;

use logos::Logos;
use pegen_parser::diagnostics::{ParseError, SyntaxError, SyntaxErrorKind};
use pegen_parser::engine::token::{TokKind, Token, TokenSource};
use pegen_parser::utils::TAB_SIZE;
use pegen_source::types::Span;
pub use token::RawTok;

/// Wraps a `logos`-driven token stream with indentation tracking.
pub struct DemoLexer<'src> {
    inner: logos::Lexer<'src, RawTok>,
    source: &'src str,
    filename: String,
    indent_stack: Vec<usize>,
    pending: VecDeque<Token>,
    at_line_start: bool,
    in_brackets: usize,
    byte_offset: usize,
    done: bool,
}

impl<'src> DemoLexer<'src> {
    #[must_use]
    pub fn new(source: &'src str, filename: impl Into<String>) -> Self {
        Self {
            inner: RawTok::lexer(source),
            source,
            filename: filename.into(),
            indent_stack: vec![0],
            pending: VecDeque::new(),
            at_line_start: true,
            in_brackets: 0,
            byte_offset: 0,
            done: false,
        }
    }

    fn dedent_token(&self, at: usize) -> Token { Token::new(TokKind::Dedent, String::new(), Span::new(at, at)) }

    /// Counts leading spaces/tabs at the current offset without consuming
    /// them from `self.inner` (its own `#[logos(skip ...)]` rule skips the
    /// same run when the next real token is matched); returns `None` when
    /// the line is blank or comment-only, in which case no INDENT/DEDENT
    /// decision should be made for it.
    fn handle_indentation(&mut self) -> Option<Token> {
        let bytes = self.source.as_bytes();
        let mut i = self.byte_offset;
        let mut space_count = 0usize;
        while i < bytes.len() {
            match bytes[i] {
                b' ' => {
                    space_count += 1;
                    i += 1;
                }
                b'\t' => {
                    space_count += TAB_SIZE;
                    log::warn!("{}: inconsistent indentation: mixing tabs and spaces", self.filename);
                    i += 1;
                }
                _ => break,
            }
        }

        let next_char = self.source[i..].chars().next();
        let is_blank_or_comment = matches!(next_char, None | Some('\n' | '#'));
        self.at_line_start = false;
        if is_blank_or_comment {
            return None;
        }

        let current_indent = *self.indent_stack.last().unwrap_or(&0);
        match space_count.cmp(&current_indent) {
            std::cmp::Ordering::Equal => None,
            std::cmp::Ordering::Greater => {
                self.indent_stack.push(space_count);
                Some(Token::new(TokKind::Indent, String::new(), Span::new(self.byte_offset, i)))
            }
            std::cmp::Ordering::Less => {
                while self.indent_stack.last().is_some_and(|&level| space_count < level) {
                    self.indent_stack.pop();
                    self.pending.push_back(self.dedent_token(i));
                }
                self.pending.pop_front()
            }
        }
    }

    fn next_raw(&mut self) -> Result<Option<Token>, ParseError> {
        loop {
            match self.inner.next() {
                Some(Ok(raw)) => {
                    let span = self.inner.span();
                    self.byte_offset = span.end;
                    let kind = match raw {
                        RawTok::Name => TokKind::Name,
                        RawTok::Number => TokKind::Number,
                        RawTok::String => TokKind::String,
                        RawTok::Op => TokKind::Op,
                        RawTok::Newline => TokKind::Newline,
                        RawTok::Comment | RawTok::LineContinuation => continue,
                    };
                    let text = self.source[span.start..span.end].to_string();
                    return Ok(Some(Token::new(kind, text, Span::new(span.start, span.end))));
                }
                Some(Err(())) => {
                    let span = self.inner.span();
                    return Err(SyntaxError::new(
                        SyntaxErrorKind::TokenizerFailure,
                        self.filename.clone(),
                        span.start,
                        1,
                        None,
                    )
                    .into());
                }
                None => return Ok(None),
            }
        }
    }
}

impl TokenSource for DemoLexer<'_> {
    type Error = ParseError;

    fn next_token(&mut self) -> Result<Token, ParseError> {
        loop {
            if let Some(tok) = self.pending.pop_front() {
                return Ok(tok);
            }
            if self.done {
                return Ok(Token::new(TokKind::EndMarker, String::new(), Span::new(self.byte_offset, self.byte_offset)));
            }
            if self.at_line_start && self.in_brackets == 0
                && let Some(tok) = self.handle_indentation()
            {
                return Ok(tok);
            }

            match self.next_raw()? {
                None => {
                    while self.indent_stack.len() > 1 {
                        self.indent_stack.pop();
                        self.pending.push_back(self.dedent_token(self.byte_offset));
                    }
                    self.done = true;
                }
                Some(tok) => {
                    match tok.kind {
                        TokKind::Op if matches!(tok.text.as_str(), "(" | "[" | "{") => self.in_brackets += 1,
                        TokKind::Op if matches!(tok.text.as_str(), ")" | "]" | "}") => {
                            self.in_brackets = self.in_brackets.saturating_sub(1);
                        }
                        TokKind::Newline => {
                            if self.in_brackets > 0 {
                                continue;
                            }
                            self.at_line_start = true;
                        }
                        _ => {}
                    }
                    return Ok(tok);
                }
            }
        }
    }
}
