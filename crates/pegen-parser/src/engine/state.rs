//! Parser state: the single mutable handle threaded through every
//! hand-written grammar-rule function.
//!
//! A grammar rule function looks like `fn rule(p: &mut ParserState<S,
//! A>) -> ParseResult<Option<NodeID>>` — `Ok(None)` means "this
//! alternative didn't match, try the next one", and the rule is
//! responsible for calling [`ParserState::reset`] back to its own entry
//! mark before returning `Ok(None)` so the caller's own backtracking
//! stays correct. The engine does not reset marks on a rule's behalf;
//! that discipline is what makes the memo cache trustworthy.

use pegen_source::types::FileID;

use crate::config::ParserConfig;
use crate::diagnostics::ParseError;
use crate::engine::arena::ArenaHandle;
use crate::engine::buffer::TokenBuffer;
use crate::engine::keyword::KeywordTable;
use crate::engine::token::{Token, TokenSource};

/// Everything a grammar rule needs: the token buffer, the current mark,
/// the keyword table, the arena, and the active configuration.
pub struct ParserState<S: TokenSource, A: ArenaHandle> {
    buffer: TokenBuffer<S>,
    mark: usize,
    keyword_table: KeywordTable,
    arena: A,
    config: ParserConfig,
    filename: String,
    file_id: FileID,
    /// Name of the start rule this parse was invoked for, surfaced in
    /// diagnostics and by the f-string sub-parser when it needs to
    /// report an error as if it came from the outer parse.
    start_rule: &'static str,
}

impl<S: TokenSource, A: ArenaHandle> ParserState<S, A> {
    #[must_use]
    pub fn new(
        source: S,
        keyword_table: KeywordTable,
        arena: A,
        config: ParserConfig,
        filename: impl Into<String>,
        file_id: FileID,
        start_rule: &'static str,
    ) -> Self {
        Self {
            buffer: TokenBuffer::new(source),
            mark: 0,
            keyword_table,
            arena,
            config,
            filename: filename.into(),
            file_id,
            start_rule,
        }
    }

    /// The current mark (cursor position in the token buffer).
    #[must_use]
    pub const fn mark(&self) -> usize { self.mark }

    /// Rewinds the cursor to `mark`. Every failed alternative must call
    /// this with the mark it captured on entry before returning
    /// `Ok(None)`.
    pub fn reset(&mut self, mark: usize) {
        log::trace!("reset: mark {} -> {mark}", self.mark);
        self.mark = mark;
    }

    /// Advances the cursor by one token, returning the token that was
    /// at the old mark.
    pub fn advance(&mut self) -> Result<Token, ParseError> {
        let tok = self.buffer.at(self.mark)?.clone();
        self.mark += 1;
        Ok(tok)
    }

    /// Returns the token at the current mark without advancing.
    pub fn peek(&mut self) -> Result<Token, ParseError> { Ok(self.buffer.at(self.mark)?.clone()) }

    /// Returns the token at an arbitrary mark without moving the cursor.
    pub fn peek_at(&mut self, mark: usize) -> Result<Token, ParseError> {
        Ok(self.buffer.at(mark)?.clone())
    }

    #[must_use]
    pub const fn keyword_table(&self) -> &KeywordTable { &self.keyword_table }

    pub const fn arena_mut(&mut self) -> &mut A { &mut self.arena }

    #[must_use]
    pub const fn arena(&self) -> &A { &self.arena }

    #[must_use]
    pub const fn config(&self) -> ParserConfig { self.config }

    #[must_use]
    pub fn filename(&self) -> &str { &self.filename }

    #[must_use]
    pub const fn file_id(&self) -> FileID { self.file_id }

    #[must_use]
    pub const fn start_rule(&self) -> &'static str { self.start_rule }

    #[must_use]
    pub fn is_memoized(&self, rule_id: u32) -> bool { self.buffer.is_memoized(self.mark, rule_id) }

    #[must_use]
    pub fn get_memo<T: Clone + 'static>(&self, rule_id: u32) -> Option<(T, usize)> {
        self.buffer.get_memo(self.mark, rule_id)
    }

    pub fn insert_memo<T: 'static>(&mut self, rule_id: u32, value: T, end_mark: usize) {
        self.buffer.insert_memo(self.mark, rule_id, value, end_mark);
    }

    pub fn update_memo<T: 'static>(&mut self, rule_id: u32, value: T, end_mark: usize) {
        self.buffer.update_memo(self.mark, rule_id, value, end_mark);
    }

    #[must_use]
    pub fn last_nonwhitespace_token(&self) -> Option<&Token> {
        let at = self.mark.min(self.buffer.filled_len().saturating_sub(1));
        self.buffer.last_nonwhitespace_token(at)
    }

    /// Consumes `self` down into the arena handle, once parsing is
    /// complete and the caller only wants the populated arena back.
    pub fn into_arena(self) -> A { self.arena }
}
