//! The token buffer: a grow-on-demand array of already-lexed tokens,
//! each slot carrying its own memoization chain.
//!
//! Every `mark` a grammar rule deals with is simply an index into this
//! buffer. Rewinding on a failed alternative costs nothing beyond
//! resetting an integer — the tokens themselves, and anything already
//! memoized against them, stay put for the next attempt to reuse.

use std::any::Any;

use pegen_source::types::Span;

use crate::diagnostics::ParseError;
use crate::engine::token::{TokKind, Token, TokenSource};

/// One memoized result for one rule at one starting mark.
///
/// `value` is type-erased because a single slot's chain accumulates
/// results from many different grammar rules, each returning its own
/// concrete type (a `NodeID`, a `Vec<NodeID>`, a plain `bool` for a
/// lookahead-only rule, ...). Downcasting on read is the price of
/// sharing one chain per slot instead of one per rule.
struct MemoEntry {
    rule_id: u32,
    value: Box<dyn Any>,
    end_mark: usize,
}

/// A lexed token plus the memo chain recorded against it.
struct Slot {
    token: Token,
    /// Most-recently-inserted entry last; `insert_memo`/`update_memo`
    /// search from the back so a later insert for the same `rule_id`
    /// shadows an earlier one without needing to splice the chain.
    memo: Vec<MemoEntry>,
}

/// Grow-on-demand buffer of lexed tokens with per-slot packrat memo
/// chains.
pub struct TokenBuffer<S: TokenSource> {
    source: S,
    slots: Vec<Slot>,
    /// Set once a lexer call fails; every later fill attempt replays the
    /// same error instead of calling the lexer again; a dead lexer stays
    /// dead for the rest of the parse.
    sticky_error: Option<ParseError>,
}

impl<S: TokenSource> TokenBuffer<S> {
    #[must_use]
    pub fn new(source: S) -> Self {
        Self { source, slots: Vec::with_capacity(1), sticky_error: None }
    }

    /// Ensures slot `i` is populated, pulling tokens from the lexer as
    /// needed. Doubles capacity from `1` each time the backing storage
    /// is exhausted, rather than relying solely on `Vec`'s own growth
    /// policy, so the buffer's allocation behavior is independent of
    /// `Vec`'s unspecified amortized factor.
    fn ensure(&mut self, i: usize) -> Result<(), ParseError> {
        if let Some(err) = &self.sticky_error {
            if i >= self.slots.len() {
                return Err(clone_parse_error(err));
            }
            return Ok(());
        }

        while self.slots.len() <= i {
            if self.slots.len() == self.slots.capacity() {
                let additional = self.slots.capacity().max(1);
                self.slots.reserve(additional);
            }

            match self.source.next_token() {
                Ok(token) => self.slots.push(Slot { token, memo: Vec::new() }),
                Err(err) => {
                    let err = err.into();
                    self.sticky_error = Some(clone_parse_error(&err));
                    return Err(err);
                }
            }
        }

        Ok(())
    }

    /// Returns the token at mark `i`, filling the buffer up to it first.
    pub fn at(&mut self, i: usize) -> Result<&Token, ParseError> {
        self.ensure(i)?;
        Ok(&self.slots[i].token)
    }

    /// Returns the token at mark `i` without filling further than what's
    /// already buffered; `None` past the filled prefix.
    #[must_use]
    pub fn peek_filled(&self, i: usize) -> Option<&Token> { self.slots.get(i).map(|s| &s.token) }

    /// Number of slots currently filled.
    #[must_use]
    pub fn filled_len(&self) -> usize { self.slots.len() }

    /// Whether `rule_id` has a memoized result at mark `i`.
    #[must_use]
    pub fn is_memoized(&self, i: usize, rule_id: u32) -> bool {
        self.slots.get(i).is_some_and(|s| s.memo.iter().any(|e| e.rule_id == rule_id))
    }

    /// Looks up the memoized result (if any) for `rule_id` at mark `i`,
    /// downcasting it to `T`. Returns the stored end mark alongside it.
    ///
    /// ## Panics
    ///
    /// Panics if a memo entry for `rule_id` exists but was stored with a
    /// different `T` — a caller bug (the same rule must always memoize
    /// the same result type), not a recoverable runtime condition.
    #[must_use]
    pub fn get_memo<T: Clone + 'static>(&self, i: usize, rule_id: u32) -> Option<(T, usize)> {
        let Some(slot) = self.slots.get(i) else {
            log::trace!("memo miss: rule {rule_id} at mark {i} (slot not filled)");
            return None;
        };
        let Some(entry) = slot.memo.iter().rev().find(|e| e.rule_id == rule_id) else {
            log::trace!("memo miss: rule {rule_id} at mark {i}");
            return None;
        };
        log::trace!("memo hit: rule {rule_id} at mark {i}, end mark {}", entry.end_mark);
        let value = entry
            .value
            .downcast_ref::<T>()
            .expect("memo entry type mismatch for rule_id")
            .clone();
        Some((value, entry.end_mark))
    }

    /// Records a new memoized result for `rule_id` at mark `i`. If an
    /// entry for the same `rule_id` already exists at this mark, the new
    /// one shadows it on lookup without removing the old one from the
    /// chain.
    pub fn insert_memo<T: 'static>(&mut self, i: usize, rule_id: u32, value: T, end_mark: usize) {
        log::trace!("memo insert: rule {rule_id} at mark {i}, end mark {end_mark}");
        self.slots[i].memo.push(MemoEntry { rule_id, value: Box::new(value), end_mark });
    }

    /// Mutates the first (most-recently-inserted) entry for `rule_id` at
    /// mark `i` in place, used by left-recursive rules seeding a growing
    /// recursive result.
    ///
    /// ## Panics
    ///
    /// Panics if no entry for `rule_id` exists yet at this mark, or if
    /// the stored value is not a `T`.
    pub fn update_memo<T: 'static>(&mut self, i: usize, rule_id: u32, value: T, end_mark: usize) {
        let entry = self.slots[i]
            .memo
            .iter_mut()
            .rev()
            .find(|e| e.rule_id == rule_id)
            .expect("update_memo called with no existing entry for rule_id");
        entry.value = Box::new(value);
        entry.end_mark = end_mark;
    }

    /// The span of the token at mark `i`, if filled.
    #[must_use]
    pub fn span_at(&self, i: usize) -> Option<Span> { self.slots.get(i).map(|s| s.token.span) }

    /// `last_nonwhitespace_token`: walks backward from mark `i` (which
    /// must already be filled) to the most recent token that is not
    /// `NEWLINE`/`INDENT`/`DEDENT`. Used by error reporting to anchor a
    /// diagnostic on real source text rather than a synthetic
    /// layout token.
    #[must_use]
    pub fn last_nonwhitespace_token(&self, i: usize) -> Option<&Token> {
        (0..=i.min(self.slots.len().saturating_sub(1)))
            .rev()
            .map(|idx| &self.slots[idx].token)
            .find(|t| !t.is_whitespace_shaped())
    }
}

fn clone_parse_error(err: &ParseError) -> ParseError {
    match err {
        ParseError::Syntax(boxed) => ParseError::Syntax(boxed.clone()),
        ParseError::Memory(msg) => ParseError::Memory(msg.clone()),
        ParseError::Os(io_err) => {
            ParseError::Memory(format!("repeated I/O failure after first: {io_err}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use pegen_source::types::{FileID, Position, SourceSpan};

    use super::*;

    fn dummy_span() -> Span {
        let pos = Position::new(1, 1, 0);
        SourceSpan::new(pos, pos, FileID::new(1)).into()
    }

    struct FixedSource {
        tokens: Vec<Token>,
        idx: usize,
    }

    impl TokenSource for FixedSource {
        type Error = ParseError;

        fn next_token(&mut self) -> Result<Token, Self::Error> {
            let tok = self
                .tokens
                .get(self.idx)
                .cloned()
                .unwrap_or_else(|| Token::new(TokKind::EndMarker, String::new(), dummy_span()));
            self.idx = (self.idx + 1).min(self.tokens.len());
            Ok(tok)
        }
    }

    fn make_buffer(words: &[&str]) -> TokenBuffer<FixedSource> {
        let tokens =
            words.iter().map(|w| Token::new(TokKind::Name, (*w).to_string(), dummy_span())).collect();
        TokenBuffer::new(FixedSource { tokens, idx: 0 })
    }

    #[test]
    fn fills_on_demand() {
        let mut buf = make_buffer(&["a", "b", "c"]);
        assert_eq!(buf.filled_len(), 0);
        assert_eq!(buf.at(2).unwrap().text, "c");
        assert_eq!(buf.filled_len(), 3);
    }

    #[test]
    fn insert_then_is_memoized() {
        let mut buf = make_buffer(&["a"]);
        assert!(buf.at(0).is_ok());
        assert!(!buf.is_memoized(0, 7));
        buf.insert_memo(0, 7, 42i32, 1);
        assert!(buf.is_memoized(0, 7));
        let (value, end): (i32, usize) = buf.get_memo(0, 7).unwrap();
        assert_eq!(value, 42);
        assert_eq!(end, 1);
    }

    #[test]
    fn update_memo_mutates_in_place() {
        let mut buf = make_buffer(&["a"]);
        assert!(buf.at(0).is_ok());
        buf.insert_memo(0, 1, 1i32, 1);
        buf.update_memo(0, 1, 2i32, 2);
        let (value, end): (i32, usize) = buf.get_memo(0, 1).unwrap();
        assert_eq!(value, 2);
        assert_eq!(end, 2);
    }

    #[test]
    fn later_insert_shadows_earlier_for_same_rule() {
        let mut buf = make_buffer(&["a"]);
        assert!(buf.at(0).is_ok());
        buf.insert_memo(0, 5, "first".to_string(), 1);
        buf.insert_memo(0, 5, "second".to_string(), 2);
        let (value, end): (String, usize) = buf.get_memo(0, 5).unwrap();
        assert_eq!(value, "second");
        assert_eq!(end, 2);
    }

    #[test]
    fn last_nonwhitespace_skips_layout_tokens() {
        let mut buf = make_buffer(&["a"]);
        assert!(buf.at(0).is_ok());
        // Manually push layout tokens to simulate NEWLINE/INDENT following `a`.
        buf.slots.push(Slot {
            token: Token::new(TokKind::Newline, String::new(), dummy_span()),
            memo: Vec::new(),
        });
        buf.slots.push(Slot {
            token: Token::new(TokKind::Indent, String::new(), dummy_span()),
            memo: Vec::new(),
        });
        let found = buf.last_nonwhitespace_token(2).unwrap();
        assert_eq!(found.text, "a");
    }
}
