//! The handful of primitive combinators every hand-written grammar rule
//! is built from.
//!
//! These are the only functions in the runtime that touch the token
//! buffer directly; everything else (a rule trying three alternatives
//! in sequence, a repetition loop) is just Rust control flow wrapping
//! calls to these, written by hand per grammar rule rather than
//! generated.

use pegen_source::types::Span;

use crate::diagnostics::ParseError;
use crate::engine::arena::ArenaHandle;
use crate::engine::state::ParserState;
use crate::engine::token::{TokKind, Token, TokenSource};

/// Consumes the current token if its kind matches `kind`, else fails
/// without consuming (and without needing a mark reset — peeking at a
/// mismatched token never moved the cursor).
pub fn expect_token<S: TokenSource, A: ArenaHandle>(
    p: &mut ParserState<S, A>,
    kind: TokKind,
) -> Result<Option<Token>, ParseError> {
    let tok = p.peek()?;
    if tok.kind == kind {
        log::trace!("expect_token({kind:?}): matched {:?} at mark {}", tok.kind, p.mark());
        p.advance()?;
        Ok(Some(tok))
    } else {
        log::trace!("expect_token({kind:?}): mismatch, found {:?} at mark {}", tok.kind, p.mark());
        Ok(None)
    }
}

/// Consumes the current token if it is a `NAME` token whose text equals
/// `keyword`. Grammar rules call this rather than `expect_token` for
/// any reserved word, since the lexer never mints a distinct token kind
/// per keyword (see [`crate::engine::token::TokKind`]'s doc comment).
pub fn expect_keyword<S: TokenSource, A: ArenaHandle>(
    p: &mut ParserState<S, A>,
    keyword: &str,
) -> Result<Option<Token>, ParseError> {
    debug_assert!(
        p.keyword_table().contains(keyword),
        "expect_keyword called with {keyword:?}, which is not in this parse's keyword table"
    );
    let tok = p.peek()?;
    if tok.kind == TokKind::Name && tok.text == keyword {
        log::trace!("expect_keyword({keyword:?}): matched at mark {}", p.mark());
        p.advance()?;
        Ok(Some(tok))
    } else {
        log::trace!("expect_keyword({keyword:?}): mismatch, found {:?} at mark {}", tok.text, p.mark());
        Ok(None)
    }
}

/// Consumes the current token if it is an `OP` token whose text equals
/// `op` exactly (`"->"`, `":="`, `"**"`, ...).
pub fn expect_operator<S: TokenSource, A: ArenaHandle>(
    p: &mut ParserState<S, A>,
    op: &str,
) -> Result<Option<Token>, ParseError> {
    let tok = p.peek()?;
    if tok.kind == TokKind::Op && tok.text == op {
        p.advance()?;
        Ok(Some(tok))
    } else {
        Ok(None)
    }
}

/// Runs `rule` speculatively: the mark is always restored to where it
/// was before `rule` ran, regardless of outcome. Returns `Some(())` if
/// `rule`'s match-or-not outcome equals `positive`, `None` otherwise.
///
/// This is the three-argument primitive both positive (`&`) and
/// negative (`!`) lookahead in a grammar rule reduce to:
/// `lookahead(true, p, |p| some_rule(p))` for `&some_rule`,
/// `lookahead(false, p, |p| some_rule(p))` for `!some_rule`.
pub fn lookahead<S: TokenSource, A: ArenaHandle, T, F>(
    positive: bool,
    p: &mut ParserState<S, A>,
    rule: F,
) -> Result<Option<()>, ParseError>
where F: FnOnce(&mut ParserState<S, A>) -> Result<Option<T>, ParseError> {
    let mark = p.mark();
    let matched = rule(p)?;
    log::trace!("lookahead(positive={positive}): rule matched={}, restoring mark to {mark}", matched.is_some());
    p.reset(mark);

    if matched.is_some() == positive { Ok(Some(())) } else { Ok(None) }
}

/// Span of the most recent non-whitespace-shaped token seen, for
/// anchoring a diagnostic when the cursor has run past the end of
/// meaningful input (trailing `NEWLINE`/`DEDENT`/`ENDMARKER` tokens
/// carry a degenerate or end-of-file span).
#[must_use]
pub fn last_nonwhitespace_span<S: TokenSource, A: ArenaHandle>(
    p: &ParserState<S, A>,
) -> Option<Span> {
    p.last_nonwhitespace_token().map(|t| t.span)
}

#[cfg(test)]
mod tests {
    use pegen_ast::ast::Arena as AstArena;
    use pegen_source::types::{FileID, Position, SourceSpan};

    use super::*;
    use crate::config::ParserConfig;
    use crate::engine::keyword::KeywordTable;

    fn dummy_span() -> Span {
        let pos = Position::new(1, 1, 0);
        SourceSpan::new(pos, pos, FileID::new(1)).into()
    }

    struct VecSource {
        tokens: Vec<Token>,
        idx: usize,
    }

    impl TokenSource for VecSource {
        type Error = ParseError;

        fn next_token(&mut self) -> Result<Token, Self::Error> {
            let tok = self.tokens.get(self.idx).cloned().unwrap_or_else(|| {
                Token::new(TokKind::EndMarker, String::new(), dummy_span())
            });
            self.idx = (self.idx + 1).min(self.tokens.len());
            Ok(tok)
        }
    }

    fn make_state(tokens: Vec<Token>) -> ParserState<VecSource, AstArena> {
        ParserState::new(
            VecSource { tokens, idx: 0 },
            KeywordTable::new(["if", "else"]),
            AstArena::new(),
            ParserConfig::default(),
            "<test>",
            FileID::new(1),
            "start",
        )
    }

    #[test]
    fn expect_token_advances_on_match() {
        let mut p = make_state(vec![Token::new(TokKind::Name, "x".into(), dummy_span())]);
        let result = expect_token(&mut p, TokKind::Name).unwrap();
        assert!(result.is_some());
        assert_eq!(p.mark(), 1);
    }

    #[test]
    fn expect_token_does_not_advance_on_mismatch() {
        let mut p = make_state(vec![Token::new(TokKind::Number, "1".into(), dummy_span())]);
        let result = expect_token(&mut p, TokKind::Name).unwrap();
        assert!(result.is_none());
        assert_eq!(p.mark(), 0);
    }

    #[test]
    fn expect_keyword_matches_name_text() {
        let mut p = make_state(vec![Token::new(TokKind::Name, "if".into(), dummy_span())]);
        assert!(expect_keyword(&mut p, "if").unwrap().is_some());
    }

    #[test]
    fn lookahead_always_restores_mark() {
        let mut p = make_state(vec![Token::new(TokKind::Name, "if".into(), dummy_span())]);
        let mark_before = p.mark();
        let positive = lookahead(true, &mut p, |p| expect_keyword(p, "if")).unwrap();
        assert!(positive.is_some());
        assert_eq!(p.mark(), mark_before);

        let negative = lookahead(false, &mut p, |p| expect_keyword(p, "else")).unwrap();
        assert!(negative.is_some());
        assert_eq!(p.mark(), mark_before);
    }
}
