//! A small hand-written grammar and lexer exercising the `pegen_parser`
//! runtime end to end, standing in for a generated grammar compiler's
//! output (out of `pegen_parser`'s own scope, per its crate doc comment).
//!
//! [`parse_module`] is the single entry point: it wires a [`DemoLexer`]
//! and an in-tree [`pegen_ast::ast::Arena`] into a [`ParserState`], runs
//! [`grammar::parse_module`] as the start rule with [`DemoReentry`] as
//! the f-string expression collaborator, and hands back the populated
//! arena.

pub mod arena_ref;
pub mod grammar;
pub mod lexer;
pub mod reentry;

use pegen_ast::ast::Arena;
use pegen_ast::node::NodeID;
use pegen_parser::config::ParserConfig;
use pegen_parser::diagnostics::{ParseError, SyntaxError, SyntaxErrorKind};
use pegen_parser::engine::keyword::KeywordTable;
use pegen_parser::engine::state::ParserState;
use pegen_source::types::FileID;

pub use lexer::DemoLexer;
pub use reentry::DemoReentry;

/// The reserved words this fixture's grammar recognizes. A generated
/// parser would derive this set from its grammar file; here it's just
/// the keywords [`grammar`]'s rule functions call [`expect_keyword`] on.
///
/// [`expect_keyword`]: pegen_parser::engine::combinators::expect_keyword
#[must_use]
pub fn keyword_table() -> KeywordTable {
    KeywordTable::new(["def", "pass", "from", "import", "as"])
}

/// Parses `source` as a module, returning the populated arena and the
/// module node's ID.
///
/// Built directly on [`ParserState`] rather than
/// [`pegen_parser::engine::run::run_parser`]: that entry point is shaped
/// for a caller who only wants the parsed root (`Mode::Ast`) or a
/// compiled artifact derived from a borrowed arena (`Mode::Code`), never
/// the owned arena itself, so this fixture's own entry point calls
/// [`ParserState::into_arena`] directly instead.
///
/// ## Errors
///
/// Propagates any [`ParseError`] raised by the lexer or a grammar rule,
/// and raises its own `InvalidSyntax` error if the module rule leaves
/// unconsumed input or never matches at all.
pub fn parse_module(source: &str, filename: &str) -> Result<(Arena, NodeID), ParseError> {
    let lexer = DemoLexer::new(source, filename.to_string());
    let mut reentry = DemoReentry::new(keyword_table(), FileID::new(0));

    let mut state: ParserState<DemoLexer<'_>, Arena> = ParserState::new(
        lexer,
        keyword_table(),
        Arena::new(),
        ParserConfig::default(),
        filename.to_string(),
        FileID::new(0),
        "module",
    );

    let root = match grammar::parse_module(&mut state, &mut reentry)? {
        Some(root) => root,
        None => {
            let span = state.last_nonwhitespace_token().map(|t| t.span.start).unwrap_or(0);
            return Err(SyntaxError::with_message(
                SyntaxErrorKind::InvalidSyntax,
                SyntaxErrorKind::InvalidSyntax.default_message(),
                filename.to_string(),
                span,
                1,
                None,
            )
            .into());
        }
    };

    Ok((state.into_arena(), root))
}
