//! The top-level entry point: run one grammar rule to completion against
//! a fresh token buffer and turn the result into one of three shapes.

use pegen_ast::node::NodeID;

use crate::config::ParserConfig;
use crate::diagnostics::{ParseError, SyntaxError, SyntaxErrorKind};
use crate::engine::arena::ArenaHandle;
use crate::engine::keyword::KeywordTable;
use crate::engine::state::ParserState;
use crate::engine::token::TokenSource;

/// What a parse is being run for.
///
/// `Unit` and `Ast` are fully implemented by this runtime; `Code`
/// models the bytecode-backend collaborator named in §6 without this
/// crate implementing a compiler itself — the caller supplies the
/// compiling closure.
pub enum Mode<'c, A, C> {
    /// Mode 0: succeed or fail, discarding the resulting AST. Useful for
    /// a syntax-check-only pass.
    Unit,
    /// Mode 1: return the parsed AST's root node.
    Ast,
    /// Mode 2: hand the parsed AST to a code-object collaborator and
    /// return whatever it produces.
    Code(Box<dyn FnOnce(&A, NodeID) -> Result<C, ParseError> + 'c>),
}

/// The result of a successful [`run_parser`] call, shaped by the
/// requested [`Mode`].
pub enum RunOutcome<C> {
    Unit,
    Ast(NodeID),
    Code(C),
}

/// Runs `start_rule` against a fresh parser built from `source`, then
/// shapes the result per `mode`.
///
/// On a failed parse: if nothing was ever read from the token buffer
/// (the very first token attempt failed, or the start rule rejected
/// before consuming anything and the buffer is still empty), the
/// message is `"error at start before reading any input"`; otherwise
/// it's the generic `"invalid syntax"`, anchored at the last
/// materialized non-whitespace token.
///
/// ## Errors
///
/// Propagates any [`ParseError`] raised by the lexer or a rule, and
/// raises its own `InvalidSyntax` error if `start_rule` returns `Ok(None)`
/// (no alternative matched) or leaves unconsumed input behind.
#[allow(clippy::too_many_arguments)]
pub fn run_parser<'c, S, A, C>(
    source: S,
    start_rule: impl FnOnce(&mut ParserState<S, A>) -> Result<Option<NodeID>, ParseError>,
    mode: Mode<'c, A, C>,
    keywords: KeywordTable,
    arena: A,
    config: ParserConfig,
    filename: impl Into<String>,
    file_id: pegen_source::types::FileID,
    start_rule_name: &'static str,
) -> Result<RunOutcome<C>, ParseError>
where
    S: TokenSource,
    A: ArenaHandle,
{
    let filename = filename.into();
    let mut state =
        ParserState::new(source, keywords, arena, config, filename.clone(), file_id, start_rule_name);

    let parsed = start_rule(&mut state);

    let root = match parsed {
        Ok(Some(root)) => root,
        Ok(None) => return Err(invalid_syntax_error(&state, &filename)),
        Err(err) => return Err(err),
    };

    match mode {
        Mode::Unit => Ok(RunOutcome::Unit),
        Mode::Ast => Ok(RunOutcome::Ast(root)),
        Mode::Code(compile) => {
            let code = compile(state.arena(), root)?;
            Ok(RunOutcome::Code(code))
        }
    }
}

fn invalid_syntax_error<S: TokenSource, A: ArenaHandle>(
    state: &ParserState<S, A>,
    filename: &str,
) -> ParseError {
    match state.last_nonwhitespace_token() {
        None => SyntaxError::with_message(
            SyntaxErrorKind::InvalidSyntax,
            "error at start before reading any input",
            filename.to_string(),
            1,
            1,
            None,
        )
        .into(),
        Some(tok) => SyntaxError::with_message(
            SyntaxErrorKind::InvalidSyntax,
            SyntaxErrorKind::InvalidSyntax.default_message(),
            filename.to_string(),
            tok.span.start,
            1,
            None,
        )
        .into(),
    }
}
