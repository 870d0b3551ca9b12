//! The f-string expression re-entry point: [`DemoReentry`] lets
//! [`pegen_parser::fstring::decode_fstring`] hand an interpolation's raw
//! source text back to this crate's own `expression` rule.
//!
//! Built the same way a nested f-string sub-parse needs to work: a
//! nested lexer plus a nested parser state over the same arena the outer
//! parse is writing into, rather than a fresh one — the arena sharing is
//! what [`crate::arena_ref::ArenaRef`] exists for.

use pegen_ast::node::NodeID;
use pegen_parser::config::ParserConfig;
use pegen_parser::diagnostics::ParseError;
use pegen_parser::engine::arena::ArenaHandle;
use pegen_parser::engine::keyword::KeywordTable;
use pegen_parser::engine::state::ParserState;
use pegen_parser::fstring::ExprReentry;
use pegen_source::types::FileID;

use crate::arena_ref::ArenaRef;
use crate::grammar;
use crate::lexer::DemoLexer;

/// Re-enters this crate's own expression grammar for each `{...}`
/// interpolation an f-string's segmenter carves out.
///
/// Holds the same keyword table every top-level parse uses, so a nested
/// parse recognizes `NAME`-shaped keywords (`from`, `import`, ...)
/// identically to the outer one, and the file this re-entry belongs to
/// (f-string interpolations never span files, so every recursive re-entry
/// shares it).
pub struct DemoReentry {
    keywords: KeywordTable,
    file_id: FileID,
}

impl DemoReentry {
    #[must_use]
    pub fn new(keywords: KeywordTable, file_id: FileID) -> Self { Self { keywords, file_id } }
}

/// Generic over `A` so that an f-string nested inside another f-string's
/// format spec (`f"{x:{f'{y}'}}"`) re-enters through another layer of
/// [`ArenaRef`] and still satisfies this bound — each recursion level
/// wraps the previous arena reference in one more `ArenaRef`, all the way
/// down to the root arena the outermost parse owns.
impl<A: ArenaHandle> ExprReentry<A> for DemoReentry {
    fn reparse_expression(
        &mut self,
        arena: &mut A,
        config: ParserConfig,
        source: &str,
        filename: &str,
    ) -> Result<NodeID, ParseError> {
        let lexer = DemoLexer::new(source, filename.to_string());
        let mut nested = ParserState::new(
            lexer,
            self.keywords.clone(),
            ArenaRef(arena),
            config,
            filename.to_string(),
            self.file_id,
            "expression",
        );

        match grammar::expression(&mut nested, self)? {
            Some(id) => Ok(id),
            None => Err(grammar::invalid_syntax(&nested, "expected an expression")),
        }
    }
}
