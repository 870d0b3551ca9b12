//! # pegen-parser
//!
//! The runtime support library behind a generated PEG (parsing expression
//! grammar) parser: token buffering, packrat memoization, the handful of
//! primitive combinators every hand-written rule function is built from, AST
//! construction helpers, and the string/f-string literal decoders.
//!
//! A grammar compiler (out of scope for this crate) emits rule functions
//! shaped `fn(&mut ParserState<S, A>) -> ParseResult<Option<NodeID>>`; this
//! crate provides everything those functions are written against. It never
//! constructs a lexer, an arena, or a rule function itself — see
//! [`engine::token::TokenSource`] and [`engine::arena::ArenaHandle`] for the
//! collaborator contracts a caller supplies.
//!
//! ## Example
//!
//! ```rust,ignore
//! use pegen_parser::engine::run::{run_parser, Mode};
//! use pegen_parser::engine::keyword::KeywordTable;
//! use pegen_parser::config::ParserConfig;
//!
//! let outcome = run_parser(
//!     my_lexer,
//!     my_generated_start_rule,
//!     Mode::Ast,
//!     KeywordTable::new(["if", "else", "def", "class"]),
//!     my_arena,
//!     ParserConfig::default(),
//!     "example.ty",
//!     file_id,
//!     "file",
//! )?;
//! ```

pub mod ast_helpers;
pub mod config;
pub mod diagnostics;
pub mod engine;
pub mod fstring;
pub mod strings;
pub mod utils;
