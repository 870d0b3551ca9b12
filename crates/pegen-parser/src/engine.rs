//! The parser engine: token buffering, mark/rewind, memoized alternative
//! matching, and the primitive combinators generated grammar rules are
//! written against.
//!
//! See §2/§4.A-D of the design: this module is components A (token buffer),
//! B (parser state), C (memo cache, folded into [`buffer::TokenBuffer`]), and
//! D (primitive combinators).

pub mod arena;
pub mod buffer;
pub mod combinators;
pub mod keyword;
pub mod run;
pub mod state;
pub mod token;
