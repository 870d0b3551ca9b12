//! Source file handling and position tracking shared by the parser runtime.
//!
//! This crate provides the fundamental types used for working with source code:
//! file registration, content access, and precise location tracking through spans
//! and positions. It has no dependency on tokenization or parsing, so it can be
//! shared by the lexer collaborator, the parser runtime, and diagnostic rendering
//! without creating a cycle between them.

pub mod types;
