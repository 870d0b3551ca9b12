//! Runtime-tunable knobs for a parse.
//!
//! None of these change what a *correct* program parses to; they bound
//! pathological inputs (f-string nesting bombs) and toggle one
//! deprecation-to-hard-error promotion. A caller that never touches this
//! type gets Python's own defaults.

/// Configuration for a single parse.
///
/// Cheap to copy; constructed once per [`crate::engine::run_parser`] call
/// and threaded through by value into the string/f-string decoders that
/// need it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// When `true`, an invalid `\x` escape in a non-raw string literal is
    /// reported as a hard [`crate::diagnostics::SyntaxErrorKind::InvalidEscape`]
    /// error instead of a warning. Defaults to `false`, matching the
    /// deprecation-warning behavior of the reference implementation this
    /// grammar is modeled on.
    pub promote_invalid_escape: bool,
    /// Maximum recursion depth for nested f-string expressions
    /// (`f"{f'{f'{x}'}'}"`). Exceeding this raises
    /// [`crate::diagnostics::SyntaxErrorKind::FstringNestingDeep`].
    pub max_fstring_recursion: u32,
    /// Maximum bracket-stack depth while scanning an f-string expression
    /// body. Exceeding this raises
    /// [`crate::diagnostics::SyntaxErrorKind::FstringParenDeep`].
    pub max_fstring_bracket_depth: u32,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            promote_invalid_escape: false,
            max_fstring_recursion: 2,
            max_fstring_bracket_depth: 16,
        }
    }
}

impl ParserConfig {
    /// Builds the default configuration.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Returns a copy with `promote_invalid_escape` set.
    #[must_use]
    pub const fn with_promote_invalid_escape(mut self, promote: bool) -> Self {
        self.promote_invalid_escape = promote;
        self
    }

    /// Returns a copy with `max_fstring_recursion` set.
    #[must_use]
    pub const fn with_max_fstring_recursion(mut self, depth: u32) -> Self {
        self.max_fstring_recursion = depth;
        self
    }

    /// Returns a copy with `max_fstring_bracket_depth` set.
    #[must_use]
    pub const fn with_max_fstring_bracket_depth(mut self, depth: u32) -> Self {
        self.max_fstring_bracket_depth = depth;
        self
    }
}
