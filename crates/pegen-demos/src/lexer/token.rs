//! The raw token alphabet `logos` tokenizes source text into, before
//! [`super::DemoLexer`] layers indentation tracking and `NAME`/keyword
//! unification on top.
//!
//! Fixed `#[token(...)]`/`#[regex(...)]` variants, multiple patterns
//! stacked on one variant where several surface forms collapse to the
//! same tag. The string-literal regexes use the escape-aware
//! `([^\\"]|\\.)*`-style alternation, collapsed into a single `String`
//! variant per prefix/quote-style rather than one variant per prefix
//! combination — [`pegen_parser::strings`] already does the
//! prefix/quote dispatch this crate would otherwise duplicate.

use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\f]+")]
pub enum RawTok {
    #[regex(r"_*[a-zA-Z][a-zA-Z0-9_]*")]
    Name,

    #[regex(r"[0-9][0-9_]*\.[0-9][0-9_]*([eE][+-]?[0-9][0-9_]*)?")]
    #[regex(r"[0-9][0-9_]*[eE][+-]?[0-9][0-9_]*")]
    #[regex(r"0[xX][0-9a-fA-F][0-9a-fA-F_]*")]
    #[regex(r"0[bB][01][01_]*")]
    #[regex(r"0[oO][0-7][0-7_]*")]
    #[regex(r"[0-9][0-9_]*")]
    Number,

    // Plain strings, no prefix.
    #[regex(r#""([^\\"]|\\.)*""#)]
    #[regex(r#"'([^\\']|\\.)*'"#)]
    #[regex(r#""{3}(([^"]|"[^"]|""[^"])*)"{3}"#)]
    #[regex(r#"'{3}(([^']|'[^']|''[^'])*)'{3}"#)]
    // `u`/`U` (unicode marker, no escape-handling change).
    #[regex(r#"u"([^\\"]|\\.)*""#, ignore(case))]
    #[regex(r#"u'([^\\']|\\.)*'"#, ignore(case))]
    // `b`/`B` (bytes).
    #[regex(r#"b"([^\\"]|\\.)*""#, ignore(case))]
    #[regex(r#"b'([^\\']|\\.)*'"#, ignore(case))]
    #[regex(r#"b"{3}(([^"]|"[^"]|""[^"])*)"{3}"#, ignore(case))]
    #[regex(r#"b'{3}(([^']|'[^']|''[^'])*)'{3}"#, ignore(case))]
    // `f`/`F` (f-strings).
    #[regex(r#"f"([^\\"]|\\.)*""#, ignore(case))]
    #[regex(r#"f'([^\\']|\\.)*'"#, ignore(case))]
    #[regex(r#"f"{3}(([^"]|"[^"]|""[^"])*)"{3}"#, ignore(case))]
    #[regex(r#"f'{3}(([^']|'[^']|''[^'])*)'{3}"#, ignore(case))]
    // `r`/`R` (raw, no escape processing in the body at all).
    #[regex(r#"r"([^"])*""#, ignore(case))]
    #[regex(r#"r'([^'])*'"#, ignore(case))]
    // `rb`/`br` and `rf`/`fr` combinations.
    #[regex(r#"(rb|br)"([^"])*""#, ignore(case))]
    #[regex(r#"(rb|br)'([^'])*'"#, ignore(case))]
    #[regex(r#"(rf|fr)"([^"])*""#, ignore(case))]
    #[regex(r#"(rf|fr)'([^'])*'"#, ignore(case))]
    String,

    #[token("**=")]
    #[token("//=")]
    #[token("<<=")]
    #[token(">>=")]
    #[token("->")]
    #[token("...")]
    #[token(":=")]
    #[token("**")]
    #[token("//")]
    #[token("<<")]
    #[token(">>")]
    #[token("<=")]
    #[token(">=")]
    #[token("==")]
    #[token("!=")]
    #[token("+=")]
    #[token("-=")]
    #[token("*=")]
    #[token("/=")]
    #[token("%=")]
    #[token("&=")]
    #[token("|=")]
    #[token("^=")]
    #[token("@=")]
    #[token("+")]
    #[token("-")]
    #[token("*")]
    #[token("/")]
    #[token("%")]
    #[token("@")]
    #[token("&")]
    #[token("|")]
    #[token("^")]
    #[token("~")]
    #[token("<")]
    #[token(">")]
    #[token("=")]
    #[token("(")]
    #[token(")")]
    #[token("[")]
    #[token("]")]
    #[token("{")]
    #[token("}")]
    #[token(",")]
    #[token(":")]
    #[token(".")]
    #[token(";")]
    #[token("!")]
    Op,

    #[regex(r"\n")]
    Newline,

    #[regex(r"#[^\n]*", logos::skip)]
    Comment,

    #[regex(r"\\\r?\n", logos::skip)]
    LineContinuation,
}
