//! F-string (formatted string literal) segmentation and assembly, §4.H/§4.I.
//!
//! Grounded in CPython's `Parser/string_parser.c` (`fstring_find_literal` /
//! `fstring_find_expr`): a single left-to-right scan alternates between
//! copying literal text and carving out one `{expr}` interpolation at a
//! time, re-entering whatever parses the outer grammar's expressions for
//! the text between the braces. This crate never implements that
//! expression grammar itself — [`ExprReentry`] is the seam a generated
//! parser plugs in at.

use pegen_ast::node::{AnyNode, Conversion, FormattedValue, JoinedStr, NodeID, NodeKind};
use pegen_source::types::Span;

use crate::config::ParserConfig;
use crate::diagnostics::{ParseError, SyntaxError, SyntaxErrorKind};
use crate::engine::arena::ArenaHandle;
use crate::engine::token::Token;
use crate::strings::{self, StringParts};

/// The seam between this crate's f-string segmenter and whatever actually
/// parses expressions for the surrounding grammar.
///
/// An f-string expression body (the text between `{` and its matching
/// terminator) is itself a full expression in the host language — this
/// runtime has no opinion on expression grammar, so it hands the raw
/// source text back to the caller and gets a parsed `NodeID` in return.
/// A generated parser implements this once, typically by constructing a
/// nested lexer over `source` and invoking its own `expression` rule.
pub trait ExprReentry<A: ArenaHandle> {
    /// Parses `source` (already wrapped in a redundant pair of
    /// parentheses, so a leading `*` or line break in the embedded
    /// expression is legal exactly as it is inside an f-string) as a
    /// single expression, allocating its nodes into `arena`.
    fn reparse_expression(
        &mut self,
        arena: &mut A,
        config: ParserConfig,
        source: &str,
        filename: &str,
    ) -> Result<NodeID, ParseError>;
}

/// One segment of an f-string body, after the literal/expression
/// alternation but before expression re-parsing or AST assembly.
#[derive(Debug, Clone)]
enum FStringPart {
    /// Already-decoded literal text (escapes resolved, doubled braces
    /// collapsed to one).
    Literal(String),
    Expr(ExprPart),
}

#[derive(Debug, Clone)]
struct ExprPart {
    /// Raw, undecoded source text of the expression, body-relative.
    expr_source: String,
    /// `"x="`-style prefix text (including trailing whitespace) to emit
    /// as a literal immediately before this value, for the `{x=}` debug
    /// form. `None` for an ordinary interpolation.
    debug_prefix: Option<String>,
    conversion: Conversion,
    format_spec: Option<Vec<FStringPart>>,
    rel_start: usize,
    rel_end: usize,
}

/// Scan context threaded through the segmenter: everything needed to
/// report an error or recompute an absolute span, but nothing that
/// changes as the scan progresses.
struct Ctx<'a> {
    token: &'a Token,
    config: ParserConfig,
    filename: &'a str,
    /// Absolute file offset of body byte index 0.
    body_base: usize,
}

impl Ctx<'_> {
    fn err(&self, kind: SyntaxErrorKind) -> ParseError {
        SyntaxError::new(kind, self.filename.to_string(), self.token.span.start, 1, None).into()
    }

    const fn span_for(&self, rel_start: usize, rel_end: usize) -> Span {
        Span { start: self.body_base + rel_start, end: self.body_base + rel_end }
    }
}

fn char_len(body: &str, i: usize) -> usize {
    body[i..].chars().next().map_or(1, char::len_utf8)
}

/// Where a literal run ended.
enum LiteralEnd {
    /// The body (or, at `depth > 0`, the enclosing format spec) is done.
    /// The returned index is the position `{` would be consumed from — on
    /// an unconsumed lone `}` at `depth > 0`, the index of that `}`.
    EndOfBody(usize),
    /// An unescaped `{` was found at `depth == 0`; the returned index is
    /// just past it, where the expression body begins.
    ExprFollows(usize),
}

/// Copies literal text starting at `i` until an expression begins or the
/// run ends, collapsing `{{`/`}}` at `depth == 0` and decoding escapes
/// (`\n`, `\N{...}`, etc.) exactly as a plain string literal would.
///
/// `fstring_find_literal` in the reference tokenizer.
fn scan_literal(body: &str, mut i: usize, depth: u32, ctx: &Ctx<'_>) -> Result<(String, usize, LiteralEnd), ParseError> {
    let bytes = body.as_bytes();
    let len = bytes.len();
    let mut raw = String::new();

    loop {
        if i >= len {
            if depth > 0 {
                return Err(ctx.err(SyntaxErrorKind::FstringUnexpectedEnd));
            }
            break Ok((raw, i, LiteralEnd::EndOfBody(i)));
        }

        let b = bytes[i];

        if b == b'\\' {
            if i + 1 >= len {
                raw.push('\\');
                i += 1;
                continue;
            }
            let clen = char_len(body, i + 1);
            raw.push('\\');
            raw.push_str(&body[i + 1..i + 1 + clen]);
            i += 1 + clen;
            continue;
        }

        if b == b'{' {
            if depth == 0 && bytes.get(i + 1) == Some(&b'{') {
                raw.push('{');
                i += 2;
                continue;
            }
            break Ok((raw, i + 1, LiteralEnd::ExprFollows(i + 1)));
        }

        if b == b'}' {
            if depth == 0 && bytes.get(i + 1) == Some(&b'}') {
                raw.push('}');
                i += 2;
                continue;
            }
            if depth == 0 {
                return Err(ctx.err(SyntaxErrorKind::FstringSingleCloseBrace));
            }
            break Ok((raw, i, LiteralEnd::EndOfBody(i)));
        }

        let clen = char_len(body, i);
        raw.push_str(&body[i..i + clen]);
        i += clen;
    }
}

/// A bracket/string-aware scan for the next depth-0 terminator among `!`,
/// `:`, `=`, `}` — the characters that can end an expression body or one
/// of its optional trailing clauses. `!=` and `==` consume as a single
/// unit rather than terminating early; a bare or two-char `<`/`>`/`<=`/`>=`
/// never terminates at all, since unlike `!`/`=` they're ordinary
/// comparison operators with no special meaning to an f-string.
///
/// `fstring_find_expr`'s inner character scan.
struct ExprScan {
    /// Body-relative index where the terminator character begins.
    expr_end: usize,
    terminator: u8,
    /// Body-relative index just past the terminator (equal to `expr_end`
    /// for `}`, which is never consumed here).
    next: usize,
}

fn scan_expression_until(body: &str, start: usize, ctx: &Ctx<'_>) -> Result<ExprScan, ParseError> {
    let bytes = body.as_bytes();
    let len = bytes.len();
    let mut i = start;
    let mut stack: Vec<u8> = Vec::new();
    let mut in_string: Option<(u8, bool)> = None;

    loop {
        if i >= len {
            return Err(ctx.err(SyntaxErrorKind::FstringUnexpectedEnd));
        }
        let b = bytes[i];

        if let Some((quote, triple)) = in_string {
            if b == quote {
                if triple {
                    if i + 2 < len && bytes[i + 1] == quote && bytes[i + 2] == quote {
                        in_string = None;
                        i += 3;
                        continue;
                    }
                    i += 1;
                    continue;
                }
                in_string = None;
                i += 1;
                continue;
            }
            if b == b'\\' {
                return Err(ctx.err(SyntaxErrorKind::FstringBackslash));
            }
            i += char_len(body, i);
            continue;
        }

        match b {
            b'\\' => return Err(ctx.err(SyntaxErrorKind::FstringBackslash)),
            b'#' => return Err(ctx.err(SyntaxErrorKind::FstringHash)),
            b'\'' | b'"' => {
                let triple = i + 2 < len && bytes[i + 1] == b && bytes[i + 2] == b;
                in_string = Some((b, triple));
                i += if triple { 3 } else { 1 };
            }
            b'(' | b'[' | b'{' => {
                if stack.len() as u32 >= ctx.config.max_fstring_bracket_depth {
                    return Err(ctx.err(SyntaxErrorKind::FstringParenDeep));
                }
                stack.push(b);
                i += 1;
            }
            b')' | b']' | b'}' => {
                if stack.is_empty() {
                    if b == b'}' {
                        return Ok(ExprScan { expr_end: i, terminator: b'}', next: i });
                    }
                    return Err(ctx.err(SyntaxErrorKind::FstringMismatchedBrace));
                }
                let open = stack.pop().unwrap();
                let matched = matches!((open, b), (b'(', b')') | (b'[', b']') | (b'{', b'}'));
                if !matched {
                    return Err(ctx.err(SyntaxErrorKind::FstringMismatchedBrace));
                }
                i += 1;
            }
            b'!' if stack.is_empty() => {
                if bytes.get(i + 1) == Some(&b'=') {
                    i += 2;
                } else {
                    return Ok(ExprScan { expr_end: i, terminator: b'!', next: i + 1 });
                }
            }
            b'=' if stack.is_empty() => {
                if bytes.get(i + 1) == Some(&b'=') {
                    i += 2;
                } else {
                    return Ok(ExprScan { expr_end: i, terminator: b'=', next: i + 1 });
                }
            }
            b':' if stack.is_empty() => {
                return Ok(ExprScan { expr_end: i, terminator: b':', next: i + 1 });
            }
            b'<' | b'>' if stack.is_empty() => {
                // Neither a bare `<`/`>` nor the two-char `<=`/`>=` ends the
                // expression body — unlike `!`/`=`, they never stand alone
                // as a terminator, only as ordinary comparison operators.
                if bytes.get(i + 1) == Some(&b'=') {
                    i += 2;
                } else {
                    i += 1;
                }
            }
            _ => i += char_len(body, i),
        }
    }
}

/// Parses one `{...}` interpolation starting right after its opening
/// brace, following the fixed clause order `=` (debug) then `!c`
/// (conversion) then `:spec` (format spec) then the closing `}`.
///
/// `fstring_find_expr`'s post-expression handling.
fn parse_formatted_value(body: &str, expr_start: usize, depth: u32, ctx: &Ctx<'_>) -> Result<(ExprPart, usize), ParseError> {
    let first = scan_expression_until(body, expr_start, ctx)?;
    let expr_end = first.expr_end;
    let mut cursor = first.next;
    let mut terminator = first.terminator;
    let mut debug_prefix = None;

    if terminator == b'=' {
        let bytes = body.as_bytes();
        let mut k = cursor;
        while k < bytes.len() && bytes[k].is_ascii_whitespace() {
            k += 1;
        }
        debug_prefix = Some(body[expr_start..k].to_string());
        cursor = k;
        let scan = scan_expression_until(body, cursor, ctx)?;
        terminator = scan.terminator;
        cursor = scan.next;
    }

    let mut conversion = Conversion::None;
    if terminator == b'!' {
        conversion = match body.as_bytes().get(cursor) {
            Some(b's') => Conversion::Str,
            Some(b'r') => Conversion::Repr,
            Some(b'a') => Conversion::Ascii,
            _ => return Err(ctx.err(SyntaxErrorKind::FstringBadConversion)),
        };
        cursor += 1;
        let scan = scan_expression_until(body, cursor, ctx)?;
        terminator = scan.terminator;
        cursor = scan.next;
    }

    let mut format_spec = None;
    if terminator == b':' {
        if depth + 1 > ctx.config.max_fstring_recursion {
            return Err(ctx.err(SyntaxErrorKind::FstringNestingDeep));
        }
        let (spec_parts, after) = segment_body(body, cursor, depth + 1, ctx)?;
        format_spec = Some(spec_parts);
        cursor = after;
        terminator = b'}';
    }

    if terminator != b'}' || body.as_bytes().get(cursor) != Some(&b'}') {
        return Err(ctx.err(SyntaxErrorKind::FstringUnexpectedEnd));
    }
    cursor += 1;

    if body[expr_start..expr_end].trim().is_empty() {
        return Err(ctx.err(SyntaxErrorKind::FstringEmpty));
    }

    if debug_prefix.is_some() && conversion == Conversion::None && format_spec.is_none() {
        conversion = Conversion::Repr;
    }

    Ok((
        ExprPart {
            expr_source: body[expr_start..expr_end].to_string(),
            debug_prefix,
            conversion,
            format_spec,
            rel_start: expr_start,
            rel_end: expr_end,
        },
        cursor,
    ))
}

/// Runs the literal/expression alternation over the whole of `body`
/// (`depth == 0`) or over one format-spec's worth of it (`depth > 0`,
/// stopping at the enclosing expression's closing `}` without consuming
/// it). Returns the segments and the index just past what was consumed.
fn segment_body(body: &str, start: usize, depth: u32, ctx: &Ctx<'_>) -> Result<(Vec<FStringPart>, usize), ParseError> {
    let mut parts = Vec::new();
    let mut i = start;
    loop {
        let (raw, next_i, end) = scan_literal(body, i, depth, ctx)?;
        if !raw.is_empty() {
            let decoded = strings::decode_escapes(&raw, false, ctx.token, ctx.config, ctx.filename)?;
            if !decoded.is_empty() {
                parts.push(FStringPart::Literal(decoded));
            }
        }
        match end {
            LiteralEnd::EndOfBody(pos) => return Ok((parts, pos)),
            LiteralEnd::ExprFollows(expr_start) => {
                let (expr, after) = parse_formatted_value(body, expr_start, depth, ctx)?;
                if let Some(prefix) = expr.debug_prefix.clone() {
                    parts.push(FStringPart::Literal(prefix));
                }
                parts.push(FStringPart::Expr(expr));
                i = after;
            }
        }
    }
}

/// Segments an f-mode literal's body into an alternation of literal runs
/// and `{expr}` parts, without re-parsing any expression text yet.
///
/// Exposed standalone (distinct from [`decode_fstring`]) so tests can
/// check segmentation without a [`ExprReentry`] collaborator on hand.
fn segment_fstring(body: &str, ctx: &Ctx<'_>) -> Result<Vec<FStringPart>, ParseError> {
    let (parts, _) = segment_body(body, 0, 0, ctx)?;
    Ok(parts)
}

/// Accumulates assembled `NodeID`s for one f-string (or one of its
/// nested format specs), coalescing runs of literal text into a single
/// `Constant` the way adjacent plain string literals are concatenated.
///
/// `FstringParser_ConcatFstring` in the reference implementation.
struct Assembler {
    pending: String,
    values: Vec<NodeID>,
    saw_expression: bool,
}

impl Assembler {
    const fn new() -> Self { Self { pending: String::new(), values: Vec::new(), saw_expression: false } }

    fn push_literal(&mut self, text: &str) { self.pending.push_str(text); }

    fn flush_literal(&mut self, arena: &mut impl ArenaHandle, span: Span) {
        if !self.pending.is_empty() {
            let text = std::mem::take(&mut self.pending);
            let node = pegen_ast::node::Constant::new(
                pegen_ast::node::ConstantValue::Str(text),
                NodeID::placeholder(),
                span,
            );
            let id = arena.alloc_node(NodeKind::Constant, AnyNode::Constant(node), span);
            self.values.push(id);
        }
    }

    fn push_expression(&mut self, arena: &mut impl ArenaHandle, id: NodeID, span: Span) {
        self.flush_literal(arena, span);
        self.values.push(id);
        self.saw_expression = true;
    }

    /// Finishes the assembly: a bare `Constant` if no interpolation was
    /// ever appended (covers both a plain-string format spec and a
    /// literal-only f-string), otherwise a `JoinedStr` over the whole
    /// alternation.
    fn finish(mut self, arena: &mut impl ArenaHandle, span: Span) -> NodeID {
        if !self.saw_expression {
            let text = std::mem::take(&mut self.pending);
            let node = pegen_ast::node::Constant::new(
                pegen_ast::node::ConstantValue::Str(text),
                NodeID::placeholder(),
                span,
            );
            return arena.alloc_node(NodeKind::Constant, AnyNode::Constant(node), span);
        }
        self.flush_literal(arena, span);
        let joined = JoinedStr::new(self.values, NodeID::placeholder(), span);
        arena.alloc_node(NodeKind::JoinedStr, AnyNode::JoinedStr(joined), span)
    }
}

fn assemble<A: ArenaHandle>(
    arena: &mut A,
    reentry: &mut impl ExprReentry<A>,
    segments: &[FStringPart],
    depth: u32,
    ctx: &Ctx<'_>,
) -> Result<NodeID, ParseError> {
    let mut asm = Assembler::new();
    for segment in segments {
        match segment {
            FStringPart::Literal(text) => {
                asm.push_literal(text);
            }
            FStringPart::Expr(expr) => {
                let wrapped = format!("({})", expr.expr_source);
                let value = reentry.reparse_expression(arena, ctx.config, &wrapped, ctx.filename)?;
                let format_spec = match &expr.format_spec {
                    Some(spec_segments) => {
                        Some(assemble(arena, reentry, spec_segments, depth + 1, ctx)?)
                    }
                    None => None,
                };
                let expr_span = ctx.span_for(expr.rel_start, expr.rel_end);
                let fv = FormattedValue::new(value, expr.conversion, format_spec, NodeID::placeholder(), expr_span);
                let id = arena.alloc_node(NodeKind::FormattedValue, AnyNode::FormattedValue(fv), expr_span);
                asm.push_expression(arena, id, expr_span);
            }
        }
    }
    Ok(asm.finish(arena, ctx.span_for(0, 0)))
}

/// Segments, re-parses, and assembles a complete f-mode `STRING` token
/// into its `JoinedStr`/`Constant`/`FormattedValue` node tree.
///
/// `parts.body_offset` anchors every produced node's span back to an
/// absolute file position via `token.span.start + body_offset + rel`.
pub fn decode_fstring<A: ArenaHandle>(
    arena: &mut A,
    reentry: &mut impl ExprReentry<A>,
    parts: &StringParts<'_>,
    token: &Token,
    config: ParserConfig,
    filename: &str,
) -> Result<NodeID, ParseError> {
    debug_assert!(parts.f_mode, "decode_fstring called on a non-f-mode literal");
    log::debug!("{filename}: f-string sub-parser invoked on {} byte body", parts.body.len());
    let ctx = Ctx { token, config, filename, body_base: token.span.start + parts.body_offset };
    let segments = segment_fstring(parts.body, &ctx)?;
    let result = assemble(arena, reentry, &segments, 0, &ctx);
    log::debug!("{filename}: f-string sub-parser completed, ok={}", result.is_ok());
    result
}

#[cfg(test)]
mod tests {
    use pegen_source::types::{FileID, Position, SourceSpan};

    use super::*;
    use crate::engine::token::TokKind;
    use crate::strings::split_string_token;

    fn dummy_span() -> Span {
        let pos = Position::new(1, 1, 0);
        SourceSpan::new(pos, pos, FileID::new(1)).into()
    }

    fn tok(text: &str) -> Token { Token::new(TokKind::String, text.to_string(), dummy_span()) }

    fn ctx_for<'a>(token: &'a Token, filename: &'a str, parts: &StringParts<'_>) -> Ctx<'a> {
        Ctx {
            token,
            config: ParserConfig::default(),
            filename,
            body_base: token.span.start + parts.body_offset,
        }
    }

    fn segment(text: &str) -> Vec<FStringPart> {
        let t = tok(text);
        let parts = split_string_token(&t, "<test>").unwrap();
        assert!(parts.f_mode);
        let ctx = ctx_for(&t, "<test>", &parts);
        segment_fstring(parts.body, &ctx).unwrap()
    }

    fn literal_texts(parts: &[FStringPart]) -> Vec<&str> {
        parts
            .iter()
            .filter_map(|p| match p {
                FStringPart::Literal(s) => Some(s.as_str()),
                FStringPart::Expr(_) => None,
            })
            .collect()
    }

    #[test]
    fn segments_plain_literal_with_no_expressions() {
        let parts = segment(r#"f"hello world""#);
        assert_eq!(parts.len(), 1);
        assert_eq!(literal_texts(&parts), vec!["hello world"]);
    }

    #[test]
    fn segments_single_expression() {
        let parts = segment(r#"f"x={name}!""#);
        assert_eq!(parts.len(), 3);
        match &parts[1] {
            FStringPart::Expr(e) => {
                assert_eq!(e.expr_source, "name");
                assert_eq!(e.conversion, Conversion::None);
                assert!(e.format_spec.is_none());
            }
            FStringPart::Literal(..) => panic!("expected an expression segment"),
        }
    }

    #[test]
    fn collapses_doubled_braces() {
        let parts = segment(r#"f"{{literal}}""#);
        assert_eq!(literal_texts(&parts), vec!["{literal}"]);
    }

    #[test]
    fn recognizes_conversion_character() {
        let parts = segment(r#"f"{x!r}""#);
        match &parts[0] {
            FStringPart::Expr(e) => assert_eq!(e.conversion, Conversion::Repr),
            FStringPart::Literal(..) => panic!("expected an expression segment"),
        }
    }

    #[test]
    fn recognizes_format_spec_with_nested_expression() {
        let parts = segment(r#"f"{x:{width}}""#);
        match &parts[0] {
            FStringPart::Expr(e) => {
                assert_eq!(e.expr_source, "x");
                let spec = e.format_spec.as_ref().unwrap();
                assert_eq!(spec.len(), 1);
                assert!(matches!(spec[0], FStringPart::Expr(_)));
            }
            FStringPart::Literal(..) => panic!("expected an expression segment"),
        }
    }

    #[test]
    fn debug_form_captures_prefix_and_implies_repr() {
        let parts = segment(r#"f"{x=}""#);
        assert_eq!(literal_texts(&parts), vec!["x="]);
        match &parts[1] {
            FStringPart::Expr(e) => {
                assert_eq!(e.expr_source, "x");
                assert_eq!(e.conversion, Conversion::Repr);
            }
            FStringPart::Literal(..) => panic!("expected an expression segment"),
        }
    }

    #[test]
    fn rejects_empty_expression() {
        let t = tok(r#"f"{}""#);
        let parts = split_string_token(&t, "<test>").unwrap();
        let ctx = ctx_for(&t, "<test>", &parts);
        let err = segment_fstring(parts.body, &ctx).unwrap_err();
        assert!(matches!(err.as_syntax().map(|e| e.kind), Some(SyntaxErrorKind::FstringEmpty)));
    }

    #[test]
    fn rejects_backslash_in_expression() {
        let t = tok(r#"f"{a\b}""#);
        let parts = split_string_token(&t, "<test>").unwrap();
        let ctx = ctx_for(&t, "<test>", &parts);
        let err = segment_fstring(parts.body, &ctx).unwrap_err();
        assert!(matches!(err.as_syntax().map(|e| e.kind), Some(SyntaxErrorKind::FstringBackslash)));
    }

    #[test]
    fn rejects_single_close_brace() {
        let t = tok(r#"f"oops}""#);
        let parts = split_string_token(&t, "<test>").unwrap();
        let ctx = ctx_for(&t, "<test>", &parts);
        let err = segment_fstring(parts.body, &ctx).unwrap_err();
        assert!(matches!(err.as_syntax().map(|e| e.kind), Some(SyntaxErrorKind::FstringSingleCloseBrace)));
    }

    #[test]
    fn rejects_unterminated_expression() {
        let t = tok(r#"f"{x""#);
        let parts = split_string_token(&t, "<test>").unwrap();
        let ctx = ctx_for(&t, "<test>", &parts);
        let err = segment_fstring(parts.body, &ctx).unwrap_err();
        assert!(matches!(err.as_syntax().map(|e| e.kind), Some(SyntaxErrorKind::FstringUnexpectedEnd)));
    }

    #[test]
    fn allows_equality_operator_without_terminating() {
        let parts = segment(r#"f"{a==b}""#);
        match &parts[0] {
            FStringPart::Expr(e) => assert_eq!(e.expr_source, "a==b"),
            FStringPart::Literal(..) => panic!("expected an expression segment"),
        }
    }

    #[test]
    fn allows_comparison_operators_without_terminating() {
        let parts = segment(r#"f"{a<=b}""#);
        match &parts[0] {
            FStringPart::Expr(e) => assert_eq!(e.expr_source, "a<=b"),
            FStringPart::Literal(..) => panic!("expected an expression segment"),
        }

        let parts = segment(r#"f"{a>=b}""#);
        match &parts[0] {
            FStringPart::Expr(e) => assert_eq!(e.expr_source, "a>=b"),
            FStringPart::Literal(..) => panic!("expected an expression segment"),
        }

        let parts = segment(r#"f"{a<b}""#);
        match &parts[0] {
            FStringPart::Expr(e) => assert_eq!(e.expr_source, "a<b"),
            FStringPart::Literal(..) => panic!("expected an expression segment"),
        }
    }

    #[test]
    fn colon_terminates_even_before_equals() {
        let parts = segment(r#"f"{x:=5}""#);
        match &parts[0] {
            FStringPart::Expr(e) => {
                assert_eq!(e.expr_source, "x");
                let spec = e.format_spec.as_ref().unwrap();
                assert_eq!(literal_texts(spec), vec!["=5"]);
            }
            FStringPart::Literal(..) => panic!("expected an expression segment"),
        }
    }

    #[test]
    fn string_literal_inside_expression_hides_braces() {
        let parts = segment(r#"f"{'}'}""#);
        match &parts[0] {
            FStringPart::Expr(e) => assert_eq!(e.expr_source, "'}'"),
            FStringPart::Literal(..) => panic!("expected an expression segment"),
        }
    }

    struct StubReentry {
        next_id: u32,
    }

    impl<A: ArenaHandle> ExprReentry<A> for StubReentry {
        fn reparse_expression(
            &mut self,
            arena: &mut A,
            _config: ParserConfig,
            _source: &str,
            _filename: &str,
        ) -> Result<NodeID, ParseError> {
            let span = dummy_span();
            let node = pegen_ast::node::Name::new(
                "stub".to_string(),
                pegen_ast::node::ExprContext::Load,
                NodeID::placeholder(),
                span,
            );
            let id = arena.alloc_node(NodeKind::Name, AnyNode::Name(node), span);
            self.next_id += 1;
            Ok(id)
        }
    }

    #[test]
    fn decode_fstring_assembles_joined_str() {
        let mut arena = pegen_ast::ast::Arena::new();
        let mut reentry = StubReentry { next_id: 0 };
        let t = tok(r#"f"hi {name}!""#);
        let parts = split_string_token(&t, "<test>").unwrap();
        let id = decode_fstring(&mut arena, &mut reentry, &parts, &t, ParserConfig::default(), "<test>").unwrap();
        let node = arena.get_node(id).unwrap();
        assert!(matches!(node.kind, NodeKind::JoinedStr));
    }

    #[test]
    fn decode_fstring_with_only_literal_text_yields_constant() {
        let mut arena = pegen_ast::ast::Arena::new();
        let mut reentry = StubReentry { next_id: 0 };
        let t = tok(r#"f"no interpolation here""#);
        let parts = split_string_token(&t, "<test>").unwrap();
        let id = decode_fstring(&mut arena, &mut reentry, &parts, &t, ParserConfig::default(), "<test>").unwrap();
        let node = arena.get_node(id).unwrap();
        assert!(matches!(node.kind, NodeKind::Constant));
    }
}
