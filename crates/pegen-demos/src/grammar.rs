//! A small hand-written grammar exercising `pegen_parser` end to end.
//!
//! This is not a grammar for any real language: just enough statement and
//! expression shapes to drive every primitive combinator, AST construction
//! helper, and literal decoder in the runtime at least once — an
//! assignment with a binary-operator RHS, a `def` with every parameter
//! kind, f-strings (including the debug `=` form and a nested format
//! spec), an annotated assignment whose target is rejected, a non-ASCII
//! bytes literal, and a relative `from ... import`.
//!
//! Hand-written rule-function layer in the style a generated grammar
//! would produce: one function per production, `Ok(None)` meaning "try
//! the next alternative" and always leaving the mark where it found it
//! on that path, span computed from the rule's entry mark through its
//! last consumed token.

use pegen_ast::node::{
    AnyNode,
    Constant,
    ConstantValue,
    ExprContext,
    FunctionDef,
    List,
    Module,
    Name,
    NodeID,
    NodeKind,
    Opaque,
    Param,
    Tuple,
};
use pegen_parser::ast_helpers::{self, DotToken, SlashWithDefault, StarEtc};
use pegen_parser::diagnostics::{ParseError, ParseResult, SyntaxError, SyntaxErrorKind};
use pegen_parser::engine::arena::ArenaHandle;
use pegen_parser::engine::combinators::{expect_keyword, expect_operator, expect_token, last_nonwhitespace_span};
use pegen_parser::engine::state::ParserState;
use pegen_parser::engine::token::{Token, TokKind, TokenSource};
use pegen_parser::fstring::{decode_fstring, ExprReentry};
use pegen_parser::strings::{decode_literal_body, split_string_token, DecodedLiteral};
use pegen_source::types::Span;

fn span_since<S: TokenSource, A: ArenaHandle>(
    p: &mut ParserState<S, A>,
    start_mark: usize,
) -> ParseResult<Span> {
    let start = p.peek_at(start_mark)?.span.start;
    let end_mark = p.mark().saturating_sub(1).max(start_mark);
    let end = p.peek_at(end_mark)?.span.end;
    Ok(Span::new(start, end))
}

pub(crate) fn invalid_syntax<S: TokenSource, A: ArenaHandle>(p: &ParserState<S, A>, message: &str) -> ParseError {
    let span = last_nonwhitespace_span(p).unwrap_or_default();
    SyntaxError::with_message(
        SyntaxErrorKind::InvalidSyntax,
        message.to_string(),
        p.filename().to_string(),
        span.start,
        1,
        None,
    )
    .into()
}

/// `module: (NEWLINE | statement)* ENDMARKER`
pub fn parse_module<S: TokenSource, A: ArenaHandle, R: ExprReentry<A>>(
    p: &mut ParserState<S, A>,
    reentry: &mut R,
) -> ParseResult<Option<NodeID>> {
    let start = p.mark();
    let mut body = Vec::new();
    loop {
        while expect_token(p, TokKind::Newline)?.is_some() {}
        if p.peek()?.kind == TokKind::EndMarker {
            break;
        }
        let Some(stmt) = statement(p, reentry)? else { return Ok(None) };
        body.push(stmt);
    }
    let span = span_since(p, start)?;
    let module = Module::new(body, NodeID::placeholder(), span);
    Ok(Some(p.arena_mut().alloc_node(NodeKind::Module, AnyNode::Module(module), span)))
}

fn statement<S: TokenSource, A: ArenaHandle, R: ExprReentry<A>>(
    p: &mut ParserState<S, A>,
    reentry: &mut R,
) -> ParseResult<Option<NodeID>> {
    log::debug!("statement: entering at mark {}", p.mark());
    if let Some(id) = function_def(p, reentry)? {
        return Ok(Some(id));
    }
    if let Some(id) = import_from_stmt(p)? {
        return Ok(Some(id));
    }
    simple_statement(p, reentry)
}

/// One of `pass_stmt | ann_assign_stmt | assign_stmt | expression`,
/// followed by `NEWLINE` (or `ENDMARKER` at end of file).
fn simple_statement<S: TokenSource, A: ArenaHandle, R: ExprReentry<A>>(
    p: &mut ParserState<S, A>,
    reentry: &mut R,
) -> ParseResult<Option<NodeID>> {
    let mark = p.mark();
    let stmt = if let Some(id) = pass_stmt(p)? {
        id
    } else if let Some(id) = ann_assign_stmt(p, reentry)? {
        id
    } else if let Some(id) = assign_stmt(p, reentry)? {
        id
    } else if let Some(id) = expression(p, reentry)? {
        id
    } else {
        p.reset(mark);
        return Ok(None);
    };

    let next = p.peek()?;
    if next.kind == TokKind::Newline {
        p.advance()?;
    } else if next.kind != TokKind::EndMarker {
        return Err(invalid_syntax(p, "expected newline after statement"));
    }
    Ok(Some(stmt))
}

fn pass_stmt<S: TokenSource, A: ArenaHandle>(p: &mut ParserState<S, A>) -> ParseResult<Option<NodeID>> {
    let mark = p.mark();
    if expect_keyword(p, "pass")?.is_none() {
        return Ok(None);
    }
    let span = span_since(p, mark)?;
    let node = Opaque::new("Pass".to_string(), Vec::new(), NodeID::placeholder(), span);
    Ok(Some(p.arena_mut().alloc_node(NodeKind::Opaque, AnyNode::Opaque(node), span)))
}

/// `target ':' expression ('=' expression)?`
///
/// Exercises [`ast_helpers::construct_assign_target`] directly on
/// whatever shape `target` parses as, rather than restricting `target` to
/// a bare name the way a full grammar would: a target that itself parses
/// as a list or multi-element tuple (`[a, b]: int = 1`) is exactly the
/// shape that helper rejects.
fn ann_assign_stmt<S: TokenSource, A: ArenaHandle, R: ExprReentry<A>>(
    p: &mut ParserState<S, A>,
    reentry: &mut R,
) -> ParseResult<Option<NodeID>> {
    let mark = p.mark();
    let Some(target) = atom(p, reentry)? else { return Ok(None) };
    if expect_operator(p, ":")?.is_none() {
        p.reset(mark);
        return Ok(None);
    }
    let Some(annotation) = expression(p, reentry)? else {
        return Err(invalid_syntax(p, "expected annotation expression"));
    };
    let value = if expect_operator(p, "=")?.is_some() {
        match expression(p, reentry)? {
            Some(id) => Some(id),
            None => return Err(invalid_syntax(p, "expected assignment value")),
        }
    } else {
        None
    };

    let target = ast_helpers::construct_assign_target(p.arena(), target, p.filename())?;
    let target = ast_helpers::set_expr_context(p.arena_mut(), target, ExprContext::Store);

    let span = span_since(p, mark)?;
    let tag = if value.is_some() { "AnnAssign" } else { "AnnAssignNoValue" };
    let mut children = vec![target, annotation];
    children.extend(value);
    let node = Opaque::new(tag.to_string(), children, NodeID::placeholder(), span);
    Ok(Some(p.arena_mut().alloc_node(NodeKind::Opaque, AnyNode::Opaque(node), span)))
}

/// `target '=' expression`
fn assign_stmt<S: TokenSource, A: ArenaHandle, R: ExprReentry<A>>(
    p: &mut ParserState<S, A>,
    reentry: &mut R,
) -> ParseResult<Option<NodeID>> {
    let mark = p.mark();
    let Some(target) = atom(p, reentry)? else { return Ok(None) };
    if expect_operator(p, "=")?.is_none() {
        p.reset(mark);
        return Ok(None);
    }
    let Some(value) = expression(p, reentry)? else {
        return Err(invalid_syntax(p, "expected assignment value"));
    };
    let target = ast_helpers::set_expr_context(p.arena_mut(), target, ExprContext::Store);
    let span = span_since(p, mark)?;
    let node = Opaque::new("Assign".to_string(), vec![target, value], NodeID::placeholder(), span);
    Ok(Some(p.arena_mut().alloc_node(NodeKind::Opaque, AnyNode::Opaque(node), span)))
}

/// `'def' NAME '(' parameters? ')' ':' simple_statement`
///
/// The body is a single simple statement on the same line rather than an
/// indented suite — this fixture has no use for block-level indentation
/// beyond what `DemoLexer` already tracks for its own sake.
fn function_def<S: TokenSource, A: ArenaHandle, R: ExprReentry<A>>(
    p: &mut ParserState<S, A>,
    reentry: &mut R,
) -> ParseResult<Option<NodeID>> {
    let mark = p.mark();
    if expect_keyword(p, "def")?.is_none() {
        return Ok(None);
    }
    let Some(name_tok) = expect_token(p, TokKind::Name)? else {
        p.reset(mark);
        return Ok(None);
    };
    if expect_operator(p, "(")?.is_none() {
        p.reset(mark);
        return Ok(None);
    }

    let params_mark = p.mark();
    let args = match parameters(p, reentry)? {
        Some(id) => id,
        None => ast_helpers::empty_arguments(p.arena_mut(), span_since(p, params_mark)?),
    };

    if expect_operator(p, ")")?.is_none() {
        return Err(invalid_syntax(p, "expected ')'"));
    }
    if expect_operator(p, ":")?.is_none() {
        return Err(invalid_syntax(p, "expected ':'"));
    }
    let Some(body_stmt) = simple_statement(p, reentry)? else {
        return Err(invalid_syntax(p, "expected function body"));
    };

    let span = span_since(p, mark)?;
    let def = FunctionDef::new(
        name_tok.text,
        args,
        vec![body_stmt],
        Vec::new(),
        None,
        false,
        NodeID::placeholder(),
        span,
    );
    Ok(Some(p.arena_mut().alloc_node(NodeKind::FunctionDef, AnyNode::FunctionDef(def), span)))
}

/// One parameter: `NAME (':' expression)? ('=' expression)?`, stopping
/// short of consuming a trailing comma (the caller owns that).
struct RawParam {
    param: Param,
    default: Option<NodeID>,
}

fn parse_param<S: TokenSource, A: ArenaHandle, R: ExprReentry<A>>(
    p: &mut ParserState<S, A>,
    reentry: &mut R,
) -> ParseResult<Option<RawParam>> {
    let mark = p.mark();
    let Some(name_tok) = expect_token(p, TokKind::Name)? else { return Ok(None) };
    let annotation = if expect_operator(p, ":")?.is_some() {
        match expression(p, reentry)? {
            Some(id) => Some(id),
            None => return Err(invalid_syntax(p, "expected parameter annotation")),
        }
    } else {
        None
    };
    let default = if expect_operator(p, "=")?.is_some() {
        match expression(p, reentry)? {
            Some(id) => Some(id),
            None => return Err(invalid_syntax(p, "expected parameter default")),
        }
    } else {
        None
    };
    let span = span_since(p, mark)?;
    Ok(Some(RawParam { param: Param::new(name_tok.text, annotation, span), default }))
}

/// Collects the full six-bucket parameter list: positional-only params
/// (before a bare `/`), regular positional params, `*args`/bare `*`,
/// keyword-only params, and `**kwargs`, then hands the raw pieces to
/// [`ast_helpers::make_arguments`] exactly the way it expects them.
fn parameters<S: TokenSource, A: ArenaHandle, R: ExprReentry<A>>(
    p: &mut ParserState<S, A>,
    reentry: &mut R,
) -> ParseResult<Option<NodeID>> {
    let start = p.mark();
    let mut group: Vec<RawParam> = Vec::new();
    let mut slash_without_default: Option<Vec<Param>> = None;
    let mut slash_with_default: Option<SlashWithDefault> = None;

    loop {
        if expect_operator(p, "/")?.is_some() {
            if group.is_empty() {
                return Err(invalid_syntax(p, "expected a parameter before '/'"));
            }
            if group.iter().all(|raw| raw.default.is_none()) {
                slash_without_default = Some(group.drain(..).map(|raw| raw.param).collect());
            } else {
                let mut swd = SlashWithDefault::default();
                for raw in group.drain(..) {
                    match raw.default {
                        Some(d) => swd.names_with_defaults.push((raw.param, d)),
                        None => swd.plain_names.push(raw.param),
                    }
                }
                slash_with_default = Some(swd);
            }
            if expect_operator(p, ",")?.is_none() {
                break;
            }
            continue;
        }

        let peeked = p.peek()?;
        if peeked.kind == TokKind::Op && (peeked.text == "*" || peeked.text == "**") {
            break;
        }

        match parse_param(p, reentry)? {
            Some(raw) => {
                group.push(raw);
                if expect_operator(p, ",")?.is_none() {
                    break;
                }
            }
            None => break,
        }
    }

    let mut plain_names: Option<Vec<Param>> = None;
    let mut names_with_default: Option<Vec<(Param, NodeID)>> = None;
    if !group.is_empty() {
        let mut plain = Vec::new();
        let mut with_default = Vec::new();
        for raw in group {
            match raw.default {
                Some(d) => with_default.push((raw.param, d)),
                None => plain.push(raw.param),
            }
        }
        if !plain.is_empty() {
            plain_names = Some(plain);
        }
        if !with_default.is_empty() {
            names_with_default = Some(with_default);
        }
    }

    let star_etc = parse_star_etc(p, reentry)?;

    if slash_without_default.is_none()
        && slash_with_default.is_none()
        && plain_names.is_none()
        && names_with_default.is_none()
        && star_etc.is_none()
    {
        return Ok(None);
    }

    let span = span_since(p, start)?;
    Ok(Some(ast_helpers::make_arguments(
        p.arena_mut(),
        slash_without_default,
        slash_with_default,
        plain_names,
        names_with_default,
        star_etc,
        span,
    )))
}

/// `('*' NAME? | '**' NAME) (',' NAME ('=' expression)?)* (',' '**' NAME)?`
fn parse_star_etc<S: TokenSource, A: ArenaHandle, R: ExprReentry<A>>(
    p: &mut ParserState<S, A>,
    reentry: &mut R,
) -> ParseResult<Option<StarEtc>> {
    if expect_operator(p, "**")?.is_some() {
        let Some(raw) = parse_param(p, reentry)? else {
            return Err(invalid_syntax(p, "expected a parameter name after '**'"));
        };
        return Ok(Some(StarEtc { vararg: None, kwonlyargs: Vec::new(), kwarg: Some(raw.param) }));
    }
    if expect_operator(p, "*")?.is_none() {
        return Ok(None);
    }

    let vararg = parse_param(p, reentry)?.map(|raw| raw.param);
    let mut kwonlyargs = Vec::new();
    let mut kwarg = None;
    loop {
        if expect_operator(p, ",")?.is_none() {
            break;
        }
        if expect_operator(p, "**")?.is_some() {
            let Some(raw) = parse_param(p, reentry)? else {
                return Err(invalid_syntax(p, "expected a parameter name after '**'"));
            };
            kwarg = Some(raw.param);
            break;
        }
        match parse_param(p, reentry)? {
            Some(raw) => kwonlyargs.push((raw.param, raw.default)),
            None => break,
        }
    }

    Ok(Some(StarEtc { vararg, kwonlyargs, kwarg }))
}

/// `'from' ('.' | '...')* dotted_name? 'import' import_as_names`
///
/// Exercises [`ast_helpers::seq_count_dots`] and [`ast_helpers::make_alias`]
/// directly; the level and the imported names are folded into a single
/// [`Opaque`] node (`level`, then the module name if present, then each
/// alias) since `ImportFrom` itself has no dedicated node type here.
fn import_from_stmt<S: TokenSource, A: ArenaHandle>(p: &mut ParserState<S, A>) -> ParseResult<Option<NodeID>> {
    let mark = p.mark();
    if expect_keyword(p, "from")?.is_none() {
        return Ok(None);
    }

    let mut dots = Vec::new();
    loop {
        if expect_operator(p, "...")?.is_some() {
            dots.push(DotToken::Ellipsis);
        } else if expect_operator(p, ".")?.is_some() {
            dots.push(DotToken::Dot);
        } else {
            break;
        }
    }
    let level = ast_helpers::seq_count_dots(&dots);
    if level < 0 {
        return Err(invalid_syntax(p, "invalid relative import level"));
    }

    let peeked = p.peek()?;
    let module = if peeked.kind == TokKind::Name && peeked.text != "import" {
        dotted_name(p)?
    } else {
        None
    };

    if expect_keyword(p, "import")?.is_none() {
        return Err(invalid_syntax(p, "expected 'import'"));
    }
    let aliases = import_as_names(p)?;

    let level_span = span_since(p, mark)?;
    let level_node = Constant::new(ConstantValue::Int(i64::from(level)), NodeID::placeholder(), level_span);
    let mut children = vec![p.arena_mut().alloc_node(NodeKind::Constant, AnyNode::Constant(level_node), level_span)];
    children.extend(module);
    children.extend(aliases);

    let span = span_since(p, mark)?;
    let node = Opaque::new("ImportFrom".to_string(), children, NodeID::placeholder(), span);
    Ok(Some(p.arena_mut().alloc_node(NodeKind::Opaque, AnyNode::Opaque(node), span)))
}

/// `NAME ('.' NAME)*`, folding each additional segment in with
/// [`ast_helpers::join_names_with_dot`].
fn dotted_name<S: TokenSource, A: ArenaHandle>(p: &mut ParserState<S, A>) -> ParseResult<Option<NodeID>> {
    let Some(first) = expect_token(p, TokKind::Name)? else { return Ok(None) };
    let first_name = Name::new(first.text, ExprContext::Load, NodeID::placeholder(), first.span);
    let mut current = p.arena_mut().alloc_node(NodeKind::Name, AnyNode::Name(first_name), first.span);

    while expect_operator(p, ".")?.is_some() {
        let Some(next_tok) = expect_token(p, TokKind::Name)? else {
            return Err(invalid_syntax(p, "expected a name after '.'"));
        };
        let next_name = Name::new(next_tok.text, ExprContext::Load, NodeID::placeholder(), next_tok.span);
        let prev = match p.arena().get_node(current) {
            Some(node) => match &node.data {
                AnyNode::Name(n) => n.clone(),
                _ => return Err(invalid_syntax(p, "expected a name node")),
            },
            None => return Err(invalid_syntax(p, "stale node handle")),
        };
        current = ast_helpers::join_names_with_dot(p.arena_mut(), &prev, &next_name);
    }
    Ok(Some(current))
}

/// `NAME ('as' NAME)? (',' NAME ('as' NAME)?)*`
fn import_as_names<S: TokenSource, A: ArenaHandle>(p: &mut ParserState<S, A>) -> ParseResult<Vec<NodeID>> {
    let mut aliases = Vec::new();
    loop {
        let Some(name_tok) = expect_token(p, TokKind::Name)? else { break };
        let asname = if expect_keyword(p, "as")?.is_some() {
            let Some(as_tok) = expect_token(p, TokKind::Name)? else {
                return Err(invalid_syntax(p, "expected a name after 'as'"));
            };
            Some(as_tok.text)
        } else {
            None
        };
        aliases.push(ast_helpers::make_alias(p.arena_mut(), name_tok.text, asname, name_tok.span));
        if expect_operator(p, ",")?.is_none() {
            break;
        }
    }
    if aliases.is_empty() {
        return Err(invalid_syntax(p, "expected at least one imported name"));
    }
    Ok(aliases)
}

/// `sum`
pub fn expression<S: TokenSource, A: ArenaHandle, R: ExprReentry<A>>(
    p: &mut ParserState<S, A>,
    reentry: &mut R,
) -> ParseResult<Option<NodeID>> {
    sum(p, reentry)
}

/// `term (('+' | '-') term)*`, left-associative.
fn sum<S: TokenSource, A: ArenaHandle, R: ExprReentry<A>>(
    p: &mut ParserState<S, A>,
    reentry: &mut R,
) -> ParseResult<Option<NodeID>> {
    let mark = p.mark();
    let Some(mut left) = term(p, reentry)? else { return Ok(None) };
    loop {
        let op = if expect_operator(p, "+")?.is_some() {
            "+"
        } else if expect_operator(p, "-")?.is_some() {
            "-"
        } else {
            break;
        };
        let Some(right) = term(p, reentry)? else {
            return Err(invalid_syntax(p, "expected an operand"));
        };
        let span = span_since(p, mark)?;
        let node = Opaque::new(format!("BinOp:{op}"), vec![left, right], NodeID::placeholder(), span);
        left = p.arena_mut().alloc_node(NodeKind::Opaque, AnyNode::Opaque(node), span);
    }
    Ok(Some(left))
}

/// `factor (('*' | '/') factor)*`, left-associative.
fn term<S: TokenSource, A: ArenaHandle, R: ExprReentry<A>>(
    p: &mut ParserState<S, A>,
    reentry: &mut R,
) -> ParseResult<Option<NodeID>> {
    let mark = p.mark();
    let Some(mut left) = factor(p, reentry)? else { return Ok(None) };
    loop {
        let op = if expect_operator(p, "*")?.is_some() {
            "*"
        } else if expect_operator(p, "/")?.is_some() {
            "/"
        } else {
            break;
        };
        let Some(right) = factor(p, reentry)? else {
            return Err(invalid_syntax(p, "expected an operand"));
        };
        let span = span_since(p, mark)?;
        let node = Opaque::new(format!("BinOp:{op}"), vec![left, right], NodeID::placeholder(), span);
        left = p.arena_mut().alloc_node(NodeKind::Opaque, AnyNode::Opaque(node), span);
    }
    Ok(Some(left))
}

fn factor<S: TokenSource, A: ArenaHandle, R: ExprReentry<A>>(
    p: &mut ParserState<S, A>,
    reentry: &mut R,
) -> ParseResult<Option<NodeID>> {
    atom(p, reentry)
}

/// `NAME | NUMBER | STRING+ | '(' ... ')' | '[' ... ']'`
///
/// Adjacent `STRING` tokens (plain, raw, bytes, or f-mode in any mix)
/// concatenate per `ast_helpers::concatenate_strings`.
fn atom<S: TokenSource, A: ArenaHandle, R: ExprReentry<A>>(
    p: &mut ParserState<S, A>,
    reentry: &mut R,
) -> ParseResult<Option<NodeID>> {
    let mark = p.mark();

    if let Some(tok) = expect_token(p, TokKind::Name)? {
        let name = Name::new(tok.text, ExprContext::Load, NodeID::placeholder(), tok.span);
        return Ok(Some(p.arena_mut().alloc_node(NodeKind::Name, AnyNode::Name(name), tok.span)));
    }

    if let Some(tok) = expect_token(p, TokKind::Number)? {
        let value = parse_number(&tok.text);
        let constant = Constant::new(value, NodeID::placeholder(), tok.span);
        return Ok(Some(p.arena_mut().alloc_node(NodeKind::Constant, AnyNode::Constant(constant), tok.span)));
    }

    if let Some(tok) = expect_token(p, TokKind::String)? {
        let mut parts = vec![string_literal(p, reentry, &tok)?];
        while let Some(tok) = expect_token(p, TokKind::String)? {
            parts.push(string_literal(p, reentry, &tok)?);
        }
        let filename = p.filename().to_string();
        return ast_helpers::concatenate_strings(p.arena_mut(), parts, &filename).map(Some);
    }

    if expect_operator(p, "(")?.is_some() {
        return paren_or_tuple(p, reentry, mark);
    }

    if expect_operator(p, "[")?.is_some() {
        return list_display(p, reentry, mark);
    }

    Ok(None)
}

/// A minimal literal-number reader: not part of `pegen_parser`'s own
/// contract (number decoding belongs to the lexer/grammar-rule
/// collaborator per its scope), just enough for this fixture's own
/// `Constant` nodes.
fn parse_number(text: &str) -> ConstantValue {
    let cleaned: String = text.chars().filter(|c| *c != '_').collect();
    let lower = cleaned.to_ascii_lowercase();
    if let Some(hex) = lower.strip_prefix("0x") {
        return ConstantValue::Int(i64::from_str_radix(hex, 16).unwrap_or(0));
    }
    if let Some(bin) = lower.strip_prefix("0b") {
        return ConstantValue::Int(i64::from_str_radix(bin, 2).unwrap_or(0));
    }
    if let Some(oct) = lower.strip_prefix("0o") {
        return ConstantValue::Int(i64::from_str_radix(oct, 8).unwrap_or(0));
    }
    if cleaned.contains('.') || lower.contains('e') {
        return ConstantValue::Float(cleaned.parse().unwrap_or(0.0));
    }
    ConstantValue::Int(cleaned.parse().unwrap_or(0))
}

/// Decodes a `STRING` token, routing f-mode literals through
/// [`decode_fstring`] (re-entering `expression` for each interpolation via
/// `reentry`) and everything else through [`decode_literal_body`].
fn string_literal<S: TokenSource, A: ArenaHandle, R: ExprReentry<A>>(
    p: &mut ParserState<S, A>,
    reentry: &mut R,
    tok: &Token,
) -> ParseResult<NodeID> {
    let filename = p.filename().to_string();
    let parts = split_string_token(tok, &filename)?;
    let config = p.config();

    if parts.f_mode {
        return decode_fstring(p.arena_mut(), reentry, &parts, tok, config, &filename);
    }

    let decoded = decode_literal_body(&parts, tok, config, &filename)?;
    let value = match decoded {
        DecodedLiteral::Text(s) => ConstantValue::Str(s),
        DecodedLiteral::Bytes(b) => ConstantValue::Bytes(b),
    };
    let kind = parts.u_kind.then(|| "u".to_string());
    let constant = Constant::with_kind(value, kind, NodeID::placeholder(), tok.span);
    Ok(p.arena_mut().alloc_node(NodeKind::Constant, AnyNode::Constant(constant), tok.span))
}

/// `'(' ')' | '(' expression (',' expression)* ','? ')'`
///
/// A single element with no trailing comma unwraps to that element
/// itself rather than a one-element `Tuple` — the same distinction a
/// parenthesized expression and a one-element tuple display make in the
/// reference grammar.
fn paren_or_tuple<S: TokenSource, A: ArenaHandle, R: ExprReentry<A>>(
    p: &mut ParserState<S, A>,
    reentry: &mut R,
    start_mark: usize,
) -> ParseResult<Option<NodeID>> {
    if expect_operator(p, ")")?.is_some() {
        let span = span_since(p, start_mark)?;
        let tuple = Tuple::new(Vec::new(), ExprContext::Load, NodeID::placeholder(), span);
        return Ok(Some(p.arena_mut().alloc_node(NodeKind::Tuple, AnyNode::Tuple(tuple), span)));
    }

    let mut elements = Vec::new();
    let mut had_comma = false;
    loop {
        let Some(item) = expression(p, reentry)? else {
            return Err(invalid_syntax(p, "expected an expression"));
        };
        elements.push(item);
        if expect_operator(p, ",")?.is_some() {
            had_comma = true;
            let peeked = p.peek()?;
            if peeked.kind == TokKind::Op && peeked.text == ")" {
                break;
            }
            continue;
        }
        break;
    }
    if expect_operator(p, ")")?.is_none() {
        return Err(invalid_syntax(p, "expected ')'"));
    }

    let span = span_since(p, start_mark)?;
    if elements.len() == 1 && !had_comma {
        return Ok(Some(elements[0]));
    }
    let tuple = Tuple::new(elements, ExprContext::Load, NodeID::placeholder(), span);
    Ok(Some(p.arena_mut().alloc_node(NodeKind::Tuple, AnyNode::Tuple(tuple), span)))
}

/// `'[' (expression (',' expression)* ','?)? ']'`
fn list_display<S: TokenSource, A: ArenaHandle, R: ExprReentry<A>>(
    p: &mut ParserState<S, A>,
    reentry: &mut R,
    start_mark: usize,
) -> ParseResult<Option<NodeID>> {
    let mut elements = Vec::new();
    if expect_operator(p, "]")?.is_none() {
        loop {
            let Some(item) = expression(p, reentry)? else {
                return Err(invalid_syntax(p, "expected an expression"));
            };
            elements.push(item);
            if expect_operator(p, ",")?.is_some() {
                let peeked = p.peek()?;
                if peeked.kind == TokKind::Op && peeked.text == "]" {
                    break;
                }
                continue;
            }
            break;
        }
        if expect_operator(p, "]")?.is_none() {
            return Err(invalid_syntax(p, "expected ']'"));
        }
    }
    let span = span_since(p, start_mark)?;
    let list = List::new(elements, ExprContext::Load, NodeID::placeholder(), span);
    Ok(Some(p.arena_mut().alloc_node(NodeKind::List, AnyNode::List(list), span)))
}
