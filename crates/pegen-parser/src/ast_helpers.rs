//! AST construction helpers: the glue between raw rule output and the
//! canonical node shapes grammar rules are expected to hand back.
//!
//! Grounded in `pegen.c`'s block of small `Parser`-taking constructors
//! (`singleton_seq`, `_join_seqs`, `join_names_with_dot`, `seq_count_dots`,
//! `set_expr_context`/`_set_name_context`/..., `construct_assign_target`,
//! `make_arguments`/`empty_arguments`, `function_def_decorators`/
//! `class_def_decorators`, `keyword_or_starred` and its partitioning
//! helpers). Every sequence these build is a plain `Vec`; the reference's
//! `(void*)1` sentinel for "no sequence" is an `Option<Vec<_>>` here
//! instead, per the design notes.

use pegen_ast::node::{
    Alias,
    AnyNode,
    Arguments,
    Attribute,
    ClassDef,
    Constant,
    ConstantValue,
    ExprContext,
    FunctionDef,
    JoinedStr,
    List,
    Name,
    NodeID,
    NodeKind,
    Param,
    Starred,
    Tuple,
};
use pegen_source::types::Span;

use crate::diagnostics::{ParseError, SyntaxError, SyntaxErrorKind};
use crate::engine::arena::ArenaHandle;

/// Wraps a single item as a one-element sequence.
///
/// `pegen.c`'s `singleton_seq`.
#[must_use]
pub fn singleton_seq<T>(item: T) -> Vec<T> { vec![item] }

/// Prepends `item` to `seq`, treating `None` as an empty sequence.
///
/// `pegen.c`'s `seq_insert_in_front`, generalized over the sentinel: the
/// reference treats a head pointer value of `1` as "no sequence yet" (used
/// when the dummy-name placeholder seeds a fresh `asdl_seq`); here that's
/// simply `None`.
#[must_use]
pub fn seq_insert_in_front<T>(item: T, seq: Option<Vec<T>>) -> Vec<T> {
    let mut out = Vec::with_capacity(seq.as_ref().map_or(1, |s| s.len() + 1));
    out.push(item);
    if let Some(rest) = seq {
        out.extend(rest);
    }
    out
}

/// Flattens a sequence of sequences into one, skipping any inner sequence
/// that is `None` (the rewrite's stand-in for the reference's sentinel
/// head value).
///
/// `pegen.c`'s `_join_seqs` / `seq_flatten`.
#[must_use]
pub fn seq_flatten<T>(seqs: Vec<Option<Vec<T>>>) -> Vec<T> {
    seqs.into_iter().flatten().flatten().collect()
}

/// Builds a new `Name` whose identifier is `a.value + "." + b.value`
/// (e.g. the dotted module path segments of a `from a.b import ...`),
/// spanning from `a`'s start through `b`'s end.
///
/// `pegen.c`'s `join_names_with_dot`.
pub fn join_names_with_dot<A: ArenaHandle>(
    arena: &mut A,
    a: &Name,
    b: &Name,
) -> NodeID {
    let joined = format!("{}.{}", a.value, b.value);
    let span = Span { start: a.span.start, end: b.span.end };
    let name = Name::new(joined, ExprContext::Load, NodeID::placeholder(), span);
    arena.alloc_node(NodeKind::Name, AnyNode::Name(name), span)
}

/// A single token's kind as it matters to dot-counting: only whether it is
/// a `...` (ellipsis), a lone `.` (dot), or anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DotToken {
    Ellipsis,
    Dot,
    Other,
}

/// Counts the total number of leading dots a `from ...import` clause's
/// level tokens represent: an ellipsis token counts as 3 dots, a plain
/// dot as 1. Any other token kind makes the whole count invalid (`-1`),
/// matching the reference's all-or-nothing semantics.
///
/// `pegen.c`'s `seq_count_dots` (not present verbatim in this file's
/// excerpt of `pegen.c` but named directly in the import-clause grammar
/// rules it supports).
#[must_use]
pub fn seq_count_dots(tokens: &[DotToken]) -> i32 {
    let mut total = 0i32;
    for tok in tokens {
        match tok {
            DotToken::Ellipsis => total += 3,
            DotToken::Dot => total += 1,
            DotToken::Other => return -1,
        }
    }
    total
}

/// Structurally rewrites an expression's load/store/delete context.
///
/// Recognized shapes: `Name`, `Tuple`, `List` (recursing element-wise),
/// `Subscript`, `Attribute`, `Starred` (recursing into its value); every
/// other node kind passes through unchanged. Mutates in place, so
/// applying it twice with the same final context is equivalent to
/// applying it once (§8's idempotent-replacement property) — the second
/// call simply overwrites the same field again.
///
/// `pegen.c`'s `set_expr_context` / `_set_name_context` /
/// `_set_tuple_context` / `_set_list_context` / `_set_subscript_context` /
/// `_set_attribute_context` / `_set_starred_context`.
pub fn set_expr_context<A: ArenaHandle>(arena: &mut A, expr: NodeID, ctx: ExprContext) -> NodeID {
    let Some(node) = arena.get_node_mut(expr) else { return expr };

    match &mut node.data {
        AnyNode::Name(n) => n.ctx = ctx,
        AnyNode::Tuple(t) => {
            t.ctx = ctx;
            let elements = t.elements.clone();
            for element in elements {
                set_expr_context(arena, element, ctx);
            }
        }
        AnyNode::List(l) => {
            l.ctx = ctx;
            let elements = l.elements.clone();
            for element in elements {
                set_expr_context(arena, element, ctx);
            }
        }
        AnyNode::Subscript(s) => s.ctx = ctx,
        AnyNode::Attribute(a) => a.ctx = ctx,
        AnyNode::Starred(s) => {
            s.ctx = ctx;
            let value = s.value;
            set_expr_context(arena, value, ctx);
        }
        _ => {}
    }

    expr
}

/// Validates and normalizes an annotated-assignment target.
///
/// A `List` target is always rejected. A `Tuple` target is rejected
/// unless it has exactly one element, in which case the lone element is
/// unwrapped and returned in its place. Any other shape passes through
/// unchanged.
///
/// `pegen.c`'s `CHECK(construct_assign_target)` call sites around
/// annotated assignment (the reference inlines this check; the rewrite
/// names it per §4.E).
///
/// ## Errors
///
/// Returns [`SyntaxErrorKind::AnnotatedListOrMultiTuple`] for a list
/// target or a tuple target with zero or more than one element.
pub fn construct_assign_target<A: ArenaHandle>(
    arena: &A,
    target: NodeID,
    filename: &str,
) -> Result<NodeID, ParseError> {
    let Some(node) = arena.get_node(target) else { return Ok(target) };

    match &node.data {
        AnyNode::List(l) => Err(annotated_target_error(filename, l.span)),
        AnyNode::Tuple(t) if t.elements.len() == 1 => Ok(t.elements[0]),
        AnyNode::Tuple(t) => Err(annotated_target_error(filename, t.span)),
        _ => Ok(target),
    }
}

fn annotated_target_error(filename: &str, span: Span) -> ParseError {
    SyntaxError::new(SyntaxErrorKind::AnnotatedListOrMultiTuple, filename, span.start, 1, None).into()
}

/// The positional-only parameters collected before a bare `/` marker,
/// split into those with no default and those paired with one.
#[derive(Debug, Default, Clone)]
pub struct SlashWithDefault {
    pub plain_names: Vec<Param>,
    pub names_with_defaults: Vec<(Param, NodeID)>,
}

/// Whatever follows the regular positional parameters: a `*args` (or a
/// bare `*`), the keyword-only parameters that follow it, and an
/// optional `**kwargs`.
#[derive(Debug, Default, Clone)]
pub struct StarEtc {
    pub vararg: Option<Param>,
    pub kwonlyargs: Vec<(Param, Option<NodeID>)>,
    pub kwarg: Option<Param>,
}

fn names_of(pairs: &[(Param, NodeID)]) -> Vec<Param> {
    pairs.iter().map(|(p, _)| p.clone()).collect()
}

fn defaults_of(pairs: &[(Param, NodeID)]) -> Vec<NodeID> { pairs.iter().map(|(_, d)| *d).collect() }

/// Assembles the canonical six-bucket `Arguments` record out of the raw
/// pieces a parameter-list grammar rule collects along the way.
///
/// Mirrors `make_arguments`'s case table exactly: `posonlyargs` comes from
/// whichever of `slash_without_default`/`slash_with_default` is present
/// (or is empty if neither is); `posargs`/`posdefaults` combine
/// `plain_names`/`names_with_default` (and, when a `/`-with-defaults group
/// preceded them, fold its own defaults in ahead of the rest);
/// `vararg`/`kwonlyargs`/`kwdefaults`/`kwarg` come straight from
/// `star_etc`.
///
/// `pegen.c`'s `make_arguments`.
#[allow(clippy::too_many_arguments)]
#[must_use]
pub fn make_arguments<A: ArenaHandle>(
    arena: &mut A,
    slash_without_default: Option<Vec<Param>>,
    slash_with_default: Option<SlashWithDefault>,
    plain_names: Option<Vec<Param>>,
    names_with_default: Option<Vec<(Param, NodeID)>>,
    star_etc: Option<StarEtc>,
    span: Span,
) -> NodeID {
    let posonlyargs = if let Some(slash) = &slash_without_default {
        slash.clone()
    } else if let Some(swd) = &slash_with_default {
        let mut out = swd.plain_names.clone();
        out.extend(names_of(&swd.names_with_defaults));
        out
    } else {
        Vec::new()
    };

    let posargs = match (&plain_names, &names_with_default) {
        (Some(plain), Some(with_default)) => {
            let mut out = plain.clone();
            out.extend(names_of(with_default));
            out
        }
        (None, Some(with_default)) => names_of(with_default),
        (Some(plain), None) => plain.clone(),
        (None, None) => Vec::new(),
    };

    let posdefaults = match (&slash_with_default, &names_with_default) {
        (Some(swd), Some(with_default)) => {
            let mut out = defaults_of(&swd.names_with_defaults);
            out.extend(defaults_of(with_default));
            out
        }
        (None, Some(with_default)) => defaults_of(with_default),
        (Some(swd), None) => defaults_of(&swd.names_with_defaults),
        (None, None) => Vec::new(),
    };

    let (vararg, kwonlyargs, kw_defaults, kwarg) = match star_etc {
        Some(se) => {
            let kwonlyargs = se.kwonlyargs.iter().map(|(p, _)| p.clone()).collect();
            let kw_defaults = se.kwonlyargs.into_iter().map(|(_, d)| d).collect();
            (se.vararg, kwonlyargs, kw_defaults, se.kwarg)
        }
        None => (None, Vec::new(), Vec::new(), None),
    };

    let arguments = Arguments::new(
        posonlyargs,
        posargs,
        vararg,
        kwonlyargs,
        kw_defaults,
        kwarg,
        posdefaults,
        NodeID::placeholder(),
        span,
    );
    arena.alloc_node(NodeKind::Arguments, AnyNode::Arguments(arguments), span)
}

/// The `Arguments` record for a parameter-less `def`/`lambda`.
///
/// `pegen.c`'s `empty_arguments`.
#[must_use]
pub fn empty_arguments<A: ArenaHandle>(arena: &mut A, span: Span) -> NodeID {
    let arguments = Arguments::new(
        Vec::new(),
        Vec::new(),
        None,
        Vec::new(),
        Vec::new(),
        None,
        Vec::new(),
        NodeID::placeholder(),
        span,
    );
    arena.alloc_node(NodeKind::Arguments, AnyNode::Arguments(arguments), span)
}

/// Reattaches a decorator list to an already-built `FunctionDef` node,
/// producing a structurally equal node with `decorator_list` replaced.
///
/// `pegen.c`'s `function_def_decorators`.
#[must_use]
pub fn function_def_decorators<A: ArenaHandle>(
    arena: &mut A,
    decorators: Vec<NodeID>,
    function_def: NodeID,
) -> NodeID {
    let Some(node) = arena.get_node(function_def) else { return function_def };
    let AnyNode::FunctionDef(f) = &node.data else { return function_def };
    let span = f.span;
    let rebuilt = FunctionDef::new(
        f.name.clone(),
        f.args,
        f.body.clone(),
        decorators,
        f.returns,
        f.is_async,
        NodeID::placeholder(),
        span,
    );
    arena.alloc_node(NodeKind::FunctionDef, AnyNode::FunctionDef(rebuilt), span)
}

/// Reattaches a decorator list to an already-built `ClassDef` node.
///
/// `pegen.c`'s `class_def_decorators`.
#[must_use]
pub fn class_def_decorators<A: ArenaHandle>(
    arena: &mut A,
    decorators: Vec<NodeID>,
    class_def: NodeID,
) -> NodeID {
    let Some(node) = arena.get_node(class_def) else { return class_def };
    let AnyNode::ClassDef(c) = &node.data else { return class_def };
    let span = c.span;
    let rebuilt = ClassDef::new(
        c.name.clone(),
        c.bases.clone(),
        c.keywords.clone(),
        c.body.clone(),
        decorators,
        NodeID::placeholder(),
        span,
    );
    arena.alloc_node(NodeKind::ClassDef, AnyNode::ClassDef(rebuilt), span)
}

/// One element of a call's argument list: either a plain/starred
/// expression or a keyword argument.
///
/// `pegen.c`'s `KeywordOrStarred`.
#[derive(Debug, Clone, Copy)]
pub enum KeywordOrStarred {
    Element(NodeID),
    Keyword(NodeID),
}

/// Splits a mixed call-argument sequence into its starred/plain
/// expressions and its keyword arguments, each preserving relative
/// order. `None` in either slot means "no such elements", matching the
/// reference's use of a null sequence for "zero of this kind".
///
/// `pegen.c`'s `seq_extract_starred_exprs` / `seq_delete_starred_exprs`.
#[must_use]
pub fn partition_keywords_and_starred(
    items: &[KeywordOrStarred],
) -> (Option<Vec<NodeID>>, Option<Vec<NodeID>>) {
    let mut starred = Vec::new();
    let mut keywords = Vec::new();

    for item in items {
        match item {
            KeywordOrStarred::Element(id) => starred.push(*id),
            KeywordOrStarred::Keyword(id) => keywords.push(*id),
        }
    }

    (
        if starred.is_empty() { None } else { Some(starred) },
        if keywords.is_empty() { None } else { Some(keywords) },
    )
}

/// Builds a `Name`/`Tuple`/`List`/`Subscript`/`Attribute`/`Starred`
/// dispatch-friendly alias set, re-exported for grammar rules that need
/// to construct an `import ... as ...` alias.
///
/// `pegen.c` doesn't have a dedicated helper for this (aliases are built
/// directly at each `import`-statement call site); kept here since it's
/// the same shape of "small AST-node constructor" as its neighbors.
#[must_use]
pub fn make_alias<A: ArenaHandle>(
    arena: &mut A,
    name: String,
    asname: Option<String>,
    span: Span,
) -> NodeID {
    let alias = Alias::new(name, asname, NodeID::placeholder(), span);
    arena.alloc_node(NodeKind::Alias, AnyNode::Alias(alias), span)
}

/// Merges a non-empty run of adjacent string-literal nodes (each already
/// decoded by [`crate::strings::decode_literal_body`] or
/// [`crate::fstring::decode_fstring`] into a `Constant` or `JoinedStr`)
/// into the single node the grammar's concatenation rule hands back.
///
/// A run with no `JoinedStr` member merges byte-for-byte into one
/// `Constant`: text literals concatenate their decoded `String`s (carrying
/// forward a `"u"` kind tag if any member had one); bytes literals
/// concatenate their decoded bytes. Mixing a bytes literal into a run of
/// text literals (or vice versa) is a syntax error. A run with at least
/// one `JoinedStr` member (i.e. at least one f-string) flattens every
/// member's values into a single `JoinedStr`, widening a plain `Constant`
/// member back into a one-element value list.
///
/// `pegen.c`'s `concatenate_strings` (`Parser/string_parser.c` in later
/// CPython releases).
///
/// ## Panics
///
/// Panics if `parts` is empty, or if any `NodeID` it contains does not
/// resolve to a `Constant` or `JoinedStr` node — both indicate a caller
/// bug (the grammar rule gathering string tokens should never pass
/// anything else through).
///
/// ## Errors
///
/// Returns [`SyntaxErrorKind::InvalidSyntax`] if the run mixes a bytes
/// literal with a text literal or an f-string.
pub fn concatenate_strings<A: ArenaHandle>(
    arena: &mut A,
    parts: Vec<NodeID>,
    filename: &str,
) -> Result<NodeID, ParseError> {
    assert!(!parts.is_empty(), "concatenate_strings requires a non-empty run of literals");
    if parts.len() == 1 {
        return Ok(parts[0]);
    }

    let has_fstring = parts.iter().any(|id| {
        matches!(arena.get_node(*id).map(|n| &n.data), Some(AnyNode::JoinedStr(_)))
    });
    let has_bytes = parts.iter().any(|id| {
        matches!(
            arena.get_node(*id).map(|n| &n.data),
            Some(AnyNode::Constant(c)) if matches!(c.value, ConstantValue::Bytes(_))
        )
    });

    if has_fstring && has_bytes {
        return Err(mixed_bytes_error(arena, &parts, filename));
    }

    let span = Span {
        start: node_span(arena, parts[0]).start,
        end: node_span(arena, *parts.last().unwrap()).end,
    };

    if has_fstring {
        let mut values = Vec::new();
        for id in &parts {
            match &arena.get_node(*id).unwrap().data {
                AnyNode::JoinedStr(j) => values.extend(j.values.clone()),
                AnyNode::Constant(_) => values.push(*id),
                _ => unreachable!("concatenate_strings given a non-literal node"),
            }
        }
        let joined = JoinedStr::new(values, NodeID::placeholder(), span);
        return Ok(arena.alloc_node(NodeKind::JoinedStr, AnyNode::JoinedStr(joined), span));
    }

    if has_bytes {
        let mut bytes = Vec::new();
        for id in &parts {
            match &arena.get_node(*id).unwrap().data {
                AnyNode::Constant(c) => match &c.value {
                    ConstantValue::Bytes(b) => bytes.extend_from_slice(b),
                    _ => return Err(mixed_bytes_error(arena, &parts, filename)),
                },
                _ => unreachable!("concatenate_strings given a non-literal node"),
            }
        }
        let constant = Constant::new(ConstantValue::Bytes(bytes), NodeID::placeholder(), span);
        return Ok(arena.alloc_node(NodeKind::Constant, AnyNode::Constant(constant), span));
    }

    let mut text = String::new();
    let mut kind = None;
    for id in &parts {
        match &arena.get_node(*id).unwrap().data {
            AnyNode::Constant(c) => {
                match &c.value {
                    ConstantValue::Str(s) => text.push_str(s),
                    _ => unreachable!("concatenate_strings given a non-string Constant"),
                }
                if c.kind.is_some() {
                    kind = c.kind.clone();
                }
            }
            _ => unreachable!("concatenate_strings given a non-literal node"),
        }
    }
    let constant = Constant::with_kind(ConstantValue::Str(text), kind, NodeID::placeholder(), span);
    Ok(arena.alloc_node(NodeKind::Constant, AnyNode::Constant(constant), span))
}

fn node_span<A: ArenaHandle>(arena: &A, id: NodeID) -> Span {
    arena.get_node(id).map_or(Span { start: 0, end: 0 }, |n| n.span)
}

fn mixed_bytes_error<A: ArenaHandle>(arena: &A, parts: &[NodeID], filename: &str) -> ParseError {
    let start = node_span(arena, parts[0]).start;
    SyntaxError::with_message(
        SyntaxErrorKind::InvalidSyntax,
        "cannot mix bytes and nonbytes literals".to_string(),
        filename.to_string(),
        start,
        1,
        None,
    )
    .into()
}

#[cfg(test)]
mod tests {
    use pegen_ast::ast::Arena;
    use pegen_ast::node::ConstantValue;
    use pegen_source::types::{FileID, Position, SourceSpan};

    use super::*;

    fn dummy_span() -> Span {
        let pos = Position::new(1, 1, 0);
        SourceSpan::new(pos, pos, FileID::new(1)).into()
    }

    fn name_node(arena: &mut Arena, value: &str, ctx: ExprContext) -> NodeID {
        let name = Name::new(value.to_string(), ctx, NodeID::placeholder(), dummy_span());
        arena.alloc_node(NodeKind::Name, AnyNode::Name(name), dummy_span())
    }

    #[test]
    fn singleton_then_insert_in_front() {
        let seq = singleton_seq(2);
        let seq = seq_insert_in_front(1, Some(seq));
        assert_eq!(seq, vec![1, 2]);
    }

    #[test]
    fn seq_flatten_skips_none_entries() {
        let flattened = seq_flatten(vec![Some(vec![1, 2]), None, Some(vec![3])]);
        assert_eq!(flattened, vec![1, 2, 3]);
    }

    #[test]
    fn dot_counting_matches_ellipsis_and_dot_weights() {
        assert_eq!(seq_count_dots(&[DotToken::Dot, DotToken::Dot, DotToken::Ellipsis]), 5);
        assert_eq!(seq_count_dots(&[DotToken::Dot, DotToken::Other]), -1);
    }

    #[test]
    fn join_names_with_dot_builds_dotted_identifier() {
        let mut arena = Arena::new();
        let a = Name::new("a".to_string(), ExprContext::Load, NodeID::placeholder(), dummy_span());
        let b = Name::new("b".to_string(), ExprContext::Load, NodeID::placeholder(), dummy_span());
        let id = join_names_with_dot(&mut arena, &a, &b);
        let node = arena.get_node(id).unwrap();
        assert_eq!(node.data.as_name().unwrap().value, "a.b");
    }

    #[test]
    fn set_expr_context_recurses_into_tuple_elements() {
        let mut arena = Arena::new();
        let x = name_node(&mut arena, "x", ExprContext::Load);
        let y = name_node(&mut arena, "y", ExprContext::Load);
        let tuple = Tuple::new(vec![x, y], ExprContext::Load, NodeID::placeholder(), dummy_span());
        let tuple_id = arena.alloc_node(NodeKind::Tuple, AnyNode::Tuple(tuple), dummy_span());

        set_expr_context(&mut arena, tuple_id, ExprContext::Store);

        assert_eq!(arena.get_node(tuple_id).unwrap().data.as_tuple().unwrap().ctx, ExprContext::Store);
        assert_eq!(arena.get_node(x).unwrap().data.as_name().unwrap().ctx, ExprContext::Store);
        assert_eq!(arena.get_node(y).unwrap().data.as_name().unwrap().ctx, ExprContext::Store);
    }

    #[test]
    fn set_expr_context_is_idempotent_replacing() {
        let mut arena = Arena::new();
        let x = name_node(&mut arena, "x", ExprContext::Load);

        set_expr_context(&mut arena, x, ExprContext::Store);
        set_expr_context(&mut arena, x, ExprContext::Del);

        assert_eq!(arena.get_node(x).unwrap().data.as_name().unwrap().ctx, ExprContext::Del);
    }

    #[test]
    fn construct_assign_target_rejects_list() {
        let mut arena = Arena::new();
        let x = name_node(&mut arena, "x", ExprContext::Store);
        let list = List::new(vec![x], ExprContext::Store, NodeID::placeholder(), dummy_span());
        let list_id = arena.alloc_node(NodeKind::List, AnyNode::List(list), dummy_span());

        let err = construct_assign_target(&arena, list_id, "<test>").unwrap_err();
        assert!(matches!(
            err.as_syntax().map(|e| e.kind),
            Some(SyntaxErrorKind::AnnotatedListOrMultiTuple)
        ));
    }

    #[test]
    fn construct_assign_target_unwraps_single_element_tuple() {
        let mut arena = Arena::new();
        let x = name_node(&mut arena, "x", ExprContext::Store);
        let tuple = Tuple::new(vec![x], ExprContext::Store, NodeID::placeholder(), dummy_span());
        let tuple_id = arena.alloc_node(NodeKind::Tuple, AnyNode::Tuple(tuple), dummy_span());

        let unwrapped = construct_assign_target(&arena, tuple_id, "<test>").unwrap();
        assert_eq!(unwrapped, x);
    }

    #[test]
    fn construct_assign_target_rejects_multi_element_tuple() {
        let mut arena = Arena::new();
        let x = name_node(&mut arena, "x", ExprContext::Store);
        let y = name_node(&mut arena, "y", ExprContext::Store);
        let tuple = Tuple::new(vec![x, y], ExprContext::Store, NodeID::placeholder(), dummy_span());
        let tuple_id = arena.alloc_node(NodeKind::Tuple, AnyNode::Tuple(tuple), dummy_span());

        assert!(construct_assign_target(&arena, tuple_id, "<test>").is_err());
    }

    #[test]
    fn make_arguments_combines_plain_and_defaulted_names() {
        let mut arena = Arena::new();
        let default_value = arena.alloc_node(
            NodeKind::Constant,
            AnyNode::Constant(pegen_ast::node::Constant::new(
                ConstantValue::Int(1),
                NodeID::placeholder(),
                dummy_span(),
            )),
            dummy_span(),
        );
        let plain = vec![Param::new("a".to_string(), None, dummy_span())];
        let with_default = vec![(Param::new("b".to_string(), None, dummy_span()), default_value)];

        let args_id =
            make_arguments(&mut arena, None, None, Some(plain), Some(with_default), None, dummy_span());
        let args = arena.get_node(args_id).unwrap().data.as_arguments().unwrap();

        assert_eq!(args.args.len(), 2);
        assert_eq!(args.args[0].name, "a");
        assert_eq!(args.args[1].name, "b");
        assert_eq!(args.defaults, vec![default_value]);
        assert!(args.posonlyargs.is_empty());
    }

    #[test]
    fn empty_arguments_has_no_parameters() {
        let mut arena = Arena::new();
        let args_id = empty_arguments(&mut arena, dummy_span());
        let args = arena.get_node(args_id).unwrap().data.as_arguments().unwrap();
        assert!(args.posonlyargs.is_empty());
        assert!(args.args.is_empty());
        assert!(args.kwonlyargs.is_empty());
        assert!(args.vararg.is_none());
        assert!(args.kwarg.is_none());
    }

    #[test]
    fn partition_keywords_and_starred_preserves_order() {
        let mut arena = Arena::new();
        let a = name_node(&mut arena, "a", ExprContext::Load);
        let b = name_node(&mut arena, "b", ExprContext::Load);
        let items =
            [KeywordOrStarred::Element(a), KeywordOrStarred::Keyword(b), KeywordOrStarred::Element(a)];

        let (starred, keywords) = partition_keywords_and_starred(&items);
        assert_eq!(starred, Some(vec![a, a]));
        assert_eq!(keywords, Some(vec![b]));
    }

    #[test]
    fn partition_keywords_and_starred_none_when_empty() {
        let (starred, keywords) = partition_keywords_and_starred(&[]);
        assert!(starred.is_none());
        assert!(keywords.is_none());
    }

    fn text_constant(arena: &mut Arena, s: &str) -> NodeID {
        let constant = Constant::new(ConstantValue::Str(s.to_string()), NodeID::placeholder(), dummy_span());
        arena.alloc_node(NodeKind::Constant, AnyNode::Constant(constant), dummy_span())
    }

    fn bytes_constant(arena: &mut Arena, b: &[u8]) -> NodeID {
        let constant = Constant::new(ConstantValue::Bytes(b.to_vec()), NodeID::placeholder(), dummy_span());
        arena.alloc_node(NodeKind::Constant, AnyNode::Constant(constant), dummy_span())
    }

    #[test]
    fn concatenate_strings_merges_adjacent_text_constants() {
        let mut arena = Arena::new();
        let a = text_constant(&mut arena, "a");
        let b = text_constant(&mut arena, "b");
        let id = concatenate_strings(&mut arena, vec![a, b], "<test>").unwrap();
        let constant = arena.get_node(id).unwrap().data.as_constant().unwrap();
        assert_eq!(constant.value, ConstantValue::Str("ab".to_string()));
    }

    #[test]
    fn concatenate_strings_rejects_mixed_bytes_and_text() {
        let mut arena = Arena::new();
        let a = bytes_constant(&mut arena, b"a");
        let b = text_constant(&mut arena, "b");
        let err = concatenate_strings(&mut arena, vec![a, b], "<test>").unwrap_err();
        assert!(matches!(err.as_syntax().map(|e| e.kind), Some(SyntaxErrorKind::InvalidSyntax)));
    }

    #[test]
    fn concatenate_strings_flattens_plain_constant_into_joined_str() {
        let mut arena = Arena::new();
        let a = text_constant(&mut arena, "a");
        let x = name_node(&mut arena, "x", ExprContext::Load);
        let fv = pegen_ast::node::FormattedValue::new(
            x,
            pegen_ast::node::Conversion::None,
            None,
            NodeID::placeholder(),
            dummy_span(),
        );
        let fv_id = arena.alloc_node(NodeKind::FormattedValue, AnyNode::FormattedValue(fv), dummy_span());
        let joined = JoinedStr::new(vec![fv_id], NodeID::placeholder(), dummy_span());
        let joined_id = arena.alloc_node(NodeKind::JoinedStr, AnyNode::JoinedStr(joined), dummy_span());

        let id = concatenate_strings(&mut arena, vec![a, joined_id], "<test>").unwrap();
        let result = arena.get_node(id).unwrap().data.as_joined_str().unwrap();
        assert_eq!(result.values.len(), 2);
        assert_eq!(result.values[0], a);
        assert_eq!(result.values[1], fv_id);
    }
}
