//! Property tests over the AST-construction helpers' algebraic
//! invariants, as opposed to the example-based unit tests alongside the
//! helpers themselves.

use pegen_ast::ast::Arena;
use pegen_ast::node::{AnyNode, ExprContext, Name, NodeID, NodeKind};
use pegen_parser::ast_helpers::{seq_count_dots, set_expr_context, DotToken};
use pegen_source::types::{FileID, Position, SourceSpan};
use proptest::prelude::*;

fn dummy_span() -> pegen_source::types::Span {
    let pos = Position::new(1, 1, 0);
    SourceSpan::new(pos, pos, FileID::new(1)).into()
}

fn dot_or_ellipsis() -> impl Strategy<Value = DotToken> {
    prop_oneof![Just(DotToken::Dot), Just(DotToken::Ellipsis)]
}

fn ctx() -> impl Strategy<Value = ExprContext> {
    prop_oneof![Just(ExprContext::Load), Just(ExprContext::Store), Just(ExprContext::Del)]
}

proptest! {
    /// `seq_count_dots` weighs a `.` as 1 and a `...` as 3 with no
    /// interaction between tokens, so splitting a run anywhere and
    /// summing the two halves must equal counting the whole run at once
    /// — as long as neither half contains an `Other` token, which short-
    /// circuits to -1 and breaks additivity by design.
    #[test]
    fn seq_count_dots_is_additive_over_concatenation(
        left in prop::collection::vec(dot_or_ellipsis(), 0..8),
        right in prop::collection::vec(dot_or_ellipsis(), 0..8),
    ) {
        let mut combined = left.clone();
        combined.extend(right.clone());
        prop_assert_eq!(
            seq_count_dots(&combined),
            seq_count_dots(&left) + seq_count_dots(&right)
        );
    }

    /// Any single `Other` token anywhere in the run makes the whole count
    /// -1, regardless of how many dots/ellipses surround it.
    #[test]
    fn seq_count_dots_short_circuits_on_any_other_token(
        prefix in prop::collection::vec(dot_or_ellipsis(), 0..5),
        suffix in prop::collection::vec(dot_or_ellipsis(), 0..5),
    ) {
        let mut tokens = prefix;
        tokens.push(DotToken::Other);
        tokens.extend(suffix);
        prop_assert_eq!(seq_count_dots(&tokens), -1);
    }

    /// `set_expr_context` always leaves the node in whatever context was
    /// requested last, no matter how many times it's applied or what the
    /// node started as — it structurally replaces, it never merges.
    #[test]
    fn set_expr_context_on_a_name_always_ends_in_the_last_requested_context(
        first in ctx(), second in ctx(),
    ) {
        let mut arena = Arena::new();
        let name = Name::new("x".to_string(), ExprContext::Load, NodeID::placeholder(), dummy_span());
        let id = arena.alloc_node(NodeKind::Name, AnyNode::Name(name), dummy_span());

        set_expr_context(&mut arena, id, first);
        let returned = set_expr_context(&mut arena, id, second);

        prop_assert_eq!(returned, id, "set_expr_context mutates in place and returns the same id");
        let AnyNode::Name(n) = &arena.get_node(id).unwrap().data else {
            unreachable!("still a Name node")
        };
        prop_assert_eq!(n.ctx, second);
    }
}
