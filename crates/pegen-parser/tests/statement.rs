//! Annotated-assignment parsing, including the target-shape rejection
//! [`ast_helpers::construct_assign_target`](pegen_parser::ast_helpers::construct_assign_target)
//! performs.

use pegen_ast::node::{AnyNode, ConstantValue, ExprContext};
use pegen_parser::diagnostics::SyntaxErrorKind;
use pegen_demos::parse_module;

#[test]
fn annotated_assignment_with_a_plain_name_target() {
    let (arena, module) = parse_module("x: int = 1\n", "<test>").expect("parse failed");
    let body = &arena.get_node(module).unwrap().data.as_module().unwrap().body;
    assert_eq!(body.len(), 1);

    let AnyNode::Opaque(ann) = &arena.get_node(body[0]).unwrap().data else {
        panic!("expected Opaque(AnnAssign)")
    };
    assert_eq!(ann.tag, "AnnAssign");
    assert_eq!(ann.children.len(), 3);

    let target = arena.get_node(ann.children[0]).unwrap().data.as_name().unwrap();
    assert_eq!(target.value, "x");
    assert_eq!(target.ctx, ExprContext::Store);

    let annotation = arena.get_node(ann.children[1]).unwrap().data.as_name().unwrap();
    assert_eq!(annotation.value, "int");

    let value = arena.get_node(ann.children[2]).unwrap().data.as_constant().unwrap();
    assert_eq!(value.value, ConstantValue::Int(1));
}

#[test]
fn annotated_assignment_without_a_value_omits_the_value_child() {
    let (arena, module) = parse_module("x: int\n", "<test>").expect("parse failed");
    let body = &arena.get_node(module).unwrap().data.as_module().unwrap().body;

    let AnyNode::Opaque(ann) = &arena.get_node(body[0]).unwrap().data else {
        panic!("expected Opaque(AnnAssignNoValue)")
    };
    assert_eq!(ann.tag, "AnnAssignNoValue");
    assert_eq!(ann.children.len(), 2);
}

/// `[a, b]: int = 1` adapts the triggering input for this error: since
/// `construct_assign_target` validates the *target*, not the annotation,
/// a target parsed as a list is what's needed to exercise the rejection
/// (see DESIGN.md for why `x: [a, b] = 1`, with a bare-name target and a
/// list-shaped annotation, cannot reach this path).
#[test]
fn annotated_assignment_rejects_a_list_target() {
    let err = parse_module("[a, b]: int = 1\n", "<test>").unwrap_err();
    assert_eq!(err.as_syntax().map(|e| e.kind), Some(SyntaxErrorKind::AnnotatedListOrMultiTuple));
}

#[test]
fn annotated_assignment_unwraps_a_single_element_tuple_target() {
    let (arena, module) = parse_module("(x,): int = 1\n", "<test>").expect("parse failed");
    let body = &arena.get_node(module).unwrap().data.as_module().unwrap().body;

    let AnyNode::Opaque(ann) = &arena.get_node(body[0]).unwrap().data else {
        panic!("expected Opaque(AnnAssign)")
    };
    let target = arena.get_node(ann.children[0]).unwrap().data.as_name().unwrap();
    assert_eq!(target.value, "x");
}

#[test]
fn annotated_assignment_rejects_a_multi_element_tuple_target() {
    let err = parse_module("(x, y): int = 1\n", "<test>").unwrap_err();
    assert_eq!(err.as_syntax().map(|e| e.kind), Some(SyntaxErrorKind::AnnotatedListOrMultiTuple));
}

#[test]
fn plain_assignment_sets_store_context_on_the_target() {
    let (arena, module) = parse_module("x = 1\n", "<test>").expect("parse failed");
    let body = &arena.get_node(module).unwrap().data.as_module().unwrap().body;

    let AnyNode::Opaque(assign) = &arena.get_node(body[0]).unwrap().data else {
        panic!("expected Opaque(Assign)")
    };
    let target = arena.get_node(assign.children[0]).unwrap().data.as_name().unwrap();
    assert_eq!(target.ctx, ExprContext::Store);
}
