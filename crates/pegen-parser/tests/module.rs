//! End-to-end module-level parses, driven through the fixture grammar in
//! `pegen_demos`.

use pegen_ast::node::{AnyNode, ConstantValue, ExprContext};
use pegen_demos::parse_module;

#[test]
fn assignment_with_binary_operator_rhs() {
    let (arena, module) = parse_module("x = 1 + 2\n", "<test>").expect("parse failed");
    let body = &arena.get_node(module).unwrap().data.as_module().unwrap().body;
    assert_eq!(body.len(), 1);

    let assign = arena.get_node(body[0]).unwrap();
    let AnyNode::Opaque(assign) = &assign.data else { panic!("expected Opaque(Assign)") };
    assert_eq!(assign.tag, "Assign");
    assert_eq!(assign.children.len(), 2);

    let target = arena.get_node(assign.children[0]).unwrap().data.as_name().unwrap();
    assert_eq!(target.value, "x");
    assert_eq!(target.ctx, ExprContext::Store);

    let AnyNode::Opaque(binop) = &arena.get_node(assign.children[1]).unwrap().data else {
        panic!("expected Opaque(BinOp:+)")
    };
    assert_eq!(binop.tag, "BinOp:+");
    let left = arena.get_node(binop.children[0]).unwrap().data.as_constant().unwrap();
    let right = arena.get_node(binop.children[1]).unwrap().data.as_constant().unwrap();
    assert_eq!(left.value, ConstantValue::Int(1));
    assert_eq!(right.value, ConstantValue::Int(2));
}

#[test]
fn relative_import_with_triple_dot_and_explicit_module() {
    let (arena, module) = parse_module("from ...pkg import a\n", "<test>").expect("parse failed");
    let body = &arena.get_node(module).unwrap().data.as_module().unwrap().body;
    assert_eq!(body.len(), 1);

    let AnyNode::Opaque(import) = &arena.get_node(body[0]).unwrap().data else {
        panic!("expected Opaque(ImportFrom)")
    };
    assert_eq!(import.tag, "ImportFrom");
    // [level, module name, alias]
    assert_eq!(import.children.len(), 3);

    let level = arena.get_node(import.children[0]).unwrap().data.as_constant().unwrap();
    assert_eq!(level.value, ConstantValue::Int(3));

    let module_name = arena.get_node(import.children[1]).unwrap().data.as_name().unwrap();
    assert_eq!(module_name.value, "pkg");

    let alias = arena.get_node(import.children[2]).unwrap().data.as_alias().unwrap();
    assert_eq!(alias.name, "a");
    assert!(alias.asname.is_none());
}

#[test]
fn relative_import_with_only_dots_has_no_module_name() {
    let (arena, module) = parse_module("from ... import a\n", "<test>").expect("parse failed");
    let body = &arena.get_node(module).unwrap().data.as_module().unwrap().body;

    let AnyNode::Opaque(import) = &arena.get_node(body[0]).unwrap().data else {
        panic!("expected Opaque(ImportFrom)")
    };
    // [level, alias] — no module name segment since the next token is `import`.
    assert_eq!(import.children.len(), 2);
    let level = arena.get_node(import.children[0]).unwrap().data.as_constant().unwrap();
    assert_eq!(level.value, ConstantValue::Int(3));
}

#[test]
fn import_as_names_supports_aliasing_and_multiple_names() {
    let (arena, module) = parse_module("from pkg import a as b, c\n", "<test>").expect("parse failed");
    let body = &arena.get_node(module).unwrap().data.as_module().unwrap().body;

    let AnyNode::Opaque(import) = &arena.get_node(body[0]).unwrap().data else {
        panic!("expected Opaque(ImportFrom)")
    };
    // [level, module, alias a-as-b, alias c]
    assert_eq!(import.children.len(), 4);

    let first = arena.get_node(import.children[2]).unwrap().data.as_alias().unwrap();
    assert_eq!(first.name, "a");
    assert_eq!(first.asname.as_deref(), Some("b"));

    let second = arena.get_node(import.children[3]).unwrap().data.as_alias().unwrap();
    assert_eq!(second.name, "c");
    assert!(second.asname.is_none());
}

#[test]
fn empty_module_parses_to_an_empty_body() {
    let (arena, module) = parse_module("", "<test>").expect("parse failed");
    let body = &arena.get_node(module).unwrap().data.as_module().unwrap().body;
    assert!(body.is_empty());
}

#[test]
fn blank_lines_between_statements_are_skipped() {
    let (arena, module) = parse_module("\n\nx = 1\n\n\ny = 2\n", "<test>").expect("parse failed");
    let body = &arena.get_node(module).unwrap().data.as_module().unwrap().body;
    assert_eq!(body.len(), 2);
}
