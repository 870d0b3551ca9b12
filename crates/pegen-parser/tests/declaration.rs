//! Function-definition parsing, exercising every parameter bucket
//! [`ast_helpers::make_arguments`](pegen_parser::ast_helpers::make_arguments)
//! assembles: positional-only, regular positional (with and without
//! defaults), `*args`, keyword-only (with and without defaults), and
//! `**kwargs`.

use pegen_ast::node::AnyNode;
use pegen_demos::parse_module;

#[test]
fn full_parameter_kinds_land_in_the_right_buckets() {
    let src = "def f(a, b=1, /, c, d=2, *args, e, f=3, **kw): pass\n";
    let (arena, module) = parse_module(src, "<test>").expect("parse failed");
    let body = &arena.get_node(module).unwrap().data.as_module().unwrap().body;
    assert_eq!(body.len(), 1);

    let def = arena.get_node(body[0]).unwrap().data.as_function_def().unwrap();
    assert_eq!(def.name, "f");

    let args = arena.get_node(def.args).unwrap().data.as_arguments().unwrap();

    let names = |params: &[pegen_ast::node::Param]| -> Vec<&str> {
        params.iter().map(|p| p.name.as_str()).collect()
    };

    assert_eq!(names(&args.posonlyargs), vec!["a", "b"]);
    assert_eq!(names(&args.args), vec!["c", "d"]);
    assert_eq!(args.defaults.len(), 2, "one default per posonly/posarg carrying one");

    assert_eq!(args.vararg.as_ref().map(|p| p.name.as_str()), Some("args"));

    assert_eq!(names(&args.kwonlyargs), vec!["e", "f"]);
    assert_eq!(args.kw_defaults.len(), 2);
    assert!(args.kw_defaults[0].is_none());
    assert!(args.kw_defaults[1].is_some());

    assert_eq!(args.kwarg.as_ref().map(|p| p.name.as_str()), Some("kw"));

    // The body is the single `pass` statement.
    assert_eq!(def.body.len(), 1);
    let AnyNode::Opaque(pass) = &arena.get_node(def.body[0]).unwrap().data else {
        panic!("expected Opaque(Pass)")
    };
    assert_eq!(pass.tag, "Pass");
}

#[test]
fn function_with_no_parameters_gets_empty_arguments() {
    let (arena, module) = parse_module("def f(): pass\n", "<test>").expect("parse failed");
    let body = &arena.get_node(module).unwrap().data.as_module().unwrap().body;
    let def = arena.get_node(body[0]).unwrap().data.as_function_def().unwrap();
    let args = arena.get_node(def.args).unwrap().data.as_arguments().unwrap();

    assert!(args.posonlyargs.is_empty());
    assert!(args.args.is_empty());
    assert!(args.kwonlyargs.is_empty());
    assert!(args.vararg.is_none());
    assert!(args.kwarg.is_none());
}

#[test]
fn parameter_annotations_are_attached() {
    let (arena, module) = parse_module("def f(a: int, b: str = x): pass\n", "<test>").expect("parse failed");
    let body = &arena.get_node(module).unwrap().data.as_module().unwrap().body;
    let def = arena.get_node(body[0]).unwrap().data.as_function_def().unwrap();
    let args = arena.get_node(def.args).unwrap().data.as_arguments().unwrap();

    assert_eq!(args.args.len(), 2);
    let a_annotation = args.args[0].annotation.expect("a should carry an annotation");
    assert_eq!(arena.get_node(a_annotation).unwrap().data.as_name().unwrap().value, "int");
    let b_annotation = args.args[1].annotation.expect("b should carry an annotation");
    assert_eq!(arena.get_node(b_annotation).unwrap().data.as_name().unwrap().value, "str");
}
