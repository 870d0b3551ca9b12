//! Snapshot tests over parsed AST shapes.
//!
//! `render` projects a parsed tree into a small indented text form (node
//! kind plus the handful of fields relevant to shape, not raw `NodeID`s
//! or spans) so the snapshots stay readable and stable across allocator
//! internals.

use pegen_ast::ast::Arena;
use pegen_ast::node::{AnyNode, NodeID};
use pegen_demos::parse_module;

fn render(arena: &Arena, id: NodeID) -> String {
    let mut out = String::new();
    render_into(arena, id, 0, &mut out);
    out
}

fn render_into(arena: &Arena, id: NodeID, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    let Some(node) = arena.get_node(id) else {
        out.push_str(&format!("{indent}<dangling>\n"));
        return;
    };

    match &node.data {
        AnyNode::Module(m) => {
            out.push_str(&format!("{indent}Module\n"));
            for child in &m.body {
                render_into(arena, *child, depth + 1, out);
            }
        }
        AnyNode::Opaque(o) => {
            out.push_str(&format!("{indent}{}\n", o.tag));
            for child in &o.children {
                render_into(arena, *child, depth + 1, out);
            }
        }
        AnyNode::Name(n) => {
            out.push_str(&format!("{indent}Name({:?}, {:?})\n", n.value, n.ctx));
        }
        AnyNode::Constant(c) => {
            out.push_str(&format!("{indent}Constant({:?})\n", c.value));
        }
        AnyNode::FunctionDef(f) => {
            out.push_str(&format!("{indent}FunctionDef({:?})\n", f.name));
            render_into(arena, f.args, depth + 1, out);
            for stmt in &f.body {
                render_into(arena, *stmt, depth + 1, out);
            }
        }
        AnyNode::Arguments(a) => {
            out.push_str(&format!(
                "{indent}Arguments(posonly={}, args={}, vararg={}, kwonly={}, kwarg={})\n",
                a.posonlyargs.len(),
                a.args.len(),
                a.vararg.is_some(),
                a.kwonlyargs.len(),
                a.kwarg.is_some(),
            ));
        }
        AnyNode::JoinedStr(j) => {
            out.push_str(&format!("{indent}JoinedStr\n"));
            for v in &j.values {
                render_into(arena, *v, depth + 1, out);
            }
        }
        AnyNode::FormattedValue(fv) => {
            out.push_str(&format!("{indent}FormattedValue({:?})\n", fv.conversion));
            render_into(arena, fv.value, depth + 1, out);
            if let Some(spec) = fv.format_spec {
                render_into(arena, spec, depth + 1, out);
            }
        }
        other => {
            out.push_str(&format!("{indent}{other:?}\n"));
        }
    }
}

#[test]
fn function_with_no_parameters_has_the_expected_shape() {
    let (arena, module) = parse_module("def f():\n    pass\n", "<test>").expect("parse failed");
    let rendered = render(&arena, module);
    insta::assert_snapshot!(
        rendered,
        @"Module\n  FunctionDef(\"f\")\n    Arguments(posonly=0, args=0, vararg=false, kwonly=0, kwarg=false)\n    Pass\n"
    );
}

#[test]
fn fstring_conversion_and_nested_format_spec_have_the_expected_shape() {
    let (arena, module) = parse_module("f\"{x!r:>{w}}\"\n", "<test>").expect("parse failed");
    let rendered = render(&arena, module);
    insta::assert_snapshot!(
        rendered,
        @"Module\n  JoinedStr\n    FormattedValue(Repr)\n      Name(\"x\", Load)\n      JoinedStr\n        Constant(Str(\">\"))\n        FormattedValue(None)\n          Name(\"w\", Load)\n"
    );
}
