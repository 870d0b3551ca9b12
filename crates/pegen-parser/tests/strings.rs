//! Plain string/bytes literal decoding, driven through the fixture
//! grammar's `atom` rule.

use pegen_ast::node::ConstantValue;
use pegen_parser::diagnostics::SyntaxErrorKind;
use pegen_demos::parse_module;

#[test]
fn plain_string_literal_decodes_to_text() {
    let (arena, module) = parse_module("\"hello\"\n", "<test>").expect("parse failed");
    let body = &arena.get_node(module).unwrap().data.as_module().unwrap().body;
    let constant = arena.get_node(body[0]).unwrap().data.as_constant().unwrap();
    assert_eq!(constant.value, ConstantValue::Str("hello".to_string()));
    assert!(constant.kind.is_none());
}

#[test]
fn u_prefixed_string_carries_the_u_kind_tag() {
    let (arena, module) = parse_module("u\"hello\"\n", "<test>").expect("parse failed");
    let body = &arena.get_node(module).unwrap().data.as_module().unwrap().body;
    let constant = arena.get_node(body[0]).unwrap().data.as_constant().unwrap();
    assert_eq!(constant.value, ConstantValue::Str("hello".to_string()));
    assert_eq!(constant.kind.as_deref(), Some("u"));
}

#[test]
fn ascii_bytes_literal_decodes_to_bytes() {
    let (arena, module) = parse_module("b\"hello\"\n", "<test>").expect("parse failed");
    let body = &arena.get_node(module).unwrap().data.as_module().unwrap().body;
    let constant = arena.get_node(body[0]).unwrap().data.as_constant().unwrap();
    assert_eq!(constant.value, ConstantValue::Bytes(b"hello".to_vec()));
}

/// A non-ASCII byte in a bytes literal is rejected, even when it spells a
/// single valid UTF-8 scalar at the source level — bytes-mode enforces
/// ASCII-only body bytes regardless of what Unicode codepoint they decode
/// to, unlike the text-literal pre-pass.
#[test]
fn non_ascii_bytes_literal_is_rejected() {
    let err = parse_module("b\"h\u{e9}llo\"\n", "<test>").unwrap_err();
    assert_eq!(err.as_syntax().map(|e| e.kind), Some(SyntaxErrorKind::BytesNonAscii));
}

#[test]
fn raw_string_leaves_escapes_uninterpreted() {
    let (arena, module) = parse_module(r#"r"a\nb"
"#, "<test>").expect("parse failed");
    let body = &arena.get_node(module).unwrap().data.as_module().unwrap().body;
    let constant = arena.get_node(body[0]).unwrap().data.as_constant().unwrap();
    assert_eq!(constant.value, ConstantValue::Str("a\\nb".to_string()));
}

#[test]
fn non_ascii_text_literal_round_trips_through_the_escape_prepass() {
    let (arena, module) = parse_module("\"h\u{e9}llo\"\n", "<test>").expect("parse failed");
    let body = &arena.get_node(module).unwrap().data.as_module().unwrap().body;
    let constant = arena.get_node(body[0]).unwrap().data.as_constant().unwrap();
    assert_eq!(constant.value, ConstantValue::Str("h\u{e9}llo".to_string()));
}

#[test]
fn string_literals_on_separate_statements_are_not_concatenated() {
    // A NEWLINE between the two literals ends the first statement before
    // `atom`'s STRING-gathering loop ever sees the second token, so these
    // remain two separate expression statements.
    let (arena, module) = parse_module("\"a\"\n\"b\"\n", "<test>").expect("parse failed");
    let body = &arena.get_node(module).unwrap().data.as_module().unwrap().body;
    assert_eq!(body.len(), 2);
}

#[test]
fn adjacent_plain_string_literals_concatenate_into_one_constant() {
    let (arena, module) = parse_module("\"a\" \"b\" \"c\"\n", "<test>").expect("parse failed");
    let body = &arena.get_node(module).unwrap().data.as_module().unwrap().body;
    assert_eq!(body.len(), 1);
    let constant = arena.get_node(body[0]).unwrap().data.as_constant().unwrap();
    assert_eq!(constant.value, ConstantValue::Str("abc".to_string()));
}

#[test]
fn adjacent_bytes_literals_concatenate_into_one_bytes_constant() {
    let (arena, module) = parse_module("b\"a\" b\"b\"\n", "<test>").expect("parse failed");
    let body = &arena.get_node(module).unwrap().data.as_module().unwrap().body;
    assert_eq!(body.len(), 1);
    let constant = arena.get_node(body[0]).unwrap().data.as_constant().unwrap();
    assert_eq!(constant.value, ConstantValue::Bytes(b"ab".to_vec()));
}

#[test]
fn mixing_bytes_and_text_literals_is_rejected() {
    let err = parse_module("b\"a\" \"b\"\n", "<test>").unwrap_err();
    assert_eq!(err.as_syntax().map(|e| e.kind), Some(SyntaxErrorKind::InvalidSyntax));
}
