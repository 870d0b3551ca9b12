//! A borrowing [`ArenaHandle`] wrapper, so a sub-parser can share the
//! outer parse's arena without taking ownership of it.
//!
//! Grounded in the recursive-sub-parser design note for f-strings: the
//! expression re-entry point must allocate into the same arena the outer
//! parse is building, while still owning its own token buffer.
//! [`pegen_parser::engine::state::ParserState`] takes its arena by value,
//! so wrapping `&mut A` in a local newtype lets a nested `ParserState` be
//! constructed over a borrow instead of a fresh arena. Generic over `A`
//! (rather than hardcoded to `pegen_ast::ast::Arena`) so that each level
//! of f-string nesting can wrap the previous level's `ArenaRef` in
//! another one and still satisfy `ArenaHandle`.

use pegen_ast::node::{AnyNode, Node, NodeID, NodeKind};
use pegen_parser::engine::arena::ArenaHandle;
use pegen_source::types::Span;

/// Borrows an [`ArenaHandle`] for the duration of a nested parse.
pub struct ArenaRef<'a, A: ArenaHandle>(pub &'a mut A);

impl<A: ArenaHandle> ArenaHandle for ArenaRef<'_, A> {
    fn alloc_str(&self, s: &str) -> &str { self.0.alloc_str(s) }

    fn alloc_node(&mut self, kind: NodeKind, data: AnyNode, span: Span) -> NodeID {
        self.0.alloc_node(kind, data, span)
    }

    fn set_parent(&mut self, child: NodeID, parent: NodeID) -> bool { self.0.set_parent(child, parent) }

    fn get_parent(&self, id: NodeID) -> Option<NodeID> { self.0.get_parent(id) }

    fn get_node(&self, id: NodeID) -> Option<&Node> { self.0.get_node(id) }

    fn get_node_mut(&mut self, id: NodeID) -> Option<&mut Node> { self.0.get_node_mut(id) }
}
