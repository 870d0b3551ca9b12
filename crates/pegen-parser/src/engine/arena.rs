//! The arena collaborator interface.
//!
//! §6 models the arena purely as "whatever owns AST node storage and can
//! hand out stable, generation-checked handles" — this crate never
//! constructs one. [`ArenaHandle`] captures the handful of operations
//! [`crate::ast_helpers`] needs from it. The trait lives here (not in
//! `pegen-ast`) specifically so that implementing it for `pegen_ast`'s
//! concrete `Arena` type — a foreign type from this crate's point of
//! view — is legal under the orphan rule: a foreign trait can't be
//! implemented for a foreign type, but a *local* trait can be
//! implemented for anything.
use pegen_ast::node::{AnyNode, NodeID, NodeKind};
use pegen_source::types::Span;

/// What a grammar-rule layer needs from whatever is managing AST node
/// storage for this parse.
pub trait ArenaHandle {
    /// Copies `s` into arena-owned storage and returns a reference with
    /// the arena's lifetime, for decoded string/bytes literal content
    /// that must outlive the token it was decoded from.
    fn alloc_str(&self, s: &str) -> &str;

    /// Allocates a new AST node, returning its handle.
    fn alloc_node(&mut self, kind: NodeKind, data: AnyNode, span: Span) -> NodeID;

    /// Records `parent` as `child`'s parent. Returns `false` if `child`
    /// does not exist (a stale or out-of-generation handle).
    fn set_parent(&mut self, child: NodeID, parent: NodeID) -> bool;

    /// Looks up the recorded parent of `id`, if any.
    fn get_parent(&self, id: NodeID) -> Option<NodeID>;

    /// Looks up a previously allocated node by handle.
    fn get_node(&self, id: NodeID) -> Option<&pegen_ast::node::Node>;

    /// Looks up a previously allocated node by handle, mutably.
    fn get_node_mut(&mut self, id: NodeID) -> Option<&mut pegen_ast::node::Node>;
}

impl ArenaHandle for pegen_ast::ast::Arena {
    fn alloc_str(&self, s: &str) -> &str { self.alloc_str(s) }

    fn alloc_node(&mut self, kind: NodeKind, data: AnyNode, span: Span) -> NodeID {
        self.alloc_node(kind, data, span)
    }

    fn set_parent(&mut self, child: NodeID, parent: NodeID) -> bool {
        self.set_parent(child, parent)
    }

    fn get_parent(&self, id: NodeID) -> Option<NodeID> { self.get_parent(id) }

    fn get_node(&self, id: NodeID) -> Option<&pegen_ast::node::Node> { self.get_node(id) }

    fn get_node_mut(&mut self, id: NodeID) -> Option<&mut pegen_ast::node::Node> {
        self.get_node_mut(id)
    }
}
