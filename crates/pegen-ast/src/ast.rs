//! AST arena allocator for efficient node management.
//!
//! This module provides the core AST arena that manages memory allocation
//! for all AST nodes using a bump allocator with generation-based safety.
//! It is the in-tree stand-in for the "Arena collaborator" the parser runtime
//! expects: a caller can swap in any allocator with the same `alloc`/`track`/
//! `free` shape without touching the runtime itself.

use bumpalo::Bump;
use pegen_source::types::Span;

use crate::node::{AnyNode, Node, NodeID, NodeKind};

/// Metadata for a single slot in the node arena.
///
/// Tracks the generation counter and occupancy status for each slot.
/// The generation counter is incremented each time a slot is reused,
/// preventing use-after-free bugs when old `NodeID`s reference removed nodes.
#[derive(Debug, Clone, Copy)]
struct SlotMetadata {
    /// Generation counter for this slot (incremented on removal)
    generation: u32,
    /// Whether this slot currently contains a node
    occupied: bool,
}

impl SlotMetadata {
    /// Creates new slot metadata with generation 1 and the specified occupancy
    const fn new(occupied: bool) -> Self { Self { generation: 1, occupied } }

    /// Increments the generation counter (called when slot is freed)
    const fn increment_generation(&mut self) { self.generation = self.generation.wrapping_add(1); }
}

/// An arena for allocating AST nodes.
///
/// `Arena` owns a bump allocator for string/byte storage plus a slot vector
/// for nodes themselves. Nodes are addressed by [`NodeID`], a (index,
/// generation) pair: freeing a slot bumps its generation so any `NodeID`
/// still pointing at it fails the validity check in `get_node` rather than
/// silently aliasing whatever gets allocated into the reused slot.
#[derive(Debug)]
pub struct Arena {
    /// The bump allocator backing `alloc_str`.
    allocator: Bump,
    /// Storage for nodes with associated metadata.
    nodes: Vec<Option<Node>>,
    /// Metadata for each slot (generation counter and occupancy status).
    metadata: Vec<SlotMetadata>,
    /// Free list for O(1) slot reuse (indices of freed slots).
    free_list: Vec<u32>,
    /// The root node of the AST, if any.
    root: Option<NodeID>,
}

impl Arena {
    /// Creates a new empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self {
            allocator: Bump::new(),
            nodes: Vec::new(),
            metadata: Vec::new(),
            free_list: Vec::new(),
            root: None,
        }
    }

    /// Creates a new arena with the given initial node capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            allocator: Bump::with_capacity(capacity),
            nodes: Vec::with_capacity(capacity),
            metadata: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            root: None,
        }
    }

    /// Sets the root node of the AST.
    pub const fn set_root(&mut self, root: NodeID) { self.root = Some(root); }

    /// Returns the root node of the AST, if any.
    pub const fn root(&self) -> Option<NodeID> { self.root }

    /// Allocates a new node in the arena with O(1) slot allocation.
    ///
    /// Uses a free list to achieve constant-time allocation by reusing freed slots.
    /// Generation counters prevent use-after-free bugs.
    pub fn alloc_node(&mut self, kind: NodeKind, data: AnyNode, span: Span) -> NodeID {
        let (index, generation) = if let Some(free_index) = self.free_list.pop() {
            // Reuse a freed slot - use its current generation
            let metadata = &self.metadata[free_index as usize];

            (free_index, metadata.generation)
        } else {
            // No free slots - allocate a new one
            let index = self.nodes.len() as u32;
            self.nodes.push(None);
            self.metadata.push(SlotMetadata::new(true));

            (index, 1)
        };

        // Create and store the new node
        let node = Node { kind, data, span, parent: None };
        self.nodes[index as usize] = Some(node);
        self.metadata[index as usize].occupied = true;

        NodeID::new(index, generation)
    }

    /// Gets a reference to a node by its ID with generation validation.
    ///
    /// Returns None if the node doesn't exist or the generation doesn't match,
    /// preventing access to stale nodes that have been removed and reused.
    pub fn get_node(&self, id: NodeID) -> Option<&Node> {
        let index = id.index() as usize;
        if index >= self.nodes.len() {
            return None;
        }

        if self.metadata[index].generation != id.generation() {
            return None;
        }

        self.nodes[index].as_ref()
    }

    /// Gets a mutable reference to a node by its ID with generation validation.
    ///
    /// Returns None if the node doesn't exist or the generation doesn't match,
    /// preventing access to stale nodes that have been removed and reused.
    pub fn get_node_mut(&mut self, id: NodeID) -> Option<&mut Node> {
        let index = id.index() as usize;
        if index >= self.nodes.len() {
            return None;
        }

        if self.metadata[index].generation != id.generation() {
            return None;
        }

        self.nodes[index].as_mut()
    }

    /// Checks if a node exists in the arena.
    #[must_use]
    pub fn node_exists(&self, id: NodeID) -> bool {
        if id.index() as usize >= self.nodes.len() {
            return false;
        }

        self.nodes[id.index() as usize].is_some()
    }

    /// Sets the parent of a node.
    pub fn set_parent(&mut self, child: NodeID, parent: NodeID) -> bool {
        if let Some(Some(node)) = self.nodes.get_mut(child.index() as usize) {
            node.parent = Some(parent);
            return true;
        }

        false
    }

    /// Gets the parent of a node, if any.
    #[must_use]
    pub fn get_parent(&self, id: NodeID) -> Option<NodeID> {
        self.nodes.get(id.index() as usize)?.as_ref()?.parent
    }

    /// Allocates a string in the arena.
    ///
    /// Used by the string/f-string decoders so decoded literal text lives as
    /// long as the arena itself rather than needing its own heap allocation
    /// per `Constant` node.
    pub fn alloc_str(&self, s: &str) -> &str { self.allocator.alloc_str(s) }

    /// Returns the number of nodes currently stored in the arena.
    #[must_use]
    pub fn node_count(&self) -> usize { self.nodes.iter().filter(|n| n.is_some()).count() }

    /// Removes a node from the arena with proper generation handling.
    ///
    /// Increments the generation counter and adds the slot to the free list,
    /// preventing old `NodeID`s from accessing the reused slot.
    pub fn remove(&mut self, id: NodeID) -> bool {
        let index = id.index() as usize;

        if index >= self.nodes.len() {
            return false;
        }

        if self.metadata[index].generation != id.generation() || self.nodes[index].is_none() {
            return false;
        }

        self.nodes[index] = None;
        self.metadata[index].increment_generation();
        self.metadata[index].occupied = false;
        self.free_list.push(id.index());

        true
    }

    /// Performs a pre-order traversal of the AST starting from the given node.
    ///
    /// Returns true if the traversal completed successfully, false if it was
    /// aborted early by `visit_fn` returning false.
    pub fn traverse_pre_order<F>(&self, node_id: NodeID, visit_fn: &mut F) -> bool
    where F: FnMut(NodeID) -> bool {
        if !visit_fn(node_id) {
            return false;
        }

        let Some(node) = self.get_node(node_id) else { return false };

        for child_id in node.data.children() {
            if !self.traverse_pre_order(child_id, visit_fn) {
                return false;
            }
        }

        true
    }

    /// Performs a post-order traversal of the AST starting from the given node.
    pub fn traverse_post_order<F>(&self, node_id: NodeID, visit_fn: &mut F) -> bool
    where F: FnMut(NodeID) -> bool {
        let Some(node) = self.get_node(node_id) else { return false };

        for child_id in node.data.children() {
            if !self.traverse_post_order(child_id, visit_fn) {
                return false;
            }
        }

        visit_fn(node_id)
    }

    /// Finds all nodes of a specific kind in the AST using pre-order traversal.
    #[must_use]
    pub fn find_nodes_of_kind(&self, start_node: NodeID, node_kind: NodeKind) -> Vec<NodeID> {
        let mut result = Vec::new();

        let _ = self.traverse_pre_order(start_node, &mut |node_id| {
            if let Some(node) = self.get_node(node_id)
                && node.kind == node_kind
            {
                result.push(node_id);
            }
            true
        });

        result
    }

    /// Collects all nodes in pre-order traversal.
    #[must_use]
    pub fn collect_nodes_pre_order(&self, start_node: NodeID) -> Vec<NodeID> {
        let mut result = Vec::new();

        let _ = self.traverse_pre_order(start_node, &mut |node_id| {
            result.push(node_id);
            true
        });

        result
    }

    /// Collects all nodes in post-order traversal.
    #[must_use]
    pub fn collect_nodes_post_order(&self, start_node: NodeID) -> Vec<NodeID> {
        let mut result = Vec::new();

        let _ = self.traverse_post_order(start_node, &mut |node_id| {
            result.push(node_id);
            true
        });

        result
    }

    /// Maps a function over all nodes in a pre-order traversal.
    pub fn map_pre_order<F, T>(&self, start_node: NodeID, mut f: F) -> Vec<T>
    where F: FnMut(NodeID) -> T {
        let mut results = Vec::new();

        let _ = self.traverse_pre_order(start_node, &mut |node_id| {
            results.push(f(node_id));
            true
        });

        results
    }

    /// Maps a function over all nodes in a post-order traversal.
    pub fn map_post_order<F, T>(&self, start_node: NodeID, mut f: F) -> Vec<T>
    where F: FnMut(NodeID) -> T {
        let mut results = Vec::new();

        let _ = self.traverse_post_order(start_node, &mut |node_id| {
            results.push(f(node_id));
            true
        });

        results
    }

    /// Filters nodes that match a predicate in a pre-order traversal.
    #[must_use]
    pub fn filter_nodes<F>(&self, start_node: NodeID, mut pred: F) -> Vec<NodeID>
    where F: FnMut(NodeID) -> bool {
        let mut results = Vec::new();

        let _ = self.traverse_pre_order(start_node, &mut |node_id| {
            if pred(node_id) {
                results.push(node_id);
            }
            true
        });

        results
    }

    /// Finds the first node that matches a predicate in a pre-order traversal.
    #[must_use]
    pub fn find_node<F>(&self, start_node: NodeID, mut pred: F) -> Option<NodeID>
    where F: FnMut(NodeID) -> bool {
        let mut result = None;

        let _ = self.traverse_pre_order(start_node, &mut |node_id| {
            if pred(node_id) {
                result = Some(node_id);
                false
            } else {
                true
            }
        });

        result
    }
}

impl Clone for Arena {
    fn clone(&self) -> Self {
        Self {
            allocator: Bump::new(),
            nodes: self.nodes.clone(),
            metadata: self.metadata.clone(),
            free_list: self.free_list.clone(),
            root: self.root,
        }
    }
}

impl Default for Arena {
    fn default() -> Self { Self::new() }
}

impl Drop for Arena {
    fn drop(&mut self) {
        for node in &mut self.nodes {
            *node = None;
        }
    }
}
