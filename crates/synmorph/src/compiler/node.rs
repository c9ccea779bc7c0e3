//! The opaque compiler node type (§3, §6).
//!
//! This is the thin seam between the frontend in [`crate::compiler`] and the
//! wrapper layer: an immutable arena of nodes produced fresh by each
//! [`super::parse_source_file`] call. The core only ever reads through the
//! handle below — it never mutates a `Tree` in place.

use std::cell::Cell;
use std::rc::Rc;

use crate::syntax_kind::SyntaxKind;

pub type NodeId = u32;

#[derive(Debug)]
pub(crate) struct NodeData {
    pub kind: SyntaxKind,
    /// Start offset including leading trivia (whitespace/comments). A plain
    /// `Cell` rather than `u32`: the tree is otherwise immutable, but
    /// `Node::offset_positions` (§4.3) is a documented, narrow exception
    /// used by the reconciler to shift a surviving subtree's positions
    /// without a full reparse.
    pub pos: Cell<u32>,
    /// End offset, trivia-less.
    pub end: Cell<u32>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

/// An immutable tree produced by one `parse_source_file` call.
#[derive(Debug)]
pub struct Tree {
    pub(crate) nodes: Vec<NodeData>,
    pub(crate) root: NodeId,
}

impl Tree {
    pub(crate) fn node(&self, id: NodeId) -> &NodeData {
        &self.nodes[id as usize]
    }
}

/// A handle to a node within one `Tree`.
///
/// Identity is structural: two handles are equal iff they point at the same
/// arena slot of the same `Tree` instance (by `Rc` pointer), matching §3's
/// "keyed by compiler-node identity" invariant. A reparse produces an
/// entirely new `Tree`, so handles never compare equal across reparses —
/// that migration is exactly what the reconciler (§4.5) exists to do.
#[derive(Clone, Debug)]
pub struct CompilerNode {
    pub(crate) tree: Rc<Tree>,
    pub(crate) id: NodeId,
}

impl CompilerNode {
    pub(crate) fn new(tree: Rc<Tree>, id: NodeId) -> Self {
        CompilerNode { tree, id }
    }

    pub(crate) fn root(tree: Rc<Tree>) -> Self {
        let id = tree.root;
        CompilerNode { tree, id }
    }

    fn data(&self) -> &NodeData {
        self.tree.node(self.id)
    }

    #[must_use]
    pub fn kind(&self) -> SyntaxKind {
        self.data().kind
    }

    /// Start offset, leading trivia included.
    #[must_use]
    pub fn pos(&self) -> u32 {
        self.data().pos.get()
    }

    /// End offset, trivia-less.
    #[must_use]
    pub fn end(&self) -> u32 {
        self.data().end.get()
    }

    /// Shift this node's and all its descendants' positions by `delta`.
    /// The one documented mutation of an otherwise immutable tree (§4.3).
    pub(crate) fn offset_positions(&self, delta: i64) {
        let data = self.data();
        data.pos.set((i64::from(data.pos.get()) + delta).max(0) as u32);
        data.end.set((i64::from(data.end.get()) + delta).max(0) as u32);
        for child in self.children() {
            child.offset_positions(delta);
        }
    }

    #[must_use]
    pub fn parent(&self) -> Option<CompilerNode> {
        self.data()
            .parent
            .map(|id| CompilerNode::new(self.tree.clone(), id))
    }

    #[must_use]
    pub fn children(&self) -> Vec<CompilerNode> {
        self.data()
            .children
            .iter()
            .map(|&id| CompilerNode::new(self.tree.clone(), id))
            .collect()
    }

    /// Start offset with leading trivia skipped, per the text it belongs to.
    #[must_use]
    pub fn get_start(&self, text: &str) -> u32 {
        crate::position::get_next_non_whitespace_pos(text, self.pos()).min(self.end())
    }

    #[must_use]
    pub fn get_width(&self, text: &str) -> u32 {
        self.end().saturating_sub(self.get_start(text))
    }

    #[must_use]
    pub fn get_full_width(&self) -> u32 {
        self.end().saturating_sub(self.pos())
    }

    #[must_use]
    pub fn get_text<'a>(&self, text: &'a str) -> &'a str {
        let start = self.get_start(text) as usize;
        let end = self.end() as usize;
        text.get(start..end).unwrap_or("")
    }

    #[must_use]
    pub fn get_full_text<'a>(&self, text: &'a str) -> &'a str {
        let start = self.pos() as usize;
        let end = self.end() as usize;
        text.get(start..end).unwrap_or("")
    }

    /// Raw arena identity, used by the factory as a cache key.
    pub(crate) fn identity(&self) -> (usize, NodeId) {
        (Rc::as_ptr(&self.tree) as usize, self.id)
    }
}

impl PartialEq for CompilerNode {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}
impl Eq for CompilerNode {}

impl std::hash::Hash for CompilerNode {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}
