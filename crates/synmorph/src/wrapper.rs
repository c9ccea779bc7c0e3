//! The node wrapper (§4.3): a uniform navigation/query API over an
//! underlying compiler node, plus the disposal protocol.
//!
//! One physical representation (`Node`) backs every syntax kind — see
//! [`crate::factory`] for why that is enough to dispatch on syntax kind
//! without a subclass per kind. Kind-specialized convenience methods
//! (`setIsExported`, `remove`, ...) live on the thin views in
//! [`crate::wrappers`].

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::compiler::CompilerNode;
use crate::errors::{CoreError, CoreResult};
use crate::global_container::GlobalContainer;
use crate::source_file::{SourceFile, SourceFileShared};
use crate::span::Span;
use crate::syntax_kind::SyntaxKind;

pub(crate) struct NodeData {
    pub(crate) compiler_node: RefCell<Option<CompilerNode>>,
    pub(crate) source_file: Rc<SourceFileShared>,
    pub(crate) container: Weak<GlobalContainer>,
}

/// A stable handle over a `CompilerNode`. Cloning a `Node` is cheap (an
/// `Rc` bump) and preserves identity: two clones always refer to the same
/// cache entry (§3 invariant 1).
#[derive(Clone)]
pub struct Node(pub(crate) Rc<NodeData>);

impl Node {
    pub(crate) fn new(compiler_node: CompilerNode, source_file: Rc<SourceFileShared>, container: Weak<GlobalContainer>) -> Self {
        Node(Rc::new(NodeData {
            compiler_node: RefCell::new(Some(compiler_node)),
            source_file,
            container,
        }))
    }

    /// The underlying compiler node, or `InvalidOperation` if this wrapper
    /// was disposed (§3 invariant 2).
    pub(crate) fn compiler_node(&self) -> CoreResult<CompilerNode> {
        self.0.compiler_node.borrow().clone().ok_or_else(CoreError::disposed_node)
    }

    pub(crate) fn container(&self) -> CoreResult<Rc<GlobalContainer>> {
        self.0
            .container
            .upgrade()
            .ok_or_else(|| CoreError::InvalidOperation("global container has been dropped".to_string()))
    }

    /// True once this wrapper has been disposed. The only query allowed on
    /// a disposed wrapper besides identity comparison (§3 invariant 2).
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.0.compiler_node.borrow().is_none()
    }

    #[must_use]
    pub fn get_source_file(&self) -> SourceFile {
        // Walk to the root compiler node and resolve it through the
        // factory; the cache makes this a hit in the common case since the
        // root wrapper was created when the file was first parsed.
        let shared = self.0.source_file.clone();
        let Ok(mut cn) = self.compiler_node() else {
            return SourceFile::detached(shared);
        };
        while let Some(parent) = cn.parent() {
            cn = parent;
        }
        match self.container() {
            Ok(container) => {
                let root = container
                    .factory
                    .borrow_mut()
                    .get_node_from_compiler_node(&cn, &shared, &self.0.container);
                SourceFile::new(shared, root)
            }
            Err(_) => SourceFile::detached(shared),
        }
    }

    pub fn kind(&self) -> CoreResult<SyntaxKind> {
        Ok(self.compiler_node()?.kind())
    }

    fn resolve(&self, cn: &CompilerNode) -> CoreResult<Node> {
        let container = self.container()?;
        Ok(container
            .factory
            .borrow_mut()
            .get_node_from_compiler_node(cn, &self.0.source_file, &self.0.container))
    }

    // ---- structural navigation -------------------------------------------------

    pub fn get_parent(&self) -> CoreResult<Option<Node>> {
        let cn = self.compiler_node()?;
        match cn.parent() {
            None => Ok(None),
            Some(parent_cn) => Ok(Some(self.resolve(&parent_cn)?)),
        }
    }

    pub fn get_parent_or_throw(&self) -> CoreResult<Node> {
        self.get_parent()?.ok_or_else(CoreError::no_parent)
    }

    pub fn get_children(&self) -> CoreResult<Vec<Node>> {
        let cn = self.compiler_node()?;
        cn.children().iter().map(|c| self.resolve(c)).collect()
    }

    /// A lazy-in-name variant: resolving a child is O(1) indirection
    /// through the arena, so there is no meaningful laziness to buy here —
    /// unlike `get_descendants_iterator`, which really does avoid building
    /// the whole subtree up front.
    pub fn get_children_iterator(&self) -> CoreResult<std::vec::IntoIter<Node>> {
        Ok(self.get_children()?.into_iter())
    }

    pub fn get_ancestors(&self) -> CoreResult<Vec<Node>> {
        let mut ancestors = Vec::new();
        let mut current = self.get_parent()?;
        while let Some(node) = current {
            current = node.get_parent()?;
            ancestors.push(node);
        }
        Ok(ancestors)
    }

    pub fn get_descendants(&self) -> CoreResult<Vec<Node>> {
        self.get_descendants_iterator()?.collect()
    }

    pub fn get_descendants_iterator(&self) -> CoreResult<DescendantsIter> {
        let mut stack: Vec<Node> = self.get_children()?;
        stack.reverse();
        Ok(DescendantsIter { stack })
    }

    fn siblings_container(&self) -> CoreResult<Vec<Node>> {
        if let Some(list) = self.get_parent_syntax_list()? {
            return list.get_children();
        }
        match self.get_parent()? {
            Some(parent) => parent.get_children(),
            None => Ok(vec![self.clone()]),
        }
    }

    fn index_among_siblings(&self, siblings: &[Node]) -> CoreResult<usize> {
        let self_cn = self.compiler_node()?;
        for (i, s) in siblings.iter().enumerate() {
            if s.compiler_node()? == self_cn {
                return Ok(i);
            }
        }
        Err(CoreError::InvalidOperation(
            "node not found among its own siblings (stale wrapper?)".to_string(),
        ))
    }

    /// Closest-first.
    pub fn get_previous_siblings(&self) -> CoreResult<Vec<Node>> {
        let siblings = self.siblings_container()?;
        let idx = self.index_among_siblings(&siblings)?;
        Ok(siblings[..idx].iter().rev().cloned().collect())
    }

    pub fn get_next_siblings(&self) -> CoreResult<Vec<Node>> {
        let siblings = self.siblings_container()?;
        let idx = self.index_among_siblings(&siblings)?;
        Ok(siblings[idx + 1..].to_vec())
    }

    pub fn get_previous_sibling(&self) -> CoreResult<Option<Node>> {
        Ok(self.get_previous_siblings()?.into_iter().next())
    }

    pub fn get_next_sibling(&self) -> CoreResult<Option<Node>> {
        Ok(self.get_next_siblings()?.into_iter().next())
    }

    pub fn get_previous_sibling_if_kind(&self, kind: SyntaxKind) -> CoreResult<Option<Node>> {
        Ok(self.get_previous_sibling()?.filter(|n| n.kind().map(|k| k == kind).unwrap_or(false)))
    }

    pub fn get_previous_sibling_if_kind_or_throw(&self, kind: SyntaxKind) -> CoreResult<Node> {
        self.get_previous_sibling_if_kind(kind)?
            .ok_or_else(|| CoreError::InvalidOperation(format!("previous sibling is not of kind {kind:?}")))
    }

    /// Searches the closest-first previous-siblings sequence for the first
    /// match, unlike `..._if_kind`'s single-candidate check.
    pub fn get_previous_sibling_by_kind(&self, kind: SyntaxKind) -> CoreResult<Option<Node>> {
        for sibling in self.get_previous_siblings()? {
            if sibling.kind()? == kind {
                return Ok(Some(sibling));
            }
        }
        Ok(None)
    }

    pub fn get_previous_sibling_by_kind_or_throw(&self, kind: SyntaxKind) -> CoreResult<Node> {
        self.get_previous_sibling_by_kind(kind)?
            .ok_or_else(|| CoreError::InvalidOperation(format!("no previous sibling of kind {kind:?}")))
    }

    pub fn get_next_sibling_if_kind(&self, kind: SyntaxKind) -> CoreResult<Option<Node>> {
        Ok(self.get_next_sibling()?.filter(|n| n.kind().map(|k| k == kind).unwrap_or(false)))
    }

    pub fn get_next_sibling_if_kind_or_throw(&self, kind: SyntaxKind) -> CoreResult<Node> {
        self.get_next_sibling_if_kind(kind)?
            .ok_or_else(|| CoreError::InvalidOperation(format!("next sibling is not of kind {kind:?}")))
    }

    /// Searches the next-siblings sequence for the first match, unlike
    /// `..._if_kind`'s single-candidate check.
    pub fn get_next_sibling_by_kind(&self, kind: SyntaxKind) -> CoreResult<Option<Node>> {
        for sibling in self.get_next_siblings()? {
            if sibling.kind()? == kind {
                return Ok(Some(sibling));
            }
        }
        Ok(None)
    }

    pub fn get_next_sibling_by_kind_or_throw(&self, kind: SyntaxKind) -> CoreResult<Node> {
        self.get_next_sibling_by_kind(kind)?
            .ok_or_else(|| CoreError::InvalidOperation(format!("no next sibling of kind {kind:?}")))
    }

    /// The unique child of the parent whose kind is `SyntaxList` and whose
    /// `[pos, end]` contains this node.
    pub fn get_parent_syntax_list(&self) -> CoreResult<Option<Node>> {
        let parent = match self.get_parent()? {
            Some(p) => p,
            None => return Ok(None),
        };
        let self_cn = self.compiler_node()?;
        for child in parent.get_children()? {
            if child.kind()? != SyntaxKind::SyntaxList {
                continue;
            }
            let list_cn = child.compiler_node()?;
            if list_cn != self_cn && list_cn.pos() <= self_cn.pos() && self_cn.end() <= list_cn.end() {
                return Ok(Some(child));
            }
        }
        Ok(None)
    }

    fn nth_child(&self, index: usize) -> CoreResult<Option<Node>> {
        Ok(self.get_children()?.into_iter().nth(index))
    }

    /// Walks through body-bearing layers (a namespace's module block, a
    /// method's block body) and returns the inner `SyntaxList` — the
    /// canonical insertion point for variable-length child sequences (§4.3).
    pub fn get_child_syntax_list(&self) -> CoreResult<Option<Node>> {
        match self.kind()? {
            SyntaxKind::SourceFile => self.nth_child(0),
            SyntaxKind::ClassDeclaration => self.nth_child(5),
            SyntaxKind::Block | SyntaxKind::ModuleBlock => self.nth_child(1),
            SyntaxKind::NamespaceDeclaration => match self.nth_child(3)? {
                Some(body) => body.get_child_syntax_list(),
                None => Ok(None),
            },
            SyntaxKind::MethodDeclaration => match self.nth_child(4)? {
                Some(body) => body.get_child_syntax_list(),
                None => Ok(None),
            },
            _ => Ok(None),
        }
    }

    // ---- positional queries -----------------------------------------------------

    pub fn get_pos(&self) -> CoreResult<u32> {
        Ok(self.compiler_node()?.pos())
    }

    pub fn get_end(&self) -> CoreResult<u32> {
        Ok(self.compiler_node()?.end())
    }

    pub fn get_start(&self) -> CoreResult<u32> {
        let cn = self.compiler_node()?;
        Ok(cn.get_start(&self.0.source_file.text.borrow()))
    }

    pub fn get_width(&self) -> CoreResult<u32> {
        let cn = self.compiler_node()?;
        Ok(cn.get_width(&self.0.source_file.text.borrow()))
    }

    pub fn get_full_width(&self) -> CoreResult<u32> {
        Ok(self.compiler_node()?.get_full_width())
    }

    /// This node's full `[pos, end)` range, backing `contains_range` and
    /// the pos/end based navigation below.
    pub fn get_span(&self) -> CoreResult<Span> {
        let cn = self.compiler_node()?;
        Ok(Span::new(cn.pos(), cn.end()))
    }

    pub fn contains_range(&self, pos: u32, end: u32) -> CoreResult<bool> {
        Ok(self.get_span()?.contains_range(pos, end))
    }

    /// The unique direct child `c` with `c.getPos() <= pos < c.getEnd()`.
    pub fn get_child_at_pos(&self, pos: u32) -> CoreResult<Option<Node>> {
        for child in self.get_children()? {
            if child.get_span()?.contains(pos) {
                return Ok(Some(child));
            }
        }
        Ok(None)
    }

    pub fn get_descendant_at_pos(&self, pos: u32) -> CoreResult<Option<Node>> {
        let mut current = self.clone();
        let mut deepest = None;
        while let Some(child) = current.get_child_at_pos(pos)? {
            deepest = Some(child.clone());
            current = child;
        }
        Ok(deepest)
    }

    pub fn get_descendant_at_start_with_width(&self, start: u32, width: u32) -> CoreResult<Option<Node>> {
        let target_end = start + width;
        let mut current = self.clone();
        let mut result = None;
        loop {
            let cn = current.compiler_node()?;
            if cn.end() < target_end {
                break;
            }
            let start_here = cn.get_start(&self.0.source_file.text.borrow());
            if start_here == start && cn.end() == target_end {
                result = Some(current.clone());
            }
            match current.get_child_at_pos(start)? {
                Some(next) => current = next,
                None => break,
            }
        }
        Ok(result)
    }

    // ---- kind-filtered variants ---------------------------------------------------

    pub fn get_first_child_by_kind(&self, kind: SyntaxKind) -> CoreResult<Option<Node>> {
        for child in self.get_children()? {
            if child.kind()? == kind {
                return Ok(Some(child));
            }
        }
        Ok(None)
    }

    pub fn get_first_child_by_kind_or_throw(&self, kind: SyntaxKind) -> CoreResult<Node> {
        self.get_first_child_by_kind(kind)?
            .ok_or_else(|| CoreError::InvalidOperation(format!("no child of kind {kind:?}")))
    }

    pub fn get_first_child_if_kind(&self, kind: SyntaxKind) -> CoreResult<Option<Node>> {
        Ok(self.get_children()?.into_iter().next().filter(|c| c.kind().map(|k| k == kind).unwrap_or(false)))
    }

    pub fn get_first_child_if_kind_or_throw(&self, kind: SyntaxKind) -> CoreResult<Node> {
        self.get_first_child_if_kind(kind)?
            .ok_or_else(|| CoreError::InvalidOperation(format!("first child is not of kind {kind:?}")))
    }

    pub fn get_last_child_by_kind(&self, kind: SyntaxKind) -> CoreResult<Option<Node>> {
        let mut found = None;
        for child in self.get_children()? {
            if child.kind()? == kind {
                found = Some(child);
            }
        }
        Ok(found)
    }

    pub fn get_last_child_by_kind_or_throw(&self, kind: SyntaxKind) -> CoreResult<Node> {
        self.get_last_child_by_kind(kind)?
            .ok_or_else(|| CoreError::InvalidOperation(format!("no child of kind {kind:?}")))
    }

    pub fn get_last_child_if_kind(&self, kind: SyntaxKind) -> CoreResult<Option<Node>> {
        Ok(self.get_children()?.into_iter().last().filter(|c| c.kind().map(|k| k == kind).unwrap_or(false)))
    }

    pub fn get_last_child_if_kind_or_throw(&self, kind: SyntaxKind) -> CoreResult<Node> {
        self.get_last_child_if_kind(kind)?
            .ok_or_else(|| CoreError::InvalidOperation(format!("last child is not of kind {kind:?}")))
    }

    pub fn get_first_ancestor_by_kind(&self, kind: SyntaxKind) -> CoreResult<Option<Node>> {
        for ancestor in self.get_ancestors()? {
            if ancestor.kind()? == kind {
                return Ok(Some(ancestor));
            }
        }
        Ok(None)
    }

    pub fn get_first_ancestor_by_kind_or_throw(&self, kind: SyntaxKind) -> CoreResult<Node> {
        self.get_first_ancestor_by_kind(kind)?
            .ok_or_else(|| CoreError::InvalidOperation(format!("no ancestor of kind {kind:?}")))
    }

    pub fn get_first_ancestor_if_kind(&self, kind: SyntaxKind) -> CoreResult<Option<Node>> {
        Ok(self.get_parent()?.filter(|p| p.kind().map(|k| k == kind).unwrap_or(false)))
    }

    pub fn get_first_ancestor_if_kind_or_throw(&self, kind: SyntaxKind) -> CoreResult<Node> {
        self.get_first_ancestor_if_kind(kind)?
            .ok_or_else(|| CoreError::InvalidOperation(format!("parent is not of kind {kind:?}")))
    }

    /// All descendants of `kind`, preorder. For the single-result shape see
    /// `get_first_descendant_by_kind`.
    pub fn get_descendants_of_kind(&self, kind: SyntaxKind) -> CoreResult<Vec<Node>> {
        Ok(self.get_descendants()?.into_iter().filter(|n| n.kind().map(|k| k == kind).unwrap_or(false)).collect())
    }

    /// Preorder search through the whole subtree, unlike a kind-filtered
    /// child lookup which only looks one level down.
    pub fn get_first_descendant_by_kind(&self, kind: SyntaxKind) -> CoreResult<Option<Node>> {
        for descendant in self.get_descendants_iterator()? {
            let descendant = descendant?;
            if descendant.kind()? == kind {
                return Ok(Some(descendant));
            }
        }
        Ok(None)
    }

    pub fn get_first_descendant_by_kind_or_throw(&self, kind: SyntaxKind) -> CoreResult<Node> {
        self.get_first_descendant_by_kind(kind)?
            .ok_or_else(|| CoreError::InvalidOperation(format!("no descendant of kind {kind:?}")))
    }

    // ---- text extraction ----------------------------------------------------------

    pub fn get_text(&self) -> CoreResult<String> {
        let cn = self.compiler_node()?;
        Ok(cn.get_text(&self.0.source_file.text.borrow()).to_string())
    }

    pub fn get_full_text(&self) -> CoreResult<String> {
        let cn = self.compiler_node()?;
        Ok(cn.get_full_text(&self.0.source_file.text.borrow()).to_string())
    }

    /// Walks backward from `getStart()` over spaces/tabs, collecting them.
    pub fn get_indentation_text(&self) -> CoreResult<String> {
        let start = self.get_start()? as usize;
        let text = self.0.source_file.text.borrow();
        let bytes = text.as_bytes();
        let mut i = start;
        while i > 0 && (bytes[i - 1] == b' ' || bytes[i - 1] == b'\t') {
            i -= 1;
        }
        Ok(text[i..start].to_string())
    }

    /// Scans backward from `getStart()` over space/tab until a newline
    /// (`true`) or any other character (`false`).
    pub fn is_first_node_on_line(&self) -> CoreResult<bool> {
        let start = self.get_start()? as usize;
        let text = self.0.source_file.text.borrow();
        let bytes = text.as_bytes();
        let mut i = start;
        while i > 0 {
            match bytes[i - 1] {
                b' ' | b'\t' => i -= 1,
                b'\n' => return Ok(true),
                _ => return Ok(false),
            }
        }
        Ok(true)
    }

    // ---- disposal -------------------------------------------------------------

    /// Depth-first: dispose all children, then this node. After `dispose`
    /// on a subtree root, every wrapper in that subtree is cache-evicted
    /// and has a null internal pointer.
    pub fn dispose(&self) -> CoreResult<()> {
        if self.is_disposed() {
            return Ok(());
        }
        for child in self.get_children()? {
            child.dispose()?;
        }
        self.dispose_only_this()
    }

    /// Removes this wrapper from the cache and nulls its compiler-node
    /// pointer. Does not recurse — callers that need subtree disposal use
    /// `dispose`.
    pub fn dispose_only_this(&self) -> CoreResult<()> {
        if self.is_disposed() {
            return Ok(());
        }
        tracing::trace!(kind = ?self.kind(), "dispose_only_this");
        if let Ok(container) = self.container() {
            if let Some(cn) = self.0.compiler_node.borrow().clone() {
                container.factory.borrow_mut().remove_node_from_cache(&cn);
            }
        }
        *self.0.compiler_node.borrow_mut() = None;
        Ok(())
    }

    /// Shifts this node's and all its descendants' positions by `delta`.
    /// Rare; used by the reconciler when a parent-level reparse is skipped.
    pub(crate) fn offset_positions(&self, delta: i64) -> CoreResult<()> {
        self.compiler_node()?.offset_positions(delta);
        Ok(())
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}
impl Eq for Node {}

/// Lazy preorder descendant walk (stack-based — no upfront materialization
/// of the whole subtree).
pub struct DescendantsIter {
    stack: Vec<Node>,
}

impl Iterator for DescendantsIter {
    type Item = CoreResult<Node>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        match node.get_children() {
            Ok(children) => {
                self.stack.extend(children.into_iter().rev());
                Some(Ok(node))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::global_container::GlobalContainer;
    use crate::settings::ManipulationSettings;
    use crate::source_file::SourceFile;
    use std::rc::Rc;

    fn parse(text: &str) -> SourceFile {
        let container = GlobalContainer::new(ManipulationSettings::default(), Rc::new(crate::fs_host::InMemoryFileSystemHost::new()));
        SourceFile::from_parts("a.ts", text, &container)
    }

    #[test]
    fn dispose_is_depth_first_and_recursive() {
        let source = parse("class A {}");
        let root = source.as_node().unwrap();
        let class_decl = root.get_first_child_by_kind(SyntaxKind::ClassDeclaration).unwrap().unwrap();
        let name_node = class_decl.get_first_child_by_kind(SyntaxKind::Identifier).unwrap().unwrap();

        class_decl.dispose().unwrap();

        assert!(class_decl.is_disposed());
        assert!(name_node.is_disposed());
    }

    #[test]
    fn dispose_on_already_disposed_node_is_a_no_op() {
        let source = parse("class A {}");
        let class_decl = source.as_node().unwrap().get_first_child_by_kind(SyntaxKind::ClassDeclaration).unwrap().unwrap();
        class_decl.dispose().unwrap();
        class_decl.dispose().unwrap();
        assert!(class_decl.is_disposed());
    }

    #[test]
    fn ancestors_walk_up_to_the_source_file() {
        let source = parse("class A {}");
        let root = source.as_node().unwrap();
        let class_decl = root.get_first_child_by_kind(SyntaxKind::ClassDeclaration).unwrap().unwrap();
        let name_node = class_decl.get_first_child_by_kind(SyntaxKind::Identifier).unwrap().unwrap();

        let ancestors = name_node.get_ancestors().unwrap();
        assert_eq!(ancestors[0].kind().unwrap(), SyntaxKind::ClassDeclaration);
        assert_eq!(ancestors.last().unwrap().kind().unwrap(), SyntaxKind::SourceFile);
    }

    #[test]
    fn descendants_iterator_matches_collected_descendants() {
        let source = parse("class A {\n    x;\n}");
        let root = source.as_node().unwrap();
        let via_vec = root.get_descendants().unwrap();
        let via_iter: Vec<Node> = root.get_descendants_iterator().unwrap().map(|n| n.unwrap()).collect();
        assert_eq!(via_vec.len(), via_iter.len());
        assert!(via_vec.iter().any(|n| n.kind().unwrap() == SyntaxKind::ClassDeclaration));
    }

    #[test]
    fn children_iterator_matches_get_children() {
        let source = parse("class A {}");
        let root = source.as_node().unwrap();
        let via_vec = root.get_children().unwrap();
        let via_iter: Vec<Node> = root.get_children_iterator().unwrap().collect();
        assert_eq!(via_vec.len(), via_iter.len());
    }

    #[test]
    fn contains_range_respects_half_open_end() {
        let source = parse("class A {}");
        let root = source.as_node().unwrap();
        let class_decl = root.get_first_child_by_kind(SyntaxKind::ClassDeclaration).unwrap().unwrap();
        let end = class_decl.get_end().unwrap();
        assert!(class_decl.contains_range(0, end).unwrap());
        assert!(!class_decl.contains_range(0, end + 1).unwrap());
    }

    #[test]
    fn descendant_at_pos_finds_the_deepest_node() {
        let source = parse("class A {}");
        let root = source.as_node().unwrap();
        let name_node = root.get_first_descendant_by_kind(SyntaxKind::Identifier).unwrap().unwrap();
        let pos = name_node.get_start().unwrap();
        let found = root.get_descendant_at_pos(pos).unwrap().unwrap();
        assert_eq!(found.kind().unwrap(), SyntaxKind::Identifier);
    }

    #[test]
    fn descendant_at_start_with_width_matches_exact_span() {
        let source = parse("class A {}");
        let root = source.as_node().unwrap();
        let name_node = root.get_first_descendant_by_kind(SyntaxKind::Identifier).unwrap().unwrap();
        let start = name_node.get_start().unwrap();
        let width = name_node.get_width().unwrap();
        let found = root.get_descendant_at_start_with_width(start, width).unwrap().unwrap();
        assert_eq!(found.kind().unwrap(), SyntaxKind::Identifier);
    }

    #[test]
    fn is_first_node_on_line_detects_leading_whitespace_only() {
        let source = parse("class A {\n    x;\n}");
        let root = source.as_node().unwrap();
        let class_decl = root.get_first_child_by_kind(SyntaxKind::ClassDeclaration).unwrap().unwrap();
        assert!(class_decl.is_first_node_on_line().unwrap());
        let prop = class_decl.get_first_descendant_by_kind(SyntaxKind::PropertyDeclaration).unwrap().unwrap();
        assert!(prop.is_first_node_on_line().unwrap());
    }

    #[test]
    fn last_child_by_kind_picks_the_final_match() {
        let source = parse("const x = 1;\nconst y = 2;\n");
        let root = source.as_node().unwrap();
        let list = root.get_child_syntax_list().unwrap().unwrap();
        let first = list.get_first_child_by_kind(SyntaxKind::VariableStatement).unwrap().unwrap();
        let last = list.get_last_child_by_kind(SyntaxKind::VariableStatement).unwrap().unwrap();
        assert_ne!(first.get_start().unwrap(), last.get_start().unwrap());
        let last_or_throw = list.get_last_child_by_kind_or_throw(SyntaxKind::VariableStatement).unwrap();
        assert!(last_or_throw == last);
    }

    #[test]
    fn first_and_last_child_if_kind_require_the_immediate_candidate() {
        let source = parse("const x = 1;\nconst y = 2;\n");
        let root = source.as_node().unwrap();
        let list = root.get_child_syntax_list().unwrap().unwrap();
        assert!(list.get_first_child_if_kind(SyntaxKind::VariableStatement).unwrap().is_some());
        assert!(list.get_last_child_if_kind(SyntaxKind::VariableStatement).unwrap().is_some());
        // the root's first child is the SyntaxList itself, never a VariableStatement
        assert!(root.get_first_child_if_kind(SyntaxKind::VariableStatement).unwrap().is_none());
    }

    #[test]
    fn sibling_by_kind_searches_past_the_immediate_neighbor() {
        let source = parse("const x = 1;\nconst y = 2;\n");
        let root = source.as_node().unwrap();
        let list = root.get_child_syntax_list().unwrap().unwrap();
        let children = list.get_children().unwrap();
        let (first, second) = (children[0].clone(), children[1].clone());

        assert!(second.get_previous_sibling_by_kind(SyntaxKind::VariableStatement).unwrap().unwrap() == first);
        assert!(first.get_next_sibling_by_kind(SyntaxKind::VariableStatement).unwrap().unwrap() == second);
        assert!(first.get_previous_sibling_if_kind(SyntaxKind::VariableStatement).unwrap().is_none());
        first.get_next_sibling_by_kind_or_throw(SyntaxKind::VariableStatement).unwrap();
    }

    #[test]
    fn ancestor_if_kind_or_throw_checks_only_the_immediate_parent() {
        let source = parse("class A {}");
        let root = source.as_node().unwrap();
        let class_decl = root.get_first_child_by_kind(SyntaxKind::ClassDeclaration).unwrap().unwrap();
        let name_node = class_decl.get_first_child_by_kind(SyntaxKind::Identifier).unwrap().unwrap();
        name_node.get_first_ancestor_if_kind_or_throw(SyntaxKind::ClassDeclaration).unwrap();
        assert!(name_node.get_first_ancestor_if_kind(SyntaxKind::SourceFile).unwrap().is_none());
    }

    #[test]
    fn first_descendant_by_kind_searches_the_whole_subtree() {
        let source = parse("class A {\n    x;\n}");
        let root = source.as_node().unwrap();
        let prop = root.get_first_descendant_by_kind_or_throw(SyntaxKind::PropertyDeclaration).unwrap();
        assert_eq!(prop.kind().unwrap(), SyntaxKind::PropertyDeclaration);
    }
}
