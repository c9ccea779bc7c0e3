//! Tree reconciliation (§4.5): after a reparse produces a brand-new
//! `CompilerNode` tree, walk it in lock-step against the old tree and rebind
//! every live wrapper to its counterpart in the new tree, so callers who
//! are holding a `Node` never notice the reparse happened.
//!
//! Three composable strategies, tried in order at each level of the walk:
//!
//! - [`StraightReplacementHandler`]: old and new have the same child count
//!   and kind sequence — the common case for a small in-place edit.
//! - [`ChildIndexHandler`]: child counts differ (an insertion, a removal) —
//!   align by scanning for the next same-kind child on each side and treat
//!   anything left over on the old side as gone.
//! - [`UnwrapParentHandler`]: an old child that matches nothing by kind is
//!   not necessarily gone — if it is a container a manipulation method is
//!   documented to unwrap (today: `NamespaceDeclaration`), its own children
//!   are spliced into the surrounding search instead of being evicted along
//!   with it, so a namespace unwrap preserves the identity of the
//!   statements it contained.

use std::rc::Rc;

use crate::compiler::CompilerNode;
use crate::errors::{CoreError, CoreResult};
use crate::global_container::GlobalContainer;
use crate::source_file::SourceFileShared;
use crate::wrapper::Node;

struct ReconcileCtx<'a> {
    container: &'a Rc<GlobalContainer>,
}

trait NodeHandler {
    /// `old` and `new` are already known to be the right pairing; rebind
    /// `old`'s wrapper (if any) to `new` and recurse into children.
    fn handle(&self, old: &CompilerNode, new: &CompilerNode, ctx: &ReconcileCtx) -> CoreResult<()>;
}

fn rebind(old: &CompilerNode, new: &CompilerNode, ctx: &ReconcileCtx) -> CoreResult<()> {
    let existing = ctx.container.factory.borrow().peek(old);
    if let Some(node) = existing {
        ctx.container.factory.borrow_mut().replace_compiler_node(&node, new.clone())?;
    }
    Ok(())
}

/// Drops the cache entry (and, transitively, those of its descendants) for
/// an old node that has no counterpart in the new tree. Does not require a
/// live wrapper to exist for every node — a no-op cache removal is cheap.
fn evict_subtree(old: &CompilerNode, ctx: &ReconcileCtx) {
    let existing = ctx.container.factory.borrow().peek(old);
    if let Some(node) = existing {
        tracing::trace!(kind = ?old.kind(), "evict_subtree: disposing wrapper with no match in new tree");
        let _ = node.dispose_only_this();
    }
    for child in old.children() {
        evict_subtree(&child, ctx);
    }
}

struct StraightReplacementHandler;

impl NodeHandler for StraightReplacementHandler {
    fn handle(&self, old: &CompilerNode, new: &CompilerNode, ctx: &ReconcileCtx) -> CoreResult<()> {
        rebind(old, new, ctx)?;
        let old_children = old.children();
        let new_children = new.children();
        reconcile_children(&old_children, &new_children, ctx)
    }
}

struct ChildIndexHandler;

impl NodeHandler for ChildIndexHandler {
    fn handle(&self, old: &CompilerNode, new: &CompilerNode, ctx: &ReconcileCtx) -> CoreResult<()> {
        rebind(old, new, ctx)?;
        let old_children = old.children();
        let new_children = new.children();
        reconcile_children(&old_children, &new_children, ctx)
    }
}

/// If `old` is a kind that a manipulation method may unwrap, the inner
/// `SyntaxList` whose children become its replacement — what a matching
/// attempt should search for instead of `old` itself.
fn unwrappable_list(old: &CompilerNode) -> Option<CompilerNode> {
    if old.kind() != crate::syntax_kind::SyntaxKind::NamespaceDeclaration {
        return None;
    }
    let body = old.children().into_iter().nth(3)?; // ModuleBlock
    body.children().into_iter().nth(1) // its SyntaxList
}

/// Disposes every wrapper in `node`'s subtree (including `node` itself),
/// except `list` and `list`'s own descendants — those compete for a match
/// against the new tree instead, so they must survive long enough for
/// `match_one`/`evict_subtree` to decide their fate individually. `list`
/// itself has no further use once its children are re-hosted, so its own
/// wrapper (if any) is disposed here with `disposeOnlyThis` semantics: its
/// cache entry is dropped without touching its children's entries.
fn dispose_unwrapped_except_list(node: &CompilerNode, list: &CompilerNode, ctx: &ReconcileCtx) {
    if let Some(wrapper) = ctx.container.factory.borrow().peek(node) {
        let _ = wrapper.dispose_only_this();
    }
    if node == list {
        return;
    }
    for child in node.children() {
        dispose_unwrapped_except_list(&child, list, ctx);
    }
}

/// Handles an old child that matched no new child by kind: if it is a
/// container a manipulation method is documented to unwrap, its own
/// children compete for a match against the same candidate pool instead of
/// being evicted wholesale.
struct UnwrapParentHandler;

impl UnwrapParentHandler {
    fn handle(&self, old: &CompilerNode, new_children: &[CompilerNode], consumed: &mut [bool], ctx: &ReconcileCtx) -> CoreResult<bool> {
        let Some(list) = unwrappable_list(old) else {
            return Ok(false);
        };
        let hoisted = list.children();

        dispose_unwrapped_except_list(old, &list, ctx);

        for inner in &hoisted {
            match_one(inner, new_children, consumed, ctx)?;
        }
        Ok(true)
    }
}

fn match_one(old: &CompilerNode, new_children: &[CompilerNode], consumed: &mut [bool], ctx: &ReconcileCtx) -> CoreResult<()> {
    for (idx, new) in new_children.iter().enumerate() {
        if !consumed[idx] && new.kind() == old.kind() {
            consumed[idx] = true;
            return ChildIndexHandler.handle(old, new, ctx);
        }
    }
    if !UnwrapParentHandler.handle(old, new_children, consumed, ctx)? {
        evict_subtree(old, ctx);
    }
    Ok(())
}

/// Aligns two child sequences and reconciles each matched pair. Equal
/// length and kind-for-kind: the straight case. Otherwise: a greedy
/// left-to-right scan that pairs same-kind nodes in order, which is exactly
/// right for the common single insertion/removal and a reasonable
/// approximation for anything stranger.
fn reconcile_children(old_children: &[CompilerNode], new_children: &[CompilerNode], ctx: &ReconcileCtx) -> CoreResult<()> {
    if old_children.len() == new_children.len() && old_children.iter().zip(new_children).all(|(o, n)| o.kind() == n.kind()) {
        let handler = StraightReplacementHandler;
        for (o, n) in old_children.iter().zip(new_children) {
            handler.handle(o, n, ctx)?;
        }
        return Ok(());
    }

    let mut consumed = vec![false; new_children.len()];
    for old in old_children {
        match_one(old, new_children, &mut consumed, ctx)?;
    }
    // New children with no old counterpart need no action: the first
    // navigation that reaches them creates a fresh wrapper lazily.
    Ok(())
}

/// Entry point used after every reparse (§4.4's planner hands off here).
pub(crate) fn reconcile(old_root: &CompilerNode, new_root: &CompilerNode, container: &Rc<GlobalContainer>, _source_file: &Rc<SourceFileShared>) -> CoreResult<()> {
    if old_root.kind() != new_root.kind() {
        tracing::debug!(old = ?old_root.kind(), new = ?new_root.kind(), "reconcile: root kind mismatch");
        return Err(CoreError::TreeReplacementError(format!(
            "root kind changed from {:?} to {:?}",
            old_root.kind(),
            new_root.kind()
        )));
    }
    let ctx = ReconcileCtx { container };
    let result = StraightReplacementHandler.handle(old_root, new_root, &ctx);
    tracing::trace!(ok = result.is_ok(), "reconcile: done");
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::global_container::GlobalContainer;
    use crate::settings::ManipulationSettings;
    use crate::source_file::SourceFileShared;
    use std::cell::RefCell;

    fn container() -> Rc<GlobalContainer> {
        GlobalContainer::new(ManipulationSettings::default(), Rc::new(crate::fs_host::InMemoryFileSystemHost::new()))
    }

    #[test]
    fn rebinds_identical_shape_after_whitespace_edit() {
        let container = container();
        let shared = Rc::new(SourceFileShared {
            text: RefCell::new("class A {}".to_string()),
            file_path: RefCell::new("a.ts".to_string()),
        });
        let old_root = crate::compiler::parse_source_file("class A {}");
        let class_decl_old = old_root.children()[0].children()[0].clone();
        let wrapper = container
            .factory
            .borrow_mut()
            .get_node_from_compiler_node(&class_decl_old, &shared, &Rc::downgrade(&container));

        let new_root = crate::compiler::parse_source_file("class A  {}");
        reconcile(&old_root, &new_root, &container, &shared).unwrap();

        assert!(!wrapper.is_disposed());
        assert_eq!(wrapper.kind().unwrap(), crate::syntax_kind::SyntaxKind::ClassDeclaration);
    }

    #[test]
    fn unwrap_preserves_inner_statement_identity() {
        let container = container();
        let text = "namespace N {\n    const x = 1;\n}";
        let shared = Rc::new(SourceFileShared {
            text: RefCell::new(text.to_string()),
            file_path: RefCell::new("a.ts".to_string()),
        });
        let old_root = crate::compiler::parse_source_file(text);
        let namespace_decl = old_root.children()[0].children()[0].clone();
        let module_block = namespace_decl.children()[3].clone();
        let inner_list = module_block.children()[1].clone();
        let var_stmt_old = inner_list.children()[0].clone();
        let wrapper = container
            .factory
            .borrow_mut()
            .get_node_from_compiler_node(&var_stmt_old, &shared, &Rc::downgrade(&container));

        let new_root = crate::compiler::parse_source_file("const x = 1;\n");
        reconcile(&old_root, &new_root, &container, &shared).unwrap();

        assert!(!wrapper.is_disposed());
        assert_eq!(wrapper.kind().unwrap(), crate::syntax_kind::SyntaxKind::VariableStatement);
    }
}
