//! The wrapper cache (§4.2): a bijection between live `CompilerNode`s and
//! `Node` wrappers, scoped to one `GlobalContainer`.
//!
//! Creation selects a wrapper subclass by compiler-node kind from a fixed
//! dispatch table (§9 "Variant dispatch over syntax kinds"). In this crate
//! every kind shares one physical representation (`Node`); the "subclass"
//! is a kind-specialized *view* obtained at the call boundary (see
//! [`crate::wrappers`]), not a distinct allocation — so the dispatch table
//! collapses to "always build a `Node`", and unknown kinds fall out of that
//! naturally rather than needing a runtime error.

use rustc_hash::FxHashMap;
use std::rc::{Rc, Weak};

use crate::compiler::CompilerNode;
use crate::errors::{CoreError, CoreResult};
use crate::global_container::GlobalContainer;
use crate::source_file::SourceFileShared;
use crate::wrapper::Node;

#[derive(Default)]
pub(crate) struct Factory {
    cache: FxHashMap<CompilerNode, Node>,
}

impl Factory {
    pub(crate) fn new() -> Self {
        Factory { cache: FxHashMap::default() }
    }

    /// The unique wrapper for `cn`; creates one on cache miss.
    pub(crate) fn get_node_from_compiler_node(
        &mut self,
        cn: &CompilerNode,
        source_file: &Rc<SourceFileShared>,
        container: &Weak<GlobalContainer>,
    ) -> Node {
        if let Some(existing) = self.cache.get(cn) {
            return existing.clone();
        }
        let node = Node::new(cn.clone(), source_file.clone(), container.clone());
        self.cache.insert(cn.clone(), node.clone());
        node
    }

    /// Deletes `w`'s cache entry; a no-op if it is already absent.
    pub(crate) fn remove_node_from_cache(&mut self, cn: &CompilerNode) {
        self.cache.remove(cn);
    }

    /// Looks up a cached wrapper without creating one on a miss. Used by
    /// the reconciler, which only needs to touch nodes that already have a
    /// live wrapper — everything else is resolved lazily on next access.
    pub(crate) fn peek(&self, cn: &CompilerNode) -> Option<Node> {
        self.cache.get(cn).cloned()
    }

    /// Renames `old`'s cache entry to `new`, keeping the same wrapper.
    /// Fails with `InvalidOperation` if `old` has no entry — renaming a key
    /// that was never inserted (or was already evicted) is a caller bug,
    /// not a silent no-op.
    fn replace_key(&mut self, old: &CompilerNode, new: CompilerNode) -> CoreResult<Node> {
        let node = self
            .cache
            .remove(old)
            .ok_or_else(|| CoreError::InvalidOperation("no cache entry for the given key".to_string()))?;
        self.cache.insert(new, node.clone());
        Ok(node)
    }

    /// Atomically: drop `node`'s old cache entry, rebind its internal
    /// pointer, insert the new entry. Fails if `node` is already disposed
    /// (nothing to rebind) or if `new_cn` is already mapped to a
    /// *different* wrapper — the latter indicates a reconciler bug (two
    /// wrappers racing to claim the same new node).
    pub(crate) fn replace_compiler_node(&mut self, node: &Node, new_cn: CompilerNode) -> CoreResult<()> {
        if let Some(existing) = self.cache.get(&new_cn) {
            if !Rc::ptr_eq(&existing.0, &node.0) {
                return Err(CoreError::InvalidOperation(
                    "compiler node already mapped to a different wrapper".to_string(),
                ));
            }
        }

        let old_cn = node
            .0
            .compiler_node
            .borrow()
            .clone()
            .ok_or_else(CoreError::disposed_node)?;
        self.replace_key(&old_cn, new_cn.clone())?;
        *node.0.compiler_node.borrow_mut() = Some(new_cn);
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::global_container::GlobalContainer;
    use crate::settings::ManipulationSettings;
    use std::cell::RefCell;

    #[test]
    fn same_compiler_node_yields_the_same_wrapper() {
        let container = GlobalContainer::new(ManipulationSettings::default(), Rc::new(crate::fs_host::InMemoryFileSystemHost::new()));
        let shared = Rc::new(SourceFileShared {
            text: RefCell::new("class A {}".to_string()),
            file_path: RefCell::new("a.ts".to_string()),
        });
        let root = crate::compiler::parse_source_file("class A {}");
        let weak = Rc::downgrade(&container);

        let mut factory = Factory::new();
        let a = factory.get_node_from_compiler_node(&root, &shared, &weak);
        let b = factory.get_node_from_compiler_node(&root, &shared, &weak);
        assert_eq!(a, b);
        assert_eq!(factory.len(), 1);
    }

    #[test]
    fn replace_key_moves_the_wrapper_to_the_new_key() {
        let container = GlobalContainer::new(ManipulationSettings::default(), Rc::new(crate::fs_host::InMemoryFileSystemHost::new()));
        let shared = Rc::new(SourceFileShared {
            text: RefCell::new("class A {}".to_string()),
            file_path: RefCell::new("a.ts".to_string()),
        });
        let weak = Rc::downgrade(&container);
        let k1 = crate::compiler::parse_source_file("class A {}");
        let k2 = crate::compiler::parse_source_file("class B {}");

        let mut factory = Factory::new();
        let original = factory.get_node_from_compiler_node(&k1, &shared, &weak);
        let renamed = factory.replace_key(&k1, k2.clone()).unwrap();
        assert_eq!(original, renamed);
        assert!(factory.peek(&k1).is_none());
        assert_eq!(factory.peek(&k2), Some(original));
    }

    #[test]
    fn replace_key_on_a_missing_key_fails() {
        let mut factory = Factory::new();
        let k1 = crate::compiler::parse_source_file("class A {}");
        let k2 = crate::compiler::parse_source_file("class B {}");
        assert!(factory.replace_key(&k1, k2).is_err());
    }
}
