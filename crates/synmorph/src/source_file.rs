//! The root orchestration object for one parsed file (§4.6): owns the live
//! text, hands edits to the reconciler, and persists through the
//! filesystem host.

use std::cell::RefCell;
use std::rc::Rc;

use crate::errors::{CoreError, CoreResult};
use crate::global_container::GlobalContainer;
use crate::reconciler;
use crate::wrapper::Node;

pub(crate) struct SourceFileShared {
    pub(crate) text: RefCell<String>,
    pub(crate) file_path: RefCell<String>,
}

/// A handle to a parsed file. Cheap to clone; every clone shares the same
/// underlying text buffer and root wrapper.
#[derive(Clone)]
pub struct SourceFile {
    shared: Rc<SourceFileShared>,
    root: Option<Node>,
}

impl SourceFile {
    pub(crate) fn new(shared: Rc<SourceFileShared>, root: Node) -> Self {
        SourceFile { shared, root: Some(root) }
    }

    /// Built when the owning `GlobalContainer` has already been dropped;
    /// carries the last-known text but cannot navigate or edit.
    pub(crate) fn detached(shared: Rc<SourceFileShared>) -> Self {
        SourceFile { shared, root: None }
    }

    /// Parses `text` as `path` and wraps it in a fresh `SourceFile` scoped
    /// to `container`. Most callers reach this through
    /// [`crate::Project::create_source_file`] instead.
    #[must_use]
    pub fn from_parts(path: impl Into<String>, text: impl Into<String>, container: &Rc<GlobalContainer>) -> Self {
        let shared = Rc::new(SourceFileShared {
            text: RefCell::new(text.into()),
            file_path: RefCell::new(path.into()),
        });
        let source_text = shared.text.borrow().clone();
        let tree_root = crate::compiler::parse_source_file(&source_text);
        let root = container
            .factory
            .borrow_mut()
            .get_node_from_compiler_node(&tree_root, &shared, &Rc::downgrade(container));
        SourceFile { shared, root: Some(root) }
    }

    #[must_use]
    pub fn get_file_path(&self) -> String {
        self.shared.file_path.borrow().clone()
    }

    #[must_use]
    pub fn get_full_text(&self) -> String {
        self.shared.text.borrow().clone()
    }

    pub fn as_node(&self) -> CoreResult<Node> {
        self.root.clone().ok_or_else(|| CoreError::InvalidOperation("source file's container has been dropped".to_string()))
    }

    /// Splices `new_text` into `[start, end)`, reparses, and reconciles the
    /// old and new trees so existing wrappers survive (§4.4, §4.5).
    #[tracing::instrument(level = "debug", skip(self, new_text), fields(path = %self.get_file_path()))]
    pub fn apply_text_change(&self, start: u32, end: u32, new_text: &str) -> CoreResult<()> {
        let root = self.as_node()?;
        let container = root.container()?;
        let old_root_cn = root.compiler_node()?;

        let (start, end) = (start as usize, end as usize);
        let full_new_text = {
            let mut text = self.shared.text.borrow_mut();
            if start > end || end > text.len() {
                return Err(CoreError::ArgumentError(format!(
                    "text change range [{start}, {end}) is out of bounds for a {}-byte file",
                    text.len()
                )));
            }
            text.replace_range(start..end, new_text);
            text.clone()
        };

        let new_root_cn = crate::compiler::parse_source_file(&full_new_text);

        reconciler::reconcile(&old_root_cn, &new_root_cn, &container, &self.shared)
    }

    /// Replaces the entire file contents and reconciles against the
    /// previous tree. Used when an edit is easier to express as "here is
    /// the whole new text" than as a `[start, end)` splice.
    pub fn set_full_text(&self, new_text: impl Into<String>) -> CoreResult<()> {
        let len = self.shared.text.borrow().len() as u32;
        let new_text = new_text.into();
        self.apply_text_change(0, len, &new_text)
    }

    /// Writes the current text back out through the owning container's
    /// filesystem host.
    pub fn save(&self) -> CoreResult<()> {
        let root = self.as_node()?;
        let container = root.container()?;
        let path = self.shared.file_path.borrow().clone();
        let text = self.shared.text.borrow().clone();
        container.fs_host().write_file(&path, &text)
    }
}

impl PartialEq for SourceFile {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.shared, &other.shared)
    }
}
impl Eq for SourceFile {}
