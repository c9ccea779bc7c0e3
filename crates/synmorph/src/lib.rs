//! A navigable, mutable wrapper layer over an immutable syntax-tree
//! compiler frontend.
//!
//! The frontend (lexer, parser, arena tree — [`compiler`]) is treated as an
//! external, swappable dependency: it never mutates a tree in place, and a
//! reparse produces an entirely new one. Everything else in this crate
//! exists to hide that from callers. A [`Node`] is a cache-backed handle
//! that survives reparses; editing a [`SourceFile`] replaces its text,
//! reparses, and runs the reconciler so existing `Node`s migrate onto the
//! new tree instead of going stale.
//!
//! ```
//! use synmorph::{GlobalContainer, ManipulationSettings};
//! use synmorph::fs_host::InMemoryFileSystemHost;
//! use synmorph::wrappers::ClassDeclaration;
//! use std::rc::Rc;
//!
//! let container = GlobalContainer::new(ManipulationSettings::default(), Rc::new(InMemoryFileSystemHost::new()));
//! let source = synmorph::SourceFile::from_parts("a.ts", "class A {}", &container);
//! let root = source.as_node().unwrap();
//! let class_decl = ClassDeclaration::try_from(
//!     root.get_first_child_by_kind(synmorph::SyntaxKind::ClassDeclaration).unwrap().unwrap(),
//! ).unwrap();
//! class_decl.set_is_exported(true).unwrap();
//! assert_eq!(source.get_full_text(), "export class A {}");
//! ```

pub mod compiler;
mod edit_planner;
mod errors;
pub mod fs_host;
mod global_container;
mod position;
mod reconciler;
mod settings;
mod source_file;
mod span;
mod syntax_kind;
mod wrapper;
pub mod wrappers;

mod factory;
mod project;

pub use errors::{CoreError, CoreResult};
pub use global_container::GlobalContainer;
pub use project::Project;
pub use settings::{ManipulationSettings, NewLineKind};
pub use source_file::SourceFile;
pub use span::Span;
pub use syntax_kind::SyntaxKind;
pub use wrapper::{DescendantsIter, Node};
