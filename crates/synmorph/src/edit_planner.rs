//! Turns a manipulation request into a text splice plus a reparse +
//! reconcile, through [`crate::source_file::SourceFile::apply_text_change`]
//! (§4.4). The kind-specific wrapper methods in [`crate::wrappers`] are
//! thin callers of the functions below; none of them touch `SourceFile`
//! directly.

use crate::errors::CoreResult;
use crate::wrapper::Node;

fn apply(node: &Node, start: u32, end: u32, text: &str) -> CoreResult<()> {
    node.get_source_file().apply_text_change(start, end, text)
}

/// Inserts `text` at `pos` without removing anything.
pub(crate) fn insert_text(node: &Node, pos: u32, text: &str) -> CoreResult<()> {
    apply(node, pos, pos, text)
}

/// Replaces a node's trivia-less span (`getStart()..getEnd()`) with
/// `new_text`, leaving its leading whitespace/comments untouched.
pub(crate) fn replace_node_text(node: &Node, new_text: &str) -> CoreResult<()> {
    let start = node.get_start()?;
    let end = node.get_end()?;
    apply(node, start, end, new_text)
}

/// Removes a node's full span (`getPos()..getEnd()`, trivia included) and
/// then eats one trailing newline plus the indentation that followed it, so
/// removing a whole line doesn't leave a blank one behind.
pub(crate) fn remove_node(node: &Node) -> CoreResult<()> {
    let pos = node.get_pos()?;
    let mut end = node.get_end()?;
    {
        let source = node.get_source_file();
        let text = source.get_full_text();
        let bytes = text.as_bytes();
        let mut i = end as usize;
        if i < bytes.len() && bytes[i] == b'\r' {
            i += 1;
        }
        if i < bytes.len() && bytes[i] == b'\n' {
            i += 1;
            while i < bytes.len() && (bytes[i] == b' ' || bytes[i] == b'\t') {
                i += 1;
            }
            end = i as u32;
        }
    }
    apply(node, pos, end, "")
}

/// Removes the contiguous run `[first, last]` (inclusive) as a single
/// splice, so intermediate wrappers aren't individually reconciled against
/// a half-removed sibling list.
pub(crate) fn remove_node_range(first: &Node, last: &Node) -> CoreResult<()> {
    let pos = first.get_pos()?;
    let mut end = last.get_end()?;
    {
        let source = last.get_source_file();
        let text = source.get_full_text();
        let bytes = text.as_bytes();
        let mut i = end as usize;
        if i < bytes.len() && bytes[i] == b'\r' {
            i += 1;
        }
        if i < bytes.len() && bytes[i] == b'\n' {
            i += 1;
            while i < bytes.len() && (bytes[i] == b' ' || bytes[i] == b'\t') {
                i += 1;
            }
            end = i as u32;
        }
    }
    apply(first, pos, end, "")
}

/// Inserts `new_item_text` as a new element of `parent`'s child syntax
/// list at `child_index` (clamped to the list length), formatted onto its
/// own line with the surrounding indentation and newline settings.
pub(crate) fn insert_into_parent(parent: &Node, child_index: usize, new_item_text: &str) -> CoreResult<()> {
    let list = parent
        .get_child_syntax_list()?
        .unwrap_or_else(|| parent.clone());
    let children = list.get_children()?;
    let index = child_index.min(children.len());

    let indentation = if let Some(sibling) = children.first() {
        sibling.get_indentation_text()?
    } else {
        let settings = parent.container()?.settings();
        settings.indentation_text.clone()
    };
    let new_line = parent.container()?.settings().get_new_line_text().to_string();

    let formatted = format!("{new_line}{indentation}{new_item_text}");

    let pos = match children.get(index) {
        Some(at) => at.get_pos()?,
        None => list.get_end()?,
    };
    apply(parent, pos, pos, &formatted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::global_container::GlobalContainer;
    use crate::settings::ManipulationSettings;
    use crate::source_file::SourceFile;
    use crate::syntax_kind::SyntaxKind;
    use std::rc::Rc;

    fn parse(text: &str) -> (Rc<GlobalContainer>, SourceFile) {
        let container = GlobalContainer::new(ManipulationSettings::default(), Rc::new(crate::fs_host::InMemoryFileSystemHost::new()));
        let source = SourceFile::from_parts("a.ts", text, &container);
        (container, source)
    }

    #[test]
    fn replace_node_text_swaps_identifier() {
        let (_container, source) = parse("class Old {}");
        let root = source.as_node().unwrap();
        let class_decl = root.get_first_child_by_kind(SyntaxKind::ClassDeclaration).unwrap().unwrap();
        let ident = class_decl.get_first_child_by_kind(SyntaxKind::Identifier).unwrap().unwrap();
        replace_node_text(&ident, "New").unwrap();
        assert!(source.get_full_text().contains("class New"));
    }

    #[test]
    fn remove_node_eats_trailing_newline() {
        let (_container, source) = parse("@deco\nclass A {}");
        let root = source.as_node().unwrap();
        let class_decl = root.get_first_child_by_kind(SyntaxKind::ClassDeclaration).unwrap().unwrap();
        let deco = class_decl.get_first_child_by_kind(SyntaxKind::Decorator).unwrap().unwrap();
        remove_node(&deco).unwrap();
        assert_eq!(source.get_full_text(), "class A {}");
    }
}
