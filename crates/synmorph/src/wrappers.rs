//! Kind-specialized views over [`Node`] (§9 "variant dispatch over syntax
//! kinds"): each is a newtype constructed with a kind check at the call
//! boundary via `TryFrom`, not a distinct allocation or a subclass — the
//! underlying wrapper, and its place in the cache, is the same `Node`
//! either way.

use crate::edit_planner;
use crate::errors::{CoreError, CoreResult};
use crate::syntax_kind::SyntaxKind;
use crate::wrapper::Node;

macro_rules! kind_checked_view {
    ($name:ident, $kind:expr) => {
        #[derive(Clone)]
        pub struct $name(Node);

        impl TryFrom<Node> for $name {
            type Error = CoreError;

            fn try_from(node: Node) -> CoreResult<Self> {
                let actual = node.kind()?;
                if actual != $kind {
                    return Err(CoreError::wrong_kind($kind, actual));
                }
                Ok($name(node))
            }
        }

        impl $name {
            #[must_use]
            pub fn as_node(&self) -> &Node {
                &self.0
            }

            #[must_use]
            pub fn into_node(self) -> Node {
                self.0
            }
        }
    };
}

kind_checked_view!(ClassDeclaration, SyntaxKind::ClassDeclaration);
kind_checked_view!(MethodDeclaration, SyntaxKind::MethodDeclaration);
kind_checked_view!(PropertyDeclaration, SyntaxKind::PropertyDeclaration);
kind_checked_view!(Decorator, SyntaxKind::Decorator);
kind_checked_view!(Identifier, SyntaxKind::Identifier);
kind_checked_view!(VariableStatement, SyntaxKind::VariableStatement);
kind_checked_view!(NamespaceDeclaration, SyntaxKind::NamespaceDeclaration);

impl ClassDeclaration {
    fn modifiers_list(&self) -> CoreResult<Node> {
        self.0
            .get_children()?
            .into_iter()
            .nth(1)
            .ok_or_else(|| CoreError::InvalidOperation("class declaration is missing its modifier list".to_string()))
    }

    pub fn get_name(&self) -> CoreResult<String> {
        self.0
            .get_children()?
            .into_iter()
            .nth(3)
            .ok_or_else(|| CoreError::InvalidOperation("class declaration is missing its name".to_string()))?
            .get_text()
    }

    pub fn has_export_keyword(&self) -> CoreResult<bool> {
        for modifier in self.modifiers_list()?.get_children()? {
            if modifier.kind()? == SyntaxKind::ExportKeyword {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Adds or removes a leading `export` keyword, matching `has_export_keyword`.
    pub fn set_is_exported(&self, is_exported: bool) -> CoreResult<()> {
        let currently_exported = self.has_export_keyword()?;
        if currently_exported == is_exported {
            return Ok(());
        }
        let modifiers = self.modifiers_list()?;
        if is_exported {
            let pos = modifiers.get_pos()?;
            edit_planner::insert_text(&self.0, pos, "export ")
        } else {
            let export_keyword = modifiers
                .get_children()?
                .into_iter()
                .find(|m| m.kind().map(|k| k == SyntaxKind::ExportKeyword).unwrap_or(false))
                .ok_or_else(|| CoreError::InvalidOperation("no export keyword to remove".to_string()))?;
            edit_planner::remove_node(&export_keyword)
        }
    }

    /// Appends `method_text` (e.g. `"greet() {\n}"`, no trailing newline) as
    /// the class's last member.
    pub fn add_method(&self, method_text: &str) -> CoreResult<()> {
        let member_count = self.0.get_child_syntax_list()?.map(|l| l.get_children()).transpose()?.map(|c| c.len()).unwrap_or(0);
        edit_planner::insert_into_parent(&self.0, member_count, method_text)
    }
}

impl Decorator {
    pub fn remove(&self) -> CoreResult<()> {
        edit_planner::remove_node(&self.0)
    }

    /// The decorator's callee/name, e.g. `"deco"` for `@deco` or `@deco(1)`.
    pub fn get_name(&self) -> CoreResult<String> {
        let mut cursor = self
            .0
            .get_children()?
            .into_iter()
            .nth(1)
            .ok_or_else(|| CoreError::InvalidOperation("decorator is missing its expression".to_string()))?;
        // A call expression's first child is the callee identifier; a bare
        // decorator's expression child *is* the identifier.
        if cursor.kind()? == SyntaxKind::CallExpression {
            cursor = cursor
                .get_children()?
                .into_iter()
                .next()
                .ok_or_else(|| CoreError::InvalidOperation("decorator call is missing a callee".to_string()))?;
        }
        cursor.get_text()
    }
}

impl Identifier {
    pub fn get_text(&self) -> CoreResult<String> {
        self.0.get_text()
    }

    /// Replaces the identifier's text in place. The wrapper keeps its
    /// identity: an `Identifier` is a childless leaf, so the reconciler
    /// rebinds this exact cache entry to the reparsed node rather than
    /// disposing it.
    pub fn replace_with_text(&self, new_text: &str) -> CoreResult<()> {
        edit_planner::replace_node_text(&self.0, new_text)
    }
}

impl PropertyDeclaration {
    pub fn get_name(&self) -> CoreResult<String> {
        self.0
            .get_children()?
            .into_iter()
            .next()
            .ok_or_else(|| CoreError::InvalidOperation("property declaration is missing its name".to_string()))?
            .get_text()
    }

    pub fn remove(&self) -> CoreResult<()> {
        edit_planner::remove_node(&self.0)
    }
}

impl MethodDeclaration {
    pub fn get_name(&self) -> CoreResult<String> {
        self.0
            .get_children()?
            .into_iter()
            .next()
            .ok_or_else(|| CoreError::InvalidOperation("method declaration is missing its name".to_string()))?
            .get_text()
    }

    pub fn remove(&self) -> CoreResult<()> {
        edit_planner::remove_node(&self.0)
    }
}

impl VariableStatement {
    pub fn has_export_keyword(&self) -> CoreResult<bool> {
        let modifiers = self
            .0
            .get_children()?
            .into_iter()
            .next()
            .ok_or_else(|| CoreError::InvalidOperation("variable statement is missing its modifier list".to_string()))?;
        for modifier in modifiers.get_children()? {
            if modifier.kind()? == SyntaxKind::ExportKeyword {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

impl NamespaceDeclaration {
    pub fn get_name(&self) -> CoreResult<String> {
        self.0
            .get_children()?
            .into_iter()
            .nth(2)
            .ok_or_else(|| CoreError::InvalidOperation("namespace declaration is missing its name".to_string()))?
            .get_text()
    }

    /// Replaces `namespace N { ... }` with the text of its body's
    /// statements. Ordinary text splice plus the standard reconcile pass —
    /// the reconciler's `UnwrapParentHandler` is what keeps the hoisted
    /// statements' wrappers alive across it (see [`crate::reconciler`]).
    ///
    /// The statement list's full text carries the leading trivia between the
    /// open brace and the first statement (`finish_list`'s `pos` starts right
    /// after the brace), but not a trailing newline before the close brace
    /// (its `end` stops at the last statement). Strip that leading trivia and
    /// append one newline in its place, matching how the rest of the crate
    /// normalizes a hoisted line's trailing newline (`edit_planner::remove_node`).
    pub fn unwrap(&self) -> CoreResult<()> {
        let module_block = self
            .0
            .get_children()?
            .into_iter()
            .nth(3)
            .ok_or_else(|| CoreError::InvalidOperation("namespace declaration is missing its body".to_string()))?;
        let list = module_block
            .get_child_syntax_list()?
            .ok_or_else(|| CoreError::InvalidOperation("namespace body is missing a statement list".to_string()))?;
        let raw = list.get_full_text()?;
        let trim_start = crate::position::get_next_non_whitespace_pos(&raw, 0) as usize;
        let new_line = self.0.container()?.settings().get_new_line_text();
        let inner_text = format!("{}{new_line}", &raw[trim_start..]);
        let pos = self.0.get_pos()?;
        let end = self.0.get_end()?;
        self.0.get_source_file().apply_text_change(pos, end, &inner_text)
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

    fn first_class(source: &SourceFile) -> ClassDeclaration {
        let root = source.as_node().unwrap();
        let node = root.get_first_child_by_kind(SyntaxKind::ClassDeclaration).unwrap().unwrap();
        ClassDeclaration::try_from(node).unwrap()
    }

    #[test]
    fn toggling_export_on_adds_keyword() {
        let source = parse("class A {}");
        let class_decl = first_class(&source);
        assert!(!class_decl.has_export_keyword().unwrap());
        class_decl.set_is_exported(true).unwrap();
        assert_eq!(source.get_full_text(), "export class A {}");
    }

    #[test]
    fn toggling_export_off_removes_keyword() {
        let source = parse("export class A {}");
        let class_decl = first_class(&source);
        assert!(class_decl.has_export_keyword().unwrap());
        class_decl.set_is_exported(false).unwrap();
        assert_eq!(source.get_full_text(), " class A {}");
    }

    #[test]
    fn identifier_replace_preserves_wrapper_identity() {
        let source = parse("class Old {}");
        let class_decl = first_class(&source);
        let name_node = class_decl.as_node().get_children().unwrap().into_iter().nth(3).unwrap();
        let ident = Identifier::try_from(name_node).unwrap();
        ident.replace_with_text("New").unwrap();
        assert_eq!(source.get_full_text(), "class New {}");
        assert!(!ident.as_node().is_disposed());
        assert_eq!(ident.get_text().unwrap(), "New");
    }

    #[test]
    fn decorator_removal_drops_its_line() {
        let source = parse("@deco\nclass A {}");
        let class_decl = first_class(&source);
        let decorator_node = class_decl.as_node().get_first_child_by_kind(SyntaxKind::Decorator).unwrap().unwrap();
        let decorator = Decorator::try_from(decorator_node).unwrap();
        assert_eq!(decorator.get_name().unwrap(), "deco");
        decorator.remove().unwrap();
        assert_eq!(source.get_full_text(), "class A {}");
    }

    #[test]
    fn add_method_appends_as_last_member() {
        let source = parse("class A {\n    x;\n}");
        let class_decl = first_class(&source);
        class_decl.add_method("greet() {\n    }").unwrap();
        assert_eq!(source.get_full_text(), "class A {\n    x;\n    greet() {\n    }\n}");
    }

    #[test]
    fn namespace_unwrap_hoists_statement() {
        let source = parse("namespace N {\n    const x = 1;\n}");
        let root = source.as_node().unwrap();
        let ns_node = root.get_first_child_by_kind(SyntaxKind::NamespaceDeclaration).unwrap().unwrap();
        let inner_stmt = ns_node
            .get_descendants_of_kind(SyntaxKind::VariableStatement)
            .unwrap()
            .into_iter()
            .next()
            .unwrap();
        let ns = NamespaceDeclaration::try_from(ns_node).unwrap();
        ns.unwrap().unwrap();
        assert_eq!(source.get_full_text(), "const x = 1;\n");
        assert!(!inner_stmt.is_disposed());
        assert_eq!(inner_stmt.kind().unwrap(), SyntaxKind::VariableStatement);
    }
}
