//! A minimal recursive-descent parser over [`super::lexer`]'s token stream.
//!
//! Produces the arena tree described in [`super::node`]. Every multi-child
//! construct goes through [`Builder::finish_list`] so that variable-length
//! sequences — class members, statements, call arguments, parameter lists —
//! are grouped under a `SyntaxList`, matching §3's "groups variable-length
//! child sequences as a single structural child" invariant, commas and all
//! (a `SyntaxList` for a comma-separated sequence includes the comma tokens
//! as children, the same as the node shape a real compiler front end emits).

use std::cell::Cell;
use std::rc::Rc;

use super::lexer::{tokenize, Token};
use super::node::{CompilerNode, NodeData, NodeId, Tree};
use crate::syntax_kind::SyntaxKind;

struct Builder {
    tokens: Vec<Token>,
    idx: usize,
    nodes: Vec<NodeData>,
    text_len: u32,
}

impl Builder {
    fn current(&self) -> Option<SyntaxKind> {
        self.tokens.get(self.idx).map(|t| t.kind)
    }

    fn at_end(&self) -> bool {
        self.idx >= self.tokens.len()
    }

    /// Offset immediately before token `idx`: the end of the previous
    /// token, or 0 at the start of the file. Trivia between tokens is never
    /// materialized as its own node — it is recovered on demand by
    /// `CompilerNode::get_start`.
    fn pos_before(&self, idx: usize) -> u32 {
        if idx == 0 {
            0
        } else {
            self.tokens[idx - 1].end
        }
    }

    fn finish(&mut self, kind: SyntaxKind, pos: u32, end: u32, children: Vec<NodeId>) -> NodeId {
        let id = self.nodes.len() as NodeId;
        self.nodes.push(NodeData {
            kind,
            pos: Cell::new(pos),
            end: Cell::new(end),
            parent: None,
            children: children.clone(),
        });
        for child in children {
            self.nodes[child as usize].parent = Some(id);
        }
        id
    }

    fn finish_list(&mut self, start_idx: usize, children: Vec<NodeId>) -> NodeId {
        let pos = self.pos_before(start_idx);
        let end = children.last().map_or(pos, |&last| self.nodes[last as usize].end.get());
        self.finish(SyntaxKind::SyntaxList, pos, end, children)
    }

    /// Consume the current token verbatim as a leaf node. If input is
    /// truncated, synthesizes a zero-width node at end-of-file rather than
    /// panicking — malformed/incomplete input is not this parser's concern
    /// (§1: the frontend is out of scope; this one just needs to not crash).
    fn consume_leaf(&mut self) -> NodeId {
        match self.tokens.get(self.idx).copied() {
            Some(tok) => {
                let pos = self.pos_before(self.idx);
                self.idx += 1;
                self.finish(tok.kind, pos, tok.end, vec![])
            }
            None => self.finish(SyntaxKind::Unknown, self.text_len, self.text_len, vec![]),
        }
    }

    fn node_pos(&self, id: NodeId) -> u32 {
        self.nodes[id as usize].pos.get()
    }

    fn node_end(&self, id: NodeId) -> u32 {
        self.nodes[id as usize].end.get()
    }

    fn parse_statement_list_until(&mut self, stop: SyntaxKind) -> Vec<NodeId> {
        let mut stmts = Vec::new();
        while !self.at_end() && self.current() != Some(stop) {
            stmts.push(self.parse_statement());
        }
        stmts
    }

    fn parse_statement(&mut self) -> NodeId {
        let decorators = self.parse_decorator_list();
        let modifiers = self.parse_modifier_list();

        match self.current() {
            Some(SyntaxKind::ClassKeyword) => self.parse_class_declaration(decorators, modifiers),
            Some(SyntaxKind::ConstKeyword | SyntaxKind::LetKeyword | SyntaxKind::VarKeyword) => {
                self.parse_variable_statement(modifiers)
            }
            Some(SyntaxKind::NamespaceKeyword) => self.parse_namespace_declaration(modifiers),
            _ => {
                // No statement form recognized; consume one token so the
                // caller always makes progress.
                let leaf = self.consume_leaf();
                let pos = self.node_pos(decorators).min(self.node_pos(leaf));
                let end = self.node_end(leaf);
                self.finish(SyntaxKind::Unknown, pos, end, vec![decorators, modifiers, leaf])
            }
        }
    }

    fn parse_decorator_list(&mut self) -> NodeId {
        let start_idx = self.idx;
        let mut children = Vec::new();
        while self.current() == Some(SyntaxKind::AtToken) {
            children.push(self.parse_decorator());
        }
        self.finish_list(start_idx, children)
    }

    fn parse_decorator(&mut self) -> NodeId {
        let at_idx = self.idx;
        let at_token = self.consume_leaf();
        let expr = self.parse_decorator_expression();
        let pos = self.pos_before(at_idx);
        let end = self.node_end(expr);
        self.finish(SyntaxKind::Decorator, pos, end, vec![at_token, expr])
    }

    fn parse_decorator_expression(&mut self) -> NodeId {
        let ident = self.consume_leaf();
        if self.current() == Some(SyntaxKind::OpenParenToken) {
            self.parse_call_expression(ident)
        } else {
            ident
        }
    }

    fn parse_modifier_list(&mut self) -> NodeId {
        let start_idx = self.idx;
        let mut children = Vec::new();
        while self.current() == Some(SyntaxKind::ExportKeyword) {
            children.push(self.consume_leaf());
        }
        self.finish_list(start_idx, children)
    }

    fn parse_class_declaration(&mut self, decorators: NodeId, modifiers: NodeId) -> NodeId {
        let class_keyword = self.consume_leaf();
        let name = self.consume_leaf();
        let open_brace = self.consume_leaf();

        let members_start = self.idx;
        let mut members = Vec::new();
        while !self.at_end() && self.current() != Some(SyntaxKind::CloseBraceToken) {
            members.push(self.parse_class_member());
        }
        let members_list = self.finish_list(members_start, members);
        let close_brace = self.consume_leaf();

        let pos = self.node_pos(decorators);
        let end = self.node_end(close_brace);
        self.finish(
            SyntaxKind::ClassDeclaration,
            pos,
            end,
            vec![decorators, modifiers, class_keyword, name, open_brace, members_list, close_brace],
        )
    }

    fn parse_class_member(&mut self) -> NodeId {
        let name = self.consume_leaf();

        if self.current() == Some(SyntaxKind::OpenParenToken) {
            let open_paren = self.consume_leaf();
            let params_start = self.idx;
            let mut params = Vec::new();
            while !self.at_end() && self.current() != Some(SyntaxKind::CloseParenToken) {
                params.push(self.parse_parameter());
                if self.current() == Some(SyntaxKind::CommaToken) {
                    params.push(self.consume_leaf());
                } else {
                    break;
                }
            }
            let params_list = self.finish_list(params_start, params);
            let close_paren = self.consume_leaf();
            let body = self.parse_block();

            let pos = self.node_pos(name);
            let end = self.node_end(body);
            return self.finish(
                SyntaxKind::MethodDeclaration,
                pos,
                end,
                vec![name, open_paren, params_list, close_paren, body],
            );
        }

        let mut children = vec![name];
        if self.current() == Some(SyntaxKind::EqualsToken) {
            children.push(self.consume_leaf());
            children.push(self.parse_expression());
        }
        if self.current() == Some(SyntaxKind::SemicolonToken) {
            children.push(self.consume_leaf());
        }
        let pos = self.node_pos(name);
        let end = self.node_end(*children.last().unwrap());
        self.finish(SyntaxKind::PropertyDeclaration, pos, end, children)
    }

    fn parse_parameter(&mut self) -> NodeId {
        let name = self.consume_leaf();
        let pos = self.node_pos(name);
        let end = self.node_end(name);
        self.finish(SyntaxKind::Parameter, pos, end, vec![name])
    }

    fn parse_block(&mut self) -> NodeId {
        let open_brace = self.consume_leaf();
        let start_idx = self.idx;
        let stmts = self.parse_statement_list_until(SyntaxKind::CloseBraceToken);
        let list = self.finish_list(start_idx, stmts);
        let close_brace = self.consume_leaf();

        let pos = self.node_pos(open_brace);
        let end = self.node_end(close_brace);
        self.finish(SyntaxKind::Block, pos, end, vec![open_brace, list, close_brace])
    }

    fn parse_variable_statement(&mut self, modifiers: NodeId) -> NodeId {
        let keyword = self.consume_leaf();

        let decls_start = self.idx;
        let mut decls = vec![self.parse_variable_declaration()];
        while self.current() == Some(SyntaxKind::CommaToken) {
            decls.push(self.consume_leaf());
            decls.push(self.parse_variable_declaration());
        }
        let decls_list = self.finish_list(decls_start, decls);

        let decl_list_pos = self.node_pos(keyword);
        let decl_list_end = self.node_end(decls_list);
        let decl_list_node = self.finish(
            SyntaxKind::VariableDeclarationList,
            decl_list_pos,
            decl_list_end,
            vec![keyword, decls_list],
        );

        let mut children = vec![modifiers, decl_list_node];
        if self.current() == Some(SyntaxKind::SemicolonToken) {
            children.push(self.consume_leaf());
        }
        let pos = self.node_pos(modifiers);
        let end = self.node_end(*children.last().unwrap());
        self.finish(SyntaxKind::VariableStatement, pos, end, children)
    }

    fn parse_variable_declaration(&mut self) -> NodeId {
        let name = self.consume_leaf();
        let mut children = vec![name];
        if self.current() == Some(SyntaxKind::EqualsToken) {
            children.push(self.consume_leaf());
            children.push(self.parse_expression());
        }
        let pos = self.node_pos(name);
        let end = self.node_end(*children.last().unwrap());
        self.finish(SyntaxKind::VariableDeclaration, pos, end, children)
    }

    fn parse_expression(&mut self) -> NodeId {
        match self.current() {
            Some(SyntaxKind::Identifier) => {
                let ident = self.consume_leaf();
                if self.current() == Some(SyntaxKind::OpenParenToken) {
                    self.parse_call_expression(ident)
                } else {
                    ident
                }
            }
            _ => self.consume_leaf(),
        }
    }

    fn parse_call_expression(&mut self, callee: NodeId) -> NodeId {
        let open_paren = self.consume_leaf();
        let args_start = self.idx;
        let mut args = Vec::new();
        while !self.at_end() && self.current() != Some(SyntaxKind::CloseParenToken) {
            args.push(self.parse_expression());
            if self.current() == Some(SyntaxKind::CommaToken) {
                args.push(self.consume_leaf());
            } else {
                break;
            }
        }
        let args_list = self.finish_list(args_start, args);
        let close_paren = self.consume_leaf();

        let pos = self.node_pos(callee);
        let end = self.node_end(close_paren);
        self.finish(SyntaxKind::CallExpression, pos, end, vec![callee, open_paren, args_list, close_paren])
    }

    fn parse_namespace_declaration(&mut self, modifiers: NodeId) -> NodeId {
        let keyword = self.consume_leaf();
        let name = self.consume_leaf();
        let body = self.parse_module_block();

        let pos = self.node_pos(modifiers);
        let end = self.node_end(body);
        self.finish(SyntaxKind::NamespaceDeclaration, pos, end, vec![modifiers, keyword, name, body])
    }

    fn parse_module_block(&mut self) -> NodeId {
        let open_brace = self.consume_leaf();
        let start_idx = self.idx;
        let stmts = self.parse_statement_list_until(SyntaxKind::CloseBraceToken);
        let list = self.finish_list(start_idx, stmts);
        let close_brace = self.consume_leaf();

        let pos = self.node_pos(open_brace);
        let end = self.node_end(close_brace);
        self.finish(SyntaxKind::ModuleBlock, pos, end, vec![open_brace, list, close_brace])
    }
}

/// Parse `text` into a fresh, immutable [`CompilerNode`] tree rooted at a
/// `SourceFile` node.
#[must_use]
pub fn parse_source_file(text: &str) -> CompilerNode {
    let tokens = tokenize(text);
    let text_len = u32::try_from(text.len()).unwrap_or(u32::MAX);
    let mut builder = Builder { tokens, idx: 0, nodes: Vec::new(), text_len };

    let start_idx = builder.idx;
    let stmts = builder.parse_statement_list_until(SyntaxKind::Unknown /* never matches: parse to EOF */);
    let stmt_list = builder.finish_list(start_idx, stmts);
    let root = builder.finish(SyntaxKind::SourceFile, 0, text_len, vec![stmt_list]);

    let tree = Rc::new(Tree { nodes: builder.nodes, root });
    CompilerNode::root(tree)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_empty_class() {
        let root = parse_source_file("class A {}");
        assert_eq!(root.kind(), SyntaxKind::SourceFile);
        let stmt_list = &root.children()[0];
        assert_eq!(stmt_list.kind(), SyntaxKind::SyntaxList);
        let class_decl = &stmt_list.children()[0];
        assert_eq!(class_decl.kind(), SyntaxKind::ClassDeclaration);
        assert_eq!(class_decl.pos(), 0);
        assert_eq!(class_decl.end(), 10);
    }

    #[test]
    fn decorator_precedes_class_as_its_own_node() {
        let text = "@dec\nclass A {}";
        let root = parse_source_file(text);
        let class_decl = &root.children()[0].children()[0];
        assert_eq!(class_decl.kind(), SyntaxKind::ClassDeclaration);
        let decorators = &class_decl.children()[0];
        assert_eq!(decorators.kind(), SyntaxKind::SyntaxList);
        assert_eq!(decorators.children().len(), 1);
        assert_eq!(decorators.children()[0].kind(), SyntaxKind::Decorator);
        assert_eq!(decorators.children()[0].get_text(text), "@dec");
    }

    #[test]
    fn namespace_wraps_a_module_block() {
        let text = "namespace N {\n    const x = 1;\n}";
        let root = parse_source_file(text);
        let ns = &root.children()[0].children()[0];
        assert_eq!(ns.kind(), SyntaxKind::NamespaceDeclaration);
    }
}
