//! Syntax kinds produced by the (intentionally minimal) compiler frontend
//! in [`crate::compiler`].
//!
//! The frontend itself is out of scope for this crate (§1) — in a real
//! deployment it would be an external service. `SyntaxKind` is the one part
//! of its surface the core genuinely depends on: navigation, the wrapper
//! dispatch table (§4.2), and the reconciler (§4.5) all match on it.

/// A stable tag for every node or token the frontend can produce.
///
/// `SyntaxList` is distinguished: it is the synthetic kind the frontend uses
/// to group variable-length child sequences (statements, members,
/// parameters) as a single structural child (§3).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum SyntaxKind {
    Unknown = 0,

    SourceFile,
    SyntaxList,

    Identifier,
    NumericLiteral,
    StringLiteral,

    // Tokens
    AtToken,
    OpenParenToken,
    CloseParenToken,
    OpenBraceToken,
    CloseBraceToken,
    CommaToken,
    EqualsToken,
    SemicolonToken,
    ExportKeyword,
    ClassKeyword,
    ConstKeyword,
    LetKeyword,
    VarKeyword,
    NamespaceKeyword,

    // Declarations / statements
    ClassDeclaration,
    MethodDeclaration,
    PropertyDeclaration,
    Parameter,
    VariableStatement,
    VariableDeclarationList,
    VariableDeclaration,
    NamespaceDeclaration,
    ModuleBlock,
    Block,

    // Expressions
    CallExpression,
    Decorator,
}

impl SyntaxKind {
    #[inline]
    #[must_use]
    pub const fn is_syntax_list(self) -> bool {
        matches!(self, SyntaxKind::SyntaxList)
    }

    /// Keyword/punctuation kinds are leaves: the frontend never gives them
    /// children.
    #[inline]
    #[must_use]
    pub const fn is_token(self) -> bool {
        matches!(
            self,
            SyntaxKind::AtToken
                | SyntaxKind::OpenParenToken
                | SyntaxKind::CloseParenToken
                | SyntaxKind::OpenBraceToken
                | SyntaxKind::CloseBraceToken
                | SyntaxKind::CommaToken
                | SyntaxKind::EqualsToken
                | SyntaxKind::SemicolonToken
                | SyntaxKind::ExportKeyword
                | SyntaxKind::ClassKeyword
                | SyntaxKind::ConstKeyword
                | SyntaxKind::LetKeyword
                | SyntaxKind::VarKeyword
                | SyntaxKind::NamespaceKeyword
                | SyntaxKind::Identifier
                | SyntaxKind::NumericLiteral
                | SyntaxKind::StringLiteral
        )
    }
}

impl std::fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}
