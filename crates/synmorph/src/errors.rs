//! Error kinds for the tree manipulation engine (§7).
//!
//! Every error bubbles to the caller unchanged — the core never swallows or
//! retries. The one exception is at the filesystem-host boundary, where
//! asynchronous existence checks coerce stat failures to `false` rather
//! than propagating an error.

use crate::syntax_kind::SyntaxKind;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The caller's request is structurally impossible: a disposed wrapper
    /// was accessed, `getParentOrThrow` was called on the root, a kind
    /// assertion failed, or a replacement supplied more nodes than the
    /// operation allows.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// A structural case the core recognizes but does not handle.
    #[error("not implemented: {0}")]
    NotImplemented(String),

    /// An out-of-range index or a negative position.
    #[error("argument error: {0}")]
    ArgumentError(String),

    /// The reconciler found mismatched child counts or kinds between the
    /// old and new trees. Fatal for the source file it occurred in.
    #[error("tree replacement error: {0}")]
    TreeReplacementError(String),

    /// A filesystem host contract violation.
    #[error("file not found: {0}")]
    FileNotFound(String),
}

pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    #[must_use]
    pub fn wrong_kind(expected: SyntaxKind, actual: SyntaxKind) -> Self {
        CoreError::InvalidOperation(format!(
            "expected a node of kind {expected:?} but found {actual:?}"
        ))
    }

    #[must_use]
    pub fn disposed_node() -> Self {
        CoreError::InvalidOperation(
            "attempted to access a node that was disposed".to_string(),
        )
    }

    #[must_use]
    pub fn no_parent() -> Self {
        CoreError::InvalidOperation("node has no parent".to_string())
    }
}
