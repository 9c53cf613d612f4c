//! Error types for document edits and analysis passes.

use miette::Diagnostic;
use thiserror::Error;

use crate::syntax::NodeId;

/// Errors from the fallible edges of the engine.
///
/// Classification and synthesis never fail; only tree edits, cancellation and
/// thread-pool setup do.
#[derive(Error, Debug, Diagnostic)]
pub enum DocfillError {
    /// The target declaration is not part of the tree.
    #[error("node {0} not found in syntax tree")]
    #[diagnostic(code(docfill::node_not_found))]
    NodeNotFound(NodeId),

    /// The analysis pass was cancelled between symbols.
    #[error("analysis cancelled")]
    #[diagnostic(code(docfill::cancelled))]
    Cancelled,

    /// The tree cannot carry the requested edit.
    #[error("invalid syntax tree: {details}")]
    #[diagnostic(code(docfill::invalid_tree))]
    InvalidTree { details: String },

    /// The worker pool could not be built.
    #[error("failed to start analysis workers: {0}")]
    #[diagnostic(code(docfill::thread_pool))]
    ThreadPool(String),
}

impl DocfillError {
    /// Create an InvalidTree error
    pub fn invalid_tree(details: impl Into<String>) -> Self {
        Self::InvalidTree {
            details: details.into(),
        }
    }
}

/// Result type for docfill operations
pub type Result<T> = std::result::Result<T, DocfillError>;
