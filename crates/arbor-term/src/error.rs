use miette::Diagnostic;
use thiserror::Error;

/// Result type for shape-sensitive term operations
pub type Result<T> = std::result::Result<T, ShapeError>;

/// A term was used where a different shape is required.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ShapeError {
    #[error("Expected an unranked tree, found `{0}`")]
    #[diagnostic(code(arbor::shape::not_a_tree))]
    NotATree(String),

    #[error("Expected a binary tree, found `{0}`")]
    #[diagnostic(code(arbor::shape::not_a_binary_tree))]
    NotABinaryTree(String),
}
