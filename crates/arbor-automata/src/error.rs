use arbor_term::ShapeError;
use miette::Diagnostic;
use thiserror::Error;

/// Result type for automaton construction and evaluation
pub type Result<T> = std::result::Result<T, AutomatonError>;

#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum AutomatonError {
    #[error("Search aborted after exceeding {limit} transition attempts")]
    #[diagnostic(code(arbor::automata::step_limit_exceeded))]
    StepLimitExceeded { limit: usize },

    #[error("Search aborted after exceeding a depth of {limit}")]
    #[diagnostic(code(arbor::automata::depth_limit_exceeded))]
    DepthLimitExceeded { limit: usize },

    #[error("Filtered transition input `{pattern}` has no label")]
    #[diagnostic(code(arbor::automata::unlabeled_input))]
    UnlabeledInput { pattern: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Shape(#[from] ShapeError),
}
