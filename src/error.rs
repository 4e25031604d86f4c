use thiserror::Error;

/// Errors reported by boards and by the search engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MctsError {
    /// A board was asked to apply a move outside its legal move set.
    #[error("Illegal move: {0}")]
    IllegalMove(String),

    /// The search was started from a position that is already over.
    #[error("No legal moves available")]
    NoLegalMoves,

    /// A best move was requested before the root had any children.
    #[error("The root node has no children to choose from")]
    NoChildren,

    #[error("Invalid budget: {0}")]
    InvalidBudget(String),

    #[error("Invalid search configuration: {0}")]
    InvalidConfig(String),

    #[error("Player to move mismatch: expected {expected}, board says {actual}")]
    PlayerMismatch { expected: String, actual: String },

    #[error("Invalid board: {0}")]
    InvalidBoard(String),
}

/// Convenience result type for search and board operations.
pub type Result<T> = std::result::Result<T, MctsError>;
