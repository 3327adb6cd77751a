//! Error types for layout reconstruction.
//!
//! Every failure in this crate is a caller-detectable precondition. Components
//! validate their inputs on entry and report problems through [`Error`]; nothing
//! here is transient or worth retrying.

/// Result type alias for layout operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during layout reconstruction.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input list is empty or malformed where at least one element is required
    #[error("Invalid input: {0}")]
    InputInvalid(String),

    /// Cell content count does not match the placeholder cells in the structure tokens
    #[error(
        "Structure mismatch: {placeholders} placeholder cell(s) in tokens but {contents} cell content(s)"
    )]
    StructureMismatch {
        /// Number of empty-cell placeholder tokens
        placeholders: usize,
        /// Number of cell contents supplied
        contents: usize,
    },

    /// A structure token string could not be classified
    #[error("Invalid structure token: '{0}'")]
    InvalidToken(String),

    /// Configuration value out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// An external model (structure or recognition) reported a failure
    #[error("Collaborator error: {0}")]
    Collaborator(String),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
