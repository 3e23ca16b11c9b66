//! Error types for the evaluation toolkit

use thiserror::Error;

/// Result type alias using this crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors raised while loading evaluation resources
///
/// The alignment core itself is a pure computation and never fails;
/// every variant here belongs to a loader (vocabulary, folding table,
/// GLM) or to decoding model output against a vocabulary.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Vocabulary error: {0}")]
    Vocab(String),

    #[error("Folding table error: {0}")]
    Folding(String),

    #[error("GLM table error: {0}")]
    Glm(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
