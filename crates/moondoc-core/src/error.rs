//! Error types for document loading and rendering

use lua_type::TokenizeError;
use thiserror::Error;

/// Errors raised while loading or rendering API documentation
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid API JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A type signature could not be tokenized
    #[error("Malformed type signature `{signature}`: {source}")]
    Signature {
        signature: String,
        #[source]
        source: TokenizeError,
    },
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
