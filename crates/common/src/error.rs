//! Error types for the Booker harness

use thiserror::Error;

/// Result type alias using the harness Error
pub type Result<T> = std::result::Result<T, Error>;

/// Harness error types
///
/// Non-success HTTP statuses are not errors: they are reported through
/// [`crate::ApiResponse::ok`] and [`crate::ApiResponse::status`].
#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Assertion failed: {0}")]
    Assertion(String),

    #[error("Token missing. Status={status} Body={body}")]
    TokenMissing { status: u16, body: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// True for failures raised by assertion helpers or fixture checks,
    /// as opposed to transport or setup problems.
    pub fn is_assertion(&self) -> bool {
        matches!(self, Error::Assertion(_) | Error::TokenMissing { .. })
    }
}
