use thiserror::Error;

/// Errors that can occur during repository operations.
///
/// A missing record is never an error: `get` returns `Ok(None)` and `delete`
/// returns `Ok(())` for keys that do not exist.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Provisioning failed: {0}")]
    Provisioning(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl RepositoryError {
    /// Returns `true` for failures caused by the network path to the store.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Self::ConnectionFailed(_))
    }

    /// Returns `true` when the caller supplied input the store can never accept.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;
