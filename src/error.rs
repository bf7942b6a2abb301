use thiserror::Error;

/// Unified error type for release-hooks operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Commit lookup failed: {0}")]
    Lookup(String),

    #[error("Notification failed: {0}")]
    Notify(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in release-hooks
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// Create a lookup error with context
    pub fn lookup(msg: impl Into<String>) -> Self {
        ReleaseError::Lookup(msg.into())
    }

    /// Create a notification error with context
    pub fn notify(msg: impl Into<String>) -> Self {
        ReleaseError::Notify(msg.into())
    }
}
