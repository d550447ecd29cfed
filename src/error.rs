//! Error types and result alias

use thiserror::Error;

/// Errors raised while harvesting applicant contacts
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// A required setting is missing or malformed
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// No usable saved login session
    #[error("Saved session unavailable: {0}")]
    SessionMissing(String),

    /// A selector did not match, timed out, or the element went stale
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// The browser or page became unusable
    #[error("Browser driver failure: {0}")]
    DriverFailure(String),

    #[error("Failed to launch browser: {0}")]
    LaunchFailed(String),

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    /// The selector override file could not be parsed
    #[error("Invalid selector configuration: {0}")]
    InvalidSelectors(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScrapeError {
    /// Whether the traversal may skip the current applicant and keep going.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ScrapeError::ElementNotFound(_))
    }

    pub(crate) fn element(context: impl std::fmt::Display, err: anyhow::Error) -> Self {
        ScrapeError::ElementNotFound(format!("{}: {}", context, err))
    }

    pub(crate) fn driver(context: impl std::fmt::Display, err: anyhow::Error) -> Self {
        ScrapeError::DriverFailure(format!("{}: {}", context, err))
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, ScrapeError>;
