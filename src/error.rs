//! Error types for the startup notifier.

/// Top-level error type for the notifier.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Update error: {0}")]
    Update(#[from] UpdateError),

    #[error("Api error: {0}")]
    Api(#[from] ApiError),
}

/// Update check / apply errors.
#[derive(Debug, thiserror::Error)]
pub enum UpdateError {
    #[error("Update check failed: {reason}")]
    CheckFailed { reason: String },

    #[error("Failed to apply update to {version}: {reason}")]
    ApplyFailed { version: String, reason: String },
}

/// Backend HTTP errors.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("Server returned {status} for {path}")]
    Status { status: u16, path: String },

    #[error("Failed to decode response from {path}: {reason}")]
    Decode { path: String, reason: String },
}

/// Result type alias for the notifier.
pub type Result<T> = std::result::Result<T, Error>;
