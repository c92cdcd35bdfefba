//! Collaborator seams consumed by the orchestrator.
//!
//! All of these are in-process contracts; the HTTP-backed implementations
//! live in [`crate::api`], and tests substitute stubs.

use async_trait::async_trait;

use crate::error::{ApiError, UpdateError};

/// Probes for and applies system updates.
#[async_trait]
pub trait UpdateCheckService: Send + Sync {
    /// A system version newer than the installed one, if any.
    async fn check_latest_system_version(&self) -> Result<Option<String>, UpdateError>;

    /// Whether the app catalog has entries newer than what is installed.
    async fn check_latest_catalog_version(&self) -> Result<bool, UpdateError>;

    /// Download and apply the given system version.
    async fn apply_system_update(&self, version: &str) -> Result<(), UpdateError>;
}

/// Backend calls that are not update-related.
#[async_trait]
pub trait BackendClient: Send + Sync {
    /// Record that the welcome notice was shown for `version`.
    async fn acknowledge_welcome(&self, version: &str) -> Result<(), ApiError>;
}

/// Receives navigation requests emitted by dialog actions.
#[async_trait]
pub trait Navigator: Send + Sync {
    async fn navigate_to(&self, route: &str);
}
