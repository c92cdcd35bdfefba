//! HTTP-backed implementations of the notifier's backend seams.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::{ApiError, UpdateError};
use crate::services::{BackendClient, UpdateCheckService};
use crate::state::ServerState;

/// JSON client for the system's local API.
pub struct HttpApiClient {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct SystemVersionReply {
    /// Newer system version than the installed one, absent when up to date.
    version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CatalogReply {
    /// Whether newer catalog entries exist.
    available: bool,
}

impl HttpApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| ApiError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }

        response.json().await.map_err(|e| ApiError::Decode {
            path: path.to_string(),
            reason: e.to_string(),
        })
    }

    async fn post_json(&self, path: &str, body: serde_json::Value) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.url(path))
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }
        Ok(())
    }

    /// Fetch the current server state. Used by the binary to seed and refresh
    /// the local [`crate::state::StateSource`].
    pub async fn fetch_server_state(&self) -> Result<ServerState, ApiError> {
        self.get_json("/v0/state").await
    }
}

#[async_trait]
impl UpdateCheckService for HttpApiClient {
    async fn check_latest_system_version(&self) -> Result<Option<String>, UpdateError> {
        let reply: SystemVersionReply =
            self.get_json("/v0/updates/system")
                .await
                .map_err(|e| UpdateError::CheckFailed {
                    reason: e.to_string(),
                })?;
        Ok(reply.version)
    }

    async fn check_latest_catalog_version(&self) -> Result<bool, UpdateError> {
        let reply: CatalogReply =
            self.get_json("/v0/updates/catalog")
                .await
                .map_err(|e| UpdateError::CheckFailed {
                    reason: e.to_string(),
                })?;
        Ok(reply.available)
    }

    async fn apply_system_update(&self, version: &str) -> Result<(), UpdateError> {
        self.post_json("/v0/updates/apply", serde_json::json!({ "version": version }))
            .await
            .map_err(|e| UpdateError::ApplyFailed {
                version: version.to_string(),
                reason: e.to_string(),
            })
    }
}

#[async_trait]
impl BackendClient for HttpApiClient {
    async fn acknowledge_welcome(&self, version: &str) -> Result<(), ApiError> {
        self.post_json("/v0/welcome/ack", serde_json::json!({ "version": version }))
            .await
    }
}
