//! Client configuration.

/// Fixed, process-wide client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Version of the front-end build currently running. The welcome notice
    /// is only owed when the installed system version matches this.
    pub current_build_version: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            current_build_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new(current_build_version: impl Into<String>) -> Self {
        Self {
            current_build_version: current_build_version.into(),
        }
    }
}
