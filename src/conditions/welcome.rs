//! Welcome condition — the one-shot "show welcome for version V" signal.

use futures::StreamExt;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::config::ClientConfig;
use crate::state::StateSource;

/// Derives whether the welcome notice is owed.
///
/// One-shot by construction: the first time an installed version is observed
/// the condition resolves and latches, so the welcome dialog can be offered at
/// most once per process no matter how the underlying state flips afterward.
pub struct WelcomeCondition {
    welcome_acknowledged: watch::Receiver<bool>,
    installed_version: watch::Receiver<Option<String>>,
    current_build_version: String,
    resolved: bool,
}

impl WelcomeCondition {
    pub fn new(state: &StateSource, config: &ClientConfig) -> Self {
        Self {
            welcome_acknowledged: state.welcome_acknowledged(),
            installed_version: state.installed_version(),
            current_build_version: config.current_build_version.clone(),
            resolved: false,
        }
    }

    /// Resolve the welcome signal.
    ///
    /// Suspends until the installed version is known, then returns
    /// `Some(version)` when the welcome notice has not been acknowledged and
    /// the installed version matches the running build, `None` otherwise.
    /// Later calls return `None` immediately. If the state source goes away
    /// before a version arrives, resolves to `None`; if it stays silent, this
    /// pends indefinitely.
    pub async fn resolve(&mut self) -> Option<String> {
        if self.resolved {
            return None;
        }

        let mut versions = WatchStream::new(self.installed_version.clone());
        while let Some(installed) = versions.next().await {
            let Some(installed) = installed else { continue };
            self.resolved = true;
            // Gate on the acknowledgement flag as of the moment the version
            // first became known.
            let acknowledged = *self.welcome_acknowledged.borrow();
            return (!acknowledged && installed == self.current_build_version)
                .then_some(installed);
        }

        // State source dropped; no version will ever arrive.
        self.resolved = true;
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ServerState;

    fn source(state: ServerState) -> StateSource {
        StateSource::new(state)
    }

    #[tokio::test]
    async fn shown_when_unacknowledged_and_versions_match() {
        let state = source(ServerState {
            welcome_acknowledged: false,
            installed_version: Some("1.2.0".into()),
            auto_check_updates: false,
        });
        let mut cond = WelcomeCondition::new(&state, &ClientConfig::new("1.2.0"));
        assert_eq!(cond.resolve().await.as_deref(), Some("1.2.0"));
    }

    #[tokio::test]
    async fn suppressed_when_already_acknowledged() {
        let state = source(ServerState {
            welcome_acknowledged: true,
            installed_version: Some("1.2.0".into()),
            auto_check_updates: false,
        });
        let mut cond = WelcomeCondition::new(&state, &ClientConfig::new("1.2.0"));
        assert_eq!(cond.resolve().await, None);
    }

    #[tokio::test]
    async fn suppressed_on_version_mismatch() {
        let state = source(ServerState {
            welcome_acknowledged: false,
            installed_version: Some("1.1.0".into()),
            auto_check_updates: false,
        });
        let mut cond = WelcomeCondition::new(&state, &ClientConfig::new("1.2.0"));
        assert_eq!(cond.resolve().await, None);
    }

    #[tokio::test]
    async fn waits_for_installed_version() {
        let state = source(ServerState::default());
        let mut cond = WelcomeCondition::new(&state, &ClientConfig::new("1.2.0"));

        let setter = {
            let state = state.clone();
            async move {
                tokio::task::yield_now().await;
                state.set_installed_version("1.2.0");
            }
        };

        let (resolved, ()) = tokio::join!(cond.resolve(), setter);
        assert_eq!(resolved.as_deref(), Some("1.2.0"));
    }

    #[tokio::test]
    async fn resolves_at_most_once() {
        let state = source(ServerState {
            welcome_acknowledged: false,
            installed_version: Some("1.2.0".into()),
            auto_check_updates: false,
        });
        let mut cond = WelcomeCondition::new(&state, &ClientConfig::new("1.2.0"));
        assert!(cond.resolve().await.is_some());

        // Flipping state afterwards must not re-arm the condition.
        state.set_welcome_acknowledged(true);
        state.set_welcome_acknowledged(false);
        assert_eq!(cond.resolve().await, None);
        assert_eq!(cond.resolve().await, None);
    }

    #[tokio::test]
    async fn acknowledgement_read_when_version_arrives() {
        let state = source(ServerState::default());
        let mut cond = WelcomeCondition::new(&state, &ClientConfig::new("1.2.0"));

        // Acknowledged before the version shows up: no welcome owed.
        state.set_welcome_acknowledged(true);
        let setter = {
            let state = state.clone();
            async move {
                tokio::task::yield_now().await;
                state.set_installed_version("1.2.0");
            }
        };
        let (resolved, ()) = tokio::join!(cond.resolve(), setter);
        assert_eq!(resolved, None);
    }

    #[tokio::test]
    async fn resolves_none_when_source_dropped() {
        let state = source(ServerState::default());
        let mut cond = WelcomeCondition::new(&state, &ClientConfig::new("1.2.0"));
        drop(state);
        assert_eq!(cond.resolve().await, None);
    }
}
