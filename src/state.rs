//! Reactive server state observed by the notifier.
//!
//! The server owns these fields; the notifier core only watches them. Each
//! field is a [`StateCell`], a thin wrapper over `tokio::sync::watch` with
//! replay-on-subscribe semantics: a fresh subscriber sees the current value
//! immediately, then every subsequent change.

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// Snapshot of the server-owned fields the notifier cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ServerState {
    /// Whether the user has already acknowledged the welcome notice.
    pub welcome_acknowledged: bool,
    /// Version of the installed system, once known. Reported at most once per
    /// process and immutable thereafter.
    pub installed_version: Option<String>,
    /// User preference: probe for system updates automatically.
    pub auto_check_updates: bool,
}

/// A single reactive field.
///
/// `subscribe` hands out a receiver whose first `changed()` resolves
/// immediately with the current value, so late subscribers never miss the
/// value that was already in place.
#[derive(Debug, Clone)]
pub struct StateCell<T> {
    tx: watch::Sender<T>,
}

impl<T: Clone + PartialEq> StateCell<T> {
    pub fn new(initial: T) -> Self {
        Self {
            tx: watch::Sender::new(initial),
        }
    }

    /// Current value.
    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }

    /// Update the value. Equal values are deduplicated and wake no watchers.
    pub fn set(&self, value: T) {
        self.tx.send_if_modified(|current| {
            if *current == value {
                false
            } else {
                *current = value;
                true
            }
        });
    }

    /// Subscribe with replay: the returned receiver reports the current value
    /// as a pending change.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        let mut rx = self.tx.subscribe();
        rx.mark_changed();
        rx
    }
}

/// Owner of the reactive cells.
///
/// Mutation happens through the setters (driven by the server sync layer);
/// the notifier core only takes receivers.
#[derive(Debug, Clone)]
pub struct StateSource {
    welcome_acknowledged: StateCell<bool>,
    installed_version: StateCell<Option<String>>,
    auto_check_updates: StateCell<bool>,
}

impl StateSource {
    pub fn new(initial: ServerState) -> Self {
        Self {
            welcome_acknowledged: StateCell::new(initial.welcome_acknowledged),
            installed_version: StateCell::new(initial.installed_version),
            auto_check_updates: StateCell::new(initial.auto_check_updates),
        }
    }

    /// Current snapshot of all fields.
    pub fn snapshot(&self) -> ServerState {
        ServerState {
            welcome_acknowledged: self.welcome_acknowledged.get(),
            installed_version: self.installed_version.get(),
            auto_check_updates: self.auto_check_updates.get(),
        }
    }

    /// Apply a full snapshot, field by field.
    pub fn apply(&self, state: ServerState) {
        self.set_welcome_acknowledged(state.welcome_acknowledged);
        if let Some(version) = state.installed_version {
            self.set_installed_version(version);
        }
        self.set_auto_check_updates(state.auto_check_updates);
    }

    pub fn welcome_acknowledged(&self) -> watch::Receiver<bool> {
        self.welcome_acknowledged.subscribe()
    }

    pub fn installed_version(&self) -> watch::Receiver<Option<String>> {
        self.installed_version.subscribe()
    }

    pub fn auto_check_updates(&self) -> watch::Receiver<bool> {
        self.auto_check_updates.subscribe()
    }

    pub fn set_welcome_acknowledged(&self, acknowledged: bool) {
        self.welcome_acknowledged.set(acknowledged);
    }

    /// Record the installed version. Immutable once present: a conflicting
    /// later report is dropped with a warning.
    pub fn set_installed_version(&self, version: impl Into<String>) {
        let version = version.into();
        match self.installed_version.get() {
            None => self.installed_version.set(Some(version)),
            Some(existing) if existing == version => {}
            Some(existing) => {
                tracing::warn!(
                    "Ignoring installed version change {existing} -> {version}; \
                     the installed version is immutable once reported"
                );
            }
        }
    }

    pub fn set_auto_check_updates(&self, enabled: bool) {
        self.auto_check_updates.set(enabled);
    }
}
