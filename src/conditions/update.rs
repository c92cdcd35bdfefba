//! Update condition — "a newer system version is available" probe stream.

use std::sync::Arc;

use futures::{Stream, stream};
use tokio::sync::watch;

use crate::services::UpdateCheckService;
use crate::state::StateSource;

/// Derives one update probe per eligible auto-check transition.
///
/// Each time the auto-check preference is (or becomes) enabled, a version
/// check is started. Switch semantics: a fresh enable transition while a
/// check is in flight abandons that check, so only the newest request's
/// result is ever yielded.
pub struct UpdateCondition {
    auto_check: watch::Receiver<bool>,
    checker: Arc<dyn UpdateCheckService>,
    closed: bool,
}

impl UpdateCondition {
    pub fn new(state: &StateSource, checker: Arc<dyn UpdateCheckService>) -> Self {
        Self {
            auto_check: state.auto_check_updates(),
            checker,
            closed: false,
        }
    }

    /// Wait for the next eligible transition and yield its probe result.
    ///
    /// `Some(Some(v))` — version `v` is available; `Some(None)` — no update
    /// (a failed check is logged and reported the same way); `None` — the
    /// state source is gone and no further probes will happen.
    pub async fn next(&mut self) -> Option<Option<String>> {
        self.rising_edge().await?;

        loop {
            let check = self.checker.check_latest_system_version();
            tokio::pin!(check);
            loop {
                tokio::select! {
                    result = &mut check => {
                        return Some(match result {
                            Ok(version) => version,
                            Err(e) => {
                                tracing::warn!("System update check failed: {e}");
                                None
                            }
                        });
                    }
                    changed = self.auto_check.changed(), if !self.closed => {
                        match changed {
                            // A fresh enable replaces the in-flight check.
                            Ok(()) if *self.auto_check.borrow_and_update() => break,
                            // Disabled mid-flight: the running check is left
                            // to finish, matching the upstream preference
                            // filter which ignores disable transitions.
                            Ok(()) => {}
                            Err(_) => self.closed = true,
                        }
                    }
                }
            }
        }
    }

    /// Await an enabled preference: the replayed current value if already
    /// enabled, otherwise the next false→true transition.
    async fn rising_edge(&mut self) -> Option<()> {
        while !self.closed {
            if self.auto_check.changed().await.is_err() {
                self.closed = true;
                break;
            }
            if *self.auto_check.borrow_and_update() {
                return Some(());
            }
        }
        None
    }

    /// Adapt to a stream for the orchestrator's update loop.
    pub fn into_stream(self) -> impl Stream<Item = Option<String>> {
        stream::unfold(self, |mut cond| async move {
            cond.next().await.map(|item| (item, cond))
        })
    }
}
