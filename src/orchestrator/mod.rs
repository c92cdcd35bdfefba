//! Notification orchestrator — sequences the startup dialogs.
//!
//! Runs exactly once per process: resolve the welcome condition, show the
//! welcome modal if owed, then park on the update condition and run an update
//! cycle (prompt → apply, or catalog fallback) per eligible emission.

pub mod phase;

pub use phase::PassPhase;

use std::sync::Arc;

use futures::StreamExt;

use crate::conditions::{UpdateCondition, WelcomeCondition};
use crate::config::ClientConfig;
use crate::dialogs::{DialogPresenter, ErrorReporter, InfoAction, ModalContent, ProgressIndicator};
use crate::error::Error;
use crate::services::{BackendClient, Navigator, UpdateCheckService};
use crate::state::StateSource;

/// Route requested when the user picks the catalog action.
pub const CATALOG_ROUTE: &str = "/catalog";

/// Action id of the "view catalog" button on the catalog notice.
pub const VIEW_CATALOG_ACTION: &str = "view-catalog";

/// External collaborators the orchestrator drives.
pub struct OrchestratorDeps {
    pub checker: Arc<dyn UpdateCheckService>,
    pub backend: Arc<dyn BackendClient>,
    pub dialogs: Arc<dyn DialogPresenter>,
    pub progress: Arc<dyn ProgressIndicator>,
    pub reporter: Arc<dyn ErrorReporter>,
    pub navigator: Arc<dyn Navigator>,
}

/// Top-level state machine over the startup notification pass.
pub struct NotificationOrchestrator {
    state: StateSource,
    config: ClientConfig,
    checker: Arc<dyn UpdateCheckService>,
    backend: Arc<dyn BackendClient>,
    dialogs: Arc<dyn DialogPresenter>,
    progress: Arc<dyn ProgressIndicator>,
    reporter: Arc<dyn ErrorReporter>,
    navigator: Arc<dyn Navigator>,
    phase: PassPhase,
}

impl NotificationOrchestrator {
    pub fn new(state: StateSource, config: ClientConfig, deps: OrchestratorDeps) -> Self {
        Self {
            state,
            config,
            checker: deps.checker,
            backend: deps.backend,
            dialogs: deps.dialogs,
            progress: deps.progress,
            reporter: deps.reporter,
            navigator: deps.navigator,
            phase: PassPhase::Start,
        }
    }

    /// Current phase of the pass.
    pub fn phase(&self) -> PassPhase {
        self.phase
    }

    /// Run the notification pass. Invoked once at application boot; resolves
    /// when the pass reaches a terminal phase or the state source goes away.
    pub async fn start(&mut self) {
        self.transition(PassPhase::WelcomeWait);
        let mut welcome = WelcomeCondition::new(&self.state, &self.config);
        match welcome.resolve().await {
            Some(version) => {
                self.transition(PassPhase::WelcomeShown);
                self.present_welcome(&version).await;
            }
            None => self.transition(PassPhase::WelcomeSkipped),
        }

        let updates =
            UpdateCondition::new(&self.state, Arc::clone(&self.checker)).into_stream();
        tokio::pin!(updates);
        self.transition(PassPhase::UpdateWait);
        loop {
            let Some(available) = updates.next().await else {
                tracing::info!("State source gone; ending notification pass");
                break;
            };
            // A later cycle re-enters the update phase from its parked state.
            if self.phase.is_parked() {
                self.transition(PassPhase::UpdateWait);
            }
            self.run_update_cycle(available).await;
            if self.phase.is_terminal() {
                break;
            }
        }
    }

    /// Show the welcome modal for `version` and wait for dismissal.
    ///
    /// The acknowledgement call is detached: it races with the modal but
    /// never blocks it, and its failure is only logged.
    async fn present_welcome(&self, version: &str) {
        let backend = Arc::clone(&self.backend);
        let build_version = self.config.current_build_version.clone();
        tokio::spawn(async move {
            if let Err(e) = backend.acknowledge_welcome(&build_version).await {
                tracing::error!("Unable to acknowledge welcome: {e}");
            }
        });

        self.dialogs
            .present_modal(ModalContent::welcome(version), false)
            .await;
    }

    /// One update cycle: prompt for an available version, or fall through to
    /// the catalog check.
    async fn run_update_cycle(&mut self, available: Option<String>) {
        match available {
            Some(version) => {
                self.transition(PassPhase::UpdatePrompt);
                let outcome = self
                    .dialogs
                    .present_confirm(
                        "New System Version!",
                        &format!("Update the system to version {version}?"),
                    )
                    .await;
                if outcome.is_confirmed() {
                    self.apply_update(&version).await;
                } else {
                    self.check_catalog().await;
                }
            }
            None => self.check_catalog().await,
        }
    }

    async fn apply_update(&mut self, version: &str) {
        self.transition(PassPhase::UpdateApplying);
        self.progress
            .show(&format!("Updating the system to version {version}"))
            .await;
        let result = self.checker.apply_system_update(version).await;
        self.progress.hide().await;

        match result {
            Ok(()) => {
                tracing::info!("System update to {version} applied");
                self.transition(PassPhase::Done);
            }
            Err(e) => {
                let error = Error::from(e);
                self.reporter.report(&error).await;
                self.transition(PassPhase::Failed);
            }
        }
    }

    /// Catalog fallback: probe for new catalog entries and offer navigation.
    /// A failed probe is logged and treated as "nothing new".
    async fn check_catalog(&mut self) {
        self.transition(PassPhase::CatalogCheck);
        match self.checker.check_latest_catalog_version().await {
            Ok(true) => {
                self.transition(PassPhase::CatalogPrompt);
                let actions = [InfoAction::new(VIEW_CATALOG_ACTION, "View in Catalog")];
                let selected = self
                    .dialogs
                    .present_info(
                        "Updates Available!",
                        "New app updates are available in the catalog.",
                        &actions,
                    )
                    .await;
                if selected.as_deref() == Some(VIEW_CATALOG_ACTION) {
                    self.navigator.navigate_to(CATALOG_ROUTE).await;
                }
            }
            Ok(false) => {}
            Err(e) => {
                tracing::error!("Exception checking for catalog updates: {e}");
            }
        }
        self.transition(PassPhase::Idle);
    }

    fn transition(&mut self, target: PassPhase) {
        if self.phase.can_transition_to(target) {
            tracing::debug!("Pass phase {} -> {}", self.phase, target);
            self.phase = target;
        } else {
            tracing::warn!(
                "Invalid pass phase transition {} -> {target}; staying in {}",
                self.phase,
                self.phase
            );
        }
    }
}
