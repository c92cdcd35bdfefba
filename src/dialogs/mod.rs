//! Dialog presentation seams and the types that flow through them.

pub mod cli;

pub use cli::CliPresenter;

use async_trait::async_trait;

use crate::error::Error;

/// The user's answer to a binary choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogOutcome {
    Cancelled,
    Confirmed,
}

impl DialogOutcome {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed)
    }
}

/// Content of a modal dialog.
#[derive(Debug, Clone)]
pub struct ModalContent {
    pub title: String,
    pub body: String,
}

impl ModalContent {
    /// The welcome notice for a freshly installed system version.
    pub fn welcome(version: &str) -> Self {
        Self {
            title: format!("Welcome to version {version}!"),
            body: "Your system has been updated. Take a moment to look around."
                .to_string(),
        }
    }
}

/// An action button on an informational dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoAction {
    /// Stable identifier returned on selection.
    pub id: String,
    /// Button label.
    pub label: String,
}

impl InfoAction {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// Presents dialogs and resolves with the user's choice.
#[async_trait]
pub trait DialogPresenter: Send + Sync {
    /// Present a modal and resolve once the user dismisses it. When
    /// `dismissable` is false the modal offers no backdrop dismissal and the
    /// user must go through its own controls.
    async fn present_modal(&self, content: ModalContent, dismissable: bool);

    /// Present a confirm/cancel choice.
    async fn present_confirm(&self, title: &str, body: &str) -> DialogOutcome;

    /// Present a dismissible informational dialog with action buttons.
    /// Resolves with the id of the selected action, or `None` on dismissal.
    async fn present_info(
        &self,
        title: &str,
        body: &str,
        actions: &[InfoAction],
    ) -> Option<String>;
}

/// Blocking progress indicator shown while an update is applied.
#[async_trait]
pub trait ProgressIndicator: Send + Sync {
    async fn show(&self, message: &str);
    async fn hide(&self);
}

/// User-visible, blocking error display.
///
/// Injected rather than global so tests can observe what would have been
/// alerted.
#[async_trait]
pub trait ErrorReporter: Send + Sync {
    async fn report(&self, error: &Error);
}
