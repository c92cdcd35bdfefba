//! CLI presenter — renders dialogs on the terminal for local runs.

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::dialogs::{DialogOutcome, DialogPresenter, ErrorReporter, InfoAction, ModalContent, ProgressIndicator};
use crate::error::Error;
use crate::services::Navigator;

/// Terminal dialog presenter: prompts on stderr, reads choices from stdin.
pub struct CliPresenter;

impl CliPresenter {
    pub fn new() -> Self {
        Self
    }

    async fn read_line(&self) -> String {
        let stdin = tokio::io::stdin();
        let mut reader = BufReader::new(stdin);
        let mut line = String::new();
        match reader.read_line(&mut line).await {
            Ok(_) => line.trim().to_string(),
            Err(e) => {
                tracing::error!("Error reading stdin: {e}");
                String::new()
            }
        }
    }
}

#[async_trait]
impl DialogPresenter for CliPresenter {
    async fn present_modal(&self, content: ModalContent, dismissable: bool) {
        eprintln!("\n== {} ==", content.title);
        eprintln!("{}", content.body);
        if dismissable {
            eprint!("[Enter to dismiss] > ");
        } else {
            eprint!("[Enter to continue] > ");
        }
        self.read_line().await;
    }

    async fn present_confirm(&self, title: &str, body: &str) -> DialogOutcome {
        eprintln!("\n== {title} ==");
        eprintln!("{body}");
        eprint!("[y/N] > ");
        match self.read_line().await.to_lowercase().as_str() {
            "y" | "yes" => DialogOutcome::Confirmed,
            _ => DialogOutcome::Cancelled,
        }
    }

    async fn present_info(
        &self,
        title: &str,
        body: &str,
        actions: &[InfoAction],
    ) -> Option<String> {
        eprintln!("\n== {title} ==");
        eprintln!("{body}");
        for (i, action) in actions.iter().enumerate() {
            eprintln!("  {}. {}", i + 1, action.label);
        }
        eprint!("[number, Enter to dismiss] > ");
        let line = self.read_line().await;
        let index: usize = line.parse().ok()?;
        actions.get(index.checked_sub(1)?).map(|a| a.id.clone())
    }
}

#[async_trait]
impl ProgressIndicator for CliPresenter {
    async fn show(&self, message: &str) {
        eprintln!("… {message}");
    }

    async fn hide(&self) {
        eprintln!("  done.");
    }
}

#[async_trait]
impl ErrorReporter for CliPresenter {
    async fn report(&self, error: &Error) {
        eprintln!("\n!! {error}");
        eprint!("[Enter to acknowledge] > ");
        self.read_line().await;
    }
}

#[async_trait]
impl Navigator for CliPresenter {
    async fn navigate_to(&self, route: &str) {
        eprintln!("-> would navigate to {route}");
    }
}
