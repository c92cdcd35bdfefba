use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;

use startup_notifier::api::HttpApiClient;
use startup_notifier::config::ClientConfig;
use startup_notifier::dialogs::CliPresenter;
use startup_notifier::orchestrator::{NotificationOrchestrator, OrchestratorDeps};
use startup_notifier::state::StateSource;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let base_url = std::env::var("STARTUP_NOTIFIER_API").unwrap_or_else(|_| {
        eprintln!("Error: STARTUP_NOTIFIER_API not set");
        eprintln!("  export STARTUP_NOTIFIER_API=http://127.0.0.1:5959");
        std::process::exit(1);
    });

    let build_version = std::env::var("STARTUP_NOTIFIER_BUILD_VERSION")
        .unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_string());

    let sync_secs: u64 = std::env::var("STARTUP_NOTIFIER_SYNC_SECS")
        .unwrap_or_else(|_| "10".to_string())
        .parse()
        .unwrap_or(10);

    eprintln!("Startup notifier v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   API: {base_url}");
    eprintln!("   Build version: {build_version}\n");

    let api = Arc::new(HttpApiClient::new(base_url));
    let initial = api
        .fetch_server_state()
        .await
        .context("Failed to fetch initial server state")?;
    let state = StateSource::new(initial);

    // Keep the reactive state in sync with the server while the pass runs.
    {
        let api = Arc::clone(&api);
        let state = state.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(sync_secs));
            interval.tick().await; // skip the immediate first tick
            loop {
                interval.tick().await;
                match api.fetch_server_state().await {
                    Ok(snapshot) => state.apply(snapshot),
                    Err(e) => tracing::warn!("State refresh failed: {e}"),
                }
            }
        });
    }

    let presenter = Arc::new(CliPresenter::new());
    let deps = OrchestratorDeps {
        checker: api.clone(),
        backend: api,
        dialogs: presenter.clone(),
        progress: presenter.clone(),
        reporter: presenter.clone(),
        navigator: presenter,
    };

    let mut orchestrator =
        NotificationOrchestrator::new(state, ClientConfig::new(build_version), deps);
    orchestrator.start().await;

    Ok(())
}
