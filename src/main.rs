// Main entry point - Dependency injection and UI loop setup
use std::sync::Arc;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

use trip_stats_dashboard::application::dashboard_controller::DashboardController;
use trip_stats_dashboard::application::stats_api::StatsApi;
use trip_stats_dashboard::infrastructure::config::load_dashboard_config;
use trip_stats_dashboard::infrastructure::http_stats_api::HttpStatsApi;
use trip_stats_dashboard::presentation::dom::InMemoryDocument;
use trip_stats_dashboard::presentation::event_loop::run_event_loop;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the rendered document
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    // Load configuration
    let config = load_dashboard_config()?;

    // Create API client (infrastructure layer)
    let api = HttpStatsApi::new(config.api.base_url);
    match api.health().await {
        Some(health) => tracing::info!(
            "Backend at {} is {} (database found: {})",
            api.base_url(),
            health.status,
            health.database_found
        ),
        None => tracing::warn!("Backend at {} did not answer the health check", api.base_url()),
    }

    // Create controller (application layer) over the headless document
    let api: Arc<dyn StatsApi> = Arc::new(api);
    let mut controller = DashboardController::new(api, InMemoryDocument::new());

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    run_event_loop(&mut controller, stdin, &mut stdout).await
}
