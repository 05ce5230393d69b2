//! Study Planner daily job
//!
//! Loads a JSON snapshot of plans, sessions and review items, runs one
//! planning pass and prints the report as JSON on stdout.
//!
//! Usage: `study-planner [SNAPSHOT]` (defaults to `planner.snapshot_path`)

use anyhow::Result;
use chrono::Utc;
use study_planner_backend::{config, job, snapshot::Snapshot, state::AppState};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    init_tracing();

    // Load configuration
    let config = config::AppConfig::load()?;
    config.validate()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = if config::AppConfig::is_production() { "production" } else { "development" },
        "Starting Study Planner"
    );

    let snapshot_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config.planner.snapshot_path.clone());
    let today = config.planner.today.unwrap_or_else(|| Utc::now().date_naive());

    let snapshot = Snapshot::load(&snapshot_path).await?;
    let state = AppState::in_memory(config);
    snapshot.seed(&state).await?;

    let report = job::run_daily_planning(&state, today).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

/// Initialize tracing/logging
///
/// Logs go to stderr so stdout carries only the report.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if config::AppConfig::is_production() {
            "study_planner_backend=info,study_planner=info".into()
        } else {
            "study_planner_backend=debug,study_planner=debug".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if config::AppConfig::is_production() {
        // JSON logging for production (better for log aggregation)
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        // Pretty logging for development
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
            .init();
    }
}
