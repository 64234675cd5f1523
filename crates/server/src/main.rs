//! Simple harness for the ranking orchestrator.
//!
//! Runs one prompt end to end with settings taken from `REEL_*` environment
//! variables (or a `.env` file) and logs the resulting ranking.

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use server::{OrchestratorConfig, RankingOrchestrator};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,server=debug,api_client=debug")),
        )
        .init();

    info!("Starting ranking harness");

    let config = OrchestratorConfig::from_env()?;
    let orchestrator = RankingOrchestrator::new(config)?;
    let report = orchestrator.run().await?;

    info!("Ranked {} movies:", report.ranking.len());
    for (i, scored) in report.ranking.iter().enumerate() {
        info!(
            "{}. {} ({}) - Score: {:.2}",
            i + 1,
            report.title_of(&scored.movie_id).unwrap_or("?"),
            scored.movie_id,
            scored.score
        );
    }
    match report.achieved_score {
        Some(score) => info!("Achieved score: {}", score),
        None => info!("Dry run, nothing submitted"),
    }

    Ok(())
}
