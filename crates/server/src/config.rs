//! Orchestrator configuration loaded from the environment.

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use api_client::ApiClientConfig;

/// Settings for one orchestrated run.
#[derive(Debug, Clone, Default)]
pub struct OrchestratorConfig {
    pub api: ApiClientConfig,
    /// Rank but do not submit
    pub dry_run: bool,
}

impl OrchestratorConfig {
    /// Load settings from `REEL_*` environment variables, reading a `.env`
    /// file first if one exists. Unset variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(url) = lookup("REEL_API_URL") {
            config.api.api_base_url = url;
        }
        if let Some(url) = lookup("REEL_METADATA_URL") {
            config.api.metadata_base_url = url;
        }
        if let Some(key) = lookup("REEL_API_KEY") {
            config.api.api_key = key;
        }
        if let Some(secs) = lookup("REEL_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().with_context(|| {
                format!("REEL_TIMEOUT_SECS is not a number of seconds: {secs:?}")
            })?;
            config.api.request_timeout = Duration::from_secs(secs);
        }
        config.dry_run = lookup("REEL_DRY_RUN")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(config)
    }
}
