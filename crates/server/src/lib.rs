//! Server crate for the reel ranking service.
//!
//! This crate contains the orchestrator that drives one ranking run against
//! the remote prompt, metadata and submission endpoints.

pub mod config;
pub mod orchestrator;

pub use config::OrchestratorConfig;
pub use orchestrator::{RankingOrchestrator, RunReport};
