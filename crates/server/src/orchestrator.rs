//! # Ranking Orchestrator
//!
//! This module coordinates one full ranking run:
//! 1. Fetch the prompt (movie ids and people)
//! 2. Fetch metadata for every movie concurrently
//! 3. Reassemble the movies in prompt order
//! 4. Rank on a blocking thread
//! 5. Submit the ranking and read back the achieved score
//!
//! Any failed fetch aborts the run. Nothing is ranked from partial data.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tokio::task::JoinSet;
use tracing::{debug, info, instrument};

use api_client::ApiClient;
use data_loader::{Movie, MovieId, MovieIndex, Person, Prompt};
use scoring::{RankingEngine, ScoredMovie, ranked_ids};

use crate::config::OrchestratorConfig;

/// Outcome of a run
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Movies in prompt order, as fetched
    pub movies: Vec<Movie>,
    /// Best first
    pub ranking: Vec<ScoredMovie>,
    /// `None` when the run was a dry run
    pub achieved_score: Option<f64>,
}

impl RunReport {
    /// Look up the title of a ranked movie.
    pub fn title_of(&self, id: &str) -> Option<&str> {
        self.movies
            .iter()
            .find(|m| m.id == id)
            .map(|m| m.title.as_str())
    }
}

/// Coordinates the ranking service, the metadata service and the ranking
/// engine.
#[derive(Clone)]
pub struct RankingOrchestrator {
    client: ApiClient,
    engine: Arc<RankingEngine>,
    dry_run: bool,
}

impl RankingOrchestrator {
    /// Create an orchestrator with the standard ranking engine.
    pub fn new(config: OrchestratorConfig) -> Result<Self> {
        let client = ApiClient::new(config.api).context("Failed to create API client")?;
        Ok(Self {
            client,
            engine: Arc::new(RankingEngine::default()),
            dry_run: config.dry_run,
        })
    }

    /// Replace the ranking engine, e.g. one with a custom scorer set.
    pub fn with_engine(mut self, engine: RankingEngine) -> Self {
        self.engine = Arc::new(engine);
        self
    }

    /// Main entry point: run one prompt end to end.
    pub async fn run(&self) -> Result<RunReport> {
        let start_time = Instant::now();

        let prompt = self
            .client
            .fetch_prompt()
            .await
            .context("Failed to fetch prompt")?;
        info!(
            "Fetched prompt with {} movies and {} people",
            prompt.movies.len(),
            prompt.people.len()
        );

        let movies = self.fetch_movies(&prompt.movies).await?;
        info!("Fetched metadata for {} movies", movies.len());

        let (movies, ranking) = self.rank_blocking(movies, prompt.people).await?;

        let achieved_score = if self.dry_run {
            info!("Dry run, skipping submission");
            None
        } else {
            let score = self
                .client
                .submit_ranking(&ranked_ids(&ranking))
                .await
                .context("Failed to submit ranking")?;
            Some(score)
        };

        info!("Run completed in {:.2?}", start_time.elapsed());
        Ok(RunReport {
            movies,
            ranking,
            achieved_score,
        })
    }

    /// Fetch metadata for every id concurrently and return the movies in
    /// the order of `ids`.
    ///
    /// Each distinct id is fetched once. The first failure is returned and
    /// dropping the task set aborts the fetches still in flight.
    #[instrument(skip(self, ids), fields(movies = ids.len()))]
    async fn fetch_movies(&self, ids: &[MovieId]) -> Result<Vec<Movie>> {
        let mut seen = HashSet::new();
        let mut tasks = JoinSet::new();
        for id in ids.iter().filter(|id| seen.insert(id.as_str())) {
            let client = self.client.clone();
            let id = id.clone();
            tasks.spawn(async move {
                client
                    .fetch_movie(&id)
                    .await
                    .with_context(|| format!("Failed to fetch metadata for {id}"))
            });
        }

        let mut index = MovieIndex::new();
        while let Some(joined) = tasks.join_next().await {
            let movie = joined.context("Metadata fetch task panicked")??;
            debug!("Fetched {} ({})", movie.id, movie.title);
            index.insert_movie(movie);
        }

        index
            .resolve(ids)
            .context("Fetched metadata does not cover the prompt")
    }

    /// Rank on the blocking pool; scoring is CPU-bound.
    async fn rank_blocking(
        &self,
        movies: Vec<Movie>,
        people: Vec<Person>,
    ) -> Result<(Vec<Movie>, Vec<ScoredMovie>)> {
        let engine = Arc::clone(&self.engine);
        tokio::task::spawn_blocking(move || {
            let ranking = engine.rank(&movies, &people);
            (movies, ranking)
        })
        .await
        .context("Ranking task panicked")
    }

    /// Offline path: rank a prompt against already-loaded metadata.
    ///
    /// Every prompt id must be present in `index` and every weight finite;
    /// otherwise this is an error and no partial ranking is produced.
    pub fn rank_prompt(&self, prompt: &Prompt, index: &MovieIndex) -> Result<Vec<ScoredMovie>> {
        index
            .validate(prompt)
            .context("Prompt cannot be ranked against this index")?;
        let movies = index.resolve(&prompt.movies)?;
        Ok(self.engine.rank(&movies, &prompt.people))
    }

    /// Get the ranking engine.
    pub fn engine(&self) -> &RankingEngine {
        &self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use api_client::ApiClientConfig;
    use data_loader::{Criterion, Preferences};
    use scoring::{PreferenceEvaluator, Scorer};
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    // ============================================================================
    // Test Fixtures
    // ============================================================================

    fn config_for(server: &MockServer, dry_run: bool) -> OrchestratorConfig {
        OrchestratorConfig {
            api: ApiClientConfig {
                api_base_url: server.uri(),
                metadata_base_url: format!("{}/omdb", server.uri()),
                api_key: "k".to_string(),
                request_timeout: Duration::from_secs(5),
            },
            dry_run,
        }
    }

    async fn mount_prompt(server: &MockServer, movies: &[&str]) {
        Mock::given(method("GET"))
            .and(path("/prompt"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "movies": movies,
                "people": [{
                    "name": "Ada",
                    "preferences": {
                        "afterYear": {"value": 1990, "weight": 5},
                        "favoriteGenre": {"value": "crime", "weight": 2}
                    }
                }]
            })))
            .mount(server)
            .await;
    }

    async fn mount_movie(server: &MockServer, id: &str, title: &str, year: &str, genre: &str) {
        Mock::given(method("GET"))
            .and(path("/omdb/"))
            .and(query_param("i", id))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "imdbID": id,
                "Title": title,
                "Year": year,
                "Genre": genre,
                "Response": "True"
            })))
            .mount(server)
            .await;
    }

    /// Godfather: 2, Shawshank: 5, Pulp Fiction: 7
    async fn mount_catalog(server: &MockServer) {
        mount_movie(server, "tt0068646", "The Godfather", "1972", "Crime, Drama").await;
        mount_movie(server, "tt0111161", "The Shawshank Redemption", "1994", "Drama").await;
        mount_movie(server, "tt0110912", "Pulp Fiction", "1994", "Crime, Drama").await;
    }

    // ============================================================================
    // Integration Tests: run
    // ============================================================================

    #[tokio::test]
    async fn test_run_ranks_and_submits() {
        let server = MockServer::start().await;
        mount_prompt(&server, &["tt0068646", "tt0111161", "tt0110912"]).await;
        mount_catalog(&server).await;
        Mock::given(method("POST"))
            .and(path("/submit"))
            .and(body_json(json!({"movies": ["tt0110912", "tt0111161", "tt0068646"]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"score": 1.0})))
            .expect(1)
            .mount(&server)
            .await;

        let orchestrator = RankingOrchestrator::new(config_for(&server, false)).unwrap();
        let report = orchestrator.run().await.unwrap();

        let scores: Vec<f64> = report.ranking.iter().map(|s| s.score).collect();
        assert_eq!(scores, vec![7.0, 5.0, 2.0]);
        assert_eq!(report.achieved_score, Some(1.0));
        assert_eq!(report.title_of("tt0110912"), Some("Pulp Fiction"));
    }

    #[tokio::test]
    async fn test_dry_run_skips_submission() {
        let server = MockServer::start().await;
        mount_prompt(&server, &["tt0068646", "tt0111161"]).await;
        mount_catalog(&server).await;
        Mock::given(method("POST"))
            .and(path("/submit"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"score": 1.0})))
            .expect(0)
            .mount(&server)
            .await;

        let orchestrator = RankingOrchestrator::new(config_for(&server, true)).unwrap();
        let report = orchestrator.run().await.unwrap();

        assert_eq!(report.ranking.len(), 2);
        assert_eq!(report.achieved_score, None);
    }

    #[tokio::test]
    async fn test_failed_fetch_aborts_run() {
        let server = MockServer::start().await;
        mount_prompt(&server, &["tt0068646", "tt0000000"]).await;
        mount_catalog(&server).await;
        Mock::given(method("GET"))
            .and(path("/omdb/"))
            .and(query_param("i", "tt0000000"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/submit"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"score": 1.0})))
            .expect(0)
            .mount(&server)
            .await;

        let orchestrator = RankingOrchestrator::new(config_for(&server, false)).unwrap();
        let err = orchestrator.run().await.unwrap_err();

        assert!(format!("{err:#}").contains("tt0000000"));
    }

    #[tokio::test]
    async fn test_failed_prompt_fetch_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/prompt"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let orchestrator = RankingOrchestrator::new(config_for(&server, false)).unwrap();
        assert!(orchestrator.run().await.is_err());
    }

    // ============================================================================
    // Unit Tests: fetch_movies
    // ============================================================================

    #[tokio::test]
    async fn test_fetch_movies_preserves_prompt_order_and_duplicates() {
        let server = MockServer::start().await;
        mount_catalog(&server).await;

        let orchestrator = RankingOrchestrator::new(config_for(&server, true)).unwrap();
        let ids: Vec<MovieId> = ["tt0111161", "tt0068646", "tt0111161"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let movies = orchestrator.fetch_movies(&ids).await.unwrap();

        let fetched: Vec<&str> = movies.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(fetched, vec!["tt0111161", "tt0068646", "tt0111161"]);
    }

    #[tokio::test]
    async fn test_fetch_movies_handles_empty_prompt() {
        let server = MockServer::start().await;
        let orchestrator = RankingOrchestrator::new(config_for(&server, true)).unwrap();

        let movies = orchestrator.fetch_movies(&[]).await.unwrap();
        assert!(movies.is_empty());
    }

    // ============================================================================
    // Unit Tests: rank_prompt
    // ============================================================================

    fn offline_setup() -> (Prompt, MovieIndex) {
        let mut old = Movie::new("old");
        old.year = "1970".to_string();
        let mut new = Movie::new("new");
        new.year = "2001".to_string();

        let prompt: Prompt = serde_json::from_value(json!({
            "movies": ["old", "new"],
            "people": [{"name": "Ada", "preferences": {"afterYear": {"value": 2000, "weight": 1}}}]
        }))
        .unwrap();

        (prompt, MovieIndex::from_movies(vec![old, new]))
    }

    #[test]
    fn test_rank_prompt_offline() {
        let (prompt, index) = offline_setup();
        let orchestrator = RankingOrchestrator::new(OrchestratorConfig::default()).unwrap();

        let ranking = orchestrator.rank_prompt(&prompt, &index).unwrap();
        assert_eq!(ranked_ids(&ranking), vec!["new", "old"]);
    }

    /// Favors one movie by id, ignoring preferences.
    struct FavoriteIdScorer(&'static str);

    impl Scorer for FavoriteIdScorer {
        fn name(&self) -> &'static str {
            "favoriteId"
        }

        fn contribution(&self, movie: &Movie, _preferences: &Preferences) -> Option<f64> {
            Some(if movie.id == self.0 { 1.0 } else { 0.0 })
        }
    }

    #[test]
    fn test_rank_prompt_with_custom_engine() {
        let (prompt, index) = offline_setup();
        let evaluator = PreferenceEvaluator::new().add_scorer(FavoriteIdScorer("old"));
        let engine = RankingEngine::new(evaluator);
        let orchestrator = RankingOrchestrator::new(OrchestratorConfig::default())
            .unwrap()
            .with_engine(engine);

        let ranking = orchestrator.rank_prompt(&prompt, &index).unwrap();
        assert_eq!(ranked_ids(&ranking), vec!["old", "new"]);
        assert_eq!(orchestrator.engine().evaluator().criteria(), vec!["favoriteId"]);
    }

    #[test]
    fn test_rank_prompt_rejects_non_finite_weight() {
        let (mut prompt, index) = offline_setup();
        prompt.people[0].preferences.after_year = Some(Criterion::new(2000, f64::INFINITY));
        let orchestrator = RankingOrchestrator::new(OrchestratorConfig::default()).unwrap();

        assert!(orchestrator.rank_prompt(&prompt, &index).is_err());
    }

    #[test]
    fn test_rank_prompt_rejects_missing_metadata() {
        let (mut prompt, index) = offline_setup();
        prompt.movies.push("ghost".to_string());
        let orchestrator = RankingOrchestrator::new(OrchestratorConfig::default()).unwrap();

        assert!(orchestrator.rank_prompt(&prompt, &index).is_err());
    }
}
