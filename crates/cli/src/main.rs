use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::{Criterion, Movie, MovieIndex, Person, Preferences, Prompt};
use rand::Rng;
use scoring::{RankingEngine, ScoredMovie};
use server::{OrchestratorConfig, RankingOrchestrator};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::info;

/// Reel Rank - preference-weighted movie ranking
#[derive(Parser)]
#[command(name = "reel-rank")]
#[command(
    about = "Rank movies by the weighted preferences of a group of people",
    long_about = None
)]
struct Cli {
    /// Base URL of the ranking service
    #[arg(long, env = "REEL_API_URL", default_value = "http://localhost:8080")]
    api_url: String,

    /// Base URL of the movie metadata service
    #[arg(long, env = "REEL_METADATA_URL", default_value = "http://www.omdbapi.com")]
    metadata_url: String,

    /// API key sent to both services
    #[arg(long, env = "REEL_API_KEY", default_value = "", hide_env_values = true)]
    api_key: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "REEL_TIMEOUT_SECS", default_value = "30")]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a prompt, rank it and submit the result
    Run {
        /// Rank but do not submit
        #[arg(long)]
        dry_run: bool,
    },

    /// Rank a prompt from a local JSON fixture
    Rank {
        /// Fixture file with `prompt` and `movies`
        #[arg(long)]
        input: PathBuf,

        /// Show each person's contribution per movie
        #[arg(long)]
        explain: bool,

        /// Number of movies to display
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Rank a synthetic roster and report timing
    Benchmark {
        /// Number of movies to rank
        #[arg(long, default_value = "1000")]
        movies: usize,

        /// Number of people voting
        #[arg(long, default_value = "10")]
        people: usize,

        /// Number of rankings to time
        #[arg(long, default_value = "20")]
        iterations: usize,
    },
}

/// One line of ranking output
struct RankedMovie<'a> {
    rank: usize,
    scored: &'a ScoredMovie,
    title: Option<&'a str>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Values from .env become clap's env fallbacks
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = OrchestratorConfig::default();
    config.api.api_base_url = cli.api_url;
    config.api.metadata_base_url = cli.metadata_url;
    config.api.api_key = cli.api_key;
    config.api.request_timeout = Duration::from_secs(cli.timeout_secs);

    match cli.command {
        Commands::Run { dry_run } => {
            config.dry_run = dry_run;
            handle_run(config).await?
        }
        Commands::Rank {
            input,
            explain,
            limit,
        } => handle_rank(config, input, explain, limit).await?,
        Commands::Benchmark {
            movies,
            people,
            iterations,
        } => handle_benchmark(movies, people, iterations).await?,
    }

    Ok(())
}

/// Handle the 'run' command
async fn handle_run(config: OrchestratorConfig) -> Result<()> {
    let orchestrator = RankingOrchestrator::new(config)?;

    let start = Instant::now();
    let report = orchestrator.run().await.context("Ranking run failed")?;

    let ranked: Vec<RankedMovie> = report
        .ranking
        .iter()
        .enumerate()
        .map(|(i, scored)| RankedMovie {
            rank: i + 1,
            scored,
            title: report.title_of(&scored.movie_id),
        })
        .collect();
    print_ranking(&ranked);

    match report.achieved_score {
        Some(score) => println!(
            "{} Submitted in {:?}, achieved score: {}",
            "✓".green(),
            start.elapsed(),
            score.to_string().bold()
        ),
        None => println!("{} Dry run, ranking not submitted", "•".yellow()),
    }
    Ok(())
}

/// Handle the 'rank' command
async fn handle_rank(
    config: OrchestratorConfig,
    input: PathBuf,
    explain: bool,
    limit: Option<usize>,
) -> Result<()> {
    println!("Loading fixture from {}...", input.display());
    let (prompt, index) = MovieIndex::load_fixture(&input)
        .with_context(|| format!("Failed to load fixture {}", input.display()))?;

    info!(
        "Loaded {} movies and {} people",
        index.len(),
        prompt.people.len()
    );

    let orchestrator = RankingOrchestrator::new(config)?;
    let start = Instant::now();
    let (prompt, index, ranking) = tokio::task::spawn_blocking({
        let orchestrator = orchestrator.clone();
        move || {
            let ranking = orchestrator.rank_prompt(&prompt, &index);
            (prompt, index, ranking)
        }
    })
    .await
    .context("Ranking task panicked")?;
    let ranking = ranking?;
    info!("Ranked {} movies in {:?}", ranking.len(), start.elapsed());

    let shown = limit.unwrap_or(ranking.len()).min(ranking.len());
    let ranked: Vec<RankedMovie> = ranking[..shown]
        .iter()
        .enumerate()
        .map(|(i, scored)| RankedMovie {
            rank: i + 1,
            scored,
            title: index.get_movie(&scored.movie_id).map(|m| m.title.as_str()),
        })
        .collect();
    print_ranking(&ranked);

    if explain {
        print_explanations(&orchestrator, &ranked, &index, &prompt);
    }
    Ok(())
}

/// Handle the 'benchmark' command
async fn handle_benchmark(movies: usize, people: usize, iterations: usize) -> Result<()> {
    let iterations = iterations.max(1);
    let (catalog, roster) = synthetic_prompt(movies, people);
    println!(
        "Ranking {} movies for {} people, {} iterations",
        catalog.len(),
        roster.len(),
        iterations
    );

    let mut timings = tokio::task::spawn_blocking(move || {
        let engine = RankingEngine::default();
        (0..iterations)
            .map(|_| {
                let start = Instant::now();
                let ranking = engine.rank(&catalog, &roster);
                std::hint::black_box(ranking);
                start.elapsed()
            })
            .collect::<Vec<Duration>>()
    })
    .await
    .context("Benchmark task panicked")?;

    let total_time: Duration = timings.iter().sum();
    let avg_latency = total_time / timings.len() as u32;
    timings.sort();
    let p50 = timings[timings.len() / 2];
    let p95 = timings[((timings.len() as f32 * 0.95) as usize).min(timings.len() - 1)];
    let throughput = (movies * iterations) as f64 / total_time.as_secs_f64();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Total time: {:?}", total_time);
    println!("Average ranking: {:?}", avg_latency);
    println!("P50: {:?}", p50);
    println!("P95: {:?}", p95);
    println!("Throughput: {:.0} movies/second", throughput);
    Ok(())
}

fn synthetic_prompt(movies: usize, people: usize) -> (Vec<Movie>, Vec<Person>) {
    const GENRES: [&str; 5] = ["Drama", "Comedy", "Crime, Drama", "Sci-Fi", "Animation"];
    const RATINGS: [&str; 5] = ["G", "PG", "PG-13", "R", "NC-17"];
    const ACTORS: [&str; 4] = ["Tom Hanks", "Meryl Streep", "Denzel Washington", "Viola Davis"];

    let mut rng = rand::rng();

    let catalog = (0..movies)
        .map(|i| {
            let mut movie = Movie::new(format!("tt{:07}", i));
            movie.title = format!("Movie {}", i);
            movie.year = rng.random_range(1950..2025).to_string();
            movie.rated = RATINGS[rng.random_range(0..RATINGS.len())].to_string();
            movie.runtime = format!("{}h {}min", rng.random_range(1..4), rng.random_range(0..60));
            movie.genre = GENRES[rng.random_range(0..GENRES.len())].to_string();
            movie.actors = format!(
                "{}, {}",
                ACTORS[rng.random_range(0..ACTORS.len())],
                ACTORS[rng.random_range(0..ACTORS.len())]
            );
            movie.plot = "a detective hunts a thief across a city at night".to_string();
            movie.ratings = vec![data_loader::ExternalRating {
                source: data_loader::ROTTEN_TOMATOES.to_string(),
                value: format!("{}%", rng.random_range(0..=100)),
            }];
            movie
        })
        .collect();

    let roster = (0..people)
        .map(|i| {
            let preferences = Preferences {
                after_year: Some(Criterion::new(
                    rng.random_range(1950..2025),
                    rng.random_range(-5.0..5.0),
                )),
                favorite_genre: Some(Criterion::new(
                    GENRES[rng.random_range(0..GENRES.len())].to_lowercase(),
                    rng.random_range(0.0..5.0),
                )),
                favorite_actors: Some(Criterion::new(
                    vec![ACTORS[rng.random_range(0..ACTORS.len())].to_string()],
                    rng.random_range(0.0..5.0),
                )),
                favorite_plot_elements: Some(Criterion::new(
                    vec!["thief".to_string(), "city".to_string()],
                    rng.random_range(0.0..2.0),
                )),
                maximum_age_rating: Some(Criterion::new(
                    RATINGS[rng.random_range(0..RATINGS.len())].to_string(),
                    rng.random_range(0.0..3.0),
                )),
                minimum_rotten_tomatoes_score: Some(Criterion::new(
                    rng.random_range(0.0..100.0),
                    rng.random_range(0.0..3.0),
                )),
                ..Default::default()
            };
            Person::new(format!("person-{}", i), preferences)
        })
        .collect();

    (catalog, roster)
}

/// Helper function to format and print a ranking
fn print_ranking(ranked: &[RankedMovie]) {
    println!("{}", "Ranking:".bold().blue());
    for entry in ranked {
        let score = format!("{:.2}", entry.scored.score);
        let score = if entry.scored.score > 0.0 {
            score.green()
        } else if entry.scored.score < 0.0 {
            score.red()
        } else {
            score.normal()
        };
        println!(
            "{}. {} ({}) - Score: {}",
            entry.rank.to_string().green(),
            entry.title.unwrap_or("untitled"),
            entry.scored.movie_id,
            score
        );
    }
}

fn print_explanations(
    orchestrator: &RankingOrchestrator,
    ranked: &[RankedMovie],
    index: &MovieIndex,
    prompt: &Prompt,
) {
    let evaluator = orchestrator.engine().evaluator();
    println!("{}", "Breakdown:".bold().blue());
    for entry in ranked {
        let Some(movie) = index.get_movie(&entry.scored.movie_id) else {
            continue;
        };
        let breakdown = evaluator.breakdown(movie, &prompt.people);
        println!("{} {}", entry.rank.to_string().green(), movie.id.bold());
        for person in breakdown.contributors() {
            let parts = person
                .contributions
                .iter()
                .filter(|c| c.amount != 0.0)
                .map(|c| format!("{} {:+.2}", c.criterion, c.amount))
                .collect::<Vec<_>>()
                .join(", ");
            println!("   {}: {:+.2} [{}]", person.name, person.total, parts);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_path() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../fixtures/movie_night.json")
    }

    #[tokio::test]
    async fn test_rank_bundled_fixture_with_explanations() {
        let result =
            handle_rank(OrchestratorConfig::default(), fixture_path(), true, Some(2)).await;
        assert!(result.is_ok(), "ranking the fixture failed: {:?}", result);
    }

    #[tokio::test]
    async fn test_rank_missing_fixture_is_error() {
        let result = handle_rank(
            OrchestratorConfig::default(),
            PathBuf::from("does/not/exist.json"),
            false,
            None,
        )
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_benchmark_small_roster() {
        assert!(handle_benchmark(5, 2, 3).await.is_ok());
    }
}
