//! # Command Line Interface
//!
//! CLI for similarity lookups, player search and side-by-side comparisons.

use crate::config::SimilarityConfig;
use crate::engine::SimilarityEngine;
use crate::models::{SimilarityRequest, SimilarityResult};
use crate::window::ComparisonMode;
use anyhow::Result;
use clap::{Parser, Subcommand};
use player_store::{DatasetCache, JsonFileSource, Position};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Player similarity CLI
#[derive(Parser)]
#[command(name = "similarity-cli")]
#[command(about = "Find NFL players with similar career trajectories")]
pub struct Cli {
    /// Path to the player dataset (JSON with `seasons` and `players`)
    #[arg(short, long, default_value = "./data/players.json", global = true)]
    pub data: PathBuf,

    /// Optional TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank players most similar to a target
    Similar {
        /// Target player id
        player_id: String,
        /// Align careers by age or season number
        #[arg(long, value_enum, default_value = "season_number")]
        mode: ComparisonMode,
        /// Number of players to return
        #[arg(long)]
        max_results: Option<usize>,
        /// Compare only the first N seasons
        #[arg(long)]
        through_season: Option<u32>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Search players by name
    Search {
        /// Part of the player's name
        query: String,
        /// Restrict to one position (QB, RB, WR, TE)
        #[arg(long)]
        position: Option<Position>,
    },
    /// Show one player's profile
    Player {
        /// Player id
        player_id: String,
    },
    /// Show season rows for a target and other players side by side
    Compare {
        /// Target player id
        target: String,
        /// Players to compare against
        #[arg(required = true)]
        others: Vec<String>,
        #[arg(long, value_enum, default_value = "season_number")]
        mode: ComparisonMode,
    },
    /// Write the default configuration as TOML
    InitConfig {
        /// Output path
        path: PathBuf,
    },
}

/// Resolve the configuration: file (if any), then environment overrides
pub fn load_config(path: Option<&Path>) -> Result<SimilarityConfig> {
    let mut config = match path {
        Some(path) => SimilarityConfig::load_from_file(path)?,
        None => SimilarityConfig::default(),
    };
    config.apply_env_overrides()?;
    Ok(config)
}

/// CLI handler
pub struct CliHandler {
    engine: SimilarityEngine,
}

impl CliHandler {
    /// Create a handler; the dataset is read on the first command that needs it
    pub fn new(data_path: &Path, config: SimilarityConfig) -> Result<Self> {
        let cache = Arc::new(DatasetCache::new(Box::new(JsonFileSource::new(data_path))));
        let engine = SimilarityEngine::new(config, cache)?;
        Ok(Self { engine })
    }

    /// Handle CLI commands
    pub fn handle_command(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Similar { player_id, mode, max_results, through_season, json } => {
                let mut request = SimilarityRequest::new(player_id).with_mode(mode);
                request.max_results = max_results;
                request.through_season = through_season;
                self.show_similar(&request, json)?;
            }
            Commands::Search { query, position } => {
                self.show_search(&query, position)?;
            }
            Commands::Player { player_id } => {
                self.show_player(&player_id)?;
            }
            Commands::Compare { target, others, mode } => {
                self.show_comparison(&target, &others, mode)?;
            }
            Commands::InitConfig { path } => {
                self.engine.config().save_to_file(&path)?;
                println!("✅ Wrote default configuration to {}", path.display());
            }
        }
        Ok(())
    }

    fn show_similar(&self, request: &SimilarityRequest, json: bool) -> Result<()> {
        let result = self.engine.find_similar(request)?;
        if json {
            println!("{}", serde_json::to_string_pretty(&result)?);
            return Ok(());
        }
        print_similarity(&result);
        Ok(())
    }

    fn show_search(&self, query: &str, position: Option<Position>) -> Result<()> {
        let players = self.engine.search_players(query, position)?;

        println!("🔍 Players matching {:?} ({} found)", query, players.len());
        println!("{}", "=".repeat(60));
        for player in &players {
            println!(
                "{:<12} {:<28} {:<3} {}-{} ({} seasons)",
                player.player_id,
                player.name,
                player.position,
                player.first_season,
                player.last_season,
                player.seasons_played
            );
        }
        Ok(())
    }

    fn show_player(&self, player_id: &str) -> Result<()> {
        let profile = self.engine.player_info(player_id)?;

        println!("🏈 {} ({})", profile.name, profile.player_id);
        println!("{}", "=".repeat(60));
        println!("Position:  {}", profile.position);
        println!(
            "Career:    {}-{} ({} seasons)",
            profile.first_season,
            profile.last_season,
            profile.seasons_played()
        );
        if let Some(birth_year) = profile.birth_year {
            println!("Born:      {}", birth_year);
        }
        match &profile.draft {
            Some(draft) => {
                let position_pick =
                    draft.position_pick.map(|p| format!(", {} #{}", profile.position, p)).unwrap_or_default();
                println!(
                    "Draft:     {} round {}, pick {}{}",
                    draft.draft_year, draft.round, draft.pick, position_pick
                );
            }
            None => println!("Draft:     undrafted"),
        }
        Ok(())
    }

    fn show_comparison(&self, target: &str, others: &[String], mode: ComparisonMode) -> Result<()> {
        let rows = self.engine.comparison_data(target, others, mode)?;

        println!("📊 Comparison by {} ({} rows)", mode, rows.len());
        println!("{}", "=".repeat(80));
        println!(
            "{:<4} {:<5} {:<24} {:>6} {:>8} {:>8} {:>8} {:>8}",
            "", mode_header(mode), "Name", "Season", "PassYd", "RushYd", "RecYd", "PPR"
        );
        for row in &rows {
            let unit = match mode {
                ComparisonMode::Age => row.age.map(|a| a.to_string()).unwrap_or_else(|| "-".to_string()),
                ComparisonMode::SeasonNumber => row.season_number.to_string(),
            };
            println!(
                "{:<4} {:<5} {:<24} {:>6} {:>8} {:>8} {:>8} {:>8}",
                if row.is_target { "*" } else { "" },
                unit,
                row.name,
                row.season,
                stat(row.stats.pass_yards),
                stat(row.stats.rush_yards),
                stat(row.stats.receiving_yards),
                stat(row.stats.fantasy_points_ppr),
            );
        }
        Ok(())
    }
}

fn mode_header(mode: ComparisonMode) -> &'static str {
    match mode {
        ComparisonMode::Age => "Age",
        ComparisonMode::SeasonNumber => "Yr",
    }
}

fn stat(value: Option<f64>) -> String {
    value.map(|v| format!("{:.0}", v)).unwrap_or_else(|| "-".to_string())
}

fn score(value: Option<f64>) -> String {
    value.map(|v| format!("{:.4}", v)).unwrap_or_else(|| "-".to_string())
}

fn print_similarity(result: &SimilarityResult) {
    let range = match result.comparison_range {
        (Some(min), Some(max)) => format!("{}..={}", min, max),
        _ => "none".to_string(),
    };
    println!(
        "🎯 Players similar to {} ({}, {} {})",
        result.target.name, result.target.position, result.comparison_mode, range
    );
    println!("{}", "=".repeat(80));

    if result.is_empty() {
        println!("No comparable players found");
        return;
    }

    println!(
        "{:>3}  {:<12} {:<26} {:>8} {:>9} {:>8} {:>7}",
        "#", "Player", "Name", "Score", "Euclid", "Fantasy", "Draft"
    );
    for (idx, player) in result.similar_players.iter().enumerate() {
        println!(
            "{:>3}  {:<12} {:<26} {:>8.4} {:>9} {:>8} {:>7}",
            idx + 1,
            player.player_id,
            player.name,
            player.similarity_score,
            score(player.euclidean_score),
            score(player.fantasy_score),
            score(player.draft_score),
        );
    }
}
