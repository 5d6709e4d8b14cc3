use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use netball_analytics::calculate::combinations::{MAX_COMBINATION_SIZE, MIN_COMBINATION_SIZE};
use netball_analytics::calculate::normalize::is_valid_quarter;
use netball_analytics::calculate::{
    compute_position_averages, compute_position_averages_reconciled, rank_combinations,
    rank_formations, reconcile_game, reconcile_quarter, reconcile_season,
};
use netball_analytics::config::AppConfig;
use netball_analytics::models::{parse_position_list, TeamId};
use netball_analytics::storage::{Dataset, StorageConfig};

#[derive(Parser)]
#[command(name = "netball-analytics")]
#[command(about = "Position, formation and combination analytics for netball teams")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: String,

    /// Dataset directory (overrides config)
    #[arg(long)]
    data_dir: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Average goals per game by position
    Positions {
        /// Team to analyse (overrides config)
        #[arg(long)]
        team: Option<TeamId>,

        /// Fill gaps in position data from team quarter scores
        #[arg(long)]
        reconciled: bool,
    },

    /// Rank seven-player starting formations
    Formations {
        /// Team to analyse (overrides config)
        #[arg(long)]
        team: Option<TeamId>,

        /// Only consider this quarter (1-4)
        #[arg(long)]
        quarter: Option<u8>,
    },

    /// Rank player combinations
    Combinations {
        /// Team to analyse (overrides config)
        #[arg(long)]
        team: Option<TeamId>,

        /// Players per combination (2-5)
        #[arg(long)]
        size: Option<usize>,

        /// Only players who held one of these positions (e.g. "GS,GA")
        #[arg(long)]
        positions: Option<String>,

        /// Only show per-opponent results against this opponent
        #[arg(long)]
        opponent: Option<String>,
    },

    /// Reconciled position goals for one game or quarter
    Reconcile {
        /// Team to analyse (overrides config)
        #[arg(long)]
        team: Option<TeamId>,

        /// Game ID
        #[arg(long)]
        game: i64,

        /// Quarter (1-4); all four when omitted
        #[arg(long)]
        quarter: Option<u8>,
    },

    /// Reconciled season totals
    Season {
        /// Team to analyse (overrides config)
        #[arg(long)]
        team: Option<TeamId>,
    },
}

fn init_tracing(cli: &Cli) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if cli.json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn resolve_team(flag: Option<TeamId>, config: &AppConfig) -> Result<TeamId> {
    match flag.or(config.analysis.current_team_id) {
        Some(team) => Ok(team),
        None => bail!("No team selected: pass --team or set analysis.current_team_id"),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);

    tracing::info!("Starting netball-analytics v{}", env!("CARGO_PKG_VERSION"));

    let config_path = PathBuf::from(&cli.config);
    let config = AppConfig::load_or_default(&config_path)
        .with_context(|| format!("Failed to load config from {}", cli.config))?;

    let data_dir = cli
        .data_dir
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(|| config.data_dir.clone());
    let dataset = Dataset::load(&StorageConfig::new(data_dir.clone()))
        .with_context(|| format!("Failed to load dataset from {:?}", data_dir))?;

    match cli.command {
        Commands::Positions { team, reconciled } => {
            let team = resolve_team(team, &config)?;
            let averages = if reconciled {
                compute_position_averages_reconciled(
                    &dataset.games,
                    &dataset.scores_by_game,
                    &dataset.stats_by_game,
                    team,
                )
            } else {
                compute_position_averages(&dataset.games, &dataset.stats_by_game, team)
            };
            if !averages.has_data() {
                tracing::warn!("No position statistics found for team {}", team);
            }
            print_json(&averages)?;
        }

        Commands::Formations { team, quarter } => {
            let team = resolve_team(team, &config)?;
            let quarter = quarter.or(config.analysis.quarter);
            if let Some(q) = quarter.filter(|&q| !is_valid_quarter(q)) {
                bail!("Quarter must be between 1 and 4, got {}", q);
            }
            let rankings = rank_formations(
                &dataset.games,
                &dataset.stats_by_game,
                &dataset.rosters_by_game,
                &dataset.player_directory(),
                team,
                &dataset.team_directory_for(team, config.analysis.club_id),
                quarter,
            );
            tracing::info!(
                "Ranked {} formations across {} opponents",
                rankings.general.len(),
                rankings.per_opponent.len()
            );
            print_json(&rankings)?;
        }

        Commands::Combinations {
            team,
            size,
            positions,
            opponent,
        } => {
            let team = resolve_team(team, &config)?;
            let size = size.unwrap_or(config.analysis.combination_size);
            if !(MIN_COMBINATION_SIZE..=MAX_COMBINATION_SIZE).contains(&size) {
                bail!(
                    "Combination size must be between {} and {}, got {}",
                    MIN_COMBINATION_SIZE,
                    MAX_COMBINATION_SIZE,
                    size
                );
            }
            let filter = match positions {
                Some(list) => parse_position_list(&list)?,
                None => config.analysis.position_filter.clone(),
            };

            let mut rankings = rank_combinations(
                &dataset.games,
                &dataset.stats_by_game,
                &dataset.rosters_by_game,
                &dataset.player_directory(),
                size,
                Some(filter.as_slice()),
                team,
                &dataset.team_directory_for(team, config.analysis.club_id),
            );
            if let Some(name) = opponent {
                rankings.per_opponent = rankings
                    .for_opponent(&name)
                    .into_iter()
                    .cloned()
                    .collect();
            }
            print_json(&rankings)?;
        }

        Commands::Reconcile {
            team,
            game,
            quarter,
        } => {
            let team = resolve_team(team, &config)?;
            if dataset.find_game(game).is_none() {
                tracing::warn!("Game {} not found in dataset", game);
            }
            match quarter {
                Some(q) => print_json(&reconcile_quarter(
                    game,
                    q,
                    team,
                    &dataset.scores_by_game,
                    &dataset.stats_by_game,
                ))?,
                None => print_json(&reconcile_game(
                    game,
                    team,
                    &dataset.scores_by_game,
                    &dataset.stats_by_game,
                ))?,
            }
        }

        Commands::Season { team } => {
            let team = resolve_team(team, &config)?;
            let season = reconcile_season(
                &dataset.games,
                team,
                &dataset.scores_by_game,
                &dataset.stats_by_game,
            );
            print_json(&season)?;
        }
    }

    Ok(())
}
