use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tennis_stats::calculate::{
    day_progress, player_history, player_matches, player_report, predict_match, rating_progress,
    ratings, records,
};
use tennis_stats::config::AppConfig;
use tennis_stats::models::{
    MatchFilter, MatchResult, MatchType, NewMatch, PlayerScore, TournamentInfo, TournamentStage,
};
use tennis_stats::storage::{JsonlReader, MatchStore};

#[derive(Parser)]
#[command(name = "tennis-stats")]
#[command(about = "Match statistics, rankings and scoreline prediction for a table tennis club")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Match results file (overrides the config)
    #[arg(long)]
    data_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); overrides the config
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    /// Fail on malformed lines in the results file instead of skipping them
    #[arg(long)]
    strict: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct FilterArgs {
    /// Only matches against this opponent
    #[arg(long)]
    opponent: Option<String>,

    /// Only matches of this tournament
    #[arg(long)]
    tournament: Option<String>,

    /// Only matches of these stages (repeatable)
    #[arg(long = "stage", value_parser = parse_stage)]
    stages: Vec<TournamentStage>,

    /// Only matches of these types (repeatable)
    #[arg(long = "type", value_parser = parse_match_type)]
    match_types: Vec<MatchType>,
}

impl FilterArgs {
    fn to_filter(&self) -> MatchFilter {
        let mut filter = MatchFilter::new();
        if let Some(opponent) = &self.opponent {
            filter = filter.opponent(opponent);
        }
        if let Some(tournament) = &self.tournament {
            filter = filter.tournament(tournament);
        }
        for stage in &self.stages {
            filter = filter.stage(*stage);
        }
        for match_type in &self.match_types {
            filter = filter.match_type(*match_type);
        }
        filter
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Player statistics overall, per type and per opponent
    Stats {
        player: String,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// List a player's matches per type
    Matches {
        player: String,

        /// Order by score ratio instead of date
        #[arg(long)]
        best_first: bool,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Best and worst holder of every metric
    Records {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Players ordered by every metric
    Ratings {
        /// Rate each player on their N most recent matches only
        #[arg(long)]
        limit: Option<usize>,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Rolling history of a player's metrics
    History {
        player: String,

        /// Matches per point (defaults to the config)
        #[arg(long)]
        chunk: Option<usize>,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Day-to-day progress of a player
    Progress {
        player: String,

        /// Restrict to one match type
        #[arg(long = "type", value_parser = parse_match_type)]
        match_type: Option<MatchType>,
    },

    /// How every player's metrics moved over their most recent matches
    RatingProgress {
        /// Restrict to one match type
        #[arg(long = "only", value_parser = parse_match_type)]
        match_type: Option<MatchType>,

        /// Number of recent matches compared (defaults to the config)
        #[arg(long)]
        chunk: Option<usize>,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Predict the final score of a match
    Predict {
        player: String,

        opponent: String,

        #[arg(long = "type", value_parser = parse_match_type, default_value = "short")]
        match_type: MatchType,

        /// Only print the N most likely scores
        #[arg(long)]
        top: Option<usize>,
    },

    /// Record a finished match
    Record {
        player: String,

        player_score: u32,

        opponent: String,

        opponent_score: u32,

        #[arg(long = "type", value_parser = parse_match_type, default_value = "short")]
        match_type: MatchType,

        /// Tournament the match belongs to
        #[arg(long)]
        tournament: Option<String>,

        /// Stage within the tournament
        #[arg(long, value_parser = parse_stage)]
        stage: Option<TournamentStage>,

        /// When the match was played (RFC 3339), defaults to now
        #[arg(long)]
        date: Option<DateTime<Utc>>,

        /// Validate and print without writing
        #[arg(long)]
        dry_run: bool,
    },
}

fn parse_match_type(s: &str) -> Result<MatchType, String> {
    MatchType::parse(s).ok_or_else(|| format!("Unknown match type: {} (use short or long)", s))
}

fn parse_stage(s: &str) -> Result<TournamentStage, String> {
    TournamentStage::parse(s).ok_or_else(|| format!("Unknown tournament stage: {}", s))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = if cli.config.exists() {
        AppConfig::from_file(&cli.config)
            .with_context(|| format!("Failed to load config from {:?}", cli.config))?
    } else {
        AppConfig::default()
    };

    if let Some(data_file) = &cli.data_file {
        config.data_file = data_file.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    Ok(config)
}

fn load_matches(cli: &Cli, store: &MatchStore) -> Result<Vec<MatchResult>> {
    let matches = if cli.strict {
        JsonlReader::<MatchResult>::new(store.path().to_path_buf()).read_strict()?
    } else {
        store.load()?
    };
    info!("Loaded {} results from {:?}", matches.len(), store.path());
    Ok(matches)
}

/// Results seen from `player`'s side.
fn own_results(matches: Vec<MatchResult>, player: &str) -> Vec<MatchResult> {
    matches
        .into_iter()
        .filter(|mr| mr.player.name == player)
        .collect()
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    // Logs go to stderr so stdout stays valid JSON
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));
    let registry = tracing_subscriber::registry().with(filter);
    if cli.json_logs {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    debug!("Starting tennis-stats v{}", env!("CARGO_PKG_VERSION"));

    let store = MatchStore::new(config.data_file.clone());

    match &cli.command {
        Commands::Stats { player, filter } => {
            let matches = load_matches(&cli, &store)?;
            print_json(&player_report(player, &matches, &filter.to_filter()))?;
        }

        Commands::Matches {
            player,
            best_first,
            filter,
        } => {
            let matches = load_matches(&cli, &store)?;
            let listing = player_matches(player, &matches, &filter.to_filter(), *best_first);
            print_json(&listing)?;
        }

        Commands::Records { filter } => {
            let matches = load_matches(&cli, &store)?;
            print_json(&records(&matches, &filter.to_filter()))?;
        }

        Commands::Ratings { limit, filter } => {
            let matches = load_matches(&cli, &store)?;
            print_json(&ratings(&matches, &filter.to_filter(), *limit))?;
        }

        Commands::History {
            player,
            chunk,
            filter,
        } => {
            let matches = load_matches(&cli, &store)?;
            let chunk = chunk.unwrap_or(config.history.chunk_size);
            print_json(&player_history(player, &matches, &filter.to_filter(), chunk)?)?;
        }

        Commands::Progress { player, match_type } => {
            let matches = own_results(load_matches(&cli, &store)?, player);
            let progress = day_progress(&matches, *match_type, config.history.offset())
                .with_context(|| format!("No progress for {}", player))?;
            print_json(&progress)?;
        }

        Commands::RatingProgress {
            match_type,
            chunk,
            filter,
        } => {
            let matches = load_matches(&cli, &store)?;
            let chunk = chunk.unwrap_or(config.history.chunk_size);
            print_json(&rating_progress(
                &matches,
                &filter.to_filter(),
                *match_type,
                chunk,
            ))?;
        }

        Commands::Predict {
            player,
            opponent,
            match_type,
            top,
        } => {
            if player == opponent {
                bail!("Player can not play against themselves: {}", player);
            }
            let matches = load_matches(&cli, &store)?;
            let mut prediction =
                predict_match(&matches, player, opponent, *match_type, &config.prediction);
            if let Some(top) = top {
                prediction.outcomes.truncate(*top);
            }
            print_json(&prediction)?;
        }

        Commands::Record {
            player,
            player_score,
            opponent,
            opponent_score,
            match_type,
            tournament,
            stage,
            date,
            dry_run,
        } => {
            let submission = NewMatch {
                match_type: *match_type,
                date: date.unwrap_or_else(Utc::now),
                tournament: tournament.as_ref().map(|name| TournamentInfo {
                    name: name.clone(),
                    stage: *stage,
                }),
                player: PlayerScore {
                    name: player.clone(),
                    score: *player_score,
                },
                opponent: PlayerScore {
                    name: opponent.clone(),
                    score: *opponent_score,
                },
            };

            let results = if *dry_run {
                submission.into_results()?
            } else {
                store.record(submission)?
            };
            for result in &results {
                println!("{}", serde_json::to_string(result)?);
            }
        }
    }

    Ok(())
}
