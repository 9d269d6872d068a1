use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::eyre;
use movie_catalog_config::{Config, PathManager};
use std::path::PathBuf;

mod commands;
mod logging;
mod output;

use commands::{config, replay, session};

#[derive(Parser)]
#[command(name = "movie-catalog")]
#[command(about = "Movie Catalog - Keep track of films, what you've watched, and what's next")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Path to config file (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive catalog session
    #[command(long_about = "Browse and edit the movie catalog interactively. The catalog starts from the configured seed films and lives only as long as the session; nothing is written to disk.")]
    Session {
        /// Start from an empty catalog instead of the configured seed films
        #[arg(long, action = ArgAction::SetTrue)]
        no_seed: bool,
    },
    /// Apply a scripted list of catalog actions and print the result
    #[command(long_about = "Read a JSON array of actions (add, edit, delete, toggle_watched, toggle_watchlist), apply them in order to a fresh catalog, report the outcome of each, and print the final catalog and watchlist.")]
    Replay {
        /// JSON file containing the actions
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Start from an empty catalog instead of the configured seed films
        #[arg(long, action = ArgAction::SetTrue)]
        no_seed: bool,
    },
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Write a configuration file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let paths = PathManager::default();
    let config_path = match cli.config {
        Some(path) => path,
        None => paths.config_file(),
    };
    let config = Config::load_or_default(&config_path)
        .map_err(|e| eyre!("Failed to load config from {}: {}", config_path.display(), e))?;
    config
        .validate()
        .map_err(|e| eyre!("Invalid config {}: {}", config_path.display(), e))?;

    let log_path = config.logging.log_path(&paths);
    if config.logging.file.is_none() && log_path.is_some() {
        paths
            .ensure_directories()
            .map_err(|e| eyre!("Failed to create log directory: {}", e))?;
    }
    logging::init_logging(cli.verbose, cli.quiet, &config.logging, log_path.as_deref())
        .map_err(|e| eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Session { no_seed } => session::run_session(&config, no_seed, &output),
        Commands::Replay { file, no_seed } => replay::run_replay(&config, &file, no_seed, &output),
        Commands::Config { cmd } => config::run_config(cmd, &config, &config_path, &output),
    }
}
