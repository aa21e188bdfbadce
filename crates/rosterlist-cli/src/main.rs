use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "rosterlist", version, about = "Per-character recurring task checklist")]
pub struct Cli {
    /// Path to config.toml (default: ~/.config/rosterlist/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Path to the state database (default: ~/.config/rosterlist/rosterlist.db)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Evaluate resets as if it were this instant (RFC 3339)
    #[arg(long, global = true, hide = true)]
    now: Option<DateTime<Utc>>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the checklist (applies any due scheduled reset first)
    Show {
        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },
    /// Flip a task between done and not done
    Toggle {
        /// Character name
        character: String,
        /// Task name
        task: String,
    },
    /// Reset every task for every character
    Reset {
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
    /// Show reset boundaries and whether a reset is pending
    Status,
    /// Print the active catalog as JSON
    Catalog,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let ctx = commands::Context {
        config_path: cli.config,
        db_path: cli.db,
        now: cli.now.unwrap_or_else(Utc::now),
    };

    let result = match cli.command {
        Commands::Show { json } => commands::show::run(&ctx, json),
        Commands::Toggle { character, task } => commands::toggle::run(&ctx, &character, &task),
        Commands::Reset { yes } => commands::reset::run(&ctx, yes),
        Commands::Status => commands::status::run(&ctx),
        Commands::Catalog => commands::catalog::run(&ctx),
        Commands::Config { action } => commands::config::run(&ctx, action),
        Commands::Completions { shell } => commands::completions::run(shell),
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
