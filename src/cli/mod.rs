//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod commands;
mod helpers;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use farewatch::config::{load_settings_with_options, LoadOptions};

use commands::{init, listings, run as run_cmd, status, subscriber, tags};

#[derive(Parser)]
#[command(name = "farewatch")]
#[command(about = "Flight deal aggregator and subscriber alerts")]
#[command(version)]
pub struct Cli {
    /// Data directory (overrides config file)
    #[arg(long, short = 'd', global = true)]
    data: Option<PathBuf>,

    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check for the verbose flag before clap runs, so logging can be set up first.
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory and database
    Init,

    /// Scrape all sources and alert subscribers
    Run {
        /// Keep running and repeat once a day
        #[arg(long)]
        daemon: bool,
        /// Daily run time in UTC (HH:MM), overrides the configured schedule
        #[arg(long, requires = "daemon")]
        at: Option<String>,
        /// Log alerts instead of sending them
        #[arg(long)]
        dry_run: bool,
    },

    /// List the destinations or airlines listings are tagged with
    Tags {
        #[arg(value_enum, default_value_t = TagKind::Destinations)]
        kind: TagKind,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show stored listings, newest first
    Listings {
        /// Only listings for this destination (repeatable)
        #[arg(long = "destination", short = 'D')]
        destinations: Vec<String>,
        /// Only listings for this airline (repeatable)
        #[arg(long = "airline", short = 'a')]
        airlines: Vec<String>,
        /// Only listings from this source
        #[arg(long)]
        source: Option<String>,
        /// Maximum number of listings
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Manage subscribers
    Subscriber {
        #[command(subcommand)]
        command: SubscriberCommands,
    },

    /// Show scraper watermark and database counts
    Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TagKind {
    Destinations,
    Airlines,
}

#[derive(Subcommand)]
enum SubscriberCommands {
    /// Add or update a subscriber
    Add {
        email: String,
        /// Destination to watch (repeatable, empty means all)
        #[arg(long = "destination", short = 'D')]
        destinations: Vec<String>,
        /// Airline to watch (repeatable, empty means all)
        #[arg(long = "airline", short = 'a')]
        airlines: Vec<String>,
        /// Telegram chat id alerts are sent to
        #[arg(long)]
        chat_id: Option<String>,
        /// Notification mode: daily or off
        #[arg(long, default_value = "daily")]
        mode: String,
    },
    /// List subscribers
    List {
        /// Only subscribers receiving daily alerts
        #[arg(long)]
        daily: bool,
    },
    /// Remove a subscriber by id or email
    Remove { id_or_email: String },
}

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let options = LoadOptions {
        config_path: cli.config,
        data_dir: cli.data,
    };
    let (settings, _config) = load_settings_with_options(options).await;

    match cli.command {
        Commands::Init => init::cmd_init(&settings).await,
        Commands::Run {
            daemon,
            at,
            dry_run,
        } => run_cmd::cmd_run(&settings, daemon, at.as_deref(), dry_run).await,
        Commands::Tags { kind, json } => tags::cmd_tags(kind, json),
        Commands::Listings {
            destinations,
            airlines,
            source,
            limit,
        } => {
            listings::cmd_listings(&settings, &destinations, &airlines, source.as_deref(), limit)
                .await
        }
        Commands::Subscriber { command } => match command {
            SubscriberCommands::Add {
                email,
                destinations,
                airlines,
                chat_id,
                mode,
            } => {
                subscriber::cmd_subscriber_add(
                    &settings,
                    &email,
                    &destinations,
                    &airlines,
                    chat_id,
                    &mode,
                )
                .await
            }
            SubscriberCommands::List { daily } => {
                subscriber::cmd_subscriber_list(&settings, daily).await
            }
            SubscriberCommands::Remove { id_or_email } => {
                subscriber::cmd_subscriber_remove(&settings, &id_or_email).await
            }
        },
        Commands::Status => status::cmd_status(&settings).await,
    }
}
