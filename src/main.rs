// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};

use termbatch::app_config::{self, Config};
use termbatch::{LogNotifier, MediaWikiApi, PublishAction, PublishOutcome, SnapshotSurface};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Publish all edited terms of the snapshot in one edit
    Publish(SnapshotArgs),

    /// Show the change set that would be published, without writing
    Diff(SnapshotArgs),

    /// Generate shell completions for termbatch
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct SnapshotArgs {
    /// JSON snapshot of the term rows in edit mode
    #[arg(value_name = "SNAPSHOT")]
    snapshot: PathBuf,

    /// Item id, overriding the one in the snapshot
    #[arg(short, long)]
    entity_id: Option<String>,

    /// Edit summary (empty by default)
    #[arg(short, long)]
    summary: Option<String>,

    /// maxlag hint in seconds
    #[arg(long)]
    maxlag: Option<u32>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// termbatch - publish multi-language term edits as one Wikibase edit
#[derive(Parser, Debug)]
#[command(name = "termbatch")]
#[command(version)]
#[command(about = "Batch label/description/alias edits into one Wikibase edit")]
#[command(long_about = "termbatch compares the edited term rows of an item against the live \
entity and publishes every changed label, description and alias list in a single edit.

EXAMPLES:
    termbatch diff snapshot.json                 # Show what would be published
    termbatch publish snapshot.json              # Publish in one edit
    termbatch publish -e Q42 snapshot.json       # Override the item id
    termbatch completions bash > termbatch.bash  # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. If the file doesn't
    exist, a default one is created. Set api.access_token to an OAuth 2
    owner-only token to edit as a logged-in user.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let _ = writeln!(
                std::io::stderr(),
                "\x1B[{}m{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // The level is lowered or raised once the config is loaded
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "termbatch", &mut std::io::stdout());
            Ok(())
        }
        Commands::Publish(args) => run_publish(args).await,
        Commands::Diff(args) => run_diff(args).await,
    }
}

/// Load the config, apply CLI overrides and build the action and surface
fn prepare(args: &SnapshotArgs) -> Result<(PublishAction<MediaWikiApi, LogNotifier>, SnapshotSurface)> {
    if let Some(level) = &args.log_level {
        log::set_max_level(app_config::LogLevel::from(level.clone()).to_level_filter());
    }

    let mut config = Config::load_or_create(Path::new(&args.config_path))?;

    if let Some(level) = &args.log_level {
        config.log_level = level.clone().into();
    } else {
        log::set_max_level(config.log_level.to_level_filter());
    }
    if let Some(summary) = &args.summary {
        config.edit.summary = summary.clone();
    }
    if let Some(maxlag) = args.maxlag {
        config.edit.maxlag = maxlag;
    }

    config.validate().context("Configuration validation failed")?;

    let mut surface = SnapshotSurface::from_file(&args.snapshot)?;
    if let Some(entity_id) = &args.entity_id {
        surface = surface.with_entity_id(entity_id.clone());
    }

    let api = MediaWikiApi::from_config(&config.api)?;
    info!("Using API endpoint {}", api.endpoint());

    let action = PublishAction::new(api, LogNotifier).with_options(config.edit.options());
    Ok((action, surface))
}

async fn run_publish(args: SnapshotArgs) -> Result<()> {
    let (action, surface) = prepare(&args)?;

    match action.publish(&surface).await {
        PublishOutcome::Saved {
            entity,
            change_count,
            revision,
        } => {
            match revision {
                Some(revision) => info!("{}: {} change(s) saved as revision {}", entity, change_count, revision),
                None => info!("{}: {} change(s) saved", entity, change_count),
            }
            Ok(())
        }
        PublishOutcome::NoChange | PublishOutcome::Ignored => Ok(()),
        PublishOutcome::InvalidEntity => Err(anyhow!("No item id could be determined")),
        PublishOutcome::Failed => Err(anyhow!("Publishing failed")),
    }
}

async fn run_diff(args: SnapshotArgs) -> Result<()> {
    let (action, surface) = prepare(&args)?;

    let (id, diff) = action.preview(&surface).await?;
    if diff.is_noop() {
        info!("{}: nothing changed", id);
        return Ok(());
    }

    info!("{}: {} change(s)", id, diff.change_count);
    let payload = serde_json::to_string_pretty(&diff.change_set)
        .context("Failed to serialize change set")?;
    println!("{}", payload);

    Ok(())
}
