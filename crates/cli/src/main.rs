mod menu;
mod render;

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use serieswatch_core::{
    load_config, validate_config, ConsoleNotifier, CsvShowStore, Notifier, SanitizedConfig,
    ShowCatalog, ShowStore, TmdbClient, TmdbConfig, UpdateChecker,
};

use menu::{App, Menu};

/// Env file holding `API_KEY`, read before `.env`.
const KEY_ENV_FILE: &str = "key.env";

/// Track saved TV shows and get notified about new seasons.
#[derive(Debug, Parser)]
#[command(name = "serieswatch", version, about)]
struct Cli {
    /// Config file (defaults to $SERIESWATCH_CONFIG, then ./serieswatch.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Search the catalog for a show
    Search { term: String },
    /// Save a show by catalog ID
    Add { id: u32 },
    /// List saved shows
    List,
    /// Check saved shows for new seasons
    Check,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        error!("Fatal error: {:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    dotenvy::from_filename(KEY_ENV_FILE).ok();
    dotenvy::dotenv().ok();

    let config_path = cli
        .config
        .or_else(|| std::env::var("SERIESWATCH_CONFIG").ok().map(PathBuf::from));

    info!("Loading configuration from {:?}", config_path);
    let config = load_config(config_path.as_deref()).context("Failed to load configuration")?;
    validate_config(&config).context("Configuration validation failed")?;
    info!("Configuration: {:?}", SanitizedConfig::from(&config));

    let store: Arc<dyn ShowStore> = Arc::new(
        CsvShowStore::open(&config.store.path)
            .with_context(|| format!("Failed to open store {:?}", config.store.path))?,
    );

    let catalog: Arc<dyn ShowCatalog> = Arc::new(
        TmdbClient::new(TmdbConfig::from(&config.catalog))
            .context("Failed to create TMDB client")?,
    );

    let checker = UpdateChecker::new(catalog.clone(), store.clone())
        .with_policy(config.update.on_fetch_error);
    let notifier: Arc<dyn Notifier> = Arc::new(ConsoleNotifier::new());

    let app = App::new(catalog, store, checker, notifier)
        .with_search_limit(config.catalog.search_limit)
        .with_notify_interval(Duration::from_secs(config.notifier.interval_secs));

    let stdin = io::stdin();
    let mut menu = Menu::new(&app, stdin.lock(), io::stdout());

    match cli.command {
        Some(Command::Search { term }) => menu.search(&term).await,
        Some(Command::Add { id }) => menu.add(id).await,
        Some(Command::List) => menu.list(),
        Some(Command::Check) => menu.check().await,
        None => menu.run().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_subcommands() {
        let cli = Cli::parse_from(["serieswatch", "add", "1396"]);
        assert!(matches!(cli.command, Some(Command::Add { id: 1396 })));

        let cli = Cli::parse_from(["serieswatch", "-vv", "check"]);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Some(Command::Check)));

        let cli = Cli::parse_from(["serieswatch", "search", "breaking bad", "-c", "x.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
        assert!(matches!(cli.command, Some(Command::Search { ref term }) if term == "breaking bad"));
    }

    #[test]
    fn test_no_subcommand_runs_menu() {
        let cli = Cli::parse_from(["serieswatch"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 0);
    }
}
