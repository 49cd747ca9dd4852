//! Bookmerge - command line entry point
//!
//! One subcommand per pipeline stage: fetch both providers, build the tidy
//! dataset, then derive the reports from it.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use bookmerge::{
    config::LoggingConfig,
    services::fetch::{GoogleBooksClient, OpenLibraryClient},
    AppConfig, AppResult, AppState,
};

/// Command-line arguments for bookmerge
#[derive(Parser, Debug)]
#[command(name = "bookmerge")]
#[command(about = "Reconcile a personal book catalog with Google Books and Open Library metadata")]
#[command(version)]
struct Args {
    /// Additional configuration file, layered over config/default
    #[arg(short, long, env = "BOOKMERGE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Query Google Books for every catalog ISBN and save the raw answers
    FetchGooglebooks {
        /// Catalog CSV
        #[arg(long)]
        raw_books: Option<PathBuf>,
        /// Where to save the Google Books payloads (JSON)
        #[arg(long)]
        outfile: Option<PathBuf>,
        /// Google Books API key
        #[arg(long)]
        api_key: Option<String>,
    },
    /// Query Open Library for every catalog ISBN and save the raw answers
    FetchOpenlibrary {
        /// Catalog CSV
        #[arg(long)]
        raw_books: Option<PathBuf>,
        /// Where to save the Open Library payloads (JSON)
        #[arg(long)]
        outfile: Option<PathBuf>,
    },
    /// Merge the catalog with both providers into the tidy dataset
    Tidy {
        /// Catalog CSV
        #[arg(long)]
        raw_books: Option<PathBuf>,
        /// Google Books payloads (JSON)
        #[arg(long)]
        googlebooks: Option<PathBuf>,
        /// Open Library payloads (JSON)
        #[arg(long)]
        openlibrary: Option<PathBuf>,
        /// Tidy books CSV to write
        #[arg(long)]
        outfile: Option<PathBuf>,
    },
    /// Build the report tables from the tidy dataset
    Report {
        /// Tidy books CSV
        #[arg(long)]
        tidy_books: Option<PathBuf>,
        /// Folder for the report CSV files
        #[arg(long)]
        outdir: Option<PathBuf>,
        /// Ownership tag to report on
        #[arg(long)]
        owner: Option<String>,
    },
}

impl Command {
    /// Command line options take precedence over configuration
    fn apply_to(&self, config: &mut AppConfig) {
        let paths = &mut config.paths;
        match self {
            Command::FetchGooglebooks { raw_books, outfile, api_key } => {
                override_with(&mut paths.raw_books, raw_books);
                override_with(&mut paths.googlebooks_volumes, outfile);
                if api_key.is_some() {
                    config.googlebooks.api_key = api_key.clone();
                }
            }
            Command::FetchOpenlibrary { raw_books, outfile } => {
                override_with(&mut paths.raw_books, raw_books);
                override_with(&mut paths.openlibrary_volumes, outfile);
            }
            Command::Tidy { raw_books, googlebooks, openlibrary, outfile } => {
                override_with(&mut paths.raw_books, raw_books);
                override_with(&mut paths.googlebooks_volumes, googlebooks);
                override_with(&mut paths.openlibrary_volumes, openlibrary);
                override_with(&mut paths.tidy_books, outfile);
            }
            Command::Report { tidy_books, outdir, owner } => {
                override_with(&mut paths.tidy_books, tidy_books);
                override_with(&mut paths.reports_dir, outdir);
                override_with(&mut config.reports.owner, owner);
            }
        }
    }
}

fn override_with<T: Clone>(target: &mut T, value: &Option<T>) {
    if let Some(value) = value {
        *target = value.clone();
    }
}

/// Initialize tracing; the returned guard flushes the log file on drop
fn init_tracing(logging: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("bookmerge={}", logging.level).into());

    let (file_layer, guard) = match logging.directory {
        Some(ref dir) => {
            let appender = tracing_appender::rolling::daily(dir, "bookmerge.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(fmt::layer().with_writer(writer).with_ansi(false)), Some(guard))
        }
        None => (None, None),
    };

    let registry = tracing_subscriber::registry().with(filter).with(file_layer);
    if logging.format == "json" {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
    guard
}

async fn run(command: &Command, state: &AppState) -> AppResult<()> {
    let config = &state.config;
    match command {
        Command::FetchGooglebooks { .. } => {
            let client = GoogleBooksClient::new(&config.googlebooks, &config.fetch)?;
            let count = state.services.fetch.fetch_catalog(&state.repository, &client).await?;
            tracing::info!("PROCESS COMPLETED: {} Google Books payloads saved", count);
        }
        Command::FetchOpenlibrary { .. } => {
            let client = OpenLibraryClient::new(&config.openlibrary, &config.fetch)?;
            let count = state.services.fetch.fetch_catalog(&state.repository, &client).await?;
            tracing::info!("PROCESS COMPLETED: {} Open Library payloads saved", count);
        }
        Command::Tidy { .. } => {
            let summary = state.services.tidy.run()?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Command::Report { .. } => {
            let files = state.services.reports.run()?;
            println!("{}", files.read_status.display());
            println!("{}", files.category_frequencies.display());
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let mut config = AppConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    args.command.apply_to(&mut config);

    let guard = init_tracing(&config.logging);
    tracing::info!("Starting Bookmerge v{}", env!("CARGO_PKG_VERSION"));

    let state = AppState::new(config);

    if let Err(e) = run(&args.command, &state).await {
        tracing::error!("{}", e);
        eprintln!("bookmerge: {}", e);
        drop(guard);
        std::process::exit(e.exit_code());
    }

    Ok(())
}
