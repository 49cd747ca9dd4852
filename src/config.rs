//! Configuration management for Bookmerge

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

/// Input and output locations of the pipeline
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PathsConfig {
    /// Manually curated catalog (CSV)
    pub raw_books: PathBuf,
    /// Raw Google Books answers (JSON)
    pub googlebooks_volumes: PathBuf,
    /// Raw Open Library answers (JSON)
    pub openlibrary_volumes: PathBuf,
    /// Canonical merged dataset (CSV)
    pub tidy_books: PathBuf,
    pub reports_dir: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GoogleBooksConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct OpenLibraryConfig {
    pub endpoint: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct FetchConfig {
    /// Minimum delay between two requests to the same provider
    pub request_interval_ms: u64,
    pub timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ReportsConfig {
    /// Ownership tag the reports are restricted to
    pub owner: String,
    pub max_words: usize,
    /// Category labels left out of the frequency table
    pub stopwords: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    /// When set, logs are also written to a daily rolling file in this directory
    pub directory: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub paths: PathsConfig,
    pub googlebooks: GoogleBooksConfig,
    pub openlibrary: OpenLibraryConfig,
    pub fetch: FetchConfig,
    pub reports: ReportsConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let mut builder = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false));

        // Explicit file given on the command line
        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path).required(true));
        }

        let config = builder
            // Add environment variables (e.g. BOOKMERGE_PATHS__RAW_BOOKS)
            .add_source(
                Environment::with_prefix("BOOKMERGE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            // Override API key from GOOGLEBOOKS_API_KEY env var if present
            .set_override_option(
                "googlebooks.api_key",
                env::var("GOOGLEBOOKS_API_KEY").ok(),
            )?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            raw_books: PathBuf::from("data/raw/books.csv"),
            googlebooks_volumes: PathBuf::from("data/external/googlebooks_volumes.json"),
            openlibrary_volumes: PathBuf::from("data/external/openbooks_volumes.json"),
            tidy_books: PathBuf::from("data/tidy/books.csv"),
            reports_dir: PathBuf::from("reports"),
        }
    }
}

impl Default for GoogleBooksConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://www.googleapis.com/books/v1/volumes".to_string(),
            api_key: None,
        }
    }
}

impl Default for OpenLibraryConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://openlibrary.org/api/books".to_string(),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            request_interval_ms: 200,
            timeout_seconds: 30,
        }
    }
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            owner: "His".to_string(),
            max_words: 50,
            stopwords: [
                "Protected DAISY",
                "In library",
                "Accessible book",
                "Internet Archive Wishlist",
                "OverDrive",
                "Open Library Staff Picks",
                "Long Now Manual for Civilization",
                "New York Times bestseller",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            directory: None,
        }
    }
}
