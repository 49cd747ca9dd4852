//! Bookmerge - personal book catalog reconciliation
//!
//! Merges a manually curated catalog of owned books with the metadata two
//! external providers hold for the same ISBNs (Google Books and Open
//! Library), producing one tidy dataset plus a few summary reports.

use std::sync::Arc;

pub mod config;
pub mod error;
pub mod extract;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across commands
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub repository: repository::Repository,
    pub services: Arc<services::Services>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let repository = repository::Repository::new(config.paths.clone());
        let services = services::Services::new(repository.clone(), &config);
        Self {
            config: Arc::new(config),
            repository,
            services: Arc::new(services),
        }
    }
}
