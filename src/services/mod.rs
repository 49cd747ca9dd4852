//! Pipeline services

pub mod fetch;
pub mod merge;
pub mod projector;
pub mod reports;
pub mod tidy;

use std::sync::Arc;

use crate::{config::AppConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub fetch: Arc<fetch::FetchService>,
    pub tidy: tidy::TidyService,
    pub reports: reports::ReportsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, config: &AppConfig) -> Self {
        Self {
            fetch: Arc::new(fetch::FetchService::new(&config.fetch)),
            tidy: tidy::TidyService::new(repository.clone()),
            reports: reports::ReportsService::new(repository, config.reports.clone()),
        }
    }
}
