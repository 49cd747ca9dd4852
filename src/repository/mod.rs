//! Repository layer for file persistence
//!
//! Every stage of the pipeline reads and writes plain files: the curated
//! catalog (CSV), raw provider payloads (JSON), the tidy dataset (CSV) and the
//! report tables (CSV).

pub mod catalog;
pub mod reports;
pub mod tidy;
pub mod volumes;

use serde::Serialize;
use std::fs::{self, File};
use std::path::Path;

use crate::{config::PathsConfig, error::AppResult};

/// Main repository struct holding the file locations
#[derive(Debug, Clone)]
pub struct Repository {
    pub paths: PathsConfig,
    pub catalog: catalog::CatalogRepository,
    pub volumes: volumes::VolumesRepository,
    pub tidy: tidy::TidyRepository,
    pub reports: reports::ReportsRepository,
}

impl Repository {
    /// Create a new repository over the given paths
    pub fn new(paths: PathsConfig) -> Self {
        Self {
            catalog: catalog::CatalogRepository::new(paths.raw_books.clone()),
            volumes: volumes::VolumesRepository::new(
                paths.googlebooks_volumes.clone(),
                paths.openlibrary_volumes.clone(),
            ),
            tidy: tidy::TidyRepository::new(paths.tidy_books.clone()),
            reports: reports::ReportsRepository::new(paths.reports_dir.clone()),
            paths,
        }
    }
}

/// Create the parent directory of an output file when missing
pub(crate) fn ensure_parent(path: &Path) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Write rows as CSV under an explicit header, so empty tables still get one
pub(crate) fn write_csv<T: Serialize>(path: &Path, header: &[&str], rows: &[T]) -> AppResult<()> {
    ensure_parent(path)?;
    let file = File::create(path)?;
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);
    writer.write_record(header)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
