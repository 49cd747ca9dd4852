//! Catalog repository (manually curated books CSV)

use std::fs::File;
use std::path::PathBuf;

use crate::{
    error::{AppError, AppResult},
    models::{CatalogEntry, RawBookRow},
};

const ISBN_COLUMN: &str = "ISBN";

#[derive(Debug, Clone)]
pub struct CatalogRepository {
    path: PathBuf,
}

impl CatalogRepository {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Load every catalog row, normalizing identifiers.
    ///
    /// An unreadable file, a header without `ISBN`, or a file where no row
    /// decodes is fatal. Otherwise a row that cannot be decoded is logged and
    /// skipped so the rest of the catalog still goes through.
    pub fn load(&self) -> AppResult<Vec<CatalogEntry>> {
        let file = File::open(&self.path).map_err(|e| {
            AppError::MissingInput(format!("cannot read catalog {}: {}", self.path.display(), e))
        })?;

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(file);

        if !reader.headers()?.iter().any(|h| h == ISBN_COLUMN) {
            return Err(AppError::MissingInput(format!(
                "catalog {} has no {} column",
                self.path.display(),
                ISBN_COLUMN
            )));
        }

        let mut entries = Vec::new();
        let mut failed = 0usize;
        for (idx, row) in reader.deserialize::<RawBookRow>().enumerate() {
            match row {
                Ok(row) => entries.push(CatalogEntry::from(row)),
                Err(e) => {
                    failed += 1;
                    tracing::warn!("Skipping catalog row {} of {}: {}", idx + 2, self.path.display(), e);
                }
            }
        }

        if entries.is_empty() && failed > 0 {
            return Err(AppError::MissingInput(format!(
                "none of the {} rows of catalog {} could be read",
                failed,
                self.path.display()
            )));
        }

        tracing::debug!("Loaded {} catalog rows from {}", entries.len(), self.path.display());
        Ok(entries)
    }
}
