//! Tidy books dataset (canonical CSV)

use std::fs::File;
use std::path::PathBuf;

use super::write_csv;
use crate::{
    error::{AppError, AppResult},
    models::{TidyBook, TIDY_COLUMNS},
};

#[derive(Debug, Clone)]
pub struct TidyRepository {
    path: PathBuf,
}

impl TidyRepository {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Write the dataset, replacing any previous run.
    ///
    /// CSV has no null, so an empty text value and an absent one are both
    /// written as an empty cell and both read back as absent.
    pub fn save(&self, books: &[TidyBook]) -> AppResult<()> {
        write_csv(&self.path, TIDY_COLUMNS, books)?;
        tracing::info!("Saved {} books to {}", books.len(), self.path.display());
        Ok(())
    }

    pub fn load(&self) -> AppResult<Vec<TidyBook>> {
        let file = File::open(&self.path).map_err(|e| {
            AppError::MissingInput(format!("cannot read tidy books {}: {}", self.path.display(), e))
        })?;
        let mut reader = csv::Reader::from_reader(file);
        let books = reader.deserialize().collect::<Result<Vec<TidyBook>, _>>()?;
        Ok(books)
    }
}
