//! Report tables

use std::path::PathBuf;

use super::write_csv;
use crate::{
    error::AppResult,
    models::{CategoryFrequency, CategoryReadCount},
};

pub const READ_STATUS_REPORT: &str = "hehasread_category_counts.csv";
pub const CATEGORY_FREQUENCY_REPORT: &str = "categories_frequencies.csv";

#[derive(Debug, Clone)]
pub struct ReportsRepository {
    dir: PathBuf,
}

impl ReportsRepository {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn save_read_status(&self, rows: &[CategoryReadCount]) -> AppResult<PathBuf> {
        let path = self.dir.join(READ_STATUS_REPORT);
        write_csv(&path, &["he_has_read", "category", "count"], rows)?;
        Ok(path)
    }

    pub fn save_category_frequencies(&self, rows: &[CategoryFrequency]) -> AppResult<PathBuf> {
        let path = self.dir.join(CATEGORY_FREQUENCY_REPORT);
        write_csv(&path, &["category", "count"], rows)?;
        Ok(path)
    }
}
