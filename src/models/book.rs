//! Catalog entry model (the manually curated ownership record)

use serde::{Deserialize, Serialize};

use super::isbn::CanonicalIsbn;

/// One row of the raw catalog CSV, with the curator's column names
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawBookRow {
    #[serde(rename = "ISBN")]
    pub isbn: String,
    #[serde(rename = "Ownership", default)]
    pub ownership: Option<String>,
    #[serde(rename = "HeHasRead", default)]
    pub he_has_read: Option<String>,
    #[serde(rename = "Category", default)]
    pub category: Option<String>,
    #[serde(rename = "SubCategory", default)]
    pub subcategory: Option<String>,
}

/// One owned book, keyed by its canonical ISBN
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Identifier as written by the curator (may contain dashes)
    pub isbn: String,
    pub no_dash_isbn: CanonicalIsbn,
    pub ownership: Option<String>,
    /// Read-status flag (0/1)
    pub he_has_read: Option<u8>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
}

impl CatalogEntry {
    pub fn new(isbn: impl Into<String>) -> Self {
        let isbn = isbn.into();
        Self {
            no_dash_isbn: CanonicalIsbn::normalize(&isbn),
            isbn,
            ownership: None,
            he_has_read: None,
            category: None,
            subcategory: None,
        }
    }
}

impl From<RawBookRow> for CatalogEntry {
    fn from(row: RawBookRow) -> Self {
        Self {
            no_dash_isbn: CanonicalIsbn::normalize(&row.isbn),
            isbn: row.isbn,
            ownership: row.ownership,
            he_has_read: row.he_has_read.as_deref().and_then(parse_read_flag),
            category: row.category,
            subcategory: row.subcategory,
        }
    }
}

/// Parse the read-status cell, accepting spreadsheet renderings such as `1.0`
fn parse_read_flag(cell: &str) -> Option<u8> {
    let cell = cell.trim();
    if let Ok(flag) = cell.parse::<u8>() {
        return Some(flag);
    }
    match cell.parse::<f64>() {
        Ok(v) if v == 0.0 || v == 1.0 => Some(v as u8),
        _ => {
            tracing::warn!("Unrecognized read-status value {:?}, leaving it unset", cell);
            None
        }
    }
}
