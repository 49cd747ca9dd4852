//! Aggregate tables computed from the tidy dataset

use serde::{Deserialize, Serialize};

/// Number of books in a curator category for one read status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryReadCount {
    /// `Yes` or `No`
    pub he_has_read: String,
    pub category: String,
    pub count: usize,
}

/// How often a curator category label occurs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryFrequency {
    pub category: String,
    pub count: usize,
}

/// Counts reported at the end of a tidy run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TidySummary {
    pub catalog_rows: usize,
    pub googlebooks_records: usize,
    pub openlibrary_records: usize,
    /// Rows with Google Books data
    pub googlebooks_matches: usize,
    /// Rows with Open Library data
    pub openlibrary_matches: usize,
    /// Rows matched by neither provider
    pub unmatched: usize,
    /// Canonical identifiers that are neither ISBN-10 nor ISBN-13 shaped
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suspicious_isbns: Vec<String>,
}
