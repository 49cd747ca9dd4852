//! Canonical output row (the tidy books dataset)

use serde::{Deserialize, Serialize};

use super::isbn::CanonicalIsbn;

/// CSV column order of the tidy dataset
pub const TIDY_COLUMNS: &[&str] = &[
    "title",
    "subtitle",
    "ownership",
    "he_has_read",
    "no_dash_isbn",
    "has_googlebooks_data",
    "has_openbooks_data",
    "authors",
    "publisher",
    "published_date",
    "page_count",
    "description",
    "categories",
    "category",
    "subcategory",
    "subjects",
    "subject_places",
    "googlebooks_link",
    "openbooks_link",
    "thumbnail_link",
    "dewey_decimal_class",
    "isbn_10",
    "isbn_13",
];

/// One book of the tidy dataset. Field order is the column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TidyBook {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub ownership: Option<String>,
    pub he_has_read: Option<u8>,
    pub no_dash_isbn: CanonicalIsbn,
    pub has_googlebooks_data: u8,
    pub has_openbooks_data: u8,
    pub authors: Option<String>,
    pub publisher: Option<String>,
    pub published_date: Option<String>,
    pub page_count: Option<u32>,
    pub description: Option<String>,
    /// Google Books categories
    pub categories: Option<String>,
    /// Curator category
    pub category: Option<String>,
    /// Curator subcategory
    pub subcategory: Option<String>,
    pub subjects: Option<String>,
    pub subject_places: Option<String>,
    pub googlebooks_link: Option<String>,
    pub openbooks_link: Option<String>,
    pub thumbnail_link: Option<String>,
    pub dewey_decimal_class: Option<String>,
    pub isbn_10: Option<String>,
    pub isbn_13: Option<String>,
}
