//! Provider payloads and the flat records extracted from them

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use super::isbn::CanonicalIsbn;

/// External metadata provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Commercial books API (volumes search)
    GoogleBooks,
    /// Library catalog API (bibkeys lookup)
    OpenLibrary,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::GoogleBooks => "googlebooks",
            SourceKind::OpenLibrary => "openlibrary",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw answer of one provider for one identifier, as persisted between the
/// fetch and tidy stages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourcePayload {
    #[serde(rename = "no_dash_isbn", alias = "identifier")]
    pub identifier: CanonicalIsbn,
    #[serde(default)]
    pub response: Value,
}

impl SourcePayload {
    pub fn new(identifier: CanonicalIsbn, response: Value) -> Self {
        Self { identifier, response }
    }
}

/// Flattened metadata for one identifier from one provider.
///
/// Every value is `None` when the provider did not send it; an empty string
/// means the provider sent an empty value. Multi-valued fields are joined
/// with [`MULTI_VALUE_DELIMITER`](crate::extract::MULTI_VALUE_DELIMITER).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRecord {
    pub source: SourceKind,
    pub no_dash_isbn: CanonicalIsbn,
    /// Always true on an emitted record; absence of data is absence of the record
    pub has_data: bool,
    /// Deep link to the provider's own record
    pub link: Option<String>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub publisher: Option<String>,
    pub published_date: Option<String>,
    pub page_count: Option<u32>,
    pub description: Option<String>,
    pub authors: Option<String>,
    /// Google Books only
    pub categories: Option<String>,
    /// Open Library only
    pub subjects: Option<String>,
    /// Open Library only
    pub subject_places: Option<String>,
    /// Open Library only
    pub dewey_decimal_class: Option<String>,
    pub thumbnail_link: Option<String>,
    pub isbn_10: Option<String>,
    pub isbn_13: Option<String>,
}

impl SourceRecord {
    /// Empty record with the presence flag set
    pub fn new(source: SourceKind, no_dash_isbn: CanonicalIsbn) -> Self {
        Self {
            source,
            no_dash_isbn,
            has_data: true,
            link: None,
            title: None,
            subtitle: None,
            publisher: None,
            published_date: None,
            page_count: None,
            description: None,
            authors: None,
            categories: None,
            subjects: None,
            subject_places: None,
            dewey_decimal_class: None,
            thumbnail_link: None,
            isbn_10: None,
            isbn_13: None,
        }
    }
}
