//! Open Library books API response flattening
//!
//! Envelope: `{"ISBN:<isbn>": {...}}` (`jscmd=data`), or `{}` when the
//! library knows nothing about the identifier.
//!
//! Unlike Google Books, identifiers come as lists per type
//! (`identifiers.isbn_13: [...]`) and every value is kept, joined with `;`.

use serde_json::{Map, Value};

use super::{is_empty_response, join_names, page_count, text, SourceExtractor, MULTI_VALUE_DELIMITER};
use crate::models::{SourceKind, SourcePayload, SourceRecord};

/// Extractor for the library catalog API
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenLibraryExtractor;

impl OpenLibraryExtractor {
    pub fn new() -> Self {
        Self
    }
}

/// Bibkey under which the answer for `isbn` is nested
pub fn bibkey(isbn: &str) -> String {
    format!("ISBN:{}", isbn)
}

/// Join every string of `object[key]` with the multi-value delimiter
fn join_strings(object: &Map<String, Value>, key: &str) -> Option<String> {
    let values = object.get(key)?.as_array()?;
    Some(
        values
            .iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join(MULTI_VALUE_DELIMITER),
    )
}

/// Plain text, or the `value` of a `{"type": "/type/text", "value": ...}` object
fn description(book: &Map<String, Value>) -> Option<String> {
    text(book, "description").or_else(|| {
        book.get("description")
            .and_then(Value::as_object)
            .and_then(|typed| text(typed, "value"))
    })
}

impl SourceExtractor for OpenLibraryExtractor {
    fn source(&self) -> SourceKind {
        SourceKind::OpenLibrary
    }

    fn extract_one(&self, payload: &SourcePayload) -> Option<SourceRecord> {
        if is_empty_response(&payload.response) {
            return None;
        }

        let key = bibkey(payload.identifier.as_str());
        let book = match payload.response.get(&key).and_then(Value::as_object) {
            Some(book) => book,
            None => {
                tracing::warn!("Open Library response for ISBN {} has no {} entry", payload.identifier, key);
                return None;
            }
        };

        let mut record = SourceRecord::new(SourceKind::OpenLibrary, payload.identifier.clone());
        record.link = text(book, "url");

        record.title = text(book, "title");
        record.subtitle = text(book, "subtitle");
        record.published_date = text(book, "publish_date");
        record.description = description(book);
        record.page_count = page_count(book, "number_of_pages");

        record.publisher = join_names(book, "publishers");
        record.authors = join_names(book, "authors");
        record.subjects = join_names(book, "subjects");
        record.subject_places = join_names(book, "subject_places");

        record.thumbnail_link = book
            .get("cover")
            .and_then(Value::as_object)
            .and_then(|cover| text(cover, "small"));

        if let Some(identifiers) = book.get("identifiers").and_then(Value::as_object) {
            record.isbn_13 = join_strings(identifiers, "isbn_13");
            record.isbn_10 = join_strings(identifiers, "isbn_10");
        }

        if let Some(classifications) = book.get("classifications").and_then(Value::as_object) {
            record.dewey_decimal_class = join_strings(classifications, "dewey_decimal_class");
        }

        Some(record)
    }
}
