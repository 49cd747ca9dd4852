//! Google Books volumes response flattening
//!
//! Envelope: `{"totalItems": n, "items": [{"selfLink": ..., "volumeInfo": {...}}]}`.
//! Only the first item is used; candidates are never disambiguated.

use serde_json::{Map, Value};

use super::{join_names, page_count, text, SourceExtractor};
use crate::models::{SourceKind, SourcePayload, SourceRecord};

/// Extractor for the commercial books API
#[derive(Debug, Clone, Copy, Default)]
pub struct GoogleBooksExtractor;

impl GoogleBooksExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl SourceExtractor for GoogleBooksExtractor {
    fn source(&self) -> SourceKind {
        SourceKind::GoogleBooks
    }

    fn extract_one(&self, payload: &SourcePayload) -> Option<SourceRecord> {
        let first = payload.response.get("items")?.as_array()?.first()?;

        let mut record = SourceRecord::new(SourceKind::GoogleBooks, payload.identifier.clone());
        record.link = first.get("selfLink").and_then(Value::as_str).map(String::from);

        let empty = Map::new();
        let info = match first.get("volumeInfo").and_then(Value::as_object) {
            Some(info) => info,
            None => {
                tracing::warn!("Google Books item for ISBN {} has no volumeInfo", payload.identifier);
                &empty
            }
        };

        record.title = text(info, "title");
        record.subtitle = text(info, "subtitle");
        record.publisher = text(info, "publisher");
        record.published_date = text(info, "publishedDate");
        record.description = text(info, "description");
        record.page_count = page_count(info, "pageCount");

        record.authors = join_names(info, "authors");
        record.categories = join_names(info, "categories");

        record.thumbnail_link = info
            .get("imageLinks")
            .and_then(Value::as_object)
            .and_then(|links| text(links, "thumbnail").or_else(|| text(links, "smallThumbnail")));

        // Scalar per type: a later entry of the same type replaces an earlier one
        if let Some(identifiers) = info.get("industryIdentifiers").and_then(Value::as_array) {
            for identifier in identifiers.iter().filter_map(Value::as_object) {
                let value = text(identifier, "identifier");
                match identifier.get("type").and_then(Value::as_str) {
                    Some("ISBN_13") => record.isbn_13 = value,
                    Some("ISBN_10") => record.isbn_10 = value,
                    _ => {}
                }
            }
        }

        Some(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(isbn: &str, response: Value) -> SourcePayload {
        SourcePayload::new(isbn.into(), response)
    }

    fn full_response() -> Value {
        json!({
            "kind": "books#volumes",
            "totalItems": 2,
            "items": [
                {
                    "selfLink": "https://www.googleapis.com/books/v1/volumes/abc",
                    "volumeInfo": {
                        "title": "Drawing Lessons",
                        "subtitle": "From the Old Masters",
                        "authors": ["Jane Doe", "John Roe"],
                        "publisher": "Watson-Guptill",
                        "publishedDate": "1999",
                        "description": "Études de dessin",
                        "pageCount": 224,
                        "categories": ["Art", "Drawing"],
                        "imageLinks": {
                            "smallThumbnail": "http://books.google.com/small",
                            "thumbnail": "http://books.google.com/thumb"
                        },
                        "industryIdentifiers": [
                            {"type": "ISBN_10", "identifier": "0823014886"},
                            {"type": "ISBN_13", "identifier": "9780823014880"},
                            {"type": "OTHER", "identifier": "UOM:39015"}
                        ]
                    }
                },
                {
                    "selfLink": "https://www.googleapis.com/books/v1/volumes/second",
                    "volumeInfo": {"title": "Second candidate"}
                }
            ]
        })
    }

    #[test]
    fn test_extract_full_volume() {
        let record = GoogleBooksExtractor
            .extract_one(&payload("9780823014880", full_response()))
            .unwrap();

        assert!(record.has_data);
        assert_eq!(record.source, SourceKind::GoogleBooks);
        assert_eq!(record.title.as_deref(), Some("Drawing Lessons"));
        assert_eq!(record.subtitle.as_deref(), Some("From the Old Masters"));
        assert_eq!(record.authors.as_deref(), Some("Jane Doe;John Roe"));
        assert_eq!(record.categories.as_deref(), Some("Art;Drawing"));
        assert_eq!(record.publisher.as_deref(), Some("Watson-Guptill"));
        assert_eq!(record.published_date.as_deref(), Some("1999"));
        assert_eq!(record.description.as_deref(), Some("Études de dessin"));
        assert_eq!(record.page_count, Some(224));
        assert_eq!(record.thumbnail_link.as_deref(), Some("http://books.google.com/thumb"));
        assert_eq!(record.isbn_10.as_deref(), Some("0823014886"));
        assert_eq!(record.isbn_13.as_deref(), Some("9780823014880"));
        assert_eq!(
            record.link.as_deref(),
            Some("https://www.googleapis.com/books/v1/volumes/abc")
        );
        assert!(record.subjects.is_none());
        assert!(record.dewey_decimal_class.is_none());
    }

    #[test]
    fn test_no_items_yields_no_record() {
        let response = json!({"kind": "books#volumes", "totalItems": 0});
        assert!(GoogleBooksExtractor.extract_one(&payload("1", response)).is_none());
        assert!(GoogleBooksExtractor
            .extract_one(&payload("1", json!({"items": []})))
            .is_none());
        assert!(GoogleBooksExtractor.extract_one(&payload("1", Value::Null)).is_none());
    }

    #[test]
    fn test_missing_fields_stay_unset() {
        let response = json!({"items": [{"volumeInfo": {"title": "Only a title"}}]});
        let record = GoogleBooksExtractor.extract_one(&payload("1", response)).unwrap();
        assert_eq!(record.title.as_deref(), Some("Only a title"));
        assert!(record.subtitle.is_none());
        assert!(record.authors.is_none());
        assert!(record.page_count.is_none());
        assert!(record.thumbnail_link.is_none());
        assert!(record.link.is_none());
    }

    #[test]
    fn test_missing_volume_info_keeps_record() {
        let response = json!({"items": [{"selfLink": "link"}]});
        let record = GoogleBooksExtractor.extract_one(&payload("1", response)).unwrap();
        assert!(record.has_data);
        assert_eq!(record.link.as_deref(), Some("link"));
        assert!(record.title.is_none());
    }

    #[test]
    fn test_small_thumbnail_fallback() {
        let response = json!({"items": [{"volumeInfo": {
            "imageLinks": {"smallThumbnail": "small"}
        }}]});
        let record = GoogleBooksExtractor.extract_one(&payload("1", response)).unwrap();
        assert_eq!(record.thumbnail_link.as_deref(), Some("small"));
    }

    #[test]
    fn test_last_identifier_of_a_type_wins() {
        let response = json!({"items": [{"volumeInfo": {
            "industryIdentifiers": [
                {"type": "ISBN_13", "identifier": "9780000000001"},
                {"type": "ISBN_13", "identifier": "9780000000002"}
            ]
        }}]});
        let record = GoogleBooksExtractor.extract_one(&payload("1", response)).unwrap();
        assert_eq!(record.isbn_13.as_deref(), Some("9780000000002"));
        assert!(record.isbn_10.is_none());
    }

    #[test]
    fn test_extract_skips_and_flags() {
        let payloads = vec![
            payload("9780823014880", full_response()),
            payload("fo49o28ytb26", json!({"totalItems": 0})),
            payload("123", json!({"items": [{"volumeInfo": {}}]})),
        ];
        let records = GoogleBooksExtractor.extract(&payloads);
        assert_eq!(records.len(), 2);
        assert!(records.len() < payloads.len());
        assert!(records.iter().all(|r| r.has_data));
        assert_eq!(records[0].no_dash_isbn.as_str(), "9780823014880");
        assert_eq!(records[1].no_dash_isbn.as_str(), "123");
    }
}
