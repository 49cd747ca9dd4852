//! Provider response flattening
//!
//! Each provider answers with its own JSON envelope. An extractor turns the
//! persisted payloads of one provider into flat [`SourceRecord`]s, one per
//! identifier that carried usable data. Identifiers without data produce no
//! record at all; missing keys only leave the matching field unset.

pub mod googlebooks;
pub mod openlibrary;

pub use googlebooks::GoogleBooksExtractor;
pub use openlibrary::OpenLibraryExtractor;

use serde_json::{Map, Value};

use crate::models::{SourceKind, SourcePayload, SourceRecord};

/// Separator used to store multi-valued fields in a single cell
pub const MULTI_VALUE_DELIMITER: &str = ";";

/// Flattens the payloads of one provider
pub trait SourceExtractor {
    /// Provider handled by this extractor
    fn source(&self) -> SourceKind;

    /// Flatten one payload, or `None` when it carries no usable data
    fn extract_one(&self, payload: &SourcePayload) -> Option<SourceRecord>;

    /// Flatten every payload, keeping input order
    fn extract(&self, payloads: &[SourcePayload]) -> Vec<SourceRecord> {
        let records: Vec<SourceRecord> = payloads
            .iter()
            .filter_map(|payload| {
                let record = self.extract_one(payload);
                if record.is_none() {
                    tracing::debug!("No {} data for ISBN {}", self.source(), payload.identifier);
                }
                record
            })
            .collect();

        tracing::info!(
            "Extracted {} {} records from {} payloads",
            records.len(),
            self.source(),
            payloads.len()
        );
        records
    }
}

/// Scalar value rendered as text, if present
pub(crate) fn text(object: &Map<String, Value>, key: &str) -> Option<String> {
    match object.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Page count, accepting numbers and numeric strings
pub(crate) fn page_count(object: &Map<String, Value>, key: &str) -> Option<u32> {
    match object.get(key)? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0 && *f >= 0.0).map(|f| f as u64))
            .and_then(|v| u32::try_from(v).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Display name of one list entry: the string itself, or its `name` attribute
fn display_name(entry: &Value) -> Option<String> {
    match entry {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(o) => o.get("name").and_then(Value::as_str).map(String::from),
        _ => None,
    }
}

/// Join the display names of a list with [`MULTI_VALUE_DELIMITER`], keeping source order
pub(crate) fn join_names(object: &Map<String, Value>, key: &str) -> Option<String> {
    let entries = object.get(key)?.as_array()?;
    Some(
        entries
            .iter()
            .filter_map(display_name)
            .collect::<Vec<_>>()
            .join(MULTI_VALUE_DELIMITER),
    )
}

/// Null, false, zero and empty strings or containers carry nothing
pub(crate) fn is_empty_response(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}
