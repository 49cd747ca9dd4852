//! Canonical ISBN used as the join key between the catalog and both providers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Dash-free identifier derived from a raw (usually hyphenated) ISBN.
///
/// No checksum, length or character validation is applied: a malformed
/// identifier is normalized the same way and carried through the pipeline.
/// [`CanonicalIsbn::looks_like_isbn`] only reports suspicious values.
/// Deserializing normalizes too, so identifiers read back from payload files
/// always join with the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct CanonicalIsbn(String);

impl CanonicalIsbn {
    /// Normalize a raw identifier by removing every dash
    pub fn normalize(raw: &str) -> Self {
        Self(normalize_isbn(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for 13 digits, or 9 digits followed by a digit or `X`.
    pub fn looks_like_isbn(&self) -> bool {
        let bytes = self.0.as_bytes();
        match bytes.len() {
            13 => bytes.iter().all(u8::is_ascii_digit),
            10 => {
                bytes[..9].iter().all(u8::is_ascii_digit)
                    && (bytes[9].is_ascii_digit() || bytes[9] == b'X' || bytes[9] == b'x')
            }
            _ => false,
        }
    }
}

impl fmt::Display for CanonicalIsbn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CanonicalIsbn {
    fn from(raw: &str) -> Self {
        Self::normalize(raw)
    }
}

impl From<String> for CanonicalIsbn {
    fn from(raw: String) -> Self {
        Self::normalize(&raw)
    }
}

impl From<CanonicalIsbn> for String {
    fn from(isbn: CanonicalIsbn) -> Self {
        isbn.0
    }
}

impl AsRef<str> for CanonicalIsbn {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Normalize ISBN by removing dashes
pub fn normalize_isbn(raw: &str) -> String {
    raw.chars().filter(|c| *c != '-').collect()
}
