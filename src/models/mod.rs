//! Data models for Bookmerge

pub mod book;
pub mod isbn;
pub mod merged;
pub mod report;
pub mod tidy;
pub mod volume;

// Re-export commonly used types
pub use book::{CatalogEntry, RawBookRow};
pub use isbn::{normalize_isbn, CanonicalIsbn};
pub use merged::{MergedRecord, SharedFields};
pub use report::{CategoryFrequency, CategoryReadCount, TidySummary};
pub use tidy::{TidyBook, TIDY_COLUMNS};
pub use volume::{SourceKind, SourcePayload, SourceRecord};
