//! Catalog entry joined with its provider records

use super::{book::CatalogEntry, volume::SourceRecord};

/// Fields both providers can answer, resolved to one value per row
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SharedFields {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub publisher: Option<String>,
    pub published_date: Option<String>,
    pub page_count: Option<u32>,
    pub description: Option<String>,
    pub authors: Option<String>,
    pub thumbnail_link: Option<String>,
    pub isbn_10: Option<String>,
    pub isbn_13: Option<String>,
}

impl SharedFields {
    /// Take every value present in `self`, filling the gaps from `fallback`
    pub fn or(self, fallback: SharedFields) -> SharedFields {
        SharedFields {
            title: self.title.or(fallback.title),
            subtitle: self.subtitle.or(fallback.subtitle),
            publisher: self.publisher.or(fallback.publisher),
            published_date: self.published_date.or(fallback.published_date),
            page_count: self.page_count.or(fallback.page_count),
            description: self.description.or(fallback.description),
            authors: self.authors.or(fallback.authors),
            thumbnail_link: self.thumbnail_link.or(fallback.thumbnail_link),
            isbn_10: self.isbn_10.or(fallback.isbn_10),
            isbn_13: self.isbn_13.or(fallback.isbn_13),
        }
    }
}

impl From<&SourceRecord> for SharedFields {
    fn from(record: &SourceRecord) -> Self {
        Self {
            title: record.title.clone(),
            subtitle: record.subtitle.clone(),
            publisher: record.publisher.clone(),
            published_date: record.published_date.clone(),
            page_count: record.page_count,
            description: record.description.clone(),
            authors: record.authors.clone(),
            thumbnail_link: record.thumbnail_link.clone(),
            isbn_10: record.isbn_10.clone(),
            isbn_13: record.isbn_13.clone(),
        }
    }
}

/// Result of the merge for one catalog entry
#[derive(Debug, Clone, PartialEq)]
pub struct MergedRecord {
    pub entry: CatalogEntry,
    pub googlebooks: Option<SourceRecord>,
    pub openlibrary: Option<SourceRecord>,
    pub resolved: SharedFields,
}

impl MergedRecord {
    pub fn has_googlebooks_data(&self) -> bool {
        self.googlebooks.as_ref().is_some_and(|r| r.has_data)
    }

    pub fn has_openlibrary_data(&self) -> bool {
        self.openlibrary.as_ref().is_some_and(|r| r.has_data)
    }

    /// Google Books only field
    pub fn categories(&self) -> Option<&str> {
        self.googlebooks.as_ref().and_then(|r| r.categories.as_deref())
    }

    pub fn subjects(&self) -> Option<&str> {
        self.openlibrary.as_ref().and_then(|r| r.subjects.as_deref())
    }

    pub fn subject_places(&self) -> Option<&str> {
        self.openlibrary.as_ref().and_then(|r| r.subject_places.as_deref())
    }

    pub fn dewey_decimal_class(&self) -> Option<&str> {
        self.openlibrary.as_ref().and_then(|r| r.dewey_decimal_class.as_deref())
    }

    pub fn googlebooks_link(&self) -> Option<&str> {
        self.googlebooks.as_ref().and_then(|r| r.link.as_deref())
    }

    pub fn openlibrary_link(&self) -> Option<&str> {
        self.openlibrary.as_ref().and_then(|r| r.link.as_deref())
    }
}
