//! Projection of merged records onto the tidy schema

use crate::models::{MergedRecord, TidyBook};

fn flag(present: bool) -> u8 {
    u8::from(present)
}

impl From<&MergedRecord> for TidyBook {
    fn from(row: &MergedRecord) -> Self {
        let resolved = row.resolved.clone();
        Self {
            title: resolved.title,
            subtitle: resolved.subtitle,
            ownership: row.entry.ownership.clone(),
            he_has_read: row.entry.he_has_read,
            no_dash_isbn: row.entry.no_dash_isbn.clone(),
            has_googlebooks_data: flag(row.has_googlebooks_data()),
            has_openbooks_data: flag(row.has_openlibrary_data()),
            authors: resolved.authors,
            publisher: resolved.publisher,
            published_date: resolved.published_date,
            page_count: resolved.page_count,
            description: resolved.description,
            categories: row.categories().map(String::from),
            category: row.entry.category.clone(),
            subcategory: row.entry.subcategory.clone(),
            subjects: row.subjects().map(String::from),
            subject_places: row.subject_places().map(String::from),
            googlebooks_link: row.googlebooks_link().map(String::from),
            openbooks_link: row.openlibrary_link().map(String::from),
            thumbnail_link: resolved.thumbnail_link,
            dewey_decimal_class: row.dewey_decimal_class().map(String::from),
            isbn_10: resolved.isbn_10,
            isbn_13: resolved.isbn_13,
        }
    }
}

/// Map merged rows to the tidy schema, one row each, order preserved
pub fn project(rows: &[MergedRecord]) -> Vec<TidyBook> {
    rows.iter().map(TidyBook::from).collect()
}
