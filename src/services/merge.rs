//! Merge of the catalog with both provider tables
//!
//! Left join on the canonical ISBN: every catalog entry yields exactly one
//! merged record, in catalog order, whether or not a provider answered.
//! Shared fields take the Google Books value when present, the Open Library
//! value otherwise.

use std::collections::HashMap;

use crate::models::{CanonicalIsbn, CatalogEntry, MergedRecord, SharedFields, SourceRecord};

/// Index a provider table by ISBN, keeping the first record of each identifier
fn index_by_isbn(records: &[SourceRecord]) -> HashMap<&CanonicalIsbn, &SourceRecord> {
    let mut index = HashMap::with_capacity(records.len());
    for record in records {
        if index.contains_key(&record.no_dash_isbn) {
            tracing::debug!(
                "Ignoring repeated {} record for ISBN {}",
                record.source,
                record.no_dash_isbn
            );
            continue;
        }
        index.insert(&record.no_dash_isbn, record);
    }
    index
}

pub struct MergeEngine;

impl MergeEngine {
    /// Join `catalog` against both provider tables and resolve shared fields
    pub fn merge(
        catalog: &[CatalogEntry],
        googlebooks: &[SourceRecord],
        openlibrary: &[SourceRecord],
    ) -> Vec<MergedRecord> {
        let googlebooks = index_by_isbn(googlebooks);
        let openlibrary = index_by_isbn(openlibrary);

        catalog
            .iter()
            .map(|entry| {
                let gb = googlebooks.get(&entry.no_dash_isbn).map(|r| (*r).clone());
                let ol = openlibrary.get(&entry.no_dash_isbn).map(|r| (*r).clone());

                let preferred = gb.as_ref().map(SharedFields::from).unwrap_or_default();
                let fallback = ol.as_ref().map(SharedFields::from).unwrap_or_default();

                MergedRecord {
                    entry: entry.clone(),
                    googlebooks: gb,
                    openlibrary: ol,
                    resolved: preferred.or(fallback),
                }
            })
            .collect()
    }
}
