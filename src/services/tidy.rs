//! Tidy pipeline: catalog + provider payloads -> tidy books dataset

use crate::{
    error::AppResult,
    extract::{GoogleBooksExtractor, OpenLibraryExtractor, SourceExtractor},
    models::{CatalogEntry, SourceKind, SourceRecord, TidyBook, TidySummary},
    repository::Repository,
    services::{merge::MergeEngine, projector},
};

#[derive(Clone)]
pub struct TidyService {
    repository: Repository,
}

impl TidyService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Run the full batch and write the tidy dataset.
    ///
    /// Every input is read before anything is merged or written, so a missing
    /// input leaves previous outputs untouched.
    pub fn run(&self) -> AppResult<TidySummary> {
        tracing::info!(
            "Creating tidy books data from {}",
            self.repository.catalog.path().display()
        );

        let catalog = self.repository.catalog.load()?;
        tracing::info!("Read {} catalog rows", catalog.len());
        if catalog.is_empty() {
            tracing::warn!("Catalog is empty, the tidy dataset will only have a header");
        }

        let googlebooks_payloads = self.repository.volumes.load(SourceKind::GoogleBooks)?;
        let openlibrary_payloads = self.repository.volumes.load(SourceKind::OpenLibrary)?;

        let googlebooks = GoogleBooksExtractor.extract(&googlebooks_payloads);
        let openlibrary = OpenLibraryExtractor.extract(&openlibrary_payloads);

        let (books, summary) = Self::tidy(&catalog, &googlebooks, &openlibrary);
        self.repository.tidy.save(&books)?;

        tracing::info!(
            "Tidy run complete: {} rows, {} with Google Books data, {} with Open Library data, {} unmatched",
            summary.catalog_rows,
            summary.googlebooks_matches,
            summary.openlibrary_matches,
            summary.unmatched
        );
        Ok(summary)
    }

    /// Merge and project already extracted tables
    pub fn tidy(
        catalog: &[CatalogEntry],
        googlebooks: &[SourceRecord],
        openlibrary: &[SourceRecord],
    ) -> (Vec<TidyBook>, TidySummary) {
        let merged = MergeEngine::merge(catalog, googlebooks, openlibrary);
        let books = projector::project(&merged);

        let mut summary = TidySummary {
            catalog_rows: catalog.len(),
            googlebooks_records: googlebooks.len(),
            openlibrary_records: openlibrary.len(),
            ..Default::default()
        };

        for row in &merged {
            let gb = row.has_googlebooks_data();
            let ol = row.has_openlibrary_data();
            summary.googlebooks_matches += usize::from(gb);
            summary.openlibrary_matches += usize::from(ol);
            summary.unmatched += usize::from(!gb && !ol);
        }

        // Malformed identifiers go through unchanged; they are only reported
        for entry in catalog {
            if !entry.no_dash_isbn.looks_like_isbn() {
                tracing::warn!(
                    "Catalog identifier {:?} does not look like an ISBN-10 or ISBN-13",
                    entry.isbn
                );
                summary.suspicious_isbns.push(entry.no_dash_isbn.to_string());
            }
        }

        (books, summary)
    }
}
