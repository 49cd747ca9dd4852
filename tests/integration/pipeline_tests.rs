//! End-to-end runs of the tidy and report stages over fixture files

use std::fs;
use std::path::{Path, PathBuf};

use bookmerge::{
    config::PathsConfig,
    error::ErrorCode,
    models::{TidyBook, TIDY_COLUMNS},
    AppConfig, AppError, AppState,
};
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

fn state_in(dir: &TempDir, raw_books: PathBuf) -> AppState {
    let mut config = AppConfig::default();
    config.paths = PathsConfig {
        raw_books,
        googlebooks_volumes: fixture("googlebooks_volumes.json"),
        openlibrary_volumes: fixture("openbooks_volumes.json"),
        tidy_books: dir.path().join("data/tidy_books.csv"),
        reports_dir: dir.path().join("reports"),
    };
    config.reports.owner = "His".to_string();
    AppState::new(config)
}

fn find<'a>(books: &'a [TidyBook], isbn: &str, owner: &str) -> &'a TidyBook {
    books
        .iter()
        .find(|b| b.no_dash_isbn.as_str() == isbn && b.ownership.as_deref() == Some(owner))
        .expect("book not found in tidy output")
}

#[test]
fn test_tidy_run_over_fixtures() {
    let dir = tempfile::tempdir().unwrap();
    let state = state_in(&dir, fixture("raw_books.csv"));

    let summary = state.services.tidy.run().unwrap();
    assert_eq!(summary.catalog_rows, 5);
    assert_eq!(summary.googlebooks_records, 2);
    assert_eq!(summary.openlibrary_records, 2);
    assert_eq!(summary.googlebooks_matches, 2);
    assert_eq!(summary.openlibrary_matches, 3);
    assert_eq!(summary.unmatched, 1);
    assert_eq!(summary.suspicious_isbns, vec!["fo49o28ytb26".to_string()]);

    let written = fs::read_to_string(&state.config.paths.tidy_books).unwrap();
    let header = written.lines().next().unwrap();
    assert_eq!(header, TIDY_COLUMNS.join(","));

    let books = state.repository.tidy.load().unwrap();
    assert_eq!(books.len(), 5);

    // Library only: every shared field comes from Open Library
    let drawing = find(&books, "9780823014880", "His");
    assert_eq!(drawing.title.as_deref(), Some("Drawing"));
    assert_eq!(drawing.page_count, Some(224));
    assert_eq!(drawing.authors.as_deref(), Some("Giovanni Civardi"));
    assert_eq!(drawing.publisher.as_deref(), Some("Watson-Guptill"));
    assert_eq!(drawing.subjects.as_deref(), Some("Drawing;Technique"));
    assert_eq!(drawing.subject_places.as_deref(), Some("Italy"));
    assert_eq!(drawing.dewey_decimal_class.as_deref(), Some("741.2"));
    assert_eq!(drawing.isbn_10.as_deref(), Some("0823014886"));
    assert_eq!(drawing.has_googlebooks_data, 0);
    assert_eq!(drawing.has_openbooks_data, 1);
    assert_eq!(drawing.he_has_read, Some(1));
    assert_eq!(drawing.category.as_deref(), Some("Art"));
    assert_eq!(drawing.subcategory.as_deref(), Some("Technique"));
    assert!(drawing.googlebooks_link.is_none());

    // The second copy fans out to the same provider data
    let copy = find(&books, "9780823014880", "Hers");
    assert_eq!(copy.title, drawing.title);
    assert_eq!(copy.he_has_read, Some(0));

    // Both providers: Google Books wins, library-only columns still filled
    let prince = find(&books, "9782070408504", "Hers");
    assert_eq!(prince.title.as_deref(), Some("Le petit prince"));
    assert_eq!(prince.page_count, Some(97));
    assert_eq!(prince.publisher.as_deref(), Some("Gallimard"));
    assert_eq!(prince.authors.as_deref(), Some("Antoine de Saint-Exupéry"));
    assert_eq!(prince.thumbnail_link.as_deref(), Some("http://books.google.com/petitprince"));
    assert_eq!(prince.categories.as_deref(), Some("Juvenile Fiction"));
    assert_eq!(prince.subjects.as_deref(), Some("Fairy tales"));
    assert_eq!(
        prince.openbooks_link.as_deref(),
        Some("https://openlibrary.org/books/OL2M/Le_Petit_Prince")
    );
    assert_eq!(prince.has_googlebooks_data, 1);
    assert_eq!(prince.has_openbooks_data, 1);

    // Google Books only
    let pragprog = find(&books, "9780201616224", "His");
    assert_eq!(pragprog.subtitle.as_deref(), Some("From Journeyman to Master"));
    assert_eq!(pragprog.authors.as_deref(), Some("Andrew Hunt;David Thomas"));
    assert_eq!(pragprog.isbn_10.as_deref(), Some("020161622X"));
    assert_eq!(pragprog.has_openbooks_data, 0);
    assert!(pragprog.subcategory.is_none());

    // Matched by neither, kept with curator fields only
    let unknown = find(&books, "fo49o28ytb26", "His");
    assert!(unknown.title.is_none());
    assert!(unknown.authors.is_none());
    assert_eq!(unknown.has_googlebooks_data, 0);
    assert_eq!(unknown.has_openbooks_data, 0);
}

#[test]
fn test_tidy_run_is_repeatable() {
    let dir = tempfile::tempdir().unwrap();
    let state = state_in(&dir, fixture("raw_books.csv"));

    state.services.tidy.run().unwrap();
    let first = fs::read(&state.config.paths.tidy_books).unwrap();
    state.services.tidy.run().unwrap();
    let second = fs::read(&state.config.paths.tidy_books).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_report_run_after_tidy() {
    let dir = tempfile::tempdir().unwrap();
    let state = state_in(&dir, fixture("raw_books.csv"));

    state.services.tidy.run().unwrap();
    let files = state.services.reports.run().unwrap();

    let read_status = fs::read_to_string(&files.read_status).unwrap();
    let lines: Vec<&str> = read_status.lines().collect();
    assert_eq!(
        lines,
        vec!["he_has_read,category,count", "No,Art,1", "Yes,Art,1", "Yes,Computing,1"]
    );

    let frequencies = fs::read_to_string(&files.category_frequencies).unwrap();
    let lines: Vec<&str> = frequencies.lines().collect();
    assert_eq!(lines, vec!["category,count", "Art,2", "Computing,1"]);
}

#[test]
fn test_missing_catalog_is_fatal_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let state = state_in(&dir, dir.path().join("absent.csv"));

    let err = state.services.tidy.run().unwrap_err();
    assert!(matches!(err, AppError::MissingInput(_)));
    assert_eq!(err.code(), ErrorCode::NoSuchData);
    assert!(!state.config.paths.tidy_books.exists());
}

#[test]
fn test_empty_catalog_writes_header_only() {
    let dir = tempfile::tempdir().unwrap();
    let raw_books = dir.path().join("books.csv");
    fs::write(&raw_books, "ISBN,Ownership,HeHasRead,Category,SubCategory\n").unwrap();
    let state = state_in(&dir, raw_books);

    let summary = state.services.tidy.run().unwrap();
    assert_eq!(summary.catalog_rows, 0);

    let written = fs::read_to_string(&state.config.paths.tidy_books).unwrap();
    assert_eq!(written.trim_end(), TIDY_COLUMNS.join(","));
}

#[test]
fn test_non_ascii_text_survives_the_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let state = state_in(&dir, fixture("raw_books.csv"));
    state.services.tidy.run().unwrap();

    let books = state.repository.tidy.load().unwrap();
    let prince = find(&books, "9782070408504", "Hers");
    assert_eq!(
        prince.description.as_deref(),
        Some("Un pilote échoué dans le désert rencontre un petit prince.")
    );
}

#[test]
fn test_malformed_payload_entry_degrades_to_missing_data() {
    let dir = tempfile::tempdir().unwrap();
    let raw_books = dir.path().join("books.csv");
    fs::write(
        &raw_books,
        "ISBN,Ownership,HeHasRead,Category,SubCategory\n978-0-8230-1488-0,His,1,Art,\n",
    )
    .unwrap();
    let googlebooks = dir.path().join("googlebooks.json");
    fs::write(
        &googlebooks,
        r#"[
            {"no_dash_isbn": "9780823014880", "response": {"items": [{"volumeInfo": {"title": "Drawing"}}]}},
            {"response": {"totalItems": 0}}
        ]"#,
    )
    .unwrap();

    let mut config = AppConfig::default();
    config.paths = PathsConfig {
        raw_books,
        googlebooks_volumes: googlebooks,
        openlibrary_volumes: fixture("openbooks_volumes.json"),
        tidy_books: dir.path().join("tidy_books.csv"),
        reports_dir: dir.path().join("reports"),
    };
    let state = AppState::new(config);

    let summary = state.services.tidy.run().unwrap();
    assert_eq!(summary.catalog_rows, 1);
    assert_eq!(summary.googlebooks_records, 1);

    let books = state.repository.tidy.load().unwrap();
    assert_eq!(books[0].title.as_deref(), Some("Drawing"));
    assert_eq!(books[0].has_googlebooks_data, 1);
}

#[test]
fn test_catalog_without_isbn_column_stops_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let raw_books = dir.path().join("books.csv");
    fs::write(&raw_books, "Isbn13,Ownership\n9780823014880,His\n9782070408504,Hers\n").unwrap();
    let state = state_in(&dir, raw_books);

    let err = state.services.tidy.run().unwrap_err();
    assert!(matches!(err, AppError::MissingInput(_)));
    assert!(!state.config.paths.tidy_books.exists());
}
