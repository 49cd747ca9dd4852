//! Reports computed from the tidy dataset
//!
//! These are the tables behind the read-status bar chart and the category
//! word cloud; rendering them is left to other tools.

use indexmap::IndexMap;
use std::collections::HashSet;
use std::path::PathBuf;

use crate::{
    config::ReportsConfig,
    error::AppResult,
    models::{CategoryFrequency, CategoryReadCount, TidyBook},
    repository::Repository,
};

/// Files written by a report run
#[derive(Debug, Clone)]
pub struct ReportFiles {
    pub read_status: PathBuf,
    pub category_frequencies: PathBuf,
}

#[derive(Clone)]
pub struct ReportsService {
    repository: Repository,
    config: ReportsConfig,
}

impl ReportsService {
    pub fn new(repository: Repository, config: ReportsConfig) -> Self {
        Self { repository, config }
    }

    /// Load the tidy dataset and write both report tables
    pub fn run(&self) -> AppResult<ReportFiles> {
        let books = self.repository.tidy.load()?;
        tracing::info!(
            "Building reports for owner {:?} from {} books",
            self.config.owner,
            books.len()
        );

        let read_status = read_status_by_category(&books, &self.config.owner);
        let frequencies = category_frequencies(
            &books,
            &self.config.owner,
            &self.config.stopwords,
            self.config.max_words,
        );

        let files = ReportFiles {
            read_status: self.repository.reports.save_read_status(&read_status)?,
            category_frequencies: self
                .repository
                .reports
                .save_category_frequencies(&frequencies)?,
        };
        tracing::info!("Read-status report saved to {}", files.read_status.display());
        tracing::info!(
            "Category frequencies saved to {}",
            files.category_frequencies.display()
        );
        Ok(files)
    }
}

fn read_label(flag: u8) -> &'static str {
    if flag == 0 {
        "No"
    } else {
        "Yes"
    }
}

/// Count owned books per (read status, curator category), most frequent first
pub fn read_status_by_category(books: &[TidyBook], owner: &str) -> Vec<CategoryReadCount> {
    let mut counts: IndexMap<(&'static str, &str), usize> = IndexMap::new();
    for book in books.iter().filter(|b| b.ownership.as_deref() == Some(owner)) {
        let (Some(flag), Some(category)) = (book.he_has_read, book.category.as_deref()) else {
            continue;
        };
        *counts.entry((read_label(flag), category)).or_default() += 1;
    }

    let mut rows: Vec<CategoryReadCount> = counts
        .into_iter()
        .map(|((label, category), count)| CategoryReadCount {
            he_has_read: label.to_string(),
            category: category.to_string(),
            count,
        })
        .collect();
    rows.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.category.cmp(&b.category))
            .then_with(|| a.he_has_read.cmp(&b.he_has_read))
    });
    rows
}

/// Frequency of each curator category label among owned books.
///
/// Multi-valued cells are split on `;`, labels are trimmed, stopwords and
/// empty labels are dropped, and only the `max_words` most frequent remain.
pub fn category_frequencies(
    books: &[TidyBook],
    owner: &str,
    stopwords: &[String],
    max_words: usize,
) -> Vec<CategoryFrequency> {
    let stopwords: HashSet<&str> = stopwords.iter().map(String::as_str).collect();
    let mut counts: IndexMap<&str, usize> = IndexMap::new();

    let labels = books
        .iter()
        .filter(|b| b.ownership.as_deref() == Some(owner))
        .filter_map(|b| b.category.as_deref())
        .flat_map(|cell| cell.split(';'))
        .map(str::trim)
        .filter(|label| !label.is_empty() && !stopwords.contains(label));
    for label in labels {
        *counts.entry(label).or_default() += 1;
    }

    let mut rows: Vec<CategoryFrequency> = counts
        .into_iter()
        .map(|(category, count)| CategoryFrequency {
            category: category.to_string(),
            count,
        })
        .collect();
    rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.category.cmp(&b.category)));
    rows.truncate(max_words);
    rows
}
