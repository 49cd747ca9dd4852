//! Raw provider payloads (one JSON array per provider)

use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

use super::ensure_parent;
use crate::{
    error::{AppError, AppResult},
    models::{SourceKind, SourcePayload},
};

#[derive(Debug, Clone)]
pub struct VolumesRepository {
    googlebooks: PathBuf,
    openlibrary: PathBuf,
}

impl VolumesRepository {
    pub fn new(googlebooks: PathBuf, openlibrary: PathBuf) -> Self {
        Self { googlebooks, openlibrary }
    }

    pub fn path(&self, source: SourceKind) -> &PathBuf {
        match source {
            SourceKind::GoogleBooks => &self.googlebooks,
            SourceKind::OpenLibrary => &self.openlibrary,
        }
    }

    /// Load the payloads saved by a previous fetch.
    ///
    /// An unreadable file or one that is not a JSON array is fatal. An entry
    /// that does not decode as a payload is logged and skipped.
    pub fn load(&self, source: SourceKind) -> AppResult<Vec<SourcePayload>> {
        let path = self.path(source);
        let file = File::open(path).map_err(|e| {
            AppError::MissingInput(format!("cannot read {} volumes {}: {}", source, path.display(), e))
        })?;
        let entries: Vec<Value> = serde_json::from_reader(BufReader::new(file))?;

        let total = entries.len();
        let mut payloads = Vec::with_capacity(total);
        for (idx, entry) in entries.into_iter().enumerate() {
            match serde_json::from_value::<SourcePayload>(entry) {
                Ok(payload) => payloads.push(payload),
                Err(e) => {
                    tracing::warn!(
                        "Skipping {} payload {} of {}: {}",
                        source,
                        idx,
                        path.display(),
                        e
                    );
                }
            }
        }

        tracing::debug!(
            "Loaded {} of {} {} payloads from {}",
            payloads.len(),
            total,
            source,
            path.display()
        );
        Ok(payloads)
    }

    /// Save payloads as pretty-printed UTF-8 JSON
    pub fn save(&self, source: SourceKind, payloads: &[SourcePayload]) -> AppResult<()> {
        let path = self.path(source);
        ensure_parent(path)?;
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, payloads)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        tracing::info!("Saved {} {} payloads to {}", payloads.len(), source, path.display());
        Ok(())
    }
}
