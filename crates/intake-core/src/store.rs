use std::path::PathBuf;

use crate::list::update_paper_list;
use crate::record::PaperRecord;
use crate::{IntakeError, Result};

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_LIST_FILE: &str = "paper-list.json";

/// Flat-file paper database: one JSON file per paper plus the list index.
#[derive(Debug, Clone)]
pub struct RecordStore {
    data_dir: PathBuf,
    list_file: String,
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR)
    }
}

impl RecordStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            list_file: DEFAULT_LIST_FILE.to_string(),
        }
    }

    pub fn with_list_file(mut self, list_file: impl Into<String>) -> Self {
        self.list_file = list_file.into();
        self
    }

    pub fn list_path(&self) -> PathBuf {
        self.data_dir.join(&self.list_file)
    }

    pub fn record_path(&self, slug: &str) -> PathBuf {
        self.data_dir.join(format!("{slug}.json"))
    }

    pub fn ensure_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.data_dir).map_err(|e| IntakeError::io(&self.data_dir, e))
    }

    /// Title of the record already stored under `slug`, if any.
    ///
    /// Files that can't be read or decoded count as absent.
    pub fn existing_title(&self, slug: &str) -> Option<String> {
        let content = std::fs::read_to_string(self.record_path(slug)).ok()?;
        let value: serde_json::Value = serde_json::from_str(&content).ok()?;
        value["title"].as_str().map(String::from)
    }

    /// Write `record` to `<data_dir>/<filename>.json`, replacing any
    /// existing file. Returns the path written.
    pub fn write_record(&self, record: &PaperRecord) -> Result<PathBuf> {
        let path = self.record_path(&record.filename);
        let json = record.to_json_pretty()?;
        std::fs::write(&path, json).map_err(|e| IntakeError::io(&path, e))?;
        tracing::debug!(path = %path.display(), "wrote paper record");
        Ok(path)
    }

    /// Add `json_filename` to the list index. See [`update_paper_list`].
    pub fn add_to_index(&self, json_filename: &str, now: &str) -> Result<bool> {
        update_paper_list(&self.list_path(), json_filename, now)
    }
}
