//! The paper list index (`data/paper-list.json`).
//!
//! The index is shared by every intake run and updated as a plain
//! read-modify-write: load a snapshot, compute the next state, write it back.
//! No lock is taken. Two runs that overlap can lose an entry, so callers
//! must serialize invocations themselves (e.g. a workflow concurrency group).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{IntakeError, Result};

/// `lastUpdated` format, local time.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current local time in [`TIMESTAMP_FORMAT`].
pub fn now_timestamp() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperList {
    pub last_updated: String,
    pub total_papers: usize,
    pub files: Vec<String>,
    /// Keys maintainers added by hand; written back after `files`.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl PaperList {
    pub fn new(now: &str) -> Self {
        Self {
            last_updated: now.to_string(),
            total_papers: 0,
            files: Vec::new(),
            extra: serde_json::Map::new(),
        }
    }

    /// Load the index at `path`, or start an empty one if there is no file.
    ///
    /// A file that exists but does not decode is an error; it is never
    /// replaced with a fresh index.
    pub fn load_or_init(path: &Path, now: &str) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new(now));
        }
        let content = std::fs::read_to_string(path).map_err(|e| IntakeError::io(path, e))?;
        serde_json::from_str(&content).map_err(|source| IntakeError::MalformedIndex {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn contains(&self, filename: &str) -> bool {
        self.files.iter().any(|f| f == filename)
    }

    /// Append `filename` if absent. Returns `false`, leaving the index
    /// untouched (timestamp included), when it is already listed.
    pub fn insert(&mut self, filename: &str, now: &str) -> bool {
        if self.contains(filename) {
            return false;
        }
        self.files.push(filename.to_string());
        self.total_papers = self.files.len();
        self.last_updated = now.to_string();
        true
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|e| IntakeError::io(path, e))
    }
}

/// Add `filename` to the index at `path`, writing only when it changed.
///
/// Returns whether the file was rewritten. Re-running with the same
/// filename is a no-op, which makes retries of a failed workflow safe.
pub fn update_paper_list(path: &Path, filename: &str, now: &str) -> Result<bool> {
    let mut list = PaperList::load_or_init(path, now)?;
    if !list.insert(filename, now) {
        tracing::debug!(filename, "already in paper list");
        return Ok(false);
    }
    list.save(path)?;
    tracing::info!(
        path = %path.display(),
        filename,
        total = list.total_papers,
        "paper list updated"
    );
    Ok(true)
}
