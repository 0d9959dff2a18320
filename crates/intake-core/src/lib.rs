use std::path::PathBuf;

use thiserror::Error;

pub mod config_file;
pub mod list;
pub mod record;
pub mod store;

// Re-export for convenience
pub use config_file::{CollisionPolicy, ConfigFile};
pub use list::{PaperList, TIMESTAMP_FORMAT, now_timestamp, update_paper_list};
pub use record::{FieldValue, PaperRecord};
pub use store::{DEFAULT_DATA_DIR, DEFAULT_LIST_FILE, RecordStore};

#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("ISSUE_NUMBER environment variable not set")]
    MissingIssueNumber,
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed paper list at {}: {source}", path.display())]
    MalformedIndex {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl IntakeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, IntakeError>;
