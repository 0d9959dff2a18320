use serde::{Deserialize, Serialize};

/// Value of a multi-select template field.
///
/// Submitters either tick checkboxes (`Multiple`) or answer in free text
/// (`Single`). Both shapes end up in the stored record, so consumers must
/// match on the variant rather than assume one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Single(String),
    Multiple(Vec<String>),
}

impl FieldValue {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Single(s) => s.is_empty(),
            Self::Multiple(items) => items.is_empty(),
        }
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        Self::Single(String::new())
    }
}

/// A paper entry as stored in `data/<filename>.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperRecord {
    pub title: String,
    pub authors: Vec<String>,
    pub year: String,
    pub venue: String,
    pub paper_url: String,
    pub project_page: String,
    pub code_url: String,
    pub representation: FieldValue,
    pub task: FieldValue,
    pub category: FieldValue,
    pub motion: FieldValue,
    pub interaction: String,
    pub code_availability: bool,
    pub bibtex: String,
    pub dataset: bool,
    pub survey: bool,
    /// Curated by maintainers after merge; always empty on intake.
    pub tags: Vec<String>,
    /// Filled in by maintainers; always empty on intake.
    pub doi: String,
    pub filename: String,
}

impl PaperRecord {
    /// File name of the record inside the data directory.
    pub fn json_filename(&self) -> String {
        format!("{}.json", self.filename)
    }

    /// Pretty-printed JSON with 2-space indentation.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
