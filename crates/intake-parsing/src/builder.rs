use intake_core::{FieldValue, PaperRecord};

use crate::filename::paper_filename;
use crate::section::{Field, FieldMap, extract_fields};
use crate::selection::parse_checked_items;

/// Prefix the issue template puts in front of submission titles.
pub const DEFAULT_TITLE_MARKER: &str = "[SUBMISSION]";

pub const DATASET_FLAG: &str = "This paper has dataset contribution";
pub const SURVEY_FLAG: &str = "This is a survey/review paper";

/// Turns extracted issue fields into a [`PaperRecord`].
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    title_marker: String,
}

impl Default for RecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordBuilder {
    pub fn new() -> Self {
        Self {
            title_marker: DEFAULT_TITLE_MARKER.to_string(),
        }
    }

    pub fn title_marker(mut self, marker: impl Into<String>) -> Self {
        self.title_marker = marker.into();
        self
    }

    /// Issue title with the marker removed and whitespace trimmed.
    pub fn clean_title(&self, issue_title: &str) -> String {
        if self.title_marker.is_empty() {
            return issue_title.trim().to_string();
        }
        issue_title.replace(&self.title_marker, "").trim().to_string()
    }

    pub fn build(&self, fields: &FieldMap, issue_title: &str) -> PaperRecord {
        let title = self.clean_title(issue_title);
        let flags = parse_checked_items(fields.get(Field::SpecialFlags));
        let filename = paper_filename(&title);

        PaperRecord {
            authors: split_authors(fields.get(Field::Authors)),
            year: fields.get(Field::Year).to_string(),
            venue: fields.get(Field::Venue).to_string(),
            paper_url: fields.get(Field::PaperUrl).to_string(),
            project_page: fields.get(Field::ProjectPage).to_string(),
            code_url: fields.get(Field::CodeUrl).to_string(),
            representation: selection_or_text(fields.get(Field::Representation)),
            task: selection_or_text(fields.get(Field::Task)),
            category: selection_or_text(fields.get(Field::Category)),
            motion: selection_or_text(fields.get(Field::Motion)),
            interaction: fields.get(Field::Interaction).to_string(),
            code_availability: fields.get(Field::CodeAvailability) == "Yes",
            bibtex: fields.get(Field::Bibtex).to_string(),
            dataset: flags.iter().any(|f| f == DATASET_FLAG),
            survey: flags.iter().any(|f| f == SURVEY_FLAG),
            tags: Vec::new(),
            doi: String::new(),
            filename,
            title,
        }
    }
}

/// Extract fields from `body` and build the record in one step.
pub fn build_record(body: &str, issue_title: &str) -> PaperRecord {
    RecordBuilder::new().build(&extract_fields(body), issue_title)
}

fn split_authors(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(',').map(|a| a.trim().to_string()).collect()
}

/// Checked items when the answer is a checkbox list, otherwise the text as-is.
fn selection_or_text(raw: &str) -> FieldValue {
    let items = parse_checked_items(raw);
    if items.is_empty() {
        FieldValue::Single(raw.trim().to_string())
    } else {
        FieldValue::Multiple(items)
    }
}
