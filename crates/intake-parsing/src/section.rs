use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

/// A section of the paper submission issue template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    PaperTitle,
    Authors,
    Year,
    Venue,
    PaperUrl,
    ProjectPage,
    CodeUrl,
    Representation,
    Task,
    Category,
    Motion,
    Interaction,
    CodeAvailability,
    SpecialFlags,
    Bibtex,
    TeaserImage,
    AdditionalNotes,
}

impl Field {
    pub const ALL: [Field; 17] = [
        Field::PaperTitle,
        Field::Authors,
        Field::Year,
        Field::Venue,
        Field::PaperUrl,
        Field::ProjectPage,
        Field::CodeUrl,
        Field::Representation,
        Field::Task,
        Field::Category,
        Field::Motion,
        Field::Interaction,
        Field::CodeAvailability,
        Field::SpecialFlags,
        Field::Bibtex,
        Field::TeaserImage,
        Field::AdditionalNotes,
    ];

    /// Template field id (the `id:` in the issue form).
    pub fn key(&self) -> &'static str {
        match self {
            Self::PaperTitle => "paper-title",
            Self::Authors => "authors",
            Self::Year => "year",
            Self::Venue => "venue",
            Self::PaperUrl => "paper-url",
            Self::ProjectPage => "project-page",
            Self::CodeUrl => "code-url",
            Self::Representation => "representation",
            Self::Task => "task",
            Self::Category => "category",
            Self::Motion => "motion",
            Self::Interaction => "interaction",
            Self::CodeAvailability => "code-availability",
            Self::SpecialFlags => "special-flags",
            Self::Bibtex => "bibtex",
            Self::TeaserImage => "teaser-image",
            Self::AdditionalNotes => "additional-notes",
        }
    }

    /// Heading text GitHub renders for the field, without the `### `.
    pub fn header(&self) -> &'static str {
        match self {
            Self::PaperTitle => "Paper Title",
            Self::Authors => "Authors",
            Self::Year => "Publication Year",
            Self::Venue => "Venue",
            Self::PaperUrl => "Paper URL",
            Self::ProjectPage => "Project Page",
            Self::CodeUrl => "Code Repository",
            Self::Representation => "Representation Type",
            Self::Task => "Task Type",
            Self::Category => "Category",
            Self::Motion => "Motion Type",
            Self::Interaction => "Interaction/Control Method",
            Self::CodeAvailability => "Code Availability",
            Self::SpecialFlags => "Special Flags",
            Self::Bibtex => "BibTeX Citation",
            Self::TeaserImage => "Teaser Image",
            Self::AdditionalNotes => "Additional Notes",
        }
    }

    fn pattern(&self) -> String {
        let header = regex::escape(self.header());
        match self {
            // BibTeX only counts when pasted inside a ```bibtex fence.
            Self::Bibtex => format!(r"(?s)### {header}\s*\n\n```bibtex\n(.*?)\n```"),
            _ => format!(r"(?s)### {header}\s*\n\n(.*?)(?:\n\n###|\n\n---|\z)"),
        }
    }
}

static FIELD_PATTERNS: Lazy<Vec<(Field, Regex)>> = Lazy::new(|| {
    Field::ALL
        .iter()
        .map(|f| (*f, Regex::new(&f.pattern()).unwrap()))
        .collect()
});

/// Raw, trimmed text of every template section found in an issue body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    values: HashMap<Field, String>,
}

impl FieldMap {
    /// Text for `field`; empty when the section was absent.
    pub fn get(&self, field: Field) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    /// Fields whose section is missing or blank, in template order.
    pub fn missing(&self) -> Vec<Field> {
        Field::ALL
            .iter()
            .copied()
            .filter(|f| self.get(*f).is_empty())
            .collect()
    }
}

impl FromIterator<(Field, String)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (Field, String)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Extract the content of every known section from an issue body.
///
/// A section runs from its `### Header` line and the blank line after it up
/// to the next `###` heading, a `---` rule, or the end of the body. Headers
/// may appear in any order or not at all; missing ones map to `""`.
pub fn extract_fields(body: &str) -> FieldMap {
    let map: FieldMap = FIELD_PATTERNS
        .iter()
        .map(|(field, re)| {
            let value = re
                .captures(body)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().trim().to_string())
                .unwrap_or_default();
            (*field, value)
        })
        .collect();

    let missing: Vec<&str> = map.missing().iter().map(Field::key).collect();
    if !missing.is_empty() {
        tracing::debug!(?missing, "sections missing from issue body");
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = "### Paper Title\n\nNeural Motion Fields\n\n\
### Authors\n\nJane Doe, J. Smith\n\n\
### Publication Year\n\n2024\n\n\
### Venue\n\nCVPR\n\n\
### Representation Type\n\n- [x] Point Cloud\n- [ ] Mesh\n- [x] Voxel\n\n\
### Code Availability\n\nYes\n\n\
### BibTeX Citation\n\n```bibtex\n@inproceedings{doe2024,\n  title={Neural Motion Fields}\n}\n```\n\n\
### Additional Notes\n\n_No response_";

    #[test]
    fn test_extract_basic_fields() {
        let fields = extract_fields(BODY);
        assert_eq!(fields.get(Field::PaperTitle), "Neural Motion Fields");
        assert_eq!(fields.get(Field::Authors), "Jane Doe, J. Smith");
        assert_eq!(fields.get(Field::Year), "2024");
        assert_eq!(fields.get(Field::Venue), "CVPR");
        assert_eq!(fields.get(Field::CodeAvailability), "Yes");
        assert_eq!(fields.get(Field::AdditionalNotes), "_No response_");
    }

    #[test]
    fn test_extract_multiline_section() {
        let fields = extract_fields(BODY);
        assert_eq!(
            fields.get(Field::Representation),
            "- [x] Point Cloud\n- [ ] Mesh\n- [x] Voxel"
        );
    }

    #[test]
    fn test_extract_bibtex_from_fence() {
        let fields = extract_fields(BODY);
        assert_eq!(
            fields.get(Field::Bibtex),
            "@inproceedings{doe2024,\n  title={Neural Motion Fields}\n}"
        );
    }

    #[test]
    fn test_bibtex_without_fence_is_empty() {
        let body = "### BibTeX Citation\n\n@article{x, title={Y}}";
        assert_eq!(extract_fields(body).get(Field::Bibtex), "");
    }

    #[test]
    fn test_missing_sections_are_empty() {
        let fields = extract_fields("### Venue\n\nICCV");
        assert_eq!(fields.get(Field::Venue), "ICCV");
        assert_eq!(fields.get(Field::PaperTitle), "");
        assert_eq!(fields.missing().len(), 16);
    }

    #[test]
    fn test_no_headers_at_all() {
        let fields = extract_fields("just some text\n\nwith paragraphs");
        for field in Field::ALL {
            assert_eq!(fields.get(field), "", "{} should be empty", field.key());
        }
        assert_eq!(extract_fields("").missing(), Field::ALL.to_vec());
    }

    #[test]
    fn test_horizontal_rule_ends_section() {
        let body = "### Venue\n\nSIGGRAPH\n\n---\n\nfooter text";
        assert_eq!(extract_fields(body).get(Field::Venue), "SIGGRAPH");
    }

    #[test]
    fn test_headers_in_any_order() {
        let body = "### Venue\n\nECCV\n\n### Paper Title\n\nA Title";
        let fields = extract_fields(body);
        assert_eq!(fields.get(Field::Venue), "ECCV");
        assert_eq!(fields.get(Field::PaperTitle), "A Title");
    }

    #[test]
    fn test_header_match_is_case_sensitive() {
        let fields = extract_fields("### venue\n\nECCV");
        assert_eq!(fields.get(Field::Venue), "");
    }

    #[test]
    fn test_header_needs_blank_line() {
        let fields = extract_fields("### Venue\nECCV");
        assert_eq!(fields.get(Field::Venue), "");
    }

    #[test]
    fn test_trailing_spaces_after_header() {
        let fields = extract_fields("### Venue   \n\n  NeurIPS  \n");
        assert_eq!(fields.get(Field::Venue), "NeurIPS");
    }

    #[test]
    fn test_paragraph_break_inside_section_is_kept() {
        let body = "### Additional Notes\n\nline one\n\nline two\n\n### Venue\n\nX";
        assert_eq!(
            extract_fields(body).get(Field::AdditionalNotes),
            "line one\n\nline two"
        );
    }

    #[test]
    fn test_regex_metachars_in_header() {
        let body = "### Interaction/Control Method\n\nText prompts";
        assert_eq!(extract_fields(body).get(Field::Interaction), "Text prompts");
    }
}
