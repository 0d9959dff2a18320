use once_cell::sync::Lazy;
use regex::Regex;

/// Longest slug, in characters.
pub const MAX_FILENAME_LEN: usize = 50;

/// Derive the record file name (without `.json`) from a paper title.
///
/// Lowercases, drops everything but letters, digits, whitespace and `-`,
/// turns each run of whitespace/hyphens into one `-`, and keeps the first
/// [`MAX_FILENAME_LEN`] characters. Distinct titles can map to the same slug;
/// that is left to the caller.
pub fn paper_filename(title: &str) -> String {
    static STRIP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\p{L}\p{N}\s-]").unwrap());
    static SEPARATOR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-\s]+").unwrap());

    let lowered = title.to_lowercase();
    let stripped = STRIP_RE.replace_all(&lowered, "");
    let joined = SEPARATOR_RE.replace_all(&stripped, "-");
    joined.chars().take(MAX_FILENAME_LEN).collect()
}
