/// Markers GitHub writes in front of a ticked checkbox item.
const CHECKED_MARKERS: [&str; 2] = ["- [x]", "* [x]"];

/// Labels of the ticked items in a markdown checkbox list, in order.
///
/// Unticked items and lines that aren't list items are skipped. An empty
/// answer gives an empty list, which is normal for single-select fields.
pub fn parse_checked_items(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| CHECKED_MARKERS.iter().any(|m| line.starts_with(m)))
        .filter_map(|line| line.split_once(']'))
        .map(|(_, label)| label.trim().to_string())
        .collect()
}
