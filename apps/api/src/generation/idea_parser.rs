//! Idea Parser — best-effort extraction of `IdeaRecord`s from free-text model output.
//!
//! Expected shape, repeated once per idea:
//!
//! ```text
//! Title: <title>
//! Why: <reason>
//! ---
//! ```
//!
//! The model does not reliably follow this. Segments that cannot be read are
//! skipped silently; parsing never fails.

use crate::generation::prompts::{IDEA_DELIMITER, REASON_PREFIX, TITLE_PREFIX};
use crate::models::content::IdeaRecord;

/// Splits a raw response on `---` and keeps every segment that parses.
/// Order follows the order of appearance in `raw`.
pub fn parse_ideas(raw: &str) -> Vec<IdeaRecord> {
    raw.trim()
        .split(IDEA_DELIMITER)
        .filter_map(parse_idea_segment)
        .collect()
}

/// Reads one delimited segment. Line 1 is the title, line 2 the reason;
/// anything after line 2 is ignored.
///
/// Returns `None` for blank segments, segments with fewer than two lines,
/// and segments whose title is empty once the prefix is stripped.
pub fn parse_idea_segment(segment: &str) -> Option<IdeaRecord> {
    let segment = segment.trim();
    if segment.is_empty() {
        return None;
    }

    let mut lines = segment.lines();
    let title = strip_label(lines.next()?, TITLE_PREFIX);
    let reason = strip_label(lines.next()?, REASON_PREFIX);

    if title.is_empty() {
        return None;
    }

    Some(IdeaRecord {
        title: title.to_string(),
        reason: reason.to_string(),
    })
}

fn strip_label<'a>(line: &'a str, label: &str) -> &'a str {
    let line = line.trim();
    line.strip_prefix(label).unwrap_or(line).trim()
}
