use std::sync::LazyLock;

use regex::Regex;

static QUESTION_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Question ID ([0-9a-fA-F]{8,})").unwrap());

/// The text owned by one question: everything between its `Question ID`
/// marker and the next one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub id: String,
    pub body: String,
}

/// Split normalized text on `Question ID <hex>` markers, in document order.
/// Anything before the first marker is dropped.
pub fn split_segments(text: &str) -> Vec<Segment> {
    let markers: Vec<(usize, usize, &str)> = QUESTION_ID_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            Some((whole.start(), whole.end(), caps.get(1)?.as_str()))
        })
        .collect();

    markers
        .iter()
        .enumerate()
        .map(|(i, &(_, body_start, id))| {
            let body_end = markers.get(i + 1).map(|m| m.0).unwrap_or(text.len());
            Segment {
                id: id.to_string(),
                body: text[body_start..body_end].trim().to_string(),
            }
        })
        .collect()
}
