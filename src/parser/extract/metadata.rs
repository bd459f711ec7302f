use std::sync::LazyLock;

use regex::Regex;

use crate::record::{CategoryPath, Difficulty, UNKNOWN};

// Five label/value pairs, anchored at the very start of the segment. The
// domain value may wrap onto a second line ("Information and\nIdeas").
static METADATA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^Assessment\s*\n([^\n]+)\s*\n+",
        r"Test\s*\n([^\n]+)\s*\n+",
        r"Domain\s*\n([^\n]+(?:(?:\s*and\s*|\s*)\n[^\n]+)?)\s*\n+",
        r"Skill\s*\n([^\n]+)\s*\n+",
        r"Difficulty\s*\n([^\n]+)\s*\n+",
    ))
    .unwrap()
});

pub(super) static RESTATED_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^ID:\s*[0-9a-fA-F]{8,}\s*Answer[ \t]*\n*").unwrap());

static LINE_BREAKS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*\n\s*").unwrap());

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    pub category: CategoryPath,
    pub difficulty: Difficulty,
}

/// Peel the metadata header off a segment body.
///
/// Returns the recovered fields (sentinels where absent) and the remaining
/// text. A body without a recognizable header passes through untouched.
pub fn extract(body: &str) -> (Metadata, String) {
    let mut meta = Metadata::default();
    let mut rest = body;

    if let Some(caps) = METADATA_RE.captures(body) {
        meta.category = CategoryPath {
            assessment: field(&caps[1]),
            test: field(&caps[2]),
            domain: field(&LINE_BREAKS_RE.replace_all(&caps[3], " ")),
            skill: field(&caps[4]),
        };
        meta.difficulty = Difficulty::parse(&caps[5]);
        rest = &body[caps.get(0).map(|m| m.end()).unwrap_or(0)..];
    }

    (meta, strip_restated_id(rest.trim()))
}

/// Drop the first `ID: <hex> Answer` page-restatement line.
pub fn strip_restated_id(text: &str) -> String {
    RESTATED_ID_RE.replacen(text, 1, "").trim().to_string()
}

fn field(raw: &str) -> String {
    let value = raw.trim();
    if value.is_empty() {
        UNKNOWN.to_string()
    } else {
        value.to_string()
    }
}
