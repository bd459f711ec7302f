use std::sync::LazyLock;

use regex::Regex;

static PAGE_HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"---[ \t\x{a0}]+PAGE[ \t\x{a0}]+\d+[ \t\x{a0}]+---").unwrap());
static BLANK_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());
static SPACE_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]+").unwrap());

/// Canonicalize raw extracted PDF text. Idempotent.
pub fn normalize(raw: &str) -> String {
    let text = raw.replace("\r\n", "\n").replace('\r', "\n");
    let mut text = text.replace('\u{0c}', "");
    // removing one header can splice two halves into another
    while PAGE_HEADER_RE.is_match(&text) {
        text = PAGE_HEADER_RE.replace_all(&text, "").into_owned();
    }
    let text = text.replace('\u{a0}', " ");
    let text = BLANK_RUN_RE.replace_all(&text, "\n\n");
    let text = SPACE_RUN_RE.replace_all(&text, " ");
    text.trim().to_string()
}
