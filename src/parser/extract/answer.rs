use std::sync::LazyLock;

use regex::Regex;

use super::metadata::RESTATED_ID_RE;
use crate::record::{ChoiceKey, Difficulty};

// Only the label that opens the section counts; a letter quoted later in
// the rationale is never the answer.
static ANSWER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\ACorrect Answer:\s*([A-D])\b").unwrap());
static RATIONALE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\A\s*Rationale\b:?").unwrap());
static RESTATED_DIFFICULTY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Question Difficulty:\s*(Hard|Medium|Easy)\b").unwrap());

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerParts {
    pub correct: Option<ChoiceKey>,
    pub explanation: String,
    /// Difficulty restated after the rationale; overrides the header value.
    pub difficulty: Option<Difficulty>,
}

/// Parse `Correct Answer: X`, the optional `Rationale` body, and an optional
/// trailing `Question Difficulty:` restatement.
pub fn extract(section: &str) -> AnswerParts {
    let section = section.trim_start();
    let Some(caps) = ANSWER_RE.captures(section) else {
        return AnswerParts::default();
    };
    let correct = caps[1].chars().next().and_then(ChoiceKey::from_letter);
    let after = &section[caps.get(0).map(|m| m.end()).unwrap_or(section.len())..];

    let (body, difficulty) = match RESTATED_DIFFICULTY_RE.captures(after) {
        Some(d) => {
            let start = d.get(0).map(|m| m.start()).unwrap_or(after.len());
            (&after[..start], Some(Difficulty::parse(&d[1])))
        }
        None => (after, None),
    };

    let explanation = match RATIONALE_RE.find(body) {
        // later page breaks repeat the `ID: <hex> Answer` line inside the rationale
        Some(label) => RESTATED_ID_RE
            .replace_all(&body[label.end()..], "")
            .trim()
            .to_string(),
        None => String::new(),
    };

    AnswerParts {
        correct,
        explanation,
        difficulty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_and_rationale() {
        let parts = extract("Correct Answer: B\nRationale\nBecause text says so.\n");
        assert_eq!(parts.correct, Some(ChoiceKey::B));
        assert_eq!(parts.explanation, "Because text says so.");
        assert_eq!(parts.difficulty, None);
    }

    #[test]
    fn multi_paragraph_rationale_with_difficulty() {
        let parts = extract(
            "Correct Answer: D\nRationale\nChoice D is the best answer.\n\nChoice A is incorrect.\nQuestion Difficulty: Hard",
        );
        assert_eq!(parts.correct, Some(ChoiceKey::D));
        assert_eq!(
            parts.explanation,
            "Choice D is the best answer.\n\nChoice A is incorrect."
        );
        assert_eq!(parts.difficulty, Some(Difficulty::Hard));
    }

    #[test]
    fn answer_at_end_of_text() {
        let parts = extract("Correct Answer: A");
        assert_eq!(parts.correct, Some(ChoiceKey::A));
        assert!(parts.explanation.is_empty());
    }

    #[test]
    fn no_rationale_label() {
        let parts = extract("Correct Answer: C\nSome stray words\nQuestion Difficulty: Easy");
        assert_eq!(parts.correct, Some(ChoiceKey::C));
        assert!(parts.explanation.is_empty());
        assert_eq!(parts.difficulty, Some(Difficulty::Easy));
    }

    #[test]
    fn invalid_letter() {
        assert_eq!(extract("Correct Answer: E\nRationale\nx").correct, None);
        assert_eq!(extract("Correct Answer: Because\nRationale").correct, None);
        assert_eq!(extract("Correct Answer:\n\nRationale").correct, None);
        assert_eq!(extract(""), AnswerParts::default());
    }

    #[test]
    fn invalid_letter_is_not_rescued_by_rationale() {
        let parts = extract("Correct Answer: E\nRationale\nThe Correct Answer: A is wrong.");
        assert_eq!(parts, AnswerParts::default());

        let parts = extract("Correct Answer:\nRationale\nCorrect Answer: B per the key.");
        assert_eq!(parts.correct, None);
    }

    #[test]
    fn restated_id_lines_dropped_from_rationale() {
        let parts = extract(
            "Correct Answer: A\nRationale\nPart one.\nID: 0a1b2c3d Answer\nPart two.\nID: 0a1b2c3d Answer\nPart three.",
        );
        assert_eq!(parts.explanation, "Part one.\nPart two.\nPart three.");
    }
}
