pub mod answer;
pub mod choices;
pub mod metadata;
pub mod prompts;

use std::fmt;

use super::segments::Segment;
use crate::record::QuestionRecord;

/// Why a segment produced no record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    MissingId,
    EmptyQuestion,
    MissingAnswer,
    DuplicateId,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            RejectReason::MissingId => "missing question id",
            RejectReason::EmptyQuestion => "empty question text",
            RejectReason::MissingAnswer => "no correct answer letter (A-D)",
            RejectReason::DuplicateId => "id already seen earlier in the document",
        };
        f.write_str(msg)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub id: String,
    pub reason: RejectReason,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = if self.id.trim().is_empty() { "UNKNOWN" } else { &self.id };
        write!(f, "{}: {}", id, self.reason)
    }
}

/// Run one segment through metadata → stem/choices → answer, then gate it.
pub fn process_segment(segment: &Segment) -> Result<QuestionRecord, Rejection> {
    let (meta, rest) = metadata::extract(&segment.body);

    let (stem, section) = match choices::body_boundary(&rest) {
        Some(pos) => (&rest[..pos], &rest[pos..]),
        None => (rest.as_str(), ""),
    };
    let question_text = prompts::strip_trailing_prompt(stem);
    let split = choices::split_choices(section);
    let answer = answer::extract(&split.answer_section);

    let reject = |reason| Rejection {
        id: segment.id.clone(),
        reason,
    };

    if segment.id.trim().is_empty() {
        return Err(reject(RejectReason::MissingId));
    }
    if question_text.trim().is_empty() {
        return Err(reject(RejectReason::EmptyQuestion));
    }
    let Some(correct_answer) = answer.correct else {
        return Err(reject(RejectReason::MissingAnswer));
    };

    Ok(QuestionRecord {
        id: segment.id.clone(),
        category_path: meta.category,
        difficulty: answer.difficulty.unwrap_or(meta.difficulty),
        question_text,
        choices: split.choices,
        correct_answer,
        explanation: answer.explanation,
    })
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{ChoiceKey, Difficulty, UNKNOWN};

    fn seg(id: &str, body: &str) -> Segment {
        Segment {
            id: id.to_string(),
            body: body.trim().to_string(),
        }
    }

    const HEADER: &str = "Assessment\nSAT\nTest\nReading and Writing\nDomain\nCraft and Structure\nSkill\nWords in Context\nDifficulty\nEasy\n\n";

    #[test]
    fn complete_segment() {
        let body = format!(
            "{}Botanists noted the fern's resilience.\nWhich choice most logically completes the text?\nA. fragile\nB. hardy\nC. tiny\nD. rare\nCorrect Answer: B\nRationale\nHardy matches resilience.",
            HEADER
        );
        let r = process_segment(&seg("0a1b2c3d", &body)).unwrap();
        assert_eq!(r.id, "0a1b2c3d");
        assert_eq!(r.category_path.domain, "Craft and Structure");
        assert_eq!(r.category_path.skill, "Words in Context");
        assert_eq!(r.difficulty, Difficulty::Easy);
        assert_eq!(r.question_text, "Botanists noted the fern's resilience.");
        assert_eq!(r.choices.b, "hardy");
        assert_eq!(r.correct_answer, ChoiceKey::B);
        assert_eq!(r.explanation, "Hardy matches resilience.");
    }

    #[test]
    fn restated_difficulty_wins() {
        let body = format!(
            "{}Q?\nA. a\nB. b\nC. c\nD. d\nCorrect Answer: A\nRationale\nR.\nQuestion Difficulty: Hard",
            HEADER
        );
        let r = process_segment(&seg("0a1b2c3d", &body)).unwrap();
        assert_eq!(r.difficulty, Difficulty::Hard);
        assert_eq!(r.explanation, "R.");
    }

    #[test]
    fn no_header_still_parses() {
        let r = process_segment(&seg("0a1b2c3d", "Q?\nA. a\nB. b\nC. c\nD. d\nCorrect Answer: D")).unwrap();
        assert_eq!(r.category_path.assessment, UNKNOWN);
        assert_eq!(r.difficulty, Difficulty::Unknown);
        assert_eq!(r.correct_answer, ChoiceKey::D);
    }

    #[test]
    fn missing_correct_answer_rejected() {
        let err = process_segment(&seg("0a1b2c3d", "Q?\nA. a\nB. b\nC. c\nD. d")).unwrap_err();
        assert_eq!(err.reason, RejectReason::MissingAnswer);
        assert_eq!(err.id, "0a1b2c3d");
    }

    #[test]
    fn empty_body_rejected() {
        let err = process_segment(&seg("0a1b2c3d", "")).unwrap_err();
        assert_eq!(err.reason, RejectReason::EmptyQuestion);
    }

    #[test]
    fn stem_missing_rejected() {
        let err = process_segment(&seg("0a1b2c3d", "A. a\nB. b\nCorrect Answer: A")).unwrap_err();
        assert_eq!(err.reason, RejectReason::EmptyQuestion);
    }

    #[test]
    fn blank_id_rejected() {
        let err = process_segment(&seg("  ", "Q?\nA. a\nCorrect Answer: A")).unwrap_err();
        assert_eq!(err.reason, RejectReason::MissingId);
        assert_eq!(err.to_string(), "UNKNOWN: missing question id");
    }

    #[test]
    fn partial_choices_are_accepted() {
        let r = process_segment(&seg("0a1b2c3d", "Q?\nA. a\nCorrect Answer: C")).unwrap();
        assert_eq!(r.choices.a, "a");
        assert_eq!(r.choices.b, "");
        assert_eq!(r.choices.iter().count(), 4);
    }

    #[test]
    fn answer_without_choices_is_rejected() {
        let err = process_segment(&seg("0a1b2c3d", "Q?\nCorrect Answer: A")).unwrap_err();
        assert_eq!(err.reason, RejectReason::MissingAnswer);
    }
}
