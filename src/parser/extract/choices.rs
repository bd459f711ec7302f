use std::sync::LazyLock;

use regex::Regex;

use crate::record::{ChoiceKey, Choices};

// A choice letter only counts at the start of the text or after whitespace,
// so "NASA." or "U.S.A." inside a passage never opens a choice.
static MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)([ABCD])\.|(Correct Answer:)").unwrap());

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Choice(ChoiceKey),
    CorrectAnswer,
}

/// A structural marker and the byte offset where its token starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerAt {
    pub pos: usize,
    pub end: usize,
    pub marker: Marker,
}

pub fn find_markers(text: &str) -> Vec<MarkerAt> {
    MARKER_RE
        .captures_iter(text)
        .filter_map(|caps| {
            if let Some(letter) = caps.get(1) {
                let key = letter.as_str().chars().next().and_then(ChoiceKey::from_letter)?;
                Some(MarkerAt {
                    pos: letter.start(),
                    end: letter.end() + 1,
                    marker: Marker::Choice(key),
                })
            } else {
                caps.get(2).map(|m| MarkerAt {
                    pos: m.start(),
                    end: m.end(),
                    marker: Marker::CorrectAnswer,
                })
            }
        })
        .collect()
}

/// Split point between the question stem and the choices/answer section:
/// the earliest choice marker or `Correct Answer:`. `None` when the text
/// carries no markers at all.
pub fn body_boundary(text: &str) -> Option<usize> {
    find_markers(text).first().map(|m| m.pos)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChoiceSplit {
    pub choices: Choices,
    /// Everything from `Correct Answer:` onward, or empty if it never appears.
    pub answer_section: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    BeforeChoices,
    InChoice(ChoiceKey),
    InAnswer,
}

/// Walk the choices/answer section marker by marker.
///
/// Text before the first choice letter is discarded (a `Correct Answer:`
/// there included). Each letter switches the active choice; the first
/// `Correct Answer:` after that ends choice accumulation and everything from
/// it onward becomes the answer section.
pub fn split_choices(section: &str) -> ChoiceSplit {
    let mut out = ChoiceSplit::default();
    let mut state = ScanState::BeforeChoices;
    let mut cursor = 0;

    for m in find_markers(section) {
        if let ScanState::InChoice(key) = state {
            append_choice(&mut out.choices, key, &section[cursor..m.pos]);
        }

        state = match (state, m.marker) {
            (ScanState::BeforeChoices, Marker::CorrectAnswer) => ScanState::BeforeChoices,
            (_, Marker::Choice(key)) => ScanState::InChoice(key),
            (ScanState::InChoice(_), Marker::CorrectAnswer) => {
                out.answer_section = section[m.pos..].trim().to_string();
                ScanState::InAnswer
            }
            (ScanState::InAnswer, _) => ScanState::InAnswer,
        };
        cursor = m.end;

        if state == ScanState::InAnswer {
            return out;
        }
    }

    if let ScanState::InChoice(key) = state {
        append_choice(&mut out.choices, key, &section[cursor..]);
    }
    out
}

fn append_choice(choices: &mut Choices, key: ChoiceKey, fragment: &str) {
    let fragment = WHITESPACE_RE.replace_all(fragment.trim(), " ");
    if fragment.is_empty() {
        return;
    }
    let slot = choices.get_mut(key);
    if !slot.is_empty() {
        slot.push(' ');
    }
    slot.push_str(&fragment);
}
