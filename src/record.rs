use std::fmt;

use serde::{Deserialize, Serialize};

/// Placeholder for any metadata field the source text did not provide.
pub const UNKNOWN: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ChoiceKey {
    A,
    B,
    C,
    D,
}

impl ChoiceKey {
    pub const ALL: [ChoiceKey; 4] = [ChoiceKey::A, ChoiceKey::B, ChoiceKey::C, ChoiceKey::D];

    pub fn from_letter(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(ChoiceKey::A),
            'B' => Some(ChoiceKey::B),
            'C' => Some(ChoiceKey::C),
            'D' => Some(ChoiceKey::D),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ChoiceKey::A => "A",
            ChoiceKey::B => "B",
            ChoiceKey::C => "C",
            ChoiceKey::D => "D",
        }
    }
}

impl fmt::Display for ChoiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    #[default]
    #[serde(rename = "N/A")]
    Unknown,
}

impl Difficulty {
    /// Case-insensitive; anything other than Easy/Medium/Hard is `Unknown`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "easy" => Difficulty::Easy,
            "medium" => Difficulty::Medium,
            "hard" => Difficulty::Hard,
            _ => Difficulty::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Unknown => UNKNOWN,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification of a question: assessment › test section › domain › skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPath {
    pub assessment: String,
    pub test: String,
    pub domain: String,
    pub skill: String,
}

impl Default for CategoryPath {
    fn default() -> Self {
        CategoryPath {
            assessment: UNKNOWN.to_string(),
            test: UNKNOWN.to_string(),
            domain: UNKNOWN.to_string(),
            skill: UNKNOWN.to_string(),
        }
    }
}

/// The four answer choices. Every key is always present; a choice the
/// parser could not recover is an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choices {
    #[serde(rename = "A")]
    pub a: String,
    #[serde(rename = "B")]
    pub b: String,
    #[serde(rename = "C")]
    pub c: String,
    #[serde(rename = "D")]
    pub d: String,
}

impl Choices {
    pub fn get(&self, key: ChoiceKey) -> &str {
        match key {
            ChoiceKey::A => &self.a,
            ChoiceKey::B => &self.b,
            ChoiceKey::C => &self.c,
            ChoiceKey::D => &self.d,
        }
    }

    pub fn get_mut(&mut self, key: ChoiceKey) -> &mut String {
        match key {
            ChoiceKey::A => &mut self.a,
            ChoiceKey::B => &mut self.b,
            ChoiceKey::C => &mut self.c,
            ChoiceKey::D => &mut self.d,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ChoiceKey, &str)> + '_ {
        ChoiceKey::ALL.into_iter().map(move |k| (k, self.get(k)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub id: String,
    pub category_path: CategoryPath,
    pub difficulty: Difficulty,
    pub question_text: String,
    pub choices: Choices,
    pub correct_answer: ChoiceKey,
    pub explanation: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_parse() {
        assert_eq!(Difficulty::parse("Medium"), Difficulty::Medium);
        assert_eq!(Difficulty::parse(" hard "), Difficulty::Hard);
        assert_eq!(Difficulty::parse("EASY"), Difficulty::Easy);
        assert_eq!(Difficulty::parse("Very hard"), Difficulty::Unknown);
        assert_eq!(Difficulty::parse(""), Difficulty::Unknown);
    }

    #[test]
    fn choice_letters() {
        assert_eq!(ChoiceKey::from_letter('b'), Some(ChoiceKey::B));
        assert_eq!(ChoiceKey::from_letter('E'), None);
    }

    #[test]
    fn serialized_shape() {
        let record = QuestionRecord {
            id: "abcdef12".into(),
            category_path: CategoryPath::default(),
            difficulty: Difficulty::Unknown,
            question_text: "Q?".into(),
            choices: Choices {
                a: "one".into(),
                ..Choices::default()
            },
            correct_answer: ChoiceKey::C,
            explanation: String::new(),
        };
        let v = serde_json::to_value(&record).unwrap();
        assert_eq!(v["difficulty"], "N/A");
        assert_eq!(v["correct_answer"], "C");
        assert_eq!(v["category_path"]["domain"], "N/A");
        let keys: Vec<&String> = v["choices"].as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 4);
        assert_eq!(v["choices"]["A"], "one");
        assert_eq!(v["choices"]["D"], "");

        let back: QuestionRecord = serde_json::from_value(v).unwrap();
        assert_eq!(back, record);
    }
}
