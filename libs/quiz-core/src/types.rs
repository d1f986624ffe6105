//! Core types for the quiz application.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Answer option letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Letter {
    A,
    B,
    C,
    D,
    E,
}

impl Letter {
    /// All letters in option order.
    pub const ALL: [Letter; 5] = [Self::A, Self::B, Self::C, Self::D, Self::E];

    /// Parse from a character, accepting either case.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(Self::A),
            'B' => Some(Self::B),
            'C' => Some(Self::C),
            'D' => Some(Self::D),
            'E' => Some(Self::E),
            _ => None,
        }
    }

    /// Parse from a string holding exactly one letter (surrounding whitespace ignored).
    pub fn from_str(s: &str) -> Option<Self> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c),
            _ => None,
        }
    }

    /// Zero-based option index.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Letter for a zero-based option index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn as_char(self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
            Self::D => 'D',
            Self::E => 'E',
        }
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Deduplicated, ascending set of answer letters.
///
/// Equality is order-independent because construction always canonicalizes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Letter>", into = "Vec<Letter>")]
pub struct ChoiceSet(Vec<Letter>);

impl ChoiceSet {
    /// Build a canonical set from letters in any order, with duplicates allowed.
    pub fn normalize<I: IntoIterator<Item = Letter>>(letters: I) -> Self {
        let mut letters: Vec<Letter> = letters.into_iter().collect();
        letters.sort();
        letters.dedup();
        Self(letters)
    }

    pub fn letters(&self) -> &[Letter] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, letter: Letter) -> bool {
        self.0.binary_search(&letter).is_ok()
    }
}

impl From<Vec<Letter>> for ChoiceSet {
    fn from(letters: Vec<Letter>) -> Self {
        Self::normalize(letters)
    }
}

impl From<ChoiceSet> for Vec<Letter> {
    fn from(set: ChoiceSet) -> Self {
        set.0
    }
}

impl FromIterator<Letter> for ChoiceSet {
    fn from_iter<I: IntoIterator<Item = Letter>>(iter: I) -> Self {
        Self::normalize(iter)
    }
}

/// Question type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    SingleChoice,
    MultiSelect,
    Reading,
}

impl QuestionKind {
    /// Get the kind name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SingleChoice => "single_choice",
            Self::MultiSelect => "multi_select",
            Self::Reading => "reading",
        }
    }

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "single_choice" => Some(Self::SingleChoice),
            "multi_select" => Some(Self::MultiSelect),
            "reading" => Some(Self::Reading),
            _ => None,
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One sub-item of a reading-comprehension question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingItem {
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_answer: Letter,
}

/// Variant-specific part of a question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuestionBody {
    SingleChoice {
        options: Vec<String>,
        correct_answer: Letter,
    },
    MultiSelect {
        options: Vec<String>,
        correct_answers: ChoiceSet,
    },
    Reading {
        passage: String,
        items: Vec<ReadingItem>,
    },
}

/// Question document as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: Uuid,
    pub title: String,
    #[serde(flatten)]
    pub body: QuestionBody,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default)]
    pub error_analysis: BTreeMap<Letter, String>,
    pub created_at: DateTime<Utc>,
}

impl Question {
    pub fn kind(&self) -> QuestionKind {
        match self.body {
            QuestionBody::SingleChoice { .. } => QuestionKind::SingleChoice,
            QuestionBody::MultiSelect { .. } => QuestionKind::MultiSelect,
            QuestionBody::Reading { .. } => QuestionKind::Reading,
        }
    }

    /// Build a single-choice question from parsed admin input.
    pub fn from_parsed(parsed: ParsedQuestion, id: Uuid, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: parsed.title,
            body: QuestionBody::SingleChoice {
                options: parsed.options,
                correct_answer: parsed.correct_answer,
            },
            explanation: parsed.explanation,
            error_analysis: parsed.error_analysis,
            created_at,
        }
    }
}

/// The choice recorded for a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Chosen {
    Single(Letter),
    Multiple(ChoiceSet),
    /// One entry per sub-item; `None` for an unanswered item.
    Reading(Vec<Option<Letter>>),
}

/// One answer attempt. Never updated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub id: Uuid,
    pub user_id: String,
    pub question_id: Uuid,
    pub kind: QuestionKind,
    pub chosen: Chosen,
    pub is_correct: bool,
    pub submitted_at: DateTime<Utc>,
    pub next_review_date: DateTime<Utc>,
}

/// Single-choice question extracted from pasted text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedQuestion {
    pub title: String,
    pub options: Vec<String>,
    pub correct_answer: Letter,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    pub error_analysis: BTreeMap<Letter, String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn letter_from_char_accepts_lowercase() {
        assert_eq!(Letter::from_char('c'), Some(Letter::C));
        assert_eq!(Letter::from_char('F'), None);
        assert_eq!(Letter::from_str(" b "), Some(Letter::B));
        assert_eq!(Letter::from_str("AB"), None);
    }

    #[test]
    fn letter_index_roundtrip() {
        for letter in Letter::ALL {
            assert_eq!(Letter::from_index(letter.index()), Some(letter));
        }
        assert_eq!(Letter::from_index(5), None);
    }

    #[test]
    fn choice_set_is_order_independent() {
        let a = ChoiceSet::normalize([Letter::C, Letter::A, Letter::A]);
        let b = ChoiceSet::normalize([Letter::A, Letter::C]);
        assert_eq!(a, b);
        assert_eq!(a.letters(), &[Letter::A, Letter::C]);
    }

    #[test]
    fn choice_set_deserializes_canonically() {
        let set: ChoiceSet = serde_json::from_str(r#"["D","B","D"]"#).unwrap();
        assert_eq!(set.letters(), &[Letter::B, Letter::D]);
        assert_eq!(serde_json::to_string(&set).unwrap(), r#"["B","D"]"#);
    }

    #[test]
    fn question_serializes_with_kind_tag() {
        let question = Question {
            id: Uuid::nil(),
            title: "題目".to_string(),
            body: QuestionBody::MultiSelect {
                options: vec!["甲".to_string(), "乙".to_string()],
                correct_answers: ChoiceSet::normalize([Letter::A, Letter::B]),
            },
            explanation: None,
            error_analysis: BTreeMap::new(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&question).unwrap();
        assert_eq!(json["kind"], "multi_select");
        assert_eq!(json["correct_answers"], serde_json::json!(["A", "B"]));

        let back: Question = serde_json::from_value(json).unwrap();
        assert_eq!(back.kind(), QuestionKind::MultiSelect);
    }

    #[test]
    fn question_kind_string_conversion() {
        assert_eq!(QuestionKind::from_str("reading"), Some(QuestionKind::Reading));
        assert_eq!(QuestionKind::SingleChoice.as_str(), "single_choice");
        assert_eq!(QuestionKind::from_str("essay"), None);
    }
}
