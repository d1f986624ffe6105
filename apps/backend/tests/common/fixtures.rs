//! Test fixtures and factory functions for creating test data.

use std::collections::BTreeMap;

use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use quiz_backend::models::{Question, QuestionBody};
use quiz_core::{ChoiceSet, Letter, ReadingItem};

/// Well-formed pasted question text with inline markup and an error analysis section.
pub fn sample_question_text() -> String {
    [
        "3. （　　）下列「」中的字，何者讀音正確？",
        "(A) 「<u>酗</u>」酒：ㄒㄩˋ (B) 「湍」急：ㄔㄨㄢ (C) 「纖」維：ㄑㄧㄢ (D) 「恫」嚇：ㄉㄨㄥˋ",
        "✅ 正確答案：A",
        "📖 詳解：<b>酗</b>酒的酗讀作ㄒㄩˋ。",
        "🔍 錯因分析：",
        "B：湍應讀作ㄊㄨㄢ",
        "C：纖應讀作ㄒㄧㄢ",
        "D：恫應讀作ㄉㄨㄥˋ，此處易與洞混淆",
    ]
    .join("\n")
}

fn options(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("選項{}", i + 1)).collect()
}

fn question(title: &str, body: QuestionBody) -> Question {
    Question {
        id: Uuid::new_v4(),
        title: title.to_string(),
        body,
        explanation: Some("說明".to_string()),
        error_analysis: BTreeMap::new(),
        created_at: Utc::now(),
    }
}

/// Single-choice question with four options.
pub fn single_choice_question(correct: Letter) -> Question {
    question(
        "單選題",
        QuestionBody::SingleChoice {
            options: options(4),
            correct_answer: correct,
        },
    )
}

/// Multi-select question with five options.
pub fn multi_select_question(correct: &[Letter]) -> Question {
    question(
        "多選題",
        QuestionBody::MultiSelect {
            options: options(5),
            correct_answers: ChoiceSet::normalize(correct.iter().copied()),
        },
    )
}

/// Reading question with one sub-item per correct letter.
pub fn reading_question(correct: &[Letter]) -> Question {
    question(
        "閱讀測驗",
        QuestionBody::Reading {
            passage: "春眠不覺曉，處處聞啼鳥。".to_string(),
            items: correct
                .iter()
                .enumerate()
                .map(|(i, c)| ReadingItem {
                    prompt: format!("第{}小題", i + 1),
                    options: options(4),
                    correct_answer: *c,
                })
                .collect(),
        },
    )
}

/// Create a register request body.
pub fn register_request(name: Option<&str>) -> serde_json::Value {
    match name {
        Some(n) => json!({ "name": n }),
        None => json!({}),
    }
}

/// Submit body for a single-choice question.
pub fn single_submission(letter: Option<&str>) -> serde_json::Value {
    json!({ "submission": { "type": "single", "value": letter } })
}

/// Submit body for a multi-select question.
pub fn multiple_submission(letters: &[&str]) -> serde_json::Value {
    json!({ "submission": { "type": "multiple", "value": letters } })
}

/// Submit body for a reading question.
pub fn reading_submission(letters: &[Option<&str>]) -> serde_json::Value {
    json!({ "submission": { "type": "reading", "value": letters } })
}

/// Admin parse/create request body.
pub fn parse_request(text: &str) -> serde_json::Value {
    json!({ "text": text })
}
