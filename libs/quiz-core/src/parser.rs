//! Parser for pasted single-choice question text.
//!
//! # Format
//! ```text
//! 1. （　　）題幹 (A) 選項一 (B) 選項二 (C) 選項三 (D) 選項四
//! ✅ 正確答案：B
//! 📖 詳解：說明文字
//! 🔍 錯因分析：
//! A：原因
//! C：原因
//! ```
//!
//! The input may be an HTML fragment. The answer and explanation markers are
//! required; the error analysis section is optional. Title, options and
//! explanation keep their inline markup; markers and error analysis lines are
//! read from the rendered plain text.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ParseError, Result};
use crate::richtext::{HtmlRenderer, PlainTextRenderer};
use crate::types::{Letter, ParsedQuestion};

const ANSWER_GLYPH: &str = "✅";
const ANSWER_LABEL: &str = "正確答案";
const EXPLANATION_GLYPH: &str = "📖";
const EXPLANATION_LABEL: &str = "詳解";
const ERROR_ANALYSIS_GLYPH: &str = "🔍";
const ERROR_ANALYSIS_LABEL: &str = "錯因分析";

static ANSWER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"正確答案\s*[:：]?\s*([A-Ea-e])").expect("answer pattern"));

static OPTION_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[(（]\s*[A-E]\s*[)）]").expect("option marker pattern"));

static NUMBERING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\d+\s*[.．、]\s*(?:[(（]\s*[)）])?").expect("numbering pattern")
});

static EXPLANATION_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\s|<[^>]*>)*詳解\s*(?:</[^>]*>\s*)*[:：]?(?:\s|</[^>]*>)*")
        .expect("explanation label pattern")
});

// Block-level tags and whitespace left on the edges of a sliced fragment.
static LEADING_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:\s|</?(?:p|div|br|li|tr|td|h[1-6])(?:\s[^>]*)?/?>)+")
        .expect("leading block pattern")
});

static TRAILING_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:\s|</?(?:p|div|br|li|tr|td|h[1-6])(?:\s[^>]*)?/?>)+$")
        .expect("trailing block pattern")
});

/// Parse pasted question text with the default HTML renderer.
pub fn parse(raw: &str) -> Result<ParsedQuestion> {
    QuestionTextParser::new().parse(raw)
}

/// Extracts a [`ParsedQuestion`] from semi-structured question text.
#[derive(Debug, Clone, Default)]
pub struct QuestionTextParser<R = HtmlRenderer> {
    renderer: R,
}

impl QuestionTextParser<HtmlRenderer> {
    pub fn new() -> Self {
        Self {
            renderer: HtmlRenderer,
        }
    }
}

impl<R: PlainTextRenderer> QuestionTextParser<R> {
    pub fn with_renderer(renderer: R) -> Self {
        Self { renderer }
    }

    pub fn parse(&self, raw: &str) -> Result<ParsedQuestion> {
        let plain = self.renderer.render(raw);
        if !plain.contains(ANSWER_LABEL) {
            return Err(ParseError::MissingAnswerMarker);
        }
        if !plain.contains(EXPLANATION_LABEL) {
            return Err(ParseError::MissingExplanationMarker);
        }

        let (main_block, error_block) = match raw.split_once(ERROR_ANALYSIS_GLYPH) {
            Some((main, rest)) => (main, Some(rest)),
            None => (raw, None),
        };

        let (pre_explanation, explanation) = main_block
            .split_once(EXPLANATION_GLYPH)
            .ok_or(ParseError::MissingExplanationMarker)?;
        let explanation = trim_fragment(&EXPLANATION_PREFIX.replace(explanation, ""));

        let (pre_answer, _) = pre_explanation
            .split_once(ANSWER_GLYPH)
            .ok_or(ParseError::MissingAnswerMarker)?;

        let correct_answer = ANSWER
            .captures(&plain)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().chars().next())
            .and_then(Letter::from_char)
            .ok_or(ParseError::UnparsableAnswer)?;

        let markers: Vec<_> = OPTION_MARKER.find_iter(pre_answer).collect();
        let first = markers.first().ok_or(ParseError::NoOptionMarkersFound)?;

        let title = trim_fragment(&pre_answer[..first.start()]);
        let title = trim_fragment(&NUMBERING.replace(&title, ""));

        let options: Vec<String> = markers
            .iter()
            .enumerate()
            .map(|(i, marker)| {
                let end = markers.get(i + 1).map_or(pre_answer.len(), |next| next.start());
                trim_fragment(&pre_answer[marker.end()..end])
            })
            .collect();

        if correct_answer.index() >= options.len() {
            return Err(ParseError::AnswerOutOfRange {
                answer: correct_answer,
                options: options.len(),
            });
        }

        let error_analysis = match error_block {
            Some(block) => self.parse_error_analysis(block),
            None => BTreeMap::new(),
        };

        Ok(ParsedQuestion {
            title,
            options,
            correct_answer,
            explanation: Some(explanation)
                .filter(|e| !self.renderer.render(e).trim().is_empty()),
            error_analysis,
        })
    }

    /// Render a section and drop its leading label and colon.
    fn strip_label(&self, section: &str, label: &str) -> String {
        let text = self.renderer.render(section);
        let text = text.trim_start();
        let text = text.strip_prefix(label).unwrap_or(text).trim_start();
        let text = text
            .strip_prefix(':')
            .or_else(|| text.strip_prefix('：'))
            .unwrap_or(text);
        text.trim().to_string()
    }

    fn parse_error_analysis(&self, block: &str) -> BTreeMap<Letter, String> {
        let body = self.strip_label(block, ERROR_ANALYSIS_LABEL);
        let mut analysis = BTreeMap::new();

        for line in body.lines() {
            let Some((key, value)) = line.split_once(|c: char| c == ':' || c == '：') else {
                continue;
            };
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            if let Some(letter) = Letter::from_str(&key.trim().to_uppercase()) {
                analysis.insert(letter, value.to_string());
            }
        }

        analysis
    }
}

/// Trim whitespace and block-level wrapper tags from the edges of a rich-text
/// slice. Inline markup such as `<u>` or `<b>` is kept.
fn trim_fragment(fragment: &str) -> String {
    let fragment = LEADING_BLOCK.replace(fragment, "");
    TRAILING_BLOCK.replace(&fragment, "").into_owned()
}
