//! Answer evaluation for the three question kinds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::scheduler::ReviewScheduler;
use crate::types::{AnswerRecord, ChoiceSet, Chosen, Letter, Question, QuestionBody, ReadingItem};

/// Raw selection collected by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Submission {
    Single(Option<Letter>),
    Multiple(Vec<Letter>),
    Reading(Vec<Option<Letter>>),
}

impl Submission {
    /// An empty selection shaped for the given question.
    pub fn empty_for(question: &Question) -> Self {
        match &question.body {
            QuestionBody::SingleChoice { .. } => Self::Single(None),
            QuestionBody::MultiSelect { .. } => Self::Multiple(Vec::new()),
            QuestionBody::Reading { items, .. } => Self::Reading(vec![None; items.len()]),
        }
    }

    fn kind_name(&self) -> &'static str {
        match self {
            Self::Single(_) => "single",
            Self::Multiple(_) => "multiple",
            Self::Reading(_) => "reading",
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            Self::Single(choice) => choice.is_none(),
            Self::Multiple(letters) => letters.is_empty(),
            Self::Reading(answers) => answers.iter().all(Option::is_none),
        }
    }
}

pub fn evaluate_single(chosen: Letter, correct: Letter) -> bool {
    chosen == correct
}

/// Remove duplicate letters and sort ascending.
pub fn normalize(letters: &[Letter]) -> Vec<Letter> {
    let mut out = letters.to_vec();
    out.sort();
    out.dedup();
    out
}

/// Set equality after normalizing both sides.
pub fn evaluate_multi_select(chosen: &[Letter], correct: &[Letter]) -> bool {
    normalize(chosen) == normalize(correct)
}

/// Correct only when every sub-item is answered and matches.
/// Unanswered sub-items count as wrong.
pub fn evaluate_reading(
    chosen: &[Option<Letter>],
    items: &[ReadingItem],
) -> Result<bool, ValidationError> {
    if chosen.len() != items.len() {
        return Err(ValidationError::ItemCountMismatch {
            expected: items.len(),
            actual: chosen.len(),
        });
    }

    let mut all_correct = true;
    for (answer, item) in chosen.iter().zip(items) {
        match answer {
            Some(letter) => {
                check_range(*letter, item.options.len())?;
                all_correct &= evaluate_single(*letter, item.correct_answer);
            }
            None => all_correct = false,
        }
    }
    Ok(all_correct)
}

fn check_range(letter: Letter, options: usize) -> Result<(), ValidationError> {
    if letter.index() < options {
        Ok(())
    } else {
        Err(ValidationError::OptionOutOfRange { letter, options })
    }
}

/// Evaluate a submission against a question, dispatching on the question kind.
pub fn evaluate(
    question: &Question,
    submission: &Submission,
) -> Result<(Chosen, bool), ValidationError> {
    if submission.is_empty() {
        return Err(ValidationError::NoChoiceSelected);
    }

    match (&question.body, submission) {
        (
            QuestionBody::SingleChoice {
                options,
                correct_answer,
            },
            Submission::Single(Some(letter)),
        ) => {
            check_range(*letter, options.len())?;
            Ok((
                Chosen::Single(*letter),
                evaluate_single(*letter, *correct_answer),
            ))
        }
        (
            QuestionBody::MultiSelect {
                options,
                correct_answers,
            },
            Submission::Multiple(letters),
        ) => {
            for letter in letters {
                check_range(*letter, options.len())?;
            }
            let is_correct = evaluate_multi_select(letters, correct_answers.letters());
            Ok((Chosen::Multiple(ChoiceSet::normalize(letters.iter().copied())), is_correct))
        }
        (QuestionBody::Reading { items, .. }, Submission::Reading(answers)) => {
            let is_correct = evaluate_reading(answers, items)?;
            Ok((Chosen::Reading(answers.clone()), is_correct))
        }
        (body, submission) => Err(ValidationError::KindMismatch {
            expected: expected_submission(body),
            submitted: submission.kind_name(),
        }),
    }
}

fn expected_submission(body: &QuestionBody) -> &'static str {
    match body {
        QuestionBody::SingleChoice { .. } => "single",
        QuestionBody::MultiSelect { .. } => "multiple",
        QuestionBody::Reading { .. } => "reading",
    }
}

/// Evaluate and build the immutable record for one attempt.
pub fn evaluate_submission(
    question: &Question,
    submission: &Submission,
    user_id: &str,
    submitted_at: DateTime<Utc>,
    scheduler: &dyn ReviewScheduler,
) -> Result<AnswerRecord, ValidationError> {
    let (chosen, is_correct) = evaluate(question, submission)?;

    Ok(AnswerRecord {
        id: Uuid::new_v4(),
        user_id: user_id.to_string(),
        question_id: question.id,
        kind: question.kind(),
        chosen,
        is_correct,
        submitted_at,
        next_review_date: scheduler.next_review(submitted_at, is_correct),
    })
}

/// Per-question answering state.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Unanswered { selection: Submission },
    Submitted { record: AnswerRecord },
}

/// Tracks one question from selection through submission and reset ("redo").
#[derive(Debug, Clone)]
pub struct QuestionSession {
    empty: Submission,
    state: SessionState,
}

impl QuestionSession {
    pub fn new(question: &Question) -> Self {
        let empty = Submission::empty_for(question);
        Self {
            state: SessionState::Unanswered {
                selection: empty.clone(),
            },
            empty,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_submitted(&self) -> bool {
        matches!(self.state, SessionState::Submitted { .. })
    }

    /// Pick a letter: replaces the choice for single-choice, toggles it for multi-select.
    /// Ignored once submitted.
    pub fn select(&mut self, letter: Letter) {
        if let SessionState::Unanswered { selection } = &mut self.state {
            match selection {
                Submission::Single(choice) => *choice = Some(letter),
                Submission::Multiple(letters) => {
                    if let Some(pos) = letters.iter().position(|l| *l == letter) {
                        letters.remove(pos);
                    } else {
                        letters.push(letter);
                    }
                }
                Submission::Reading(_) => {}
            }
        }
    }

    /// Pick a letter for one reading sub-item. Out-of-range items are ignored.
    pub fn select_item(&mut self, item: usize, letter: Letter) {
        if let SessionState::Unanswered {
            selection: Submission::Reading(answers),
        } = &mut self.state
        {
            if let Some(slot) = answers.get_mut(item) {
                *slot = Some(letter);
            }
        }
    }

    /// Submit the current selection. On error the session is left untouched.
    pub fn submit(
        &mut self,
        question: &Question,
        user_id: &str,
        now: DateTime<Utc>,
        scheduler: &dyn ReviewScheduler,
    ) -> Result<AnswerRecord, ValidationError> {
        let selection = match &self.state {
            SessionState::Unanswered { selection } => selection,
            SessionState::Submitted { .. } => return Err(ValidationError::AlreadySubmitted),
        };

        let record = evaluate_submission(question, selection, user_id, now, scheduler)?;
        self.state = SessionState::Submitted {
            record: record.clone(),
        };
        Ok(record)
    }

    /// Return to unanswered with the selection cleared.
    pub fn reset(&mut self) {
        self.state = SessionState::Unanswered {
            selection: self.empty.clone(),
        };
    }
}
