//! In-process store for local runs and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{AuthProvider, DocumentStore};
use crate::error::Result;
use crate::models::*;

#[derive(Default)]
struct State {
    questions: HashMap<Uuid, Question>,
    answers: Vec<AnswerRecord>,
    users: HashMap<String, Identity>,
}

/// Volatile store; everything is lost when the process exits.
#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl State {
    fn latest_per_question(&self, user_id: &str) -> HashMap<Uuid, &AnswerRecord> {
        let mut latest: HashMap<Uuid, &AnswerRecord> = HashMap::new();
        // answers are appended in submission order, so later entries win ties
        for record in self.answers.iter().filter(|r| r.user_id == user_id) {
            match latest.get(&record.question_id) {
                Some(existing) if existing.submitted_at > record.submitted_at => {}
                _ => {
                    latest.insert(record.question_id, record);
                }
            }
        }
        latest
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert_question(&self, question: &Question) -> Result<()> {
        let mut state = self.state.write().await;
        state.questions.insert(question.id, question.clone());
        Ok(())
    }

    async fn get_question(&self, id: Uuid) -> Result<Option<Question>> {
        let state = self.state.read().await;
        Ok(state.questions.get(&id).cloned())
    }

    async fn list_questions(
        &self,
        kind: Option<QuestionKind>,
        limit: usize,
    ) -> Result<Vec<Question>> {
        let state = self.state.read().await;
        let mut questions: Vec<Question> = state
            .questions
            .values()
            .filter(|q| kind.map_or(true, |k| q.kind() == k))
            .cloned()
            .collect();
        questions.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        questions.truncate(limit);
        Ok(questions)
    }

    async fn delete_question(&self, id: Uuid) -> Result<bool> {
        let mut state = self.state.write().await;
        let existed = state.questions.remove(&id).is_some();
        state.answers.retain(|r| r.question_id != id);
        Ok(existed)
    }

    async fn insert_answer(&self, record: &AnswerRecord) -> Result<()> {
        let mut state = self.state.write().await;
        state.answers.push(record.clone());
        Ok(())
    }

    async fn list_answers(&self, user_id: &str) -> Result<Vec<AnswerRecord>> {
        let state = self.state.read().await;
        let mut records: Vec<AnswerRecord> = state
            .answers
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        records.sort_by_key(|r| r.submitted_at);
        Ok(records)
    }

    async fn latest_answer(
        &self,
        user_id: &str,
        question_id: Uuid,
    ) -> Result<Option<AnswerRecord>> {
        let state = self.state.read().await;
        Ok(state
            .latest_per_question(user_id)
            .remove(&question_id)
            .cloned())
    }

    async fn due_reviews(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<AnswerRecord>> {
        let state = self.state.read().await;
        let mut due: Vec<AnswerRecord> = state
            .latest_per_question(user_id)
            .into_values()
            .filter(|r| quiz_core::is_due(r.next_review_date, now))
            .cloned()
            .collect();
        due.sort_by_key(|r| r.next_review_date);
        due.truncate(limit);
        Ok(due)
    }
}

#[async_trait]
impl AuthProvider for MemoryStore {
    async fn register(&self, name: Option<&str>) -> Result<(Identity, String)> {
        let token = Uuid::new_v4().to_string();
        let identity = Identity {
            user_id: Uuid::new_v4().to_string(),
            name: name.map(str::to_string),
            is_admin: false,
        };

        let mut state = self.state.write().await;
        state.users.insert(token.clone(), identity.clone());
        Ok((identity, token))
    }

    async fn authenticate(&self, token: &str) -> Result<Option<Identity>> {
        let state = self.state.read().await;
        Ok(state.users.get(token).cloned())
    }

    async fn ensure_admin(&self, token: &str, name: &str) -> Result<Identity> {
        let mut state = self.state.write().await;
        let identity = state
            .users
            .entry(token.to_string())
            .or_insert_with(|| Identity {
                user_id: Uuid::new_v4().to_string(),
                name: Some(name.to_string()),
                is_admin: true,
            });
        identity.is_admin = true;
        Ok(identity.clone())
    }
}
