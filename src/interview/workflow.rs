// src/interview/workflow.rs — Question/score orchestration and session persistence

use tokio::sync::watch;

use super::client::InterviewClient;
use super::parser;
use super::prompts;
use super::types::{ChatSession, InterviewQuestion, ScoreResult};
use crate::infra::config::{InterviewConfig, DEFAULT_TOPIC};
use crate::infra::errors::CoachError;
use crate::memory::store::{ChatSessionRow, NewSession};
use crate::memory::StoreHandle;

impl From<ChatSessionRow> for ChatSession {
    fn from(row: ChatSessionRow) -> Self {
        Self {
            id: row.id,
            created_at: row.created_at,
            topic: row.topic,
            question: row.question,
            answer: row.answer,
            score: row.score,
            label: row.label,
            summary: row.summary,
        }
    }
}

/// Live view of the stored sessions, newest first.
pub struct SessionFeed {
    rx: watch::Receiver<Vec<ChatSessionRow>>,
}

impl SessionFeed {
    /// Current list; marks it as seen.
    pub fn latest(&mut self) -> Vec<ChatSession> {
        self.rx
            .borrow_and_update()
            .iter()
            .cloned()
            .map(ChatSession::from)
            .collect()
    }

    /// Wait for the next re-publish. Returns false once the store is gone.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }
}

/// Token budgets and topic fallback used by the workflow.
#[derive(Debug, Clone)]
pub struct WorkflowSettings {
    pub model: String,
    pub default_topic: String,
    pub question_max_tokens: u32,
    pub score_max_tokens: u32,
}

impl WorkflowSettings {
    pub fn new(model: impl Into<String>, interview: &InterviewConfig) -> Self {
        Self {
            model: model.into(),
            default_topic: interview.default_topic.clone(),
            question_max_tokens: interview.question_max_tokens,
            score_max_tokens: interview.score_max_tokens,
        }
    }
}

impl Default for WorkflowSettings {
    fn default() -> Self {
        Self::new("llama-3.3-70b-versatile", &InterviewConfig::default())
    }
}

pub struct InterviewWorkflow {
    client: InterviewClient,
    store: StoreHandle,
    settings: WorkflowSettings,
}

impl InterviewWorkflow {
    pub fn new(client: InterviewClient, store: StoreHandle, settings: WorkflowSettings) -> Self {
        Self {
            client,
            store,
            settings,
        }
    }

    pub fn settings(&self) -> &WorkflowSettings {
        &self.settings
    }

    /// Blank topics map to the configured default, every time.
    pub fn resolve_topic(&self, topic: &str) -> String {
        let topic = topic.trim();
        if !topic.is_empty() {
            return topic.to_string();
        }
        let fallback = self.settings.default_topic.trim();
        if fallback.is_empty() {
            DEFAULT_TOPIC.to_string()
        } else {
            fallback.to_string()
        }
    }

    pub async fn get_question(&self, topic: &str) -> Result<InterviewQuestion, CoachError> {
        let topic = self.resolve_topic(topic);
        tracing::debug!(topic = %topic, "requesting question");

        let raw = self
            .client
            .send_messages(
                prompts::question_messages(&topic),
                &self.settings.model,
                self.settings.question_max_tokens,
            )
            .await?;

        Ok(InterviewQuestion {
            text: parser::parse_question(&raw),
            topic,
        })
    }

    /// Fails only on a blank answer or a provider error; malformed replies still score.
    pub async fn score_answer(
        &self,
        question: &InterviewQuestion,
        answer: &str,
    ) -> Result<ScoreResult, CoachError> {
        if answer.trim().is_empty() {
            return Err(CoachError::EmptyAnswer);
        }

        let raw = self
            .client
            .send_messages(
                prompts::scoring_messages(&question.text, answer),
                &self.settings.model,
                self.settings.score_max_tokens,
            )
            .await?;

        Ok(parser::parse_score(&raw))
    }

    /// Persist a scored session; returns the new row id.
    pub async fn save_session(
        &self,
        topic: &str,
        question: &str,
        answer: &str,
        score: &ScoreResult,
    ) -> Result<i64, CoachError> {
        let id = self
            .store
            .insert_session(NewSession {
                topic: topic.to_string(),
                question: question.to_string(),
                answer: answer.to_string(),
                score: score.score,
                label: score.label.clone(),
                summary: score.summary.clone(),
            })
            .await
            .map_err(|e| CoachError::Storage(e.to_string()))?;
        tracing::info!(id, score = score.score, "session saved");
        Ok(id)
    }

    pub fn watch_sessions(&self) -> SessionFeed {
        SessionFeed {
            rx: self.store.subscribe_sessions(),
        }
    }

    pub async fn list_sessions(&self) -> Result<Vec<ChatSession>, CoachError> {
        let rows = self
            .store
            .list_sessions()
            .await
            .map_err(|e| CoachError::Storage(e.to_string()))?;
        Ok(rows.into_iter().map(ChatSession::from).collect())
    }

    pub async fn recent_sessions(&self, limit: u32) -> Result<Vec<ChatSession>, CoachError> {
        let rows = self
            .store
            .recent_sessions(limit)
            .await
            .map_err(|e| CoachError::Storage(e.to_string()))?;
        Ok(rows.into_iter().map(ChatSession::from).collect())
    }

    /// Returns whether a row was removed.
    pub async fn delete_session(&self, id: i64) -> Result<bool, CoachError> {
        let n = self
            .store
            .delete_session(id)
            .await
            .map_err(|e| CoachError::Storage(e.to_string()))?;
        Ok(n > 0)
    }

    pub async fn session_count(&self) -> Result<i64, CoachError> {
        self.store
            .count_sessions()
            .await
            .map_err(|e| CoachError::Storage(e.to_string()))
    }

    pub async fn average_score(&self) -> Result<f64, CoachError> {
        self.store
            .average_score()
            .await
            .map_err(|e| CoachError::Storage(e.to_string()))
    }
}
