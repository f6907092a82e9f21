// src/interview/types.rs — Domain records for questions, scores and stored sessions

use serde::{Deserialize, Serialize};

/// One generated interview question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewQuestion {
    pub text: String,
    pub topic: String,
}

/// Coarse qualitative tier the model attaches to a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreLabel {
    Outstanding,
    Strong,
    Developing,
    Weak,
}

impl ScoreLabel {
    pub const ALL: [ScoreLabel; 4] = [
        ScoreLabel::Outstanding,
        ScoreLabel::Strong,
        ScoreLabel::Developing,
        ScoreLabel::Weak,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreLabel::Outstanding => "Outstanding",
            ScoreLabel::Strong => "Strong",
            ScoreLabel::Developing => "Developing",
            ScoreLabel::Weak => "Weak",
        }
    }

    /// Case-insensitive match against the four tier names.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|l| l.as_str().eq_ignore_ascii_case(s))
    }
}

impl std::fmt::Display for ScoreLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured evaluation of one answer. Always fully populated (see `parser::parse_score`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: i32,
    /// Label text as the model wrote it.
    pub label: String,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub summary: String,
}

impl ScoreResult {
    /// The label as a known tier, if the model used one of the four names.
    pub fn tier(&self) -> Option<ScoreLabel> {
        ScoreLabel::parse(&self.label)
    }
}

/// A persisted practice session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: i64,
    /// Epoch millis.
    pub created_at: i64,
    pub topic: String,
    pub question: String,
    pub answer: String,
    pub score: i32,
    pub label: String,
    pub summary: String,
}

impl ChatSession {
    pub fn created_at_local(&self) -> Option<chrono::DateTime<chrono::Local>> {
        chrono::DateTime::from_timestamp_millis(self.created_at)
            .map(|dt| dt.with_timezone(&chrono::Local))
    }
}
