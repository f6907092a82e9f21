// src/session/state.rs — Interview state snapshot and its reducer
//
// `reduce` is the only way the snapshot changes. It is pure: the controller
// decides *when* to apply an action, the reducer decides *what* it means.

use serde::{Deserialize, Serialize};

use crate::interview::{ChatSession, InterviewQuestion, ScoreResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatPhase {
    /// Waiting for a topic and a start.
    #[default]
    Idle,
    LoadingQuestion,
    AwaitingAnswer,
    LoadingScore,
    /// Score shown; another question can be requested.
    Scored,
}

impl ChatPhase {
    pub fn is_loading(&self) -> bool {
        matches!(self, ChatPhase::LoadingQuestion | ChatPhase::LoadingScore)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChatPhase::Idle => "idle",
            ChatPhase::LoadingQuestion => "loading_question",
            ChatPhase::AwaitingAnswer => "awaiting_answer",
            ChatPhase::LoadingScore => "loading_score",
            ChatPhase::Scored => "scored",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sender {
    User,
    Ai,
}

/// One displayed turn of the conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatBubble {
    pub id: u64,
    pub sender: Sender,
    pub text: String,
    /// Only set on AI score bubbles.
    pub score_result: Option<ScoreResult>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub total: usize,
    pub average_score: f32,
}

impl SessionStats {
    pub fn from_sessions(sessions: &[ChatSession]) -> Self {
        if sessions.is_empty() {
            return Self::default();
        }
        let sum: i64 = sessions.iter().map(|s| s.score as i64).sum();
        Self {
            total: sessions.len(),
            average_score: (sum as f64 / sessions.len() as f64) as f32,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatState {
    pub phase: ChatPhase,
    pub topic_input: String,
    pub answer_input: String,
    pub messages: Vec<ChatBubble>,
    /// Newest first.
    pub past_sessions: Vec<ChatSession>,
    pub history_expanded: bool,
    pub session_stats: SessionStats,
    pub current_question: Option<InterviewQuestion>,
    pub next_bubble_id: u64,
}

#[derive(Debug, Clone)]
pub enum Action {
    TopicChanged(String),
    AnswerChanged(String),
    VoiceResult(String),
    ToggleHistory,
    QuestionRequested,
    QuestionReceived(InterviewQuestion),
    /// Question fetch failed; go back to `restore`.
    QuestionFailed { restore: ChatPhase },
    AnswerSubmitted(String),
    ScoreReceived(ScoreResult),
    ScoreFailed,
    HistoryUpdated(Vec<ChatSession>),
    Reset,
}

impl ChatState {
    fn push_bubble(&mut self, sender: Sender, text: String, score_result: Option<ScoreResult>) {
        let id = self.next_bubble_id;
        self.next_bubble_id += 1;
        self.messages.push(ChatBubble {
            id,
            sender,
            text,
            score_result,
        });
    }
}

pub fn reduce(state: &ChatState, action: Action) -> ChatState {
    let mut next = state.clone();
    match action {
        Action::TopicChanged(topic) => next.topic_input = topic,
        Action::AnswerChanged(answer) | Action::VoiceResult(answer) => next.answer_input = answer,
        Action::ToggleHistory => next.history_expanded = !next.history_expanded,
        Action::QuestionRequested => next.phase = ChatPhase::LoadingQuestion,
        Action::QuestionReceived(question) => {
            next.phase = ChatPhase::AwaitingAnswer;
            next.answer_input.clear();
            next.push_bubble(Sender::Ai, question.text.clone(), None);
            next.current_question = Some(question);
        }
        Action::QuestionFailed { restore } => next.phase = restore,
        Action::AnswerSubmitted(answer) => {
            next.phase = ChatPhase::LoadingScore;
            next.answer_input.clear();
            next.push_bubble(Sender::User, answer, None);
        }
        Action::ScoreReceived(score) => {
            next.phase = ChatPhase::Scored;
            next.push_bubble(Sender::Ai, score.summary.clone(), Some(score));
        }
        Action::ScoreFailed => next.phase = ChatPhase::AwaitingAnswer,
        Action::HistoryUpdated(sessions) => {
            next.session_stats = SessionStats::from_sessions(&sessions);
            next.past_sessions = sessions;
        }
        Action::Reset => {
            next.phase = ChatPhase::Idle;
            next.messages.clear();
            next.answer_input.clear();
            next.current_question = None;
        }
    }
    next
}
