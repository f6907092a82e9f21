// src/interview/mod.rs — Interview domain: prompts, parsing, client, workflow

pub mod client;
pub mod parser;
pub mod prompts;
pub mod types;
pub mod workflow;

pub use client::InterviewClient;
pub use types::{ChatSession, InterviewQuestion, ScoreLabel, ScoreResult};
pub use workflow::{InterviewWorkflow, SessionFeed, WorkflowSettings};
