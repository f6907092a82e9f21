// src/cli/mod.rs — CLI definition (clap derive)

pub mod ask;
pub mod history;
pub mod practice;
pub mod render;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "interview-coach",
    about = "Practice technical interview questions with an AI interviewer",
    version
)]
pub struct Cli {
    /// Config file path
    #[arg(long)]
    pub config: Option<String>,

    /// Model id sent to the chat-completions endpoint
    #[arg(short, long)]
    pub model: Option<String>,

    /// Topic for the first question (blank uses the configured default)
    #[arg(short, long)]
    pub topic: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive practice session (default)
    Practice,
    /// Print one interview question and exit
    Ask {
        /// Topic to ask about
        topic: Option<String>,
    },
    /// Score an answer to a question and save the session
    Score {
        /// The interview question
        #[arg(short, long)]
        question: String,
        /// The answer (read from stdin when omitted)
        #[arg(short, long)]
        answer: Option<String>,
        /// Topic recorded with the session
        #[arg(short, long)]
        topic: Option<String>,
    },
    /// List past sessions, or delete one
    History {
        /// Number of sessions to show
        #[arg(short, long)]
        limit: Option<u32>,
        /// Delete the session with this id
        #[arg(long)]
        delete: Option<i64>,
        /// Skip the confirmation prompt when deleting
        #[arg(short, long)]
        yes: bool,
    },
    /// Show session count and average score
    Stats,
}
