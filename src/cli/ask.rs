// src/cli/ask.rs — One-shot `ask` and `score` commands

use std::io::Read;

use super::render;
use crate::interview::{InterviewQuestion, InterviewWorkflow};

/// Print a single question for `topic` (blank uses the default topic).
pub async fn run_ask(workflow: &InterviewWorkflow, topic: Option<&str>) -> anyhow::Result<()> {
    let question = workflow.get_question(topic.unwrap_or("")).await?;
    eprintln!("  Topic: {}", question.topic);
    println!("{}", question.text);
    Ok(())
}

/// Score `answer` (or stdin) against `question`, save it, print the card.
pub async fn run_score(
    workflow: &InterviewWorkflow,
    question: &str,
    answer: Option<&str>,
    topic: Option<&str>,
) -> anyhow::Result<()> {
    let answer = match answer {
        Some(a) => a.to_string(),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let answer = answer.trim();

    let question = InterviewQuestion {
        text: question.trim().to_string(),
        topic: workflow.resolve_topic(topic.unwrap_or("")),
    };

    let score = workflow.score_answer(&question, answer).await?;
    let id = workflow
        .save_session(&question.topic, &question.text, answer, &score)
        .await?;

    println!("{}", render::format_score_card(&score));
    eprintln!("  Saved as session #{id}");
    Ok(())
}
