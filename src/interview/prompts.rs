// src/interview/prompts.rs — System and user prompts for questions and scoring

use crate::provider::Message;

const SYSTEM_PROMPT: &str = "\
You are a strict, senior Android engineer conducting a live technical interview.
Your standards are FAANG-level. You do NOT accept hand-waving or vague answers.

Absolute rules:
1. Ask EXACTLY ONE focused question per turn. Zero sub-bullets, zero follow-ups in the same reply.
2. Questions must probe real depth: Kotlin internals, Jetpack Compose rendering pipeline,
   HAL/HIDL, coroutines structured concurrency, memory leaks, build system, etc.
3. When scoring, be honest. A 10 is exceptional. A 7 is solid. Under 5 needs real work.
4. Never inflate scores to be kind. Constructive, direct, honest.
5. Respond ONLY in the exact format specified by the user message.";

pub fn system_prompt() -> &'static str {
    SYSTEM_PROMPT
}

/// Forces the `QUESTION: ...` output format.
pub fn question_prompt(topic: &str) -> String {
    format!(
        "Generate ONE senior interview question on the topic: \"{topic}\".\n\n\
         Respond in EXACTLY this format (no preamble, no extra lines):\n\
         QUESTION: <your single-sentence or short-paragraph question here>"
    )
}

/// Forces a machine-parseable scoring reply.
pub fn scoring_prompt(question: &str, answer: &str) -> String {
    format!(
        "QUESTION ASKED:\n{question}\n\n\
         CANDIDATE'S ANSWER:\n{answer}\n\n\
         Evaluate the answer. Respond in EXACTLY this format (no deviations):\n\
         SCORE: <integer 1-10>\n\
         LABEL: <exactly one of: Outstanding|Strong|Developing|Weak>\n\
         STRENGTHS:\n\
         - <strength 1>\n\
         - <strength 2>\n\
         IMPROVEMENTS:\n\
         - <improvement 1>\n\
         - <improvement 2>\n\
         SUMMARY: <2-3 sentences of overall assessment>\n\n\
         Scoring weights: technical accuracy 40% · structure/clarity 30% · depth/examples 30%."
    )
}

pub fn question_messages(topic: &str) -> Vec<Message> {
    vec![
        Message::system(system_prompt()),
        Message::user(question_prompt(topic)),
    ]
}

pub fn scoring_messages(question: &str, answer: &str) -> Vec<Message> {
    vec![
        Message::system(system_prompt()),
        Message::user(scoring_prompt(question, answer)),
    ]
}
