// src/cli/render.rs — Plain-text rendering for bubbles, score cards, history

use crate::interview::{ChatSession, ScoreResult};
use crate::session::{ChatBubble, Sender, SessionStats};

pub fn format_bubble(bubble: &ChatBubble) -> String {
    match (&bubble.sender, &bubble.score_result) {
        (Sender::User, _) => format!("  you:   {}", bubble.text),
        (Sender::Ai, Some(score)) => format_score_card(score),
        (Sender::Ai, None) => format!("  coach: {}", bubble.text),
    }
}

pub fn format_score_card(score: &ScoreResult) -> String {
    let mut out = format!("  Score: {}/10 ({})\n", score.score, score.label);
    out.push_str("  Strengths:\n");
    for s in &score.strengths {
        out.push_str(&format!("    + {s}\n"));
    }
    out.push_str("  Improvements:\n");
    for s in &score.improvements {
        out.push_str(&format!("    - {s}\n"));
    }
    out.push_str(&format!("  Summary: {}", score.summary));
    out
}

pub fn format_session_line(session: &ChatSession) -> String {
    let when = session
        .created_at_local()
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".into());
    format!(
        "  #{:<4} {}  {:>2}/10 {:<10} {:<24} {}",
        session.id,
        when,
        session.score,
        session.label,
        truncate(&session.topic, 24),
        truncate(&session.question, 60),
    )
}

pub fn format_stats(stats: &SessionStats) -> String {
    if stats.total == 0 {
        return "  No sessions yet.".into();
    }
    format!(
        "  Sessions: {} | Avg score: {:.1}/10",
        stats.total, stats.average_score
    )
}

/// Char-safe truncation with a trailing "...".
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}
