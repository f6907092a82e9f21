// src/interview/parser.rs — Parse LLM question and scoring replies
//
// The model is not trusted to follow the format. Every function here is total:
// missing or malformed fields fall back to fixed defaults, never to an error.

use super::types::ScoreResult;

pub const DEFAULT_SCORE: i32 = 5;
pub const MIN_SCORE: i32 = 1;
pub const MAX_SCORE: i32 = 10;
pub const DEFAULT_LABEL: &str = "Developing";
pub const DEFAULT_STRENGTH: &str = "Answered the question";
pub const DEFAULT_IMPROVEMENT: &str = "Provide more technical depth";
/// Characters of raw reply used as the summary when `SUMMARY:` is missing.
pub const SUMMARY_FALLBACK_CHARS: usize = 200;

const QUESTION_PREFIX: &str = "QUESTION:";

/// Extract the question text from a reply.
///
/// Expected format:
/// ```text
/// QUESTION: <text>
/// ```
/// Without a `QUESTION:` line the whole trimmed reply is the question.
pub fn parse_question(raw: &str) -> String {
    raw.lines()
        .find_map(|line| line.trim_start().strip_prefix(QUESTION_PREFIX))
        .map(|rest| rest.trim().to_string())
        .unwrap_or_else(|| raw.trim().to_string())
}

/// Parse a scoring reply into a `ScoreResult`.
///
/// Expected format:
/// ```text
/// SCORE: 7
/// LABEL: Strong
/// STRENGTHS:
/// - ...
/// IMPROVEMENTS:
/// - ...
/// SUMMARY: ...
/// ```
pub fn parse_score(raw: &str) -> ScoreResult {
    let lines: Vec<&str> = raw.lines().collect();

    let score = field(&lines, "SCORE:")
        .and_then(|s| s.parse::<i32>().ok())
        .map(|s| s.clamp(MIN_SCORE, MAX_SCORE))
        .unwrap_or(DEFAULT_SCORE);

    let label = field(&lines, "LABEL:").unwrap_or_else(|| DEFAULT_LABEL.to_string());

    let mut strengths = bullets(&lines, "STRENGTHS:");
    if strengths.is_empty() {
        strengths.push(DEFAULT_STRENGTH.to_string());
    }

    let mut improvements = bullets(&lines, "IMPROVEMENTS:");
    if improvements.is_empty() {
        improvements.push(DEFAULT_IMPROVEMENT.to_string());
    }

    let summary = field(&lines, "SUMMARY:")
        .unwrap_or_else(|| raw.chars().take(SUMMARY_FALLBACK_CHARS).collect());

    ScoreResult {
        score,
        label,
        strengths,
        improvements,
        summary,
    }
}

/// Text after `prefix` on the first line that starts with it (leading whitespace ignored).
pub(crate) fn field(lines: &[&str], prefix: &str) -> Option<String> {
    lines
        .iter()
        .find_map(|line| line.trim_start().strip_prefix(prefix))
        .map(|rest| rest.trim().to_string())
}

/// `-` bullets directly under the first line starting with `header`.
/// Collection stops at the first line that is not a bullet.
pub(crate) fn bullets(lines: &[&str], header: &str) -> Vec<String> {
    let Some(idx) = lines
        .iter()
        .position(|line| line.trim_start().starts_with(header))
    else {
        return Vec::new();
    };

    lines[idx + 1..]
        .iter()
        .map_while(|line| line.trim_start().strip_prefix('-'))
        .map(|b| b.trim())
        .filter(|b| !b.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const WELL_FORMED: &str = "\
SCORE: 8
LABEL: Strong
STRENGTHS:
- Clear explanation of recomposition
- Mentioned stability annotations
IMPROVEMENTS:
- Discuss derivedStateOf
- Give a concrete example
SUMMARY: Solid answer with good structure. Needs more depth on edge cases.";

    // ─── parse_score ────────────────────────────────────────────

    #[test]
    fn test_parse_well_formed() {
        let r = parse_score(WELL_FORMED);
        assert_eq!(r.score, 8);
        assert_eq!(r.label, "Strong");
        assert_eq!(
            r.strengths,
            vec![
                "Clear explanation of recomposition".to_string(),
                "Mentioned stability annotations".to_string()
            ]
        );
        assert_eq!(r.improvements.len(), 2);
        assert_eq!(
            r.summary,
            "Solid answer with good structure. Needs more depth on edge cases."
        );
    }

    #[test]
    fn test_score_clamped_high() {
        assert_eq!(parse_score("SCORE: 13").score, 10);
    }

    #[test]
    fn test_score_clamped_low() {
        assert_eq!(parse_score("SCORE: -4").score, 1);
        assert_eq!(parse_score("SCORE: 0").score, 1);
    }

    #[test]
    fn test_score_non_numeric_defaults() {
        assert_eq!(parse_score("SCORE: abc").score, 5);
        assert_eq!(parse_score("SCORE: 7/10").score, 5);
        assert_eq!(parse_score("no score here").score, 5);
    }

    #[test]
    fn test_missing_label_defaults() {
        let r = parse_score("SCORE: 6\nSUMMARY: fine");
        assert_eq!(r.label, "Developing");
    }

    #[test]
    fn test_label_kept_verbatim() {
        let r = parse_score("LABEL: Exceptional");
        assert_eq!(r.label, "Exceptional");
        assert!(r.tier().is_none());
    }

    #[test]
    fn test_empty_strengths_section_defaults() {
        let r = parse_score("STRENGTHS:\nIMPROVEMENTS:\n- more depth\nSUMMARY: meh");
        assert_eq!(r.strengths, vec!["Answered the question".to_string()]);
        assert_eq!(r.improvements, vec!["more depth".to_string()]);
    }

    #[test]
    fn test_missing_improvements_defaults() {
        let r = parse_score("SCORE: 9");
        assert_eq!(
            r.improvements,
            vec!["Provide more technical depth".to_string()]
        );
    }

    #[test]
    fn test_bullets_stop_at_first_non_bullet() {
        let raw = "\
STRENGTHS:
- first
- second
Some commentary line
- stray bullet after commentary
IMPROVEMENTS:
- improve";
        let r = parse_score(raw);
        assert_eq!(r.strengths, vec!["first".to_string(), "second".to_string()]);
        assert_eq!(r.improvements, vec!["improve".to_string()]);
    }

    #[test]
    fn test_bullets_do_not_bleed_into_next_header() {
        let raw = "STRENGTHS:\n- a\nIMPROVEMENTS:\n- b\n- c";
        let r = parse_score(raw);
        assert_eq!(r.strengths, vec!["a".to_string()]);
        assert_eq!(r.improvements, vec!["b".to_string(), "c".to_string()]);
    }

    #[test]
    fn test_empty_bullets_dropped() {
        let r = parse_score("STRENGTHS:\n-\n-   \n- real one\n");
        assert_eq!(r.strengths, vec!["real one".to_string()]);
    }

    #[test]
    fn test_indented_lines_accepted() {
        let raw = "   SCORE: 7\n  LABEL: Strong\n  STRENGTHS:\n    - indented\n  SUMMARY:   spaced  ";
        let r = parse_score(raw);
        assert_eq!(r.score, 7);
        assert_eq!(r.label, "Strong");
        assert_eq!(r.strengths, vec!["indented".to_string()]);
        assert_eq!(r.summary, "spaced");
    }

    #[test]
    fn test_summary_fallback_first_200_chars() {
        let raw = "x".repeat(350);
        let r = parse_score(&raw);
        assert_eq!(r.summary.chars().count(), 200);

        let short = "The model ignored the format entirely.";
        assert_eq!(parse_score(short).summary, short);
    }

    #[test]
    fn test_summary_fallback_respects_char_boundaries() {
        let raw = "é".repeat(250);
        let r = parse_score(&raw);
        assert_eq!(r.summary.chars().count(), 200);
    }

    #[test]
    fn test_first_matching_field_wins() {
        let r = parse_score("SCORE: 3\nSCORE: 9");
        assert_eq!(r.score, 3);
    }

    #[test]
    fn test_empty_input() {
        let r = parse_score("");
        assert_eq!(r.score, 5);
        assert_eq!(r.label, "Developing");
        assert_eq!(r.summary, "");
        assert_eq!(r.strengths.len(), 1);
        assert_eq!(r.improvements.len(), 1);
    }

    // ─── parse_question ─────────────────────────────────────────

    #[test]
    fn test_parse_question_prefixed() {
        assert_eq!(
            parse_question("QUESTION: What is a sealed interface?\nExtra line"),
            "What is a sealed interface?"
        );
    }

    #[test]
    fn test_parse_question_after_preamble() {
        let raw = "Sure! Here's one.\n  QUESTION:   How does remember work?  ";
        assert_eq!(parse_question(raw), "How does remember work?");
    }

    #[test]
    fn test_parse_question_fallback_whole_text() {
        let raw = "\n  Explain structured concurrency.\nWith examples.  \n";
        assert_eq!(
            parse_question(raw),
            "Explain structured concurrency.\nWith examples."
        );
    }

    // ─── helpers ────────────────────────────────────────────────

    #[test]
    fn test_field_absent() {
        assert_eq!(field(&["LABEL: x"], "SCORE:"), None);
    }

    #[test]
    fn test_bullets_header_absent() {
        assert!(bullets(&["- a", "- b"], "STRENGTHS:").is_empty());
    }
}
