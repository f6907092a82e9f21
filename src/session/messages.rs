// src/session/messages.rs — Short user-facing text for failures

use crate::infra::errors::CoachError;

const MAX_GENERIC_CHARS: usize = 100;

/// Map an error to a one-line hint. HTTP failures are classified by status;
/// everything else by substring heuristics on its message.
pub fn to_ui_message(err: &CoachError, api_key_env: &str) -> String {
    let message = err.to_string();

    if let CoachError::Http { status, .. } = err {
        return match status {
            401 => auth_hint(api_key_env),
            429 => RATE_LIMIT_HINT.to_string(),
            _ => truncate(&message),
        };
    }

    let lower = message.to_lowercase();
    if lower.contains("401") {
        auth_hint(api_key_env)
    } else if lower.contains("429") {
        RATE_LIMIT_HINT.to_string()
    } else if lower.contains("timeout") || lower.contains("timed out") {
        "Request timed out. Check your connection.".to_string()
    } else if lower.contains("network") {
        "Network error. Check your connection.".to_string()
    } else {
        truncate(&message)
    }
}

const RATE_LIMIT_HINT: &str = "Rate limit reached. Please wait a moment.";

fn auth_hint(api_key_env: &str) -> String {
    format!("Invalid API key. Check {api_key_env} or provider.api_key in config.toml.")
}

fn truncate(message: &str) -> String {
    message.chars().take(MAX_GENERIC_CHARS).collect()
}
