// src/voice.rs — Dictated answers via an external recognizer
//
// Recognition itself is out of process: the configured program records once
// and prints what it heard on stdout.

use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;

use crate::infra::config::VoiceConfig;

#[async_trait]
pub trait VoiceInput: Send + Sync {
    /// Listen for one utterance. `None` means nothing usable was heard.
    async fn listen_once(&self) -> anyhow::Result<Option<String>>;
}

pub struct CommandVoiceInput {
    program: String,
    args: Vec<String>,
}

impl CommandVoiceInput {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

#[async_trait]
impl VoiceInput for CommandVoiceInput {
    async fn listen_once(&self) -> anyhow::Result<Option<String>> {
        tracing::debug!("Running voice command: {} {:?}", self.program, self.args);

        let output = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::warn!(
                status = %output.status,
                stderr = %stderr.trim(),
                "voice command failed"
            );
            return Ok(None);
        }

        let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok((!text.is_empty()).then_some(text))
    }
}

/// `None` when no voice command is configured.
pub fn voice_from_config(config: &VoiceConfig) -> Option<Box<dyn VoiceInput>> {
    let program = config.command.as_deref().map(str::trim).filter(|c| !c.is_empty())?;
    Some(Box::new(CommandVoiceInput::new(program, config.args.clone())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unconfigured_voice() {
        assert!(voice_from_config(&VoiceConfig::default()).is_none());
        let blank = VoiceConfig {
            command: Some("  ".into()),
            args: vec![],
        };
        assert!(voice_from_config(&blank).is_none());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_stdout_is_trimmed() {
        let voice = CommandVoiceInput::new("sh", vec!["-c".into(), "echo '  hello there  '".into()]);
        assert_eq!(voice.listen_once().await.unwrap().as_deref(), Some("hello there"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_empty_stdout_is_none() {
        let voice = CommandVoiceInput::new("sh", vec!["-c".into(), "printf ''".into()]);
        assert_eq!(voice.listen_once().await.unwrap(), None);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failing_command_is_none() {
        let voice = CommandVoiceInput::new("sh", vec!["-c".into(), "echo partial; exit 3".into()]);
        assert_eq!(voice.listen_once().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_missing_program_is_error() {
        let voice = CommandVoiceInput::new("interview-coach-no-such-recognizer", vec![]);
        assert!(voice.listen_once().await.is_err());
    }
}
