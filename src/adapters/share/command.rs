//! Native share via an external command. Implements SharePort.
//!
//! The configured command receives title, text and URL as trailing
//! arguments. Exit code 130 (interrupted) or death by signal counts as a
//! user cancel.

use crate::domain::{DomainError, ShareContent, ShareOutcome};
use crate::ports::SharePort;
use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

/// Exit status conventionally used for "interrupted by user".
const EXIT_CANCELLED: i32 = 130;

pub struct CommandShare {
    program: String,
    args: Vec<String>,
}

impl CommandShare {
    /// Build from a whitespace-separated command line. `None` when empty.
    pub fn from_command_line(command: &str) -> Option<Self> {
        let mut parts = command.split_whitespace().map(String::from);
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
        })
    }
}

#[async_trait]
impl SharePort for CommandShare {
    async fn share(&self, content: &ShareContent) -> Result<ShareOutcome, DomainError> {
        debug!(program = %self.program, url = %content.url, "invoking share command");
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(&content.title)
            .arg(&content.text)
            .arg(&content.url)
            .status()
            .await
            .map_err(|e| DomainError::Share(format!("spawn {}: {}", self.program, e)))?;

        match status.code() {
            Some(0) => {
                info!(program = %self.program, "share command completed");
                Ok(ShareOutcome::Shared)
            }
            Some(EXIT_CANCELLED) | None => Ok(ShareOutcome::Cancelled),
            Some(code) => Err(DomainError::Share(format!(
                "{} exited with status {}",
                self.program, code
            ))),
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn content() -> ShareContent {
        ShareContent {
            title: "Prediction by Anna".into(),
            text: "Anna: \"...\"".into(),
            url: "https://prognoznik.com/prediction/p1".into(),
        }
    }

    #[test]
    fn test_parse_command_line() {
        assert!(CommandShare::from_command_line("   ").is_none());
        let cmd = CommandShare::from_command_line("notify-send -a prognoznik").unwrap();
        assert_eq!(cmd.program, "notify-send");
        assert_eq!(cmd.args, vec!["-a", "prognoznik"]);
    }

    #[tokio::test]
    async fn test_exit_codes_map_to_outcomes() {
        let ok = CommandShare::from_command_line("true").unwrap();
        assert_eq!(ok.share(&content()).await.unwrap(), ShareOutcome::Shared);

        // Script with a space: built directly, whitespace splitting can't express it.
        let cancelled = CommandShare {
            program: "sh".into(),
            args: vec!["-c".into(), "exit 130".into()],
        };
        assert_eq!(
            cancelled.share(&content()).await.unwrap(),
            ShareOutcome::Cancelled
        );

        let failed = CommandShare::from_command_line("false").unwrap();
        assert!(matches!(
            failed.share(&content()).await,
            Err(DomainError::Share(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_program_is_share_error() {
        let cmd = CommandShare::from_command_line("prognoznik-no-such-binary").unwrap();
        assert!(matches!(cmd.share(&content()).await, Err(DomainError::Share(_))));
    }
}
