//! Shell-command backed drafting collaborator.

use async_trait::async_trait;
use log::debug;
use serde::Serialize;
use serde_json::Value;

use super::Drafter;
use crate::{error::DraftError, executor::command::run_shell};

/// Request written to the drafting command's stdin as one JSON object.
#[derive(Debug, Serialize)]
struct DraftRequest<'a> {
    task: &'a str,
    system: &'a str,
    user: &'a str,
}

/// Drafter that delegates to an external command.
///
/// The command receives `{"task": "draft" | "summarize", "system": ..,
/// "user": ..}` on stdin. For drafts, stdout must be a JSON plan payload
/// (empty output means no structured result); for summaries, stdout is the
/// summary text.
#[derive(Debug, Clone)]
pub struct CommandDrafter {
    command: String,
}

impl CommandDrafter {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    async fn call(&self, task: &str, system: &str, user: &str) -> Result<String, DraftError> {
        let request = serde_json::to_string(&DraftRequest { task, system, user })?;
        debug!("Drafting command '{}' handling {task}", self.command);

        run_shell(&self.command, &request)
            .await
            .map_err(|e| DraftError::Call {
                message: e.to_string(),
            })
    }
}

#[async_trait]
impl Drafter for CommandDrafter {
    async fn draft(&self, system: &str, user: &str) -> Result<Option<Value>, DraftError> {
        let output = self.call("draft", system, user).await?;
        if output.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&output)?))
    }

    async fn summarize(&self, system: &str, user: &str) -> Result<String, DraftError> {
        let output = self.call("summarize", system, user).await?;
        if output.trim().is_empty() {
            return Err(DraftError::Call {
                message: "empty summary".to_string(),
            });
        }
        Ok(output)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_draft_parses_stdout_as_json() {
        let drafter = CommandDrafter::new(r#"echo '{"title": "T", "items": [{"content": "a"}]}'"#);
        let payload = drafter.draft("sys", "user").await.unwrap().unwrap();
        assert_eq!(payload["title"], "T");
    }

    #[tokio::test]
    async fn test_empty_draft_is_none() {
        let drafter = CommandDrafter::new("true");
        assert!(drafter.draft("sys", "user").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_non_json_draft_is_malformed() {
        let drafter = CommandDrafter::new("echo 'sure, here is a plan'");
        assert!(matches!(
            drafter.draft("sys", "user").await,
            Err(DraftError::Malformed { .. })
        ));
    }

    #[tokio::test]
    async fn test_summarize_receives_request_on_stdin() {
        let drafter = CommandDrafter::new("cat");
        let summary = drafter.summarize("sys", "final plan").await.unwrap();
        let request: Value = serde_json::from_str(&summary).unwrap();
        assert_eq!(request["task"], "summarize");
        assert_eq!(request["user"], "final plan");
    }

    #[tokio::test]
    async fn test_failed_command_is_call_error() {
        let drafter = CommandDrafter::new("exit 1");
        assert!(matches!(
            drafter.summarize("sys", "user").await,
            Err(DraftError::Call { .. })
        ));
    }
}
