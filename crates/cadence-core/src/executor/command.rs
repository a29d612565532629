//! Shell-command backed executor.

use std::{
    io::ErrorKind,
    process::Stdio,
    sync::atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use log::{debug, warn};
use tokio::{io::AsyncWriteExt, process::Command};

use super::Executor;
use crate::error::ExecutionError;

const STDERR_PREVIEW_CHARS: usize = 2_000;

/// Runs `command` through `sh -c`, writing `input` to its stdin.
///
/// Returns stdout with trailing whitespace removed. A non-zero exit status
/// is reported as `ExecutionError::Failed` carrying the start of stderr.
pub(crate) async fn run_shell(command: &str, input: &str) -> Result<String, ExecutionError> {
    let mut child = Command::new("sh")
        .arg("-c")
        .arg(command)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| ExecutionError::Spawn { source })?;

    // Feed stdin concurrently so a chatty child cannot block on a full pipe.
    let writer = child.stdin.take().map(|mut stdin| {
        let input = input.to_owned();
        tokio::spawn(async move { stdin.write_all(input.as_bytes()).await })
    });

    let output = child
        .wait_with_output()
        .await
        .map_err(|source| ExecutionError::Io { source })?;

    if let Some(writer) = writer {
        match writer.await {
            Ok(Err(source)) if source.kind() != ErrorKind::BrokenPipe => {
                return Err(ExecutionError::Io { source });
            }
            Err(e) => warn!("stdin writer task failed: {e}"),
            _ => {}
        }
    }

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let preview: String = stderr.trim().chars().take(STDERR_PREVIEW_CHARS).collect();
        return Err(ExecutionError::failed(format!(
            "command exited with {}: {preview}",
            output.status
        )));
    }

    debug!("command produced {} bytes of output", output.stdout.len());
    Ok(String::from_utf8_lossy(&output.stdout).trim_end().to_string())
}

/// Executor that delegates each item to an external shell command.
///
/// The prompt is written to the command's stdin and its stdout becomes the
/// item output. When a finish marker is configured and appears in the
/// output, the executor reports itself finished.
#[derive(Debug)]
pub struct CommandExecutor {
    name: String,
    command: String,
    finish_marker: Option<String>,
    finished: AtomicBool,
}

impl CommandExecutor {
    pub fn new(name: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
            finish_marker: None,
            finished: AtomicBool::new(false),
        }
    }

    /// Stops the flow once `marker` shows up in the command output.
    pub fn with_finish_marker(mut self, marker: impl Into<String>) -> Self {
        self.finish_marker = Some(marker.into()).filter(|m| !m.is_empty());
        self
    }
}

#[async_trait]
impl Executor for CommandExecutor {
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self, prompt: &str) -> Result<String, ExecutionError> {
        debug!("Executor '{}' running: {}", self.name, self.command);
        let output = run_shell(&self.command, prompt).await?;

        if let Some(marker) = &self.finish_marker {
            if output.contains(marker.as_str()) {
                debug!("Executor '{}' reported finish marker", self.name);
                self.finished.store(true, Ordering::SeqCst);
            }
        }
        Ok(output)
    }

    fn is_finished(&self) -> bool {
        self.finished.load(Ordering::SeqCst)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_stdout_is_the_output() {
        let executor = CommandExecutor::new("echo", "printf 'posted\\n\\n'");
        assert_eq!(executor.run("ignored").await.unwrap(), "posted");
        assert!(!executor.is_finished());
    }

    #[tokio::test]
    async fn test_prompt_arrives_on_stdin() {
        let executor = CommandExecutor::new("cat", "cat");
        assert_eq!(executor.run("Item content").await.unwrap(), "Item content");
    }

    #[tokio::test]
    async fn test_non_zero_exit_is_failure() {
        let executor = CommandExecutor::new("broken", "echo 'rate limited' >&2; exit 3");
        let err = executor.run("x").await.unwrap_err();
        match err {
            ExecutionError::Failed { message } => {
                assert!(message.contains("rate limited"), "{message}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_finish_marker_flips_state() {
        let executor =
            CommandExecutor::new("poster", "echo 'all posts DONE'").with_finish_marker("DONE");
        assert!(!executor.is_finished());
        executor.run("x").await.unwrap();
        assert!(executor.is_finished());
    }
}
