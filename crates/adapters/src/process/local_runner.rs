use std::future::Future;
use std::pin::Pin;
use std::process::Stdio;

use domain::command::entity::CommandOutcome;
use domain::command::error::DispatchError;
use domain::common::error::DomainError;
use ports::secondary::command_runner::CommandRunner;

/// Command runner that spawns local processes via `tokio::process`.
///
/// The argument vector is passed to the OS directly — no shell is involved,
/// so values substituted into arguments cannot be re-interpreted. Stdin is
/// closed; stdout and stderr are captured in full.
#[derive(Debug, Default)]
pub struct LocalProcessRunner;

impl LocalProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for LocalProcessRunner {
    fn run<'a>(
        &'a self,
        program: &'a str,
        args: &'a [String],
    ) -> Pin<Box<dyn Future<Output = Result<CommandOutcome, DomainError>> + Send + 'a>> {
        Box::pin(async move {
            let output = tokio::process::Command::new(program)
                .args(args)
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .kill_on_drop(true)
                .output()
                .await
                .map_err(|e| DispatchError::SpawnFailed {
                    program: program.to_string(),
                    reason: e.to_string(),
                })?;

            Ok(CommandOutcome {
                exit_code: output.status.code(),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn echo_captures_stdout_and_exit_zero() {
        let runner = LocalProcessRunner::new();
        let outcome = runner
            .run("echo", &["test".to_string()])
            .await
            .unwrap();

        assert_eq!(outcome.exit_code, Some(0));
        assert_eq!(outcome.stdout, "test\n");
        assert!(outcome.stderr.is_empty());
        assert!(outcome.success());
    }

    #[tokio::test]
    async fn hostile_value_is_echoed_literally() {
        let runner = LocalProcessRunner::new();
        let outcome = runner
            .run("echo", &["$(whoami); rm -rf /".to_string()])
            .await
            .unwrap();

        // No shell ever sees the value, so nothing expands or splits.
        assert_eq!(outcome.stdout, "$(whoami); rm -rf /\n");
    }

    #[tokio::test]
    async fn nonzero_exit_is_an_outcome_not_an_error() {
        let runner = LocalProcessRunner::new();
        let outcome = runner.run("false", &[]).await.unwrap();

        assert_eq!(outcome.exit_code, Some(1));
        assert!(!outcome.success());
    }

    #[tokio::test]
    async fn missing_executable_is_spawn_failure() {
        let runner = LocalProcessRunner::new();
        let err = runner
            .run("definitely-not-a-real-binary-4b1c", &[])
            .await
            .unwrap_err();

        assert!(err.to_string().contains("spawn"), "got: {err}");
    }
}
