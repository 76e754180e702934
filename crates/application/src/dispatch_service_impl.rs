use std::sync::Arc;
use std::time::Duration;

use domain::command::entity::{CommandEntry, CommandTree, DispatchResult, EntryAction};
use domain::command::error::DispatchError;
use domain::common::error::DomainError;
use ports::secondary::command_runner::CommandRunner;

/// Application-level dispatcher for lookup/response commands.
///
/// Resolves an entry by path, substitutes the field value, and either runs
/// the command (timeout-bounded) or returns the substituted link. Takes
/// `&self` throughout: invocations are independent and may run concurrently,
/// with no ordering guarantee between them.
pub struct DispatchAppService {
    tree: CommandTree,
    runner: Arc<dyn CommandRunner>,
    timeout: Duration,
}

impl DispatchAppService {
    pub fn new(tree: CommandTree, runner: Arc<dyn CommandRunner>, timeout: Duration) -> Self {
        Self {
            tree,
            runner,
            timeout,
        }
    }

    /// Dispatch the entry at `path` with `value` substituted in.
    ///
    /// Commands return a `CommandOutcome` carrying stdout, stderr and exit
    /// status — a non-zero exit is reported, not an error. Spawn failures
    /// and timeouts are errors, but never fatal to the hosting process.
    pub async fn dispatch(
        &self,
        path: &[&str],
        value: &str,
    ) -> Result<DispatchResult, DomainError> {
        let (name, action) = self.resolve(path)?;

        match action {
            EntryAction::Link(link) => {
                let url = link.substitute(value);
                tracing::debug!(entry = %name, url = %url, "link substituted");
                Ok(DispatchResult::Link(url))
            }
            EntryAction::Command(template) => {
                let args = template.substitute(value);
                tracing::info!(
                    entry = %name,
                    program = template.program(),
                    "running external command"
                );

                let outcome =
                    tokio::time::timeout(self.timeout, self.runner.run(template.program(), &args))
                        .await
                        .map_err(|_elapsed| DispatchError::Timeout {
                            name: name.clone(),
                            timeout_secs: self.timeout.as_secs(),
                        })??;

                if !outcome.success() {
                    tracing::warn!(
                        entry = %name,
                        exit_code = ?outcome.exit_code,
                        stderr = %outcome.stderr,
                        "external command reported failure"
                    );
                }
                Ok(DispatchResult::Command(outcome))
            }
        }
    }

    /// Render the fully substituted invocation or URL without executing.
    pub fn render(&self, path: &[&str], value: &str) -> Result<String, DomainError> {
        let (_, action) = self.resolve(path)?;
        Ok(match action {
            EntryAction::Command(template) => template.rendered(value),
            EntryAction::Link(link) => link.substitute(value),
        })
    }

    /// All dispatchable entries as `(path, kind)` pairs in tree order.
    pub fn list(&self) -> Vec<(String, &'static str)> {
        self.tree
            .actions()
            .into_iter()
            .map(|(path, action)| (path, action.kind()))
            .collect()
    }

    fn resolve(&self, path: &[&str]) -> Result<(String, &EntryAction), DomainError> {
        let joined = path.join("/");
        match self.tree.find(path) {
            Some(CommandEntry::Action { name, action }) => Ok((name.clone(), action)),
            Some(CommandEntry::Menu { .. }) => {
                Err(DispatchError::NotAnAction(joined).into())
            }
            None => Err(DispatchError::EntryNotFound(joined).into()),
        }
    }
}
