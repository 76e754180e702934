//! Mock port implementations for tests.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;

use domain::alert::entity::AlertRecord;
use domain::command::entity::CommandOutcome;
use domain::common::error::DomainError;
use domain::playbook::entity::PlaybookDocument;

use crate::secondary::alert_store::AlertStore;
use crate::secondary::command_runner::CommandRunner;
use crate::secondary::playbook_store::PlaybookStore;

/// Command runner that returns a fixed outcome and records every invocation.
pub struct StaticCommandRunner {
    outcome: CommandOutcome,
    invocations: Mutex<Vec<(String, Vec<String>)>>,
}

impl StaticCommandRunner {
    pub fn new(outcome: CommandOutcome) -> Self {
        Self {
            outcome,
            invocations: Mutex::new(Vec::new()),
        }
    }

    /// Runner that reports exit 0 with empty output.
    pub fn succeeding() -> Self {
        Self::new(CommandOutcome {
            exit_code: Some(0),
            stdout: String::new(),
            stderr: String::new(),
        })
    }

    pub fn invocations(&self) -> Vec<(String, Vec<String>)> {
        self.invocations.lock().unwrap().clone()
    }
}

impl CommandRunner for StaticCommandRunner {
    fn run<'a>(
        &'a self,
        program: &'a str,
        args: &'a [String],
    ) -> Pin<Box<dyn Future<Output = Result<CommandOutcome, DomainError>> + Send + 'a>> {
        Box::pin(async move {
            self.invocations
                .lock()
                .unwrap()
                .push((program.to_string(), args.to_vec()));
            Ok(self.outcome.clone())
        })
    }
}

/// Runner whose every invocation hangs, for timeout tests.
pub struct HangingCommandRunner;

impl CommandRunner for HangingCommandRunner {
    fn run<'a>(
        &'a self,
        _program: &'a str,
        _args: &'a [String],
    ) -> Pin<Box<dyn Future<Output = Result<CommandOutcome, DomainError>> + Send + 'a>> {
        Box::pin(async {
            std::future::pending::<()>().await;
            unreachable!()
        })
    }
}

/// In-memory alert store keyed by document id.
#[derive(Default)]
pub struct InMemoryAlertStore {
    alerts: HashMap<String, AlertRecord>,
}

impl InMemoryAlertStore {
    pub fn with_alerts(alerts: Vec<AlertRecord>) -> Self {
        Self {
            alerts: alerts.into_iter().map(|a| (a.id.clone(), a)).collect(),
        }
    }
}

impl AlertStore for InMemoryAlertStore {
    fn fetch_alert<'a>(
        &'a self,
        id: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Option<AlertRecord>, DomainError>> + Send + 'a>> {
        Box::pin(async move { Ok(self.alerts.get(id).cloned()) })
    }
}

/// In-memory playbook store keyed by playbook name.
#[derive(Default)]
pub struct InMemoryPlaybookStore {
    playbooks: HashMap<String, PlaybookDocument>,
}

impl InMemoryPlaybookStore {
    pub fn with_playbooks(docs: Vec<PlaybookDocument>) -> Self {
        Self {
            playbooks: docs.into_iter().map(|d| (d.name.clone(), d)).collect(),
        }
    }
}

impl PlaybookStore for InMemoryPlaybookStore {
    fn fetch_playbook<'a>(
        &'a self,
        name: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Option<PlaybookDocument>, DomainError>> + Send + 'a>>
    {
        Box::pin(async move { Ok(self.playbooks.get(name).cloned()) })
    }
}
