use std::sync::Arc;

use domain::alert::entity::AlertContext;
use domain::common::error::DomainError;
use domain::playbook::linker::PlaybookLinker;
use ports::secondary::alert_store::AlertStore;

/// Fetches alert documents and enriches them with linked playbook names.
pub struct AlertContextService {
    store: Arc<dyn AlertStore>,
}

impl AlertContextService {
    pub fn new(store: Arc<dyn AlertStore>) -> Self {
        Self { store }
    }

    /// Fetch the alert with `id` and attach the playbooks its name links to.
    /// `None` if the alert does not exist; an alert with no linked playbooks
    /// comes back with an empty list.
    pub async fn context(
        &self,
        id: &str,
        linker: &PlaybookLinker,
    ) -> Result<Option<AlertContext>, DomainError> {
        let Some(alert) = self.store.fetch_alert(id).await? else {
            return Ok(None);
        };

        let playbooks = linker
            .playbooks_for(&alert.name)
            .into_iter()
            .map(ToString::to_string)
            .collect();

        Ok(Some(AlertContext { alert, playbooks }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::alert::entity::AlertRecord;
    use domain::playbook::entity::PlaybookMapping;
    use ports::test_utils::InMemoryAlertStore;

    fn sample_alert(id: &str, name: &str) -> AlertRecord {
        AlertRecord {
            id: id.to_string(),
            name: name.to_string(),
            severity: None,
            timestamp: None,
            fields: serde_json::Map::new(),
        }
    }

    fn sample_linker() -> PlaybookLinker {
        PlaybookLinker::load(vec![PlaybookMapping {
            name: "pb-bruteforce".to_string(),
            alert_names: vec!["SSH Brute Force".to_string()],
        }])
        .unwrap()
    }

    #[tokio::test]
    async fn context_attaches_linked_playbooks() {
        let store = Arc::new(InMemoryAlertStore::with_alerts(vec![sample_alert(
            "a1",
            "SSH Brute Force",
        )]));
        let service = AlertContextService::new(store);

        let ctx = service.context("a1", &sample_linker()).await.unwrap().unwrap();
        assert_eq!(ctx.alert.name, "SSH Brute Force");
        assert_eq!(ctx.playbooks, vec!["pb-bruteforce"]);
    }

    #[tokio::test]
    async fn context_with_unlinked_alert_has_empty_playbooks() {
        let store = Arc::new(InMemoryAlertStore::with_alerts(vec![sample_alert(
            "a2",
            "Unknown Event",
        )]));
        let service = AlertContextService::new(store);

        let ctx = service.context("a2", &sample_linker()).await.unwrap().unwrap();
        assert!(ctx.playbooks.is_empty());
    }

    #[tokio::test]
    async fn context_for_missing_alert_is_none() {
        let service = AlertContextService::new(Arc::new(InMemoryAlertStore::default()));
        assert!(
            service
                .context("missing", &sample_linker())
                .await
                .unwrap()
                .is_none()
        );
    }
}
