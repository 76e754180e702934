use std::sync::Arc;

use domain::common::error::DomainError;
use domain::playbook::entity::PlaybookMapping;
use domain::playbook::linker::PlaybookLinker;
use ports::secondary::playbook_store::PlaybookStore;

/// Application-level playbook service.
///
/// Owns the playbook linker and, when a playbook store is configured,
/// resolves playbook bodies from the playbook index.
pub struct PlaybookAppService {
    linker: PlaybookLinker,
    store: Option<Arc<dyn PlaybookStore>>,
}

impl PlaybookAppService {
    /// Build the service from validated mapping configs. Fails fatally on a
    /// malformed table — the process must not proceed with a partial mapping.
    pub fn new(mappings: Vec<PlaybookMapping>) -> Result<Self, DomainError> {
        Ok(Self {
            linker: PlaybookLinker::load(mappings)?,
            store: None,
        })
    }

    /// Set the playbook store (Elasticsearch adapter).
    pub fn set_store(&mut self, store: Arc<dyn PlaybookStore>) {
        self.store = Some(store);
    }

    /// Replace the mapping table. The old table stays in place if the new
    /// one fails validation.
    pub fn reload_mappings(&mut self, mappings: Vec<PlaybookMapping>) -> Result<(), DomainError> {
        self.linker = PlaybookLinker::load(mappings)?;
        tracing::info!(mappings = self.linker.mapping_count(), "playbook mappings reloaded");
        Ok(())
    }

    /// Playbook names linked to an alert name (file order, deduplicated).
    pub fn link(&self, alert_name: &str) -> Vec<String> {
        self.linker
            .playbooks_for(alert_name)
            .into_iter()
            .map(ToString::to_string)
            .collect()
    }

    /// Fetch a playbook body from the store and decode it to HTML.
    /// `None` if no playbook with that name exists in the index.
    pub async fn playbook_body(&self, name: &str) -> Result<Option<String>, DomainError> {
        let store = self
            .store
            .as_ref()
            .ok_or_else(|| DomainError::StoreError("no playbook store configured".to_string()))?;

        match store.fetch_playbook(name).await? {
            Some(doc) => Ok(Some(doc.decode_body()?)),
            None => Ok(None),
        }
    }

    pub fn linker(&self) -> &PlaybookLinker {
        &self.linker
    }

    pub fn mapping_count(&self) -> usize {
        self.linker.mapping_count()
    }
}
