use std::collections::HashSet;

use super::entity::PlaybookMapping;
use super::error::PlaybookError;

/// Playbook linker: resolves an alert name to the playbooks that cover it.
///
/// The mapping table is validated and frozen at load; lookups walk the
/// mappings in configuration file order so results are deterministic.
#[derive(Debug, Default)]
pub struct PlaybookLinker {
    mappings: Vec<PlaybookMapping>,
}

impl PlaybookLinker {
    /// Validate and load a mapping table, replacing any previous one.
    ///
    /// Fails on structural problems (empty or duplicate playbook names,
    /// empty alert names) — a malformed table is never partially loaded.
    pub fn load(mappings: Vec<PlaybookMapping>) -> Result<Self, PlaybookError> {
        let mut seen = HashSet::new();
        for mapping in &mappings {
            if mapping.name.is_empty() {
                return Err(PlaybookError::EmptyPlaybookName);
            }
            if !seen.insert(mapping.name.as_str()) {
                return Err(PlaybookError::DuplicatePlaybook(mapping.name.clone()));
            }
            if mapping.alert_names.iter().any(String::is_empty) {
                return Err(PlaybookError::EmptyAlertName {
                    playbook: mapping.name.clone(),
                });
            }
        }
        Ok(Self { mappings })
    }

    /// Return the playbooks whose alert sets contain `alert_name`, in file
    /// order, deduplicated. An unknown alert name yields an empty vector —
    /// a lookup miss is not an error.
    ///
    /// Matching is exact and case-sensitive.
    pub fn playbooks_for(&self, alert_name: &str) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.mappings
            .iter()
            .filter(|m| m.alert_names.iter().any(|a| a == alert_name))
            .map(|m| m.name.as_str())
            .filter(|name| seen.insert(*name))
            .collect()
    }

    pub fn mapping_count(&self) -> usize {
        self.mappings.len()
    }
}
