//! Playbook mapping configuration.

use serde::{Deserialize, Serialize};

use domain::playbook::entity::PlaybookMapping;

use super::common::{ConfigError, default_true};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybooksConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Playbook name → the alert names it remediates, in display order.
    #[serde(default)]
    pub mappings: Vec<PlaybookMappingConfig>,
}

impl Default for PlaybooksConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            mappings: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlaybookMappingConfig {
    pub name: String,

    #[serde(default)]
    pub alert_names: Vec<String>,
}

impl PlaybookMappingConfig {
    pub fn validate(&self, idx: usize) -> Result<(), ConfigError> {
        let prefix = format!("playbooks.mappings[{idx}]");

        if self.name.is_empty() {
            return Err(ConfigError::Validation {
                field: format!("{prefix}.name"),
                message: "playbook name must not be empty".to_string(),
            });
        }
        if let Some(pos) = self.alert_names.iter().position(String::is_empty) {
            return Err(ConfigError::Validation {
                field: format!("{prefix}.alert_names[{pos}]"),
                message: "alert name must not be empty".to_string(),
            });
        }
        super::common::check_limit(
            &format!("{prefix}.alert_names"),
            self.alert_names.len(),
            super::common::MAX_ALERTS_PER_PLAYBOOK,
        )?;
        Ok(())
    }

    pub fn to_domain_mapping(&self) -> PlaybookMapping {
        PlaybookMapping {
            name: self.name.clone(),
            alert_names: self.alert_names.clone(),
        }
    }
}
