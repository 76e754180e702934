//! Elasticsearch connection configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_ALERT_INDEX, DEFAULT_ES_TIMEOUT_SECS, DEFAULT_ES_URL, DEFAULT_PLAYBOOK_INDEX,
};

use super::common::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElasticsearchConfig {
    /// Disabled by default: the linker and dispatcher work without a
    /// cluster; only playbook-body and alert fetches need one.
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_url")]
    pub url: String,

    #[serde(default = "default_alert_index")]
    pub alert_index: String,

    #[serde(default = "default_playbook_index")]
    pub playbook_index: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ElasticsearchConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            url: default_url(),
            alert_index: default_alert_index(),
            playbook_index: default_playbook_index(),
            username: None,
            password: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ElasticsearchConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.enabled {
            return Ok(());
        }

        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                field: "elasticsearch.url".to_string(),
                value: self.url.clone(),
                expected: "http:// or https:// URL".to_string(),
            });
        }
        if self.alert_index.is_empty() {
            return Err(ConfigError::Validation {
                field: "elasticsearch.alert_index".to_string(),
                message: "index name must not be empty".to_string(),
            });
        }
        if self.playbook_index.is_empty() {
            return Err(ConfigError::Validation {
                field: "elasticsearch.playbook_index".to_string(),
                message: "index name must not be empty".to_string(),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Validation {
                field: "elasticsearch.timeout_secs".to_string(),
                message: "timeout must be greater than zero".to_string(),
            });
        }
        if self.password.is_some() && self.username.is_none() {
            return Err(ConfigError::Validation {
                field: "elasticsearch.password".to_string(),
                message: "password set without username".to_string(),
            });
        }
        Ok(())
    }
}

fn default_url() -> String {
    DEFAULT_ES_URL.to_string()
}
fn default_alert_index() -> String {
    DEFAULT_ALERT_INDEX.to_string()
}
fn default_playbook_index() -> String {
    DEFAULT_PLAYBOOK_INDEX.to_string()
}
fn default_timeout_secs() -> u64 {
    DEFAULT_ES_TIMEOUT_SECS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_config_skips_validation() {
        let cfg = ElasticsearchConfig {
            url: "not-a-url".to_string(),
            ..Default::default()
        };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn enabled_config_requires_http_url() {
        let cfg = ElasticsearchConfig {
            enabled: true,
            url: "ldap://es.example.com".to_string(),
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn enabled_defaults_validate() {
        let cfg = ElasticsearchConfig {
            enabled: true,
            ..Default::default()
        };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn password_without_username_rejected() {
        let cfg = ElasticsearchConfig {
            enabled: true,
            password: Some("secret".to_string()),
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }
}
