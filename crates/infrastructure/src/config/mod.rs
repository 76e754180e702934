//! Agent configuration: structs, parsing, and validation.
//!
//! The config module is split across several sub-modules:
//! - `common`: shared helpers and `ConfigError`
//! - `playbooks`, `commands`, `elasticsearch`, `dispatch`: section configs

mod commands;
mod common;
mod dispatch;
mod elasticsearch;
mod playbooks;

pub use commands::{CommandEntryConfig, CommandsConfig};
pub use common::ConfigError;
pub use dispatch::DispatchConfig;
pub use elasticsearch::ElasticsearchConfig;
pub use playbooks::{PlaybookMappingConfig, PlaybooksConfig};

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use domain::command::entity::CommandTree;
use domain::playbook::entity::PlaybookMapping;

use common::{MAX_COMMAND_ENTRIES, MAX_PLAYBOOK_MAPPINGS, check_limit, warn_if_world_readable};

// ── Top-level config ───────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    #[serde(default)]
    pub agent: AgentInfo,

    #[serde(default)]
    pub playbooks: PlaybooksConfig,

    #[serde(default)]
    pub commands: CommandsConfig,

    #[serde(default)]
    pub elasticsearch: ElasticsearchConfig,

    #[serde(default)]
    pub dispatch: DispatchConfig,
}

impl AgentConfig {
    /// Load config from a YAML file.
    ///
    /// On Unix, logs a warning if the config file is world-readable
    /// (permissions more permissive than 0o640), since it may contain
    /// Elasticsearch credentials.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        warn_if_world_readable(path, "config file");
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string. Fails fast: an invalid config is
    /// never partially usable.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Return a copy of the config with the Elasticsearch password masked.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        let mut sanitized = self.clone();
        if sanitized.elasticsearch.password.is_some() {
            sanitized.elasticsearch.password = Some("***".to_string());
        }
        sanitized
    }

    /// Validate the config after deserialization.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_limit(
            "playbooks.mappings",
            self.playbooks.mappings.len(),
            MAX_PLAYBOOK_MAPPINGS,
        )?;
        check_limit(
            "commands.entries",
            self.commands.entries.len(),
            MAX_COMMAND_ENTRIES,
        )?;

        // Validate playbook mappings, including cross-entry uniqueness.
        let mut seen = std::collections::HashSet::new();
        for (idx, mapping) in self.playbooks.mappings.iter().enumerate() {
            mapping.validate(idx)?;
            if !seen.insert(mapping.name.as_str()) {
                return Err(ConfigError::Validation {
                    field: format!("playbooks.mappings[{idx}].name"),
                    message: format!("duplicate playbook '{}'", mapping.name),
                });
            }
        }

        // Validate command entries recursively.
        for (idx, entry) in self.commands.entries.iter().enumerate() {
            entry.validate(&format!("commands.entries[{idx}]"), 0)?;
        }

        self.elasticsearch.validate()?;
        self.dispatch.validate()?;
        Ok(())
    }

    /// Convert all playbook mapping configs to domain mappings.
    pub fn playbook_mappings(&self) -> Vec<PlaybookMapping> {
        self.playbooks
            .mappings
            .iter()
            .map(PlaybookMappingConfig::to_domain_mapping)
            .collect()
    }

    /// Build the validated domain command tree from config entries.
    pub fn command_tree(&self) -> Result<CommandTree, ConfigError> {
        let entries = self
            .commands
            .entries
            .iter()
            .map(CommandEntryConfig::to_domain_entry)
            .collect::<Result<Vec<_>, _>>()?;

        CommandTree::load(entries).map_err(|e| ConfigError::Validation {
            field: "commands.entries".to_string(),
            message: e.to_string(),
        })
    }

    /// Bound on one external command invocation.
    pub fn dispatch_timeout(&self) -> Duration {
        Duration::from_secs(self.dispatch.timeout_secs)
    }
}

// ── Agent info ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentInfo {
    #[serde(default = "default_log_level")]
    pub log_level: LogLevel,

    #[serde(default = "default_log_format")]
    pub log_format: LogFormat,
}

impl Default for AgentInfo {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

fn default_log_level() -> LogLevel {
    LogLevel::Info
}
fn default_log_format() -> LogFormat {
    LogFormat::Json
}

// ── Log level ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            _ => Err(format!(
                "invalid log level '{s}': expected error|warn|info|debug|trace"
            )),
        }
    }
}

// ── Log format ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Json,
    Text,
}

impl LogFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Text => "text",
        }
    }
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" | "pretty" => Ok(Self::Text),
            _ => Err(format!("invalid log format '{s}': expected json|text")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::command::entity::{CommandEntry, EntryAction};

    // ── Minimal config loading ────────────────────────────────────

    #[test]
    fn load_empty_config_uses_defaults() {
        let config = AgentConfig::from_yaml("{}").unwrap();
        assert_eq!(config.agent.log_level, LogLevel::Info);
        assert_eq!(config.agent.log_format, LogFormat::Json);
        assert!(config.playbooks.enabled);
        assert!(config.playbooks.mappings.is_empty());
        assert!(config.commands.enabled);
        assert!(!config.elasticsearch.enabled);
        assert_eq!(config.dispatch_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn malformed_yaml_fails() {
        assert!(matches!(
            AgentConfig::from_yaml("playbooks: ["),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn unknown_top_level_key_fails() {
        assert!(AgentConfig::from_yaml("nonsense: true").is_err());
    }

    // ── Playbook mappings ─────────────────────────────────────────

    #[test]
    fn load_playbook_mappings() {
        let yaml = r#"
playbooks:
  mappings:
    - name: pb-bruteforce
      alert_names: ["SSH Brute Force", "RDP Brute Force"]
    - name: pb-phishing
      alert_names: ["Phishing Email"]
"#;
        let config = AgentConfig::from_yaml(yaml).unwrap();
        let mappings = config.playbook_mappings();
        assert_eq!(mappings.len(), 2);
        assert_eq!(mappings[0].name, "pb-bruteforce");
        assert_eq!(mappings[0].alert_names.len(), 2);
    }

    #[test]
    fn duplicate_playbook_names_fail() {
        let yaml = r#"
playbooks:
  mappings:
    - name: pb-a
      alert_names: [x]
    - name: pb-a
      alert_names: [y]
"#;
        let err = AgentConfig::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("duplicate playbook"), "got: {err}");
    }

    #[test]
    fn empty_playbook_name_fails() {
        let yaml = r#"
playbooks:
  mappings:
    - name: ""
      alert_names: [x]
"#;
        assert!(AgentConfig::from_yaml(yaml).is_err());
    }

    // ── Command entries ───────────────────────────────────────────

    #[test]
    fn load_command_tree() {
        let yaml = r#"
commands:
  entries:
    - name: Whois
      command: "whois [[value]]"
    - name: Threat Intel
      children:
        - name: OTX
          link: "https://otx.example.com/ip/[[value]]"
        - name: Local DB
          command: "ti-lookup --ioc=[[value]]"
"#;
        let config = AgentConfig::from_yaml(yaml).unwrap();
        let tree = config.command_tree().unwrap();
        let entry = tree.find(&["Threat Intel", "OTX"]).unwrap();
        assert!(matches!(
            entry,
            CommandEntry::Action {
                action: EntryAction::Link(_),
                ..
            }
        ));
    }

    #[test]
    fn entry_with_command_and_children_fails() {
        let yaml = r#"
commands:
  entries:
    - name: Bad
      command: "whois [[value]]"
      children:
        - name: Child
          command: "x [[value]]"
"#;
        assert!(AgentConfig::from_yaml(yaml).is_err());
    }

    #[test]
    fn entry_with_unknown_field_fails() {
        let yaml = r#"
commands:
  entries:
    - name: Bad
      script: "whois [[value]]"
"#;
        assert!(AgentConfig::from_yaml(yaml).is_err());
    }

    #[test]
    fn double_placeholder_fails_at_tree_build() {
        let yaml = r#"
commands:
  entries:
    - name: Bad
      command: "cmp [[value]] [[value]]"
"#;
        // Structure is valid; the template itself is rejected on conversion.
        let config = AgentConfig::from_yaml(yaml).unwrap();
        let err = config.command_tree().unwrap_err();
        assert!(err.to_string().contains("at most once"), "got: {err}");
    }

    #[test]
    fn duplicate_sibling_entries_fail_at_tree_build() {
        let yaml = r#"
commands:
  entries:
    - name: Whois
      command: "whois [[value]]"
    - name: Whois
      command: "whois -H [[value]]"
"#;
        let config = AgentConfig::from_yaml(yaml).unwrap();
        assert!(config.command_tree().is_err());
    }

    // ── Elasticsearch / dispatch sections ─────────────────────────

    #[test]
    fn full_elasticsearch_config() {
        let yaml = r#"
elasticsearch:
  enabled: true
  url: "https://es.example.com:9200"
  alert_index: alerts-v2
  playbook_index: playbooks-v2
  username: analyst
  password: hunter2
  timeout_secs: 5
"#;
        let config = AgentConfig::from_yaml(yaml).unwrap();
        assert!(config.elasticsearch.enabled);
        assert_eq!(config.elasticsearch.alert_index, "alerts-v2");

        let masked = config.sanitized();
        assert_eq!(masked.elasticsearch.password.as_deref(), Some("***"));
        // Original is untouched.
        assert_eq!(config.elasticsearch.password.as_deref(), Some("hunter2"));
    }

    #[test]
    fn zero_dispatch_timeout_fails() {
        let yaml = r#"
dispatch:
  timeout_secs: 0
"#;
        assert!(AgentConfig::from_yaml(yaml).is_err());
    }

    #[test]
    fn custom_dispatch_timeout() {
        let yaml = r#"
dispatch:
  timeout_secs: 120
"#;
        let config = AgentConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.dispatch_timeout(), Duration::from_secs(120));
    }

    // ── LogLevel / LogFormat ──────────────────────────────────────

    #[test]
    fn log_level_from_str() {
        assert_eq!("info".parse::<LogLevel>().unwrap(), LogLevel::Info);
        assert_eq!("WARNING".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert!("verbose".parse::<LogLevel>().is_err());
    }

    #[test]
    fn log_format_from_str() {
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("pretty".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn log_settings_from_yaml() {
        let yaml = r#"
agent:
  log_level: debug
  log_format: text
"#;
        let config = AgentConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.agent.log_level, LogLevel::Debug);
        assert_eq!(config.agent.log_format, LogFormat::Text);
    }
}
