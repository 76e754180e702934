//! Lookup/response command tree configuration.

use serde::{Deserialize, Serialize};

use domain::command::entity::{CommandEntry, EntryAction, MAX_MENU_DEPTH};
use domain::command::template::{CommandTemplate, LinkTemplate};

use super::common::{ConfigError, MAX_COMMAND_ENTRIES, check_limit, default_true};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Ordered entry tree shown to the analyst. Each entry is a command, a
    /// link, or a nested menu.
    #[serde(default)]
    pub entries: Vec<CommandEntryConfig>,
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            entries: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandEntryConfig {
    pub name: String,

    /// Local executable template with an optional `[[value]]` placeholder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,

    /// URL template with an optional `[[value]]` placeholder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    /// Nested menu entries.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<CommandEntryConfig>,
}

impl CommandEntryConfig {
    /// Validate one entry and its subtree. `path` is the config path used in
    /// error messages, `depth` the current menu nesting level.
    pub fn validate(&self, path: &str, depth: usize) -> Result<(), ConfigError> {
        if self.name.is_empty() {
            return Err(ConfigError::Validation {
                field: format!("{path}.name"),
                message: "entry name must not be empty".to_string(),
            });
        }

        let set = [
            self.command.is_some(),
            self.link.is_some(),
            !self.children.is_empty(),
        ];
        if set.iter().filter(|&&s| s).count() != 1 {
            return Err(ConfigError::Validation {
                field: path.to_string(),
                message: "exactly one of 'command', 'link', or 'children' is required"
                    .to_string(),
            });
        }

        if depth > MAX_MENU_DEPTH {
            return Err(ConfigError::Validation {
                field: path.to_string(),
                message: format!("menu nesting exceeds maximum depth {MAX_MENU_DEPTH}"),
            });
        }

        check_limit(
            &format!("{path}.children"),
            self.children.len(),
            MAX_COMMAND_ENTRIES,
        )?;
        for (idx, child) in self.children.iter().enumerate() {
            child.validate(&format!("{path}.children[{idx}]"), depth + 1)?;
        }
        Ok(())
    }

    /// Convert to the domain entry, parsing command/link templates.
    /// A template without a placeholder is allowed but logged, since it is
    /// usually a configuration mistake.
    pub fn to_domain_entry(&self) -> Result<CommandEntry, ConfigError> {
        let template_err = |e: domain::command::error::DispatchError| ConfigError::Validation {
            field: format!("commands entry '{}'", self.name),
            message: e.to_string(),
        };

        if let Some(raw) = &self.command {
            let template = CommandTemplate::parse(raw).map_err(template_err)?;
            if !template.has_placeholder() {
                tracing::warn!(
                    entry = %self.name,
                    "command template has no [[value]] placeholder, substitution will be a no-op"
                );
            }
            return Ok(CommandEntry::Action {
                name: self.name.clone(),
                action: EntryAction::Command(template),
            });
        }

        if let Some(raw) = &self.link {
            let template = LinkTemplate::parse(raw).map_err(template_err)?;
            if !template.has_placeholder() {
                tracing::warn!(
                    entry = %self.name,
                    "link template has no [[value]] placeholder, substitution will be a no-op"
                );
            }
            return Ok(CommandEntry::Action {
                name: self.name.clone(),
                action: EntryAction::Link(template),
            });
        }

        let children = self
            .children
            .iter()
            .map(CommandEntryConfig::to_domain_entry)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(CommandEntry::Menu {
            name: self.name.clone(),
            children,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(name: &str, command: Option<&str>, link: Option<&str>) -> CommandEntryConfig {
        CommandEntryConfig {
            name: name.to_string(),
            command: command.map(ToString::to_string),
            link: link.map(ToString::to_string),
            children: Vec::new(),
        }
    }

    #[test]
    fn validate_accepts_command_leaf() {
        let cfg = leaf("Whois", Some("whois [[value]]"), None);
        assert!(cfg.validate("commands.entries[0]", 0).is_ok());
    }

    #[test]
    fn validate_rejects_command_and_link_together() {
        let cfg = leaf("Bad", Some("whois [[value]]"), Some("https://x/[[value]]"));
        let err = cfg.validate("commands.entries[0]", 0).unwrap_err();
        assert!(err.to_string().contains("exactly one"), "got: {err}");
    }

    #[test]
    fn validate_rejects_bare_entry() {
        let cfg = leaf("Empty", None, None);
        assert!(cfg.validate("commands.entries[0]", 0).is_err());
    }

    #[test]
    fn validate_recurses_into_children() {
        let cfg = CommandEntryConfig {
            name: "Menu".to_string(),
            command: None,
            link: None,
            children: vec![leaf("", Some("x [[value]]"), None)],
        };
        let err = cfg.validate("commands.entries[0]", 0).unwrap_err();
        assert!(
            err.to_string().contains("children[0].name"),
            "got: {err}"
        );
    }

    #[test]
    fn to_domain_entry_builds_menu_tree() {
        let cfg = CommandEntryConfig {
            name: "Intel".to_string(),
            command: None,
            link: None,
            children: vec![
                leaf("Whois", Some("whois [[value]]"), None),
                leaf("OTX", None, Some("https://otx.example.com/ip/[[value]]")),
            ],
        };
        let entry = cfg.to_domain_entry().unwrap();
        match entry {
            CommandEntry::Menu { name, children } => {
                assert_eq!(name, "Intel");
                assert_eq!(children.len(), 2);
            }
            CommandEntry::Action { .. } => panic!("expected menu"),
        }
    }

    #[test]
    fn to_domain_entry_rejects_double_placeholder() {
        let cfg = leaf("Bad", Some("cmp [[value]] [[value]]"), None);
        let err = cfg.to_domain_entry().unwrap_err();
        assert!(err.to_string().contains("at most once"), "got: {err}");
    }
}
