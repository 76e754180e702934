use serde::{Deserialize, Serialize};

use super::error::DispatchError;
use super::template::{CommandTemplate, LinkTemplate};

/// Maximum menu nesting depth. Entry trees are acyclic by construction
/// (owned values), but the depth is still bounded at load.
pub const MAX_MENU_DEPTH: usize = 8;

/// What a leaf entry does when dispatched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EntryAction {
    /// Spawn a local executable with the substituted argument list.
    Command(CommandTemplate),
    /// Produce a substituted URL for the caller to open.
    Link(LinkTemplate),
}

impl EntryAction {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Command(_) => "command",
            Self::Link(_) => "link",
        }
    }
}

/// One node of the lookup/response command tree: either an action leaf or a
/// nested menu of further entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CommandEntry {
    Action { name: String, action: EntryAction },
    Menu { name: String, children: Vec<CommandEntry> },
}

impl CommandEntry {
    pub fn name(&self) -> &str {
        match self {
            Self::Action { name, .. } | Self::Menu { name, .. } => name,
        }
    }
}

/// Result of dispatching a leaf entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DispatchResult {
    /// The command ran; stdout, stderr and exit status are all surfaced.
    Command(CommandOutcome),
    /// The entry is a link; the caller opens the substituted URL.
    Link(String),
}

/// Captured output of one external command invocation. A non-zero exit is
/// reported through this type, not as an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandOutcome {
    /// Process exit code; `None` if the process was killed by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// The validated, read-only command tree loaded from configuration.
#[derive(Debug, Default)]
pub struct CommandTree {
    entries: Vec<CommandEntry>,
}

impl CommandTree {
    /// Validate and freeze an entry tree.
    ///
    /// Rejects empty names, duplicate sibling names (paths must be
    /// unambiguous), and nesting deeper than `MAX_MENU_DEPTH`.
    pub fn load(entries: Vec<CommandEntry>) -> Result<Self, DispatchError> {
        Self::validate_level(&entries, "", 0)?;
        Ok(Self { entries })
    }

    fn validate_level(
        entries: &[CommandEntry],
        parent: &str,
        depth: usize,
    ) -> Result<(), DispatchError> {
        if depth > MAX_MENU_DEPTH {
            return Err(DispatchError::TooDeep {
                path: parent.to_string(),
                max: MAX_MENU_DEPTH,
            });
        }

        let mut seen = std::collections::HashSet::new();
        for entry in entries {
            if entry.name().is_empty() {
                return Err(DispatchError::EmptyEntryName);
            }
            if !seen.insert(entry.name()) {
                return Err(DispatchError::DuplicateEntry {
                    name: entry.name().to_string(),
                    parent: if parent.is_empty() {
                        "(root)".to_string()
                    } else {
                        parent.to_string()
                    },
                });
            }
            if let CommandEntry::Menu { name, children } = entry {
                let path = join_path(parent, name);
                Self::validate_level(children, &path, depth + 1)?;
            }
        }
        Ok(())
    }

    /// Find an entry by its path segments (menu names down to the entry).
    pub fn find(&self, path: &[&str]) -> Option<&CommandEntry> {
        let (first, rest) = path.split_first()?;
        let mut entry = self.entries.iter().find(|e| e.name() == *first)?;
        for segment in rest {
            match entry {
                CommandEntry::Menu { children, .. } => {
                    entry = children.iter().find(|e| e.name() == *segment)?;
                }
                CommandEntry::Action { .. } => return None,
            }
        }
        Some(entry)
    }

    /// Flatten the tree into `(path, action)` pairs in tree order, menus
    /// first-to-last. Paths join segments with `/`.
    pub fn actions(&self) -> Vec<(String, &EntryAction)> {
        let mut out = Vec::new();
        Self::collect_actions(&self.entries, "", &mut out);
        out
    }

    fn collect_actions<'a>(
        entries: &'a [CommandEntry],
        parent: &str,
        out: &mut Vec<(String, &'a EntryAction)>,
    ) {
        for entry in entries {
            let path = join_path(parent, entry.name());
            match entry {
                CommandEntry::Action { action, .. } => out.push((path, action)),
                CommandEntry::Menu { children, .. } => {
                    Self::collect_actions(children, &path, out);
                }
            }
        }
    }

    pub fn entries(&self) -> &[CommandEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}/{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::template::{CommandTemplate, LinkTemplate};

    fn action(name: &str, tpl: &str) -> CommandEntry {
        CommandEntry::Action {
            name: name.to_string(),
            action: EntryAction::Command(CommandTemplate::parse(tpl).unwrap()),
        }
    }

    fn link(name: &str, url: &str) -> CommandEntry {
        CommandEntry::Action {
            name: name.to_string(),
            action: EntryAction::Link(LinkTemplate::parse(url).unwrap()),
        }
    }

    fn menu(name: &str, children: Vec<CommandEntry>) -> CommandEntry {
        CommandEntry::Menu {
            name: name.to_string(),
            children,
        }
    }

    fn sample_tree() -> CommandTree {
        CommandTree::load(vec![
            action("Whois", "whois [[value]]"),
            menu(
                "Threat Intel",
                vec![
                    link("OTX", "https://otx.example.com/ip/[[value]]"),
                    action("Local DB", "ti-lookup --ioc=[[value]]"),
                ],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn find_top_level_entry() {
        let tree = sample_tree();
        let entry = tree.find(&["Whois"]).unwrap();
        assert_eq!(entry.name(), "Whois");
    }

    #[test]
    fn find_nested_entry() {
        let tree = sample_tree();
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
    fn find_missing_entry_is_none() {
        let tree = sample_tree();
        assert!(tree.find(&["Nope"]).is_none());
        assert!(tree.find(&["Threat Intel", "Nope"]).is_none());
        // Descending through a leaf is a miss, not a panic.
        assert!(tree.find(&["Whois", "Deeper"]).is_none());
        assert!(tree.find(&[]).is_none());
    }

    #[test]
    fn actions_flattens_in_tree_order() {
        let tree = sample_tree();
        let paths: Vec<String> = tree.actions().into_iter().map(|(p, _)| p).collect();
        assert_eq!(
            paths,
            vec!["Whois", "Threat Intel/OTX", "Threat Intel/Local DB"]
        );
    }

    #[test]
    fn duplicate_sibling_names_rejected() {
        let result = CommandTree::load(vec![
            action("Whois", "whois [[value]]"),
            action("Whois", "whois -H [[value]]"),
        ]);
        assert!(matches!(
            result,
            Err(DispatchError::DuplicateEntry { name, .. }) if name == "Whois"
        ));
    }

    #[test]
    fn same_name_under_different_menus_allowed() {
        let tree = CommandTree::load(vec![
            menu("A", vec![action("Lookup", "a-lookup [[value]]")]),
            menu("B", vec![action("Lookup", "b-lookup [[value]]")]),
        ])
        .unwrap();
        assert_eq!(tree.actions().len(), 2);
    }

    #[test]
    fn empty_entry_name_rejected() {
        let result = CommandTree::load(vec![action("", "echo [[value]]")]);
        assert!(matches!(result, Err(DispatchError::EmptyEntryName)));
    }

    #[test]
    fn excessive_nesting_rejected() {
        let mut entry = action("leaf", "echo [[value]]");
        for i in 0..=MAX_MENU_DEPTH {
            entry = menu(&format!("m{i}"), vec![entry]);
        }
        let result = CommandTree::load(vec![entry]);
        assert!(matches!(result, Err(DispatchError::TooDeep { .. })));
    }

    #[test]
    fn empty_tree_is_valid() {
        let tree = CommandTree::load(Vec::new()).unwrap();
        assert!(tree.is_empty());
        assert!(tree.actions().is_empty());
    }

    #[test]
    fn outcome_success_requires_zero_exit() {
        let ok = CommandOutcome {
            exit_code: Some(0),
            stdout: String::new(),
            stderr: String::new(),
        };
        let failed = CommandOutcome {
            exit_code: Some(2),
            stdout: String::new(),
            stderr: "boom".to_string(),
        };
        let killed = CommandOutcome {
            exit_code: None,
            stdout: String::new(),
            stderr: String::new(),
        };
        assert!(ok.success());
        assert!(!failed.success());
        assert!(!killed.success());
    }
}
