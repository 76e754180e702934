//! Shared helpers and error types used across all config modules.

use std::path::Path;

use tracing::warn;

// ── Security limits ────────────────────────────────────────────────
//
// Maximum counts per section to prevent OOM from excessive config.

/// Maximum playbook mappings.
pub(super) const MAX_PLAYBOOK_MAPPINGS: usize = 1_000;
/// Maximum alert names across one playbook mapping.
pub(super) const MAX_ALERTS_PER_PLAYBOOK: usize = 10_000;
/// Maximum command entries at any one menu level.
pub(super) const MAX_COMMAND_ENTRIES: usize = 500;

// ── Config errors ──────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error reading config: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(String),

    #[error("validation error: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("invalid value '{value}' for field '{field}': expected one of {expected}")]
    InvalidValue {
        field: String,
        value: String,
        expected: String,
    },
}

impl From<serde_yaml_ng::Error> for ConfigError {
    fn from(e: serde_yaml_ng::Error) -> Self {
        Self::Yaml(e.to_string())
    }
}

// ── Shared serde defaults ──────────────────────────────────────────

pub(super) fn default_true() -> bool {
    true
}

// ── Helpers ────────────────────────────────────────────────────────

/// Log a warning if a file is world-readable (Unix only).
///
/// Config files can carry Elasticsearch credentials, so they should be
/// readable only by the owner and group (mode 0640 or stricter).
#[cfg(unix)]
pub(super) fn warn_if_world_readable(path: &Path, label: &str) {
    use std::os::unix::fs::PermissionsExt;
    if let Ok(metadata) = std::fs::metadata(path) {
        let mode = metadata.permissions().mode();
        if mode & 0o004 != 0 {
            warn!(
                path = %path.display(),
                mode = format!("{mode:04o}"),
                "{label} is world-readable, consider chmod 640 or stricter",
            );
        }
    }
}

#[cfg(not(unix))]
pub(super) fn warn_if_world_readable(_path: &Path, _label: &str) {
    // File permission checks not available on non-Unix platforms.
}

/// Enforce a maximum count on a config collection.
pub(super) fn check_limit(field: &str, count: usize, max: usize) -> Result<(), ConfigError> {
    if count > max {
        return Err(ConfigError::Validation {
            field: field.to_string(),
            message: format!("count {count} exceeds maximum {max}"),
        });
    }
    Ok(())
}
