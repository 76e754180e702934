use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("entry not found: {0}")]
    EntryNotFound(String),

    #[error("entry '{0}' is a menu, not an action")]
    NotAnAction(String),

    #[error("entry name must not be empty")]
    EmptyEntryName,

    #[error("duplicate entry '{name}' under '{parent}'")]
    DuplicateEntry { name: String, parent: String },

    #[error("menu nesting exceeds maximum depth {max} at '{path}'")]
    TooDeep { path: String, max: usize },

    #[error("invalid template '{raw}': {reason}")]
    InvalidTemplate { raw: String, reason: String },

    #[error("failed to spawn '{program}': {reason}")]
    SpawnFailed { program: String, reason: String },

    #[error("command '{name}' timed out after {timeout_secs}s")]
    Timeout { name: String, timeout_secs: u64 },
}
