use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlaybookError {
    #[error("playbook name must not be empty")]
    EmptyPlaybookName,

    #[error("duplicate playbook: {0}")]
    DuplicatePlaybook(String),

    #[error("playbook '{playbook}' has an empty alert name")]
    EmptyAlertName { playbook: String },

    #[error("failed to decode playbook body: {0}")]
    BodyDecode(String),
}
