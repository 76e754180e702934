use thiserror::Error;

use crate::command::error::DispatchError;
use crate::playbook::error::PlaybookError;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("store error: {0}")]
    StoreError(String),

    #[error("dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    #[error("playbook error: {0}")]
    Playbook(#[from] PlaybookError),
}
