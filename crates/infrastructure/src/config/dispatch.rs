//! External command dispatch configuration.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_COMMAND_TIMEOUT_SECS;

use super::common::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Bound on one external command invocation.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl DispatchConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::Validation {
                field: "dispatch.timeout_secs".to_string(),
                message: "timeout must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

fn default_timeout_secs() -> u64 {
    DEFAULT_COMMAND_TIMEOUT_SECS
}
