use serde::{Deserialize, Serialize};

use crate::common::entity::Severity;

/// An alert document as read from the alert index.
///
/// Only the alert name is interpreted by this system; everything else the
/// document carries lands in `fields` and can be fed to lookup/response
/// commands as substitution values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertRecord {
    #[serde(default)]
    pub id: String,
    #[serde(alias = "alert_name")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, flatten)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

impl AlertRecord {
    /// Extract a document field as a string, for command substitution.
    /// Strings come back verbatim; numbers and booleans are stringified;
    /// arrays/objects/null are not usable as values.
    pub fn field_value(&self, field: &str) -> Option<String> {
        match self.fields.get(field)? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            serde_json::Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

/// An alert together with the playbooks linked to its name.
#[derive(Debug, Clone, Serialize)]
pub struct AlertContext {
    pub alert: AlertRecord,
    pub playbooks: Vec<String>,
}
