use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use super::error::PlaybookError;

/// One playbook and the alert names it remediates.
///
/// Mappings are loaded once from configuration and are read-only afterwards;
/// a config reload replaces the whole set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybookMapping {
    pub name: String,
    pub alert_names: Vec<String>,
}

/// A playbook document as stored in the playbook index: the remediation
/// procedure is a base64-encoded HTML body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybookDocument {
    pub name: String,
    #[serde(alias = "body")]
    pub body_base64: String,
}

impl PlaybookDocument {
    /// Decode the base64 body into the stored HTML.
    pub fn decode_body(&self) -> Result<String, PlaybookError> {
        let bytes = STANDARD
            .decode(self.body_base64.trim())
            .map_err(|e| PlaybookError::BodyDecode(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| PlaybookError::BodyDecode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_body_roundtrip() {
        let html = "<h1>Contain the host</h1>";
        let doc = PlaybookDocument {
            name: "ransomware".to_string(),
            body_base64: STANDARD.encode(html),
        };
        assert_eq!(doc.decode_body().unwrap(), html);
    }

    #[test]
    fn decode_body_tolerates_surrounding_whitespace() {
        let doc = PlaybookDocument {
            name: "pb".to_string(),
            body_base64: format!("  {}\n", STANDARD.encode("x")),
        };
        assert_eq!(doc.decode_body().unwrap(), "x");
    }

    #[test]
    fn decode_body_invalid_base64_fails() {
        let doc = PlaybookDocument {
            name: "pb".to_string(),
            body_base64: "not@base64!".to_string(),
        };
        assert!(matches!(
            doc.decode_body(),
            Err(PlaybookError::BodyDecode(_))
        ));
    }

    #[test]
    fn decode_body_non_utf8_fails() {
        let doc = PlaybookDocument {
            name: "pb".to_string(),
            body_base64: STANDARD.encode([0xff, 0xfe, 0xfd]),
        };
        assert!(doc.decode_body().is_err());
    }

    #[test]
    fn playbook_document_deserializes_body_alias() {
        let json = r#"{"name": "phishing", "body": "PGI+aGk8L2I+"}"#;
        let doc: PlaybookDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.name, "phishing");
        assert_eq!(doc.decode_body().unwrap(), "<b>hi</b>");
    }
}
