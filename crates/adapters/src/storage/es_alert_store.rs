use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use domain::alert::entity::AlertRecord;
use domain::common::error::DomainError;
use ports::secondary::alert_store::AlertStore;

use super::es_client::EsClient;

/// Alert store backed by an Elasticsearch alert index
/// (default `soc_workflow_case`).
pub struct EsAlertStore {
    client: Arc<EsClient>,
    index: String,
}

impl EsAlertStore {
    pub fn new(client: Arc<EsClient>, index: &str) -> Self {
        Self {
            client,
            index: index.to_string(),
        }
    }
}

impl AlertStore for EsAlertStore {
    fn fetch_alert<'a>(
        &'a self,
        id: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Option<AlertRecord>, DomainError>> + Send + 'a>> {
        Box::pin(async move {
            match self.client.get_doc(&self.index, id).await? {
                Some(doc) => record_from_doc(&doc).map(Some),
                None => Ok(None),
            }
        })
    }
}

/// Deserialize an alert from a `_doc` envelope, carrying the `_id` over
/// into the record.
fn record_from_doc(doc: &serde_json::Value) -> Result<AlertRecord, DomainError> {
    let source = doc
        .get("_source")
        .ok_or_else(|| DomainError::StoreError("alert document has no _source".to_string()))?;

    let mut record: AlertRecord = serde_json::from_value(source.clone())
        .map_err(|e| DomainError::StoreError(format!("malformed alert document: {e}")))?;

    if record.id.is_empty()
        && let Some(id) = doc.get("_id").and_then(serde_json::Value::as_str)
    {
        record.id = id.to_string();
    }
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::common::entity::Severity;

    #[test]
    fn record_from_doc_maps_source_and_id() {
        let doc = serde_json::json!({
            "_index": "soc_workflow_case",
            "_id": "alert-17",
            "found": true,
            "_source": {
                "name": "SSH Brute Force",
                "severity": "high",
                "src_ip": "203.0.113.7"
            }
        });

        let record = record_from_doc(&doc).unwrap();
        assert_eq!(record.id, "alert-17");
        assert_eq!(record.name, "SSH Brute Force");
        assert_eq!(record.severity, Some(Severity::High));
        assert_eq!(record.field_value("src_ip").unwrap(), "203.0.113.7");
    }

    #[test]
    fn record_from_doc_without_source_fails() {
        let doc = serde_json::json!({ "_id": "x", "found": true });
        assert!(record_from_doc(&doc).is_err());
    }

    #[test]
    fn record_from_doc_without_name_fails() {
        let doc = serde_json::json!({
            "_id": "x",
            "_source": { "severity": "low" }
        });
        assert!(record_from_doc(&doc).is_err());
    }
}
