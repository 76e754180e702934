use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use domain::common::error::DomainError;
use domain::playbook::entity::PlaybookDocument;
use ports::secondary::playbook_store::PlaybookStore;

use super::es_client::EsClient;

/// Playbook store backed by an Elasticsearch playbook index
/// (default `soc_playbook`). Playbooks are looked up by exact name via a
/// `term` query on `name.keyword`.
pub struct EsPlaybookStore {
    client: Arc<EsClient>,
    index: String,
}

impl EsPlaybookStore {
    pub fn new(client: Arc<EsClient>, index: &str) -> Self {
        Self {
            client,
            index: index.to_string(),
        }
    }
}

impl PlaybookStore for EsPlaybookStore {
    fn fetch_playbook<'a>(
        &'a self,
        name: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Option<PlaybookDocument>, DomainError>> + Send + 'a>>
    {
        Box::pin(async move {
            let hits = self
                .client
                .search_term(&self.index, "name.keyword", name, 1)
                .await?;

            match hits.first() {
                Some(hit) => document_from_hit(hit).map(Some),
                None => Ok(None),
            }
        })
    }
}

fn document_from_hit(hit: &serde_json::Value) -> Result<PlaybookDocument, DomainError> {
    let source = hit
        .get("_source")
        .ok_or_else(|| DomainError::StoreError("playbook hit has no _source".to_string()))?;

    serde_json::from_value(source.clone())
        .map_err(|e| DomainError::StoreError(format!("malformed playbook document: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_from_hit_reads_name_and_body() {
        let hit = serde_json::json!({
            "_id": "pb-1",
            "_source": { "name": "ransomware", "body": "PGgxPmlzb2xhdGU8L2gxPg==" }
        });

        let doc = document_from_hit(&hit).unwrap();
        assert_eq!(doc.name, "ransomware");
        assert_eq!(doc.decode_body().unwrap(), "<h1>isolate</h1>");
    }

    #[test]
    fn document_from_hit_without_source_fails() {
        assert!(document_from_hit(&serde_json::json!({ "_id": "x" })).is_err());
    }

    #[test]
    fn document_from_hit_missing_body_fails() {
        let hit = serde_json::json!({ "_source": { "name": "pb" } });
        assert!(document_from_hit(&hit).is_err());
    }
}
