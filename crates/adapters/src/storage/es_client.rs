use std::time::Duration;

use domain::common::error::DomainError;

/// Thin read-only Elasticsearch HTTP client shared by the document stores.
///
/// Talks plain Elasticsearch REST (GET `_doc`, POST `_search`) over
/// `reqwest`; this system never writes to the cluster.
pub struct EsClient {
    http: reqwest::Client,
    base_url: String,
    username: Option<String>,
    password: Option<String>,
}

// Manual impl so the password never lands in logs or panic messages.
impl std::fmt::Debug for EsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EsClient")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish_non_exhaustive()
    }
}

impl EsClient {
    pub fn new(
        base_url: &str,
        timeout: Duration,
        username: Option<String>,
        password: Option<String>,
    ) -> Result<Self, DomainError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::StoreError(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            username,
            password,
        })
    }

    /// `GET /{index}/_doc/{id}`. Returns the raw document envelope;
    /// a 404 (or `found: false`) becomes `None`.
    pub async fn get_doc(
        &self,
        index: &str,
        id: &str,
    ) -> Result<Option<serde_json::Value>, DomainError> {
        let url = format!(
            "{}/{}/_doc/{}",
            self.base_url,
            index,
            urlencoding::encode(id)
        );
        tracing::debug!(index, id, "fetching document");

        let response = self
            .authed(self.http.get(&url))
            .send()
            .await
            .map_err(|e| DomainError::StoreError(format!("GET {url}: {e}")))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(DomainError::StoreError(format!(
                "GET {url}: unexpected status {}",
                response.status()
            )));
        }

        let doc: serde_json::Value = response
            .json()
            .await
            .map_err(|e| DomainError::StoreError(format!("GET {url}: invalid JSON: {e}")))?;

        if doc.get("found").and_then(serde_json::Value::as_bool) == Some(false) {
            return Ok(None);
        }
        Ok(Some(doc))
    }

    /// `POST /{index}/_search` with a `term` query on `field`.
    /// Returns the raw hit envelopes (possibly empty).
    pub async fn search_term(
        &self,
        index: &str,
        field: &str,
        value: &str,
        size: usize,
    ) -> Result<Vec<serde_json::Value>, DomainError> {
        let url = format!("{}/{}/_search", self.base_url, index);
        tracing::debug!(index, field, value, "term search");
        let body = serde_json::json!({
            "size": size,
            "query": { "term": { field: { "value": value } } }
        });

        let response = self
            .authed(self.http.post(&url))
            .json(&body)
            .send()
            .await
            .map_err(|e| DomainError::StoreError(format!("POST {url}: {e}")))?;

        if !response.status().is_success() {
            return Err(DomainError::StoreError(format!(
                "POST {url}: unexpected status {}",
                response.status()
            )));
        }

        let result: serde_json::Value = response
            .json()
            .await
            .map_err(|e| DomainError::StoreError(format!("POST {url}: invalid JSON: {e}")))?;

        Ok(extract_hits(&result))
    }

    fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.username {
            Some(user) => request.basic_auth(user, self.password.as_deref()),
            None => request,
        }
    }
}

/// Pull the hit envelopes out of a `_search` response body.
fn extract_hits(result: &serde_json::Value) -> Vec<serde_json::Value> {
    result
        .get("hits")
        .and_then(|h| h.get("hits"))
        .and_then(serde_json::Value::as_array)
        .cloned()
        .unwrap_or_default()
}
