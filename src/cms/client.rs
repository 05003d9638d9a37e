use crate::cms::document::{parse_dataset, Document};
use crate::error::ContentError;
use crate::retry::{with_retry_if, RetryConfig};
use tracing::info;

/// HTTP client for the CMS dataset export endpoint.
#[derive(Debug, Clone)]
pub struct CmsClient {
    http: reqwest::Client,
    dataset_url: String,
    token: Option<String>,
    retry: RetryConfig,
}

impl CmsClient {
    pub fn new(http: reqwest::Client, dataset_url: &str, token: Option<&str>) -> Self {
        Self {
            http,
            dataset_url: dataset_url.to_string(),
            token: token.map(str::to_string),
            retry: RetryConfig::cms_fetch(),
        }
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Fetch and parse the full dataset.
    ///
    /// Network errors and 5xx responses are retried with backoff; 4xx
    /// responses and malformed payloads fail immediately.
    pub async fn fetch_documents(&self) -> Result<Vec<Document>, ContentError> {
        let body = with_retry_if(
            &self.retry,
            "CMS dataset fetch",
            || self.fetch_once(),
            ContentError::is_retryable,
        )
        .await?;

        let documents = parse_dataset(&body)?;
        info!("Fetched {} documents from CMS", documents.len());
        Ok(documents)
    }

    async fn fetch_once(&self) -> Result<String, ContentError> {
        let mut request = self.http.get(&self.dataset_url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ContentError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.text().await?)
    }
}
