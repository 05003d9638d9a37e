//! Headless-CMS content: canonical documents, the shared snapshot store, and
//! the sources it is loaded from.

mod client;
mod document;
mod store;

pub use client::CmsClient;
pub use document::{parse_dataset, Document, DocumentKind, Slug};
pub use store::{ContentSet, ContentStore};

use crate::config::Config;
use crate::error::ContentError;
use std::path::PathBuf;
use tracing::info;

/// Where content comes from, chosen once from configuration.
#[derive(Debug, Clone)]
pub enum ContentSource {
    /// A dataset export on disk
    File(PathBuf),
    /// The CMS HTTP endpoint
    Remote(CmsClient),
    /// No content configured; pages render without CMS entries
    Empty,
}

impl ContentSource {
    /// A content file takes precedence over a remote dataset.
    pub fn from_config(config: &Config, http: reqwest::Client) -> Self {
        if let Some(path) = &config.content_file {
            ContentSource::File(PathBuf::from(path))
        } else if let Some(url) = &config.cms_dataset_url {
            ContentSource::Remote(CmsClient::new(http, url, config.cms_token.as_deref()))
        } else {
            ContentSource::Empty
        }
    }

    pub async fn load(&self) -> Result<ContentSet, ContentError> {
        let documents = match self {
            ContentSource::File(path) => {
                let json = tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| ContentError::Read {
                        path: path.display().to_string(),
                        source,
                    })?;
                let documents = parse_dataset(&json)?;
                info!("Loaded {} documents from {}", documents.len(), path.display());
                documents
            }
            ContentSource::Remote(client) => client.fetch_documents().await?,
            ContentSource::Empty => Vec::new(),
        };

        Ok(ContentSet::new(documents))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_from_config_prefers_file() {
        let config = Config {
            content_file: Some("content.json".into()),
            cms_dataset_url: Some("https://cms.example/data".into()),
            ..Config::default()
        };
        let source = ContentSource::from_config(&config, reqwest::Client::new());
        assert!(matches!(source, ContentSource::File(_)));
    }

    #[test]
    fn test_from_config_remote_and_empty() {
        let remote = Config {
            cms_dataset_url: Some("https://cms.example/data".into()),
            ..Config::default()
        };
        assert!(matches!(
            ContentSource::from_config(&remote, reqwest::Client::new()),
            ContentSource::Remote(_)
        ));
        assert!(matches!(
            ContentSource::from_config(&Config::default(), reqwest::Client::new()),
            ContentSource::Empty
        ));
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("content.json");
        std::fs::write(
            &path,
            r#"[{"_id": "a", "_type": "project", "title": "Site", "slug": "site"}]"#,
        )
        .unwrap();

        let content = ContentSource::File(path).load().await.unwrap();
        assert_eq!(content.len(), 1);
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = ContentSource::File(dir.path().join("missing.json"))
            .load()
            .await
            .unwrap_err();
        assert!(matches!(err, ContentError::Read { .. }));
    }

    #[tokio::test]
    async fn test_load_empty() {
        assert!(ContentSource::Empty.load().await.unwrap().is_empty());
    }
}
