use crate::cms::{ContentSet, ContentSource, ContentStore};
use crate::config::Config;
use crate::error::ContentError;
use crate::metrics::RoutingMetrics;
use crate::rate_limit::{RateLimitConfig, RateLimiter};
use crate::routing::{RequestRouter, UrlBuilder};
use std::sync::Arc;
use tracing::{info, warn};

/// Everything a request handler or background job needs, created once at
/// startup and cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub urls: Arc<UrlBuilder>,
    pub router: Arc<RequestRouter>,
    pub limiter: Arc<RateLimiter>,
    pub content: Arc<ContentStore>,
    pub source: Arc<ContentSource>,
    pub metrics: Arc<RoutingMetrics>,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: Config, http: reqwest::Client) -> Self {
        let source = ContentSource::from_config(&config, http.clone());
        Self::with_source(config, http, source)
    }

    pub fn with_source(config: Config, http: reqwest::Client, source: ContentSource) -> Self {
        let urls = UrlBuilder::new(&config.site_origin);
        let router = RequestRouter::new(&config.studio_subdomain, urls.clone());
        let limiter = RateLimiter::new(RateLimitConfig::new(
            config.rate_limit_max,
            config.rate_limit_window(),
        ));

        Self {
            config: Arc::new(config),
            urls: Arc::new(urls),
            router: Arc::new(router),
            limiter: Arc::new(limiter),
            content: Arc::new(ContentStore::default()),
            source: Arc::new(source),
            metrics: Arc::new(RoutingMetrics::new()),
            http,
        }
    }

    /// Start from an already loaded content set.
    pub fn with_content(self, content: ContentSet) -> Self {
        self.content.replace(content);
        self
    }

    /// Load content from the configured source and swap it in.
    ///
    /// On failure the previous snapshot stays in place and the failure is
    /// counted.
    pub async fn reload_content(&self) -> Result<usize, ContentError> {
        match self.source.load().await {
            Ok(content) => {
                let count = content.len();
                self.content.replace(content);
                info!("Content reloaded: {} documents", count);
                Ok(count)
            }
            Err(e) => {
                self.metrics.record_content_failure();
                warn!("Content reload failed, keeping previous snapshot: {}", e);
                Err(e)
            }
        }
    }
}
