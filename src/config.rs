use anyhow::{bail, Context, Result};
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone)]
pub struct Config {
    // Site
    pub site_origin: String,
    pub site_name: String,
    pub author_name: String,

    // Server
    pub port: u16,

    // Routing
    pub studio_subdomain: String,
    pub locale_cookie: String,

    // Rate limiting (contact form)
    pub rate_limit_max: u32,
    pub rate_limit_window_secs: u64,

    // Content
    pub content_file: Option<String>,
    pub cms_dataset_url: Option<String>,
    pub cms_token: Option<String>,
    pub content_refresh_secs: u64,
    pub revalidate_secret: Option<String>,

    // Contact
    pub contact_webhook_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let site_origin = env_or("SITE_ORIGIN", "http://localhost:3000");
        validate_origin(&site_origin)?;

        Ok(Self {
            site_origin: site_origin.trim_end_matches('/').to_string(),
            site_name: env_or("SITE_NAME", "Portfolio"),
            author_name: env_or("AUTHOR_NAME", "Site Author"),

            port: env_parse("PORT", 3000)?,

            studio_subdomain: env_or("STUDIO_SUBDOMAIN", "studio"),
            locale_cookie: env_or("LOCALE_COOKIE", "locale"),

            rate_limit_max: env_parse("RATE_LIMIT_MAX", 5)?,
            rate_limit_window_secs: env_parse("RATE_LIMIT_WINDOW_SECS", 60)?,

            content_file: env_opt("CONTENT_FILE"),
            cms_dataset_url: env_opt("CMS_DATASET_URL"),
            cms_token: env_opt("CMS_TOKEN"),
            content_refresh_secs: env_parse("CONTENT_REFRESH_SECS", 300)?,
            revalidate_secret: env_opt("REVALIDATE_SECRET"),

            contact_webhook_url: env_opt("CONTACT_WEBHOOK_URL"),
        })
    }

    pub fn rate_limit_window(&self) -> Duration {
        Duration::from_secs(self.rate_limit_window_secs)
    }

    pub fn content_refresh_interval(&self) -> Duration {
        Duration::from_secs(self.content_refresh_secs)
    }
}

impl Default for Config {
    /// Local development settings; no CMS, no secrets.
    fn default() -> Self {
        Self {
            site_origin: "http://localhost:3000".to_string(),
            site_name: "Portfolio".to_string(),
            author_name: "Site Author".to_string(),
            port: 3000,
            studio_subdomain: "studio".to_string(),
            locale_cookie: "locale".to_string(),
            rate_limit_max: 5,
            rate_limit_window_secs: 60,
            content_file: None,
            cms_dataset_url: None,
            cms_token: None,
            content_refresh_secs: 300,
            revalidate_secret: None,
            contact_webhook_url: None,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env_opt(key).unwrap_or_else(|| default.to_string())
}

/// Unset and blank variables both count as missing.
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_parse<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env_opt(key) {
        Some(value) => value
            .parse()
            .with_context(|| format!("{} has an invalid value: '{}'", key, value)),
        None => Ok(default),
    }
}

fn validate_origin(origin: &str) -> Result<()> {
    let url = Url::parse(origin).with_context(|| format!("SITE_ORIGIN is not a URL: '{}'", origin))?;

    if !matches!(url.scheme(), "http" | "https") {
        bail!("SITE_ORIGIN must use http or https, got '{}'", url.scheme());
    }
    if url.host_str().is_none() {
        bail!("SITE_ORIGIN has no host: '{}'", origin);
    }
    if url.path() != "/" || url.query().is_some() {
        bail!("SITE_ORIGIN must not contain a path or query: '{}'", origin);
    }
    Ok(())
}
