use anyhow::{Context, Result};
use portfolio_router::{
    cms::ContentSource,
    config::Config,
    routing::UrlBuilder,
    sitemap::Sitemap,
};
use std::fs;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("export_sitemap=info".parse()?)
                .add_directive("portfolio_router=info".parse()?)
        )
        .init();

    info!("Starting sitemap export");

    let config = Config::from_env()?;
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "public/sitemap.xml".to_string());

    // Fail rather than write a sitemap without CMS entries
    let content = ContentSource::from_config(&config, reqwest::Client::new())
        .load()
        .await
        .context("Failed to load content")?;

    let urls = UrlBuilder::new(&config.site_origin);
    let sitemap = Sitemap::build(&urls, &content);
    let entries = sitemap.entries().len();

    if let Some(parent) = std::path::Path::new(&output_path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }
    fs::write(&output_path, sitemap.into_xml())
        .with_context(|| format!("Failed to write sitemap to {}", output_path))?;

    info!("✓ Exported {} sitemap entries to {}", entries, output_path);

    Ok(())
}
