pub mod cms;
pub mod config;
pub mod contact;
pub mod error;
pub mod i18n;
pub mod markup;
pub mod metadata;
pub mod metrics;
pub mod navigation;
pub mod rate_limit;
pub mod retry;
pub mod routing;
pub mod scheduler;
pub mod security;
pub mod server;
pub mod sitemap;
pub mod switch;
