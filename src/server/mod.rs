//! HTTP server: the locale middleware in front of pages, SEO files and the
//! JSON API.

pub mod error;
pub mod handlers;
pub mod middleware;
mod state;

pub use error::ApiError;
pub use middleware::{locale_middleware, ResolvedLocale};
pub use state::AppState;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use handlers::{api, pages, seo};
use tower_http::trace::TraceLayer;

/// Build the application router.
///
/// The locale middleware wraps the whole inner router so that studio
/// rewrites change the URI before routing happens.
pub fn app(state: AppState) -> Router {
    let routes = Router::new()
        .route("/api/health", get(api::health))
        .route("/api/locale", get(api::switch_locale))
        .route("/api/contact", post(api::contact))
        .route("/api/revalidate", post(api::revalidate))
        .route("/sitemap.xml", get(seo::sitemap))
        .route("/robots.txt", get(seo::robots))
        .route("/studio", get(pages::studio))
        .route("/studio/*rest", get(pages::studio))
        .fallback(pages::page)
        .with_state(state.clone());

    Router::new()
        .fallback_service(routes)
        .layer(from_fn_with_state(state, locale_middleware))
        .layer(TraceLayer::new_for_http())
}
