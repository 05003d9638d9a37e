use crate::server::AppState;
use crate::sitemap::{robots_txt, Sitemap};
use axum::{
    extract::State,
    http::header::CONTENT_TYPE,
    response::IntoResponse,
};

pub async fn sitemap(State(state): State<AppState>) -> impl IntoResponse {
    let content = state.content.snapshot();
    let xml = Sitemap::build(&state.urls, &content).into_xml();
    ([(CONTENT_TYPE, "application/xml; charset=utf-8")], xml)
}

pub async fn robots(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(CONTENT_TYPE, "text/plain; charset=utf-8")],
        robots_txt(&state.urls),
    )
}
