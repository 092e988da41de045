//! Sitemap and robots.txt Handlers

use axum::{extract::State, http::header, response::IntoResponse};

use crate::{seo, state::AppState};

/// Handler for `/sitemap.xml`.
pub async fn sitemap(State(state): State<AppState>) -> impl IntoResponse {
    let sitemap = seo::sitemap(&state.config().base_url, &state.content());
    ([(header::CONTENT_TYPE, "application/xml; charset=utf-8")], sitemap)
}

/// Handler for `/robots.txt`.
pub async fn robots(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        seo::robots(&state.config().base_url),
    )
}
