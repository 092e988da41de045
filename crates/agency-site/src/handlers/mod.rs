//! Request Handlers

pub mod contact;
pub mod pages;
pub mod seo;
pub mod work;

use axum::{
    extract::{FromRequestParts, OriginalUri, State},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::{
    locale::{self, Locale, DEFAULT_LOCALE},
    state::AppState,
    templates::{NotFoundTemplate, Page},
};

/// Locale taken from the first path segment.
///
/// Requests whose first segment is not a supported locale get the 404 page,
/// or the JSON 404 under `/api`.
pub struct PageLocale(pub Locale);

impl FromRequestParts<AppState> for PageLocale {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let path = parts.uri.path();
        locale::locale_prefix(path).map(PageLocale).ok_or_else(|| {
            if is_api_path(path) {
                api_not_found()
            } else {
                not_found_page(state, DEFAULT_LOCALE)
            }
        })
    }
}

/// Fallback for unknown routes.
pub async fn not_found(State(state): State<AppState>, OriginalUri(uri): OriginalUri) -> Response {
    if is_api_path(uri.path()) {
        return api_not_found();
    }

    let locale = locale::locale_prefix(uri.path()).unwrap_or(DEFAULT_LOCALE);
    not_found_page(&state, locale)
}

/// Renders the localized 404 page.
pub fn not_found_page(state: &AppState, locale: Locale) -> Response {
    let page = Page::new(state, locale, "meta.title_not_found", "", "");
    (StatusCode::NOT_FOUND, NotFoundTemplate { page }).into_response()
}

fn is_api_path(path: &str) -> bool {
    path.starts_with("/api")
}

fn api_not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" }))).into_response()
}
