//! Portfolio Handlers

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use super::{not_found_page, PageLocale};
use crate::{
    state::AppState,
    templates::{CaseStudyTemplate, Page, StudySummary, WorkListTemplate},
};

/// Handler for the case study index.
pub async fn work_index(State(state): State<AppState>, PageLocale(locale): PageLocale) -> impl IntoResponse {
    let studies = state
        .content()
        .case_studies(locale)
        .into_iter()
        .map(|study| StudySummary::new(study, locale))
        .collect();

    WorkListTemplate {
        page: Page::new(&state, locale, "meta.title_work", "/work", "work"),
        studies,
    }
}

/// Handler for individual case studies.
pub async fn case_study(
    State(state): State<AppState>,
    PageLocale(locale): PageLocale,
    Path((_, slug)): Path<(String, String)>,
) -> Response {
    let found = state
        .content()
        .case_study(locale, &slug)
        .map(|study| (StudySummary::new(study, locale), study.content_html.clone()));

    let Some((study, content_html)) = found else {
        return not_found_page(&state, locale);
    };

    let title = format!("{} | {}", study.title, state.dictionary(locale).t("meta.site_name"));
    let page = Page::new(&state, locale, "meta.title_work", format!("/work/{slug}"), "work").with_title(title);

    CaseStudyTemplate {
        page,
        study,
        content_html,
    }
    .into_response()
}
