//! Static Page Handlers

use axum::{extract::State, response::IntoResponse};

use super::PageLocale;
use crate::{
    state::AppState,
    templates::{AboutTemplate, ContactTemplate, HomeTemplate, Page, ServicesTemplate, StudySummary},
};

/// Case studies featured on the home page.
const FEATURED_STUDIES: usize = 3;

/// Handler for the landing page.
pub async fn home(State(state): State<AppState>, PageLocale(locale): PageLocale) -> impl IntoResponse {
    let studies = state
        .content()
        .case_studies(locale)
        .into_iter()
        .take(FEATURED_STUDIES)
        .map(|study| StudySummary::new(study, locale))
        .collect();

    HomeTemplate {
        page: Page::new(&state, locale, "meta.title_home", "", "home"),
        studies,
    }
}

/// Handler for the services page.
pub async fn services(State(state): State<AppState>, PageLocale(locale): PageLocale) -> impl IntoResponse {
    ServicesTemplate {
        page: Page::new(&state, locale, "meta.title_services", "/services", "services"),
    }
}

/// Handler for the about page.
pub async fn about(State(state): State<AppState>, PageLocale(locale): PageLocale) -> impl IntoResponse {
    AboutTemplate {
        page: Page::new(&state, locale, "meta.title_about", "/about", "about"),
    }
}

/// Handler for the contact page. The form posts to the contact API.
pub async fn contact(State(state): State<AppState>, PageLocale(locale): PageLocale) -> impl IntoResponse {
    ContactTemplate {
        page: Page::new(&state, locale, "meta.title_contact", "/contact", "contact"),
    }
}
