//! Router Configuration
//!
//! Route configuration for the website.

use axum::{
    http::{header, HeaderValue},
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{services::ServeDir, set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::{handlers, locale, state::AppState};

/// Create the main router with all routes.
///
/// Page routes all sit under a `/{locale}` segment. The locale middleware
/// runs on every route and the fallback, so unprefixed paths are redirected
/// before they reach a handler.
pub fn create_router(state: AppState) -> Router {
    // Assets are referenced with a ?v= build version, so they can be cached forever
    let static_service = ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CACHE_CONTROL,
            HeaderValue::from_static("public, max-age=31536000, immutable"),
        ))
        .service(ServeDir::new(&state.config().public_dir));

    let router = Router::new()
        .route("/sitemap.xml", get(handlers::seo::sitemap))
        .route("/robots.txt", get(handlers::seo::robots))
        .route("/api/contact", post(handlers::contact::submit))
        .route("/{locale}", get(handlers::pages::home))
        .route("/{locale}/services", get(handlers::pages::services))
        .route("/{locale}/about", get(handlers::pages::about))
        .route("/{locale}/contact", get(handlers::pages::contact))
        .route("/{locale}/work", get(handlers::work::work_index))
        .route("/{locale}/work/{slug}", get(handlers::work::case_study))
        .nest_service("/public", static_service);

    #[cfg(debug_assertions)]
    let router = router.route("/__livereload", get(crate::dev_tools::livereload_handler));

    router
        .fallback(handlers::not_found)
        .layer(middleware::from_fn(locale::redirect_unprefixed))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
