//! Agency Website Library
//!
//! Core library for the agency's localized marketing website: English and
//! French pages under `/en` and `/fr`, a portfolio of case studies, a contact
//! form delivered by email, and sitemap/robots generation.

pub mod config;
pub mod contact;
pub mod content;
#[cfg(debug_assertions)]
pub mod dev_tools;
pub mod error;
pub mod handlers;
pub mod i18n;
pub mod locale;
pub mod mailer;
pub mod router;
pub mod seo;
pub mod state;
pub mod templates;

use tokio::net::TcpListener;
use tracing::{error, info};

pub use config::{MailConfig, SiteConfig};
pub use error::{ContactError, SiteError, SiteResult};
pub use locale::Locale;
pub use router::create_router;
pub use state::AppState;

/// Run the website server until Ctrl-C.
pub async fn run(config: SiteConfig) -> SiteResult<()> {
    let state = AppState::from_config(config)?;

    #[cfg(debug_assertions)]
    if state.config().live_reload {
        dev_tools::spawn_file_watcher(state.clone());
    }

    let addr = state.config().bind_addr;
    let app = create_router(state);
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| SiteError::BindFailed { addr, source })?;

    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to install CTRL+C signal handler: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down gracefully...");
}
