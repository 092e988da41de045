//! Application State
//!
//! Arc-wrapped state shared across handlers.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

#[cfg(debug_assertions)]
use tokio::sync::broadcast;

use crate::{
    config::SiteConfig,
    content::ContentStore,
    error::SiteResult,
    i18n::{Dictionaries, Dictionary},
    locale::Locale,
    mailer::{self, Mailer},
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    config: SiteConfig,
    dictionaries: Dictionaries,
    content: RwLock<ContentStore>,
    mailer: Arc<dyn Mailer>,
    #[cfg(debug_assertions)]
    reloader: Option<broadcast::Sender<()>>,
}

impl AppState {
    /// Create state with an explicit mailer.
    ///
    /// Dictionaries are validated and case studies loaded here, so a bad
    /// dictionary stops the site before it binds.
    pub fn new(config: SiteConfig, mailer: Arc<dyn Mailer>) -> SiteResult<Self> {
        let dictionaries = Dictionaries::load()?;
        let content = ContentStore::load(&config.content_dir);
        tracing::info!(case_studies = content.len(), mailer = mailer.name(), "site state ready");

        Ok(Self {
            inner: Arc::new(InnerState {
                #[cfg(debug_assertions)]
                reloader: config.live_reload.then(|| broadcast::channel(16).0),
                config,
                dictionaries,
                content: RwLock::new(content),
                mailer,
            }),
        })
    }

    /// Create state with the mailer described by the configuration.
    pub fn from_config(config: SiteConfig) -> SiteResult<Self> {
        let mailer = mailer::from_config(config.mail.as_ref())?;
        Self::new(config, mailer)
    }

    /// Get the site configuration.
    pub fn config(&self) -> &SiteConfig {
        &self.inner.config
    }

    /// Get the dictionary for a locale.
    pub fn dictionary(&self, locale: Locale) -> Arc<Dictionary> {
        self.inner.dictionaries.get(locale)
    }

    /// Get the content store.
    pub fn content(&self) -> RwLockReadGuard<'_, ContentStore> {
        self.inner.content.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Re-read case studies from disk.
    pub fn reload_content(&self) {
        let fresh = ContentStore::load(&self.inner.config.content_dir);
        tracing::debug!(case_studies = fresh.len(), "reloaded case studies");
        *self.inner.content.write().unwrap_or_else(PoisonError::into_inner) = fresh;
    }

    /// Get the contact form mailer.
    pub fn mailer(&self) -> &dyn Mailer {
        self.inner.mailer.as_ref()
    }

    /// Get the reloader channel (debug only).
    #[cfg(debug_assertions)]
    pub fn reloader(&self) -> Option<&broadcast::Sender<()>> {
        self.inner.reloader.as_ref()
    }
}
