//! Site configuration.

use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Default SMTP submission port (STARTTLS).
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// Site configuration.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Address to bind to.
    pub bind_addr: SocketAddr,
    /// Public origin used for absolute URLs (sitemap, hreflang), without a
    /// trailing slash.
    pub base_url: String,
    /// Directory holding `{locale}/work/*.md` case studies.
    pub content_dir: PathBuf,
    /// Directory served under `/public`.
    pub public_dir: PathBuf,
    /// SMTP settings for the contact form. When `None`, submissions are
    /// only logged.
    pub mail: Option<MailConfig>,
    /// Serve the live reload endpoint and watch files (debug builds only).
    pub live_reload: bool,
}

/// SMTP settings for contact form delivery.
#[derive(Clone)]
pub struct MailConfig {
    /// SMTP relay host.
    pub host: String,
    /// SMTP relay port.
    pub port: u16,
    /// SMTP login.
    pub username: String,
    /// SMTP password.
    pub password: String,
    /// Sender mailbox, e.g. `Website <site@example.com>`.
    pub from: String,
    /// Mailbox receiving contact requests.
    pub recipient: String,
}

impl SiteConfig {
    /// Creates a new site configuration.
    pub fn new(bind_addr: impl Into<SocketAddr>) -> Self {
        Self {
            bind_addr: bind_addr.into(),
            ..Self::default()
        }
    }

    /// Sets the public origin. A trailing slash is dropped.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the case study directory.
    pub fn with_content_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.content_dir = dir.into();
        self
    }

    /// Sets the static asset directory.
    pub fn with_public_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.public_dir = dir.into();
        self
    }

    /// Enables SMTP delivery for the contact form.
    pub fn with_mail(mut self, mail: MailConfig) -> Self {
        self.mail = Some(mail);
        self
    }

    /// Turns the live reload watcher on or off.
    pub fn with_live_reload(mut self, enabled: bool) -> Self {
        self.live_reload = enabled;
        self
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            base_url: "http://localhost:3000".to_string(),
            content_dir: PathBuf::from("content"),
            public_dir: PathBuf::from("public"),
            mail: None,
            live_reload: cfg!(debug_assertions),
        }
    }
}

impl MailConfig {
    /// Creates SMTP settings on the default port, sending from `username`.
    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        recipient: impl Into<String>,
    ) -> Self {
        let username = username.into();
        Self {
            host: host.into(),
            port: DEFAULT_SMTP_PORT,
            from: username.clone(),
            username,
            password: password.into(),
            recipient: recipient.into(),
        }
    }

    /// Sets the SMTP port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the sender mailbox.
    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = from.into();
        self
    }
}

impl fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("from", &self.from)
            .field("recipient", &self.recipient)
            .finish()
    }
}
