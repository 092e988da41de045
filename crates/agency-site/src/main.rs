//! Agency Website
//!
//! Localized marketing website server.

use std::{net::SocketAddr, path::PathBuf};

use agency_site::{config::DEFAULT_SMTP_PORT, MailConfig, SiteConfig};
use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Agency website server.
#[derive(Parser, Debug)]
#[command(name = "agency-site")]
#[command(about = "Serve the agency marketing website", long_about = None)]
struct Cli {
    /// Address to listen on.
    #[arg(long, env = "SITE_BIND", default_value = "127.0.0.1:3000")]
    bind: SocketAddr,

    /// Public origin used in the sitemap and hreflang links.
    #[arg(long, env = "SITE_BASE_URL", default_value = "http://localhost:3000")]
    base_url: String,

    /// Directory holding `{locale}/work/*.md` case studies.
    #[arg(long, env = "SITE_CONTENT_DIR", default_value = "content")]
    content_dir: PathBuf,

    /// Directory served under `/public`.
    #[arg(long, env = "SITE_PUBLIC_DIR", default_value = "public")]
    public_dir: PathBuf,

    /// SMTP relay host. Without it contact requests are only logged.
    #[arg(long, env = "SMTP_HOST")]
    smtp_host: Option<String>,

    /// SMTP relay port (465 uses implicit TLS, anything else STARTTLS).
    #[arg(long, env = "SMTP_PORT", default_value_t = DEFAULT_SMTP_PORT)]
    smtp_port: u16,

    /// SMTP login.
    #[arg(long, env = "SMTP_USERNAME")]
    smtp_username: Option<String>,

    /// SMTP password.
    #[arg(long, env = "SMTP_PASSWORD", hide_env_values = true)]
    smtp_password: Option<String>,

    /// Sender mailbox, defaults to the SMTP login.
    #[arg(long, env = "CONTACT_FROM")]
    contact_from: Option<String>,

    /// Mailbox receiving contact requests.
    #[arg(long, env = "CONTACT_RECIPIENT")]
    contact_recipient: Option<String>,

    /// Disable the live reload watcher in debug builds.
    #[arg(long)]
    no_live_reload: bool,
}

impl Cli {
    fn into_config(self) -> Result<SiteConfig> {
        let mut config = SiteConfig::new(self.bind)
            .with_base_url(self.base_url)
            .with_content_dir(self.content_dir)
            .with_public_dir(self.public_dir)
            .with_live_reload(cfg!(debug_assertions) && !self.no_live_reload);

        if let Some(host) = self.smtp_host {
            let (Some(username), Some(password), Some(recipient)) =
                (self.smtp_username, self.smtp_password, self.contact_recipient)
            else {
                bail!("SMTP_HOST is set but SMTP_USERNAME, SMTP_PASSWORD or CONTACT_RECIPIENT is missing");
            };

            let mut mail = MailConfig::new(host, username, password, recipient).with_port(self.smtp_port);
            if let Some(from) = self.contact_from {
                mail = mail.with_from(from);
            }
            config = config.with_mail(mail);
        }

        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "agency_site=debug,tower_http=debug".parse().expect("valid filter")))
        .with(fmt::layer())
        .init();

    let config = Cli::parse().into_config()?;

    tracing::info!("Starting agency website server");

    agency_site::run(config).await.context("website server failed")
}
