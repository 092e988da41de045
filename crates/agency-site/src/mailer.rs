//! Mail Delivery
//!
//! Contact requests leave the site through a [`Mailer`]. Production uses SMTP;
//! without SMTP settings the message is written to the log instead.

use std::sync::Arc;

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::MailConfig;

/// Port on which SMTP relays expect implicit TLS rather than STARTTLS.
const IMPLICIT_TLS_PORT: u16 = 465;

/// Errors raised while sending mail.
#[derive(Debug, Error)]
pub enum MailError {
    /// A configured mailbox did not parse.
    #[error("invalid mailbox {address:?}: {source}")]
    Address {
        address: String,
        source: lettre::address::AddressError,
    },

    /// The message could not be assembled.
    #[error("failed to build message: {0}")]
    Build(#[from] lettre::error::Error),

    /// The SMTP exchange failed.
    #[error("smtp error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The transport refused the message for another reason.
    #[error("mail rejected: {0}")]
    Rejected(String),
}

/// A plain-text message addressed to the site owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    pub subject: String,
    pub body: String,
    /// Address replies should go to, when the sender left one.
    pub reply_to: Option<String>,
}

/// Delivers contact messages.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Sends one message. Failures are not retried.
    async fn send(&self, message: MailMessage) -> Result<(), MailError>;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

/// Picks SMTP delivery when configured, logging otherwise.
pub fn from_config(config: Option<&MailConfig>) -> Result<Arc<dyn Mailer>, MailError> {
    match config {
        Some(config) => {
            info!(host = %config.host, port = config.port, "contact form delivers over SMTP");
            Ok(Arc::new(SmtpMailer::new(config)?))
        }
        None => {
            warn!("SMTP is not configured, contact requests will only be logged");
            Ok(Arc::new(LogMailer))
        }
    }
}

/// Sends mail through an authenticated SMTP relay.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl SmtpMailer {
    /// Builds the transport. No connection is opened until the first send.
    pub fn new(config: &MailConfig) -> Result<Self, MailError> {
        let from = parse_mailbox(&config.from)?;
        let to = parse_mailbox(&config.recipient)?;

        let builder = if config.port == IMPLICIT_TLS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
        };

        let transport = builder
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        Ok(Self { transport, from, to })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, message: MailMessage) -> Result<(), MailError> {
        let mut builder = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(message.subject);

        if let Some(reply_to) = message.reply_to.as_deref() {
            match reply_to.parse::<Address>() {
                Ok(address) => builder = builder.reply_to(Mailbox::new(None, address)),
                Err(e) => warn!(error = %e, "dropping unusable reply-to address"),
            }
        }

        let email = builder.header(ContentType::TEXT_PLAIN).body(message.body)?;
        let response = self.transport.send(email).await?;
        debug!(code = %response.code(), "smtp relay accepted message");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "smtp"
    }
}

/// Writes messages to the log. Used in development.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: MailMessage) -> Result<(), MailError> {
        info!(
            subject = %message.subject,
            reply_to = message.reply_to.as_deref().unwrap_or(""),
            "contact request received (not emailed)"
        );
        debug!(body = %message.body, "contact request body");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, MailError> {
    address.parse().map_err(|source| MailError::Address {
        address: address.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mailbox_parsing_reports_the_address() {
        let err = parse_mailbox("not an address").expect_err("invalid mailbox");
        assert!(err.to_string().contains("not an address"));
        assert!(parse_mailbox("Website <site@example.com>").is_ok());
    }

    #[test]
    fn smtp_mailer_rejects_bad_sender() {
        let config = MailConfig::new("smtp.example.com", "site@example.com", "secret", "team@example.com")
            .with_from("nobody");
        assert!(matches!(SmtpMailer::new(&config), Err(MailError::Address { .. })));
    }

    #[test]
    fn missing_config_falls_back_to_log_mailer() {
        let mailer = from_config(None).expect("log mailer");
        assert_eq!(mailer.name(), "log");
    }

    #[tokio::test]
    async fn log_mailer_always_succeeds() {
        let message = MailMessage {
            subject: "New contact request from Ana".to_string(),
            body: "hello".to_string(),
            reply_to: None,
        };
        assert!(LogMailer.send(message).await.is_ok());
    }
}
