//! Site error types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::{i18n::DictionaryError, mailer::MailError};

/// Result type for server startup and runtime operations.
pub type SiteResult<T> = Result<T, SiteError>;

/// Errors that stop the site from starting or serving.
#[derive(Debug, Error)]
pub enum SiteError {
    /// A translation dictionary failed to load or validate.
    #[error("dictionary error: {0}")]
    Dictionary(#[from] DictionaryError),

    /// The mail transport could not be configured.
    #[error("mail error: {0}")]
    Mail(#[from] MailError),

    /// Bind failed.
    #[error("failed to bind to {addr}: {source}")]
    BindFailed {
        addr: std::net::SocketAddr,
        source: std::io::Error,
    },

    /// I/O error.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors surfaced by the contact endpoint.
///
/// Every variant maps to a JSON body of the form `{"error": "..."}`.
#[derive(Debug, Error)]
pub enum ContactError {
    /// The request body was not a JSON object we could read.
    #[error("Invalid request body")]
    InvalidPayload(String),

    /// `name`, `contactPreference` or `description` is absent or blank.
    #[error("Missing required fields")]
    MissingFields,

    /// `contactPreference` is neither `email` nor `phone`.
    #[error("Invalid contact preference")]
    InvalidPreference,

    /// The preferred channel has no value to reach the sender on.
    #[error("Missing {0} for the selected contact preference")]
    MissingChannel(&'static str),

    /// The email address does not parse as a deliverable address.
    #[error("Invalid email address")]
    InvalidEmail,

    /// The message could not be handed to the mail transport.
    #[error("Failed to send email")]
    Delivery(#[from] MailError),
}

impl ContactError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Delivery(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ContactError {
    fn into_response(self) -> Response {
        match &self {
            Self::Delivery(source) => tracing::error!(error = %source, "contact email delivery failed"),
            Self::InvalidPayload(detail) => tracing::debug!(%detail, "rejected contact payload"),
            other => tracing::debug!(error = %other, "rejected contact submission"),
        }

        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
