//! Contact API Handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Serialize;

use crate::{contact::ContactRequest, error::ContactError, state::AppState};

/// Body returned when a contact request was delivered.
#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub message: &'static str,
    pub success: bool,
}

/// Handler for `POST /api/contact`.
pub async fn submit(
    State(state): State<AppState>,
    payload: Result<Json<ContactRequest>, JsonRejection>,
) -> Result<Json<ContactResponse>, ContactError> {
    let Json(request) = payload.map_err(|rejection| ContactError::InvalidPayload(rejection.body_text()))?;
    let submission = request.validate()?;

    state.mailer().send(submission.to_mail()).await?;

    tracing::info!(
        preference = submission.preference.label(),
        service = submission.service.as_deref().unwrap_or("-"),
        "contact request delivered"
    );

    Ok(Json(ContactResponse {
        message: "Email sent successfully",
        success: true,
    }))
}
