//! Send email handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::{
    domain::communication::{
        mailer::Mailer,
        message::{EmailMessage, EmailMessageInput},
    },
    infrastructure::{
        email::inline::inline_css,
        http::{
            auth::{ApiKeyResolver, Authorized},
            errors::{ApiError, ErrorResponse},
            state::AppState,
        },
    },
};

/// Send email response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SendEmailResponse {
    /// Whether the provider accepted the email
    pub success: bool,
}

/// Send an email
#[utoipa::path(
    post,
    operation_id = "send_email",
    tag = "Email",
    path = "/api/v1/send",
    request_body = EmailMessageInput,
    responses(
        (status = StatusCode::OK, description = "Email accepted by the provider", body = SendEmailResponse),
        (status = StatusCode::UNAUTHORIZED, description = "Missing or invalid API key", body = ErrorResponse),
        (status = StatusCode::UNSUPPORTED_MEDIA_TYPE, description = "Request body is not JSON", body = ErrorResponse),
        (status = StatusCode::UNPROCESSABLE_ENTITY, description = "Invalid email", body = ErrorResponse, example = json!({ "error": "Please provide at least one recipient" })),
        (status = StatusCode::BAD_GATEWAY, description = "Provider failed to send the email", body = ErrorResponse, example = json!({ "error": "Failed to send email" })),
    )
)]
pub async fn handler<M: Mailer, K: ApiKeyResolver>(
    State(state): State<AppState<M, K>>,
    _: Authorized,
    request: Result<Json<EmailMessageInput>, JsonRejection>,
) -> Result<Json<SendEmailResponse>, ApiError> {
    let Json(mut request) = request?;

    if request.inline_css {
        request.html = request.html.as_deref().map(inline_css).transpose()?;
    }

    let message = EmailMessage::new(request)?
        .with_delivery_endpoint(state.config.delivery_endpoint.as_str());

    let receipt = message.send(state.mailer.as_ref()).await?;

    info!(
        status = receipt.status,
        recipients = message.to().len(),
        "email sent"
    );

    Ok(Json(SendEmailResponse { success: true }))
}
