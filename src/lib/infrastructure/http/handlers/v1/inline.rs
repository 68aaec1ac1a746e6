//! CSS inlining handler

use axum::{extract::rejection::JsonRejection, response::Html, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::infrastructure::{
    email::inline::inline_css,
    http::{
        auth::Authorized,
        errors::{ApiError, ErrorResponse},
    },
};

/// Inline CSS request body
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct InlineBody {
    /// The HTML document to inline styles into
    #[schema(example = "<style>p { color: red; }</style><p>Hello</p>")]
    pub html: String,
}

/// Preview an HTML body with its styles inlined, as it would be sent
#[utoipa::path(
    post,
    operation_id = "inline_css",
    tag = "Email",
    path = "/api/v1/inline",
    request_body = InlineBody,
    responses(
        (status = StatusCode::OK, description = "The inlined HTML document", body = String, content_type = "text/html"),
        (status = StatusCode::UNAUTHORIZED, description = "Missing or invalid API key", body = ErrorResponse),
    )
)]
pub async fn handler(
    _: Authorized,
    request: Result<Json<InlineBody>, JsonRejection>,
) -> Result<Html<String>, ApiError> {
    let Json(request) = request?;

    Ok(Html(inline_css(&request.html)?))
}
