//! Version 1 of the API

use axum::{
    routing::{get, post},
    Json, Router,
};
use utoipa::OpenApi;

use crate::{
    domain::communication::mailer::Mailer,
    infrastructure::http::{auth::ApiKeyResolver, open_api::ApiDocs, state::AppState},
};

pub mod inline;
pub mod send;
pub mod uptime;

/// Routes served under `/api/v1`
pub fn router<M: Mailer, K: ApiKeyResolver>() -> Router<AppState<M, K>> {
    Router::new()
        .route("/openapi.json", get(Json(ApiDocs::openapi())))
        .route("/uptime", get(uptime::handler))
        .route("/send", post(send::handler))
        .route("/inline", post(inline::handler))
}
