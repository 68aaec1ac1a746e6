//! OpenAPI module

use utoipa::OpenApi;

use crate::{
    domain::communication::{
        attachment::Attachment, email_addresses::EmailAddress, message::EmailMessageInput,
    },
    infrastructure::http::{errors::ErrorResponse, handlers::v1::*},
};

/// The API's OpenAPI document
#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "Mail Relay"),
    paths(send::handler, inline::handler, uptime::handler),
    components(schemas(
        EmailMessageInput,
        EmailAddress,
        Attachment,
        send::SendEmailResponse,
        inline::InlineBody,
        uptime::UptimeResponse,
        ErrorResponse,
    ))
)]
pub struct ApiDocs;
