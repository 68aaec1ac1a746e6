//! Raw email request

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::domain::communication::{attachment::Attachment, email_addresses::AddressInput};

/// An email as described by a caller, before any validation.
///
/// Address fields accept a bare string, an `{ "email", "name" }` object or a
/// list of either.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmailMessageInput {
    /// The recipients
    #[schema(value_type = Object, example = json!("email@example.com"))]
    pub to: Option<AddressInput>,

    /// The sender
    #[schema(value_type = Object, example = json!({ "email": "noreply@example.com", "name": "Example" }))]
    pub from: Option<AddressInput>,

    /// Carbon copy recipients
    #[schema(value_type = Object)]
    pub cc: Option<AddressInput>,

    /// Blind carbon copy recipients
    #[schema(value_type = Object)]
    pub bcc: Option<AddressInput>,

    /// The subject line
    #[schema(example = "Welcome")]
    pub subject: Option<String>,

    /// The plain text body
    pub text: Option<String>,

    /// The HTML body
    #[schema(example = "<p>Hello {{{name}}}</p>")]
    pub html: Option<String>,

    /// Files attached to the email
    pub attachments: Option<Vec<Attachment>>,

    /// Values substituted for `{{{key}}}` markers in the bodies
    #[schema(value_type = Object, example = json!({ "name": "Alice" }))]
    pub data: Option<Map<String, Value>>,

    /// Inline `<style>` rules into the HTML body before sending
    #[serde(default)]
    pub inline_css: bool,
}
