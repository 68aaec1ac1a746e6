//! Attachments

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A file attached to an email. The content is opaque and forwarded as-is.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    /// The file name shown to the recipient
    #[schema(example = "invoice.pdf")]
    pub filename: String,

    /// The encoded file content
    pub content: String,

    /// The MIME type of the file
    #[schema(example = "application/pdf")]
    pub content_type: String,
}
