//! Delivery provider request body

use serde::Serialize;

use crate::domain::communication::{attachment::Attachment, email_addresses::EmailAddress};

/// The MIME type of the plain text content part
pub const TEXT_PLAIN: &str = "text/plain";

/// The MIME type of the HTML content part
pub const TEXT_HTML: &str = "text/html";

/// The JSON body posted to the delivery provider
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DeliveryPayload {
    /// Recipient groups; always exactly one
    pub personalizations: Vec<Personalization>,

    /// The sender
    pub from: EmailAddress,

    /// The subject line
    pub subject: String,

    /// The plain text part, followed by the HTML part if there is one
    pub content: Vec<ContentPart>,

    /// Attached files
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<AttachmentPart>>,
}

/// A group of recipients sharing the same content
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Personalization {
    /// Direct recipients
    pub to: Vec<EmailAddress>,

    /// Carbon copy recipients
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cc: Option<Vec<EmailAddress>>,

    /// Blind carbon copy recipients
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bcc: Option<Vec<EmailAddress>>,
}

/// One representation of the message body
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ContentPart {
    /// The MIME type of `value`
    #[serde(rename = "type")]
    pub content_type: String,

    /// The body
    pub value: String,
}

impl ContentPart {
    /// A `text/plain` part
    pub fn plain(value: impl Into<String>) -> Self {
        Self {
            content_type: TEXT_PLAIN.to_string(),
            value: value.into(),
        }
    }

    /// A `text/html` part
    pub fn html(value: impl Into<String>) -> Self {
        Self {
            content_type: TEXT_HTML.to_string(),
            value: value.into(),
        }
    }
}

/// An attachment in the provider's format
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AttachmentPart {
    /// The encoded file content
    pub content: String,

    /// The file name
    pub filename: String,

    /// The MIME type of the file
    #[serde(rename = "type")]
    pub content_type: String,
}

impl From<&Attachment> for AttachmentPart {
    fn from(attachment: &Attachment) -> Self {
        Self {
            content: attachment.content.clone(),
            filename: attachment.filename.clone(),
            content_type: attachment.content_type.clone(),
        }
    }
}
