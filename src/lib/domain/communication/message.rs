//! Email message
//!
//! An [`EmailMessage`] is built from an untrusted [`EmailMessageInput`] and
//! is valid from then on: it always has at least one recipient, exactly one
//! sender, a subject and some body content.
//!
//! Template data is applied when the message is rendered, never stored back,
//! so a message can be inspected, rendered and sent any number of times and
//! always starts from the bodies it was built with.

mod errors;
mod input;

use std::iter;

use serde_json::{Map, Value};
use tracing::debug;

use crate::domain::communication::{
    attachment::Attachment,
    email_addresses::{normalize, EmailAddress},
    mailer::{
        AttachmentPart, ContentPart, DeliveryError, DeliveryPayload, DeliveryReceipt, Mailer,
        Personalization,
    },
    plain_text::derive_text,
    template::substitute,
};

pub use errors::ValidationError;
pub use input::EmailMessageInput;

/// The MailChannels transactional send endpoint
pub const DEFAULT_DELIVERY_ENDPOINT: &str = "https://api.mailchannels.net/tx/v1/send";

/// A validated, deliverable email
#[derive(Clone, Debug, PartialEq)]
pub struct EmailMessage {
    to: Vec<EmailAddress>,
    from: EmailAddress,
    cc: Option<Vec<EmailAddress>>,
    bcc: Option<Vec<EmailAddress>>,
    subject: String,
    text: Option<String>,
    html: Option<String>,
    attachments: Option<Vec<Attachment>>,
    data: Option<Map<String, Value>>,
    delivery_endpoint: String,
}

/// Message bodies with template data applied
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedContent {
    /// The plain text body, derived from the HTML body when not given
    pub text: String,

    /// The HTML body
    pub html: Option<String>,
}

impl EmailMessage {
    /// Validates and normalizes an email request.
    ///
    /// # Errors
    /// A [`ValidationError`] if there is no recipient, no sender, no subject,
    /// no body, or if any address is blank.
    pub fn new(input: EmailMessageInput) -> Result<Self, ValidationError> {
        let to = normalize(input.to.as_ref());

        if to.is_empty() {
            return Err(ValidationError::MissingRecipient);
        }

        let from = normalize(input.from.as_ref())
            .into_iter()
            .next()
            .ok_or(ValidationError::MissingSender)?;

        let subject = input
            .subject
            .filter(|subject| !subject.is_empty())
            .ok_or(ValidationError::MissingSubject)?;

        let cc = non_empty(normalize(input.cc.as_ref()));
        let bcc = non_empty(normalize(input.bcc.as_ref()));

        let text = input.text.filter(|text| !text.is_empty());
        let html = input.html.filter(|html| !html.is_empty());

        if text.is_none() && html.is_none() {
            return Err(ValidationError::MissingContent);
        }

        let mut addresses = to
            .iter()
            .chain(iter::once(&from))
            .chain(cc.iter().flatten())
            .chain(bcc.iter().flatten());

        if addresses.any(EmailAddress::is_blank) {
            return Err(ValidationError::EmptyEmailAddress);
        }

        Ok(Self {
            to,
            from,
            cc,
            bcc,
            subject,
            text,
            html,
            attachments: input.attachments,
            data: input.data,
            delivery_endpoint: DEFAULT_DELIVERY_ENDPOINT.to_string(),
        })
    }

    /// Sends the message to a different provider endpoint
    pub fn with_delivery_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.delivery_endpoint = endpoint.into();
        self
    }

    /// The recipients
    pub fn to(&self) -> &[EmailAddress] {
        &self.to
    }

    /// The sender
    pub fn from(&self) -> &EmailAddress {
        &self.from
    }

    /// The carbon copy recipients
    pub fn cc(&self) -> Option<&[EmailAddress]> {
        self.cc.as_deref()
    }

    /// The blind carbon copy recipients
    pub fn bcc(&self) -> Option<&[EmailAddress]> {
        self.bcc.as_deref()
    }

    /// The subject line
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// The plain text body, as given
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// The HTML body, as given
    pub fn html(&self) -> Option<&str> {
        self.html.as_deref()
    }

    /// The attachments
    pub fn attachments(&self) -> Option<&[Attachment]> {
        self.attachments.as_deref()
    }

    /// The template data
    pub fn data(&self) -> Option<&Map<String, Value>> {
        self.data.as_ref()
    }

    /// The URL the message is delivered to
    pub fn delivery_endpoint(&self) -> &str {
        &self.delivery_endpoint
    }

    /// Applies template data to the bodies and fills in the plain text body.
    pub fn render(&self) -> RenderedContent {
        let apply = |body: &String| match &self.data {
            Some(data) => substitute(body, data),
            None => body.clone(),
        };

        let text = self.text.as_ref().map(apply);
        let html = self.html.as_ref().map(apply).filter(|html| !html.is_empty());

        RenderedContent {
            text: derive_text(text.as_deref(), html.as_deref()),
            html,
        }
    }

    /// Builds the request body for the delivery provider.
    ///
    /// The plain text part is always present, even when it is empty; the
    /// HTML part only when there is an HTML body.
    pub fn payload(&self) -> DeliveryPayload {
        let RenderedContent { text, html } = self.render();

        let content = iter::once(ContentPart::plain(text))
            .chain(html.map(ContentPart::html))
            .collect();

        DeliveryPayload {
            personalizations: vec![Personalization {
                to: self.to.clone(),
                cc: self.cc.clone(),
                bcc: self.bcc.clone(),
            }],
            from: self.from.clone(),
            subject: self.subject.clone(),
            content,
            attachments: self
                .attachments
                .as_ref()
                .map(|attachments| attachments.iter().map(AttachmentPart::from).collect()),
        }
    }

    /// Sends the message through `mailer`, making exactly one delivery attempt.
    pub async fn send<M: Mailer>(&self, mailer: &M) -> Result<DeliveryReceipt, DeliveryError> {
        let payload = self.payload();

        debug!(
            endpoint = %self.delivery_endpoint,
            recipients = self.to.len(),
            subject = %self.subject,
            "sending email"
        );

        mailer.deliver(&self.delivery_endpoint, &payload).await
    }
}

impl TryFrom<EmailMessageInput> for EmailMessage {
    type Error = ValidationError;

    fn try_from(input: EmailMessageInput) -> Result<Self, Self::Error> {
        Self::new(input)
    }
}

fn non_empty(addresses: Vec<EmailAddress>) -> Option<Vec<EmailAddress>> {
    if addresses.is_empty() {
        None
    } else {
        Some(addresses)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use serde_json::json;
    use testresult::TestResult;

    use crate::domain::communication::{
        email_addresses::{AddressEntry, AddressInput},
        mailer::MockMailer,
    };

    use super::*;

    fn input() -> EmailMessageInput {
        EmailMessageInput {
            to: Some("a@x.com".into()),
            from: Some("b@x.com".into()),
            subject: Some("Hi".to_string()),
            text: Some("Hello".to_string()),
            ..Default::default()
        }
    }

    fn data(value: Value) -> Option<Map<String, Value>> {
        match value {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    #[test]
    fn test_new_normalizes_addresses() -> TestResult {
        let message = EmailMessage::new(EmailMessageInput {
            cc: Some(AddressInput::List(vec![
                AddressEntry::Bare("c@x.com".to_string()),
                AddressEntry::Structured(EmailAddress::new("d@x.com", "Dee")),
            ])),
            ..input()
        })?;

        assert_eq!(message.to(), [EmailAddress::bare("a@x.com")]);
        assert_eq!(message.from(), &EmailAddress::bare("b@x.com"));
        assert_eq!(
            message.cc(),
            Some(&[EmailAddress::bare("c@x.com"), EmailAddress::new("d@x.com", "Dee")][..])
        );
        assert_eq!(message.bcc(), None);
        assert_eq!(message.delivery_endpoint(), DEFAULT_DELIVERY_ENDPOINT);

        Ok(())
    }

    #[test]
    fn test_missing_recipient() {
        for to in [
            None,
            Some(AddressInput::from("")),
            Some(AddressInput::List(vec![])),
        ] {
            let result = EmailMessage::new(EmailMessageInput { to, ..input() });

            assert_eq!(result.unwrap_err(), ValidationError::MissingRecipient);
        }
    }

    #[test]
    fn test_missing_sender() {
        for from in [
            None,
            Some(AddressInput::from("")),
            Some(AddressInput::List(vec![])),
        ] {
            let result = EmailMessage::new(EmailMessageInput { from, ..input() });

            assert_eq!(result.unwrap_err(), ValidationError::MissingSender);
        }
    }

    #[test]
    fn test_first_sender_is_used() -> TestResult {
        let message = EmailMessage::new(EmailMessageInput {
            from: Some(AddressInput::List(vec![
                AddressEntry::Bare("first@x.com".to_string()),
                AddressEntry::Bare("second@x.com".to_string()),
            ])),
            ..input()
        })?;

        assert_eq!(message.from(), &EmailAddress::bare("first@x.com"));

        Ok(())
    }

    #[test]
    fn test_missing_subject() {
        for subject in [None, Some(String::new())] {
            let result = EmailMessage::new(EmailMessageInput { subject, ..input() });

            assert_eq!(result.unwrap_err(), ValidationError::MissingSubject);
        }
    }

    #[test]
    fn test_missing_content() {
        for (text, html) in [
            (None, None),
            (Some(String::new()), None),
            (None, Some(String::new())),
        ] {
            let result = EmailMessage::new(EmailMessageInput {
                text,
                html,
                ..input()
            });

            assert_eq!(result.unwrap_err(), ValidationError::MissingContent);
        }
    }

    #[test]
    fn test_blank_address() {
        let result = EmailMessage::new(EmailMessageInput {
            bcc: Some(EmailAddress::new("", "Nobody").into()),
            ..input()
        });

        assert_eq!(result.unwrap_err(), ValidationError::EmptyEmailAddress);
    }

    #[test]
    fn test_try_from_input() {
        let message: Result<EmailMessage, _> = input().try_into();

        assert!(message.is_ok());
    }

    #[test]
    fn test_with_delivery_endpoint() -> TestResult {
        let message = EmailMessage::new(input())?.with_delivery_endpoint("http://localhost/send");

        assert_eq!(message.delivery_endpoint(), "http://localhost/send");

        Ok(())
    }

    #[test]
    fn test_render_derives_text_from_html() -> TestResult {
        let message = EmailMessage::new(EmailMessageInput {
            text: None,
            html: Some("<h1>Hello</h1><p>It&apos;s &quot;here&quot;</p>".to_string()),
            ..input()
        })?;

        let rendered = message.render();

        assert_eq!(rendered.text, "HelloIt's \"here\"");
        assert_eq!(message.text(), None);

        Ok(())
    }

    #[test]
    fn test_render_keeps_explicit_text() -> TestResult {
        let message = EmailMessage::new(EmailMessageInput {
            text: Some("Plain {{{name}}}".to_string()),
            html: Some("<p>Rich {{{name}}}</p>".to_string()),
            data: data(json!({ "name": "Alice" })),
            ..input()
        })?;

        let rendered = message.render();

        assert_eq!(rendered.text, "Plain Alice");
        assert_eq!(rendered.html.as_deref(), Some("<p>Rich Alice</p>"));

        Ok(())
    }

    #[test]
    fn test_render_does_not_modify_message() -> TestResult {
        let message = EmailMessage::new(EmailMessageInput {
            text: Some("Hi {{{name}}}".to_string()),
            data: data(json!({ "name": "{{{name}}}!" })),
            ..input()
        })?;

        let first = message.render();
        let second = message.render();

        assert_eq!(first, second);
        assert_eq!(first.text, "Hi {{{name}}}!");
        assert_eq!(message.text(), Some("Hi {{{name}}}"));

        Ok(())
    }

    #[test]
    fn test_payload_without_html() -> TestResult {
        let message = EmailMessage::new(input())?;

        assert_eq!(message.payload().content, vec![ContentPart::plain("Hello")]);

        Ok(())
    }

    #[test]
    fn test_payload_html_emptied_by_substitution() -> TestResult {
        let message = EmailMessage::new(EmailMessageInput {
            text: None,
            html: Some("{{{body}}}".to_string()),
            data: data(json!({ "body": "" })),
            ..input()
        })?;

        assert_eq!(message.payload().content, vec![ContentPart::plain("")]);

        Ok(())
    }

    #[test]
    fn test_payload_serialization() -> TestResult {
        let message = EmailMessage::new(EmailMessageInput {
            to: Some(EmailAddress::new("a@x.com", "Alice").into()),
            cc: Some("c@x.com".into()),
            html: Some("<b>Hello</b>".to_string()),
            attachments: Some(vec![Attachment {
                filename: "a.txt".to_string(),
                content: "aGk=".to_string(),
                content_type: "text/plain".to_string(),
            }]),
            ..input()
        })?;

        assert_eq!(
            serde_json::to_value(message.payload())?,
            json!({
                "personalizations": [{
                    "to": [{ "email": "a@x.com", "name": "Alice" }],
                    "cc": [{ "email": "c@x.com", "name": "c@x.com" }],
                }],
                "from": { "email": "b@x.com", "name": "b@x.com" },
                "subject": "Hi",
                "content": [
                    { "type": "text/plain", "value": "Hello" },
                    { "type": "text/html", "value": "<b>Hello</b>" },
                ],
                "attachments": [{ "content": "aGk=", "filename": "a.txt", "type": "text/plain" }],
            })
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_send_end_to_end() -> TestResult {
        let message = EmailMessage::new(EmailMessageInput {
            to: Some("a@x.com".into()),
            from: Some("b@x.com".into()),
            subject: Some("Hi".to_string()),
            text: None,
            html: Some("<p>{{{n}}}</p>".to_string()),
            data: data(json!({ "n": "Bob" })),
            ..Default::default()
        })?;

        assert_eq!(message.to(), [EmailAddress::new("a@x.com", "a@x.com")]);

        let mut mailer = MockMailer::new();

        mailer
            .expect_deliver()
            .withf(|endpoint, payload| {
                endpoint == DEFAULT_DELIVERY_ENDPOINT
                    && payload.content
                        == vec![ContentPart::plain("Bob"), ContentPart::html("<p>Bob</p>")]
            })
            .times(1)
            .returning(|_, _| Ok(DeliveryReceipt { status: 200 }));

        let receipt = message.send(&mailer).await?;

        assert_eq!(receipt, DeliveryReceipt { status: 200 });

        let rendered = message.render();

        assert_eq!(rendered.html.as_deref(), Some("<p>Bob</p>"));
        assert_eq!(rendered.text, "Bob");

        Ok(())
    }

    #[tokio::test]
    async fn test_sending_twice_delivers_the_same_payload() -> TestResult {
        let message = EmailMessage::new(EmailMessageInput {
            text: None,
            html: Some("<p>{{{name}}}</p>".to_string()),
            data: data(json!({ "name": "Bob {{{name}}}" })),
            ..input()
        })?;

        let delivered = Arc::new(Mutex::new(Vec::new()));
        let captured = delivered.clone();

        let mut mailer = MockMailer::new();

        mailer
            .expect_deliver()
            .times(2)
            .returning(move |_, payload| {
                captured.lock().unwrap().push(payload.clone());
                Ok(DeliveryReceipt { status: 202 })
            });

        message.send(&mailer).await?;
        message.send(&mailer).await?;

        let delivered = delivered.lock().unwrap();

        assert_eq!(delivered.len(), 2);
        assert_eq!(delivered[0], delivered[1]);
        assert_eq!(
            delivered[0].content,
            vec![
                ContentPart::plain("Bob {{{name}}}"),
                ContentPart::html("<p>Bob {{{name}}}</p>"),
            ]
        );
        assert_eq!(message.html(), Some("<p>{{{name}}}</p>"));

        Ok(())
    }

    #[tokio::test]
    async fn test_send_propagates_delivery_error() -> TestResult {
        let message = EmailMessage::new(input())?;

        let mut mailer = MockMailer::new();

        mailer.expect_deliver().times(1).returning(|_, _| {
            Err(DeliveryError::Rejected {
                status: 500,
                body: "boom".to_string(),
            })
        });

        let result = message.send(&mailer).await;

        assert!(matches!(
            result,
            Err(DeliveryError::Rejected { status: 500, .. })
        ));

        Ok(())
    }
}
