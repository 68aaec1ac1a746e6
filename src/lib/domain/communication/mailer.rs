//! Mailer module
//!
//! A [`Mailer`] is the transport that hands a [`DeliveryPayload`] to the
//! delivery provider. Timeout policy belongs to the implementation; the
//! message model only ever makes a single call through it.

mod errors;
mod payload;

use async_trait::async_trait;

#[cfg(test)]
use mockall::mock;

pub use errors::DeliveryError;
pub use payload::{
    AttachmentPart, ContentPart, DeliveryPayload, Personalization, TEXT_HTML, TEXT_PLAIN,
};

/// Confirmation that the provider accepted a message
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeliveryReceipt {
    /// The HTTP status the provider answered with
    pub status: u16,
}

/// Email delivery transport
#[async_trait]
pub trait Mailer: Clone + Send + Sync + 'static {
    /// Deliver a payload
    ///
    /// # Arguments
    /// * `endpoint` - The URL of the provider's send endpoint.
    /// * `payload` - The request body.
    ///
    /// # Returns
    /// - [`Ok`] with a [`DeliveryReceipt`] once the provider accepted the payload.
    /// - [`Err`] with a [`DeliveryError`] if the provider could not be reached or rejected it.
    async fn deliver(
        &self,
        endpoint: &str,
        payload: &DeliveryPayload,
    ) -> Result<DeliveryReceipt, DeliveryError>;
}

#[cfg(test)]
mock! {
    pub Mailer {}

    impl Clone for Mailer {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl Mailer for Mailer {
        async fn deliver(&self, endpoint: &str, payload: &DeliveryPayload) -> Result<DeliveryReceipt, DeliveryError>;
    }
}
