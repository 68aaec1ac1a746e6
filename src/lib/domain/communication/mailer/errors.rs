//! Mailer errors

use thiserror::Error;

/// Errors raised while handing a message to the delivery provider
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// The provider answered with a non-success status
    #[error("delivery provider rejected the email with status {status}")]
    Rejected {
        /// The HTTP status code
        status: u16,

        /// The response body, kept for diagnostics
        body: String,
    },

    /// The provider could not be reached
    #[error("could not reach the delivery provider: {0}")]
    Transport(anyhow::Error),
}

impl From<anyhow::Error> for DeliveryError {
    fn from(err: anyhow::Error) -> Self {
        DeliveryError::Transport(err)
    }
}
