//! Message validation errors

use thiserror::Error;

/// The reasons an [`EmailMessageInput`](super::EmailMessageInput) can be rejected
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// No recipient was given
    #[error("at least one recipient is required")]
    MissingRecipient,

    /// No sender was given
    #[error("a sender is required")]
    MissingSender,

    /// The subject is missing or empty
    #[error("a subject is required")]
    MissingSubject,

    /// Neither a text nor an HTML body was given
    #[error("either text or html content is required")]
    MissingContent,

    /// One of the addresses has an empty email
    #[error("email address is empty")]
    EmptyEmailAddress,
}
