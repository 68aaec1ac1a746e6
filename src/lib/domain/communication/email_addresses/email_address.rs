//! Email Address

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A mailbox: the address mail is delivered to and the name shown next to it
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EmailAddress {
    /// The email address
    #[schema(example = "email@example.com")]
    pub email: String,

    /// The display name
    #[serde(default)]
    #[schema(example = "Jane Doe")]
    pub name: String,
}

impl EmailAddress {
    /// Create a new email address with a display name
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
        }
    }

    /// Create an address from a bare string, used as both the address and the display name
    pub fn bare(raw: &str) -> Self {
        Self::new(raw, raw)
    }

    /// Whether the address part is blank
    pub fn is_blank(&self) -> bool {
        self.email.trim().is_empty()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() || self.name == self.email {
            write!(f, "{}", self.email)
        } else {
            write!(f, "{} <{}>", self.name, self.email)
        }
    }
}
