//! Email addresses module.
//!
//! Callers describe recipients in several shapes: a bare string, a structured
//! address, or a list mixing both. [`AddressInput`] captures those shapes and
//! [`normalize`] resolves them into a flat list of [`EmailAddress`]es.

mod email_address;

use serde::{Deserialize, Serialize};

pub use email_address::EmailAddress;

/// A single recipient as supplied by the caller
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AddressEntry {
    /// A bare string, used as both address and display name
    Bare(String),

    /// An address with an explicit display name
    Structured(EmailAddress),
}

/// Any of the accepted shapes for an address field
///
/// `List` is tried before `Structured`, since serde would otherwise read a
/// two-element array of strings as an `{ email, name }` pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AddressInput {
    /// A bare string
    Bare(String),

    /// A list of bare or structured addresses
    List(Vec<AddressEntry>),

    /// A single structured address
    Structured(EmailAddress),
}

impl From<AddressEntry> for EmailAddress {
    fn from(entry: AddressEntry) -> Self {
        match entry {
            AddressEntry::Bare(raw) => EmailAddress::bare(&raw),
            AddressEntry::Structured(address) => address,
        }
    }
}

impl From<&str> for AddressInput {
    fn from(raw: &str) -> Self {
        AddressInput::Bare(raw.to_string())
    }
}

impl From<EmailAddress> for AddressInput {
    fn from(address: EmailAddress) -> Self {
        AddressInput::Structured(address)
    }
}

/// Resolves an address field into a list of addresses.
///
/// Absent input and the empty string both yield an empty list. List order
/// is preserved and duplicates are kept. No syntax checks are made; the
/// delivery provider is the final judge of what is deliverable.
pub fn normalize(input: Option<&AddressInput>) -> Vec<EmailAddress> {
    match input {
        None => Vec::new(),
        Some(AddressInput::Bare(raw)) if raw.is_empty() => Vec::new(),
        Some(AddressInput::Bare(raw)) => vec![EmailAddress::bare(raw)],
        Some(AddressInput::Structured(address)) => vec![address.clone()],
        Some(AddressInput::List(entries)) => entries.iter().cloned().map(Into::into).collect(),
    }
}
