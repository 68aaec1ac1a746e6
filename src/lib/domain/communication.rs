//! Outbound email: the message model and everything needed to deliver it.

pub mod attachment;
pub mod email_addresses;
pub mod mailer;
pub mod message;
pub mod plain_text;
pub mod template;
