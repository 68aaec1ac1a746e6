//! Infrastructure: the HTTP API and the delivery provider integration

pub mod email;
pub mod http;
