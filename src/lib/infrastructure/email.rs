//! Email delivery infrastructure

pub mod inline;
pub mod mailchannels;
