//! API key authorization
//!
//! The expected key is looked up on every request from an ordered list of
//! sources, so it can be rotated without restarting the server.

use std::{env, path::PathBuf};

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use clap::Parser;
use constant_time_eq::constant_time_eq;
use tokio::fs;
use tracing::warn;

use crate::infrastructure::http::errors::ApiError;

/// The environment variable holding the API key
pub const API_KEY_VAR: &str = "API_KEY";

/// API key configuration
#[derive(Clone, Debug, Default, PartialEq, Eq, Parser)]
pub struct AuthConfig {
    /// The API key callers must send in the `Authorization` header
    #[clap(long, env = API_KEY_VAR)]
    pub api_key: Option<String>,

    /// A file containing the API key
    #[clap(long, env = "API_KEY_FILE")]
    pub api_key_file: Option<PathBuf>,
}

/// Resolves the API key requests are checked against
#[async_trait]
pub trait ApiKeyResolver: Clone + Send + Sync + 'static {
    /// The expected API key, or [`None`] if no key is configured.
    async fn expected_key(&self) -> Option<String>;
}

/// A place an API key can be read from
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApiKeySource {
    /// An environment variable, read on every lookup
    Env(String),

    /// A file, read on every lookup; surrounding whitespace is ignored
    File(PathBuf),

    /// A fixed value
    Static(String),
}

impl ApiKeySource {
    /// Reads the key. Missing and empty keys are both [`None`].
    pub async fn resolve(&self) -> Option<String> {
        let key = match self {
            ApiKeySource::Env(var) => env::var(var).ok(),
            ApiKeySource::File(path) => fs::read_to_string(path)
                .await
                .map(|contents| contents.trim().to_string())
                .ok(),
            ApiKeySource::Static(key) => Some(key.clone()),
        };

        key.filter(|key| !key.is_empty())
    }
}

/// Tries each source in turn and uses the first key found
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChainedApiKeyResolver {
    sources: Vec<ApiKeySource>,
}

impl ChainedApiKeyResolver {
    /// Create a resolver that tries `sources` in order
    pub fn new(sources: Vec<ApiKeySource>) -> Self {
        Self { sources }
    }

    /// The `API_KEY` environment variable, then the key file, then the key given at start-up.
    pub fn from_config(config: &AuthConfig) -> Self {
        let sources = [
            Some(ApiKeySource::Env(API_KEY_VAR.to_string())),
            config.api_key_file.clone().map(ApiKeySource::File),
            config.api_key.clone().map(ApiKeySource::Static),
        ];

        Self::new(sources.into_iter().flatten().collect())
    }

    /// The sources, in priority order
    pub fn sources(&self) -> &[ApiKeySource] {
        &self.sources
    }
}

#[async_trait]
impl ApiKeyResolver for ChainedApiKeyResolver {
    async fn expected_key(&self) -> Option<String> {
        for source in &self.sources {
            if let Some(key) = source.resolve().await {
                return Some(key);
            }
        }

        None
    }
}

/// Extractor that rejects requests without the expected `Authorization` header
#[derive(Debug)]
pub struct Authorized;

#[async_trait]
impl<S> FromRequestParts<S> for Authorized
where
    S: ApiKeyResolver,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let provided = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::new_401("Authorization header is required"))?;

        let Some(expected) = state.expected_key().await else {
            warn!("no API key is configured, rejecting request");
            return Err(ApiError::new_401("Invalid authorization"));
        };

        if !constant_time_eq(provided.as_bytes(), expected.as_bytes()) {
            return Err(ApiError::new_401("Invalid authorization"));
        }

        Ok(Authorized)
    }
}
