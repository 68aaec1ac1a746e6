//! Application state module

use std::{fmt, sync::Arc};

use axum::async_trait;
use chrono::{DateTime, Utc};

use crate::{
    domain::communication::mailer::Mailer, infrastructure::http::auth::ApiKeyResolver,
};

/// Application configuration
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// The provider endpoint messages are delivered to
    pub delivery_endpoint: String,
}

/// Global application state
#[derive(Clone)]
pub struct AppState<M: Mailer, K: ApiKeyResolver> {
    /// The time the server started
    pub start_time: DateTime<Utc>,

    /// The application configuration
    pub config: AppConfig,

    /// Delivery transport
    pub mailer: Arc<M>,

    /// API key lookup
    pub api_keys: Arc<K>,
}

impl<M, K> AppState<M, K>
where
    M: Mailer,
    K: ApiKeyResolver,
{
    /// Create a new application state
    pub fn new(config: AppConfig, mailer: M, api_keys: K) -> Self {
        Self {
            start_time: Utc::now(),
            config,
            mailer: Arc::new(mailer),
            api_keys: Arc::new(api_keys),
        }
    }
}

#[async_trait]
impl<M, K> ApiKeyResolver for AppState<M, K>
where
    M: Mailer,
    K: ApiKeyResolver,
{
    async fn expected_key(&self) -> Option<String> {
        self.api_keys.expected_key().await
    }
}

impl<M, K> fmt::Debug for AppState<M, K>
where
    M: Mailer,
    K: ApiKeyResolver,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("start_time", &self.start_time)
            .field("config", &self.config)
            .field("mailer", &"Mailer")
            .field("api_keys", &"ApiKeyResolver")
            .finish()
    }
}
