//! MailChannels delivery over HTTP

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use clap::Parser;
use reqwest::{header::CONTENT_TYPE, Client};
use tracing::{debug, error, info};

use crate::domain::communication::{
    mailer::{DeliveryError, DeliveryPayload, DeliveryReceipt, Mailer},
    message::DEFAULT_DELIVERY_ENDPOINT,
};

/// MailChannels configuration
#[derive(Clone, Debug, PartialEq, Eq, Parser)]
pub struct MailChannelsConfig {
    /// The send endpoint
    #[clap(long = "mailchannels-url", env = "MAILCHANNELS_URL", default_value = DEFAULT_DELIVERY_ENDPOINT)]
    pub url: String,

    /// Give up on a send after this many seconds; no limit when unset
    #[clap(long = "mailchannels-timeout-secs", env = "MAILCHANNELS_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,
}

impl Default for MailChannelsConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DELIVERY_ENDPOINT.to_string(),
            timeout_secs: None,
        }
    }
}

/// Delivers email through the MailChannels transactional API
#[derive(Clone, Debug)]
pub struct MailChannelsMailer {
    client: Client,
}

impl MailChannelsMailer {
    /// Create a new MailChannels mailer
    pub fn new(config: &MailChannelsConfig) -> anyhow::Result<Self> {
        let mut builder = Client::builder();

        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder.build().context("failed to build HTTP client")?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Mailer for MailChannelsMailer {
    async fn deliver(
        &self,
        endpoint: &str,
        payload: &DeliveryPayload,
    ) -> Result<DeliveryReceipt, DeliveryError> {
        debug!(endpoint, ?payload, "posting email to provider");

        let response = self
            .client
            .post(endpoint)
            .header(CONTENT_TYPE, "application/json")
            .json(payload)
            .send()
            .await
            .with_context(|| format!("failed to post email to {endpoint}"))?;

        let status = response.status();

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            error!(status = status.as_u16(), body = %body, "failed to send email");

            return Err(DeliveryError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        info!(status = status.as_u16(), "email accepted by provider");

        Ok(DeliveryReceipt {
            status: status.as_u16(),
        })
    }
}
