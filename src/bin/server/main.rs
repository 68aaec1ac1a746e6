#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Email relay server

use anyhow::Result;
use clap::Parser;
use mail_relay::infrastructure::{
    email::mailchannels::{MailChannelsConfig, MailChannelsMailer},
    http::{
        auth::{AuthConfig, ChainedApiKeyResolver},
        state::{AppConfig, AppState},
        HttpServer, HttpServerConfig,
    },
};

/// Command-line arguments / environment variables
#[derive(Debug, Parser)]
pub struct Args {
    /// The HTTP server configuration
    #[clap(flatten)]
    pub server: HttpServerConfig,

    /// The delivery provider configuration
    #[clap(flatten)]
    pub mailchannels: MailChannelsConfig,

    /// The API key configuration
    #[clap(flatten)]
    pub auth: AuthConfig,
}

#[mutants::skip]
#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let mailer = MailChannelsMailer::new(&args.mailchannels)?;
    let api_keys = ChainedApiKeyResolver::from_config(&args.auth);

    let config = AppConfig {
        delivery_endpoint: args.mailchannels.url.clone(),
    };

    let state = AppState::new(config, mailer, api_keys);

    HttpServer::new(args.server, state).await?.run().await
}
