//! Example: Authenticate against an IMAP server with SASL PLAIN
//!
//! The mechanism is negotiated from the server's capabilities unless
//! `MAILGATE_METHOD` names one explicitly.
//!
//! ## Running
//!
//! ```bash
//! MAILGATE_HOST=imap.example.com \
//! MAILGATE_USER=alice \
//! MAILGATE_PASSWORD=secret \
//! RUST_LOG=mailgate_imap=debug \
//! cargo run --package mailgate-imap --example plain_login
//! ```
//!
//! Optional: `MAILGATE_PORT`, `MAILGATE_METHOD` (`auto` or `plain`), and
//! `MAILGATE_INSECURE=1` to connect without TLS (local test servers only).

use std::env;

use anyhow::Context;
use mailgate_imap::{AuthMethod, AuthNegotiation, Client, Config, Security};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mailgate_imap=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let host = env::var("MAILGATE_HOST").context("MAILGATE_HOST is not set")?;
    let username = env::var("MAILGATE_USER").context("MAILGATE_USER is not set")?;
    let password = env::var("MAILGATE_PASSWORD").context("MAILGATE_PASSWORD is not set")?;
    let method: AuthMethod = env::var("MAILGATE_METHOD")
        .unwrap_or_else(|_| "auto".to_string())
        .parse()
        .context("invalid MAILGATE_METHOD")?;

    let mut builder = Config::builder(host);
    if env::var("MAILGATE_INSECURE").is_ok_and(|v| v == "1") {
        builder = builder.security(Security::None);
    }
    if let Ok(port) = env::var("MAILGATE_PORT") {
        builder = builder.port(port.parse().context("invalid MAILGATE_PORT")?);
    }
    let config = builder.build();

    println!("Connecting to {}:{}...", config.host, config.port);
    let client = Client::connect(&config)
        .await
        .with_context(|| format!("failed to connect to {}", config.host))?;
    println!("Server capabilities: {:?}", client.capabilities());

    let negotiation = AuthNegotiation::new(method, username.as_str(), password);
    let client = client
        .authenticate(&negotiation)
        .await
        .with_context(|| format!("authentication as {username} failed"))?;
    println!("Authenticated as {username}");

    client.logout().await?;
    println!("Logged out");

    Ok(())
}
