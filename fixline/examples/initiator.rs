//! FixLine initiator demo.
//!
//! Connects to a counterparty, logs on, and runs the session until the peer
//! logs out or the connection drops. Host, port, and identifiers come from
//! the environment so the demo can point at any acceptor:
//!
//! ```text
//! FIX_HOST=127.0.0.1 FIX_PORT=5000 cargo run --example initiator
//! ```

use fixline::{CompId, Initiator, SessionConfig};
use std::time::Duration;
use tracing::{error, info};

#[tokio::main]
async fn main() -> fixline::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let host = std::env::var("FIX_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("FIX_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(5000);
    let sender = std::env::var("FIX_SENDER").unwrap_or_else(|_| "CLIENT".to_string());
    let target = std::env::var("FIX_TARGET").unwrap_or_else(|_| "MINIFIX".to_string());

    let config = SessionConfig::new(
        &host,
        port,
        CompId::new(&sender).expect("sender comp id too long"),
        CompId::new(&target).expect("target comp id too long"),
    )
    .with_heartbeat_interval(Duration::from_secs(30));

    info!(%host, port, %sender, %target, "starting session");
    let session = Initiator::new(config);

    match session.start().await {
        Ok(()) => {
            info!("session ended");
            Ok(())
        }
        Err(err) => {
            error!(%err, "session failed");
            Err(err)
        }
    }
}
