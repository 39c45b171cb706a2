//! SendCloud webhook receiver service.
//!
//! Binds the webhook router and logs each decoded delivery event.
//! Applications embedding the receiver supply their own
//! `EventHandler`; this binary is the standalone deployment shape.

use std::sync::Arc;

use anyhow::{Context, Result};
use sendcloud_core::{DeliveryEvent, EventHandler};
use sendcloud_webhook::{start_server, AppState, Config};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = Config::load().context("failed to load configuration")?;
    let addr = config.bind_addr().context("invalid bind address")?;
    info!(host = %config.host, port = config.port, "configuration loaded");

    let state = AppState::new(&config.webhook_key, Arc::new(LoggingHandler));
    start_server(addr, state, config.request_timeout())
        .await
        .context("webhook server failed")?;

    info!("shutdown complete");
    Ok(())
}

/// Initializes tracing with environment-based filtering.
fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info,sendcloud=debug,tower_http=debug"))
        .unwrap_or_default();

    let fmt_layer = fmt::layer().with_target(true);

    tracing_subscriber::registry().with(filter).with(fmt_layer).init();
}

/// Event handler that logs each delivery event.
#[derive(Debug)]
struct LoggingHandler;

#[async_trait::async_trait]
impl EventHandler for LoggingHandler {
    async fn handle_event(&self, event: DeliveryEvent) {
        info!(
            event = %event.name,
            recipient = %event.recipient,
            message_id = %event.message_id,
            occurred_at = %event.occurred_at,
            reason = %event.reason,
            "delivery event"
        );
    }
}
