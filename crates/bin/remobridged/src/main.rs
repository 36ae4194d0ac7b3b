//! # remobridged — remobridge daemon
//!
//! Composition root that wires the adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Construct the cloud API client (adapter)
//! - Fetch the initial inventory and build the accessory registry; a failure
//!   here is fatal, the process exits non-zero before serving anything
//! - Spawn the periodic refresh cycle
//! - Build the axum router, bind to a TCP port, and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::sync::Arc;
use std::time::Duration;

use remobridge_adapter_cloud_http::{CloudClient, CloudConfig};
use remobridge_adapter_http_axum::router;
use remobridge_adapter_http_axum::state::AppState;
use remobridge_app::event_bus::EventBus;
use remobridge_app::ports::RemoteApi;
use remobridge_app::registry::Bridge;
use remobridge_app::sync::SyncCycle;

use crate::config::Config;

/// Bridge display name, shown as the accessory container's identity.
const BRIDGE_NAME: &str = "remobridge";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;
    init_tracing(&config.logging.filter);

    let cloud_config = CloudConfig::new(&config.cloud.base_url, config.access_token()?)?;
    let api = Arc::new(CloudClient::new(&cloud_config)?);

    // Initial fetch is the startup gate: a cloud failure here is fatal.
    let user = api.get_user().await?;
    tracing::info!(nickname = %user.nickname, "authenticated against the cloud API");
    let snapshot = api.fetch_snapshot().await?;

    let events = EventBus::default();
    let bridge = Arc::new(Bridge::from_snapshot(&api, &events, BRIDGE_NAME, &snapshot)?);
    tracing::info!(
        accessories = bridge.accessories().len(),
        "accessory registry built"
    );

    let cycle = SyncCycle::new(
        Arc::clone(&api),
        Arc::clone(&bridge),
        Duration::from_secs(config.sync.interval_secs),
    );
    let _refresh = cycle.start();

    let app = router::build(AppState::new(bridge, events));
    let bind_addr = config.bind_addr();
    tracing::info!(addr = %bind_addr, "remobridged listening");

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn init_tracing(filter: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(%err, "failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => tracing::error!(%err, "failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received, draining connections");
}
