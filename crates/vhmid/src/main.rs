//! vhmid - Vehicle HMI Daemon
//!
//! Decodes broadcast CAN telemetry into a live vehicle snapshot and serves
//! it over a read-only REST API.
//!
//! Usage:
//!   vhmid [OPTIONS] [config.toml]
//!
//! If no config file is provided, uses the mock bus for demo purposes.

mod config;

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vhmi_api::{create_router, AppState};
use vhmi_can::{create_bus, BusConfig, BusSource, CanService, SocketCanConfig};
use vhmi_core::{ArrivalTable, Dispatcher, Integrity, StalenessMonitor, StateStore};

use crate::config::AppConfig;

/// Vehicle HMI daemon
#[derive(Parser, Debug)]
#[command(name = "vhmid", version, about)]
struct Args {
    /// Daemon config file (TOML)
    config: Option<PathBuf>,

    /// Read from this SocketCAN interface, overriding the [bus] section
    #[arg(short, long, env = "VHMI_INTERFACE")]
    interface: Option<String>,

    /// HTTP port, overriding [server].port
    #[arg(short, long, env = "VHMI_PORT")]
    port: Option<u16>,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

fn init_logging(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "vhmid=info,vhmi_can=info,vhmi_core=info,vhmi_api=info".into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.json_logs);

    tracing::info!("Starting vhmid (Vehicle HMI Daemon)");

    let mut config = match args.config {
        Some(ref path) => {
            tracing::info!("Loading config from: {}", path.display());
            AppConfig::load(path)?
        }
        None => {
            tracing::info!("No config file provided, using mock bus");
            AppConfig::default()
        }
    };

    if let Some(interface) = args.interface {
        config.bus = BusConfig::SocketCan(SocketCanConfig { interface });
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let bus = create_bus(&config.bus)
        .await
        .with_context(|| format!("Failed to open bus on {}", config.bus.channel()))?;
    tracing::info!(channel = %bus.channel(), "Bus opened");

    run(config, bus, shutdown_signal()).await?;
    tracing::info!("vhmid stopped");
    Ok(())
}

/// Run the CAN service and the HTTP server until `shutdown` resolves
///
/// The service is shut down, closing the bus, on every exit path.
async fn run(
    config: AppConfig,
    bus: Arc<dyn BusSource>,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    // Shared state: written by the receive loop, read by the API
    let store = Arc::new(StateStore::new());
    let arrivals = Arc::new(ArrivalTable::new());
    let integrity = Arc::new(Integrity::new());

    let dispatcher = Dispatcher::new(store.clone(), arrivals.clone(), integrity.clone());
    let monitor = StalenessMonitor::new(&config.staleness, arrivals, integrity.clone())?;
    let service = CanService::new(bus, dispatcher, monitor, config.service.clone()).spawn();

    let app = create_router(AppState::new(store, integrity));

    let addr = config.server.addr();
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            service.shutdown().await;
            return Err(e).with_context(|| format!("Failed to bind {}", addr));
        }
    };
    tracing::info!("Listening on http://{}", addr);

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await;

    tracing::info!("Shutting down CAN service");
    service.shutdown().await;

    served?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        // Without a signal handler the server runs until killed
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};
    use vhmi_can::MockBus;

    fn local_config(port: u16) -> AppConfig {
        let mut config = AppConfig::default();
        config.server.bind = IpAddr::V4(Ipv4Addr::LOCALHOST);
        config.server.port = port;
        config
    }

    #[tokio::test]
    async fn test_bind_failure_closes_bus() {
        let taken = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = taken.local_addr().unwrap().port();
        let bus = Arc::new(MockBus::new("mock0"));

        let result = run(local_config(port), bus.clone(), std::future::pending()).await;

        assert!(result.is_err());
        assert!(!bus.is_open());
    }

    #[tokio::test]
    async fn test_shutdown_closes_bus() {
        let bus = Arc::new(MockBus::new("mock0"));

        run(local_config(0), bus.clone(), async {}).await.unwrap();

        assert!(!bus.is_open());
    }
}
