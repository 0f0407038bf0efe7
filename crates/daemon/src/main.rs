//! Roster - Server Entry Point
//! SQLite-backed employee records exposed over JSON-RPC

mod config;

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{DaemonConfig, LogFormat};
use roster_api_rpc::{RpcServer, RpcServerConfig};
use roster_core::application::EmployeeService;
use roster_infra_sqlite::{create_pool, run_migrations, SqliteEmployeeRepository};

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load configuration
    let config = DaemonConfig::load()?;

    // 2. Initialize logging
    init_logging(config.log_format)?;
    info!("Roster v{} starting...", roster_core::VERSION);

    // 3. Initialize database
    if let Some(parent) = config.database_path().and_then(|p| Path::new(p).parent()) {
        std::fs::create_dir_all(parent)?;
    }
    info!(database_url = %config.database_url, "Initializing database...");

    let pool = create_pool(&config.database_url, config.max_connections)
        .await
        .map_err(|e| anyhow::anyhow!("DB pool creation failed: {}", e))?;
    run_migrations(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;

    // 4. Setup dependencies (DI wiring)
    let repo = Arc::new(SqliteEmployeeRepository::new(pool.clone()));
    let service = Arc::new(EmployeeService::new(repo.clone(), repo));

    // 5. Start JSON-RPC server
    let rpc_config = RpcServerConfig {
        host: config.rpc_host.clone(),
        port: config.rpc_port,
    };
    let (addr, rpc_handle) = RpcServer::new(rpc_config, service)
        .start()
        .await
        .map_err(|e| anyhow::anyhow!("RPC server start failed: {}", e))?;

    info!(addr = %addr, "System ready. Press Ctrl+C to shutdown");

    // 6. Wait for shutdown signal
    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received. Exiting gracefully...");

    // 7. Graceful shutdown
    rpc_handle
        .stop()
        .map_err(|e| anyhow::anyhow!("RPC server stop failed: {}", e))?;
    rpc_handle.stopped().await;
    pool.close().await;

    info!("Shutdown complete.");
    Ok(())
}

/// `RUST_LOG` wins; otherwise `roster` crates log at info
fn init_logging(format: LogFormat) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("roster=info"))?;

    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json())
                .init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}
