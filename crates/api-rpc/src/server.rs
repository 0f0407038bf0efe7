//! JSON-RPC Server
//!
//! JSON-RPC 2.0 over HTTP. Binds to localhost unless configured otherwise.

use crate::handler::RpcHandler;
use crate::types::{CodeRequest, EmployeeDto};
use jsonrpsee::server::{Server, ServerHandle};
use jsonrpsee::RpcModule;
use roster_core::application::EmployeeService;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

pub const DEFAULT_RPC_HOST: &str = "127.0.0.1";
pub const DEFAULT_RPC_PORT: u16 = 9527;

/// RPC Server Configuration
#[derive(Debug, Clone)]
pub struct RpcServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for RpcServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_RPC_HOST.to_string(),
            port: DEFAULT_RPC_PORT,
        }
    }
}

/// RPC Server
pub struct RpcServer {
    config: RpcServerConfig,
    handler: Arc<RpcHandler>,
}

impl RpcServer {
    pub fn new(config: RpcServerConfig, service: Arc<EmployeeService>) -> Self {
        Self {
            config,
            handler: Arc::new(RpcHandler::new(service)),
        }
    }

    /// Build the method table
    fn module(&self) -> Result<RpcModule<()>, String> {
        let mut module = RpcModule::new(());

        let handler = self.handler.clone();
        module
            .register_async_method("employee.list.v1", move |_, _, _| {
                let handler = handler.clone();
                async move { handler.list().await }
            })
            .map_err(|e| e.to_string())?;

        let handler = self.handler.clone();
        module
            .register_async_method("employee.get.v1", move |params, _, _| {
                let handler = handler.clone();
                async move {
                    let req: CodeRequest = params.parse()?;
                    handler.get(req).await
                }
            })
            .map_err(|e| e.to_string())?;

        let handler = self.handler.clone();
        module
            .register_async_method("employee.add.v1", move |params, _, _| {
                let handler = handler.clone();
                async move {
                    let req: EmployeeDto = params.parse()?;
                    handler.add(req).await
                }
            })
            .map_err(|e| e.to_string())?;

        let handler = self.handler.clone();
        module
            .register_async_method("employee.update.v1", move |params, _, _| {
                let handler = handler.clone();
                async move {
                    let req: EmployeeDto = params.parse()?;
                    handler.update(req).await
                }
            })
            .map_err(|e| e.to_string())?;

        let handler = self.handler.clone();
        module
            .register_async_method("employee.delete.v1", move |params, _, _| {
                let handler = handler.clone();
                async move {
                    let req: CodeRequest = params.parse()?;
                    handler.delete(req).await
                }
            })
            .map_err(|e| e.to_string())?;

        Ok(module)
    }

    /// Start the JSON-RPC server. Returns the bound address (useful with port 0)
    /// and the handle used to stop it.
    pub async fn start(self) -> Result<(SocketAddr, ServerHandle), String> {
        let addr = format!("{}:{}", self.config.host, self.config.port);

        info!(
            host = %self.config.host,
            port = %self.config.port,
            "Starting JSON-RPC server"
        );

        let server = Server::builder()
            .build(&addr)
            .await
            .map_err(|e| format!("Failed to build server on {}: {}", addr, e))?;
        let local_addr = server
            .local_addr()
            .map_err(|e| format!("Failed to read bound address: {}", e))?;

        let module = self.module()?;
        info!(addr = %local_addr, "JSON-RPC server started successfully");

        Ok((local_addr, server.start(module)))
    }
}
