//! JSON-RPC API Layer
//!
//! Exposes the employee service as JSON-RPC 2.0 methods (`employee.*.v1`)
//! with camelCase wire DTOs.

pub mod error;
pub mod handler;
pub mod server;
pub mod types;

pub use server::{RpcServer, RpcServerConfig};
