//! Daemon JSON-RPC layer.
//!
//! [`RpcTransport`] is the invocation seam: one method name plus positional
//! params in, the decoded JSON response out. [`HttpTransport`] implements it
//! over HTTP and [`DaemonClient`] layers one typed method per RPC call on top
//! of any transport.

mod client;
mod connection;
mod http_transport;
#[cfg(test)]
pub mod mock;
pub mod protocol;

pub use client::DaemonClient;
pub use connection::{RpcConfig, DEFAULT_RPC_URL};
pub use http_transport::{HttpTransport, CONTENT_TYPE_JSON_RPC};
pub use protocol::{JsonRpcRequest, RpcResponse};

use async_trait::async_trait;

use crate::error::CoreError;

/// Sends one JSON-RPC call and returns the decoded response body.
///
/// Implementations return daemon-reported errors as data: only transport
/// failures and undecodable bodies are `Err`. Interpreting `result` and
/// `error` is left to the caller.
#[async_trait]
pub trait RpcTransport: Send + Sync {
    async fn invoke(
        &self,
        method: &str,
        params: Vec<serde_json::Value>,
    ) -> Result<serde_json::Value, CoreError>;
}
