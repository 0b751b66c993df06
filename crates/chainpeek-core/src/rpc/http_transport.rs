use async_trait::async_trait;
use reqwest::header;
use tracing::{debug, trace, warn};

use crate::error::{CoreError, RpcError};

use super::connection::{parse_connection, resolve_auth, RpcConfig};
use super::protocol::JsonRpcRequest;
use super::RpcTransport;

pub const CONTENT_TYPE_JSON_RPC: &str = "application/json-rpc";

/// JSON-RPC transport over HTTP(S).
///
/// Every call is a single POST on a fresh connection: idle connections are
/// never kept, nothing is retried, and no timeout applies unless the config
/// sets one.
pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
    auth: Option<(String, String)>,
}

impl HttpTransport {
    pub fn new(config: &RpcConfig) -> Result<Self, CoreError> {
        let auth = resolve_auth(
            config.user.as_deref(),
            config.pass.as_deref(),
            config.cookie_file.as_deref(),
        )?;
        let url = parse_connection(&config.url)?;

        let mut builder = reqwest::Client::builder()
            .pool_max_idle_per_host(0)
            .tcp_nodelay(true);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| CoreError::Config(format!("build HTTP client: {e}")))?;

        Ok(Self { client, url, auth })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn has_auth(&self) -> bool {
        self.auth.is_some()
    }

    fn build_request(
        &self,
        method: &str,
        params: &[serde_json::Value],
    ) -> Result<reqwest::Request, CoreError> {
        let body = serde_json::to_vec(&JsonRpcRequest::new(method, params))
            .map_err(RpcError::Encode)?;

        let mut builder = self
            .client
            .post(&self.url)
            .header(header::CONTENT_TYPE, CONTENT_TYPE_JSON_RPC)
            .body(body);
        if let Some((ref user, ref pass)) = self.auth {
            builder = builder.basic_auth(user, Some(pass));
        }

        Ok(builder.build().map_err(RpcError::Transport)?)
    }
}

#[async_trait]
impl RpcTransport for HttpTransport {
    async fn invoke(
        &self,
        method: &str,
        params: Vec<serde_json::Value>,
    ) -> Result<serde_json::Value, CoreError> {
        debug!(rpc.method = method, rpc.params = params.len(), "rpc call");
        let request = self.build_request(method, &params)?;

        let response = self
            .client
            .execute(request)
            .await
            .map_err(RpcError::Transport)?;
        let status = response.status();

        let body = response.text().await.map_err(RpcError::Transport)?;
        debug!(rpc.method = method, %status, body_len = body.len(), "rpc response");
        trace!(rpc.method = method, body = %body, "rpc response body");

        // Daemons answer failed calls with a non-2xx status and a JSON error
        // body. That body is handed back as data, like a success.
        match serde_json::from_str::<serde_json::Value>(&body) {
            Ok(decoded) => {
                if !status.is_success() {
                    warn!(
                        rpc.method = method,
                        rpc.params = %serde_json::Value::from(params),
                        %status,
                        response = %decoded,
                        "rpc call returned error status"
                    );
                }
                Ok(decoded)
            }
            Err(e) if status.is_success() => Err(RpcError::InvalidResponse(format!(
                "decode JSON-RPC response: {e}; body={body}"
            ))
            .into()),
            Err(_) => {
                warn!(rpc.method = method, %status, "rpc call failed with non-JSON body");
                Err(RpcError::HttpStatus {
                    status: status.as_u16(),
                    body,
                }
                .into())
            }
        }
    }
}
