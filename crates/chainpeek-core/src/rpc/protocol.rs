//! JSON-RPC 1.0 envelopes and the shared result decoder.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, RpcError};

pub const JSONRPC_VERSION: &str = "1.0";
pub const REQUEST_ID: &str = "1";

/// Request body sent for every call. `params` is always serialized, so an
/// empty list goes out as `[]`.
#[derive(Debug, Serialize)]
pub struct JsonRpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub id: &'static str,
    pub method: &'a str,
    pub params: &'a [serde_json::Value],
}

impl<'a> JsonRpcRequest<'a> {
    pub fn new(method: &'a str, params: &'a [serde_json::Value]) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id: REQUEST_ID,
            method,
            params,
        }
    }
}

/// The conventional response envelope. A non-null `error` signals a
/// daemon-reported failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcResponse<T> {
    pub result: Option<T>,
    pub error: Option<serde_json::Value>,
    /// Echoed request id. Not checked, so any JSON value is accepted.
    pub id: Option<serde_json::Value>,
}

/// Unwrap the `result` field of a decoded response into `T`.
///
/// A populated `error` wins over any result, a null or missing `result` is
/// `MissingResult`, and a shape mismatch is `Decode`.
pub(crate) fn decode_result<T: DeserializeOwned>(
    method: &str,
    response: serde_json::Value,
) -> Result<T, CoreError> {
    let envelope: RpcResponse<T> =
        serde_json::from_value(response).map_err(|source| RpcError::Decode {
            method: method.to_owned(),
            source,
        })?;

    if let Some(err) = envelope.error {
        return Err(parse_jsonrpc_error(err));
    }

    envelope.result.ok_or_else(|| {
        RpcError::MissingResult {
            method: method.to_owned(),
        }
        .into()
    })
}

/// Parse a JSON-RPC error value into a structured `CoreError`.
///
/// Daemon errors look like `{"code": <int>, "message": <string>}`. Anything
/// else falls back to `InvalidResponse` carrying the raw JSON.
pub(crate) fn parse_jsonrpc_error(err: serde_json::Value) -> CoreError {
    #[derive(Deserialize)]
    struct JsonRpcError {
        code: i64,
        message: String,
    }

    if let Ok(parsed) = serde_json::from_value::<JsonRpcError>(err.clone()) {
        CoreError::Rpc(RpcError::Server {
            code: parsed.code,
            message: parsed.message,
        })
    } else {
        CoreError::Rpc(RpcError::InvalidResponse(format!(
            "non-standard JSON-RPC error: {err}"
        )))
    }
}
