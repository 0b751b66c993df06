use bitcoin::Txid;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("RPC failure: {0}")]
    Rpc(#[from] RpcError),

    #[error("transaction not found: {0}")]
    TxNotFound(Txid),

    #[error("invalid client configuration: {0}")]
    Config(String),
}

/// Failures raised while talking to the daemon or mapping its responses.
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success status whose body could not be decoded as JSON.
    #[error("HTTP status {status} with non-JSON body: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("encode JSON-RPC request: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("invalid JSON-RPC response: {0}")]
    InvalidResponse(String),

    #[error("daemon error {code}: {message}")]
    Server { code: i64, message: String },

    #[error("`{method}` response has no result")]
    MissingResult { method: String },

    #[error("decode `{method}` result: {source}")]
    Decode {
        method: String,
        #[source]
        source: serde_json::Error,
    },
}
