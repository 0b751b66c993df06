use bitcoin::{BlockHash, Txid};
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::error::{CoreError, RpcError};
use crate::types::{Account, Block, BlockHeight, Transaction};

use super::connection::RpcConfig;
use super::http_transport::HttpTransport;
use super::protocol::decode_result;
use super::RpcTransport;

/// Typed client for a Bitcoin Core compatible daemon.
///
/// Each method issues exactly one RPC call. Methods returning a typed value
/// unwrap `result` and turn a populated `error` into [`RpcError::Server`];
/// methods returning `serde_json::Value` hand back the whole response
/// envelope untouched.
pub struct DaemonClient<T = HttpTransport> {
    transport: T,
}

impl DaemonClient<HttpTransport> {
    pub fn new(config: &RpcConfig) -> Result<Self, CoreError> {
        Ok(Self::with_transport(HttpTransport::new(config)?))
    }
}

impl<T: RpcTransport> DaemonClient<T> {
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn call<R: DeserializeOwned>(
        &self,
        method: &str,
        params: Vec<serde_json::Value>,
    ) -> Result<R, CoreError> {
        let response = self.transport.invoke(method, params).await?;
        decode_result(method, response)
    }

    /// Hash of the main-chain block at `height`. Pass `BlockHeight::default()`
    /// for the genesis block.
    pub async fn get_block_hash(&self, height: BlockHeight) -> Result<BlockHash, CoreError> {
        self.call("getblockhash", vec![json!(height.0)]).await
    }

    /// Hash of the current chain tip.
    pub async fn get_best_block_hash(&self) -> Result<BlockHash, CoreError> {
        self.call("getbestblockhash", Vec::new()).await
    }

    pub async fn get_block(&self, block_hash: &BlockHash) -> Result<Block, CoreError> {
        self.call("getblock", vec![json!(block_hash.to_string())]).await
    }

    /// Raw `getinfo` response. Removed from recent Bitcoin Core releases, so
    /// the envelope's `error` field should be checked.
    pub async fn get_info(&self) -> Result<serde_json::Value, CoreError> {
        self.transport.invoke("getinfo", Vec::new()).await
    }

    /// Raw `gettransaction` response. Only transactions known to the daemon's
    /// wallet resolve; use [`Self::get_raw_transaction`] for arbitrary ones.
    pub async fn get_transaction(&self, txid: &Txid) -> Result<serde_json::Value, CoreError> {
        self.transport
            .invoke("gettransaction", vec![json!(txid.to_string())])
            .await
    }

    /// Decoded transaction by txid.
    ///
    /// Confirmed transactions outside the daemon's wallet only resolve when
    /// the daemon runs with `-txindex=1`.
    pub async fn get_raw_transaction(&self, txid: &Txid) -> Result<Transaction, CoreError> {
        self.call("getrawtransaction", vec![json!(txid.to_string()), json!(1)])
            .await
            .map_err(|err| normalize_getrawtransaction_error(txid, err))
    }

    /// Serialized transaction hex, the non-verbose form of `getrawtransaction`.
    pub async fn get_raw_transaction_hex(&self, txid: &Txid) -> Result<String, CoreError> {
        self.call("getrawtransaction", vec![json!(txid.to_string()), json!(0)])
            .await
            .map_err(|err| normalize_getrawtransaction_error(txid, err))
    }

    pub async fn get_block_count(&self) -> Result<u64, CoreError> {
        self.call("getblockcount", Vec::new()).await
    }

    pub async fn get_difficulty(&self) -> Result<f64, CoreError> {
        self.call("getdifficulty", Vec::new()).await
    }

    /// Raw `getrawmempool` response; `result` is a txid array by default.
    pub async fn get_raw_mempool(&self) -> Result<serde_json::Value, CoreError> {
        self.transport.invoke("getrawmempool", Vec::new()).await
    }

    pub async fn get_account(&self) -> Result<Account, CoreError> {
        self.call("getaccount", Vec::new()).await
    }
}

// ==============================================================================
// RPC Error Normalization
// ==============================================================================

/// Convert "missing tx" daemon errors into `TxNotFound`, leaving every other
/// failure as-is.
fn normalize_getrawtransaction_error(txid: &Txid, err: CoreError) -> CoreError {
    match err {
        CoreError::Rpc(RpcError::Server { code, message })
            if is_tx_not_found_server_error(code, &message) =>
        {
            CoreError::TxNotFound(*txid)
        }
        other => other,
    }
}

fn is_tx_not_found_server_error(code: i64, message: &str) -> bool {
    if code != -5 {
        return false;
    }

    let msg = message.to_ascii_lowercase();
    msg.contains("not found") || msg.contains("no such mempool or blockchain transaction")
}
