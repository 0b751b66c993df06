pub mod error;
pub mod rpc;
pub mod types;

#[cfg(test)]
mod test_util;

pub use error::{CoreError, RpcError};
pub use rpc::{DaemonClient, HttpTransport, RpcConfig, RpcTransport};
pub use types::{
    Account, Block, BlockHeight, LockingScript, ScriptType, Transaction, TransactionInput,
    TransactionOutput, UnlockingScript,
};
