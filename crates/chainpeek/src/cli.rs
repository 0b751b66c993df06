use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// chainpeek: query blocks, transactions, and chain metadata from a Bitcoin
/// Core compatible RPC endpoint.
#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// Daemon RPC URL.
    #[arg(long, default_value = chainpeek_core::rpc::DEFAULT_RPC_URL, env = "CHAINPEEK_RPC_URL")]
    pub rpc_url: String,

    /// RPC username. Ignored unless --rpc-pass is also set.
    #[arg(long, env = "CHAINPEEK_RPC_USER")]
    pub rpc_user: Option<String>,

    /// RPC password. Ignored unless --rpc-user is also set.
    #[arg(long, env = "CHAINPEEK_RPC_PASS")]
    pub rpc_pass: Option<String>,

    /// Cookie file written by the daemon, used when no user/pass is given.
    #[arg(long, env = "CHAINPEEK_RPC_COOKIE_FILE")]
    pub rpc_cookie_file: Option<PathBuf>,

    /// Per-request timeout in seconds. No timeout when omitted.
    #[arg(
        long,
        env = "CHAINPEEK_TIMEOUT_SECS",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Hash of the block at a height (genesis when omitted).
    BlockHash {
        #[arg(default_value = "0")]
        height: u32,
    },
    /// Hash of the current chain tip.
    BestBlockHash,
    /// Decoded block by hash.
    Block { hash: bitcoin::BlockHash },
    /// Raw `getinfo` response.
    Info,
    /// Raw `gettransaction` response (wallet transactions only).
    Transaction { txid: bitcoin::Txid },
    /// Decoded transaction by txid (requires -txindex on the daemon).
    RawTransaction {
        txid: bitcoin::Txid,
        /// Print the serialized hex instead of the decoded transaction.
        #[arg(long)]
        hex: bool,
    },
    /// Number of blocks in the longest chain.
    BlockCount,
    /// Current proof-of-work difficulty.
    Difficulty,
    /// Raw `getrawmempool` response.
    RawMempool,
    /// Raw `getaccount` result.
    Account,
}
