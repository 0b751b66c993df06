//! Typed views of daemon responses.
//!
//! Every entity here is populated once by deserializing the `result` field of
//! a JSON-RPC response and is never mutated afterwards. Identity fields
//! (block hashes, txids) are taken verbatim from the daemon.

use bitcoin::{Amount, BlockHash, Script, ScriptBuf, TxMerkleNode, Txid, Wtxid};
use serde::{Deserialize, Serialize};

// ==============================================================================
// Block Height
// ==============================================================================

/// A block height, wrapped for type safety. Genesis is height zero, which is
/// also the `Default`.
///
/// `#[serde(transparent)]` keeps the wire form a bare integer.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BlockHeight(pub u32);

impl From<u32> for BlockHeight {
    fn from(h: u32) -> Self {
        Self(h)
    }
}

impl From<BlockHeight> for u32 {
    fn from(h: BlockHeight) -> Self {
        h.0
    }
}

impl std::ops::Deref for BlockHeight {
    type Target = u32;
    fn deref(&self) -> &u32 {
        &self.0
    }
}

impl std::fmt::Display for BlockHeight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

// ==============================================================================
// Block
// ==============================================================================

/// A block as returned by `getblock` with the default verbosity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub hash: BlockHash,
    /// `-1` when the block is not on the main chain.
    pub confirmations: i64,
    #[serde(rename = "strippedsize")]
    pub stripped_size: u64,
    pub size: u64,
    pub weight: u64,
    pub height: BlockHeight,
    pub version: i32,
    #[serde(rename = "versionHex")]
    pub version_hex: String,
    #[serde(rename = "merkleroot")]
    pub merkle_root: TxMerkleNode,
    #[serde(rename = "tx")]
    pub txids: Vec<Txid>,
    pub time: u64,
    #[serde(rename = "mediantime")]
    pub median_time: u64,
    pub nonce: u32,
    pub bits: String,
    pub difficulty: f64,
    #[serde(rename = "chainwork")]
    pub chain_work: String,
    #[serde(rename = "nTx", default, skip_serializing_if = "Option::is_none")]
    pub n_tx: Option<u64>,
    /// Absent for the genesis block.
    #[serde(
        rename = "previousblockhash",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub previous_block_hash: Option<BlockHash>,
    /// Absent for the current chain tip.
    #[serde(
        rename = "nextblockhash",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub next_block_hash: Option<BlockHash>,
}

// ==============================================================================
// Transaction Types
// ==============================================================================

/// A decoded transaction from `getrawtransaction <txid> 1`.
///
/// Block placement fields are absent while the transaction sits in the
/// mempool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub txid: Txid,
    pub hash: Wtxid,
    pub version: i32,
    pub size: u64,
    pub vsize: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u64>,
    pub locktime: u32,
    pub vin: Vec<TransactionInput>,
    pub vout: Vec<TransactionOutput>,
    pub hex: String,
    #[serde(rename = "blockhash", default, skip_serializing_if = "Option::is_none")]
    pub block_hash: Option<BlockHash>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmations: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<u64>,
    #[serde(rename = "blocktime", default, skip_serializing_if = "Option::is_none")]
    pub block_time: Option<u64>,
}

impl Transaction {
    /// A coinbase transaction has exactly one input and it is a coinbase input.
    pub fn is_coinbase(&self) -> bool {
        self.vin.len() == 1 && self.vin[0].is_coinbase()
    }
}

/// A transaction input. The daemon reports coinbase inputs with a `coinbase`
/// field instead of an outpoint and unlocking script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TransactionInput {
    Coinbase {
        /// Hex-encoded coinbase data.
        coinbase: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        txinwitness: Vec<String>,
        sequence: u32,
    },
    Spend {
        txid: Txid,
        vout: u32,
        #[serde(rename = "scriptSig")]
        script_sig: UnlockingScript,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        txinwitness: Vec<String>,
        sequence: u32,
    },
}

impl TransactionInput {
    pub fn sequence(&self) -> u32 {
        match self {
            Self::Coinbase { sequence, .. } | Self::Spend { sequence, .. } => *sequence,
        }
    }

    pub fn is_coinbase(&self) -> bool {
        matches!(self, Self::Coinbase { .. })
    }

    /// The outpoint being spent. `None` for coinbase inputs.
    pub fn prevout(&self) -> Option<bitcoin::OutPoint> {
        match self {
            Self::Coinbase { .. } => None,
            Self::Spend { txid, vout, .. } => Some(bitcoin::OutPoint::new(*txid, *vout)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlockingScript {
    pub asm: String,
    pub hex: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionOutput {
    #[serde(with = "btc_amount")]
    pub value: Amount,
    pub n: u32,
    #[serde(rename = "scriptPubKey")]
    pub script_pub_key: LockingScript,
}

/// The `scriptPubKey` object of an output.
///
/// Older daemons report `reqSigs` and an `addresses` list; newer ones report a
/// single `address`. Both shapes decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockingScript {
    pub asm: String,
    pub hex: String,
    #[serde(rename = "reqSigs", default, skip_serializing_if = "Option::is_none")]
    pub req_sigs: Option<u32>,
    /// Script type tag as named by the daemon (`pubkeyhash`, `witness_v0_keyhash`, ...).
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub addresses: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl LockingScript {
    /// Decode the script bytes. `None` only if the daemon sent malformed hex.
    pub fn script(&self) -> Option<ScriptBuf> {
        ScriptBuf::from_hex(&self.hex).ok()
    }

    /// Classify the script locally from its bytes rather than trusting the
    /// daemon's tag. Malformed hex classifies as `Unknown`.
    pub fn script_type(&self) -> ScriptType {
        self.script()
            .map(|script| classify_script(&script))
            .unwrap_or(ScriptType::Unknown)
    }
}

// ==============================================================================
// Account
// ==============================================================================

/// Result of `getaccount`. The shape is daemon-defined, so it is kept opaque.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Account(pub serde_json::Value);

// ==============================================================================
// Script Type Classification
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptType {
    P2pk,
    P2pkh,
    P2sh,
    P2wpkh,
    P2wsh,
    P2tr,
    BareMultisig,
    OpReturn,
    Unknown,
}

impl std::fmt::Display for ScriptType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::P2pk => write!(f, "p2pk"),
            Self::P2pkh => write!(f, "p2pkh"),
            Self::P2sh => write!(f, "p2sh"),
            Self::P2wpkh => write!(f, "p2wpkh"),
            Self::P2wsh => write!(f, "p2wsh"),
            Self::P2tr => write!(f, "p2tr"),
            Self::BareMultisig => write!(f, "bare_multisig"),
            Self::OpReturn => write!(f, "op_return"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Classify a script with the `bitcoin` crate's template checks.
#[must_use]
pub fn classify_script(script: &Script) -> ScriptType {
    if script.is_p2pkh() {
        ScriptType::P2pkh
    } else if script.is_p2sh() {
        ScriptType::P2sh
    } else if script.is_p2wpkh() {
        ScriptType::P2wpkh
    } else if script.is_p2wsh() {
        ScriptType::P2wsh
    } else if script.is_p2tr() {
        ScriptType::P2tr
    } else if script.is_p2pk() {
        ScriptType::P2pk
    } else if script.is_multisig() {
        ScriptType::BareMultisig
    } else if script.is_op_return() {
        ScriptType::OpReturn
    } else {
        ScriptType::Unknown
    }
}

// ==============================================================================
// BTC Amount (de)serialization
// ==============================================================================

/// Daemons report amounts as BTC floats. Numbers go through
/// `Amount::from_float_in` so scientific notation decodes; strings go through
/// `Amount::from_str_in`.
mod btc_amount {
    use bitcoin::{Amount, Denomination};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(amount: &Amount, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_f64(amount.to_btc())
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Amount, D::Error> {
        let value = serde_json::Value::deserialize(d)?;
        parse(&value).map_err(D::Error::custom)
    }

    pub(super) fn parse(value: &serde_json::Value) -> Result<Amount, String> {
        match value {
            serde_json::Value::Number(n) => {
                let parsed = n
                    .as_f64()
                    .ok_or_else(|| format!("invalid BTC amount `{value}`"))?;
                Amount::from_float_in(parsed, Denomination::Bitcoin)
                    .map_err(|e| format!("invalid BTC amount `{value}`: {e}"))
            }
            serde_json::Value::String(s) => Amount::from_str_in(s, Denomination::Bitcoin)
                .map_err(|e| format!("invalid BTC amount `{s}`: {e}")),
            _ => Err(format!("expected numeric BTC amount, got: {value}")),
        }
    }
}
