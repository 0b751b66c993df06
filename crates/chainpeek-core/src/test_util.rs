//! Shared fixtures for `chainpeek-core` unit tests.
//!
//! Builds daemon-shaped JSON payloads (`getblock`, `getrawtransaction`) and
//! deterministic hashes so tests across modules decode the same data.

use bitcoin::hashes::Hash;
use bitcoin::{BlockHash, Txid};

// ==============================================================================
// Hash Helpers
// ==============================================================================

/// Create a deterministic `Txid` from a single distinguishing byte.
pub fn txid_from_byte(b: u8) -> Txid {
    let mut bytes = [0u8; 32];
    bytes[0] = b;
    Txid::from_byte_array(bytes)
}

/// Create a deterministic `BlockHash` from a single distinguishing byte.
pub fn block_hash_from_byte(b: u8) -> BlockHash {
    let mut bytes = [0u8; 32];
    bytes[0] = b;
    BlockHash::from_byte_array(bytes)
}

// ==============================================================================
// Response Builders
// ==============================================================================

/// Wrap a result in the daemon's response envelope.
pub fn ok_response(result: serde_json::Value) -> serde_json::Value {
    serde_json::json!({ "result": result, "error": null, "id": "1" })
}

/// Build a daemon error envelope with a null result.
pub fn error_response(code: i64, message: &str) -> serde_json::Value {
    serde_json::json!({
        "result": null,
        "error": { "code": code, "message": message },
        "id": "1"
    })
}

/// A `getblock` result at the given height holding one coinbase txid.
pub fn block_json(height: u32) -> serde_json::Value {
    serde_json::json!({
        "hash": block_hash_from_byte(0x22).to_string(),
        "confirmations": 3,
        "strippedsize": 215,
        "size": 251,
        "weight": 896,
        "height": height,
        "version": 536870912,
        "versionHex": "20000000",
        "merkleroot": txid_from_byte(0x33).to_string(),
        "tx": [txid_from_byte(0x33).to_string()],
        "time": 1_700_000_000u64,
        "mediantime": 1_699_999_000u64,
        "nonce": 2_083_236_893u32,
        "bits": "207fffff",
        "difficulty": 4.656542373906925e-10,
        "chainwork": "0000000000000000000000000000000000000000000000000000000000000202",
        "nTx": 1,
        "previousblockhash": block_hash_from_byte(0x11).to_string()
    })
}

/// A confirmed coinbase transaction paying 50 BTC to a P2WPKH output.
pub fn coinbase_tx_json() -> serde_json::Value {
    serde_json::json!({
        "txid": txid_from_byte(0x33).to_string(),
        "hash": txid_from_byte(0x34).to_string(),
        "version": 2,
        "size": 168,
        "vsize": 141,
        "weight": 564,
        "locktime": 0,
        "vin": [{
            "coinbase": "0101",
            "txinwitness": ["0000000000000000000000000000000000000000000000000000000000000000"],
            "sequence": 4_294_967_295u32
        }],
        "vout": [{
            "value": 50.0,
            "n": 0,
            "scriptPubKey": {
                "asm": "0 0102030405060708090a0b0c0d0e0f1011121314",
                "hex": "00140102030405060708090a0b0c0d0e0f1011121314",
                "address": "bcrt1qqypqxpq9qcrsszg2pvxq6rs0zqg3yyc5wdn4lv",
                "type": "witness_v0_keyhash"
            }
        }],
        "hex": "02000000000101",
        "blockhash": block_hash_from_byte(0x22).to_string(),
        "confirmations": 3,
        "time": 1_700_000_000u64,
        "blocktime": 1_700_000_000u64
    })
}

/// An unconfirmed transaction spending `txid_from_byte(0x01):1`.
pub fn spend_tx_json() -> serde_json::Value {
    serde_json::json!({
        "txid": txid_from_byte(0x44).to_string(),
        "hash": txid_from_byte(0x44).to_string(),
        "version": 1,
        "size": 191,
        "vsize": 191,
        "locktime": 0,
        "vin": [{
            "txid": txid_from_byte(0x01).to_string(),
            "vout": 1,
            "scriptSig": { "asm": "3044 02ab", "hex": "47304402" },
            "sequence": 4_294_967_293u32
        }],
        "vout": [{
            "value": 0.00001,
            "n": 0,
            "scriptPubKey": {
                "asm": "OP_DUP OP_HASH160 0102030405060708090a0b0c0d0e0f1011121314 OP_EQUALVERIFY OP_CHECKSIG",
                "hex": "76a9140102030405060708090a0b0c0d0e0f101112131488ac",
                "reqSigs": 1,
                "type": "pubkeyhash",
                "addresses": ["mfWxJ45yp2SFn7UciZyNpvDKrzbhyfKrY8"]
            }
        }],
        "hex": "0100000001"
    })
}
