//! Shared test helpers for `btcrpc-core` unit tests.
//!
//! Canned response envelopes, deterministic hashes, and a client wired to a
//! [`MockTransport`] so tests across modules build fixtures the same way.

use bitcoin::hashes::Hash;
use bitcoin::{BlockHash, Txid};

use crate::rpc::mock::MockTransport;
use crate::rpc::{Auth, RpcClient};

/// Base URL of every [`mock_client`].
pub const MOCK_BASE: &str = "http://127.0.0.1:18443";

// ==============================================================================
// Hash Helpers
// ==============================================================================

/// Create a deterministic `Txid` from a single distinguishing byte.
pub fn txid_from_byte(b: u8) -> Txid {
    let mut bytes = [0u8; 32];
    bytes[0] = b;
    Txid::from_byte_array(bytes)
}

pub fn block_hash_from_byte(b: u8) -> BlockHash {
    let mut bytes = [0u8; 32];
    bytes[31] = b;
    BlockHash::from_byte_array(bytes)
}

// ==============================================================================
// Envelopes
// ==============================================================================

/// Successful reply carrying `payload` (raw JSON text) as `result`.
pub fn result_envelope(payload: &str) -> String {
    format!(r#"{{"result":{payload},"error":null,"id":1}}"#)
}

/// Failed reply carrying a node error.
pub fn error_envelope(code: i64, message: &str) -> String {
    serde_json::json!({
        "result": null,
        "error": {"code": code, "message": message},
        "id": 1
    })
    .to_string()
}

// ==============================================================================
// Clients
// ==============================================================================

pub fn mock_client(transport: MockTransport) -> RpcClient {
    RpcClient::with_transport(MOCK_BASE, Some(Auth::new("alice", "secret")), transport)
        .expect("mock client must construct")
}
