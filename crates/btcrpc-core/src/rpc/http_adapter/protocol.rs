use serde_json::value::RawValue;

use crate::error::{CoreError, DecodeStage};

/// Every call is a single in-flight request, so the id is never correlated.
pub(crate) const REQUEST_ID: u64 = 1;
pub(crate) const JSONRPC_VERSION: &str = "1.0";

#[derive(Debug, serde::Serialize)]
pub(crate) struct JsonRpcRequest<'a> {
    pub(crate) jsonrpc: &'a str,
    pub(crate) id: u64,
    pub(crate) method: &'a str,
    pub(crate) params: &'a [serde_json::Value],
}

/// Response envelope. All three members must be present; `result` is kept
/// as raw bytes so operation-specific decoding sees exactly what the node sent.
#[derive(Debug, serde::Deserialize)]
pub(crate) struct JsonRpcResponse {
    pub(crate) result: Box<RawValue>,
    pub(crate) error: serde_json::Value,
    pub(crate) id: serde_json::Value,
}

pub(crate) fn encode_request(
    method: &str,
    params: &[serde_json::Value],
) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(&JsonRpcRequest {
        jsonrpc: JSONRPC_VERSION,
        id: REQUEST_ID,
        method,
        params,
    })
}

pub(crate) fn decode_response(body: &[u8]) -> Result<JsonRpcResponse, serde_json::Error> {
    serde_json::from_slice(body)
}

/// Parse a JSON-RPC error value into a structured `CoreError`.
///
/// Bitcoin Core reports errors as `{"code": <int>, "message": <string>}`.
/// Anything else is treated as an envelope the client cannot interpret.
pub(crate) fn parse_jsonrpc_error(method: &str, err: serde_json::Value) -> CoreError {
    #[derive(serde::Deserialize)]
    struct JsonRpcError {
        code: i64,
        message: String,
    }

    match serde_json::from_value::<JsonRpcError>(err.clone()) {
        Ok(parsed) => CoreError::Rpc {
            method: method.to_owned(),
            code: parsed.code,
            message: parsed.message,
        },
        Err(_) => CoreError::decode(
            method,
            DecodeStage::Envelope,
            format!("non-standard JSON-RPC error: {err}"),
        ),
    }
}
