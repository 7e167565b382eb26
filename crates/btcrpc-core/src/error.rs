use std::fmt;

use reqwest::StatusCode;

/// Failure of the HTTP layer underneath a JSON-RPC call.
///
/// None of these variants mean the node looked at the request; they are the
/// only failures worth retrying without changing the request.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("HTTP status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("read response body: {0}")]
    Body(#[source] reqwest::Error),
}

impl TransportError {
    /// Extract a JSON-RPC error from the captured body of a non-2xx reply.
    ///
    /// Bitcoin Core answers failed 1.0 requests with HTTP 500 and a regular
    /// error envelope. The failure still counts as a transport failure; this
    /// only recovers the node's code and message for diagnostics.
    pub fn embedded_rpc_error(&self) -> Option<(i64, String)> {
        let TransportError::Status { body, .. } = self else {
            return None;
        };

        #[derive(serde::Deserialize)]
        struct Embedded {
            error: Option<EmbeddedError>,
        }
        #[derive(serde::Deserialize)]
        struct EmbeddedError {
            code: i64,
            message: String,
        }

        serde_json::from_str::<Embedded>(body)
            .ok()
            .and_then(|e| e.error)
            .map(|e| (e.code, e.message))
    }
}

/// Where in the request/response cycle a codec failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStage {
    /// Serializing the request envelope.
    Encode,
    /// Parsing the response envelope.
    Envelope,
    /// Decoding the `result` payload into the operation's expected shape.
    Result,
}

impl fmt::Display for DecodeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeStage::Encode => f.write_str("encode request"),
            DecodeStage::Envelope => f.write_str("decode response envelope"),
            DecodeStage::Result => f.write_str("decode result"),
        }
    }
}

/// Coarse classification of [`CoreError`], for callers that pick a policy
/// (retry, surface, abort) per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Rpc,
    Decode,
    Usage,
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("`{method}` transport failure: {source}")]
    Transport {
        method: String,
        #[source]
        source: TransportError,
    },

    #[error("`{method}` RPC error {code}: {message}")]
    Rpc {
        method: String,
        code: i64,
        message: String,
    },

    #[error("`{method}` failed to {stage}: {message}")]
    Decode {
        method: String,
        stage: DecodeStage,
        message: String,
    },

    #[error("invalid argument for `{method}`: {message}")]
    InvalidArgument { method: String, message: String },

    #[error("invalid client configuration: {0}")]
    Config(String),
}

impl CoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::Transport { .. } => ErrorKind::Transport,
            CoreError::Rpc { .. } => ErrorKind::Rpc,
            CoreError::Decode { .. } => ErrorKind::Decode,
            CoreError::InvalidArgument { .. } | CoreError::Config(_) => ErrorKind::Usage,
        }
    }

    /// Only transport failures may succeed when repeated unchanged.
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::Transport
    }

    /// The RPC method the failure belongs to, if any.
    pub fn method(&self) -> Option<&str> {
        match self {
            CoreError::Transport { method, .. }
            | CoreError::Rpc { method, .. }
            | CoreError::Decode { method, .. }
            | CoreError::InvalidArgument { method, .. } => Some(method),
            CoreError::Config(_) => None,
        }
    }

    /// The node-reported error code for [`CoreError::Rpc`].
    pub fn rpc_code(&self) -> Option<i64> {
        match self {
            CoreError::Rpc { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub(crate) fn decode(method: &str, stage: DecodeStage, message: impl fmt::Display) -> Self {
        CoreError::Decode {
            method: method.to_owned(),
            stage,
            message: message.to_string(),
        }
    }

    pub(crate) fn invalid_argument(method: &str, message: impl Into<String>) -> Self {
        CoreError::InvalidArgument {
            method: method.to_owned(),
            message: message.into(),
        }
    }
}

/// Well-known Bitcoin Core RPC error codes (`src/rpc/protocol.h`).
pub struct RpcErrorCode;

impl RpcErrorCode {
    pub const MISC_ERROR: i64 = -1;
    pub const TYPE_ERROR: i64 = -3;
    pub const INVALID_ADDRESS_OR_KEY: i64 = -5;
    pub const OUT_OF_MEMORY: i64 = -7;
    pub const INVALID_PARAMETER: i64 = -8;
    pub const DESERIALIZATION_ERROR: i64 = -22;
    pub const VERIFY_ERROR: i64 = -25;
    pub const VERIFY_REJECTED: i64 = -26;
    pub const VERIFY_ALREADY_IN_CHAIN: i64 = -27;
    pub const IN_WARMUP: i64 = -28;
    pub const WALLET_ERROR: i64 = -4;
    pub const WALLET_INSUFFICIENT_FUNDS: i64 = -6;
    pub const WALLET_UNLOCK_NEEDED: i64 = -13;
    pub const WALLET_NOT_FOUND: i64 = -18;
    pub const WALLET_NOT_SPECIFIED: i64 = -19;
    pub const WALLET_ALREADY_LOADED: i64 = -35;
    pub const METHOD_NOT_FOUND: i64 = -32601;
    pub const INVALID_PARAMS: i64 = -32602;
}
