use std::fmt;
use std::time::Duration;

use reqwest::Url;
use serde::de::DeserializeOwned;
use serde_json::value::RawValue;
use tracing::{debug, trace, warn};

use crate::config::RpcConfig;
use crate::error::{CoreError, DecodeStage};

use super::http_adapter::protocol::{
    decode_response, encode_request, parse_jsonrpc_error, REQUEST_ID,
};
use super::http_adapter::{parse_connection, resolve_auth, wallet_endpoint, Auth, HttpTransport};
use super::{Transport, TransportRequest};

/// Longest slice of an undecodable body quoted in error messages.
const BODY_PREVIEW_LEN: usize = 256;

/// Methods whose result carries private key material; their response
/// bodies are never logged.
const SECRET_RESULT_METHODS: &[&str] = &["dumpprivkey", "gethdkeys", "listdescriptors"];

/// Bitcoin Core JSON-RPC client.
///
/// Every typed operation goes through [`RpcClient::call`]: resolve the
/// endpoint (default or wallet-scoped), encode the envelope, send it, decode
/// the reply, and turn an envelope error into [`CoreError::Rpc`]. No state is
/// kept between calls apart from the transport's connection pool, so a single
/// client can be shared across tasks.
pub struct RpcClient {
    transport: Box<dyn Transport>,
    url: Url,
    auth: Option<Auth>,
    request_timeout: Option<Duration>,
}

impl fmt::Debug for RpcClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RpcClient")
            .field("url", &self.url.as_str())
            .field("auth", &self.auth)
            .field("request_timeout", &self.request_timeout)
            .finish_non_exhaustive()
    }
}

impl RpcClient {
    /// Build a client with the HTTP transport from `config`.
    pub fn new(config: &RpcConfig) -> Result<Self, CoreError> {
        let auth = resolve_auth(
            config.user.as_deref(),
            config.pass.as_deref(),
            config.cookie_file.as_deref(),
        )?;
        let transport = HttpTransport::with_timeouts(config.connect_timeout, config.timeout)?;
        Self::with_transport(&config.url, auth, transport)
    }

    /// Build a client over any [`Transport`].
    pub fn with_transport(
        url: &str,
        auth: Option<Auth>,
        transport: impl Transport + 'static,
    ) -> Result<Self, CoreError> {
        Ok(Self {
            transport: Box::new(transport),
            url: parse_connection(url)?,
            auth,
            request_timeout: None,
        })
    }

    /// Bound every call made through this client, overriding the
    /// transport's default timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Base URL of the node.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Endpoint a call with the given wallet scope is sent to.
    pub fn endpoint(&self, wallet: &str) -> String {
        wallet_endpoint(&self.url, wallet)
    }

    /// Handle for calls routed to a loaded wallet.
    pub fn wallet<'a>(&'a self, name: &'a str) -> WalletRpc<'a> {
        WalletRpc { client: self, name }
    }

    /// Dispatch one JSON-RPC call and return the raw `result` payload.
    ///
    /// An empty `wallet` targets the node's default endpoint. The payload is
    /// returned exactly as the node sent it; see [`RpcClient::call_as`] for
    /// typed decoding.
    pub async fn call(
        &self,
        method: &str,
        params: Vec<serde_json::Value>,
        wallet: &str,
    ) -> Result<Box<RawValue>, CoreError> {
        let endpoint = self.endpoint(wallet);
        debug!(
            rpc.method = method,
            rpc.wallet = wallet,
            rpc.params = params.len(),
            "rpc call"
        );

        let body = encode_request(method, &params)
            .map_err(|e| CoreError::decode(method, DecodeStage::Encode, e))?;

        let raw = self
            .transport
            .send(TransportRequest {
                endpoint: &endpoint,
                body,
                auth: self.auth.as_ref(),
                timeout: self.request_timeout,
            })
            .await
            .map_err(|source| CoreError::Transport {
                method: method.to_owned(),
                source,
            })?;
        debug!(rpc.method = method, body_len = raw.len(), "rpc response");
        if logs_response_body(method) {
            trace!(
                rpc.method = method,
                body = %String::from_utf8_lossy(&raw),
                "rpc response body"
            );
        }

        let envelope = decode_response(&raw).map_err(|e| {
            let preview = if logs_response_body(method) {
                body_preview(&raw)
            } else {
                "<redacted>".to_owned()
            };
            CoreError::decode(method, DecodeStage::Envelope, format!("{e}; body={preview}"))
        })?;

        if envelope.id.as_u64() != Some(REQUEST_ID) {
            warn!(rpc.method = method, id = %envelope.id, "response id does not echo request id");
        }

        if !envelope.error.is_null() {
            return Err(parse_jsonrpc_error(method, envelope.error));
        }

        Ok(envelope.result)
    }

    /// Dispatch a call and decode its payload into `T`.
    pub async fn call_as<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Vec<serde_json::Value>,
        wallet: &str,
    ) -> Result<T, CoreError> {
        let raw = self.call(method, params, wallet).await?;
        decode_result(method, &raw)
    }
}

/// Calls routed to `/wallet/<name>`.
#[derive(Debug, Clone, Copy)]
pub struct WalletRpc<'a> {
    client: &'a RpcClient,
    name: &'a str,
}

impl<'a> WalletRpc<'a> {
    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn client(&self) -> &'a RpcClient {
        self.client
    }

    pub async fn call(
        &self,
        method: &str,
        params: Vec<serde_json::Value>,
    ) -> Result<Box<RawValue>, CoreError> {
        self.client.call(method, params, self.name).await
    }

    pub async fn call_as<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Vec<serde_json::Value>,
    ) -> Result<T, CoreError> {
        self.client.call_as(method, params, self.name).await
    }
}

/// Decode an opaque payload into the shape an operation expects.
pub(crate) fn decode_result<T: DeserializeOwned>(
    method: &str,
    raw: &RawValue,
) -> Result<T, CoreError> {
    serde_json::from_str(raw.get()).map_err(|e| CoreError::decode(method, DecodeStage::Result, e))
}

fn logs_response_body(method: &str) -> bool {
    !SECRET_RESULT_METHODS.contains(&method)
}

fn body_preview(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    match text.char_indices().nth(BODY_PREVIEW_LEN) {
        Some((cut, _)) => format!("{}…", &text[..cut]),
        None => text.into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;
    use serde_json::json;

    use super::*;
    use crate::error::{ErrorKind, TransportError};
    use crate::rpc::mock::MockTransport;
    use crate::test_util::{error_envelope, result_envelope};

    const BASE: &str = "http://127.0.0.1:18443";

    fn client(transport: MockTransport) -> RpcClient {
        RpcClient::with_transport(BASE, Some(Auth::new("alice", "secret")), transport)
            .expect("mock client must construct")
    }

    #[tokio::test]
    async fn default_scope_posts_to_base_url() {
        let transport = MockTransport::builder()
            .with_body(result_envelope("800000"))
            .build();
        let log = transport.log();
        let rpc = client(transport);

        let count: u64 = rpc
            .call_as("getblockcount", Vec::new(), "")
            .await
            .expect("call must succeed");
        assert_eq!(count, 800_000);

        let sent = log.only();
        assert_eq!(sent.endpoint, BASE);
        assert_eq!(
            sent.body,
            json!({"jsonrpc": "1.0", "id": 1, "method": "getblockcount", "params": []})
        );
        assert_eq!(sent.auth, Some(Auth::new("alice", "secret")));
    }

    #[tokio::test]
    async fn wallet_scope_posts_to_wallet_route() {
        let transport = MockTransport::builder()
            .with_body(result_envelope("1.5"))
            .build();
        let log = transport.log();
        let rpc = client(transport);

        rpc.wallet("alice_wallet")
            .call("getbalance", Vec::new())
            .await
            .expect("call must succeed");
        assert_eq!(log.only().endpoint, format!("{BASE}/wallet/alice_wallet"));
    }

    #[tokio::test]
    async fn result_payload_is_returned_unchanged() {
        let payload = r#"{"z": 1,   "a": [1.10, "x"], "nested": {"k": null}}"#;
        let transport = MockTransport::builder()
            .with_body(result_envelope(payload))
            .build();
        let rpc = client(transport);

        let raw = rpc
            .call("getblockchaininfo", Vec::new(), "")
            .await
            .expect("call must succeed");
        assert_eq!(raw.get(), payload);
    }

    #[tokio::test]
    async fn envelope_error_maps_to_rpc_error() {
        let transport = MockTransport::builder()
            .with_body(error_envelope(-5, "Invalid address"))
            .build();
        let rpc = client(transport);

        let err = rpc
            .call("validateaddress", vec![json!("nope")], "")
            .await
            .expect_err("node error must surface");
        assert_eq!(err.kind(), ErrorKind::Rpc);
        assert!(matches!(
            err,
            CoreError::Rpc { ref method, code: -5, ref message }
                if method == "validateaddress" && message == "Invalid address"
        ));
    }

    #[tokio::test]
    async fn non_success_status_is_transport_error() {
        // Even with a well-formed error envelope in the body, the HTTP status wins.
        let transport = MockTransport::builder()
            .with_status(
                StatusCode::INTERNAL_SERVER_ERROR,
                &error_envelope(-8, "Block height out of range"),
            )
            .build();
        let rpc = client(transport);

        let err = rpc
            .call("getblockhash", vec![json!(9_999_999)], "")
            .await
            .expect_err("status must fail");
        assert_eq!(err.kind(), ErrorKind::Transport);
        let CoreError::Transport { source, .. } = err else {
            panic!("expected transport error");
        };
        assert_eq!(
            source.embedded_rpc_error(),
            Some((-8, "Block height out of range".to_owned()))
        );
    }

    #[tokio::test]
    async fn unauthorized_is_transport_error() {
        let transport = MockTransport::builder()
            .with_status(StatusCode::UNAUTHORIZED, "")
            .build();
        let rpc = client(transport);

        let err = rpc
            .call("getblockcount", Vec::new(), "")
            .await
            .expect_err("401 must fail");
        assert!(matches!(
            err,
            CoreError::Transport {
                source: TransportError::Status { status, .. },
                ..
            } if status == StatusCode::UNAUTHORIZED
        ));
    }

    #[tokio::test]
    async fn malformed_envelope_is_decode_error() {
        let transport = MockTransport::builder()
            .with_body("<html>502 Bad Gateway</html>".to_owned())
            .build();
        let rpc = client(transport);

        let err = rpc
            .call("getblockcount", Vec::new(), "")
            .await
            .expect_err("garbage must fail");
        assert!(matches!(
            err,
            CoreError::Decode {
                stage: DecodeStage::Envelope,
                ..
            }
        ));
        assert!(err.to_string().contains("502 Bad Gateway"));
    }

    #[tokio::test]
    async fn unexpected_result_shape_is_decode_error() {
        let transport = MockTransport::builder()
            .with_body(result_envelope(r#""not a number""#))
            .build();
        let rpc = client(transport);

        let err = rpc
            .call_as::<u64>("getblockcount", Vec::new(), "")
            .await
            .expect_err("shape mismatch must fail");
        assert!(matches!(
            err,
            CoreError::Decode {
                stage: DecodeStage::Result,
                ..
            }
        ));
        assert_eq!(err.method(), Some("getblockcount"));
    }

    #[tokio::test]
    async fn request_timeout_is_forwarded() {
        let transport = MockTransport::builder()
            .with_body(result_envelope("0"))
            .build();
        let log = transport.log();
        let rpc = client(transport).with_request_timeout(Duration::from_secs(3));

        rpc.call("getblockcount", Vec::new(), "")
            .await
            .expect("call must succeed");
        assert_eq!(log.only().timeout, Some(Duration::from_secs(3)));
    }

    #[tokio::test]
    async fn mismatched_id_is_tolerated() {
        let transport = MockTransport::builder()
            .with_body(r#"{"result":7,"error":null,"id":"other"}"#.to_owned())
            .build();
        let rpc = client(transport);

        let n: u32 = rpc
            .call_as("getconnectioncount", Vec::new(), "")
            .await
            .expect("id mismatch is not fatal");
        assert_eq!(n, 7);
    }

    #[test]
    fn endpoint_resolution() {
        let rpc = client(MockTransport::builder().build());
        assert_eq!(rpc.endpoint(""), BASE);
        assert_eq!(rpc.endpoint("bob"), format!("{BASE}/wallet/bob"));
    }

    #[tokio::test]
    async fn wallet_name_with_reserved_characters_stays_one_segment() {
        let transport = MockTransport::builder()
            .with_body(result_envelope("21.0"))
            .build();
        let log = transport.log();
        let rpc = client(transport);

        rpc.wallet("cold#2")
            .call("getbalance", Vec::new())
            .await
            .expect("call must succeed");
        assert_eq!(log.only().endpoint, format!("{BASE}/wallet/cold%232"));
    }

    #[tokio::test]
    async fn undecodable_key_response_is_not_quoted_in_error() {
        let transport = MockTransport::builder()
            .with_body("cVpF924EspNh8KjYsfhgY96mmxvT6DgdWiTYMtMjuM74hJaU5psW".to_owned())
            .build();
        let rpc = client(transport);

        let err = rpc
            .wallet("alice")
            .call("dumpprivkey", vec![json!("bcrt1qaddr")])
            .await
            .expect_err("bare key is not an envelope");
        let rendered = err.to_string();
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("cVpF924"));
    }

    #[test]
    fn key_returning_responses_are_not_logged() {
        assert!(!logs_response_body("dumpprivkey"));
        assert!(!logs_response_body("listdescriptors"));
        assert!(logs_response_body("getblockcount"));
        assert!(logs_response_body("getbalance"));
    }

    #[test]
    fn body_preview_truncates_long_bodies() {
        let long = "x".repeat(BODY_PREVIEW_LEN + 10);
        let preview = body_preview(long.as_bytes());
        assert_eq!(preview.chars().count(), BODY_PREVIEW_LEN + 1);
        assert!(preview.ends_with('…'));
        assert_eq!(body_preview(b"short"), "short");
    }
}
