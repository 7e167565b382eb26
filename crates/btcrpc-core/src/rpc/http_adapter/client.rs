use std::time::Duration;

use async_trait::async_trait;
use reqwest::header;
use tracing::{debug, trace};

use crate::error::{CoreError, TransportError};

use super::super::{Transport, TransportRequest};

const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// JSON-RPC transport over HTTP(S) backed by a pooled `reqwest::Client`.
///
/// Cloning is cheap and shares the connection pool.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, CoreError> {
        Self::with_timeouts(DEFAULT_CONNECT_TIMEOUT, DEFAULT_TIMEOUT)
    }

    /// `timeout` bounds a whole request; a per-call timeout in
    /// [`TransportRequest`] overrides it.
    pub fn with_timeouts(connect_timeout: Duration, timeout: Duration) -> Result<Self, CoreError> {
        let client = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(timeout)
            .pool_max_idle_per_host(32)
            .tcp_nodelay(true)
            .build()
            .map_err(|e| CoreError::Config(format!("build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// Wrap an already configured client (proxies, custom TLS roots).
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: TransportRequest<'_>) -> Result<Vec<u8>, TransportError> {
        let mut builder = self
            .client
            .post(request.endpoint)
            .header(header::CONTENT_TYPE, "application/json")
            .body(request.body);
        if let Some(auth) = request.auth {
            builder = builder.basic_auth(&auth.user, Some(&auth.pass));
        }
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await.map_err(TransportError::Request)?;
        let status = response.status();

        let body = response.bytes().await.map_err(TransportError::Body)?;
        debug!(endpoint = request.endpoint, %status, body_len = body.len(), "http response");

        if !status.is_success() {
            let body = String::from_utf8_lossy(&body).into_owned();
            trace!(endpoint = request.endpoint, %status, body = %body, "http error body");
            return Err(TransportError::Status { status, body });
        }

        Ok(body.to_vec())
    }
}
