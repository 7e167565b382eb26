//! Bitcoin Core RPC dispatch layer.
//!
//! Defines the [`Transport`] trait, the HTTP implementation
//! ([`HttpTransport`]), the positional [`Params`] builder, and the
//! [`RpcClient`] dispatcher every typed operation calls through. A test
//! double lives in `mock::MockTransport`.

mod dispatch;
mod http_adapter;
#[cfg(test)]
pub(crate) mod mock;
pub mod params;

pub(crate) use dispatch::decode_result;
pub use dispatch::{RpcClient, WalletRpc};
pub use http_adapter::{Auth, HttpTransport};
pub use params::Params;

use std::time::Duration;

use async_trait::async_trait;

use crate::error::TransportError;

/// One outbound POST of an encoded envelope.
#[derive(Debug, Clone)]
pub struct TransportRequest<'a> {
    pub endpoint: &'a str,
    pub body: Vec<u8>,
    pub auth: Option<&'a Auth>,
    /// Per-request deadline; `None` keeps the transport's own default.
    pub timeout: Option<Duration>,
}

/// Moves request bytes to the node and response bytes back.
///
/// Implementations report any non-2xx reply as
/// [`TransportError::Status`] and never retry.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: TransportRequest<'_>) -> Result<Vec<u8>, TransportError>;
}
