//! HTTP JSON-RPC plumbing for Bitcoin Core compatible endpoints.
//!
//! Implements [`Transport`](super::Transport) with `reqwest` (POST, JSON
//! content type, basic auth), the JSON-RPC 1.0 envelope codec, and
//! connection / credential resolution.

mod client;
mod connection;
pub(crate) mod protocol;

pub use client::HttpTransport;
pub use connection::Auth;
pub(crate) use connection::{parse_connection, resolve_auth, wallet_endpoint};
