pub mod config;
pub mod error;
pub mod ops;
pub mod rpc;
pub mod types;

#[cfg(test)]
pub(crate) mod test_util;

pub use config::RpcConfig;
pub use error::{CoreError, ErrorKind, RpcErrorCode, TransportError};
pub use ops::ESTIMATE_TARGET_RANGE;
pub use rpc::{Auth, HttpTransport, Params, RpcClient, Transport, TransportRequest, WalletRpc};
