//! Typed wrappers over [`RpcClient::call`](crate::rpc::RpcClient::call).
//!
//! Each operation builds its positional parameters with
//! [`Params`](crate::rpc::Params), dispatches through the client (or a
//! [`WalletRpc`](crate::rpc::WalletRpc) handle for wallet-scoped methods), and
//! decodes the payload into the shape selected by its arguments.
//! Flag-dependent results (`verbose`, `verbosity`) are decoded by the flag
//! the caller passed, never by inspecting the payload.

mod blockchain;
mod mempool;
mod rawtx;
mod wallet;

pub use blockchain::ESTIMATE_TARGET_RANGE;
