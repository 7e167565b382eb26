//! Typed shapes of Bitcoin Core RPC results and structured arguments.
//!
//! Results derive `Deserialize` only; the dispatcher decodes the raw
//! `result` payload into whichever type the calling operation names.
//! Argument types expose `to_json` for the positional parameter list.

pub mod amount;
mod blockchain;
mod mempool;
mod rawtx;
mod wallet;

pub use blockchain::*;
pub use mempool::*;
pub use rawtx::*;
pub use wallet::*;

use serde::{Deserialize, Serialize};

// ==============================================================================
// Block Height
// ==============================================================================

/// A Bitcoin block height, wrapped for type safety.
///
/// `#[serde(transparent)]` keeps the JSON representation a bare integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockHeight(pub u32);

impl From<u32> for BlockHeight {
    fn from(h: u32) -> Self {
        Self(h)
    }
}

impl From<BlockHeight> for u32 {
    fn from(h: BlockHeight) -> Self {
        h.0
    }
}

impl std::fmt::Display for BlockHeight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

// ==============================================================================
// Shared Argument Enums
// ==============================================================================

/// Fee estimation mode accepted by `estimatesmartfee` and wallet sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstimateMode {
    Unset,
    Economical,
    Conservative,
}

impl EstimateMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unset => "unset",
            Self::Economical => "economical",
            Self::Conservative => "conservative",
        }
    }
}

/// Output script family for new addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressType {
    Legacy,
    P2shSegwit,
    Bech32,
    Bech32m,
}

impl AddressType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Legacy => "legacy",
            Self::P2shSegwit => "p2sh-segwit",
            Self::Bech32 => "bech32",
            Self::Bech32m => "bech32m",
        }
    }
}

impl std::str::FromStr for AddressType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "legacy" => Ok(Self::Legacy),
            "p2sh-segwit" => Ok(Self::P2shSegwit),
            "bech32" => Ok(Self::Bech32),
            "bech32m" => Ok(Self::Bech32m),
            other => Err(format!("unknown address type `{other}`")),
        }
    }
}

// ==============================================================================
// Scripts
// ==============================================================================

/// Decoded `scriptPubKey` object as printed in transactions and UTXOs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScriptPubKey {
    #[serde(default)]
    pub asm: String,
    pub hex: String,
    #[serde(rename = "type")]
    pub script_type: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub desc: Option<String>,
}
