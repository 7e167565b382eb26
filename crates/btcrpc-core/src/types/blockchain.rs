use bitcoin::{Amount, BlockHash, Txid};
use serde::Deserialize;

use super::amount;
use super::{BlockHeight, RawTransactionInfo, ScriptPubKey};

// ==============================================================================
// Chain / Network Info
// ==============================================================================

/// `getblockchaininfo`.
#[derive(Debug, Clone, Deserialize)]
pub struct BlockchainInfo {
    pub chain: String,
    pub blocks: u64,
    pub headers: u64,
    #[serde(rename = "bestblockhash")]
    pub best_block_hash: BlockHash,
    pub difficulty: f64,
    #[serde(rename = "mediantime")]
    pub median_time: u64,
    #[serde(rename = "verificationprogress")]
    pub verification_progress: f64,
    #[serde(rename = "initialblockdownload")]
    pub initial_block_download: bool,
    #[serde(rename = "chainwork")]
    pub chain_work: String,
    pub size_on_disk: u64,
    pub pruned: bool,
    #[serde(default, rename = "pruneheight")]
    pub prune_height: Option<u64>,
}

/// `getnetworkinfo`.
#[derive(Debug, Clone, Deserialize)]
pub struct NetworkInfo {
    pub version: u64,
    pub subversion: String,
    #[serde(rename = "protocolversion")]
    pub protocol_version: u64,
    #[serde(rename = "localservices")]
    pub local_services: String,
    #[serde(rename = "localrelay")]
    pub local_relay: bool,
    #[serde(rename = "timeoffset")]
    pub time_offset: i64,
    pub connections: u32,
    #[serde(rename = "networkactive")]
    pub network_active: bool,
    #[serde(default)]
    pub networks: Vec<NetworkReachability>,
    #[serde(rename = "relayfee", deserialize_with = "amount::btc")]
    pub relay_fee: Amount,
    #[serde(rename = "incrementalfee", deserialize_with = "amount::btc")]
    pub incremental_fee: Amount,
    #[serde(default, rename = "localaddresses")]
    pub local_addresses: Vec<LocalAddress>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NetworkReachability {
    pub name: String,
    pub limited: bool,
    pub reachable: bool,
    #[serde(default)]
    pub proxy: String,
    #[serde(default)]
    pub proxy_randomize_credentials: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocalAddress {
    pub address: String,
    pub port: u16,
    pub score: i64,
}

// ==============================================================================
// Blocks
// ==============================================================================

/// Verbosity levels of `getblock`. The result shape depends on the level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Serialized block as hex.
    Hex,
    /// Block object with transaction ids.
    #[default]
    Summary,
    /// Block object with decoded transactions.
    Full,
}

impl Verbosity {
    pub fn level(self) -> u8 {
        match self {
            Self::Hex => 0,
            Self::Summary => 1,
            Self::Full => 2,
        }
    }
}

/// Block object from `getblock`, generic over the `tx` entries: txids at
/// verbosity 1, decoded transactions at verbosity 2.
#[derive(Debug, Clone, Deserialize)]
pub struct Block<T> {
    pub hash: BlockHash,
    /// `-1` when the block is not on the main chain.
    pub confirmations: i64,
    pub height: BlockHeight,
    pub version: i32,
    #[serde(rename = "versionHex")]
    pub version_hex: String,
    #[serde(rename = "merkleroot")]
    pub merkle_root: String,
    pub time: u64,
    #[serde(rename = "mediantime")]
    pub median_time: u64,
    pub nonce: u32,
    pub bits: String,
    pub difficulty: f64,
    #[serde(rename = "chainwork")]
    pub chain_work: String,
    #[serde(rename = "nTx")]
    pub n_tx: u64,
    #[serde(default, rename = "previousblockhash")]
    pub previous_block_hash: Option<BlockHash>,
    #[serde(default, rename = "nextblockhash")]
    pub next_block_hash: Option<BlockHash>,
    #[serde(rename = "strippedsize")]
    pub stripped_size: u64,
    pub size: u64,
    pub weight: u64,
    pub tx: Vec<T>,
}

pub type BlockInfo = Block<Txid>;
pub type BlockWithTransactions = Block<RawTransactionInfo>;

/// `getblock`, shaped by the requested [`Verbosity`].
#[derive(Debug, Clone)]
pub enum GetBlockResult {
    Hex(String),
    Summary(Box<BlockInfo>),
    Full(Box<BlockWithTransactions>),
}

/// `getblockheader` with `verbose = true`.
#[derive(Debug, Clone, Deserialize)]
pub struct BlockHeader {
    pub hash: BlockHash,
    pub confirmations: i64,
    pub height: BlockHeight,
    pub version: i32,
    #[serde(rename = "versionHex")]
    pub version_hex: String,
    #[serde(rename = "merkleroot")]
    pub merkle_root: String,
    pub time: u64,
    #[serde(rename = "mediantime")]
    pub median_time: u64,
    pub nonce: u32,
    pub bits: String,
    pub difficulty: f64,
    #[serde(rename = "chainwork")]
    pub chain_work: String,
    #[serde(rename = "nTx")]
    pub n_tx: u64,
    #[serde(default, rename = "previousblockhash")]
    pub previous_block_hash: Option<BlockHash>,
    #[serde(default, rename = "nextblockhash")]
    pub next_block_hash: Option<BlockHash>,
}

/// `getblockheader`, shaped by the `verbose` flag.
#[derive(Debug, Clone)]
pub enum GetBlockHeaderResult {
    Hex(String),
    Header(BlockHeader),
}

// ==============================================================================
// UTXO / Address / Fee Queries
// ==============================================================================

/// `gettxout` for an unspent output.
#[derive(Debug, Clone, Deserialize)]
pub struct TxOut {
    #[serde(rename = "bestblock")]
    pub best_block: BlockHash,
    pub confirmations: u64,
    #[serde(deserialize_with = "amount::btc")]
    pub value: Amount,
    #[serde(rename = "scriptPubKey")]
    pub script_pub_key: ScriptPubKey,
    pub coinbase: bool,
}

/// `validateaddress`.
#[derive(Debug, Clone, Deserialize)]
pub struct ValidateAddressInfo {
    #[serde(rename = "isvalid")]
    pub is_valid: bool,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default, rename = "scriptPubKey")]
    pub script_pub_key: Option<String>,
    #[serde(default, rename = "isscript")]
    pub is_script: Option<bool>,
    #[serde(default, rename = "iswitness")]
    pub is_witness: Option<bool>,
    #[serde(default)]
    pub witness_version: Option<u8>,
    #[serde(default)]
    pub witness_program: Option<String>,
    /// Reason the address is invalid.
    #[serde(default)]
    pub error: Option<String>,
}

/// `estimatesmartfee`. `fee_rate` is BTC per kvB and absent when the node
/// has too little data.
#[derive(Debug, Clone, Deserialize)]
pub struct EstimateSmartFee {
    #[serde(default, rename = "feerate", deserialize_with = "amount::opt_btc")]
    pub fee_rate: Option<Amount>,
    #[serde(default)]
    pub errors: Vec<String>,
    pub blocks: u32,
}

/// `createmultisig` / `addmultisigaddress`.
#[derive(Debug, Clone, Deserialize)]
pub struct MultisigAddress {
    pub address: String,
    #[serde(rename = "redeemScript")]
    pub redeem_script: String,
    #[serde(default)]
    pub descriptor: Option<String>,
}
