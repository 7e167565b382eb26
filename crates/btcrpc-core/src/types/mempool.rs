use std::collections::HashMap;

use bitcoin::{Amount, Txid, Wtxid};
use serde::Deserialize;

use super::amount;
use super::BlockHeight;

/// `getmempoolinfo`.
#[derive(Debug, Clone, Deserialize)]
pub struct MempoolInfo {
    pub loaded: bool,
    pub size: u64,
    pub bytes: u64,
    pub usage: u64,
    #[serde(default)]
    pub total_fee: Option<f64>,
    #[serde(rename = "maxmempool")]
    pub max_mempool: u64,
    #[serde(rename = "mempoolminfee", deserialize_with = "amount::btc")]
    pub mempool_min_fee: Amount,
    #[serde(rename = "minrelaytxfee", deserialize_with = "amount::btc")]
    pub min_relay_tx_fee: Amount,
    #[serde(default, rename = "unbroadcastcount")]
    pub unbroadcast_count: Option<u64>,
}

/// Mempool entry from `getmempoolentry` or verbose `getrawmempool`.
#[derive(Debug, Clone, Deserialize)]
pub struct MempoolEntry {
    pub vsize: u64,
    pub weight: u64,
    pub time: u64,
    /// Chain height when the transaction entered the pool.
    pub height: BlockHeight,
    #[serde(rename = "descendantcount")]
    pub descendant_count: u64,
    #[serde(rename = "descendantsize")]
    pub descendant_size: u64,
    #[serde(rename = "ancestorcount")]
    pub ancestor_count: u64,
    #[serde(rename = "ancestorsize")]
    pub ancestor_size: u64,
    pub wtxid: Wtxid,
    pub fees: MempoolFees,
    #[serde(default)]
    pub depends: Vec<Txid>,
    #[serde(default, rename = "spentby")]
    pub spent_by: Vec<Txid>,
    #[serde(rename = "bip125-replaceable")]
    pub bip125_replaceable: bool,
    #[serde(default)]
    pub unbroadcast: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct MempoolFees {
    #[serde(deserialize_with = "amount::btc")]
    pub base: Amount,
    #[serde(deserialize_with = "amount::btc")]
    pub modified: Amount,
    #[serde(deserialize_with = "amount::btc")]
    pub ancestor: Amount,
    #[serde(deserialize_with = "amount::btc")]
    pub descendant: Amount,
}

/// `getrawmempool`, shaped by the `verbose` and `mempool_sequence` flags.
#[derive(Debug, Clone)]
pub enum RawMempool {
    Txids(Vec<Txid>),
    Verbose(HashMap<Txid, MempoolEntry>),
    Sequence {
        txids: Vec<Txid>,
        mempool_sequence: u64,
    },
}

/// Wire shape of `getrawmempool false true`.
#[derive(Debug, Deserialize)]
pub(crate) struct MempoolSequence {
    pub txids: Vec<Txid>,
    pub mempool_sequence: u64,
}

impl RawMempool {
    pub fn len(&self) -> usize {
        match self {
            Self::Txids(txids) | Self::Sequence { txids, .. } => txids.len(),
            Self::Verbose(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
