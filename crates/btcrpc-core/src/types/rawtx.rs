use bitcoin::{Amount, BlockHash, Txid, Wtxid};
use serde::Deserialize;
use serde_json::{json, Value};

use super::amount;
use super::ScriptPubKey;

// ==============================================================================
// Decoded Transactions
// ==============================================================================

/// Decoded transaction as printed by `getrawtransaction` (verbose) and
/// `getblock` (verbosity 2). Chain-position fields are absent for mempool
/// transactions.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTransactionInfo {
    pub txid: Txid,
    /// Witness txid; equals `txid` for non-segwit transactions.
    pub hash: Wtxid,
    pub version: i32,
    pub size: u64,
    pub vsize: u64,
    pub weight: u64,
    pub locktime: u32,
    pub vin: Vec<RawInput>,
    pub vout: Vec<RawOutput>,
    #[serde(default)]
    pub hex: Option<String>,
    /// Only printed by `getblock` at verbosity 2 when undo data is available.
    #[serde(default, deserialize_with = "amount::opt_btc")]
    pub fee: Option<Amount>,
    #[serde(default, rename = "blockhash")]
    pub block_hash: Option<BlockHash>,
    #[serde(default)]
    pub confirmations: Option<u64>,
    #[serde(default)]
    pub time: Option<u64>,
    #[serde(default, rename = "blocktime")]
    pub block_time: Option<u64>,
}

impl RawTransactionInfo {
    pub fn is_coinbase(&self) -> bool {
        self.vin.first().is_some_and(RawInput::is_coinbase)
    }

    /// Sum of all output values.
    pub fn total_output(&self) -> Amount {
        self.vout.iter().map(|o| o.value).sum()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawInput {
    /// Previous output; absent on coinbase inputs.
    #[serde(default)]
    pub txid: Option<Txid>,
    #[serde(default)]
    pub vout: Option<u32>,
    /// Coinbase script as hex; only present on coinbase inputs.
    #[serde(default)]
    pub coinbase: Option<String>,
    #[serde(default, rename = "scriptSig")]
    pub script_sig: Option<ScriptSig>,
    #[serde(default, rename = "txinwitness")]
    pub witness: Vec<String>,
    pub sequence: u32,
}

impl RawInput {
    pub fn is_coinbase(&self) -> bool {
        self.coinbase.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScriptSig {
    pub asm: String,
    pub hex: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawOutput {
    #[serde(deserialize_with = "amount::btc")]
    pub value: Amount,
    pub n: u32,
    #[serde(rename = "scriptPubKey")]
    pub script_pub_key: ScriptPubKey,
}

/// `getrawtransaction`, shaped by the `verbose` flag.
#[derive(Debug, Clone)]
pub enum GetRawTransactionResult {
    Hex(String),
    Decoded(Box<RawTransactionInfo>),
}

// ==============================================================================
// Transaction Construction
// ==============================================================================

/// Input of `createrawtransaction`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRawTransactionInput {
    pub txid: Txid,
    pub vout: u32,
    pub sequence: Option<u32>,
}

impl CreateRawTransactionInput {
    pub fn new(txid: Txid, vout: u32) -> Self {
        Self {
            txid,
            vout,
            sequence: None,
        }
    }

    pub fn with_sequence(mut self, sequence: u32) -> Self {
        self.sequence = Some(sequence);
        self
    }

    pub(crate) fn to_json(&self) -> Value {
        let mut input = json!({ "txid": self.txid.to_string(), "vout": self.vout });
        if let Some(sequence) = self.sequence {
            input["sequence"] = json!(sequence);
        }
        input
    }
}

/// Output of `createrawtransaction`: pay an address, or embed data in an
/// `OP_RETURN` output.
#[derive(Debug, Clone, PartialEq)]
pub enum TxOutputSpec {
    Address { address: String, amount: Amount },
    Data(String),
}

impl TxOutputSpec {
    pub(crate) fn to_json(&self) -> Value {
        match self {
            Self::Address { address, amount } => {
                let mut output = serde_json::Map::new();
                output.insert(address.clone(), amount::to_btc_value(*amount));
                Value::Object(output)
            }
            Self::Data(hex) => json!({ "data": hex }),
        }
    }
}

/// Previous output description passed to `signrawtransactionwithwallet`
/// for inputs the wallet does not know about.
#[derive(Debug, Clone, PartialEq)]
pub struct PrevTx {
    pub txid: Txid,
    pub vout: u32,
    pub script_pub_key: String,
    pub redeem_script: Option<String>,
    pub witness_script: Option<String>,
    pub amount: Option<Amount>,
}

impl PrevTx {
    pub(crate) fn to_json(&self) -> Value {
        let mut prev = json!({
            "txid": self.txid.to_string(),
            "vout": self.vout,
            "scriptPubKey": self.script_pub_key,
        });
        if let Some(script) = &self.redeem_script {
            prev["redeemScript"] = json!(script);
        }
        if let Some(script) = &self.witness_script {
            prev["witnessScript"] = json!(script);
        }
        if let Some(amount) = self.amount {
            prev["amount"] = amount::to_btc_value(amount);
        }
        prev
    }
}

/// `signrawtransactionwithwallet`.
#[derive(Debug, Clone, Deserialize)]
pub struct SignedRawTransaction {
    pub hex: String,
    pub complete: bool,
    #[serde(default)]
    pub errors: Vec<SignError>,
}

/// Per-input signing failure.
#[derive(Debug, Clone, Deserialize)]
pub struct SignError {
    pub txid: Txid,
    pub vout: u32,
    #[serde(rename = "scriptSig")]
    pub script_sig: String,
    pub sequence: u32,
    pub error: String,
}
