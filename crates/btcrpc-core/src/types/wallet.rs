use bitcoin::{Amount, BlockHash, SignedAmount, Txid};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::{json, Value};

use super::amount;
use super::{EstimateMode, RawTransactionInfo};

// ==============================================================================
// Wallet Management
// ==============================================================================

/// `createwallet` / `loadwallet`.
#[derive(Debug, Clone, Deserialize)]
pub struct WalletLoaded {
    pub name: String,
    /// Single warning string printed by older nodes.
    #[serde(default)]
    pub warning: Option<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

/// Optional arguments of `createwallet`. `Default` asks for a plain
/// wallet with private keys and no passphrase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateWalletOptions {
    pub disable_private_keys: bool,
    pub blank: bool,
    pub passphrase: Option<String>,
    pub avoid_reuse: bool,
    /// `None` leaves the wallet format to the node.
    pub descriptors: Option<bool>,
    pub load_on_startup: Option<bool>,
}

// ==============================================================================
// Sending
// ==============================================================================

/// Optional arguments of `sendtoaddress`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SendToAddressOptions {
    pub comment: Option<String>,
    pub comment_to: Option<String>,
    pub subtract_fee_from_amount: bool,
    /// `None` uses the wallet's `-walletrbf` setting.
    pub replaceable: Option<bool>,
    pub conf_target: Option<u32>,
    pub estimate_mode: Option<EstimateMode>,
    pub avoid_reuse: Option<bool>,
    /// Explicit fee rate in sat/vB.
    pub fee_rate: Option<f64>,
}

// ==============================================================================
// UTXO Listing
// ==============================================================================

/// Optional arguments of `listunspent`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListUnspentOptions {
    pub min_conf: Option<u32>,
    pub max_conf: Option<u32>,
    pub addresses: Vec<String>,
    pub include_unsafe: Option<bool>,
    pub query: Option<UnspentQuery>,
}

/// `query_options` object of `listunspent`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnspentQuery {
    pub minimum_amount: Option<Amount>,
    pub maximum_amount: Option<Amount>,
    pub maximum_count: Option<u32>,
    pub minimum_sum_amount: Option<Amount>,
}

impl UnspentQuery {
    pub(crate) fn to_json(&self) -> Value {
        let mut query = serde_json::Map::new();
        if let Some(a) = self.minimum_amount {
            query.insert("minimumAmount".to_owned(), amount::to_btc_value(a));
        }
        if let Some(a) = self.maximum_amount {
            query.insert("maximumAmount".to_owned(), amount::to_btc_value(a));
        }
        if let Some(n) = self.maximum_count {
            query.insert("maximumCount".to_owned(), json!(n));
        }
        if let Some(a) = self.minimum_sum_amount {
            query.insert("minimumSumAmount".to_owned(), amount::to_btc_value(a));
        }
        Value::Object(query)
    }
}

/// Entry of `listunspent`.
#[derive(Debug, Clone, Deserialize)]
pub struct Unspent {
    pub txid: Txid,
    pub vout: u32,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(rename = "scriptPubKey")]
    pub script_pub_key: String,
    #[serde(deserialize_with = "amount::btc")]
    pub amount: Amount,
    pub confirmations: u32,
    #[serde(default, rename = "redeemScript")]
    pub redeem_script: Option<String>,
    #[serde(default, rename = "witnessScript")]
    pub witness_script: Option<String>,
    pub spendable: bool,
    pub solvable: bool,
    #[serde(default)]
    pub desc: Option<String>,
    pub safe: bool,
}

// ==============================================================================
// Wallet Transactions
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxCategory {
    Send,
    Receive,
    Generate,
    Immature,
    Orphan,
}

/// Entry of `listtransactions`.
#[derive(Debug, Clone, Deserialize)]
pub struct WalletTransaction {
    #[serde(default)]
    pub address: Option<String>,
    pub category: TxCategory,
    /// Negative for sends.
    #[serde(deserialize_with = "amount::signed_btc")]
    pub amount: SignedAmount,
    #[serde(default)]
    pub label: Option<String>,
    pub vout: u32,
    #[serde(default, deserialize_with = "amount::opt_signed_btc")]
    pub fee: Option<SignedAmount>,
    /// Negative when the transaction conflicts with the best chain.
    pub confirmations: i64,
    #[serde(default)]
    pub generated: Option<bool>,
    #[serde(default)]
    pub trusted: Option<bool>,
    #[serde(default, rename = "blockhash")]
    pub block_hash: Option<BlockHash>,
    #[serde(default, rename = "blockheight")]
    pub block_height: Option<u32>,
    #[serde(default, rename = "blockindex")]
    pub block_index: Option<u32>,
    #[serde(default, rename = "blocktime")]
    pub block_time: Option<u64>,
    pub txid: Txid,
    #[serde(default, rename = "walletconflicts")]
    pub wallet_conflicts: Vec<Txid>,
    pub time: u64,
    #[serde(rename = "timereceived")]
    pub time_received: u64,
    /// `yes`, `no` or `unknown`.
    #[serde(default, rename = "bip125-replaceable")]
    pub bip125_replaceable: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub abandoned: Option<bool>,
}

/// `gettransaction`.
#[derive(Debug, Clone, Deserialize)]
pub struct WalletTransactionDetails {
    #[serde(deserialize_with = "amount::signed_btc")]
    pub amount: SignedAmount,
    #[serde(default, deserialize_with = "amount::opt_signed_btc")]
    pub fee: Option<SignedAmount>,
    pub confirmations: i64,
    #[serde(default, rename = "blockhash")]
    pub block_hash: Option<BlockHash>,
    #[serde(default, rename = "blockheight")]
    pub block_height: Option<u32>,
    #[serde(default, rename = "blocktime")]
    pub block_time: Option<u64>,
    pub txid: Txid,
    #[serde(default, rename = "walletconflicts")]
    pub wallet_conflicts: Vec<Txid>,
    pub time: u64,
    #[serde(rename = "timereceived")]
    pub time_received: u64,
    #[serde(default, rename = "bip125-replaceable")]
    pub bip125_replaceable: Option<String>,
    pub details: Vec<TransactionDetail>,
    pub hex: String,
    /// Present only when requested with `verbose = true`.
    #[serde(default)]
    pub decoded: Option<RawTransactionInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransactionDetail {
    #[serde(default)]
    pub address: Option<String>,
    pub category: TxCategory,
    #[serde(deserialize_with = "amount::signed_btc")]
    pub amount: SignedAmount,
    #[serde(default)]
    pub label: Option<String>,
    pub vout: u32,
    #[serde(default, deserialize_with = "amount::opt_signed_btc")]
    pub fee: Option<SignedAmount>,
    #[serde(default)]
    pub abandoned: Option<bool>,
}

// ==============================================================================
// Wallet State
// ==============================================================================

/// `getwalletinfo`.
#[derive(Debug, Clone, Deserialize)]
pub struct WalletInfo {
    #[serde(rename = "walletname")]
    pub wallet_name: String,
    #[serde(rename = "walletversion")]
    pub wallet_version: u32,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(deserialize_with = "amount::btc")]
    pub balance: Amount,
    #[serde(deserialize_with = "amount::btc")]
    pub unconfirmed_balance: Amount,
    #[serde(deserialize_with = "amount::btc")]
    pub immature_balance: Amount,
    #[serde(rename = "txcount")]
    pub tx_count: u64,
    #[serde(default, rename = "keypoololdest")]
    pub keypool_oldest: Option<u64>,
    #[serde(rename = "keypoolsize")]
    pub keypool_size: u64,
    #[serde(default, rename = "keypoolsize_hd_internal")]
    pub keypool_size_hd_internal: Option<u64>,
    #[serde(default)]
    pub unlocked_until: Option<u64>,
    #[serde(rename = "paytxfee", deserialize_with = "amount::btc")]
    pub pay_tx_fee: Amount,
    #[serde(default, rename = "hdseedid")]
    pub hd_seed_id: Option<String>,
    pub private_keys_enabled: bool,
    #[serde(default)]
    pub avoid_reuse: bool,
    pub scanning: ScanStatus,
    #[serde(default)]
    pub descriptors: bool,
}

/// `scanning` field of `getwalletinfo`: `false`, or progress of a running
/// rescan.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ScanStatus {
    Scanning { duration: u64, progress: f64 },
    Idle(bool),
}

impl ScanStatus {
    pub fn is_scanning(&self) -> bool {
        matches!(self, Self::Scanning { .. })
    }
}

/// Entry of `listaddressgroupings`. The node prints each entry as an
/// `[address, amount]` or `[address, amount, label]` array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressGrouping {
    pub address: String,
    pub amount: Amount,
    pub label: Option<String>,
}

impl<'de> Deserialize<'de> for AddressGrouping {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let fields = Vec::<Value>::deserialize(d)?;
        let (address, value, label) = match fields.as_slice() {
            [address, value] => (address, value, None),
            [address, value, label] => (address, value, Some(label)),
            other => {
                return Err(D::Error::invalid_length(
                    other.len(),
                    &"an [address, amount, label?] array",
                ))
            }
        };

        let address = address
            .as_str()
            .ok_or_else(|| D::Error::custom(format!("expected address string, got: {address}")))?
            .to_owned();
        let amount = amount::parse_btc_amount(value).map_err(D::Error::custom)?;
        let label = match label {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => {
                return Err(D::Error::custom(format!("expected label string, got: {other}")))
            }
        };

        Ok(Self {
            address,
            amount,
            label,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::txid_from_byte;

    #[test]
    fn address_groupings_decode_from_arrays() {
        let groups: Vec<Vec<AddressGrouping>> = serde_json::from_value(json!([
            [["bcrt1qa", 0.5], ["bcrt1qb", 1, "savings"]],
            [["bcrt1qc", 0]]
        ]))
        .expect("valid groupings");

        assert_eq!(groups.len(), 2);
        assert_eq!(
            groups[0][1],
            AddressGrouping {
                address: "bcrt1qb".to_owned(),
                amount: Amount::from_sat(100_000_000),
                label: Some("savings".to_owned()),
            }
        );
        assert_eq!(groups[1][0].label, None);
    }

    #[test]
    fn address_grouping_rejects_bad_arity() {
        let err = serde_json::from_value::<AddressGrouping>(json!(["bcrt1qa"]))
            .expect_err("one element is not a grouping");
        assert!(err.to_string().contains("address, amount"));
    }

    #[test]
    fn scan_status_variants() {
        let idle: ScanStatus = serde_json::from_value(json!(false)).expect("bool");
        assert_eq!(idle, ScanStatus::Idle(false));
        assert!(!idle.is_scanning());

        let busy: ScanStatus =
            serde_json::from_value(json!({"duration": 12, "progress": 0.25})).expect("object");
        assert!(busy.is_scanning());
    }

    #[test]
    fn wallet_transaction_send_has_negative_amounts() {
        let tx: WalletTransaction = serde_json::from_value(json!({
            "address": "bcrt1qdest",
            "category": "send",
            "amount": -0.1,
            "vout": 1,
            "fee": -0.0000141,
            "confirmations": 0,
            "trusted": true,
            "txid": txid_from_byte(3).to_string(),
            "walletconflicts": [],
            "time": 1700000000,
            "timereceived": 1700000000,
            "bip125-replaceable": "yes",
            "abandoned": false
        }))
        .expect("valid transaction");

        assert_eq!(tx.category, TxCategory::Send);
        assert_eq!(tx.amount, SignedAmount::from_sat(-10_000_000));
        assert_eq!(tx.fee, Some(SignedAmount::from_sat(-1_410)));
        assert!(tx.block_hash.is_none());
    }

    #[test]
    fn unspent_query_json_names() {
        let query = UnspentQuery {
            minimum_amount: Some(Amount::from_sat(1_000)),
            maximum_count: Some(5),
            ..Default::default()
        };
        assert_eq!(
            query.to_json(),
            json!({"minimumAmount": 0.00001, "maximumCount": 5})
        );
    }
}
