use bitcoin::{Amount, Txid};
use serde::de::IgnoredAny;
use serde_json::Value;

use crate::error::{CoreError, DecodeStage};
use crate::rpc::{Params, RpcClient, WalletRpc};
use crate::types::amount::{parse_btc_amount, to_btc_value};
use crate::types::{
    AddressGrouping, AddressType, CreateWalletOptions, EstimateMode, ListUnspentOptions,
    MultisigAddress, PrevTx, SendToAddressOptions, SignedRawTransaction, Unspent, WalletInfo,
    WalletLoaded, WalletTransaction, WalletTransactionDetails,
};

const DEFAULT_MAX_CONF: u32 = 9_999_999;

// ==============================================================================
// Wallet Management (default endpoint)
// ==============================================================================

impl RpcClient {
    pub async fn create_wallet(
        &self,
        name: &str,
        options: &CreateWalletOptions,
    ) -> Result<WalletLoaded, CoreError> {
        let params = Params::new()
            .arg(name)
            .opt_non_default(options.disable_private_keys, false)
            .opt_non_default(options.blank, false)
            .opt(options.passphrase.as_deref(), "")
            .opt_non_default(options.avoid_reuse, false)
            .tail(options.descriptors)
            .tail(options.load_on_startup)
            .build();
        self.call_as("createwallet", params, "").await
    }

    pub async fn load_wallet(
        &self,
        name: &str,
        load_on_startup: Option<bool>,
    ) -> Result<WalletLoaded, CoreError> {
        let params = Params::new().arg(name).tail(load_on_startup).build();
        self.call_as("loadwallet", params, "").await
    }

    pub async fn unload_wallet(&self, name: &str) -> Result<(), CoreError> {
        // Older nodes answer `null`, newer ones `{"warning": ...}`.
        self.call_as::<IgnoredAny>("unloadwallet", vec![Value::from(name)], "")
            .await
            .map(|_| ())
    }

    pub async fn list_wallets(&self) -> Result<Vec<String>, CoreError> {
        self.call_as("listwallets", Vec::new(), "").await
    }
}

// ==============================================================================
// Wallet-scoped Operations (`/wallet/<name>`)
// ==============================================================================

impl WalletRpc<'_> {
    pub async fn get_new_address(
        &self,
        label: Option<&str>,
        address_type: Option<AddressType>,
    ) -> Result<String, CoreError> {
        let params = Params::new()
            .opt(label, "")
            .tail(address_type.map(AddressType::as_str))
            .build();
        self.call_as("getnewaddress", params).await
    }

    /// `getbalance`. The leading `dummy` argument must be `"*"` whenever a
    /// later argument is sent.
    pub async fn get_balance(
        &self,
        min_conf: Option<u32>,
        include_watchonly: Option<bool>,
    ) -> Result<Amount, CoreError> {
        const METHOD: &str = "getbalance";
        let params = Params::new()
            .opt(None::<&str>, "*")
            .opt(min_conf, 0)
            .opt(include_watchonly, false)
            .build();
        let value: Value = self.call_as(METHOD, params).await?;
        parse_btc_amount(&value).map_err(|e| CoreError::decode(METHOD, DecodeStage::Result, e))
    }

    pub async fn send_to_address(
        &self,
        address: &str,
        amount: Amount,
        options: &SendToAddressOptions,
    ) -> Result<Txid, CoreError> {
        let params = Params::new()
            .arg(address)
            .arg(to_btc_value(amount))
            .opt(options.comment.as_deref(), "")
            .opt(options.comment_to.as_deref(), "")
            .opt_non_default(options.subtract_fee_from_amount, false)
            .tail(options.replaceable)
            .tail(options.conf_target)
            .opt(
                options.estimate_mode.map(EstimateMode::as_str),
                EstimateMode::Unset.as_str(),
            )
            .opt(options.avoid_reuse, true)
            .tail(options.fee_rate)
            .build();
        self.call_as("sendtoaddress", params).await
    }

    pub async fn list_transactions(
        &self,
        label: Option<&str>,
        count: Option<u32>,
        skip: Option<u32>,
        include_watchonly: Option<bool>,
    ) -> Result<Vec<WalletTransaction>, CoreError> {
        let params = Params::new()
            .opt(label, "*")
            .opt(count, 10)
            .opt(skip, 0)
            .opt(include_watchonly, false)
            .build();
        self.call_as("listtransactions", params).await
    }

    pub async fn list_unspent(
        &self,
        options: &ListUnspentOptions,
    ) -> Result<Vec<Unspent>, CoreError> {
        let addresses =
            (!options.addresses.is_empty()).then(|| Value::from(options.addresses.clone()));
        let params = Params::new()
            .opt(options.min_conf, 1)
            .opt(options.max_conf, DEFAULT_MAX_CONF)
            .opt(addresses, Value::Array(Vec::new()))
            .opt(options.include_unsafe, true)
            .tail(options.query.as_ref().map(|q| q.to_json()))
            .build();
        self.call_as("listunspent", params).await
    }

    /// `gettransaction`. With `verbose`, `decoded` carries the decoded
    /// transaction.
    pub async fn get_transaction(
        &self,
        txid: &Txid,
        include_watchonly: Option<bool>,
        verbose: Option<bool>,
    ) -> Result<WalletTransactionDetails, CoreError> {
        let params = Params::new()
            .arg(txid.to_string())
            .opt(include_watchonly, false)
            .opt(verbose, false)
            .build();
        self.call_as("gettransaction", params).await
    }

    pub async fn get_wallet_info(&self) -> Result<WalletInfo, CoreError> {
        self.call_as("getwalletinfo", Vec::new()).await
    }

    pub async fn list_address_groupings(&self) -> Result<Vec<Vec<AddressGrouping>>, CoreError> {
        self.call_as("listaddressgroupings", Vec::new()).await
    }

    pub async fn sign_raw_transaction_with_wallet(
        &self,
        hex: &str,
        prev_txs: &[PrevTx],
        sighash_type: Option<&str>,
    ) -> Result<SignedRawTransaction, CoreError> {
        let prev_txs = (!prev_txs.is_empty())
            .then(|| Value::Array(prev_txs.iter().map(PrevTx::to_json).collect()));
        let params = Params::new()
            .arg(hex)
            .opt(prev_txs, Value::Array(Vec::new()))
            .tail(sighash_type)
            .build();
        self.call_as("signrawtransactionwithwallet", params).await
    }

    /// `dumpprivkey` (legacy wallets only). Returns the WIF-encoded key.
    pub async fn dump_priv_key(&self, address: &str) -> Result<String, CoreError> {
        self.call_as("dumpprivkey", vec![Value::from(address)])
            .await
    }

    pub async fn import_priv_key(
        &self,
        priv_key: &str,
        label: Option<&str>,
        rescan: Option<bool>,
    ) -> Result<(), CoreError> {
        let params = Params::new()
            .arg(priv_key)
            .opt(label, "")
            .opt(rescan, true)
            .build();
        self.call_as("importprivkey", params).await
    }

    pub async fn add_multisig_address(
        &self,
        nrequired: u32,
        keys: &[String],
        label: Option<&str>,
        address_type: Option<AddressType>,
    ) -> Result<MultisigAddress, CoreError> {
        let params = Params::new()
            .arg(nrequired)
            .arg(keys.to_vec())
            .opt(label, "")
            .tail(address_type.map(AddressType::as_str))
            .build();
        self.call_as("addmultisigaddress", params).await
    }
}
