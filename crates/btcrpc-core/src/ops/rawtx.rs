use bitcoin::{BlockHash, Txid};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::CoreError;
use crate::rpc::{Params, RpcClient};
use crate::types::{
    CreateRawTransactionInput, GetRawTransactionResult, RawTransactionInfo, TxOutputSpec,
};

impl RpcClient {
    /// `getrawtransaction`. The payload is decoded as a hex string or a
    /// decoded transaction according to `verbose`.
    ///
    /// Without `-txindex` the node only finds mempool transactions, or
    /// confirmed ones when `block_hash` names the containing block.
    pub async fn get_raw_transaction(
        &self,
        txid: &Txid,
        verbose: bool,
        block_hash: Option<&BlockHash>,
    ) -> Result<GetRawTransactionResult, CoreError> {
        if verbose {
            self.raw_transaction_as(txid, true, block_hash)
                .await
                .map(|tx| GetRawTransactionResult::Decoded(Box::new(tx)))
        } else {
            self.raw_transaction_as(txid, false, block_hash)
                .await
                .map(GetRawTransactionResult::Hex)
        }
    }

    pub async fn get_raw_transaction_hex(&self, txid: &Txid) -> Result<String, CoreError> {
        self.raw_transaction_as(txid, false, None).await
    }

    pub async fn get_raw_transaction_verbose(
        &self,
        txid: &Txid,
    ) -> Result<RawTransactionInfo, CoreError> {
        self.raw_transaction_as(txid, true, None).await
    }

    async fn raw_transaction_as<T: DeserializeOwned>(
        &self,
        txid: &Txid,
        verbose: bool,
        block_hash: Option<&BlockHash>,
    ) -> Result<T, CoreError> {
        let params = Params::new()
            .arg(txid.to_string())
            .arg(verbose)
            .tail(block_hash.map(ToString::to_string))
            .build();
        self.call_as("getrawtransaction", params, "").await
    }

    /// `createrawtransaction`. Returns the unsigned transaction hex.
    pub async fn create_raw_transaction(
        &self,
        inputs: &[CreateRawTransactionInput],
        outputs: &[TxOutputSpec],
        locktime: Option<u32>,
        replaceable: Option<bool>,
    ) -> Result<String, CoreError> {
        let inputs: Vec<Value> = inputs.iter().map(CreateRawTransactionInput::to_json).collect();
        let outputs: Vec<Value> = outputs.iter().map(TxOutputSpec::to_json).collect();
        let params = Params::new()
            .arg(inputs)
            .arg(outputs)
            .opt(locktime, 0)
            .opt(replaceable, false)
            .build();
        self.call_as("createrawtransaction", params, "").await
    }

    /// `sendrawtransaction`. `max_fee_rate` is in BTC/kvB; `None` keeps the
    /// node's 0.10 cap.
    pub async fn send_raw_transaction(
        &self,
        hex: &str,
        max_fee_rate: Option<f64>,
    ) -> Result<Txid, CoreError> {
        let params = Params::new().arg(hex).tail(max_fee_rate).build();
        self.call_as("sendrawtransaction", params, "").await
    }
}
