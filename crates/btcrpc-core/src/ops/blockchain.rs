use bitcoin::{BlockHash, Txid};
use serde_json::Value;

use crate::error::CoreError;
use crate::rpc::{decode_result, Params, RpcClient};
use crate::types::{
    AddressType, BlockHeader, BlockchainInfo, EstimateMode, EstimateSmartFee,
    GetBlockHeaderResult, GetBlockResult, MultisigAddress, NetworkInfo, TxOut,
    ValidateAddressInfo, Verbosity,
};

/// Confirmation targets `estimatesmartfee` accepts.
pub const ESTIMATE_TARGET_RANGE: std::ops::RangeInclusive<u32> = 1..=1008;

const DEFAULT_MAX_TRIES: u64 = 1_000_000;

// ==============================================================================
// Chain State
// ==============================================================================

impl RpcClient {
    pub async fn get_block_count(&self) -> Result<u64, CoreError> {
        self.call_as("getblockcount", Vec::new(), "").await
    }

    pub async fn get_best_block_hash(&self) -> Result<BlockHash, CoreError> {
        self.call_as("getbestblockhash", Vec::new(), "").await
    }

    pub async fn get_blockchain_info(&self) -> Result<BlockchainInfo, CoreError> {
        self.call_as("getblockchaininfo", Vec::new(), "").await
    }

    pub async fn get_network_info(&self) -> Result<NetworkInfo, CoreError> {
        self.call_as("getnetworkinfo", Vec::new(), "").await
    }

    pub async fn get_block_hash(&self, height: u64) -> Result<BlockHash, CoreError> {
        self.call_as("getblockhash", vec![Value::from(height)], "")
            .await
    }

    /// `getblock`. The verbosity argument is omitted at the node default
    /// (1) and the payload is decoded as the requested level's shape.
    pub async fn get_block(
        &self,
        hash: &BlockHash,
        verbosity: Verbosity,
    ) -> Result<GetBlockResult, CoreError> {
        const METHOD: &str = "getblock";
        let params = Params::new()
            .arg(hash.to_string())
            .opt_non_default(verbosity.level(), Verbosity::default().level())
            .build();

        let raw = self.call(METHOD, params, "").await?;
        Ok(match verbosity {
            Verbosity::Hex => GetBlockResult::Hex(decode_result(METHOD, &raw)?),
            Verbosity::Summary => GetBlockResult::Summary(decode_result(METHOD, &raw)?),
            Verbosity::Full => GetBlockResult::Full(decode_result(METHOD, &raw)?),
        })
    }

    pub async fn get_block_header(
        &self,
        hash: &BlockHash,
        verbose: bool,
    ) -> Result<GetBlockHeaderResult, CoreError> {
        const METHOD: &str = "getblockheader";
        let params = Params::new()
            .arg(hash.to_string())
            .opt_non_default(verbose, true)
            .build();

        let raw = self.call(METHOD, params, "").await?;
        if verbose {
            decode_result::<BlockHeader>(METHOD, &raw).map(GetBlockHeaderResult::Header)
        } else {
            decode_result(METHOD, &raw).map(GetBlockHeaderResult::Hex)
        }
    }

    /// Mine `nblocks` to `address` (regtest only).
    pub async fn generate_to_address(
        &self,
        nblocks: u32,
        address: &str,
        max_tries: Option<u64>,
    ) -> Result<Vec<BlockHash>, CoreError> {
        let params = Params::new()
            .arg(nblocks)
            .arg(address)
            .opt(max_tries, DEFAULT_MAX_TRIES)
            .build();
        self.call_as("generatetoaddress", params, "").await
    }

    // ==========================================================================
    // UTXO / Address / Fee Queries
    // ==========================================================================

    /// `gettxout`. `None` when the output is spent or unknown.
    pub async fn get_tx_out(
        &self,
        txid: &Txid,
        vout: u32,
        include_mempool: Option<bool>,
    ) -> Result<Option<TxOut>, CoreError> {
        let params = Params::new()
            .arg(txid.to_string())
            .arg(vout)
            .opt(include_mempool, true)
            .build();
        self.call_as("gettxout", params, "").await
    }

    pub async fn validate_address(&self, address: &str) -> Result<ValidateAddressInfo, CoreError> {
        self.call_as("validateaddress", vec![Value::from(address)], "")
            .await
    }

    /// `estimatesmartfee`. Targets outside 1..=1008 are rejected before any
    /// request is sent.
    pub async fn estimate_smart_fee(
        &self,
        conf_target: u32,
        mode: Option<EstimateMode>,
    ) -> Result<EstimateSmartFee, CoreError> {
        const METHOD: &str = "estimatesmartfee";
        if !ESTIMATE_TARGET_RANGE.contains(&conf_target) {
            return Err(CoreError::invalid_argument(
                METHOD,
                format!(
                    "conf_target {conf_target} outside {}..={}",
                    ESTIMATE_TARGET_RANGE.start(),
                    ESTIMATE_TARGET_RANGE.end()
                ),
            ));
        }

        let params = Params::new()
            .arg(conf_target)
            .tail(mode.map(EstimateMode::as_str))
            .build();
        self.call_as(METHOD, params, "").await
    }

    /// `createmultisig`. Keys are hex-encoded public keys.
    pub async fn create_multisig(
        &self,
        nrequired: u32,
        keys: &[String],
        address_type: Option<AddressType>,
    ) -> Result<MultisigAddress, CoreError> {
        let params = Params::new()
            .arg(nrequired)
            .arg(keys.to_vec())
            .tail(address_type.map(AddressType::as_str))
            .build();
        self.call_as("createmultisig", params, "").await
    }
}
