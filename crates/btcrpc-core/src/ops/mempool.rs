use std::collections::HashMap;

use bitcoin::Txid;
use serde_json::Value;

use crate::error::CoreError;
use crate::rpc::{decode_result, Params, RpcClient};
use crate::types::{MempoolEntry, MempoolInfo, MempoolSequence, RawMempool};

impl RpcClient {
    pub async fn get_mempool_info(&self) -> Result<MempoolInfo, CoreError> {
        self.call_as("getmempoolinfo", Vec::new(), "").await
    }

    /// `getrawmempool`. The node accepts `mempool_sequence` only with
    /// `verbose = false`; the combination is rejected here instead.
    pub async fn get_raw_mempool(
        &self,
        verbose: bool,
        mempool_sequence: bool,
    ) -> Result<RawMempool, CoreError> {
        const METHOD: &str = "getrawmempool";
        if verbose && mempool_sequence {
            return Err(CoreError::invalid_argument(
                METHOD,
                "verbose and mempool_sequence cannot both be set",
            ));
        }

        let params = Params::new()
            .arg(verbose)
            .opt_non_default(mempool_sequence, false)
            .build();
        let raw = self.call(METHOD, params, "").await?;

        if verbose {
            decode_result(METHOD, &raw).map(RawMempool::Verbose)
        } else if mempool_sequence {
            decode_result::<MempoolSequence>(METHOD, &raw).map(|s| RawMempool::Sequence {
                txids: s.txids,
                mempool_sequence: s.mempool_sequence,
            })
        } else {
            decode_result(METHOD, &raw).map(RawMempool::Txids)
        }
    }

    pub async fn get_raw_mempool_txids(&self) -> Result<Vec<Txid>, CoreError> {
        self.call_as("getrawmempool", vec![Value::Bool(false)], "")
            .await
    }

    pub async fn get_raw_mempool_verbose(&self) -> Result<HashMap<Txid, MempoolEntry>, CoreError> {
        self.call_as("getrawmempool", vec![Value::Bool(true)], "")
            .await
    }

    pub async fn get_mempool_entry(&self, txid: &Txid) -> Result<MempoolEntry, CoreError> {
        self.call_as("getmempoolentry", vec![Value::from(txid.to_string())], "")
            .await
    }
}
