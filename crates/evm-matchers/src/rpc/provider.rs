use std::{sync::Arc, time::Duration};

use alloy_primitives::{Address, BlockHash, TxHash, B256, U256};
use async_trait::async_trait;
use jsonrpsee::{
    core::{client::ClientT, params::ArrayParams, ClientError},
    http_client::{HttpClient, HttpClientBuilder},
    rpc_params,
};
use serde::de::DeserializeOwned;
use tracing::trace;

use super::{
    transaction::{ReceiptPolling, RpcTransaction},
    types::RpcBlock,
};
use crate::{
    BlockRecord, BlockTag, BlockTransactionsKind, ChainProvider, ProviderError,
    RpcProviderConfig, StateReader, TxReceipt,
};

/// [`ChainProvider`] talking to an Ethereum JSON-RPC endpoint over HTTP.
#[derive(Debug, Clone)]
pub struct JsonRpcProvider {
    client: Arc<HttpClient>,
    config: RpcProviderConfig,
}

impl JsonRpcProvider {
    /// Creates a provider for `config.rpc_url`. No request is made until first use.
    pub fn connect(config: RpcProviderConfig) -> Result<Self, ProviderError> {
        let client = HttpClientBuilder::default()
            .request_timeout(Duration::from_millis(config.request_timeout_ms))
            .build(&config.rpc_url)
            .map_err(|e| ProviderError::network(e.to_string()))?;

        Ok(Self {
            client: Arc::new(client),
            config,
        })
    }

    pub fn config(&self) -> &RpcProviderConfig {
        &self.config
    }

    /// Handle to an already-sent transaction, waited on by polling this provider.
    pub fn transaction(&self, tx_hash: TxHash) -> RpcTransaction<Self> {
        RpcTransaction::new(tx_hash, self.clone(), ReceiptPolling::from(&self.config))
    }

    async fn request<R: DeserializeOwned>(
        &self,
        method: &str,
        params: ArrayParams,
    ) -> Result<R, ProviderError> {
        trace!(%method, "sending rpc request");
        self.client
            .request(method, params)
            .await
            .map_err(|err| map_client_error(method, err))
    }
}

#[async_trait]
impl StateReader for JsonRpcProvider {
    async fn balance_at(&self, address: Address, block: BlockTag) -> Result<U256, ProviderError> {
        self.request("eth_getBalance", rpc_params![address, block])
            .await
    }

    async fn storage_at(
        &self,
        address: Address,
        slot: U256,
        block: BlockTag,
    ) -> Result<B256, ProviderError> {
        self.request("eth_getStorageAt", rpc_params![address, slot, block])
            .await
    }
}

#[async_trait]
impl ChainProvider for JsonRpcProvider {
    async fn block_by_hash(
        &self,
        block_hash: BlockHash,
        kind: BlockTransactionsKind,
    ) -> Result<Option<BlockRecord>, ProviderError> {
        let block: Option<RpcBlock> = self
            .request("eth_getBlockByHash", rpc_params![block_hash, kind.is_full()])
            .await?;
        Ok(block.map(Into::into))
    }

    async fn transaction_receipt(
        &self,
        tx_hash: TxHash,
    ) -> Result<Option<TxReceipt>, ProviderError> {
        self.request("eth_getTransactionReceipt", rpc_params![tx_hash])
            .await
    }
}

fn map_client_error(method: &str, err: ClientError) -> ProviderError {
    match err {
        ClientError::Call(err) => ProviderError::rpc(format!("{method}: {err}")),
        ClientError::ParseError(err) => ProviderError::decode(format!("{method}: {err}")),
        err => ProviderError::network(format!("{method}: {err}")),
    }
}

#[cfg(test)]
mod tests {
    use jsonrpsee::types::ErrorObject;

    use super::*;

    #[test]
    fn test_call_errors_map_to_rpc() {
        let err = ClientError::Call(ErrorObject::owned(-32000, "header not found", None::<()>));
        let mapped = map_client_error("eth_getBalance", err);

        assert!(matches!(mapped, ProviderError::Rpc(_)));
        assert!(mapped.to_string().contains("header not found"));
    }

    #[test]
    fn test_parse_errors_map_to_decode() {
        let parse_err = serde_json::from_str::<RpcBlock>("{}").unwrap_err();
        let mapped = map_client_error("eth_getBlockByHash", ClientError::ParseError(parse_err));

        assert!(matches!(mapped, ProviderError::Decode(_)));
    }

    #[test]
    fn test_transport_errors_map_to_network() {
        let mapped = map_client_error("eth_getBalance", ClientError::RequestTimeout);
        assert!(matches!(mapped, ProviderError::Network(_)));
    }

    #[tokio::test]
    async fn test_connect_rejects_invalid_url() {
        let err = JsonRpcProvider::connect(RpcProviderConfig::new("not a url")).unwrap_err();
        assert!(matches!(err, ProviderError::Network(_)));
    }

    #[tokio::test]
    async fn test_transaction_handle_uses_config() {
        let mut config = RpcProviderConfig::new("http://127.0.0.1:8545");
        config.receipt_poll_interval_ms = 25;
        config.receipt_max_polls = Some(4);
        let provider = JsonRpcProvider::connect(config).unwrap();

        let tx = provider.transaction(B256::repeat_byte(0x11));
        assert_eq!(
            tx.polling(),
            ReceiptPolling {
                interval: Duration::from_millis(25),
                max_polls: Some(4),
            }
        );
    }
}
