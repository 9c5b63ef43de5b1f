use crate::submitter::SubmissionError;
use alloy::network::Ethereum;
use alloy::primitives::{Address, Bytes, B256};
use alloy::providers::{Provider, ProviderBuilder};
use anyhow::Result;
use async_trait::async_trait;
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;
use url::Url;

/// Node-side collaborator of the submission loop. The `broadcast` future
/// resolves exactly once, when the node has either accepted the raw
/// transaction into its pool or rejected it.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Next-usable nonce for `address`, counting pool-pending transactions.
    async fn pending_nonce(&self, address: Address) -> Result<u64>;

    async fn broadcast(&self, raw: Bytes) -> Result<B256, SubmissionError>;
}

pub struct BlockchainClient {
    provider: Arc<dyn Provider<Ethereum>>,
    chain_id: u64,
}

impl BlockchainClient {
    pub async fn connect(rpc_url: &str) -> Result<Self> {
        info!("connecting to RPC: {}", rpc_url);

        let url = Url::parse(rpc_url)?;
        let provider = ProviderBuilder::new().connect_http(url);

        let chain_id = provider.get_chain_id().await?;
        info!("ethereum chain id: {}", chain_id);

        Ok(Self {
            provider: Arc::new(provider),
            chain_id,
        })
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn parse_address(addr: &str) -> Result<Address> {
        Address::from_str(addr).map_err(|e| anyhow::anyhow!("Invalid address {}: {}", addr, e))
    }
}

#[async_trait]
impl ChainClient for BlockchainClient {
    async fn pending_nonce(&self, address: Address) -> Result<u64> {
        let nonce = self
            .provider
            .get_transaction_count(address)
            .pending()
            .await?;
        Ok(nonce)
    }

    async fn broadcast(&self, raw: Bytes) -> Result<B256, SubmissionError> {
        match self.provider.send_raw_transaction(raw.as_ref()).await {
            Ok(pending) => Ok(*pending.tx_hash()),
            // A JSON-RPC error response is the node refusing the transaction
            // (nonce too low, underpriced, insufficient funds); anything else
            // is the transport failing before a verdict.
            Err(err) => match err.as_error_resp() {
                Some(payload) => Err(SubmissionError::Rejected(payload.message.to_string())),
                None => Err(SubmissionError::NetworkUnavailable(err.to_string())),
            },
        }
    }
}
