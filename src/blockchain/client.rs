//! Blockchain RPC client with timeout and error handling.
//!
//! # Responsibilities
//! - Connect to the selected network's JSON-RPC endpoint with a signing wallet
//! - Query chain state (chain id, block number, receipts)
//! - Broadcast transactions through the wallet filler
//! - Bound every request by the configured RPC timeout

use alloy::primitives::{Address, TxHash};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::{TransactionReceipt, TransactionRequest};
use std::future::{Future, IntoFuture};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use crate::blockchain::types::{
    BlockchainError, BlockchainResult, ChainId, NetworkConfig, TxReceipt,
};
use crate::blockchain::wallet::Wallet;

/// The node operations the deploy and mint workflows depend on.
///
/// Implemented by [`RpcBackend`] for real networks; tests substitute a
/// scripted chain.
pub trait ChainBackend: Send + Sync {
    /// Chain ID reported by the node.
    fn chain_id(&self) -> impl Future<Output = BlockchainResult<u64>> + Send;

    /// Latest block number.
    fn block_number(&self) -> impl Future<Output = BlockchainResult<u64>> + Send;

    /// Sign and broadcast a transaction, returning its hash.
    fn send_transaction(
        &self,
        tx: TransactionRequest,
    ) -> impl Future<Output = BlockchainResult<TxHash>> + Send;

    /// Receipt for a mined transaction, `None` while pending.
    fn transaction_receipt(
        &self,
        tx_hash: TxHash,
    ) -> impl Future<Output = BlockchainResult<Option<TxReceipt>>> + Send;

    /// Address transactions are sent from.
    fn signer_address(&self) -> Address;
}

/// Fail before submitting anything when the node serves another chain.
pub async fn ensure_chain_id<B: ChainBackend>(backend: &B, expected: u64) -> BlockchainResult<()> {
    let actual = backend.chain_id().await?;
    if actual != expected {
        return Err(BlockchainError::ChainMismatch { expected, actual });
    }
    Ok(())
}

/// JSON-RPC backed chain access with a local signing wallet.
#[derive(Clone)]
pub struct RpcBackend {
    provider: Arc<dyn Provider + Send + Sync>,
    network: NetworkConfig,
    signer: Address,
    /// Request timeout duration.
    timeout_duration: Duration,
}

impl RpcBackend {
    /// Build a provider for `network` that signs with `wallet`.
    ///
    /// No request is made here; connectivity problems surface on first use.
    pub fn connect(
        network: &NetworkConfig,
        wallet: &Wallet,
        rpc_timeout_secs: u64,
    ) -> BlockchainResult<Self> {
        let url: url::Url = network.rpc_url.parse().map_err(|e| {
            BlockchainError::Rpc(format!("Invalid RPC URL '{}': {}", network.rpc_url, e))
        })?;

        let provider = ProviderBuilder::new()
            .wallet(wallet.ethereum_wallet())
            .connect_http(url);

        tracing::info!(
            network = %network.name,
            rpc_url = %network.rpc_url,
            chain_id = network.chain_id,
            signer = %wallet.address(),
            "Blockchain client initialized"
        );

        Ok(Self {
            provider: Arc::new(provider) as Arc<dyn Provider + Send + Sync>,
            network: network.clone(),
            signer: wallet.address(),
            timeout_duration: Duration::from_secs(rpc_timeout_secs),
        })
    }

    /// Get the chain ID from the RPC as a typed value.
    pub async fn get_chain_id(&self) -> BlockchainResult<ChainId> {
        self.chain_id().await.map(ChainId)
    }

    /// Get the network this backend talks to.
    pub fn network(&self) -> &NetworkConfig {
        &self.network
    }

    async fn request<T, E, F>(&self, what: &str, fut: F) -> BlockchainResult<T>
    where
        F: IntoFuture<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        match timeout(self.timeout_duration, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                tracing::warn!(request = what, error = %e, "RPC error");
                Err(BlockchainError::Rpc(format!("{} failed: {}", what, e)))
            }
            Err(_) => {
                tracing::warn!(request = what, "RPC timeout");
                Err(BlockchainError::Timeout(self.timeout_duration.as_secs()))
            }
        }
    }
}

impl ChainBackend for RpcBackend {
    async fn chain_id(&self) -> BlockchainResult<u64> {
        self.request("eth_chainId", self.provider.get_chain_id()).await
    }

    async fn block_number(&self) -> BlockchainResult<u64> {
        self.request("eth_blockNumber", self.provider.get_block_number()).await
    }

    async fn send_transaction(&self, tx: TransactionRequest) -> BlockchainResult<TxHash> {
        let pending = self
            .request("eth_sendRawTransaction", self.provider.send_transaction(tx))
            .await?;
        Ok(*pending.tx_hash())
    }

    async fn transaction_receipt(&self, tx_hash: TxHash) -> BlockchainResult<Option<TxReceipt>> {
        let receipt = self
            .request(
                "eth_getTransactionReceipt",
                self.provider.get_transaction_receipt(tx_hash),
            )
            .await?;
        Ok(receipt.and_then(|r| to_tx_receipt(&r)))
    }

    fn signer_address(&self) -> Address {
        self.signer
    }
}

/// Receipts without a block number are still pending and map to `None`.
fn to_tx_receipt(receipt: &TransactionReceipt) -> Option<TxReceipt> {
    Some(TxReceipt {
        tx_hash: receipt.transaction_hash,
        block_number: receipt.block_number?,
        success: receipt.status(),
        contract_address: receipt.contract_address,
    })
}

impl std::fmt::Debug for RpcBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcBackend")
            .field("network", &self.network.name)
            .field("rpc_url", &self.network.rpc_url)
            .field("chain_id", &self.network.chain_id)
            .field("timeout_secs", &self.timeout_duration.as_secs())
            .finish()
    }
}
