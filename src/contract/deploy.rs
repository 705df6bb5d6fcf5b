//! Contract deployment.

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, TxHash};
use alloy::rpc::types::TransactionRequest;

use crate::blockchain::{
    ensure_chain_id, BlockchainError, ChainBackend, ConfirmationPolicy, TxLifecycle,
};
use crate::config::{NetworkConfig, TransactionConfig};
use crate::contract::artifact::ContractArtifact;
use crate::error::HarnessResult;

/// A contract instance created by [`Deployer::deploy`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployedContract {
    pub address: Address,
    pub tx_hash: TxHash,
    pub block_number: u64,
}

/// Submits creation transactions for compiled artifacts.
pub struct Deployer<'a, B: ChainBackend> {
    backend: &'a B,
    network: &'a NetworkConfig,
    policy: ConfirmationPolicy,
}

impl<'a, B: ChainBackend> Deployer<'a, B> {
    pub fn new(backend: &'a B, network: &'a NetworkConfig, config: &TransactionConfig) -> Self {
        Self {
            backend,
            network,
            policy: ConfirmationPolicy::new(config.deploy_confirmations, config),
        }
    }

    /// Deploy `artifact` and wait until the contract exists on-chain.
    ///
    /// Every call creates a new, independent contract instance.
    pub async fn deploy(&self, artifact: &ContractArtifact) -> HarnessResult<DeployedContract> {
        let code = artifact.creation_code()?;
        ensure_chain_id(self.backend, self.network.chain_id).await?;

        let mut tx = TransactionRequest::default()
            .with_from(self.backend.signer_address())
            .with_chain_id(self.network.chain_id)
            .with_deploy_code(code.clone());
        if let Some(gas_limit) = self.network.gas_limit {
            tx = tx.with_gas_limit(gas_limit);
        }

        tracing::info!(
            contract = %artifact.contract_name,
            network = %self.network.name,
            "Deploying contract"
        );

        let mut lifecycle = TxLifecycle::new(self.backend, "deploy", self.policy);
        let receipt = lifecycle.run(tx).await?;

        let address = receipt
            .contract_address
            .ok_or(BlockchainError::NoContractAddress(receipt.tx_hash))?;

        tracing::info!(
            contract = %artifact.contract_name,
            address = %address,
            block_number = receipt.block_number,
            "Contract deployed"
        );

        Ok(DeployedContract {
            address,
            tx_hash: receipt.tx_hash,
            block_number: receipt.block_number,
        })
    }
}
