//! Token minting against a deployed contract.

use alloy::network::TransactionBuilder;
use alloy::primitives::Address;
use alloy::rpc::types::TransactionRequest;
use alloy::sol;
use alloy::sol_types::SolCall;

use crate::blockchain::{ensure_chain_id, ChainBackend, ConfirmationPolicy, TxLifecycle, TxReceipt};
use crate::config::{ConfigError, Credentials, NetworkConfig, TransactionConfig};
use crate::contract::artifact::{ArtifactError, ContractArtifact};
use crate::error::HarnessResult;

sol! {
    /// Mints a new token with `tokenURI` metadata to `recipient`.
    function mint(address recipient, string tokenURI) returns (uint256);
}

/// Solidity parameter types of the mint entry point.
pub const MINT_INPUTS: [&str; 2] = ["address", "string"];

/// One token to mint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintRequest {
    pub contract: Address,
    pub recipient: Address,
    pub token_uri: String,
}

impl MintRequest {
    /// Build from `CONTRACT_ADDRESS`, `PUBLIC_KEY` and the chosen URI.
    pub fn from_credentials(
        credentials: &Credentials,
        token_uri: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            contract: credentials.contract_address()?,
            recipient: credentials.recipient()?,
            token_uri: token_uri.into(),
        })
    }

    /// ABI-encoded call data.
    pub fn calldata(&self) -> Vec<u8> {
        mintCall {
            recipient: self.recipient,
            tokenURI: self.token_uri.clone(),
        }
        .abi_encode()
    }
}

/// Check the artifact's interface exposes `mint(address,string)`.
pub fn check_mint_interface(artifact: &ContractArtifact) -> Result<(), ArtifactError> {
    let function = artifact.function("mint", &MINT_INPUTS)?;
    debug_assert_eq!(function.selector().0, mintCall::SELECTOR);
    Ok(())
}

/// Calls the mint entry point of a deployed contract.
pub struct Minter<'a, B: ChainBackend> {
    backend: &'a B,
    network: &'a NetworkConfig,
    policy: ConfirmationPolicy,
}

impl<'a, B: ChainBackend> Minter<'a, B> {
    pub fn new(backend: &'a B, network: &'a NetworkConfig, config: &TransactionConfig) -> Self {
        Self {
            backend,
            network,
            policy: ConfirmationPolicy::new(config.mint_confirmations, config),
        }
    }

    /// Mint one token and wait for the configured confirmation depth.
    ///
    /// Requests are not deduplicated; repeating a call mints another token.
    pub async fn mint(
        &self,
        artifact: &ContractArtifact,
        request: &MintRequest,
    ) -> HarnessResult<TxReceipt> {
        check_mint_interface(artifact)?;
        ensure_chain_id(self.backend, self.network.chain_id).await?;

        let mut tx = TransactionRequest::default()
            .with_from(self.backend.signer_address())
            .with_to(request.contract)
            .with_chain_id(self.network.chain_id)
            .with_input(request.calldata());
        if let Some(gas_limit) = self.network.gas_limit {
            tx = tx.with_gas_limit(gas_limit);
        }

        tracing::info!(
            contract = %request.contract,
            recipient = %request.recipient,
            token_uri = %request.token_uri,
            required_confirmations = self.policy.required,
            "Minting token"
        );

        let mut lifecycle = TxLifecycle::new(self.backend, "mint", self.policy);
        let receipt = lifecycle.run(tx).await?;
        Ok(receipt)
    }
}
