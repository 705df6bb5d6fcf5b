//! Chain-specific types and error definitions.

use alloy::primitives::{Address, TxHash};
use thiserror::Error;

// Re-export NetworkConfig from config module to avoid duplication
pub use crate::config::schema::NetworkConfig;

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainId(pub u64);

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ChainId> for u64 {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

/// Errors that can occur during blockchain operations.
#[derive(Debug, Error)]
pub enum BlockchainError {
    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// Transaction was not confirmed within the configured wait.
    #[error("Transaction {tx_hash} not confirmed: {confirmations}/{required} confirmations observed")]
    ConfirmationTimeout {
        tx_hash: TxHash,
        confirmations: u64,
        required: u64,
    },

    /// Transaction was mined but reverted on-chain.
    #[error("Transaction {0} reverted")]
    Reverted(TxHash),

    /// Invalid or missing private key.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Chain configuration mismatch.
    #[error("Chain ID mismatch: expected {expected}, got {actual}")]
    ChainMismatch { expected: u64, actual: u64 },

    /// Deployment receipt did not carry a contract address.
    #[error("Deployment transaction {0} produced no contract address")]
    NoContractAddress(TxHash),
}

/// Result type for blockchain operations.
pub type BlockchainResult<T> = Result<T, BlockchainError>;

/// The parts of a transaction receipt the harness reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxReceipt {
    pub tx_hash: TxHash,
    pub block_number: u64,
    /// `false` when the transaction reverted.
    pub success: bool,
    /// Set for contract creation transactions.
    pub contract_address: Option<Address>,
}

/// Lifecycle stage of a submitted transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxStage {
    /// Nothing sent yet.
    Idle,
    /// Sent to the node, no receipt observed.
    Submitted { tx_hash: TxHash },
    /// Included in a block, counting confirmations (inclusion counts as one).
    Pending { confirmations: u64, required: u64 },
    /// Reached the required confirmation depth.
    Confirmed { block_number: u64 },
    /// Terminal failure with the reported reason.
    Failed(String),
}

impl TxStage {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TxStage::Confirmed { .. } | TxStage::Failed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_id_conversion() {
        let chain_id = ChainId::from(43113u64);
        assert_eq!(chain_id.0, 43113);
        assert_eq!(u64::from(chain_id), 43113);
    }

    #[test]
    fn test_error_display() {
        let err = BlockchainError::Timeout(10);
        assert_eq!(err.to_string(), "RPC timeout after 10 seconds");

        let err = BlockchainError::ChainMismatch {
            expected: 43113,
            actual: 1,
        };
        assert!(err.to_string().contains("43113"));

        let err = BlockchainError::ConfirmationTimeout {
            tx_hash: TxHash::ZERO,
            confirmations: 2,
            required: 5,
        };
        assert!(err.to_string().contains("2/5"));
    }

    #[test]
    fn test_terminal_stages() {
        assert!(!TxStage::Idle.is_terminal());
        assert!(!TxStage::Pending {
            confirmations: 1,
            required: 5
        }
        .is_terminal());
        assert!(TxStage::Confirmed { block_number: 7 }.is_terminal());
        assert!(TxStage::Failed("boom".into()).is_terminal());
    }
}
