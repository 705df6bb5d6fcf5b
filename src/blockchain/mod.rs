//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! Credentials (PRIVATE_KEY) + NetworkConfig
//!     → wallet.rs (key loading, signing)
//!     → client.rs (RPC connection with timeouts)
//!     → transaction.rs (broadcast, confirm)
//! ```
//!
//! # Security Constraints
//! - Private keys ONLY from the environment (or `.env`)
//! - Never log private keys or sensitive data
//! - All RPC calls have configurable timeouts

pub mod client;
pub mod transaction;
pub mod types;
pub mod wallet;

pub use client::{ensure_chain_id, ChainBackend, RpcBackend};
pub use transaction::{ConfirmationPolicy, TxLifecycle};
pub use types::{BlockchainError, BlockchainResult, ChainId, TxReceipt, TxStage};
pub use wallet::Wallet;
