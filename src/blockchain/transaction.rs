//! Transaction submission and confirmation monitoring.
//!
//! # Responsibilities
//! - Broadcast a prepared transaction
//! - Poll for the receipt and count confirmations
//! - Track the `Idle → Submitted → Pending → Confirmed | Failed` lifecycle
//!
//! Failures are terminal. Nothing here retries.

use alloy::primitives::TxHash;
use alloy::rpc::types::TransactionRequest;
use std::time::Duration;
use tokio::time::{interval, timeout, MissedTickBehavior};

use crate::blockchain::client::ChainBackend;
use crate::blockchain::types::{BlockchainError, BlockchainResult, TxReceipt, TxStage};
use crate::config::TransactionConfig;

/// How long and how deep to wait for a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmationPolicy {
    /// Confirmations required, counting the inclusion block.
    pub required: u64,
    pub poll_interval: Duration,
    /// `None` waits until the node answers one way or the other.
    pub timeout: Option<Duration>,
}

impl ConfirmationPolicy {
    pub fn new(required: u64, config: &TransactionConfig) -> Self {
        Self {
            required: required.max(1),
            poll_interval: Duration::from_millis(config.poll_interval_ms),
            timeout: config.confirmation_timeout_secs.map(Duration::from_secs),
        }
    }
}

/// Drives one transaction through its lifecycle.
pub struct TxLifecycle<'a, B: ChainBackend> {
    backend: &'a B,
    policy: ConfirmationPolicy,
    label: &'static str,
    stage: TxStage,
    history: Vec<TxStage>,
}

impl<'a, B: ChainBackend> TxLifecycle<'a, B> {
    /// Create a lifecycle in the `Idle` stage.
    ///
    /// `label` names the operation in log events (e.g. "deploy").
    pub fn new(backend: &'a B, label: &'static str, policy: ConfirmationPolicy) -> Self {
        Self {
            backend,
            policy,
            label,
            stage: TxStage::Idle,
            history: vec![TxStage::Idle],
        }
    }

    /// Current stage.
    pub fn stage(&self) -> &TxStage {
        &self.stage
    }

    /// Every stage visited so far, in order.
    pub fn history(&self) -> &[TxStage] {
        &self.history
    }

    /// Submit `tx` and wait for the required confirmations.
    ///
    /// Returns the receipt once confirmed; any error moves the lifecycle to
    /// `Failed` and is returned unchanged.
    pub async fn run(&mut self, tx: TransactionRequest) -> BlockchainResult<TxReceipt> {
        match self.execute(tx).await {
            Ok(receipt) => Ok(receipt),
            Err(e) => {
                tracing::error!(operation = self.label, error = %e, "Transaction failed");
                self.advance(TxStage::Failed(e.to_string()));
                Err(e)
            }
        }
    }

    async fn execute(&mut self, tx: TransactionRequest) -> BlockchainResult<TxReceipt> {
        let tx_hash = self.backend.send_transaction(tx).await?;
        tracing::info!(operation = self.label, tx_hash = %tx_hash, "Transaction submitted");
        self.advance(TxStage::Submitted { tx_hash });

        match self.policy.timeout {
            Some(limit) => {
                let waited = timeout(limit, self.wait_for_confirmations(tx_hash)).await;
                match waited {
                    Ok(result) => result,
                    Err(_) => Err(BlockchainError::ConfirmationTimeout {
                        tx_hash,
                        confirmations: self.confirmations(),
                        required: self.policy.required,
                    }),
                }
            }
            None => self.wait_for_confirmations(tx_hash).await,
        }
    }

    async fn wait_for_confirmations(&mut self, tx_hash: TxHash) -> BlockchainResult<TxReceipt> {
        let required = self.policy.required;
        let mut ticker = interval(self.policy.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            let receipt = match self.backend.transaction_receipt(tx_hash).await? {
                Some(r) => r,
                None => {
                    tracing::debug!(tx_hash = %tx_hash, "Transaction pending");
                    continue;
                }
            };

            if !receipt.success {
                return Err(BlockchainError::Reverted(tx_hash));
            }

            let current_block = self.backend.block_number().await?;
            let confirmations = current_block.saturating_sub(receipt.block_number) + 1;

            if confirmations > self.confirmations() {
                tracing::debug!(
                    tx_hash = %tx_hash,
                    confirmations = confirmations,
                    required = required,
                    "Waiting for confirmations"
                );
                self.advance(TxStage::Pending {
                    confirmations: confirmations.min(required),
                    required,
                });
            }

            if confirmations >= required {
                tracing::info!(
                    operation = self.label,
                    tx_hash = %tx_hash,
                    block_number = receipt.block_number,
                    confirmations = confirmations,
                    "Transaction confirmed"
                );
                self.advance(TxStage::Confirmed {
                    block_number: receipt.block_number,
                });
                return Ok(receipt);
            }
        }
    }

    fn confirmations(&self) -> u64 {
        match self.stage {
            TxStage::Pending { confirmations, .. } => confirmations,
            _ => 0,
        }
    }

    fn advance(&mut self, next: TxStage) {
        self.stage = next.clone();
        self.history.push(next);
    }
}
