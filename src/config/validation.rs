//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the default network exists
//! - Validate value ranges (chain ids, confirmations, intervals)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: HarnessConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;

use crate::config::schema::HarnessConfig;

/// Upper bound for a configured gas limit. Avalanche C-Chain blocks cap at
/// 15M gas and Ethereum mainnet at 30M, so anything above cannot be mined.
pub const MAX_GAS_LIMIT: u64 = 30_000_000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("default network '{0}' is not defined")]
    UnknownDefaultNetwork(String),

    #[error("network name must not be empty")]
    EmptyNetworkName,

    #[error("network '{network}': invalid rpc_url '{url}': {reason}")]
    InvalidRpcUrl {
        network: String,
        url: String,
        reason: String,
    },

    #[error("network '{0}': chain_id must be non-zero")]
    ZeroChainId(String),

    #[error("network '{0}': gas_limit must be non-zero when set")]
    ZeroGasLimit(String),

    #[error("network '{network}': gas_limit {limit} exceeds the block gas limit ({max})", max = MAX_GAS_LIMIT)]
    GasLimitTooHigh { network: String, limit: u64 },

    #[error("transactions.{0} must be at least 1")]
    ZeroConfirmations(&'static str),

    #[error("transactions.{0} must be non-zero")]
    ZeroDuration(&'static str),

    #[error("contract.{0} must not be empty")]
    EmptyContractSetting(&'static str),

    #[error("explorer.{field}: invalid URL '{url}'")]
    InvalidExplorerUrl { field: &'static str, url: String },
}

pub fn validate_config(config: &HarnessConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !config.networks.contains_key(&config.default_network) {
        errors.push(ValidationError::UnknownDefaultNetwork(
            config.default_network.clone(),
        ));
    }

    for (name, network) in &config.networks {
        if name.trim().is_empty() {
            errors.push(ValidationError::EmptyNetworkName);
            continue;
        }
        if let Err(e) = url::Url::parse(&network.rpc_url) {
            errors.push(ValidationError::InvalidRpcUrl {
                network: name.clone(),
                url: network.rpc_url.clone(),
                reason: e.to_string(),
            });
        }
        if network.chain_id == 0 {
            errors.push(ValidationError::ZeroChainId(name.clone()));
        }
        match network.gas_limit {
            Some(0) => errors.push(ValidationError::ZeroGasLimit(name.clone())),
            Some(limit) if limit > MAX_GAS_LIMIT => {
                errors.push(ValidationError::GasLimitTooHigh {
                    network: name.clone(),
                    limit,
                })
            }
            _ => {}
        }
    }

    let tx = &config.transactions;
    if tx.deploy_confirmations == 0 {
        errors.push(ValidationError::ZeroConfirmations("deploy_confirmations"));
    }
    if tx.mint_confirmations == 0 {
        errors.push(ValidationError::ZeroConfirmations("mint_confirmations"));
    }
    if tx.poll_interval_ms == 0 {
        errors.push(ValidationError::ZeroDuration("poll_interval_ms"));
    }
    if tx.rpc_timeout_secs == 0 {
        errors.push(ValidationError::ZeroDuration("rpc_timeout_secs"));
    }
    if tx.confirmation_timeout_secs == Some(0) {
        errors.push(ValidationError::ZeroDuration("confirmation_timeout_secs"));
    }

    if config.contract.name.trim().is_empty() {
        errors.push(ValidationError::EmptyContractSetting("name"));
    }
    if config.contract.artifacts_dir.trim().is_empty() {
        errors.push(ValidationError::EmptyContractSetting("artifacts_dir"));
    }
    if config.contract.token_uri.trim().is_empty() {
        errors.push(ValidationError::EmptyContractSetting("token_uri"));
    }

    for (field, value) in [
        ("api_url", &config.explorer.api_url),
        ("browser_url", &config.explorer.browser_url),
    ] {
        if url::Url::parse(value).is_err() {
            errors.push(ValidationError::InvalidExplorerUrl {
                field,
                url: value.clone(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
