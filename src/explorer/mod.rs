//! Block explorer (Snowtrace / Etherscan-compatible) access.
//!
//! # Responsibilities
//! - Browser links for deployed contracts and transactions
//! - Source verification status of a contract via the explorer API
//!
//! Publishing sources for verification is left to the compiler toolchain.

use alloy::primitives::{Address, TxHash};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::config::ExplorerConfig;

#[derive(Debug, Error)]
pub enum ExplorerError {
    #[error("Explorer request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Explorer returned status {0}")]
    Status(reqwest::StatusCode),

    /// `status: "0"` for anything other than unverified source.
    #[error("Explorer API error: {0}")]
    Api(String),
}

/// `result` text the explorer returns for contracts without verified source.
const NOT_VERIFIED_RESULT: &str = "Contract source code not verified";

/// Whether the explorer has verified source for a contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationStatus {
    Verified,
    /// Explorer's explanation, e.g. "Contract source code not verified".
    NotVerified(String),
}

/// Etherscan-style API envelope.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    status: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    result: serde_json::Value,
}

#[derive(Debug, Clone)]
pub struct ExplorerClient {
    http: reqwest::Client,
    config: ExplorerConfig,
    api_key: Option<String>,
}

impl ExplorerClient {
    pub fn new(config: ExplorerConfig, api_key: Option<String>) -> Result<Self, ExplorerError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self::with_http(http, config, api_key))
    }

    /// Use a caller-built HTTP client (proxy or TLS settings).
    pub fn with_http(http: reqwest::Client, config: ExplorerConfig, api_key: Option<String>) -> Self {
        Self {
            http,
            config,
            api_key,
        }
    }

    /// Explorer page for a contract or account.
    pub fn address_url(&self, address: Address) -> String {
        format!("{}/address/{}", self.browser_base(), address)
    }

    /// Explorer page for a transaction.
    pub fn tx_url(&self, tx_hash: TxHash) -> String {
        format!("{}/tx/{}", self.browser_base(), tx_hash)
    }

    fn browser_base(&self) -> &str {
        self.config.browser_url.trim_end_matches('/')
    }

    /// Ask the explorer whether `address` has verified source code.
    pub async fn verification_status(
        &self,
        address: Address,
    ) -> Result<VerificationStatus, ExplorerError> {
        let endpoint = format!("{}/api", self.config.api_url.trim_end_matches('/'));
        let address = address.to_string();

        let mut query = vec![
            ("module", "contract"),
            ("action", "getabi"),
            ("address", address.as_str()),
        ];
        if let Some(key) = &self.api_key {
            query.push(("apikey", key.as_str()));
        }

        let res = self.http.get(&endpoint).query(&query).send().await?;
        let status = res.status();
        if !status.is_success() {
            tracing::warn!(%status, endpoint = %endpoint, "Explorer API error");
            return Err(ExplorerError::Status(status));
        }

        let body: ApiResponse = res.json().await?;
        tracing::debug!(status = %body.status, message = %body.message, "Explorer response");

        if body.status == "1" {
            return Ok(VerificationStatus::Verified);
        }

        let reason = match body.result {
            serde_json::Value::String(s) if !s.is_empty() => s,
            _ => body.message,
        };
        if reason.eq_ignore_ascii_case(NOT_VERIFIED_RESULT) {
            Ok(VerificationStatus::NotVerified(reason))
        } else {
            tracing::warn!(reason = %reason, "Explorer API rejected request");
            Err(ExplorerError::Api(reason))
        }
    }
}
