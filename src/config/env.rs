//! Credentials and addresses taken from the environment.
//!
//! A `.env` file in the working directory is loaded first; real environment
//! variables win over it. Nothing is required here: each operation asks for
//! the values it needs and fails then.

use alloy::primitives::Address;
use std::path::PathBuf;

use crate::config::loader::ConfigError;

/// Hex private key of the signing account.
pub const PRIVATE_KEY_VAR: &str = "PRIVATE_KEY";
/// Recipient of minted tokens.
pub const PUBLIC_KEY_VAR: &str = "PUBLIC_KEY";
/// Address printed by `deploy`.
pub const CONTRACT_ADDRESS_VAR: &str = "CONTRACT_ADDRESS";
/// Snowtrace API key.
pub const EXPLORER_API_KEY_VAR: &str = "SNOWTRACE_API_KEY";

#[derive(Clone, Default)]
pub struct Credentials {
    pub private_key: Option<String>,
    pub recipient: Option<String>,
    pub contract_address: Option<String>,
    pub explorer_api_key: Option<String>,
}

/// Load `.env` from the working directory (or a parent) into the process
/// environment, without overriding variables that are already set.
///
/// Runs before logging exists, since `.env` may carry `RUST_LOG`; the caller
/// reports the returned path once a subscriber is installed.
pub fn load_dotenv() -> Option<PathBuf> {
    dotenv::dotenv().ok()
}

impl Credentials {
    /// Read from the process environment. Call [`load_dotenv`] first.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read through an arbitrary lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            private_key: get(PRIVATE_KEY_VAR),
            recipient: get(PUBLIC_KEY_VAR),
            contract_address: get(CONTRACT_ADDRESS_VAR),
            explorer_api_key: get(EXPLORER_API_KEY_VAR),
        }
    }

    /// Mint recipient.
    pub fn recipient(&self) -> Result<Address, ConfigError> {
        parse_address(PUBLIC_KEY_VAR, self.recipient.as_deref())
    }

    /// Deployed contract.
    pub fn contract_address(&self) -> Result<Address, ConfigError> {
        parse_address(CONTRACT_ADDRESS_VAR, self.contract_address.as_deref())
    }
}

fn parse_address(var: &'static str, value: Option<&str>) -> Result<Address, ConfigError> {
    let value = value.ok_or(ConfigError::MissingVar(var))?;
    value.parse().map_err(|e| ConfigError::InvalidAddress {
        var,
        reason: format!("{}", e),
    })
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .field("recipient", &self.recipient)
            .field("contract_address", &self.contract_address)
            .field("explorer_api_key", &self.explorer_api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_reads_all_variables() {
        let creds = Credentials::from_lookup(lookup(&[
            (PRIVATE_KEY_VAR, "abc"),
            (PUBLIC_KEY_VAR, "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"),
            (CONTRACT_ADDRESS_VAR, "0x5FbDB2315678afecb367f032d93F642f64180aa3"),
            (EXPLORER_API_KEY_VAR, "key"),
        ]));
        assert_eq!(creds.private_key.as_deref(), Some("abc"));
        assert_eq!(creds.explorer_api_key.as_deref(), Some("key"));
        assert_eq!(
            creds.contract_address().unwrap().to_string(),
            "0x5FbDB2315678afecb367f032d93F642f64180aa3"
        );
        assert!(creds.recipient().is_ok());
    }

    #[test]
    fn test_empty_value_is_unset() {
        let creds = Credentials::from_lookup(lookup(&[(PRIVATE_KEY_VAR, "  ")]));
        assert!(creds.private_key.is_none());
    }

    #[test]
    fn test_missing_and_malformed_addresses() {
        let creds = Credentials::from_lookup(lookup(&[(CONTRACT_ADDRESS_VAR, "0x1234")]));
        assert!(matches!(
            creds.recipient(),
            Err(ConfigError::MissingVar(PUBLIC_KEY_VAR))
        ));
        assert!(matches!(
            creds.contract_address(),
            Err(ConfigError::InvalidAddress { var: CONTRACT_ADDRESS_VAR, .. })
        ));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let creds = Credentials::from_lookup(lookup(&[
            (PRIVATE_KEY_VAR, "deadbeef"),
            (EXPLORER_API_KEY_VAR, "topsecret"),
        ]));
        let rendered = format!("{:?}", creds);
        assert!(!rendered.contains("deadbeef"));
        assert!(!rendered.contains("topsecret"));
    }
}
