//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the harness.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Metadata URI minted when none is given on the command line.
pub const DEFAULT_TOKEN_URI: &str =
    "https://ipfs.io/ipfs/bafybeib3skazl2dhjctsmiroc6ug5zketfooovt53ast5pxytcan2n3zba/avaxankr.json";

/// Root configuration for the harness.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Network used when `--network` is not given.
    pub default_network: String,

    /// Named networks. Built-in presets are merged under file entries.
    pub networks: BTreeMap<String, NetworkConfig>,

    /// Contract artifact settings.
    pub contract: ContractConfig,

    /// Submission and confirmation settings.
    pub transactions: TransactionConfig,

    /// Block explorer settings.
    pub explorer: ExplorerConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            default_network: "fuji".to_string(),
            networks: builtin_networks(),
            contract: ContractConfig::default(),
            transactions: TransactionConfig::default(),
            explorer: ExplorerConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// One JSON-RPC network.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NetworkConfig {
    /// Filled from the table key when loaded from a file.
    #[serde(default)]
    pub name: String,

    /// JSON-RPC endpoint URL.
    pub rpc_url: String,

    /// Chain ID (43114 Avalanche C-Chain, 43113 Fuji).
    pub chain_id: u64,

    /// Gas limit applied to every transaction; estimated by the node when unset.
    #[serde(default)]
    pub gas_limit: Option<u64>,
}

/// Avalanche mainnet and Fuji testnet through the Ankr public RPC.
pub fn builtin_networks() -> BTreeMap<String, NetworkConfig> {
    let mut networks = BTreeMap::new();
    networks.insert(
        "avalanche".to_string(),
        NetworkConfig {
            name: "avalanche".to_string(),
            rpc_url: "https://rpc.ankr.com/avalanche".to_string(),
            chain_id: 43114,
            gas_limit: None,
        },
    );
    networks.insert(
        "fuji".to_string(),
        NetworkConfig {
            name: "fuji".to_string(),
            rpc_url: "https://rpc.ankr.com/avalanche_fuji".to_string(),
            chain_id: 43113,
            gas_limit: None,
        },
    );
    networks
}

/// Where the compiled contract lives and what to mint.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ContractConfig {
    /// Contract name; resolves `<artifacts_dir>/contracts/<name>.sol/<name>.json`.
    pub name: String,

    /// Root of the compiler's artifact output.
    pub artifacts_dir: String,

    /// Token metadata URI passed to `mint`.
    pub token_uri: String,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            name: "AnkrAvalancheNFT".to_string(),
            artifacts_dir: "artifacts".to_string(),
            token_uri: DEFAULT_TOKEN_URI.to_string(),
        }
    }
}

/// Transaction submission and confirmation settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TransactionConfig {
    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// Receipt polling interval in milliseconds.
    pub poll_interval_ms: u64,

    /// Upper bound on the confirmation wait; unset waits indefinitely.
    pub confirmation_timeout_secs: Option<u64>,

    /// Confirmations required before a deployment is reported.
    pub deploy_confirmations: u64,

    /// Confirmations required before a mint is reported.
    pub mint_confirmations: u64,
}

impl Default for TransactionConfig {
    fn default() -> Self {
        Self {
            rpc_timeout_secs: 30,
            poll_interval_ms: 2000,
            confirmation_timeout_secs: None,
            deploy_confirmations: 1,
            mint_confirmations: 5,
        }
    }
}

/// Block explorer (Snowtrace) configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ExplorerConfig {
    /// Explorer API base URL.
    pub api_url: String,

    /// Explorer web UI base URL.
    pub browser_url: String,

    /// HTTP timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.snowtrace.io".to_string(),
            browser_url: "https://snowtrace.io/".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
