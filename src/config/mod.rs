//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! harness.toml (optional)
//!     → loader.rs (parse, merge over built-in networks)
//!     → validation.rs (semantic checks)
//!     → HarnessConfig (validated, immutable)
//!
//! .env + process environment
//!     → env.rs (Credentials)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded and passed by reference into each operation
//! - All fields have defaults to allow running with no file at all
//! - Secrets never live in the TOML file

pub mod env;
pub mod loader;
pub mod schema;
pub mod validation;

pub use env::{load_dotenv, Credentials};
pub use loader::{load_config, load_or_default, ConfigError};
pub use schema::{
    ContractConfig, ExplorerConfig, HarnessConfig, NetworkConfig, ObservabilityConfig,
    TransactionConfig, DEFAULT_TOKEN_URI,
};
