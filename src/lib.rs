//! NFT deployment harness library.
//!
//! Deploys a compiled NFT contract to an EVM network and mints tokens on it.

pub mod blockchain;
pub mod config;
pub mod contract;
pub mod error;
pub mod explorer;
pub mod observability;

pub use config::schema::HarnessConfig;
pub use error::{HarnessError, HarnessResult};
