//! Top-level error for the deploy and mint workflows.

use thiserror::Error;

use crate::blockchain::BlockchainError;
use crate::config::ConfigError;
use crate::contract::ArtifactError;
use crate::explorer::ExplorerError;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Artifact(#[from] ArtifactError),

    #[error(transparent)]
    Blockchain(#[from] BlockchainError),

    #[error(transparent)]
    Explorer(#[from] ExplorerError),
}

pub type HarnessResult<T> = Result<T, HarnessError>;
