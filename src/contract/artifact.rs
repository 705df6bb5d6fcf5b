//! Compiled contract artifacts.
//!
//! Reads the JSON the Solidity toolchain writes per contract
//! (`contracts/<Name>.sol/<Name>.json`). Only `contractName`, `abi` and
//! `bytecode` are used; other keys are ignored.

use alloy::json_abi::{Function, JsonAbi};
use alloy::primitives::Bytes;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Cannot read artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed artifact {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Contract {0} has no creation bytecode (interface or abstract contract?)")]
    NotDeployable(String),

    #[error("Contract {contract} has no function {signature}")]
    MissingFunction { contract: String, signature: String },
}

/// Interface description and creation bytecode of one contract.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractArtifact {
    pub contract_name: String,
    pub abi: JsonAbi,
    pub bytecode: Bytes,
}

impl ContractArtifact {
    /// Artifact location for `name` under the compiler output root.
    pub fn path_for(artifacts_dir: &Path, name: &str) -> PathBuf {
        artifacts_dir
            .join("contracts")
            .join(format!("{}.sol", name))
            .join(format!("{}.json", name))
    }

    /// Resolve the artifact by contract name and parse it.
    pub fn load(artifacts_dir: &Path, name: &str) -> Result<Self, ArtifactError> {
        Self::from_file(&Self::path_for(artifacts_dir, name))
    }

    pub fn from_file(path: &Path) -> Result<Self, ArtifactError> {
        let content = std::fs::read_to_string(path).map_err(|source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let artifact: Self =
            serde_json::from_str(&content).map_err(|source| ArtifactError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::debug!(
            contract = %artifact.contract_name,
            path = %path.display(),
            functions = artifact.abi.functions.len(),
            bytecode_len = artifact.bytecode.len(),
            "Loaded contract artifact"
        );
        Ok(artifact)
    }

    /// Creation bytecode, refusing contracts that cannot be deployed.
    pub fn creation_code(&self) -> Result<&Bytes, ArtifactError> {
        if self.bytecode.is_empty() {
            return Err(ArtifactError::NotDeployable(self.contract_name.clone()));
        }
        Ok(&self.bytecode)
    }

    /// Find the overload of `name` taking exactly `input_types`.
    pub fn function(&self, name: &str, input_types: &[&str]) -> Result<&Function, ArtifactError> {
        self.abi
            .function(name)
            .and_then(|overloads| {
                overloads.iter().find(|f| {
                    f.inputs.len() == input_types.len()
                        && f.inputs.iter().zip(input_types).all(|(p, ty)| p.ty == *ty)
                })
            })
            .ok_or_else(|| ArtifactError::MissingFunction {
                contract: self.contract_name.clone(),
                signature: format!("{}({})", name, input_types.join(",")),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARTIFACT: &str = r#"{
        "_format": "hh-sol-artifact-1",
        "contractName": "AnkrAvalancheNFT",
        "sourceName": "contracts/AnkrAvalancheNFT.sol",
        "abi": [
            {"inputs": [], "stateMutability": "nonpayable", "type": "constructor"},
            {
                "inputs": [
                    {"internalType": "address", "name": "recipient", "type": "address"},
                    {"internalType": "string", "name": "tokenURI", "type": "string"}
                ],
                "name": "mint",
                "outputs": [{"internalType": "uint256", "name": "", "type": "uint256"}],
                "stateMutability": "nonpayable",
                "type": "function"
            }
        ],
        "bytecode": "0x6080604052348015600f57600080fd5b50",
        "deployedBytecode": "0x6080",
        "linkReferences": {},
        "deployedLinkReferences": {}
    }"#;

    #[test]
    fn test_parse_artifact() {
        let artifact: ContractArtifact = serde_json::from_str(ARTIFACT).unwrap();
        assert_eq!(artifact.contract_name, "AnkrAvalancheNFT");
        assert_eq!(artifact.creation_code().unwrap().len(), 17);
        assert!(artifact.function("mint", &["address", "string"]).is_ok());
    }

    #[test]
    fn test_missing_overload() {
        let artifact: ContractArtifact = serde_json::from_str(ARTIFACT).unwrap();
        let err = artifact.function("mint", &["address"]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Contract AnkrAvalancheNFT has no function mint(address)"
        );
        assert!(artifact.function("burn", &["uint256"]).is_err());
    }

    #[test]
    fn test_interface_is_not_deployable() {
        let json = ARTIFACT.replace(
            "\"bytecode\": \"0x6080604052348015600f57600080fd5b50\"",
            "\"bytecode\": \"0x\"",
        );
        let artifact: ContractArtifact = serde_json::from_str(&json).unwrap();
        assert!(matches!(
            artifact.creation_code(),
            Err(ArtifactError::NotDeployable(_))
        ));
    }

    #[test]
    fn test_path_resolution() {
        let path = ContractArtifact::path_for(Path::new("artifacts"), "AnkrAvalancheNFT");
        assert_eq!(
            path,
            Path::new("artifacts/contracts/AnkrAvalancheNFT.sol/AnkrAvalancheNFT.json")
        );
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ContractArtifact::load(dir.path(), "AnkrAvalancheNFT").unwrap_err();
        assert!(matches!(err, ArtifactError::Io { .. }));
    }

    #[test]
    fn test_load_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = ContractArtifact::path_for(dir.path(), "Broken");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{\"contractName\": \"Broken\"}").unwrap();
        let err = ContractArtifact::load(dir.path(), "Broken").unwrap_err();
        assert!(matches!(err, ArtifactError::Parse { .. }));
    }
}
