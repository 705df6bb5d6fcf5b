//! NFT contract workflows.
//!
//! # Data Flow
//! ```text
//! artifacts/contracts/<Name>.sol/<Name>.json
//!     → artifact.rs (interface + creation bytecode)
//!     → deploy.rs  (creation tx, 1 confirmation)  → contract address
//!     → mint.rs    (mint(address,string), 5 confirmations) → tx hash
//! ```

pub mod artifact;
pub mod deploy;
pub mod mint;

pub use artifact::{ArtifactError, ContractArtifact};
pub use deploy::{DeployedContract, Deployer};
pub use mint::{check_mint_interface, MintRequest, Minter};
