//! NFT deployment harness.
//!
//! ```text
//!  .env / environment ──┐
//!  harness.toml ────────┼─▶ config ─▶ deploy ─▶ "Contract deployed to: 0x…"
//!  artifacts/*.json ────┘          └▶ mint   ─▶ "Your transaction is confirmed, …"
//! ```
//!
//! Each subcommand is a single-shot run. Any error is printed to stderr and
//! the process exits with status 1.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use nft_harness::blockchain::{RpcBackend, Wallet};
use nft_harness::config::{load_dotenv, load_or_default, Credentials, HarnessConfig};
use nft_harness::contract::{ContractArtifact, Deployer, MintRequest, Minter};
use nft_harness::explorer::{ExplorerClient, VerificationStatus};
use nft_harness::observability::init_logging;
use nft_harness::HarnessResult;

#[derive(Parser)]
#[command(name = "nft-harness")]
#[command(about = "Deploy the NFT contract and mint tokens on it", long_about = None)]
struct Cli {
    /// Network to use (defaults to the config's default_network)
    #[arg(short, long, global = true)]
    network: Option<String>,

    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Deploy the contract and print its address
    Deploy,
    /// Mint a token to PUBLIC_KEY on CONTRACT_ADDRESS
    Mint {
        /// Token metadata URI (defaults to contract.token_uri)
        #[arg(long)]
        token_uri: Option<String>,
    },
    /// Show whether CONTRACT_ADDRESS has verified source on the explorer
    ExplorerStatus,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // .env can set RUST_LOG; load it before the subscriber.
    let dotenv_path = load_dotenv();

    let config = match load_or_default(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_logging(&config.observability.log_level);
    if let Some(path) = &dotenv_path {
        tracing::debug!(path = %path.display(), "Loaded .env file");
    }
    let credentials = Credentials::from_env();

    match run(cli, &config, &credentials).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("something went wrong: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, config: &HarnessConfig, credentials: &Credentials) -> HarnessResult<()> {
    let network_name = cli.network.as_deref().unwrap_or(&config.default_network);
    let network = config.network(network_name)?;
    let explorer = ExplorerClient::new(
        config.explorer.clone(),
        credentials.explorer_api_key.clone(),
    )?;

    match cli.command {
        Commands::Deploy => {
            let artifact = load_artifact(config)?;
            let wallet = Wallet::from_credentials(credentials, network.chain_id)?;
            let backend =
                RpcBackend::connect(network, &wallet, config.transactions.rpc_timeout_secs)?;

            let deployed = Deployer::new(&backend, network, &config.transactions)
                .deploy(&artifact)
                .await?;

            println!("Contract deployed to: {}", deployed.address);
            println!("{}", explorer.address_url(deployed.address));
        }
        Commands::Mint { token_uri } => {
            let artifact = load_artifact(config)?;
            let token_uri = token_uri.unwrap_or_else(|| config.contract.token_uri.clone());
            let request = MintRequest::from_credentials(credentials, token_uri)?;
            let wallet = Wallet::from_credentials(credentials, network.chain_id)?;
            let backend =
                RpcBackend::connect(network, &wallet, config.transactions.rpc_timeout_secs)?;

            println!(
                "Waiting {} blocks for confirmation...",
                config.transactions.mint_confirmations
            );
            let receipt = Minter::new(&backend, network, &config.transactions)
                .mint(&artifact, &request)
                .await?;

            println!(
                "Your transaction is confirmed, its receipt is: {}",
                receipt.tx_hash
            );
            println!("{}", explorer.tx_url(receipt.tx_hash));
        }
        Commands::ExplorerStatus => {
            let address = credentials.contract_address()?;
            match explorer.verification_status(address).await? {
                VerificationStatus::Verified => {
                    println!("{} is verified: {}", address, explorer.address_url(address))
                }
                VerificationStatus::NotVerified(reason) => {
                    println!("{} is not verified: {}", address, reason)
                }
            }
        }
    }

    Ok(())
}

fn load_artifact(config: &HarnessConfig) -> HarnessResult<ContractArtifact> {
    Ok(ContractArtifact::load(
        Path::new(&config.contract.artifacts_dir),
        &config.contract.name,
    )?)
}
