//! Shared utilities for integration testing.

#![allow(dead_code)]

use alloy::primitives::{keccak256, Address, TxHash};
use alloy::rpc::types::TransactionRequest;
use nft_harness::blockchain::{BlockchainError, BlockchainResult, ChainBackend, TxReceipt};
use nft_harness::config::{NetworkConfig, TransactionConfig};
use nft_harness::contract::ContractArtifact;
use std::collections::HashMap;
use std::future::Future;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Mutex;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

pub const SIGNER: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";
pub const RECIPIENT: &str = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";
pub const CONTRACT_NAME: &str = "AnkrAvalancheNFT";

/// Fuji-shaped network pointing nowhere; the mock chain never dials it.
pub fn fuji() -> NetworkConfig {
    NetworkConfig {
        name: "fuji".to_string(),
        rpc_url: "https://rpc.ankr.com/avalanche_fuji".to_string(),
        chain_id: 43113,
        gas_limit: None,
    }
}

/// Fast polling so confirmation waits finish in milliseconds.
pub fn fast_transactions() -> TransactionConfig {
    TransactionConfig {
        poll_interval_ms: 1,
        ..TransactionConfig::default()
    }
}

#[derive(Debug, Clone)]
struct MinedTx {
    block_number: u64,
    success: bool,
    contract_address: Option<Address>,
}

#[derive(Debug, Default)]
struct ChainState {
    block: u64,
    nonce: u64,
    mined: HashMap<TxHash, MinedTx>,
    sent: Vec<TransactionRequest>,
    block_queries: u64,
}

/// In-memory chain that mines every transaction instantly and advances one
/// block per `block_number` query.
#[derive(Debug)]
pub struct MockChain {
    chain_id: u64,
    signer: Address,
    revert: bool,
    reject: Option<String>,
    state: Mutex<ChainState>,
}

impl MockChain {
    pub fn new(chain_id: u64) -> Self {
        Self {
            chain_id,
            signer: SIGNER.parse().unwrap(),
            revert: false,
            reject: None,
            state: Mutex::new(ChainState {
                block: 100,
                ..ChainState::default()
            }),
        }
    }

    /// Mine every transaction with a failed status.
    pub fn reverting(mut self) -> Self {
        self.revert = true;
        self
    }

    /// Refuse every transaction at submission.
    pub fn rejecting(mut self, reason: &str) -> Self {
        self.reject = Some(reason.to_string());
        self
    }

    pub fn current_block(&self) -> u64 {
        self.state.lock().unwrap().block
    }

    pub fn sent(&self) -> Vec<TransactionRequest> {
        self.state.lock().unwrap().sent.clone()
    }

    pub fn block_queries(&self) -> u64 {
        self.state.lock().unwrap().block_queries
    }
}

impl ChainBackend for MockChain {
    async fn chain_id(&self) -> BlockchainResult<u64> {
        Ok(self.chain_id)
    }

    async fn block_number(&self) -> BlockchainResult<u64> {
        let mut state = self.state.lock().unwrap();
        state.block_queries += 1;
        let current = state.block;
        state.block += 1;
        Ok(current)
    }

    async fn send_transaction(&self, tx: TransactionRequest) -> BlockchainResult<TxHash> {
        if let Some(reason) = &self.reject {
            return Err(BlockchainError::Rpc(reason.clone()));
        }

        let mut state = self.state.lock().unwrap();
        let nonce = state.nonce;
        state.nonce += 1;

        let is_create = tx.to.map_or(true, |kind| kind.is_create());
        let tx_hash = keccak256(nonce.to_be_bytes());
        let block_number = state.block;
        state.mined.insert(
            tx_hash,
            MinedTx {
                block_number,
                success: !self.revert,
                contract_address: is_create.then(|| self.signer.create(nonce)),
            },
        );
        state.sent.push(tx);
        Ok(tx_hash)
    }

    async fn transaction_receipt(&self, tx_hash: TxHash) -> BlockchainResult<Option<TxReceipt>> {
        let state = self.state.lock().unwrap();
        Ok(state.mined.get(&tx_hash).map(|mined| TxReceipt {
            tx_hash,
            block_number: mined.block_number,
            success: mined.success,
            contract_address: mined.contract_address,
        }))
    }

    fn signer_address(&self) -> Address {
        self.signer
    }
}

/// Minimal compiler artifact with a constructor and `mint(address,string)`.
pub fn artifact_json(bytecode: &str, with_mint: bool) -> String {
    let mint = if with_mint {
        r#",{
            "inputs": [
                {"internalType": "address", "name": "recipient", "type": "address"},
                {"internalType": "string", "name": "tokenURI", "type": "string"}
            ],
            "name": "mint",
            "outputs": [{"internalType": "uint256", "name": "", "type": "uint256"}],
            "stateMutability": "nonpayable",
            "type": "function"
        }"#
    } else {
        ""
    };
    format!(
        r#"{{
            "_format": "hh-sol-artifact-1",
            "contractName": "{name}",
            "sourceName": "contracts/{name}.sol",
            "abi": [
                {{"inputs": [], "stateMutability": "nonpayable", "type": "constructor"}}{mint}
            ],
            "bytecode": "{bytecode}",
            "deployedBytecode": "0x",
            "linkReferences": {{}},
            "deployedLinkReferences": {{}}
        }}"#,
        name = CONTRACT_NAME,
        mint = mint,
        bytecode = bytecode,
    )
}

/// Write an artifact where the compiler would and load it back.
pub fn write_artifact(dir: &Path, bytecode: &str, with_mint: bool) -> ContractArtifact {
    let path = ContractArtifact::path_for(dir, CONTRACT_NAME);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, artifact_json(bytecode, with_mint)).unwrap();
    ContractArtifact::load(dir, CONTRACT_NAME).unwrap()
}

/// Start a programmable HTTP backend on an ephemeral port.
///
/// The closure receives the raw request head and returns status and body.
pub async fn start_programmable_backend<F, Fut>(f: F) -> SocketAddr
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = std::sync::Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        let mut buf = vec![0u8; 8192];
                        let n = socket.read(&mut buf).await.unwrap_or(0);
                        let request = String::from_utf8_lossy(&buf[..n]).to_string();

                        let (status, body) = f(request).await;
                        let status_text = match status {
                            200 => "200 OK",
                            404 => "404 Not Found",
                            429 => "429 Too Many Requests",
                            500 => "500 Internal Server Error",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };

                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}
