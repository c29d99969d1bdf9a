// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Persisted deployment records, one JSON file per contract and network.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use alloy::{
    json_abi::JsonAbi,
    primitives::{Address, Bytes, TxHash, B256},
    rpc::types::TransactionReceipt,
};
use serde::{Deserialize, Serialize};

use crate::core::artifact::Artifact;

const CHAIN_ID_FILE: &str = ".chainId";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentRecord {
    pub address: Address,
    pub abi: JsonAbi,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_hash: Option<TxHash>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt: Option<ReceiptRecord>,
    #[serde(default)]
    pub args: Vec<String>,
    pub num_deployments: u64,
    pub bytecode: Bytes,
    #[serde(default)]
    pub deployed_bytecode: Bytes,
    /// CREATE2 salt, for deterministic deployments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deterministic: Option<B256>,
}

impl DeploymentRecord {
    /// Record for code found on chain without a transaction of ours, counting any deployments
    /// before it.
    pub fn reused(
        address: Address,
        artifact: &Artifact,
        args: Vec<String>,
        salt: Option<B256>,
        previous: Option<&DeploymentRecord>,
    ) -> Self {
        Self {
            address,
            abi: artifact.abi.clone(),
            transaction_hash: None,
            receipt: None,
            args,
            num_deployments: previous.map_or(1, |record| record.num_deployments + 1),
            bytecode: artifact.bytecode.clone(),
            deployed_bytecode: artifact.deployed_bytecode.clone(),
            deterministic: salt,
        }
    }

    /// Record for a fresh deployment, counting any deployments before it.
    pub fn deployed(
        address: Address,
        artifact: &Artifact,
        args: Vec<String>,
        salt: Option<B256>,
        receipt: &TransactionReceipt,
        previous: Option<&DeploymentRecord>,
    ) -> Self {
        Self {
            transaction_hash: Some(receipt.transaction_hash),
            receipt: Some(receipt.into()),
            ..Self::reused(address, artifact, args, salt, previous)
        }
    }
}

/// The parts of a transaction receipt worth keeping next to a deployment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptRecord {
    pub from: Address,
    pub to: Option<Address>,
    pub contract_address: Option<Address>,
    pub transaction_index: Option<u64>,
    pub gas_used: u64,
    pub block_hash: Option<B256>,
    pub block_number: Option<u64>,
    pub status: bool,
}

impl From<&TransactionReceipt> for ReceiptRecord {
    fn from(receipt: &TransactionReceipt) -> Self {
        Self {
            from: receipt.from,
            to: receipt.to,
            contract_address: receipt.contract_address,
            transaction_index: receipt.transaction_index,
            gas_used: receipt.gas_used,
            block_hash: receipt.block_hash,
            block_number: receipt.block_number,
            status: receipt.status(),
        }
    }
}

/// Deployment records for one network, stored under `<root>/<network>/`.
#[derive(Clone, Debug)]
pub struct RecordStore {
    dir: PathBuf,
}

impl RecordStore {
    pub fn new(root: impl AsRef<Path>, network: &str) -> Self {
        Self {
            dir: root.as_ref().join(network),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }

    pub fn get(&self, name: &str) -> Result<Option<DeploymentRecord>, RecordError> {
        let path = self.path(name);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(RecordError::Io { path, source }),
        };
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|source| RecordError::Json { path, source })
    }

    pub fn save(&self, name: &str, record: &DeploymentRecord) -> Result<(), RecordError> {
        self.create_dir()?;
        let path = self.path(name);
        let json = serde_json::to_string_pretty(record).map_err(|source| RecordError::Json {
            path: path.clone(),
            source,
        })?;
        fs::write(&path, json).map_err(|source| RecordError::Io { path, source })
    }

    /// Chain id the records were written against, if recorded.
    pub fn chain_id(&self) -> Result<Option<u64>, RecordError> {
        let path = self.dir.join(CHAIN_ID_FILE);
        match fs::read_to_string(&path) {
            Ok(text) => text
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| RecordError::InvalidChainId { path }),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(RecordError::Io { path, source }),
        }
    }

    /// Records the chain id, refusing to mix records from different chains.
    pub fn write_chain_id(&self, chain_id: u64) -> Result<(), RecordError> {
        if let Some(recorded) = self.chain_id()? {
            if recorded != chain_id {
                return Err(RecordError::ChainMismatch {
                    dir: self.dir.clone(),
                    recorded,
                    actual: chain_id,
                });
            }
            return Ok(());
        }
        self.create_dir()?;
        let path = self.dir.join(CHAIN_ID_FILE);
        fs::write(&path, chain_id.to_string()).map_err(|source| RecordError::Io { path, source })
    }

    fn create_dir(&self) -> Result<(), RecordError> {
        fs::create_dir_all(&self.dir).map_err(|source| RecordError::Io {
            path: self.dir.clone(),
            source,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("io error on {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("invalid deployment record {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid chain id in {}", .path.display())]
    InvalidChainId { path: PathBuf },
    #[error(
        "deployments in {} belong to chain {recorded}, but the network is chain {actual}",
        .dir.display()
    )]
    ChainMismatch {
        dir: PathBuf,
        recorded: u64,
        actual: u64,
    },
}
