// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Deployment requests, and the seams between a deploy script and the service that carries it out.

use alloy::primitives::{Address, TxHash, B256, U256};
use typed_builder::TypedBuilder;

use crate::{
    core::{artifact::ArtifactError, records::RecordError},
    utils::color::{Color, DebugColor},
};

pub mod transaction;

/// Whether, and with which salt, a contract is deployed through the CREATE2 factory.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DeterministicDeployment {
    /// Plain CREATE deployment, address depends on the sender nonce.
    #[default]
    Disabled,
    /// CREATE2 deployment with the zero salt.
    DefaultSalt,
    /// CREATE2 deployment with a caller-provided salt.
    Salt(B256),
}

impl DeterministicDeployment {
    /// Salt used for the CREATE2 deployment, if deterministic.
    pub fn salt(&self) -> Option<B256> {
        match self {
            Self::Disabled => None,
            Self::DefaultSalt => Some(B256::ZERO),
            Self::Salt(salt) => Some(*salt),
        }
    }
}

impl From<bool> for DeterministicDeployment {
    fn from(deterministic: bool) -> Self {
        if deterministic {
            Self::DefaultSalt
        } else {
            Self::Disabled
        }
    }
}

impl From<B256> for DeterministicDeployment {
    fn from(salt: B256) -> Self {
        Self::Salt(salt)
    }
}

/// Options handed to a [`DeploymentService`] together with the contract name.
#[derive(Clone, Debug, PartialEq, Eq, TypedBuilder)]
#[builder(field_defaults(default, setter(into)))]
pub struct DeployOptions {
    /// Account sending the deployment transaction.
    #[builder(!default)]
    pub from: Address,
    /// Constructor arguments, coerced against the artifact's constructor ABI.
    pub args: Vec<String>,
    /// Gas ceiling for the deployment transaction. Skips gas estimation when set.
    #[builder(setter(strip_option))]
    pub gas_limit: Option<u64>,
    pub deterministic_deployment: DeterministicDeployment,
    /// Print human-readable progress to stdout.
    pub log: bool,
}

/// A named deployment, built fresh for each invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeploymentRequest {
    /// Artifact name, also the deployment record slot.
    pub contract: String,
    pub options: DeployOptions,
}

impl DeploymentRequest {
    pub fn new(contract: impl Into<String>, options: DeployOptions) -> Self {
        Self {
            contract: contract.into(),
            options,
        }
    }

    /// Hands the request to the deployment service.
    pub async fn submit(
        self,
        service: &impl DeploymentService,
    ) -> Result<DeployResult, DeploymentError> {
        service.deploy(&self.contract, self.options).await
    }
}

/// Outcome of a deployment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeployResult {
    pub address: Address,
    /// Hash of the deployment transaction, `None` when an existing deployment was reused.
    pub transaction_hash: Option<TxHash>,
    pub gas_used: Option<u64>,
    pub newly_deployed: bool,
}

impl DeployResult {
    pub fn reused(address: Address) -> Self {
        Self {
            address,
            transaction_hash: None,
            gas_used: None,
            newly_deployed: false,
        }
    }
}

/// The active network connection, as seen by a deploy script.
#[allow(async_fn_in_trait)]
pub trait Connection {
    /// Address of the connection's default signer.
    async fn default_signer_address(&self) -> Result<Address, DeploymentError>;
}

/// Something that can deploy a named artifact.
#[allow(async_fn_in_trait)]
pub trait DeploymentService {
    async fn deploy(
        &self,
        name: &str,
        options: DeployOptions,
    ) -> Result<DeployResult, DeploymentError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DeploymentError {
    #[error("rpc error: {0}")]
    Rpc(#[from] alloy::transports::RpcError<alloy::transports::TransportErrorKind>),
    #[error("{0}")]
    Artifact(#[from] ArtifactError),
    #[error("{0}")]
    Record(#[from] RecordError),

    #[error("no signer available: the connection has no wallet and the node reports no accounts")]
    NoSigner,
    #[error("tx failed to complete")]
    FailedToComplete,
    #[error("failed to get balance")]
    FailedToGetBalance,
    #[error(
        "not enough funds in account {} to pay for deployment\nbalance {} < {}",
        .from_address.red(),
        .balance.red(),
        format!("{} wei", .required).red(),
    )]
    NotEnoughFunds {
        from_address: Address,
        balance: U256,
        required: U256,
    },
    #[error("deploy tx reverted {}", .tx_hash.debug_red())]
    Reverted { tx_hash: TxHash },
    #[error("missing address: {0}")]
    NoContractAddress(String),
    #[error("no code at deterministic address {} after deployment", .address.debug_red())]
    DeterministicDeploymentFailed { address: Address },
    #[error("deterministic deployment factory missing at {} after bootstrap", .factory.debug_red())]
    FactoryUnavailable { factory: Address },
    #[error("no deploy scripts match tags {0:?}")]
    NoMatchingScripts(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{address, b256};

    #[test]
    fn deterministic_flag_maps_to_zero_salt() {
        assert_eq!(
            DeterministicDeployment::from(true).salt(),
            Some(B256::ZERO)
        );
        assert_eq!(DeterministicDeployment::from(false).salt(), None);

        let salt = b256!("0000000000000000000000000000000000000000000000000000000000000001");
        assert_eq!(DeterministicDeployment::from(salt).salt(), Some(salt));
    }

    #[test]
    fn builder_defaults() {
        let from = address!("00000000000000000000000000000000000000ab");
        let options = DeployOptions::builder().from(from).build();
        assert_eq!(
            options,
            DeployOptions {
                from,
                args: vec![],
                gas_limit: None,
                deterministic_deployment: DeterministicDeployment::Disabled,
                log: false,
            }
        );
    }
}
