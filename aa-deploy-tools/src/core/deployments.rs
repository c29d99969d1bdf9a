// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! The deployment service: artifacts in, contracts and deployment records out.

use alloy::{
    primitives::{Address, B256},
    providers::Provider,
    rpc::types::TransactionReceipt,
};

use crate::{
    core::{
        artifact::{Artifact, ArtifactStore},
        deployment::{
            transaction::DeploymentTransaction, DeployOptions, DeployResult, DeploymentError,
            DeploymentService,
        },
        deterministic::{factory_calldata, DeterministicFactory},
        records::{DeploymentRecord, RecordStore},
    },
    utils::color::{Color, DebugColor},
};

/// Deploys artifacts to the network behind `provider`, skipping those already deployed.
#[derive(Debug)]
pub struct Deployments<P> {
    provider: P,
    artifacts: ArtifactStore,
    records: RecordStore,
    factory: DeterministicFactory,
    max_fee_per_gas_wei: Option<u128>,
}

impl<P: Provider> Deployments<P> {
    pub fn new(provider: P, artifacts: ArtifactStore, records: RecordStore) -> Self {
        Self {
            provider,
            artifacts,
            records,
            factory: DeterministicFactory::default(),
            max_fee_per_gas_wei: None,
        }
    }

    pub fn with_factory(mut self, factory: DeterministicFactory) -> Self {
        self.factory = factory;
        self
    }

    /// Caps the fee per gas instead of paying the node's gas price.
    pub fn with_max_fee_per_gas(mut self, max_fee_per_gas_wei: Option<u128>) -> Self {
        self.max_fee_per_gas_wei = max_fee_per_gas_wei;
        self
    }

    async fn has_code(&self, address: Address) -> Result<bool, DeploymentError> {
        Ok(!self.provider.get_code_at(address).await?.is_empty())
    }

    async fn deploy_deterministic(
        &self,
        name: &str,
        artifact: &Artifact,
        initcode: Vec<u8>,
        salt: B256,
        options: DeployOptions,
    ) -> Result<DeployResult, DeploymentError> {
        let address = self.factory.compute_address(salt, &initcode);
        debug!(@grey, "deterministic address of {name}: {}", address.debug_lavender());
        let previous = self.records.get(name)?;

        if self.has_code(address).await? {
            if previous.as_ref().map(|record| record.address) != Some(address) {
                let record = DeploymentRecord::reused(
                    address,
                    artifact,
                    options.args,
                    Some(salt),
                    previous.as_ref(),
                );
                self.records.save(name, &record)?;
            }
            log_reused(name, address, options.log);
            return Ok(DeployResult::reused(address));
        }

        self.factory
            .ensure_deployed(options.from, options.log, &self.provider)
            .await?;
        let receipt = DeploymentTransaction::through_factory(
            options.from,
            self.factory.address,
            factory_calldata(salt, &initcode),
            options.gas_limit,
            self.max_fee_per_gas_wei,
        )
        .exec(&self.provider)
        .await?;

        if !self.has_code(address).await? {
            return Err(DeploymentError::DeterministicDeploymentFailed { address });
        }
        self.finish(name, artifact, address, Some(salt), &receipt, previous, options)
    }

    async fn deploy_plain(
        &self,
        name: &str,
        artifact: &Artifact,
        initcode: Vec<u8>,
        options: DeployOptions,
    ) -> Result<DeployResult, DeploymentError> {
        let previous = self.records.get(name)?;
        if let Some(record) = &previous {
            let unchanged = record.bytecode == artifact.bytecode && record.args == options.args;
            if unchanged && self.has_code(record.address).await? {
                log_reused(name, record.address, options.log);
                return Ok(DeployResult::reused(record.address));
            }
        }

        let receipt = DeploymentTransaction::create(
            options.from,
            initcode,
            options.gas_limit,
            self.max_fee_per_gas_wei,
        )
        .exec(&self.provider)
        .await?;
        let address = receipt
            .contract_address
            .ok_or(DeploymentError::NoContractAddress("in receipt".to_string()))?;
        self.finish(name, artifact, address, None, &receipt, previous, options)
    }

    #[allow(clippy::too_many_arguments)]
    fn finish(
        &self,
        name: &str,
        artifact: &Artifact,
        address: Address,
        salt: Option<B256>,
        receipt: &TransactionReceipt,
        previous: Option<DeploymentRecord>,
        options: DeployOptions,
    ) -> Result<DeployResult, DeploymentError> {
        let record = DeploymentRecord::deployed(
            address,
            artifact,
            options.args,
            salt,
            receipt,
            previous.as_ref(),
        );
        self.records.save(name, &record)?;

        if options.log {
            println!(
                "{} {}...: deployed at {} with {} gas",
                format!("deploying \"{name}\"").grey(),
                format!("(tx: {})", receipt.transaction_hash).grey(),
                address.debug_lavender(),
                receipt.gas_used.mint(),
            );
        }
        Ok(DeployResult {
            address,
            transaction_hash: Some(receipt.transaction_hash),
            gas_used: Some(receipt.gas_used),
            newly_deployed: true,
        })
    }
}

fn log_reused(name: &str, address: Address, log: bool) {
    if log {
        greyln!("reusing \"{name}\" at {}", address.debug_lavender());
    }
}

impl<P: Provider> DeploymentService for Deployments<P> {
    async fn deploy(
        &self,
        name: &str,
        options: DeployOptions,
    ) -> Result<DeployResult, DeploymentError> {
        let artifact = self.artifacts.load(name)?;
        let initcode = artifact.initcode(&options.args)?;
        match options.deterministic_deployment.salt() {
            Some(salt) => {
                self.deploy_deterministic(name, &artifact, initcode, salt, options)
                    .await
            }
            None => self.deploy_plain(name, &artifact, initcode, options).await,
        }
    }
}
