// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Deterministic (CREATE2) deployment through a factory contract.
//!
//! The default factory is the keyless CREATE2 proxy found at the same address on most EVM chains.
//! It is itself deployed by a presigned pre-EIP-155 transaction, so any chain that still accepts
//! such transactions can be bootstrapped with it. Chains that reject them need a factory override.

use alloy::{
    network::TransactionBuilder,
    primitives::{address, hex, Address, Bytes, B256, U256},
    providers::Provider,
    rpc::types::TransactionRequest,
};

use crate::{core::deployment::DeploymentError, utils::color::DebugColor};

/// Address of the default CREATE2 factory.
pub const DEFAULT_FACTORY: Address = address!("4e59b44847b379578588920ca78fbf26c0b4956c");

/// Keyless account that signed the factory deployment transaction.
pub const DEFAULT_FACTORY_SIGNER: Address = address!("3fab184622dc19b6109349b94811493bf2a45362");

/// Wei the factory signer needs to pay for its deployment: 100 gwei × 100k gas.
pub const DEFAULT_FACTORY_FUNDING: u64 = 10_000_000_000_000_000;

/// Presigned factory deployment transaction.
pub const DEFAULT_FACTORY_DEPLOYMENT_TX: &[u8] = &hex!(
    "f8a58085174876e800830186a08080b853604580600e600039806000f350fe7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffe03601600081602082378035828234f58015156039578182fd5b8082525050506014600cf31ba02222222222222222222222222222222222222222222222222222222222222222a02222222222222222222222222222222222222222222222222222222222222222"
);

/// Calldata the factory expects: the 32-byte salt followed by the initcode.
pub fn factory_calldata(salt: B256, initcode: &[u8]) -> Bytes {
    let mut calldata = Vec::with_capacity(32 + initcode.len());
    calldata.extend_from_slice(salt.as_slice());
    calldata.extend_from_slice(initcode);
    calldata.into()
}

/// A CREATE2 factory and how to bring it into existence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeterministicFactory {
    pub address: Address,
    pub signer: Address,
    pub funding: U256,
    pub deployment_tx: Bytes,
}

impl Default for DeterministicFactory {
    fn default() -> Self {
        Self {
            address: DEFAULT_FACTORY,
            signer: DEFAULT_FACTORY_SIGNER,
            funding: U256::from(DEFAULT_FACTORY_FUNDING),
            deployment_tx: Bytes::from_static(DEFAULT_FACTORY_DEPLOYMENT_TX),
        }
    }
}

impl DeterministicFactory {
    /// Address the factory deploys `initcode` to under `salt`.
    pub fn compute_address(&self, salt: B256, initcode: &[u8]) -> Address {
        self.address.create2_from_code(salt, initcode)
    }

    /// Deploys the factory if the network does not have it yet.
    ///
    /// Tops up the factory signer from `sender` so it can pay for the presigned transaction.
    pub async fn ensure_deployed(
        &self,
        sender: Address,
        log: bool,
        provider: &impl Provider,
    ) -> Result<(), DeploymentError> {
        if !provider.get_code_at(self.address).await?.is_empty() {
            return Ok(());
        }
        if log {
            greyln!(
                "deploying deterministic deployment factory at {}",
                self.address.debug_lavender()
            );
        }

        let balance = provider
            .get_balance(self.signer)
            .await
            .map_err(|_| DeploymentError::FailedToGetBalance)?;
        if balance < self.funding {
            let top_up = self.funding - balance;
            debug!(@grey, "funding factory signer {} with {top_up} wei", self.signer);
            let tx = TransactionRequest::default()
                .with_from(sender)
                .with_to(self.signer)
                .with_value(top_up);
            let pending = provider.send_transaction(tx).await?;
            let tx_hash = *pending.tx_hash();
            let receipt = pending
                .get_receipt()
                .await
                .or(Err(DeploymentError::FailedToComplete))?;
            if !receipt.status() {
                return Err(DeploymentError::Reverted { tx_hash });
            }
        }

        let pending = provider.send_raw_transaction(&self.deployment_tx).await?;
        let tx_hash = *pending.tx_hash();
        let receipt = pending
            .get_receipt()
            .await
            .or(Err(DeploymentError::FailedToComplete))?;
        if !receipt.status() {
            return Err(DeploymentError::Reverted { tx_hash });
        }

        if provider.get_code_at(self.address).await?.is_empty() {
            return Err(DeploymentError::FactoryUnavailable {
                factory: self.address,
            });
        }
        if log {
            mintln!("factory deployed (tx: {tx_hash})");
        }
        Ok(())
    }
}
