// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use alloy::{primitives::Address, providers::Provider};

use crate::{
    core::deployment::{Connection, DeploymentError},
    utils::color::DebugColor,
};

/// Network used when none is named.
pub const DEFAULT_NETWORK: &str = "localhost";

/// Endpoint of the default network.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8545";

/// The active network connection: a named provider and, optionally, a local signer.
///
/// Without a local signer, the first account managed by the node signs deployments.
#[derive(Clone, Debug)]
pub struct Network<P> {
    name: String,
    provider: P,
    signer: Option<Address>,
}

impl<P: Provider> Network<P> {
    pub fn new(name: impl Into<String>, provider: P) -> Self {
        Self {
            name: name.into(),
            provider,
            signer: None,
        }
    }

    /// Uses a locally held signer instead of the node's accounts.
    pub fn with_signer(mut self, signer: Address) -> Self {
        self.signer = Some(signer);
        self
    }
}

impl<P: Provider> Connection for Network<P> {
    async fn default_signer_address(&self) -> Result<Address, DeploymentError> {
        if let Some(signer) = self.signer {
            return Ok(signer);
        }
        let accounts = self.provider.get_accounts().await?;
        let signer = accounts.first().copied().ok_or(DeploymentError::NoSigner)?;
        debug!(@grey, "using node account {} on {}", signer.debug_lavender(), self.name);
        Ok(signer)
    }
}
