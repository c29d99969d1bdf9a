// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::{fs, path::PathBuf};

use aa_deploy_tools::{
    core::config::ProjectConfig,
    utils::{color::DebugColor, decode0x},
};
use alloy::{
    network::EthereumWallet,
    primitives::{Address, FixedBytes},
    providers::{DynProvider, Provider, ProviderBuilder, WalletProvider},
    signers::{
        local::{LocalSigner, PrivateKeySigner},
        Signer,
    },
};
use eyre::{eyre, Context};

use crate::{
    constants::{DEFAULT_CONFIG_FILE, DEFAULT_NETWORK},
    utils::convert_gwei_to_wei,
};

#[derive(Debug, clap::Args)]
pub struct AuthArgs {
    /// File path to a text file containing a hex-encoded private key
    #[arg(long)]
    private_key_path: Option<PathBuf>,
    /// Private key as a hex string. Warning: this exposes your key to shell history
    #[arg(long)]
    private_key: Option<String>,
    /// Path to an Ethereum wallet keystore file (e.g. clef)
    #[arg(long)]
    keystore_path: Option<String>,
    /// Keystore password file
    #[arg(long)]
    keystore_password_path: Option<PathBuf>,
    /// Optional max fee per gas in gwei units.
    #[arg(long)]
    max_fee_per_gas_gwei: Option<String>,
}

impl AuthArgs {
    /// Local wallet from the given key source, or `None` to sign with the node's accounts.
    fn build_wallet(&self, chain_id: u64) -> eyre::Result<Option<EthereumWallet>> {
        if let Some(key) = &self.private_key {
            if key.is_empty() {
                return Err(eyre!("empty private key"));
            }
            return Self::wallet_from_hex(key, chain_id).map(Some);
        }

        if let Some(file) = &self.private_key_path {
            let key = fs::read_to_string(file).wrap_err("could not open private key file")?;
            return Self::wallet_from_hex(&key, chain_id).map(Some);
        }

        let Some(keystore) = &self.keystore_path else {
            return Ok(None);
        };
        let password = self
            .keystore_password_path
            .as_ref()
            .map(fs::read_to_string)
            .unwrap_or(Ok("".into()))?;

        let signer =
            LocalSigner::decrypt_keystore(keystore, password)?.with_chain_id(Some(chain_id));
        Ok(Some(EthereumWallet::new(signer)))
    }

    fn wallet_from_hex(key: &str, chain_id: u64) -> eyre::Result<EthereumWallet> {
        let bytes = decode0x(key).wrap_err("invalid private key")?;
        if bytes.len() != 32 {
            return Err(eyre!("private key must be 32 bytes"));
        }
        let priv_key_bytes: FixedBytes<32> = FixedBytes::from_slice(&bytes);
        let signer = PrivateKeySigner::from_bytes(&priv_key_bytes)?.with_chain_id(Some(chain_id));
        Ok(EthereumWallet::new(signer))
    }

    pub fn get_max_fee_per_gas_wei(&self) -> eyre::Result<Option<u128>> {
        self.max_fee_per_gas_gwei
            .as_ref()
            .map(|fee_str| convert_gwei_to_wei(fee_str))
            .transpose()
    }
}

#[derive(Debug, clap::Args)]
pub struct ConfigArgs {
    /// Project config file (defaults to ./aa-deploy.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,
}

impl ConfigArgs {
    pub fn load(&self) -> eyre::Result<ProjectConfig> {
        let config = match &self.config {
            Some(path) => ProjectConfig::load(path)?,
            None => ProjectConfig::load_or_default(DEFAULT_CONFIG_FILE)?,
        };
        Ok(config)
    }
}

#[derive(Debug, clap::Args)]
pub struct NetworkArgs {
    /// Network to deploy to, as named in the config file
    #[arg(short, long, default_value = DEFAULT_NETWORK)]
    pub network: String,
    /// RPC endpoint, overriding the network's configured url
    #[arg(short, long)]
    pub endpoint: Option<String>,
}

impl NetworkArgs {
    pub fn endpoint(&self, config: &ProjectConfig) -> eyre::Result<String> {
        match &self.endpoint {
            Some(endpoint) => Ok(endpoint.clone()),
            None => Ok(config.endpoint(&self.network)?),
        }
    }

    /// Connects to the network, returning the provider and the local signer if one was given.
    pub async fn build_provider(
        &self,
        config: &ProjectConfig,
        auth: &AuthArgs,
    ) -> eyre::Result<(DynProvider, Option<Address>)> {
        let endpoint = self.endpoint(config)?;
        let provider = ProviderBuilder::new().connect(&endpoint).await?;
        let chain_id = provider.get_chain_id().await?;
        log::debug!("connected to {} (chain {chain_id})", self.network);

        let Some(wallet) = auth.build_wallet(chain_id)? else {
            return Ok((provider.erased(), None));
        };
        let provider = ProviderBuilder::new()
            .wallet(wallet)
            .connect(&endpoint)
            .await?;
        let signer = provider.default_signer_address();
        log::debug!("signing with {}", signer.debug_lavender());
        Ok((provider.erased(), Some(signer)))
    }
}
