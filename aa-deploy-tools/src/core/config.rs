// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Project configuration, read from `aa-deploy.toml`.

use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};

use alloy::primitives::{Address, Bytes, U256};
use serde::Deserialize;

use crate::core::{
    deterministic::DeterministicFactory,
    network::{DEFAULT_ENDPOINT, DEFAULT_NETWORK},
};

pub const DEFAULT_CONFIG_FILE: &str = "aa-deploy.toml";

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    pub paths: PathsConfig,
    pub networks: BTreeMap<String, NetworkConfig>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    pub artifacts: PathBuf,
    pub deployments: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            artifacts: "artifacts".into(),
            deployments: "deployments".into(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NetworkConfig {
    pub url: Option<String>,
    pub deterministic_factory: Option<FactoryConfig>,
}

/// Replacement CREATE2 factory for chains that reject the default presigned transaction.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FactoryConfig {
    pub address: Address,
    pub signer: Address,
    /// Wei sent to `signer` before broadcasting `raw_tx`, as a decimal or hex string.
    pub funding: U256,
    pub raw_tx: Bytes,
}

impl From<&FactoryConfig> for DeterministicFactory {
    fn from(config: &FactoryConfig) -> Self {
        Self {
            address: config.address,
            signer: config.signer,
            funding: config.funding,
            deployment_tx: config.raw_tx.clone(),
        }
    }
}

impl ProjectConfig {
    /// Reads the config at `path`, which must exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::parse(&text, path)
    }

    /// Reads the config at `path`, falling back to defaults when there is no such file.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(text) => Self::parse(&text, path),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Read {
                path: path.to_owned(),
                source,
            }),
        }
    }

    fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })?;
        // relative paths are relative to the config file
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Ok(config.rebase(base))
    }

    fn rebase(mut self, base: &Path) -> Self {
        self.paths.artifacts = base.join(&self.paths.artifacts);
        self.paths.deployments = base.join(&self.paths.deployments);
        self
    }

    /// RPC endpoint of a named network.
    pub fn endpoint(&self, network: &str) -> Result<String, ConfigError> {
        match self.networks.get(network).and_then(|n| n.url.clone()) {
            Some(url) => Ok(url),
            None if network == DEFAULT_NETWORK => Ok(DEFAULT_ENDPOINT.to_owned()),
            None => Err(ConfigError::UnknownNetwork(network.to_owned())),
        }
    }

    /// CREATE2 factory used on a named network.
    pub fn factory(&self, network: &str) -> DeterministicFactory {
        self.networks
            .get(network)
            .and_then(|n| n.deterministic_factory.as_ref())
            .map(Into::into)
            .unwrap_or_default()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("network {0} has no url configured")]
    UnknownNetwork(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_file_means_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ProjectConfig::load_or_default(dir.path().join(DEFAULT_CONFIG_FILE)).unwrap();
        assert_eq!(config, ProjectConfig::default());
        assert_eq!(config.endpoint("localhost").unwrap(), DEFAULT_ENDPOINT);
        assert!(matches!(
            config.endpoint("sepolia"),
            Err(ConfigError::UnknownNetwork(_))
        ));
        assert_eq!(config.factory("localhost"), DeterministicFactory::default());

        assert!(ProjectConfig::load(dir.path().join(DEFAULT_CONFIG_FILE)).is_err());
    }

    #[test]
    fn parses_networks_and_factory_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(
            &path,
            r#"
                [paths]
                artifacts = "out/artifacts"

                [networks.localhost]
                url = "http://127.0.0.1:8545"

                [networks.custom]
                url = "https://rpc.example.org"

                [networks.custom.deterministic_factory]
                address = "0x0000000000000000000000000000000000000fac"
                signer = "0x0000000000000000000000000000000000000519"
                funding = "10000000000000000"
                raw_tx = "0x01"

                [networks.devnet.deterministic_factory]
                address = "0x0000000000000000000000000000000000000fac"
                signer = "0x0000000000000000000000000000000000000519"
                funding = "0x3e8"
                raw_tx = "0x02"
            "#,
        )
        .unwrap();

        let config = ProjectConfig::load(&path).unwrap();
        assert_eq!(config.paths.artifacts, dir.path().join("out/artifacts"));
        assert_eq!(config.paths.deployments, dir.path().join("deployments"));
        assert_eq!(config.endpoint("localhost").unwrap(), "http://127.0.0.1:8545");
        assert_eq!(config.endpoint("custom").unwrap(), "https://rpc.example.org");

        let factory = config.factory("custom");
        assert_eq!(factory.address, address!("0000000000000000000000000000000000000fac"));
        assert_eq!(factory.signer, address!("0000000000000000000000000000000000000519"));
        assert_eq!(factory.funding, U256::from(10_000_000_000_000_000u64));
        assert_eq!(factory.deployment_tx, Bytes::from_static(&[0x01]));
        assert_eq!(config.factory("devnet").funding, U256::from(1000));
        assert_eq!(config.factory("localhost"), DeterministicFactory::default());
    }

    #[test]
    fn rejects_unknown_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, "[networks.localhost]\nrpc = \"http://localhost:8545\"\n").unwrap();
        assert!(matches!(
            ProjectConfig::load(&path),
            Err(ConfigError::Parse { .. })
        ));
    }
}
