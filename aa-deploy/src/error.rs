// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::fmt;
use std::process::ExitCode;

use aa_deploy_tools::core::{
    artifact::ArtifactError, config::ConfigError, deployment::DeploymentError,
    records::RecordError,
};

pub type AaDeployResult = Result<(), AaDeployError>;

#[derive(Debug)]
pub struct AaDeployError {
    error: eyre::Error,
    exit_code: ExitCode,
}

impl AaDeployError {
    pub fn exit_code(&self) -> ExitCode {
        self.exit_code
    }
}

impl fmt::Display for AaDeployError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.error.fmt(f)
    }
}

macro_rules! impl_from_error {
    ($($err:ty),* $(,)?) => {
        $(
            impl From<$err> for AaDeployError {
                fn from(err: $err) -> Self {
                    Self {
                        error: err.into(),
                        exit_code: ExitCode::FAILURE,
                    }
                }
            }
        )*
    };
}

impl_from_error!(
    std::io::Error,
    eyre::Error,
    alloy::transports::TransportError,
    ArtifactError,
    ConfigError,
    DeploymentError,
    RecordError,
);
