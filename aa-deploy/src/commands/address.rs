// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use aa_deploy_tools::{core::artifact::ArtifactStore, ops};
use alloy::primitives::B256;

use crate::{common_args::ConfigArgs, constants::DEFAULT_NETWORK, error::AaDeployResult};

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Name of the contract artifact
    contract: String,
    /// The CREATE2 salt
    #[arg(long, default_value_t = B256::ZERO)]
    salt: B256,
    /// Network whose factory to use
    #[arg(short, long, default_value = DEFAULT_NETWORK)]
    network: String,
    /// The constructor arguments.
    #[arg(
        long,
        num_args(0..),
        value_name = "ARGS",
        allow_hyphen_values = true,
    )]
    constructor_args: Vec<String>,

    #[command(flatten)]
    config: ConfigArgs,
}

pub fn exec(args: Args) -> AaDeployResult {
    let config = args.config.load()?;
    let address = ops::deterministic_address(
        &ArtifactStore::new(&config.paths.artifacts),
        &args.contract,
        &args.constructor_args,
        args.salt,
        &config.factory(&args.network),
    )?;
    println!("{address}");
    Ok(())
}
