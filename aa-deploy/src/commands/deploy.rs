// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use aa_deploy_tools::{
    core::{
        artifact::ArtifactStore, deployments::Deployments, network::Network,
        records::RecordStore,
    },
    ops,
};
use alloy::providers::Provider;

use crate::{
    common_args::{AuthArgs, ConfigArgs, NetworkArgs},
    error::AaDeployResult,
};

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Only run deploy scripts carrying one of these tags
    #[arg(long, value_delimiter = ',')]
    tags: Vec<String>,

    /// Wallet source to use. Without one, the node's first account signs.
    #[command(flatten)]
    auth: AuthArgs,
    #[command(flatten)]
    config: ConfigArgs,
    #[command(flatten)]
    network: NetworkArgs,
}

pub async fn exec(args: Args) -> AaDeployResult {
    let scripts = ops::select_scripts(&args.tags)?;
    let config = args.config.load()?;
    let (provider, signer) = args.network.build_provider(&config, &args.auth).await?;

    let records = RecordStore::new(&config.paths.deployments, &args.network.network);
    records.write_chain_id(provider.get_chain_id().await?)?;

    let deployments = Deployments::new(
        provider.clone(),
        ArtifactStore::new(&config.paths.artifacts),
        records,
    )
    .with_factory(config.factory(&args.network.network))
    .with_max_fee_per_gas(args.auth.get_max_fee_per_gas_wei()?);

    let mut network = Network::new(&args.network.network, provider);
    if let Some(signer) = signer {
        network = network.with_signer(signer);
    }

    ops::run_scripts(&scripts, &network, &deployments).await?;
    Ok(())
}
