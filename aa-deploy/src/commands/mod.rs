// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use crate::error::AaDeployResult;

mod address;
mod deploy;

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Print the deterministic address of a contract without deploying it
    Address(address::Args),
    /// Run the deploy scripts against a network
    #[clap(visible_alias = "d")]
    Deploy(deploy::Args),
}

pub async fn exec(cmd: Command) -> AaDeployResult {
    match cmd {
        Command::Address(args) => address::exec(args),
        Command::Deploy(args) => deploy::exec(args).await,
    }
}
