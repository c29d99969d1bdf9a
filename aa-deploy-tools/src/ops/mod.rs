// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

pub use address::deterministic_address;
pub use deploy::{deploy_simple_7702_account, run_scripts, select_scripts, DeployScript};

mod address;
mod deploy;
