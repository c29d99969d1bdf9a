// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

pub use aa_deploy_tools::core::{
    config::DEFAULT_CONFIG_FILE,
    network::{DEFAULT_ENDPOINT, DEFAULT_NETWORK},
};
