// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

pub mod artifact;
pub mod config;
pub mod deployment;
pub mod deployments;
pub mod deterministic;
pub mod network;
pub mod records;
