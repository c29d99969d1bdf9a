// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use alloy::primitives::{Address, B256};

use crate::core::{artifact::ArtifactStore, deterministic::DeterministicFactory};

/// Address a contract will have once deployed through `factory`, computed offline.
pub fn deterministic_address(
    artifacts: &ArtifactStore,
    name: &str,
    args: &[String],
    salt: B256,
    factory: &DeterministicFactory,
) -> eyre::Result<Address> {
    let artifact = artifacts.load(name)?;
    let initcode = artifact.initcode(args)?;
    Ok(factory.compute_address(salt, &initcode))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::artifact::tests::write_artifact;
    use alloy::primitives::address;

    #[test]
    fn matches_factory_computation() {
        let root = tempfile::tempdir().unwrap();
        write_artifact(root.path(), "Answer", "[]");
        let artifacts = ArtifactStore::new(root.path());

        let address = deterministic_address(
            &artifacts,
            "Answer",
            &[],
            B256::ZERO,
            &DeterministicFactory::default(),
        )
        .unwrap();
        assert_eq!(address, address!("94c193a5c76faec23853b7924159e2f8a6a73b64"));

        let missing = deterministic_address(
            &artifacts,
            "Missing",
            &[],
            B256::ZERO,
            &DeterministicFactory::default(),
        );
        assert!(missing.is_err());
    }
}
