// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Deploy scripts, run in order by the task runner.

use crate::core::deployment::{
    Connection, DeployOptions, DeploymentError, DeploymentRequest, DeploymentService,
};

pub const SIMPLE_7702_ACCOUNT: &str = "Simple7702Account";

/// Gas ceiling for the `Simple7702Account` deployment.
pub const SIMPLE_7702_ACCOUNT_GAS_LIMIT: u64 = 6_000_000;

/// Deploys `Simple7702Account` deterministically from the connection's default signer.
///
/// Errors from the connection or the deployment service are returned untouched.
pub async fn deploy_simple_7702_account(
    connection: &impl Connection,
    deployments: &impl DeploymentService,
) -> Result<(), DeploymentError> {
    let from = connection.default_signer_address().await?;
    let options = DeployOptions::builder()
        .from(from)
        .args(Vec::<String>::new())
        .gas_limit(SIMPLE_7702_ACCOUNT_GAS_LIMIT)
        .deterministic_deployment(true)
        .log(true)
        .build();
    DeploymentRequest::new(SIMPLE_7702_ACCOUNT, options)
        .submit(deployments)
        .await?;
    Ok(())
}

/// A named deployment task.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeployScript {
    Simple7702Account,
}

impl DeployScript {
    /// Every script, in execution order.
    pub const ALL: &'static [DeployScript] = &[DeployScript::Simple7702Account];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Simple7702Account => "deploy_Simple7702Account",
        }
    }

    pub fn tags(&self) -> &'static [&'static str] {
        match self {
            Self::Simple7702Account => &[SIMPLE_7702_ACCOUNT, "aa"],
        }
    }

    pub async fn run(
        &self,
        connection: &impl Connection,
        deployments: &impl DeploymentService,
    ) -> Result<(), DeploymentError> {
        match self {
            Self::Simple7702Account => deploy_simple_7702_account(connection, deployments).await,
        }
    }
}

/// Scripts carrying any of `tags`, or all of them when no tags are given.
pub fn select_scripts(tags: &[String]) -> Result<Vec<DeployScript>, DeploymentError> {
    if tags.is_empty() {
        return Ok(DeployScript::ALL.to_vec());
    }
    let selected: Vec<_> = DeployScript::ALL
        .iter()
        .copied()
        .filter(|script| script.tags().iter().any(|tag| tags.iter().any(|t| t == tag)))
        .collect();
    if selected.is_empty() {
        return Err(DeploymentError::NoMatchingScripts(tags.to_vec()));
    }
    Ok(selected)
}

/// Runs `scripts` in order, stopping at the first failure.
pub async fn run_scripts(
    scripts: &[DeployScript],
    connection: &impl Connection,
    deployments: &impl DeploymentService,
) -> Result<(), DeploymentError> {
    for script in scripts {
        debug!(@grey, "running deploy script {}", script.name());
        script.run(connection, deployments).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use alloy::primitives::{address, b256, Address, TxHash};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::core::deployment::{DeployResult, DeterministicDeployment};

    const SIGNER: Address = address!("0000000000000000000000000000000000000abc");
    const DEPLOYED: Address = address!("94c193a5c76faec23853b7924159e2f8a6a73b64");
    const TX_HASH: TxHash =
        b256!("2222222222222222222222222222222222222222222222222222222222222222");

    #[derive(Default)]
    struct MockConnection {
        failure: RefCell<Option<DeploymentError>>,
    }

    impl MockConnection {
        fn failing(err: DeploymentError) -> Self {
            Self {
                failure: RefCell::new(Some(err)),
            }
        }
    }

    impl Connection for MockConnection {
        async fn default_signer_address(&self) -> Result<Address, DeploymentError> {
            match self.failure.borrow_mut().take() {
                Some(err) => Err(err),
                None => Ok(SIGNER),
            }
        }
    }

    /// Deploys on first use and reports the existing deployment afterwards.
    #[derive(Default)]
    struct MockDeployments {
        calls: RefCell<Vec<(String, DeployOptions)>>,
        transactions: Cell<usize>,
        logs: RefCell<Vec<String>>,
        deployed: Cell<Option<Address>>,
        failure: RefCell<Option<DeploymentError>>,
    }

    impl DeploymentService for MockDeployments {
        async fn deploy(
            &self,
            name: &str,
            options: DeployOptions,
        ) -> Result<DeployResult, DeploymentError> {
            self.calls.borrow_mut().push((name.to_owned(), options.clone()));
            if let Some(err) = self.failure.borrow_mut().take() {
                return Err(err);
            }
            let result = match self.deployed.get() {
                Some(address) => DeployResult::reused(address),
                None => {
                    self.transactions.set(self.transactions.get() + 1);
                    self.deployed.set(Some(DEPLOYED));
                    DeployResult {
                        address: DEPLOYED,
                        transaction_hash: Some(TX_HASH),
                        gas_used: Some(100_000),
                        newly_deployed: true,
                    }
                }
            };
            if options.log {
                let verb = if result.newly_deployed { "deploying" } else { "reusing" };
                self.logs.borrow_mut().push(format!("{verb} \"{name}\""));
            }
            Ok(result)
        }
    }

    #[tokio::test]
    async fn deploys_once_from_default_signer() {
        let connection = MockConnection::default();
        let deployments = MockDeployments::default();

        deploy_simple_7702_account(&connection, &deployments)
            .await
            .unwrap();

        let calls = deployments.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1.from, SIGNER);
    }

    #[tokio::test]
    async fn request_carries_fixed_options() {
        let connection = MockConnection::default();
        let deployments = MockDeployments::default();

        deploy_simple_7702_account(&connection, &deployments)
            .await
            .unwrap();

        let calls = deployments.calls.borrow();
        let (name, options) = &calls[0];
        assert_eq!(name, "Simple7702Account");
        assert_eq!(
            options,
            &DeployOptions {
                from: SIGNER,
                args: vec![],
                gas_limit: Some(6_000_000),
                deterministic_deployment: DeterministicDeployment::DefaultSalt,
                log: true,
            }
        );
    }

    #[tokio::test]
    async fn signer_failure_skips_deploy() {
        let connection = MockConnection::failing(DeploymentError::NoSigner);
        let deployments = MockDeployments::default();

        let err = deploy_simple_7702_account(&connection, &deployments)
            .await
            .unwrap_err();
        assert!(matches!(err, DeploymentError::NoSigner));
        assert!(deployments.calls.borrow().is_empty());
    }

    #[tokio::test]
    async fn deploy_failure_is_returned_unchanged() {
        let connection = MockConnection::default();
        let deployments = MockDeployments {
            failure: RefCell::new(Some(DeploymentError::Reverted { tx_hash: TX_HASH })),
            ..Default::default()
        };

        let err = deploy_simple_7702_account(&connection, &deployments)
            .await
            .unwrap_err();
        assert!(matches!(err, DeploymentError::Reverted { tx_hash } if tx_hash == TX_HASH));
        assert_eq!(deployments.calls.borrow().len(), 1);
    }

    #[tokio::test]
    async fn second_run_reuses_deployment() {
        let connection = MockConnection::default();
        let deployments = MockDeployments::default();

        deploy_simple_7702_account(&connection, &deployments)
            .await
            .unwrap();
        deploy_simple_7702_account(&connection, &deployments)
            .await
            .unwrap();

        assert_eq!(deployments.transactions.get(), 1);
        assert_eq!(
            *deployments.logs.borrow(),
            vec![
                "deploying \"Simple7702Account\"".to_owned(),
                "reusing \"Simple7702Account\"".to_owned(),
            ]
        );
    }

    #[test]
    fn selects_scripts_by_tag() {
        assert_eq!(select_scripts(&[]).unwrap(), DeployScript::ALL.to_vec());
        assert_eq!(
            select_scripts(&["aa".to_owned()]).unwrap(),
            vec![DeployScript::Simple7702Account]
        );
        assert!(matches!(
            select_scripts(&["paymaster".to_owned()]),
            Err(DeploymentError::NoMatchingScripts(tags)) if tags == ["paymaster"]
        ));
    }

    #[tokio::test]
    async fn runs_selected_scripts() {
        let connection = MockConnection::default();
        let deployments = MockDeployments::default();

        run_scripts(DeployScript::ALL, &connection, &deployments)
            .await
            .unwrap();
        assert_eq!(deployments.calls.borrow().len(), 1);
        assert_eq!(DeployScript::Simple7702Account.name(), "deploy_Simple7702Account");
    }
}
