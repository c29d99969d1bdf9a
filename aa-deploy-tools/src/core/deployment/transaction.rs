// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Build, fund-check and send a single deployment transaction.

use alloy::{
    network::TransactionBuilder,
    primitives::{Address, Bytes, U256},
    providers::Provider,
    rpc::types::{TransactionReceipt, TransactionRequest},
};

use super::DeploymentError;
use crate::utils::{color::DebugColor, format_max_cost};

/// Deployment transaction, either a plain CREATE or a call into the CREATE2 factory.
#[derive(Debug)]
pub struct DeploymentTransaction {
    tx: TransactionRequest,
    gas_limit: Option<u64>,
    max_fee_per_gas_wei: Option<u128>,
}

impl DeploymentTransaction {
    /// Plain contract creation from `initcode`.
    pub fn create(
        sender: Address,
        initcode: impl Into<Bytes>,
        gas_limit: Option<u64>,
        max_fee_per_gas_wei: Option<u128>,
    ) -> Self {
        Self {
            tx: TransactionRequest::default()
                .with_from(sender)
                .with_deploy_code(initcode),
            gas_limit,
            max_fee_per_gas_wei,
        }
    }

    /// Call into a CREATE2 factory with the given calldata.
    pub fn through_factory(
        sender: Address,
        factory: Address,
        calldata: impl Into<Bytes>,
        gas_limit: Option<u64>,
        max_fee_per_gas_wei: Option<u128>,
    ) -> Self {
        Self {
            tx: TransactionRequest::default()
                .with_from(sender)
                .with_to(factory)
                .with_input(calldata),
            gas_limit,
            max_fee_per_gas_wei,
        }
    }

    pub fn sender(&self) -> Option<Address> {
        self.tx.from
    }

    /// The configured gas ceiling, or a fresh estimate when none was given.
    pub async fn gas(&self, provider: &impl Provider) -> Result<u64, DeploymentError> {
        match self.gas_limit {
            Some(limit) => Ok(limit),
            None => Ok(provider.estimate_gas(self.tx.clone()).await?),
        }
    }

    async fn fee_per_gas(&self, provider: &impl Provider) -> Result<u128, DeploymentError> {
        match self.max_fee_per_gas_wei {
            Some(wei) => Ok(wei),
            None => Ok(provider.get_gas_price().await?),
        }
    }

    /// Sends the transaction and waits for a successful receipt.
    ///
    /// Fails early if the sender cannot cover `gas × fee`.
    pub async fn exec(
        self,
        provider: &impl Provider,
    ) -> Result<TransactionReceipt, DeploymentError> {
        let gas = self.gas(provider).await?;
        let max_fee_per_gas = self.fee_per_gas(provider).await?;
        debug!(@grey, "deployment max cost: {}", format_max_cost(gas, max_fee_per_gas));

        if let Some(from_address) = self.sender() {
            let balance = provider
                .get_balance(from_address)
                .await
                .map_err(|_| DeploymentError::FailedToGetBalance)?;
            let required = U256::from(gas) * U256::from(max_fee_per_gas);
            if balance < required {
                return Err(DeploymentError::NotEnoughFunds {
                    from_address,
                    balance,
                    required,
                });
            }
        }

        let mut tx = self.tx;
        tx.gas = Some(gas);
        tx.max_fee_per_gas = Some(max_fee_per_gas);
        tx.max_priority_fee_per_gas = Some(0);

        let tx = provider.send_transaction(tx).await?;
        let tx_hash = *tx.tx_hash();
        debug!(@grey, "sent deploy tx: {}", tx_hash.debug_lavender());

        let receipt = tx
            .get_receipt()
            .await
            .or(Err(DeploymentError::FailedToComplete))?;
        if !receipt.status() {
            return Err(DeploymentError::Reverted { tx_hash });
        }

        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{address, bytes, TxKind};

    const SENDER: Address = address!("00000000000000000000000000000000000000aa");

    #[test]
    fn create_has_no_recipient() {
        let tx = DeploymentTransaction::create(SENDER, bytes!("6000"), None, None);
        assert_eq!(tx.sender(), Some(SENDER));
        assert_eq!(tx.tx.to, Some(TxKind::Create));
        assert_eq!(tx.tx.input.input().cloned(), Some(bytes!("6000")));
    }

    #[test]
    fn factory_call_targets_factory() {
        let factory = address!("4e59b44847b379578588920ca78fbf26c0b4956c");
        let tx = DeploymentTransaction::through_factory(
            SENDER,
            factory,
            bytes!("00"),
            Some(6_000_000),
            Some(1),
        );
        assert_eq!(tx.tx.to, Some(TxKind::Call(factory)));
        assert_eq!(tx.gas_limit, Some(6_000_000));
        assert_eq!(tx.max_fee_per_gas_wei, Some(1));
    }
}
