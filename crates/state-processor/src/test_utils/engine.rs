use std::collections::BTreeMap;

use alloy_primitives::{Address, Log, LogData, TxKind, U256};

use crate::{
    constants::features, ExecutionEngine, ExecutionEnv, GasLimitReached, GasPool, StateDb,
    Transaction,
};

use super::MemoryState;

/// Base gas of a transaction.
pub const TX_GAS: u64 = 21_000;
/// Base gas of a contract creation from Homestead on.
pub const TX_CREATE_GAS: u64 = 53_000;
/// Gas per zero byte of transaction input.
pub const TX_DATA_ZERO_GAS: u64 = 4;
/// Gas per non-zero byte of transaction input.
pub const TX_DATA_NON_ZERO_GAS: u64 = 68;
/// Base gas of a log.
pub const LOG_GAS: u64 = 375;
/// Gas per log topic.
pub const LOG_TOPIC_GAS: u64 = 375;
/// Gas per byte of log data.
pub const LOG_DATA_GAS: u64 = 8;

/// Errors of the [`TransferEngine`]. Each of them invalidates the block.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransferError {
    /// The transaction nonce is not the sender's nonce.
    #[error("nonce mismatch: expected {expected}, got {got}")]
    NonceMismatch {
        /// The sender's nonce.
        expected: u64,
        /// The transaction nonce.
        got: u64,
    },
    /// The sender cannot pay for gas and value.
    #[error("insufficient funds for gas * price + value: have {have}, want {want}")]
    InsufficientFunds {
        /// The sender's balance.
        have: U256,
        /// Gas limit times gas price plus value.
        want: U256,
    },
    /// The block has not enough gas left.
    #[error(transparent)]
    GasLimitReached(#[from] GasLimitReached),
    /// The gas limit does not cover the intrinsic gas.
    #[error("intrinsic gas too low: have {have}, want {want}")]
    IntrinsicGasTooLow {
        /// The transaction gas limit.
        have: u64,
        /// The intrinsic gas.
        want: u64,
    },
}

/// An execution engine that only moves value and emits configured logs.
///
/// Calls to an address registered with [`TransferEngine::with_emitter`] emit the registered logs
/// from that address, paying the standard log gas. A call running out of gas consumes its whole
/// gas limit and emits nothing, but is not an error. Gas fees go to the block beneficiary.
#[derive(Debug, Clone, Default)]
pub struct TransferEngine {
    emitters: BTreeMap<Address, Vec<LogData>>,
}

impl TransferEngine {
    /// Makes calls to `address` emit `logs`.
    pub fn with_emitter(mut self, address: Address, logs: Vec<LogData>) -> Self {
        self.emitters.insert(address, logs);
        self
    }

    /// The gas charged before execution.
    pub fn intrinsic_gas(tx: &Transaction, homestead: bool) -> u64 {
        let base = if tx.is_create() && homestead { TX_CREATE_GAS } else { TX_GAS };
        tx.input.iter().fold(base, |gas, byte| {
            gas + if *byte == 0 { TX_DATA_ZERO_GAS } else { TX_DATA_NON_ZERO_GAS }
        })
    }

    fn logs_gas(logs: &[LogData]) -> u64 {
        logs.iter()
            .map(|log| {
                LOG_GAS +
                    LOG_TOPIC_GAS * log.topics().len() as u64 +
                    LOG_DATA_GAS * log.data.len() as u64
            })
            .sum()
    }
}

impl<C: ?Sized> ExecutionEngine<MemoryState, C> for TransferEngine {
    type Error = TransferError;

    fn apply_message(
        &self,
        env: ExecutionEnv<'_, MemoryState, C>,
        tx: &Transaction,
        gas_pool: &mut GasPool,
    ) -> Result<u64, Self::Error> {
        let ExecutionEnv { state, config, header, sender, .. } = env;

        let nonce = state.nonce(sender);
        if tx.nonce != nonce {
            return Err(TransferError::NonceMismatch { expected: nonce, got: tx.nonce });
        }

        let gas_price = U256::from(tx.gas_price);
        let gas_cost = U256::from(tx.gas_limit).saturating_mul(gas_price);
        let have = state.balance(sender);
        let want = gas_cost.saturating_add(tx.value);
        if have < want {
            return Err(TransferError::InsufficientFunds { have, want });
        }

        gas_pool.sub_gas(tx.gas_limit)?;
        state.sub_balance(sender, gas_cost);

        let homestead = config.is_active(header.number, features::HOMESTEAD);
        let intrinsic_gas = Self::intrinsic_gas(tx, homestead);
        if tx.gas_limit < intrinsic_gas {
            return Err(TransferError::IntrinsicGasTooLow { have: tx.gas_limit, want: intrinsic_gas });
        }
        state.increment_nonce(sender);

        let emitted = tx.to.to().and_then(|to| self.emitters.get(to).map(|logs| (*to, logs)));
        let execution_gas = emitted.map(|(_, logs)| Self::logs_gas(logs)).unwrap_or_default();

        let gas_used = if intrinsic_gas + execution_gas > tx.gas_limit {
            tx.gas_limit
        } else {
            let recipient = match tx.to {
                TxKind::Call(to) => to,
                TxKind::Create => sender.create(tx.nonce),
            };
            state.sub_balance(sender, tx.value);
            state.add_balance(recipient, tx.value);
            if let Some((address, logs)) = emitted {
                for data in logs {
                    state.add_log(Log { address, data: data.clone() });
                }
            }
            intrinsic_gas + execution_gas
        };

        let remaining = tx.gas_limit - gas_used;
        state.add_balance(sender, U256::from(remaining) * gas_price);
        gas_pool.add_gas(remaining);
        state.add_balance(header.beneficiary, U256::from(gas_used) * gas_price);

        Ok(gas_used)
    }
}
