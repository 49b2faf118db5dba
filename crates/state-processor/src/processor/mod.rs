//! Block processing.
//!
//! [`StateProcessor`] drives one block through the state transition:
//!
//! 1. A [`GasPool`] is filled with the block gas limit.
//! 2. Every transaction is checked against the replay protection rule active at the block, its
//!    log record is started and it is applied with [`apply_transaction`].
//! 3. Once all transactions succeeded, [`accumulate_rewards`] credits the miners.
//!
//! The first failing transaction aborts the block. Transactions before it have already mutated
//! the state object; discarding it is up to the caller.

mod apply;
mod error;
mod result;

pub use apply::*;
pub use error::*;
pub use result::*;

use std::sync::Arc;

use alloy_primitives::BlockNumber;
use auto_impl::auto_impl;
use tracing::{debug, trace};

use crate::{
    accumulate_rewards, constants::features, Block, ChainConfig, ChainContext, ExecutionEngine,
    GasPool, RewardSchedule, StateDb, Transaction,
};

/// Transitions a state by a block.
#[auto_impl(&, Box, Arc)]
pub trait BlockProcessor<S: ?Sized> {
    /// The error of a failed transaction execution.
    type Error: core::error::Error + 'static;

    /// Processes `block` against `state`, mutating it in place.
    ///
    /// Returns the receipts, the logs and the gas used of the block, or the error of the first
    /// failing transaction. Partial results are never returned.
    fn process(
        &self,
        block: &Block,
        state: &mut S,
    ) -> Result<ProcessOutput, ProcessError<Self::Error>>;
}

/// The block processor.
///
/// The processor holds no per-block state and can be reused for consecutive blocks. Calls
/// against one state object are serialized by the mutable borrow of [`BlockProcessor::process`].
#[derive(Debug, Clone)]
pub struct StateProcessor<E, C> {
    config: Arc<ChainConfig>,
    chain: C,
    engine: E,
    rewards: RewardSchedule,
}

impl<E, C> StateProcessor<E, C> {
    /// Creates a processor with the default [`RewardSchedule`].
    pub fn new(config: Arc<ChainConfig>, chain: C, engine: E) -> Self {
        Self { config, chain, engine, rewards: RewardSchedule::default() }
    }

    /// Sets the reward schedule.
    pub fn with_reward_schedule(mut self, rewards: RewardSchedule) -> Self {
        self.rewards = rewards;
        self
    }

    /// The chain configuration.
    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    /// The reward schedule.
    pub const fn reward_schedule(&self) -> &RewardSchedule {
        &self.rewards
    }

    /// The execution engine.
    pub const fn engine(&self) -> &E {
        &self.engine
    }
}

impl<S, E, C> BlockProcessor<S> for StateProcessor<E, C>
where
    S: StateDb + ?Sized,
    C: ChainContext,
    E: ExecutionEngine<S, C>,
{
    type Error = E::Error;

    fn process(
        &self,
        block: &Block,
        state: &mut S,
    ) -> Result<ProcessOutput, ProcessError<Self::Error>> {
        let header = &block.header;
        let block_hash = block.hash_slow();
        let mut gas_pool = GasPool::new(header.gas_limit);
        let mut gas_used = 0;
        let mut receipts = Vec::with_capacity(block.transactions.len());
        let mut logs = Vec::new();

        trace!(
            target: "state_processor",
            number = header.number,
            %block_hash,
            transactions = block.transactions.len(),
            ommers = block.ommers.len(),
            "Processing block"
        );

        for (tx_index, tx) in block.transactions.iter().enumerate() {
            let tx_hash = tx.hash();
            trace!(target: "state_processor", tx_index, %tx_hash, "Applying transaction");
            let outcome = check_replay_protection(&self.config, header.number, tx).and_then(|()| {
                state.start_record(tx_hash, block_hash, tx_index);
                apply_transaction(
                    &self.config,
                    &self.chain,
                    &self.engine,
                    &mut gas_pool,
                    state,
                    header,
                    tx,
                    &mut gas_used,
                )
            });

            let (receipt, _) = match outcome {
                Ok(applied) => applied,
                Err(kind) => {
                    debug!(
                        target: "state_processor",
                        number = header.number,
                        tx_index,
                        %tx_hash,
                        gas_used,
                        error = %kind,
                        "Rejected block"
                    );
                    return Err(ProcessError {
                        number: header.number,
                        tx_index,
                        tx_hash,
                        gas_used,
                        kind,
                    });
                }
            };

            logs.extend(receipt.logs.iter().cloned());
            receipts.push(receipt);
        }

        accumulate_rewards(state, &self.rewards, header, &block.ommers);

        debug!(
            target: "state_processor",
            number = header.number,
            transactions = receipts.len(),
            gas_used,
            "Processed block"
        );

        Ok(ProcessOutput { receipts, logs, gas_used })
    }
}

/// Checks a transaction against the replay protection rule active at block `number`.
///
/// Unprotected transactions always pass. A protected transaction needs EIP-155 to be configured
/// with a chain id at `number`, and that chain id must be the one the transaction declares.
pub fn check_replay_protection<E>(
    config: &ChainConfig,
    number: BlockNumber,
    tx: &Transaction,
) -> Result<(), ProcessErrorKind<E>> {
    if !tx.is_protected() {
        return Ok(());
    }

    let Some(expected) =
        config.feature(number, features::EIP155).and_then(|feature| feature.chain_id())
    else {
        return Err(ConfigurationError::ReplayProtectionNotConfigured {
            number,
            tx_chain_id: tx.chain_id(),
        }
        .into());
    };

    if tx.chain_id() != Some(expected) {
        return Err(ValidationError::ChainIdMismatch { expected, got: tx.chain_id() }.into());
    }

    Ok(())
}
