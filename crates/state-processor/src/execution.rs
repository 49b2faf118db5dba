use core::fmt;

use alloy_consensus::Header;
use alloy_primitives::Address;
use auto_impl::auto_impl;

use crate::{ChainConfig, GasPool, SignerScheme, Transaction};

/// The environment a transaction message executes in.
pub struct ExecutionEnv<'a, S: ?Sized, C: ?Sized> {
    /// The state the message mutates.
    pub state: &'a mut S,
    /// The chain configuration.
    pub config: &'a ChainConfig,
    /// The chain the block is processed on.
    pub chain: &'a C,
    /// Header of the block being processed.
    pub header: &'a Header,
    /// The recovered sender of the transaction.
    pub sender: Address,
    /// The signer scheme the sender was recovered with.
    pub signer: SignerScheme,
}

impl<S: ?Sized, C: ?Sized> fmt::Debug for ExecutionEnv<'_, S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionEnv")
            .field("number", &self.header.number)
            .field("sender", &self.sender)
            .field("signer", &self.signer)
            .finish_non_exhaustive()
    }
}

/// Executes transaction messages.
///
/// Opcode interpretation, call and create semantics and gas metering live behind this trait.
/// An engine draws the gas limit of the transaction from `gas_pool` before execution, returns
/// the unused gas afterwards and reports the gas consumed. Errors are returned as-is to the
/// caller of [`BlockProcessor::process`](crate::BlockProcessor::process); the engine's error type
/// must be able to represent [`GasLimitReached`](crate::GasLimitReached).
#[auto_impl(&, Box, Arc)]
pub trait ExecutionEngine<S: ?Sized, C: ?Sized> {
    /// The error type of the engine.
    type Error: core::error::Error + 'static;

    /// Executes the message of `tx` in `env` and returns the gas it used.
    fn apply_message(
        &self,
        env: ExecutionEnv<'_, S, C>,
        tx: &Transaction,
        gas_pool: &mut GasPool,
    ) -> Result<u64, Self::Error>;
}
