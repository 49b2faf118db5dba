use alloy_primitives::{BlockNumber, ChainId, TxHash};

use crate::SignerError;

/// The chain configuration does not allow a transaction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    /// A replay protected transaction was found in a block where EIP-155 is not configured.
    #[error(
        "chain id is not set for EIP-155 in chain configuration at block number {number}, \
         tx chain id: {tx_chain_id:?}"
    )]
    ReplayProtectionNotConfigured {
        /// The block number.
        number: BlockNumber,
        /// The chain id declared by the transaction.
        tx_chain_id: Option<ChainId>,
    },
}

/// A transaction violates a protocol rule checked by the processor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The chain id of a replay protected transaction differs from the configured one.
    #[error("invalid transaction chain id: current chain id {expected}, tx chain id {got:?}")]
    ChainIdMismatch {
        /// The chain id required at this block.
        expected: ChainId,
        /// The chain id declared by the transaction.
        got: Option<ChainId>,
    },
    /// The sender of the transaction could not be recovered.
    #[error("invalid transaction signature: {0}")]
    InvalidSignature(#[from] SignerError),
}

/// The reason a transaction was rejected.
#[derive(Debug, thiserror::Error)]
pub enum ProcessErrorKind<E> {
    /// See [`ConfigurationError`].
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    /// See [`ValidationError`].
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The execution engine failed. The error is passed through unchanged.
    #[error("execution failed: {0}")]
    Execution(#[source] E),
    /// The execution engine reported more gas than the transaction may consume.
    #[error("execution engine used {gas_used} gas, transaction gas limit is {gas_limit}")]
    GasLimitExceeded {
        /// Gas reported by the engine.
        gas_used: u64,
        /// The transaction gas limit.
        gas_limit: u64,
    },
}

/// A block was rejected. No receipts are produced for a rejected block, and the state object may
/// hold the changes of the transactions before the failing one.
#[derive(Debug, thiserror::Error)]
#[error("block #{number} rejected at transaction {tx_index} ({tx_hash}) after {gas_used} gas: {kind}")]
pub struct ProcessError<E> {
    /// The block number.
    pub number: BlockNumber,
    /// Index of the failing transaction.
    pub tx_index: usize,
    /// Hash of the failing transaction.
    pub tx_hash: TxHash,
    /// Gas used by the transactions before the failing one.
    pub gas_used: u64,
    /// Why the transaction was rejected.
    #[source]
    pub kind: ProcessErrorKind<E>,
}

impl<E> ProcessError<E> {
    /// Returns the execution engine error, if the block failed during execution.
    pub const fn as_execution(&self) -> Option<&E> {
        match &self.kind {
            ProcessErrorKind::Execution(err) => Some(err),
            _ => None,
        }
    }
}
