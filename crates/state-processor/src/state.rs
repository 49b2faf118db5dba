use std::collections::BTreeMap;

use alloy_primitives::{Address, BlockHash, BlockNumber, TxHash, B256, U256};
use auto_impl::auto_impl;

use crate::RecordedLog;

/// The mutable account state a block is processed against.
///
/// The state storage engine (tries, snapshots, persistence) lives outside this crate. The
/// processor only needs balance credits for rewards, log attribution and intermediate state
/// commitments. Implementations are mutated in place and are not rolled back on failure.
#[auto_impl(&mut, Box)]
pub trait StateDb {
    /// Credits `amount` wei to `address`, creating the account if needed.
    fn add_balance(&mut self, address: Address, amount: U256);

    /// Sets the context logs emitted from now on are attributed to.
    fn start_record(&mut self, tx_hash: TxHash, block_hash: BlockHash, tx_index: usize);

    /// Returns the logs recorded for the given transaction.
    fn logs(&self, tx_hash: TxHash) -> Vec<RecordedLog>;

    /// Computes the commitment of the current state.
    fn intermediate_root(&mut self) -> B256;
}

/// Read access to the chain a block is processed on, for the execution engine.
#[auto_impl(&, Box, Arc)]
pub trait ChainContext {
    /// Returns the hash of the canonical header at `number`.
    fn header_hash(&self, number: BlockNumber) -> Option<BlockHash>;
}

impl ChainContext for BTreeMap<BlockNumber, BlockHash> {
    fn header_hash(&self, number: BlockNumber) -> Option<BlockHash> {
        self.get(&number).copied()
    }
}
