use alloy_consensus::{Eip658Value, Header};
use alloy_primitives::{Address, BlockHash, BlockNumber, Bloom, Log, TxHash, B256};

use crate::Transaction;

/// A block to process: a header, its ordered transactions and its uncle headers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    /// The block header. Only the number, beneficiary, gas limit and hash are interpreted.
    pub header: Header,
    /// Transactions in execution order.
    pub transactions: Vec<Transaction>,
    /// Uncle headers.
    pub ommers: Vec<Header>,
}

impl Block {
    /// Creates a block.
    pub const fn new(header: Header, transactions: Vec<Transaction>, ommers: Vec<Header>) -> Self {
        Self { header, transactions, ommers }
    }

    /// The block number.
    pub const fn number(&self) -> BlockNumber {
        self.header.number
    }

    /// Computes the block hash from the header.
    pub fn hash_slow(&self) -> BlockHash {
        self.header.hash_slow()
    }
}

/// A log emitted during block processing, with its position in the block.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Deref)]
pub struct RecordedLog {
    /// The consensus log.
    #[deref]
    pub inner: Log,
    /// Hash of the transaction that emitted the log.
    pub tx_hash: TxHash,
    /// Hash of the block containing the transaction.
    pub block_hash: BlockHash,
    /// Index of the transaction in the block.
    pub tx_index: usize,
    /// Index of the log in the block.
    pub log_index: usize,
}

/// The outcome of one transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    /// Hash of the transaction.
    pub tx_hash: TxHash,
    /// The state commitment after the transaction, as
    /// [`Eip658Value::PostState`].
    pub status: Eip658Value,
    /// Gas used by the block up to and including this transaction.
    pub cumulative_gas_used: u64,
    /// Gas used by this transaction.
    pub gas_used: u64,
    /// Logs emitted by the transaction.
    pub logs: Vec<RecordedLog>,
    /// Bloom filter over the addresses and topics of [`Receipt::logs`].
    pub logs_bloom: Bloom,
    /// Address of the created contract, for contract creations.
    pub contract_address: Option<Address>,
}

impl Receipt {
    /// The post-transaction state root.
    pub const fn post_state(&self) -> Option<B256> {
        match self.status {
            Eip658Value::PostState(root) => Some(root),
            Eip658Value::Eip658(_) => None,
        }
    }
}

/// Computes the bloom filter of a set of logs.
pub fn logs_bloom<'a>(logs: impl IntoIterator<Item = &'a Log>) -> Bloom {
    let mut bloom = Bloom::default();
    for log in logs {
        bloom.accrue_log(log);
    }
    bloom
}
