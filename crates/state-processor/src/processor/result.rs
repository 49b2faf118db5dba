use crate::{Receipt, RecordedLog};

/// The result of processing a block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// One receipt per transaction, in transaction order.
    pub receipts: Vec<Receipt>,
    /// The logs of all receipts, in order.
    pub logs: Vec<RecordedLog>,
    /// Total gas used by the block.
    pub gas_used: u64,
}
