//! The block state transition core for Ethereum Classic style chains.
//!
//! Given a pre-transition state and a block, the [`StateProcessor`] runs every transaction
//! through an external [`ExecutionEngine`], builds one [`Receipt`] per transaction and finally
//! credits the miner and uncle miners according to a [`RewardSchedule`]. Processing is
//! all-or-nothing: the first failing transaction aborts the block with a [`ProcessError`].
//!
//! Replay protection (EIP-155) is gated per block by the fork rules of a [`ChainConfig`].
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

pub mod constants;

mod config;
pub use config::*;

mod execution;
pub use execution::*;

mod gas;
pub use gas::*;

mod processor;
pub use processor::*;

mod reward;
pub use reward::*;

mod signer;
pub use signer::*;

mod state;
pub use state::*;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

mod transaction;
pub use transaction::*;

mod types;
pub use types::*;
