//! Test utilities for the state processor.

mod engine;
mod signer;
mod state;

pub use engine::*;
pub use signer::*;
pub use state::*;

use alloy_consensus::Header;
use alloy_primitives::{Address, BlockNumber};

/// Creates a header with the fields the processor interprets.
pub fn header(number: BlockNumber, beneficiary: Address, gas_limit: u64) -> Header {
    Header { number, beneficiary, gas_limit, ..Default::default() }
}
