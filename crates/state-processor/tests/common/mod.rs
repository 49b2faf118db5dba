//! Helpers shared by the integration tests.
#![allow(dead_code, unreachable_pub)]

use std::{collections::BTreeMap, sync::Arc};

use alloy_primitives::{address, Address, BlockHash, BlockNumber, ChainId, TxKind, U256};
use state_processor::{
    constants::features,
    test_utils::{TransferEngine, TX_GAS},
    ChainConfig, Fork, ForkFeature, StateProcessor, Transaction,
};

pub const MINER: Address = address!("0x1000000000000000000000000000000000000001");
pub const RECIPIENT: Address = address!("0x2000000000000000000000000000000000000002");
pub const EMITTER: Address = address!("0x3000000000000000000000000000000000000003");
pub const UNCLE_MINER: Address = address!("0x4000000000000000000000000000000000000004");

pub const GAS_PRICE: u128 = 1_000_000_000;
pub const BLOCK_GAS_LIMIT: u64 = 8_000_000;
pub const ONE_ETHER: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

pub type TestProcessor = StateProcessor<TransferEngine, BTreeMap<BlockNumber, BlockHash>>;

/// Creates a processor with an empty chain context.
pub fn processor(config: ChainConfig, engine: TransferEngine) -> TestProcessor {
    StateProcessor::new(Arc::new(config), BTreeMap::new(), engine)
}

/// An unsigned value transfer paying [`GAS_PRICE`] with the base gas limit.
pub fn transfer(nonce: u64, to: Address, value: U256) -> Transaction {
    Transaction {
        nonce,
        gas_price: GAS_PRICE,
        gas_limit: TX_GAS,
        to: TxKind::Call(to),
        value,
        ..Default::default()
    }
}

/// A configuration enabling EIP-155 for `chain_id` from `block` on.
pub fn eip155_config(block: BlockNumber, chain_id: ChainId) -> ChainConfig {
    ChainConfig::new(vec![Fork::new("Diehard", block).with_feature(
        ForkFeature::new(features::EIP155).with_option(features::CHAIN_ID_OPTION, chain_id),
    )])
}

/// The fee paid for `gas` at [`GAS_PRICE`].
pub fn fee(gas: u64) -> U256 {
    U256::from(gas) * U256::from(GAS_PRICE)
}
