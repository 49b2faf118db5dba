//! Miner and uncle reward distribution.
//!
//! After every transaction of a block succeeded, the block's beneficiary receives the static
//! block reward plus an inclusion bonus per uncle, and every uncle's beneficiary receives a
//! reward that decays with the uncle's distance to the including block:
//!
//! ```text
//! uncle_reward = (uncle.number + G - block.number) * block_reward / G
//! miner_reward = block_reward + len(uncles) * block_reward / D
//! ```
//!
//! with `G` = [`UNCLE_GENERATIONS`] and `D` = [`UNCLE_INCLUSION_DIVISOR`] by default.

use alloy_consensus::Header;
use alloy_primitives::{Address, BlockNumber, U256};
use tracing::{trace, warn};

use crate::{
    constants::{MAXIMUM_BLOCK_REWARD, UNCLE_GENERATIONS, UNCLE_INCLUSION_DIVISOR},
    StateDb,
};

/// The reward parameters of a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewardSchedule {
    /// The static reward of the block beneficiary, in wei.
    pub block_reward: U256,
    /// Number of generations over which the uncle reward decays. Must be non-zero.
    pub uncle_generations: u64,
    /// Divisor of the block reward giving the per-uncle inclusion bonus. Must be non-zero.
    pub uncle_inclusion_divisor: u64,
}

impl Default for RewardSchedule {
    fn default() -> Self {
        Self::new(MAXIMUM_BLOCK_REWARD)
    }
}

impl RewardSchedule {
    /// Creates a schedule with the given block reward and the default uncle parameters.
    pub const fn new(block_reward: U256) -> Self {
        Self {
            block_reward,
            uncle_generations: UNCLE_GENERATIONS,
            uncle_inclusion_divisor: UNCLE_INCLUSION_DIVISOR,
        }
    }

    /// Sets the static block reward.
    pub const fn with_block_reward(mut self, block_reward: U256) -> Self {
        self.block_reward = block_reward;
        self
    }

    /// The reward of an uncle at `uncle_number` included in block `number`.
    ///
    /// An uncle [`Self::uncle_generations`] or more blocks older than the including block would
    /// get a non-positive reward; it gets zero.
    pub fn uncle_reward(&self, number: BlockNumber, uncle_number: BlockNumber) -> U256 {
        let remaining = uncle_number.saturating_add(self.uncle_generations).saturating_sub(number);
        U256::from(remaining)
            .saturating_mul(self.block_reward)
            .checked_div(U256::from(self.uncle_generations))
            .unwrap_or_default()
    }

    /// The bonus of the block beneficiary for each included uncle.
    pub fn inclusion_reward(&self) -> U256 {
        self.block_reward.checked_div(U256::from(self.uncle_inclusion_divisor)).unwrap_or_default()
    }

    /// Computes the balance credits of a block, uncles first and the block beneficiary last.
    ///
    /// The credits only depend on the header number and beneficiary, and on the uncle numbers
    /// and beneficiaries.
    pub fn balance_increments(&self, header: &Header, ommers: &[Header]) -> Vec<(Address, U256)> {
        let mut increments = Vec::with_capacity(ommers.len() + 1);
        let mut reward = self.block_reward;
        for ommer in ommers {
            if ommer.number.saturating_add(self.uncle_generations) <= header.number {
                warn!(
                    target: "state_processor::reward",
                    number = header.number,
                    uncle = ommer.number,
                    "uncle outside of the reward window"
                );
            }
            increments.push((ommer.beneficiary, self.uncle_reward(header.number, ommer.number)));
            reward = reward.saturating_add(self.inclusion_reward());
        }
        increments.push((header.beneficiary, reward));
        increments
    }
}

/// Credits the block beneficiary and the uncle beneficiaries of a block.
pub fn accumulate_rewards<S: StateDb + ?Sized>(
    state: &mut S,
    schedule: &RewardSchedule,
    header: &Header,
    ommers: &[Header],
) {
    for (address, amount) in schedule.balance_increments(header, ommers) {
        trace!(target: "state_processor::reward", %address, %amount, "credit reward");
        state.add_balance(address, amount);
    }
}
