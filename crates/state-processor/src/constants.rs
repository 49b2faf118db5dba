//! Protocol constants used by the state processor.

use alloy_primitives::U256;

/// The static block reward of 5 ether, in wei.
pub const MAXIMUM_BLOCK_REWARD: U256 = U256::from_limbs([5_000_000_000_000_000_000, 0, 0, 0]);

/// The number of generations over which an uncle reward decays to zero. Also the divisor of the
/// uncle reward formula.
pub const UNCLE_GENERATIONS: u64 = 8;

/// The divisor applied to the block reward to get the per-uncle inclusion bonus of the miner.
pub const UNCLE_INCLUSION_DIVISOR: u64 = 32;

/// Fork feature identifiers understood by the processor.
pub mod features {
    /// The Homestead rule set. Execution engines read it to price contract creation.
    pub const HOMESTEAD: &str = "homestead";

    /// The replay protection rule (EIP-155).
    pub const EIP155: &str = "eip155";

    /// The option of [`EIP155`] holding the required chain id.
    pub const CHAIN_ID_OPTION: &str = "chainID";
}

/// Signature `v` values of unprotected (pre-EIP-155) transactions.
pub mod signature {
    /// Offset of the recovery id in an unprotected `v` value.
    pub const LEGACY_V_OFFSET: u64 = 27;

    /// Offset of the recovery id in a protected `v` value, before adding `2 * chain_id`.
    pub const EIP155_V_OFFSET: u64 = 35;
}
