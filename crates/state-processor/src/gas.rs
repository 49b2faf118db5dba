/// Error returned when a transaction requests more gas than the block has left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("gas limit reached: requested {requested}, available {available}")]
pub struct GasLimitReached {
    /// Gas requested from the pool.
    pub requested: u64,
    /// Gas left in the pool.
    pub available: u64,
}

/// The gas available to the transactions of one block.
///
/// The pool starts at the block gas limit. Execution engines draw a transaction's full gas limit
/// before running it and return the unused part afterwards. The pool never goes below zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, derive_more::Display)]
#[display("{_0}")]
pub struct GasPool(u64);

impl GasPool {
    /// Creates a pool holding `gas`.
    pub const fn new(gas: u64) -> Self {
        Self(gas)
    }

    /// Returns `amount` to the pool.
    ///
    /// Refunds never exceed what was drawn, so the pool does not grow past the block gas limit.
    pub const fn add_gas(&mut self, amount: u64) -> &mut Self {
        self.0 = self.0.saturating_add(amount);
        self
    }

    /// Draws `amount` from the pool.
    pub const fn sub_gas(&mut self, amount: u64) -> Result<(), GasLimitReached> {
        if self.0 < amount {
            return Err(GasLimitReached { requested: amount, available: self.0 });
        }
        self.0 -= amount;
        Ok(())
    }

    /// Gas left in the pool.
    pub const fn gas(&self) -> u64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sub_gas_never_goes_negative() {
        let mut pool = GasPool::new(50_000);
        pool.sub_gas(21_000).unwrap();
        assert_eq!(pool.gas(), 29_000);

        assert_eq!(
            pool.sub_gas(29_001),
            Err(GasLimitReached { requested: 29_001, available: 29_000 })
        );
        assert_eq!(pool.gas(), 29_000);

        pool.sub_gas(29_000).unwrap();
        assert_eq!(pool.gas(), 0);
    }

    #[test]
    fn test_add_gas_refunds() {
        let mut pool = GasPool::new(100);
        pool.sub_gas(100).unwrap();
        pool.add_gas(40).add_gas(60);
        assert_eq!(pool.gas(), 100);
        assert_eq!(pool.to_string(), "100");
    }
}
