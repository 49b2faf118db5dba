use core::fmt;

use alloy_primitives::{Address, ChainId, U256};
use k256::ecdsa::SigningKey;

use crate::{
    constants::signature::{EIP155_V_OFFSET, LEGACY_V_OFFSET},
    transaction::public_key_to_address,
    Transaction,
};

/// A private key that signs test transactions.
#[derive(Clone)]
pub struct TestSigner {
    key: SigningKey,
    address: Address,
}

impl fmt::Debug for TestSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestSigner").field("address", &self.address).finish_non_exhaustive()
    }
}

impl TestSigner {
    /// Creates a deterministic signer. Different seeds give different keys.
    pub fn from_seed(seed: u8) -> Self {
        let mut bytes = [0x11; 32];
        bytes[0] = seed;
        let key = SigningKey::from_slice(&bytes).expect("non-zero scalar below the curve order");
        let address = public_key_to_address(key.verifying_key());
        Self { key, address }
    }

    /// The address of the signer.
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Signs `tx`, replay protected for `chain_id` if given.
    pub fn sign(&self, mut tx: Transaction, chain_id: Option<ChainId>) -> Transaction {
        let hash = tx.signature_hash(chain_id);
        let (signature, recovery_id) =
            self.key.sign_prehash_recoverable(hash.as_slice()).expect("prehash is 32 bytes");
        let bytes = signature.to_bytes();
        tx.r = U256::from_be_slice(&bytes[..32]);
        tx.s = U256::from_be_slice(&bytes[32..]);

        let parity = u64::from(recovery_id.is_y_odd());
        tx.v = match chain_id {
            Some(chain_id) => chain_id * 2 + EIP155_V_OFFSET + parity,
            None => LEGACY_V_OFFSET + parity,
        };
        tx
    }
}
