use alloy_primitives::{keccak256, Address, Bytes, ChainId, TxHash, TxKind, B256, U256};
use alloy_rlp::{Decodable, Encodable, RlpDecodable, RlpEncodable};
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};

use crate::{
    constants::signature::{EIP155_V_OFFSET, LEGACY_V_OFFSET},
    SignerError, SignerScheme,
};

/// A signed legacy transaction.
///
/// The RLP encoding is `[nonce, gasPrice, gasLimit, to, value, input, v, r, s]`. Replay
/// protection is encoded in `v` as described by EIP-155: unprotected transactions use `v` of 27
/// or 28, protected ones use `chain_id * 2 + 35 + parity`.
#[derive(Debug, Clone, Default, PartialEq, Eq, RlpEncodable, RlpDecodable)]
pub struct Transaction {
    /// Sender nonce.
    pub nonce: u64,
    /// Price of one unit of gas, in wei.
    pub gas_price: u128,
    /// Maximum gas the transaction may consume.
    pub gas_limit: u64,
    /// The recipient, or [`TxKind::Create`] for contract creation.
    pub to: TxKind,
    /// Value transferred to the recipient, in wei.
    pub value: U256,
    /// Call data, or init code for contract creation.
    pub input: Bytes,
    /// Signature recovery value.
    pub v: u64,
    /// Signature `r` value.
    pub r: U256,
    /// Signature `s` value.
    pub s: U256,
}

impl Transaction {
    /// Decodes a transaction from its RLP encoding. Trailing bytes are rejected.
    pub fn decode_rlp(bytes: &[u8]) -> alloy_rlp::Result<Self> {
        let mut buf = bytes;
        let tx = Self::decode(&mut buf)?;
        if !buf.is_empty() {
            return Err(alloy_rlp::Error::UnexpectedLength);
        }
        Ok(tx)
    }

    /// Returns the RLP encoding of the transaction.
    pub fn encoded(&self) -> Vec<u8> {
        alloy_rlp::encode(self)
    }

    /// The transaction hash, i.e. the keccak256 of its RLP encoding.
    pub fn hash(&self) -> TxHash {
        keccak256(self.encoded())
    }

    /// Returns `true` if the transaction is replay protected.
    pub const fn is_protected(&self) -> bool {
        self.v != LEGACY_V_OFFSET && self.v != LEGACY_V_OFFSET + 1
    }

    /// The chain id encoded in the signature, if any.
    pub const fn chain_id(&self) -> Option<ChainId> {
        if self.v >= EIP155_V_OFFSET {
            Some((self.v - EIP155_V_OFFSET) / 2)
        } else {
            None
        }
    }

    /// Returns `true` if the transaction creates a contract.
    pub const fn is_create(&self) -> bool {
        self.to.is_create()
    }

    /// The hash signed by the sender. With a chain id, `[chain_id, 0, 0]` is appended to the
    /// signed fields as described by EIP-155.
    pub fn signature_hash(&self, chain_id: Option<ChainId>) -> B256 {
        let mut payload_length = self.nonce.length() +
            self.gas_price.length() +
            self.gas_limit.length() +
            self.to.length() +
            self.value.length() +
            self.input.length();
        if let Some(chain_id) = chain_id {
            payload_length += chain_id.length() + 0u8.length() * 2;
        }

        let mut buf = Vec::with_capacity(payload_length + 4);
        alloy_rlp::Header { list: true, payload_length }.encode(&mut buf);
        self.nonce.encode(&mut buf);
        self.gas_price.encode(&mut buf);
        self.gas_limit.encode(&mut buf);
        self.to.encode(&mut buf);
        self.value.encode(&mut buf);
        self.input.encode(&mut buf);
        if let Some(chain_id) = chain_id {
            chain_id.encode(&mut buf);
            0u8.encode(&mut buf);
            0u8.encode(&mut buf);
        }

        keccak256(&buf)
    }

    /// Recovers the sender under the given signer scheme.
    pub fn recover_signer(&self, scheme: SignerScheme) -> Result<Address, SignerError> {
        let chain_id = match scheme {
            SignerScheme::Basic if self.is_protected() => {
                return Err(SignerError::UnexpectedProtection)
            }
            SignerScheme::ChainId(expected) if self.is_protected() => {
                if self.chain_id() != Some(expected) {
                    return Err(SignerError::InvalidChainId { expected, got: self.chain_id() });
                }
                Some(expected)
            }
            SignerScheme::Basic | SignerScheme::ChainId(_) => None,
        };

        let offset = match chain_id {
            Some(id) => id.checked_mul(2).and_then(|id| id.checked_add(EIP155_V_OFFSET)),
            None => Some(LEGACY_V_OFFSET),
        };
        let parity = offset
            .and_then(|offset| self.v.checked_sub(offset))
            .filter(|parity| *parity <= 1)
            .ok_or(SignerError::InvalidRecoveryId(self.v))?;
        let recovery_id = RecoveryId::try_from(parity as u8)
            .map_err(|_| SignerError::InvalidRecoveryId(self.v))?;

        let mut sig_bytes = [0u8; 64];
        sig_bytes[..32].copy_from_slice(&self.r.to_be_bytes::<32>());
        sig_bytes[32..].copy_from_slice(&self.s.to_be_bytes::<32>());
        let signature =
            Signature::from_slice(&sig_bytes).map_err(|_| SignerError::InvalidSignature)?;

        let hash = self.signature_hash(chain_id);
        let key = VerifyingKey::recover_from_prehash(&hash[..], &signature, recovery_id)
            .map_err(|_| SignerError::RecoveryFailed)?;

        Ok(public_key_to_address(&key))
    }
}

/// Derives the address of a public key: the last 20 bytes of the keccak256 of the uncompressed
/// point without its `0x04` prefix.
pub(crate) fn public_key_to_address(key: &VerifyingKey) -> Address {
    let point = key.to_encoded_point(false);
    let hash = keccak256(&point.as_bytes()[1..]);
    Address::from_slice(&hash[12..])
}
