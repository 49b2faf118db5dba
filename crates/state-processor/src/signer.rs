use alloy_primitives::ChainId;

/// The signature scheme used to recover the sender of a transaction.
///
/// The scheme is fork dependent and is resolved per block with
/// [`ChainConfig::signer_at`](crate::ChainConfig::signer_at).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum SignerScheme {
    /// Pre-EIP-155 signatures: the signing hash does not commit to a chain id.
    #[display("basic")]
    Basic,
    /// EIP-155 signatures bound to the given chain id. Unprotected transactions are still
    /// accepted and recovered as under [`SignerScheme::Basic`].
    #[display("eip155(chain_id={_0})")]
    ChainId(ChainId),
}

/// Errors raised while recovering the sender of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignerError {
    /// A replay protected transaction was recovered with the basic scheme.
    #[error("replay protected transaction cannot be recovered with the basic signer")]
    UnexpectedProtection,
    /// The chain id of the transaction does not match the signer.
    #[error("invalid chain id for signer: expected {expected}, got {got:?}")]
    InvalidChainId {
        /// The chain id of the signer.
        expected: ChainId,
        /// The chain id encoded in the transaction signature.
        got: Option<ChainId>,
    },
    /// The `v` value does not encode a valid recovery id.
    #[error("invalid signature recovery value v={0}")]
    InvalidRecoveryId(u64),
    /// The `r` or `s` value is not a valid scalar.
    #[error("invalid signature values")]
    InvalidSignature,
    /// Public key recovery failed.
    #[error("public key recovery failed")]
    RecoveryFailed,
}
