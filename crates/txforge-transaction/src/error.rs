/// Error types for transaction construction and signing.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// Coin selection could not cover the requested target amount.
    #[error("insufficient funds: have {have}, need {need}")]
    InsufficientFunds { have: u64, need: u64 },

    /// An operation referenced an input index that does not exist.
    #[error("input index {index} out of range (transaction has {len} inputs)")]
    IndexOutOfRange { index: usize, len: usize },

    /// The private key material supplied to the signer is malformed.
    #[error("invalid private key: {0}")]
    InvalidKey(String),

    /// Total input value does not cover total output value plus fee.
    #[error("unbalanced transaction: inputs short by {deficit} satoshis")]
    Unbalanced { deficit: u64 },

    /// A hex string could not be decoded.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// A script data push exceeds the single-byte length prefix.
    #[error("push data too large: {0} bytes (max 255)")]
    PushTooLarge(usize),

    /// An underlying primitives error (forwarded from `txforge-primitives`).
    #[error("primitives error: {0}")]
    Primitives(#[from] txforge_primitives::PrimitivesError),
}
