/// txforge - Cryptographic primitives and byte utilities.
///
/// This crate provides the foundational building blocks for txforge:
/// - Hash functions (SHA-256, SHA-256d, RIPEMD-160, Hash160)
/// - Elliptic curve cryptography (secp256k1 keys and ECDSA signatures)
/// - Little-endian byte writing for digest preimages

pub mod hash;
pub mod util;
pub mod ec;

mod error;
pub use error::PrimitivesError;
