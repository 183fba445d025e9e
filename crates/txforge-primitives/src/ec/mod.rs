//! Elliptic curve cryptography over secp256k1.
//!
//! Private keys, public keys, and ECDSA signatures with deterministic
//! (RFC6979) nonces and canonical DER encoding.

pub mod private_key;
pub mod public_key;
pub mod signature;

pub use private_key::PrivateKey;
pub use public_key::PublicKey;
pub use signature::Signature;
