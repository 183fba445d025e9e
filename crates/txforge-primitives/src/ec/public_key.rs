//! secp256k1 public key.
//!
//! Supports compressed/uncompressed SEC1 parsing, compressed
//! serialization, Hash160 derivation for public-key-hash locks, and
//! ECDSA signature verification.

use k256::ecdsa::VerifyingKey;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use std::fmt;

use crate::ec::signature::Signature;
use crate::hash::hash160;
use crate::PrimitivesError;

/// Length of a compressed public key in bytes (prefix + 32-byte x-coordinate).
const COMPRESSED_LEN: usize = 33;

/// A secp256k1 public key for signature verification.
///
/// Wraps a k256 `VerifyingKey` and provides SEC1 serialization and
/// Hash160 derivation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    /// The underlying k256 verifying key.
    inner: VerifyingKey,
}

impl PublicKey {
    /// Create a PublicKey from raw SEC1 encoded bytes.
    ///
    /// Accepts both compressed (33-byte) and uncompressed (65-byte) formats.
    ///
    /// # Arguments
    /// * `bytes` - SEC1-encoded public key bytes.
    ///
    /// # Returns
    /// `Ok(PublicKey)` on success, or an error if the bytes do not
    /// represent a valid curve point.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.is_empty() {
            return Err(PrimitivesError::InvalidPublicKey(
                "public key bytes are empty".to_string(),
            ));
        }
        let vk = VerifyingKey::from_sec1_bytes(bytes)
            .map_err(|e| PrimitivesError::InvalidPublicKey(e.to_string()))?;
        Ok(PublicKey { inner: vk })
    }

    /// Create a PublicKey from a hex-encoded SEC1 string.
    ///
    /// # Arguments
    /// * `hex_str` - A hex string of a compressed (66 chars) or
    ///   uncompressed (130 chars) key.
    ///
    /// # Returns
    /// `Ok(PublicKey)` on success, or an error if the hex or point is invalid.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        let bytes = hex::decode(hex_str)?;
        Self::from_bytes(&bytes)
    }

    /// Serialize the public key in compressed SEC1 format (33 bytes).
    ///
    /// The first byte is 0x02 (even Y) or 0x03 (odd Y), followed by the
    /// 32-byte X coordinate.
    ///
    /// # Returns
    /// A 33-byte array containing the compressed public key.
    pub fn to_compressed(&self) -> [u8; COMPRESSED_LEN] {
        let point = self.inner.to_encoded_point(true);
        let mut out = [0u8; COMPRESSED_LEN];
        out.copy_from_slice(point.as_bytes());
        out
    }

    /// Serialize the public key as a lowercase hex string (compressed format).
    ///
    /// # Returns
    /// A 66-character hex string of the compressed public key.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_compressed())
    }

    /// Compute the Hash160 of the compressed public key.
    ///
    /// This is the 20-byte value a public-key-hash locking script
    /// commits to.
    ///
    /// # Returns
    /// A 20-byte Hash160 digest.
    pub fn hash160(&self) -> [u8; 20] {
        hash160(&self.to_compressed())
    }

    /// Verify an ECDSA signature against a 32-byte message digest.
    ///
    /// # Arguments
    /// * `digest` - The 32-byte message digest that was signed.
    /// * `signature` - The signature to verify.
    ///
    /// # Returns
    /// `true` if the signature is valid for this key.
    pub fn verify(&self, digest: &[u8; 32], signature: &Signature) -> bool {
        signature.verify(digest, self)
    }

    /// Wrap a k256 `VerifyingKey`.
    ///
    /// # Arguments
    /// * `vk` - The verifying key to wrap.
    ///
    /// # Returns
    /// A `PublicKey` owning a copy of the key.
    pub(crate) fn from_verifying_key(vk: &VerifyingKey) -> Self {
        PublicKey { inner: *vk }
    }

    /// Access the underlying k256 `VerifyingKey`.
    ///
    /// # Returns
    /// A reference to the inner `VerifyingKey`.
    pub(crate) fn verifying_key(&self) -> &VerifyingKey {
        &self.inner
    }
}

impl fmt::Display for PublicKey {
    /// Display the public key as its compressed hex encoding.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ec::PrivateKey;
    use crate::hash::sha256;

    #[test]
    fn test_compressed_roundtrip() {
        let key = PrivateKey::from_bytes(&sha256(b"pubkey test")).unwrap();
        let pub_key = key.pub_key();

        let compressed = pub_key.to_compressed();
        let parsed = PublicKey::from_bytes(&compressed).unwrap();
        assert_eq!(parsed.to_compressed(), compressed);
    }

    #[test]
    fn test_hex_roundtrip() {
        let pub_key = PrivateKey::new().pub_key();
        let parsed = PublicKey::from_hex(&pub_key.to_hex()).unwrap();
        assert_eq!(parsed, pub_key);
    }

    #[test]
    fn test_rejects_invalid_bytes() {
        assert!(PublicKey::from_bytes(&[]).is_err());
        assert!(PublicKey::from_bytes(&[0x02; 10]).is_err());
        // Valid prefix, x-coordinate not on the curve.
        let mut bad = [0xffu8; 33];
        bad[0] = 0x02;
        assert!(PublicKey::from_bytes(&bad).is_err());
        assert!(PublicKey::from_hex("zz").is_err());
    }

    #[test]
    fn test_hash160_matches_manual_computation() {
        let pub_key = PrivateKey::new().pub_key();
        assert_eq!(
            pub_key.hash160(),
            crate::hash::hash160(&pub_key.to_compressed())
        );
    }
}
