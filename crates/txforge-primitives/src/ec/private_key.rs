//! secp256k1 private key.
//!
//! Wraps a k256 signing key and adds raw-byte, hex, and WIF
//! serialization.  The key material is treated as a scoped secret:
//! the scalar bytes are zeroized when the key is dropped.

use k256::ecdsa::SigningKey;
use rand::rngs::OsRng;

use crate::ec::public_key::PublicKey;
use crate::ec::signature::Signature;
use crate::hash::sha256d;
use crate::PrimitivesError;

/// Length of a serialized private key in bytes.
const PRIVATE_KEY_BYTES_LEN: usize = 32;

/// Mainnet WIF prefix byte.
const MAINNET_PREFIX: u8 = 0x80;

/// Compression flag byte appended to WIF for compressed public keys.
const COMPRESS_MAGIC: u8 = 0x01;

/// A secp256k1 private key for signing.
///
/// Wraps a k256 `SigningKey` and provides raw-byte, hex, and WIF
/// serialization plus public key derivation and deterministic signing.
#[derive(Clone, Debug)]
pub struct PrivateKey {
    /// The underlying k256 signing key.
    inner: SigningKey,
}

impl PrivateKey {
    /// Generate a new random private key using the OS random number generator.
    ///
    /// # Returns
    /// A new randomly generated `PrivateKey`.
    pub fn new() -> Self {
        PrivateKey {
            inner: SigningKey::random(&mut OsRng),
        }
    }

    /// Create a private key from a raw 32-byte scalar.
    ///
    /// # Arguments
    /// * `bytes` - A 32-byte slice representing the private key scalar.
    ///
    /// # Returns
    /// `Ok(PrivateKey)` if the bytes represent a valid non-zero scalar on
    /// secp256k1, or an error if the length is wrong or the scalar is out
    /// of range.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.len() != PRIVATE_KEY_BYTES_LEN {
            return Err(PrimitivesError::InvalidPrivateKey(format!(
                "expected {} bytes, got {}",
                PRIVATE_KEY_BYTES_LEN,
                bytes.len()
            )));
        }
        let signing_key = SigningKey::from_bytes(bytes.into())
            .map_err(|e| PrimitivesError::InvalidPrivateKey(e.to_string()))?;
        Ok(PrivateKey { inner: signing_key })
    }

    /// Create a private key from a hexadecimal string.
    ///
    /// # Arguments
    /// * `hex_str` - A 64-character hex string representing the 32-byte scalar.
    ///
    /// # Returns
    /// `Ok(PrivateKey)` on success, or an error if the hex or the scalar
    /// is invalid.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        if hex_str.is_empty() {
            return Err(PrimitivesError::InvalidPrivateKey(
                "private key hex is empty".to_string(),
            ));
        }
        let bytes = hex::decode(hex_str).map_err(|e| PrimitivesError::InvalidHex(e.to_string()))?;
        Self::from_bytes(&bytes)
    }

    /// Create a private key from a WIF (Wallet Import Format) string.
    ///
    /// Decodes the Base58Check-encoded string, validates the checksum,
    /// and extracts the 32-byte private key scalar.
    ///
    /// # Arguments
    /// * `wif` - A Base58Check-encoded WIF string (compressed or uncompressed).
    ///
    /// # Returns
    /// `Ok(PrivateKey)` on success, or an error if the WIF is malformed
    /// or the checksum fails.
    pub fn from_wif(wif: &str) -> Result<Self, PrimitivesError> {
        let decoded = bs58::decode(wif)
            .into_vec()
            .map_err(|e| PrimitivesError::InvalidWif(e.to_string()))?;
        let decoded_len = decoded.len();

        // prefix(1) + key(32) + checksum(4) = 37 for uncompressed keys,
        // plus a compression flag byte = 38 for compressed keys.
        let is_compressed = match decoded_len {
            38 => {
                if decoded[33] != COMPRESS_MAGIC {
                    return Err(PrimitivesError::InvalidWif(
                        "invalid compression flag".to_string(),
                    ));
                }
                true
            }
            37 => false,
            _ => {
                return Err(PrimitivesError::InvalidWif(format!(
                    "invalid length {}",
                    decoded_len
                )));
            }
        };

        // The checksum is the first 4 bytes of sha256d over the payload.
        let payload_end = if is_compressed {
            1 + PRIVATE_KEY_BYTES_LEN + 1
        } else {
            1 + PRIVATE_KEY_BYTES_LEN
        };
        let checksum = sha256d(&decoded[..payload_end]);
        if checksum[..4] != decoded[decoded_len - 4..] {
            return Err(PrimitivesError::ChecksumMismatch);
        }

        Self::from_bytes(&decoded[1..1 + PRIVATE_KEY_BYTES_LEN])
    }

    /// Encode the private key as a WIF string with the mainnet prefix (0x80).
    ///
    /// Always encodes for compressed public key format.
    ///
    /// # Returns
    /// A Base58Check-encoded WIF string.
    pub fn to_wif(&self) -> String {
        let key_bytes = self.to_bytes();
        let mut payload = Vec::with_capacity(1 + PRIVATE_KEY_BYTES_LEN + 1 + 4);
        payload.push(MAINNET_PREFIX);
        payload.extend_from_slice(&key_bytes);
        payload.push(COMPRESS_MAGIC);

        let checksum = sha256d(&payload);
        payload.extend_from_slice(&checksum[..4]);

        bs58::encode(payload).into_string()
    }

    /// Serialize the private key as a 32-byte big-endian array.
    ///
    /// # Returns
    /// A 32-byte array containing the private key scalar.
    pub fn to_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        out.copy_from_slice(&self.inner.to_bytes());
        out
    }

    /// Serialize the private key as a lowercase hexadecimal string.
    ///
    /// # Returns
    /// A 64-character hex string representing the 32-byte scalar.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Derive the corresponding public key for this private key.
    ///
    /// # Returns
    /// The `PublicKey` corresponding to this private key.
    pub fn pub_key(&self) -> PublicKey {
        PublicKey::from_verifying_key(self.inner.verifying_key())
    }

    /// Sign a 32-byte message digest using deterministic RFC6979 nonces.
    ///
    /// Produces a low-S normalized signature.
    ///
    /// # Arguments
    /// * `digest` - The 32-byte message digest to sign.
    ///
    /// # Returns
    /// `Ok(Signature)` on success, or an error if signing fails.
    pub fn sign(&self, digest: &[u8; 32]) -> Result<Signature, PrimitivesError> {
        Signature::sign(digest, self)
    }

    /// Access the underlying k256 `SigningKey`.
    ///
    /// # Returns
    /// A reference to the inner `SigningKey`.
    pub(crate) fn signing_key(&self) -> &SigningKey {
        &self.inner
    }
}

impl Default for PrivateKey {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for PrivateKey {
    fn drop(&mut self) {
        use zeroize::Zeroize;
        // Overwrite the scalar's byte representation with zeros on release.
        let mut bytes = self.inner.to_bytes();
        bytes.zeroize();
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for PrivateKey {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::sha256;

    #[test]
    fn test_from_bytes_roundtrip() {
        let key_bytes = sha256(b"deterministic test key");
        let key = PrivateKey::from_bytes(&key_bytes).unwrap();
        assert_eq!(key.to_bytes(), key_bytes);
        assert_eq!(key.to_hex(), hex::encode(key_bytes));
    }

    #[test]
    fn test_from_bytes_rejects_bad_length() {
        assert!(PrivateKey::from_bytes(&[]).is_err());
        assert!(PrivateKey::from_bytes(&[0x01; 31]).is_err());
        assert!(PrivateKey::from_bytes(&[0x01; 33]).is_err());
    }

    #[test]
    fn test_from_bytes_rejects_zero_scalar() {
        assert!(PrivateKey::from_bytes(&[0u8; 32]).is_err());
    }

    #[test]
    fn test_from_hex() {
        let key = PrivateKey::new();
        let parsed = PrivateKey::from_hex(&key.to_hex()).unwrap();
        assert_eq!(key, parsed);

        assert!(PrivateKey::from_hex("").is_err());
        assert!(PrivateKey::from_hex("not hex").is_err());
    }

    #[test]
    fn test_wif_roundtrip() {
        let key = PrivateKey::new();
        let wif = key.to_wif();
        let parsed = PrivateKey::from_wif(&wif).unwrap();
        assert_eq!(key, parsed);
    }

    #[test]
    fn test_wif_rejects_corruption() {
        let key = PrivateKey::new();
        let wif = key.to_wif();

        // Truncated string.
        assert!(PrivateKey::from_wif(&wif[..wif.len() - 2]).is_err());

        // Flipped character breaks the checksum (pick one that stays in
        // the Base58 alphabet).
        let mut mangled: Vec<char> = wif.chars().collect();
        mangled[10] = if mangled[10] == 'a' { 'b' } else { 'a' };
        let mangled: String = mangled.into_iter().collect();
        assert!(PrivateKey::from_wif(&mangled).is_err());

        // Not Base58 at all.
        assert!(PrivateKey::from_wif("0OIl").is_err());
        assert!(PrivateKey::from_wif("").is_err());
    }

    #[test]
    fn test_pub_key_is_compressed_point() {
        let key = PrivateKey::from_bytes(&sha256(b"another key")).unwrap();
        let compressed = key.pub_key().to_compressed();
        assert_eq!(compressed.len(), 33);
        assert!(compressed[0] == 0x02 || compressed[0] == 0x03);
    }

    #[test]
    fn test_sign_and_verify() {
        let key = PrivateKey::from_bytes(&sha256(b"signing key")).unwrap();
        let digest = sha256(b"message");
        let sig = key.sign(&digest).unwrap();
        assert!(key.pub_key().verify(&digest, &sig));

        let other_digest = sha256(b"different message");
        assert!(!key.pub_key().verify(&other_digest, &sig));
    }
}
