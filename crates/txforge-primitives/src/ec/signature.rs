//! ECDSA signature with DER serialization and RFC6979 deterministic nonces.
//!
//! Signatures are produced over a pre-computed 32-byte digest, low-S
//! normalized, and encoded as canonical DER for inclusion in unlocking
//! scripts.

use k256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use k256::ecdsa;

use crate::ec::private_key::PrivateKey;
use crate::ec::public_key::PublicKey;
use crate::PrimitivesError;

/// Half of the secp256k1 curve order (N/2).  A signature whose S
/// component is at most this value is in low-S form.
const HALF_ORDER: [u8; 32] = [
    0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0xFF, 0x5D, 0x57, 0x6E, 0x73, 0x57, 0xA4, 0x50, 0x1D, 0xDF, 0xE9, 0x2F, 0x46, 0x68, 0x1B,
    0x20, 0xA0,
];

/// An ECDSA signature with R and S components.
///
/// Provides deterministic (RFC6979) signing, low-S normalization, DER
/// encoding/decoding, and verification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    /// The R component of the signature (32 bytes, big-endian).
    r: [u8; 32],
    /// The S component of the signature (32 bytes, big-endian).
    s: [u8; 32],
}

impl Signature {
    /// Create a signature from raw R and S 32-byte arrays.
    ///
    /// # Arguments
    /// * `r` - The R component (32 bytes, big-endian).
    /// * `s` - The S component (32 bytes, big-endian).
    ///
    /// # Returns
    /// A new `Signature` with the given R and S values.
    pub fn new(r: [u8; 32], s: [u8; 32]) -> Self {
        Signature { r, s }
    }

    /// Access the R component of the signature.
    ///
    /// # Returns
    /// A reference to the 32-byte R value.
    pub fn r(&self) -> &[u8; 32] {
        &self.r
    }

    /// Access the S component of the signature.
    ///
    /// # Returns
    /// A reference to the 32-byte S value.
    pub fn s(&self) -> &[u8; 32] {
        &self.s
    }

    /// Sign a 32-byte digest using deterministic RFC6979 nonces.
    ///
    /// The resulting signature is low-S normalized so that repeated
    /// signing of the same digest with the same key is byte-identical.
    ///
    /// # Arguments
    /// * `digest` - The 32-byte message digest to sign.
    /// * `priv_key` - The private key to sign with.
    ///
    /// # Returns
    /// `Ok(Signature)` on success, or an error if signing fails.
    pub fn sign(digest: &[u8; 32], priv_key: &PrivateKey) -> Result<Self, PrimitivesError> {
        let k256_sig: ecdsa::Signature = priv_key
            .signing_key()
            .sign_prehash(digest)
            .map_err(|e| PrimitivesError::InvalidSignature(e.to_string()))?;

        // k256 may already emit low-S; normalize_s returns None in that case.
        let k256_sig = k256_sig.normalize_s().unwrap_or(k256_sig);

        let (r_bytes, s_bytes) = k256_sig.split_bytes();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&r_bytes);
        s.copy_from_slice(&s_bytes);

        Ok(Signature { r, s })
    }

    /// Verify this signature against a 32-byte digest and public key.
    ///
    /// # Arguments
    /// * `digest` - The message digest that was signed.
    /// * `pub_key` - The public key to verify against.
    ///
    /// # Returns
    /// `true` if the signature is valid, `false` otherwise.
    pub fn verify(&self, digest: &[u8; 32], pub_key: &PublicKey) -> bool {
        let k256_sig = match ecdsa::Signature::from_scalars(
            k256::FieldBytes::from(self.r),
            k256::FieldBytes::from(self.s),
        ) {
            Ok(sig) => sig,
            Err(_) => return false,
        };

        pub_key
            .verifying_key()
            .verify_prehash(digest, &k256_sig)
            .is_ok()
    }

    /// Serialize the signature in canonical DER format.
    ///
    /// Output: `0x30 <len> 0x02 <r_len> <r> 0x02 <s_len> <s>` where R
    /// and S are trimmed of leading zeros and prefixed with a 0x00 byte
    /// when their high bit is set.
    ///
    /// # Returns
    /// A byte vector containing the DER-encoded signature.
    pub fn to_der(&self) -> Vec<u8> {
        let rb = canonicalize_int(&self.r);
        let sb = canonicalize_int(&self.s);

        let total_len = 6 + rb.len() + sb.len();
        let mut out = Vec::with_capacity(total_len);
        out.push(0x30);
        out.push((total_len - 2) as u8);
        out.push(0x02);
        out.push(rb.len() as u8);
        out.extend_from_slice(&rb);
        out.push(0x02);
        out.push(sb.len() as u8);
        out.extend_from_slice(&sb);
        out
    }

    /// Parse a DER-encoded ECDSA signature.
    ///
    /// Expected format: `0x30 <len> 0x02 <r_len> <r> 0x02 <s_len> <s>`.
    ///
    /// # Arguments
    /// * `bytes` - DER-encoded signature bytes.
    ///
    /// # Returns
    /// `Ok(Signature)` on success, or an error if the encoding is malformed.
    pub fn from_der(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.len() < 8 {
            return Err(PrimitivesError::InvalidSignature(
                "DER signature too short".to_string(),
            ));
        }
        if bytes[0] != 0x30 {
            return Err(PrimitivesError::InvalidSignature(
                "missing DER sequence header".to_string(),
            ));
        }
        let seq_len = bytes[1] as usize;
        if seq_len + 2 != bytes.len() {
            return Err(PrimitivesError::InvalidSignature(
                "DER length does not match data".to_string(),
            ));
        }

        let mut idx = 2;
        let r = read_der_int(bytes, &mut idx)?;
        let s = read_der_int(bytes, &mut idx)?;
        if idx != bytes.len() {
            return Err(PrimitivesError::InvalidSignature(
                "trailing bytes after DER signature".to_string(),
            ));
        }

        if r == [0u8; 32] || s == [0u8; 32] {
            return Err(PrimitivesError::InvalidSignature(
                "signature component is zero".to_string(),
            ));
        }

        Ok(Signature { r, s })
    }

    /// Check whether the S component is in the lower half of the curve order.
    ///
    /// # Returns
    /// `true` if S <= N/2.
    pub fn is_low_s(&self) -> bool {
        for i in 0..32 {
            if self.s[i] < HALF_ORDER[i] {
                return true;
            }
            if self.s[i] > HALF_ORDER[i] {
                return false;
            }
        }
        true // equal
    }
}

/// Canonicalize an integer for DER encoding.
///
/// Strips leading zeros from the big-endian representation and adds a
/// 0x00 padding byte when the high bit is set, so the value is not
/// interpreted as negative.
///
/// # Arguments
/// * `val` - A 32-byte big-endian integer.
///
/// # Returns
/// A byte vector suitable for DER integer encoding.
fn canonicalize_int(val: &[u8; 32]) -> Vec<u8> {
    let mut start = 0;
    while start < 31 && val[start] == 0 {
        start += 1;
    }
    let trimmed = &val[start..];

    if trimmed[0] & 0x80 != 0 {
        let mut out = Vec::with_capacity(trimmed.len() + 1);
        out.push(0x00);
        out.extend_from_slice(trimmed);
        out
    } else {
        trimmed.to_vec()
    }
}

/// Read one DER integer (0x02 marker, length, big-endian value) at `*idx`
/// and left-pad it into a 32-byte array.
///
/// # Arguments
/// * `bytes` - The full DER signature.
/// * `idx` - Cursor into `bytes`; advanced past the integer on success.
///
/// # Returns
/// `Ok([u8; 32])` with the value, or an error on malformed input.
fn read_der_int(bytes: &[u8], idx: &mut usize) -> Result<[u8; 32], PrimitivesError> {
    if *idx + 2 > bytes.len() || bytes[*idx] != 0x02 {
        return Err(PrimitivesError::InvalidSignature(
            "missing DER integer marker".to_string(),
        ));
    }
    let len = bytes[*idx + 1] as usize;
    *idx += 2;
    if len == 0 || *idx + len > bytes.len() {
        return Err(PrimitivesError::InvalidSignature(
            "bad DER integer length".to_string(),
        ));
    }

    // Strip any leading zero padding, then left-pad to 32 bytes.
    let mut val = &bytes[*idx..*idx + len];
    while val.len() > 1 && val[0] == 0 {
        val = &val[1..];
    }
    if val.len() > 32 {
        return Err(PrimitivesError::InvalidSignature(
            "DER integer exceeds 32 bytes".to_string(),
        ));
    }
    let mut out = [0u8; 32];
    out[32 - val.len()..].copy_from_slice(val);

    *idx += len;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::sha256;

    #[test]
    fn test_sign_is_deterministic() {
        let key = PrivateKey::from_bytes(&sha256(b"rfc6979 key")).unwrap();
        let digest = sha256(b"rfc6979 message");

        let sig1 = key.sign(&digest).unwrap();
        let sig2 = key.sign(&digest).unwrap();
        assert_eq!(sig1, sig2);
        assert_eq!(sig1.to_der(), sig2.to_der());
    }

    #[test]
    fn test_signatures_are_low_s() {
        let key = PrivateKey::from_bytes(&sha256(b"low-s key")).unwrap();
        for i in 0..16u8 {
            let digest = sha256(&[i]);
            let sig = key.sign(&digest).unwrap();
            assert!(sig.is_low_s(), "signature for digest {} is not low-S", i);
        }
    }

    #[test]
    fn test_der_roundtrip() {
        let key = PrivateKey::from_bytes(&sha256(b"der key")).unwrap();
        let digest = sha256(b"der message");
        let sig = key.sign(&digest).unwrap();

        let der = sig.to_der();
        let parsed = Signature::from_der(&der).unwrap();
        assert_eq!(parsed, sig);
        assert_eq!(parsed.to_der(), der);
    }

    #[test]
    fn test_der_high_bit_padding() {
        // R with the high bit set must be encoded with a 0x00 prefix byte.
        let mut r = [0u8; 32];
        r[0] = 0x80;
        let mut s = [0u8; 32];
        s[31] = 0x01;
        let sig = Signature::new(r, s);

        let der = sig.to_der();
        // 0x30 len 0x02 0x21 0x00 <32 bytes r> 0x02 0x01 0x01
        assert_eq!(der[2], 0x02);
        assert_eq!(der[3], 0x21);
        assert_eq!(der[4], 0x00);
        assert_eq!(der[5], 0x80);

        let parsed = Signature::from_der(&der).unwrap();
        assert_eq!(parsed, sig);
    }

    #[test]
    fn test_from_der_rejects_malformed() {
        let key = PrivateKey::from_bytes(&sha256(b"bad der key")).unwrap();
        let digest = sha256(b"bad der message");
        let der = key.sign(&digest).unwrap().to_der();

        assert!(Signature::from_der(&[]).is_err());
        assert!(Signature::from_der(&der[..6]).is_err());

        let mut bad_header = der.clone();
        bad_header[0] = 0x31;
        assert!(Signature::from_der(&bad_header).is_err());

        let mut bad_marker = der.clone();
        bad_marker[2] = 0x03;
        assert!(Signature::from_der(&bad_marker).is_err());

        let mut trailing = der.clone();
        trailing.push(0x00);
        assert!(Signature::from_der(&trailing).is_err());
    }

    #[test]
    fn test_verify_rejects_tampering() {
        let key = PrivateKey::from_bytes(&sha256(b"tamper key")).unwrap();
        let digest = sha256(b"tamper message");
        let sig = key.sign(&digest).unwrap();
        let pub_key = key.pub_key();

        assert!(sig.verify(&digest, &pub_key));

        let mut wrong_digest = digest;
        wrong_digest[0] ^= 0x01;
        assert!(!sig.verify(&wrong_digest, &pub_key));

        let other_key = PrivateKey::from_bytes(&sha256(b"other key")).unwrap();
        assert!(!sig.verify(&digest, &other_key.pub_key()));
    }
}
