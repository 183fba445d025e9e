//! Script type - the byte sequence of a locking or unlocking condition.
//!
//! This system treats scripts as opaque byte strings with hex
//! serialization: locking scripts are supplied by the caller as hex and
//! unlocking scripts are produced by the P2PKH template.  There is no
//! script interpretation here beyond the fixed unlocking template and a
//! P2PKH pattern check.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::TransactionError;

/// Opcode: duplicate the top stack item.
pub const OP_DUP: u8 = 0x76;
/// Opcode: hash the top stack item with Hash160.
pub const OP_HASH160: u8 = 0xa9;
/// Opcode: direct push of 20 bytes.
pub const OP_DATA_20: u8 = 0x14;
/// Opcode: verify the top two stack items are equal.
pub const OP_EQUALVERIFY: u8 = 0x88;
/// Opcode: check an ECDSA signature against a public key.
pub const OP_CHECKSIG: u8 = 0xac;

/// A script, represented as a byte vector newtype.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Script(Vec<u8>);

impl Script {
    /// Create a new empty script.
    ///
    /// # Returns
    /// An empty `Script` instance.
    pub fn new() -> Self {
        Script(Vec::new())
    }

    /// Create a script from a hex-encoded string.
    ///
    /// # Arguments
    /// * `hex_str` - A hex string (e.g. "76a914...88ac").
    ///
    /// # Returns
    /// A `Script` wrapping the decoded bytes, or an error if the hex is
    /// invalid.
    pub fn from_hex(hex_str: &str) -> Result<Self, TransactionError> {
        let bytes =
            hex::decode(hex_str).map_err(|e| TransactionError::InvalidHex(e.to_string()))?;
        Ok(Script(bytes))
    }

    /// Create a script from raw bytes.
    ///
    /// # Arguments
    /// * `bytes` - Raw script bytes.
    ///
    /// # Returns
    /// A `Script` wrapping a copy of the given bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Script(bytes.to_vec())
    }

    /// Encode the script as a lowercase hex string.
    ///
    /// # Returns
    /// A hex representation of the script bytes.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Return a reference to the underlying bytes.
    ///
    /// # Returns
    /// A byte slice of the script contents.
    pub fn to_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Return the length of the script in bytes.
    ///
    /// # Returns
    /// The number of bytes in the script.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the script is empty (zero bytes).
    ///
    /// # Returns
    /// `true` if the script has no bytes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Append a length-prefixed data push.
    ///
    /// The length prefix is a single byte, which caps pushable payloads
    /// at 255 bytes - enough for the signature and public key sizes this
    /// system produces.
    ///
    /// # Arguments
    /// * `data` - The payload to push.
    ///
    /// # Returns
    /// `Ok(())` on success, or `PushTooLarge` if the payload exceeds 255 bytes.
    pub fn push_data(&mut self, data: &[u8]) -> Result<(), TransactionError> {
        if data.len() > u8::MAX as usize {
            return Err(TransactionError::PushTooLarge(data.len()));
        }
        self.0.push(data.len() as u8);
        self.0.extend_from_slice(data);
        Ok(())
    }

    /// Check if this is a Pay-to-Public-Key-Hash (P2PKH) locking script.
    ///
    /// Pattern: OP_DUP OP_HASH160 <20 bytes> OP_EQUALVERIFY OP_CHECKSIG
    ///
    /// # Returns
    /// `true` if the script matches the P2PKH pattern.
    pub fn is_p2pkh(&self) -> bool {
        let b = &self.0;
        b.len() == 25
            && b[0] == OP_DUP
            && b[1] == OP_HASH160
            && b[2] == OP_DATA_20
            && b[23] == OP_EQUALVERIFY
            && b[24] == OP_CHECKSIG
    }
}

impl fmt::Display for Script {
    /// Display the script as its hex encoding.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Script({})", self.to_hex())
    }
}

impl Serialize for Script {
    /// Serialize as a hex string.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Script {
    /// Deserialize from a hex string.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex_str = String::deserialize(deserializer)?;
        Script::from_hex(&hex_str).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_roundtrip() {
        let script = Script::from_hex("76a914eb0bd5edba389198e73f8efabddfc61666969ff788ac").unwrap();
        assert_eq!(script.len(), 25);
        assert_eq!(
            script.to_hex(),
            "76a914eb0bd5edba389198e73f8efabddfc61666969ff788ac"
        );
        assert!(script.is_p2pkh());
    }

    #[test]
    fn test_invalid_hex_rejected() {
        assert!(Script::from_hex("not hex").is_err());
        assert!(Script::from_hex("abc").is_err()); // odd length
    }

    #[test]
    fn test_push_data_layout() {
        let mut script = Script::new();
        script.push_data(&[0xaa, 0xbb]).unwrap();
        script.push_data(&[0xcc]).unwrap();
        assert_eq!(script.to_bytes(), &[0x02, 0xaa, 0xbb, 0x01, 0xcc]);
    }

    #[test]
    fn test_push_data_cap() {
        let mut script = Script::new();
        assert!(script.push_data(&[0u8; 255]).is_ok());
        assert!(matches!(
            script.push_data(&[0u8; 256]),
            Err(TransactionError::PushTooLarge(256))
        ));
    }

    #[test]
    fn test_is_p2pkh_rejects_other_shapes() {
        assert!(!Script::new().is_p2pkh());
        assert!(!Script::from_bytes(&[OP_DUP; 25]).is_p2pkh());
        // Right opcodes, wrong length.
        assert!(!Script::from_hex("76a914eb0bd5edba389198e73f8efabddfc61666969ff788").unwrap().is_p2pkh());
    }

    #[test]
    fn test_serde_as_hex_string() {
        let script = Script::from_hex("76a914").unwrap();
        let json = serde_json::to_string(&script).unwrap();
        assert_eq!(json, "\"76a914\"");
        let back: Script = serde_json::from_str(&json).unwrap();
        assert_eq!(back, script);
    }
}
