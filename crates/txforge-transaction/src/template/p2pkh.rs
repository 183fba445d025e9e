//! Pay-to-Public-Key-Hash (P2PKH) script template.
//!
//! Creates standard P2PKH locking scripts (`OP_DUP OP_HASH160 <hash>
//! OP_EQUALVERIFY OP_CHECKSIG`) and the unlocking scripts this system
//! signs with: `[len(sig)][sig][len(pubkey)][pubkey]`, each length a
//! single byte, where `sig` is the DER-encoded signature with the
//! sighash type appended and `pubkey` the 33-byte compressed key.

use txforge_primitives::ec::{PrivateKey, PublicKey};

use crate::builder::TxBuilder;
use crate::script::{Script, OP_CHECKSIG, OP_DATA_20, OP_DUP, OP_EQUALVERIFY, OP_HASH160};
use crate::sighash::{self, SIGHASH_ALL};
use crate::template::UnlockingScriptTemplate;
use crate::TransactionError;

/// Create a P2PKH locking script paying to a public key.
///
/// Produces: `OP_DUP OP_HASH160 <20-byte pubkey hash> OP_EQUALVERIFY OP_CHECKSIG`
///
/// # Arguments
/// * `pub_key` - The public key whose Hash160 the output locks to.
///
/// # Returns
/// The 25-byte P2PKH locking script.
pub fn lock(pub_key: &PublicKey) -> Script {
    let pkh = pub_key.hash160();

    let mut bytes = Vec::with_capacity(25);
    bytes.push(OP_DUP);
    bytes.push(OP_HASH160);
    bytes.push(OP_DATA_20);
    bytes.extend_from_slice(&pkh);
    bytes.push(OP_EQUALVERIFY);
    bytes.push(OP_CHECKSIG);

    Script::from_bytes(&bytes)
}

/// Create a P2PKH unlocker for signing transaction inputs.
///
/// # Arguments
/// * `private_key` - The private key used to sign.
/// * `sighash_type` - Optional sighash type. Defaults to `SIGHASH_ALL` (0x01).
///
/// # Returns
/// A `P2pkh` instance implementing `UnlockingScriptTemplate`.
pub fn unlock(private_key: PrivateKey, sighash_type: Option<u8>) -> P2pkh {
    P2pkh {
        private_key,
        sighash_type: sighash_type.unwrap_or(SIGHASH_ALL),
    }
}

/// P2PKH signing template holding a private key and sighash type.
pub struct P2pkh {
    /// The private key used for ECDSA signing.
    private_key: PrivateKey,

    /// The sighash type appended to the signature (e.g. `SIGHASH_ALL`).
    sighash_type: u8,
}

impl UnlockingScriptTemplate for P2pkh {
    /// Sign the specified input and produce the unlocking script.
    ///
    /// Computes the signature digest for the input, signs it with
    /// RFC6979 deterministic ECDSA, and constructs the unlocking
    /// script: `[len(DER_sig || sighash_byte)][...][len(pubkey)][pubkey]`.
    ///
    /// # Arguments
    /// * `builder` - The transaction under construction.
    /// * `input_index` - The index of the input to sign.
    ///
    /// # Returns
    /// `Ok(Script)` containing the unlocking script.
    fn sign(&self, builder: &TxBuilder, input_index: usize) -> Result<Script, TransactionError> {
        let digest = sighash::signature_digest(
            builder.inputs(),
            input_index,
            builder.output_count(),
            self.sighash_type,
        )?;

        let signature = self.private_key.sign(&digest)?;

        // DER signature with the sighash type byte appended.
        let mut sig_bytes = signature.to_der();
        sig_bytes.push(self.sighash_type);

        // Compressed public key (33 bytes).
        let pub_key_bytes = self.private_key.pub_key().to_compressed();

        let mut script = Script::new();
        script.push_data(&sig_bytes)?;
        script.push_data(&pub_key_bytes)?;

        Ok(script)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use txforge_primitives::hash::sha256;

    #[test]
    fn test_lock_builds_p2pkh_pattern() {
        let key = PrivateKey::from_bytes(&sha256(b"lock test key")).unwrap();
        let script = lock(&key.pub_key());

        assert_eq!(script.len(), 25);
        assert!(script.is_p2pkh());
        assert_eq!(&script.to_bytes()[3..23], &key.pub_key().hash160());
    }
}
