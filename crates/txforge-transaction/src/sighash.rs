//! Signature digest computation for input signing.
//!
//! The digest scheme here is deliberately narrow: it commits to the
//! transaction version, the input and output counts, and the outpoint
//! (txid and vout) of the one input being signed.  It does NOT cover
//! output amounts, locking scripts, or the other inputs the way a
//! full-protocol signature hash does, so transactions signed with it
//! are not interoperable with consensus verifiers.  The scheme is kept
//! behind the `SighashScheme` trait so a standards-compliant digest can
//! be substituted without touching the signer or the assembler.

use txforge_primitives::hash::sha256d;
use txforge_primitives::util::ByteWriter;

use crate::builder::TRANSACTION_VERSION;
use crate::input::TxInput;
use crate::TransactionError;

/// Sign all inputs and all outputs (the default, and the only flag this
/// system's template uses).
pub const SIGHASH_ALL: u8 = 0x01;

/// A signature digest scheme.
///
/// Implementations produce the 32-byte digest that is signed to
/// authorize spending one input.  The digest must be a pure function of
/// the builder state passed in: it is not recomputed if inputs or
/// outputs are appended later, so callers must sign only once the
/// input/output set is final.
pub trait SighashScheme {
    /// Compute the digest for the input at `input_index`.
    ///
    /// # Arguments
    /// * `inputs` - All inputs of the transaction being signed.
    /// * `input_index` - Index of the input being signed.
    /// * `output_count` - Number of outputs currently on the transaction.
    /// * `sighash_type` - The signature hash type requested by the signer.
    ///
    /// # Returns
    /// A 32-byte digest, or `IndexOutOfRange` for a bad index.
    fn digest(
        &self,
        inputs: &[TxInput],
        input_index: usize,
        output_count: usize,
        sighash_type: u8,
    ) -> Result<[u8; 32], TransactionError>;
}

/// The default digest scheme: double SHA-256 over the outpoint-and-counts
/// preimage described at module level.
#[derive(Clone, Copy, Debug, Default)]
pub struct OutpointSighash;

impl SighashScheme for OutpointSighash {
    fn digest(
        &self,
        inputs: &[TxInput],
        input_index: usize,
        output_count: usize,
        _sighash_type: u8,
    ) -> Result<[u8; 32], TransactionError> {
        let preimage = calc_preimage(inputs, input_index, output_count)?;
        Ok(sha256d(&preimage))
    }
}

/// Compute the signature digest for one input under the default scheme.
///
/// Convenience wrapper over `OutpointSighash`.
///
/// # Arguments
/// * `inputs` - All inputs of the transaction being signed.
/// * `input_index` - Index of the input being signed.
/// * `output_count` - Number of outputs currently on the transaction.
/// * `sighash_type` - The signature hash type requested by the signer.
///
/// # Returns
/// A 32-byte double-SHA256 digest, or `IndexOutOfRange` for a bad index.
pub fn signature_digest(
    inputs: &[TxInput],
    input_index: usize,
    output_count: usize,
    sighash_type: u8,
) -> Result<[u8; 32], TransactionError> {
    OutpointSighash.digest(inputs, input_index, output_count, sighash_type)
}

/// Compute the preimage bytes for the default scheme before double-hashing.
///
/// The preimage consists of:
/// 1. version (4 bytes LE, the fixed transaction version)
/// 2. input count (1 byte)
/// 3. the signed input's transaction id, committed as its text bytes
/// 4. vout of the signed input (4 bytes LE)
/// 5. output count (1 byte)
///
/// The sighash type is not part of the preimage under this scheme; the
/// signer appends it to the signature instead.  Counts are a single
/// byte by construction - transactions built here never approach 255
/// inputs or outputs.
///
/// # Arguments
/// * `inputs` - All inputs of the transaction being signed.
/// * `input_index` - Index of the input being signed.
/// * `output_count` - Number of outputs currently on the transaction.
///
/// # Returns
/// The raw preimage bytes (not yet hashed), or `IndexOutOfRange`.
pub fn calc_preimage(
    inputs: &[TxInput],
    input_index: usize,
    output_count: usize,
) -> Result<Vec<u8>, TransactionError> {
    let input = inputs.get(input_index).ok_or(TransactionError::IndexOutOfRange {
        index: input_index,
        len: inputs.len(),
    })?;

    let mut writer = ByteWriter::with_capacity(10 + input.txid.len());
    writer.write_u32_le(TRANSACTION_VERSION);
    writer.write_u8(inputs.len() as u8);
    writer.write_bytes(input.txid.as_bytes());
    writer.write_u32_le(input.vout);
    writer.write_u8(output_count as u8);

    Ok(writer.into_bytes())
}
