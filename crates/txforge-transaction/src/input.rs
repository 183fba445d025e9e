//! Transaction input referencing a previous output.

use crate::script::Script;
use crate::utxo::Utxo;

/// Default sequence number indicating a finalized input (no relative lock-time).
pub const DEFAULT_SEQUENCE: u32 = 0xFFFF_FFFF;

/// A single input of a transaction under construction.
///
/// Each input references the output it spends by the funding
/// transaction's identifier and output index.  `unlocking_script` is
/// `None` until the input is signed; signing sets it exactly once (a
/// re-sign overwrites it).  `source_satoshis` records the value of the
/// spent output for balance accounting - it is a local annotation and
/// is not part of the assembled record.
#[derive(Clone, Debug)]
pub struct TxInput {
    /// Identifier of the transaction whose output is being spent.
    pub txid: String,

    /// Index of the output within the source transaction.
    pub vout: u32,

    /// The unlocking script proving authorization to spend.
    /// `None` when the input has not yet been signed.
    pub unlocking_script: Option<Script>,

    /// Sequence number. Defaults to `0xFFFFFFFF` (finalized).
    pub sequence: u32,

    /// Value of the output being spent, in satoshis.
    /// Local-only; used for balance accounting, never serialized.
    pub source_satoshis: u64,
}

impl TxInput {
    /// Derive an input from a UTXO.
    ///
    /// The input starts unsigned with the default sequence number.
    ///
    /// # Arguments
    /// * `utxo` - The spendable output to reference.
    ///
    /// # Returns
    /// A new unsigned `TxInput`.
    pub fn from_utxo(utxo: &Utxo) -> Self {
        TxInput {
            txid: utxo.txid.clone(),
            vout: utxo.vout,
            unlocking_script: None,
            sequence: DEFAULT_SEQUENCE,
            source_satoshis: utxo.satoshis,
        }
    }

    /// Check whether this input carries an unlocking script.
    ///
    /// # Returns
    /// `true` once the input has been signed.
    pub fn is_signed(&self) -> bool {
        self.unlocking_script.is_some()
    }
}
