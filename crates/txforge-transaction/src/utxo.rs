//! Unspent transaction output supplied by the caller.

use serde::{Deserialize, Serialize};

use crate::script::Script;

/// A spendable output observed on the ledger.
///
/// UTXOs are caller-owned and immutable once observed; the builder only
/// reads them.  `txid` is the funding transaction's identifier in its
/// canonical text form, `vout` the index of the output within it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utxo {
    /// Identifier of the transaction that created this output.
    pub txid: String,

    /// Index of the output within the funding transaction.
    pub vout: u32,

    /// Value of the output in satoshis.
    pub satoshis: u64,

    /// The locking script that must be satisfied to spend this output.
    pub script_pubkey: Script,
}

impl Utxo {
    /// Create a new UTXO record.
    ///
    /// # Arguments
    /// * `txid` - Funding transaction identifier.
    /// * `vout` - Output index within the funding transaction.
    /// * `satoshis` - Output value in satoshis.
    /// * `script_pubkey` - The output's locking script.
    ///
    /// # Returns
    /// A new `Utxo`.
    pub fn new(txid: impl Into<String>, vout: u32, satoshis: u64, script_pubkey: Script) -> Self {
        Utxo {
            txid: txid.into(),
            vout,
            satoshis,
            script_pubkey,
        }
    }
}
