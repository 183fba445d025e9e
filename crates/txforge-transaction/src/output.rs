//! Transaction output with satoshi value and locking script.

use crate::script::Script;

/// A single output of a transaction under construction.
///
/// Each output locks `satoshis` behind `locking_script`.  Outputs are
/// created by `add_output` or by the change policy and are immutable
/// afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TxOutput {
    /// The number of satoshis locked by this output.
    pub satoshis: u64,

    /// The locking script that defines spending conditions.
    pub locking_script: Script,
}

impl TxOutput {
    /// Create a new output.
    ///
    /// # Arguments
    /// * `satoshis` - Value in satoshis.
    /// * `locking_script` - The locking condition.
    ///
    /// # Returns
    /// A new `TxOutput`.
    pub fn new(satoshis: u64, locking_script: Script) -> Self {
        TxOutput {
            satoshis,
            locking_script,
        }
    }
}
