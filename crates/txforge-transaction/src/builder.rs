//! Transaction builder session and final assembly.
//!
//! A `TxBuilder` is created once per transaction and populated
//! monotonically: inputs and outputs are only ever appended, and
//! insertion order is both signing order and record order.  `build`
//! consumes nothing - it reflects whatever state the builder currently
//! holds, signed or not, and may be called repeatedly.

use serde::{Deserialize, Serialize};

use txforge_primitives::ec::PrivateKey;

use crate::fee;
use crate::input::TxInput;
use crate::output::TxOutput;
use crate::script::Script;
use crate::sighash;
use crate::template::{p2pkh, UnlockingScriptTemplate};
use crate::utxo::Utxo;
use crate::TransactionError;

/// Fixed transaction format version.
pub const TRANSACTION_VERSION: u32 = 1;

/// Fixed lock time (transactions are final immediately).
pub const DEFAULT_LOCK_TIME: u32 = 0;

/// Minimum change value worth creating an output for, in satoshis.
/// Remainders below this are absorbed into the fee.
pub const DUST_THRESHOLD: u64 = 546;

/// Default fee rate in satoshis per modeled size unit.
pub const DEFAULT_FEE_RATE: u64 = 1;

/// A transaction under construction.
///
/// Owns the ordered input and output sequences (append-only; there is
/// no removal operation), the fee rate, and the optional change locking
/// script used by the change policy.  Not designed for concurrent
/// mutation - one builder belongs to one logical workflow.
#[derive(Clone, Debug)]
pub struct TxBuilder {
    /// Ordered inputs. Insertion order is signing and record order.
    inputs: Vec<TxInput>,

    /// Ordered outputs. Insertion order is record order.
    outputs: Vec<TxOutput>,

    /// Fee rate in satoshis per modeled size unit.
    fee_rate: u64,

    /// Locking script for change, if the caller wants change at all.
    change_script: Option<Script>,
}

impl TxBuilder {
    /// Create a new empty builder with the default fee rate.
    ///
    /// # Returns
    /// A `TxBuilder` with no inputs or outputs.
    pub fn new() -> Self {
        TxBuilder {
            inputs: Vec::new(),
            outputs: Vec::new(),
            fee_rate: DEFAULT_FEE_RATE,
            change_script: None,
        }
    }

    // -----------------------------------------------------------------
    // Configuration
    // -----------------------------------------------------------------

    /// Return the configured fee rate.
    ///
    /// # Returns
    /// Satoshis per modeled size unit.
    pub fn fee_rate(&self) -> u64 {
        self.fee_rate
    }

    /// Set the fee rate.
    ///
    /// # Arguments
    /// * `fee_rate` - Satoshis per modeled size unit.
    pub fn set_fee_rate(&mut self, fee_rate: u64) {
        self.fee_rate = fee_rate;
    }

    /// Return the configured change locking script, if any.
    ///
    /// # Returns
    /// `Some(&Script)` when change is enabled.
    pub fn change_script(&self) -> Option<&Script> {
        self.change_script.as_ref()
    }

    /// Configure the locking script change outputs pay to.
    ///
    /// Without a change script the change policy never emits an output
    /// and any remainder is absorbed into the fee.
    ///
    /// # Arguments
    /// * `script` - The change locking script.
    pub fn set_change_script(&mut self, script: Script) {
        self.change_script = Some(script);
    }

    // -----------------------------------------------------------------
    // Inputs
    // -----------------------------------------------------------------

    /// Append an input spending the given UTXO.
    ///
    /// The input starts unsigned with the default sequence number.
    ///
    /// # Arguments
    /// * `utxo` - The spendable output to reference.
    pub fn add_input(&mut self, utxo: &Utxo) {
        self.inputs.push(TxInput::from_utxo(utxo));
    }

    /// Return the inputs in insertion order.
    ///
    /// # Returns
    /// A slice of the inputs.
    pub fn inputs(&self) -> &[TxInput] {
        &self.inputs
    }

    /// Return the number of inputs.
    ///
    /// # Returns
    /// The input count.
    pub fn input_count(&self) -> usize {
        self.inputs.len()
    }

    /// Compute the sum of the source values of all inputs.
    ///
    /// # Returns
    /// The total satoshis the inputs spend.
    pub fn total_input_satoshis(&self) -> u64 {
        self.inputs.iter().map(|i| i.source_satoshis).sum()
    }

    // -----------------------------------------------------------------
    // Outputs
    // -----------------------------------------------------------------

    /// Append a payment output.
    ///
    /// # Arguments
    /// * `satoshis` - Value in satoshis.
    /// * `locking_script` - The locking condition.
    pub fn add_output(&mut self, satoshis: u64, locking_script: Script) {
        self.outputs.push(TxOutput::new(satoshis, locking_script));
    }

    /// Return the outputs in insertion order.
    ///
    /// # Returns
    /// A slice of the outputs.
    pub fn outputs(&self) -> &[TxOutput] {
        &self.outputs
    }

    /// Return the number of outputs.
    ///
    /// # Returns
    /// The output count.
    pub fn output_count(&self) -> usize {
        self.outputs.len()
    }

    /// Compute the sum of all output values.
    ///
    /// # Returns
    /// The total satoshis across all outputs.
    pub fn total_output_satoshis(&self) -> u64 {
        self.outputs.iter().map(|o| o.satoshis).sum()
    }

    // -----------------------------------------------------------------
    // Fee and change
    // -----------------------------------------------------------------

    /// Estimate the fee for the current input/output counts at the
    /// configured fee rate.
    ///
    /// # Returns
    /// The estimated fee in satoshis.
    pub fn estimate_fee(&self) -> u64 {
        fee::estimate_fee(self.inputs.len(), self.outputs.len(), self.fee_rate)
    }

    /// Append a change output if the remainder is worth one.
    ///
    /// `change = input_total - output_total - fee`.  An output of that
    /// amount paying the configured change script is appended iff the
    /// change reaches the dust threshold AND a change script is
    /// configured.  Otherwise nothing is appended and the remainder
    /// (or the shortfall - a negative change is not an error here) is
    /// absorbed into the fee.  Balance validation is `check_balance`'s
    /// job, not this policy's.
    ///
    /// # Arguments
    /// * `input_total` - Total input value in satoshis.
    /// * `output_total` - Total payment output value in satoshis.
    /// * `fee` - The fee in satoshis.
    ///
    /// # Returns
    /// The appended change output, or `None` if no output was added.
    pub fn maybe_add_change(
        &mut self,
        input_total: u64,
        output_total: u64,
        fee: u64,
    ) -> Option<&TxOutput> {
        let change = input_total
            .checked_sub(output_total)
            .and_then(|rest| rest.checked_sub(fee))?;

        if change < DUST_THRESHOLD {
            return None;
        }
        let script = self.change_script.clone()?;

        self.outputs.push(TxOutput::new(change, script));
        self.outputs.last()
    }

    /// Check that the inputs cover the outputs plus the fee.
    ///
    /// Explicitly opt-in: the signing pipeline does not run this check
    /// itself, so an unbalanced transaction signs fine and simply pays
    /// the difference as fee.  Call this between the change policy and
    /// signing to reject that case instead.
    ///
    /// # Arguments
    /// * `fee` - The fee in satoshis.
    ///
    /// # Returns
    /// `Ok(())` when balanced, or `Unbalanced { deficit }` when the
    /// inputs fall short.
    pub fn check_balance(&self, fee: u64) -> Result<(), TransactionError> {
        let required = self.total_output_satoshis() + fee;
        let available = self.total_input_satoshis();
        if available < required {
            return Err(TransactionError::Unbalanced {
                deficit: required - available,
            });
        }
        Ok(())
    }

    // -----------------------------------------------------------------
    // Signing
    // -----------------------------------------------------------------

    /// Compute the signature digest for one input under the default scheme.
    ///
    /// The digest is a pure function of the current state; it is not
    /// recomputed if inputs or outputs are appended later.  Sign only
    /// once the input/output set is final.
    ///
    /// # Arguments
    /// * `input_index` - Index of the input being signed.
    /// * `sighash_type` - The signature hash type.
    ///
    /// # Returns
    /// A 32-byte digest, or `IndexOutOfRange`.
    pub fn signature_digest(
        &self,
        input_index: usize,
        sighash_type: u8,
    ) -> Result<[u8; 32], TransactionError> {
        sighash::signature_digest(&self.inputs, input_index, self.outputs.len(), sighash_type)
    }

    /// Sign one input with a raw private key, installing its unlocking script.
    ///
    /// The key is parsed for this call only and its scalar bytes are
    /// zeroized when it drops.  Exactly the targeted input transitions
    /// from unsigned to signed; re-signing overwrites the previous
    /// script.  On any failure the input is left unchanged.
    ///
    /// # Arguments
    /// * `input_index` - Index of the input to sign.
    /// * `private_key` - The raw 32-byte secp256k1 private key.
    /// * `sighash_type` - Optional sighash type. Defaults to `SIGHASH_ALL`.
    ///
    /// # Returns
    /// `Ok(())` on success; `IndexOutOfRange` for a bad index;
    /// `InvalidKey` for malformed key material.
    pub fn sign_input(
        &mut self,
        input_index: usize,
        private_key: &[u8],
        sighash_type: Option<u8>,
    ) -> Result<(), TransactionError> {
        if input_index >= self.inputs.len() {
            return Err(TransactionError::IndexOutOfRange {
                index: input_index,
                len: self.inputs.len(),
            });
        }

        let key = PrivateKey::from_bytes(private_key)
            .map_err(|e| TransactionError::InvalidKey(e.to_string()))?;

        let unlocker = p2pkh::unlock(key, sighash_type);
        let script = unlocker.sign(self, input_index)?;

        self.inputs[input_index].unlocking_script = Some(script);
        Ok(())
    }

    // -----------------------------------------------------------------
    // Assembly
    // -----------------------------------------------------------------

    /// Assemble the structured transaction record.
    ///
    /// Reflects the current builder state, including unsigned inputs
    /// (rendered with an empty unlocking script).  Never fails, never
    /// mutates, and is idempotent: repeated calls on unchanged state
    /// yield identical records.
    ///
    /// # Returns
    /// The assembled `TransactionRecord`.
    pub fn build(&self) -> TransactionRecord {
        TransactionRecord {
            version: TRANSACTION_VERSION,
            inputs: self
                .inputs
                .iter()
                .map(|input| InputRecord {
                    txid: input.txid.clone(),
                    vout: input.vout,
                    unlocking_script: input
                        .unlocking_script
                        .as_ref()
                        .map(Script::to_hex)
                        .unwrap_or_default(),
                    sequence: input.sequence,
                })
                .collect(),
            outputs: self
                .outputs
                .iter()
                .map(|output| OutputRecord {
                    satoshis: output.satoshis,
                    locking_script: output.locking_script.to_hex(),
                })
                .collect(),
            lock_time: DEFAULT_LOCK_TIME,
        }
    }
}

impl Default for TxBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------
// Assembled records
// ---------------------------------------------------------------------

/// The assembled transaction, ready for the caller.
///
/// Version and lock time are fixed constants of this system; inputs and
/// outputs appear in insertion order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Transaction format version (always `TRANSACTION_VERSION`).
    pub version: u32,

    /// Input records in insertion order.
    pub inputs: Vec<InputRecord>,

    /// Output records in insertion order.
    pub outputs: Vec<OutputRecord>,

    /// Lock time (always `DEFAULT_LOCK_TIME`).
    pub lock_time: u32,
}

/// One assembled input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputRecord {
    /// Identifier of the transaction whose output is spent.
    pub txid: String,

    /// Index of the spent output.
    pub vout: u32,

    /// Unlocking script as lowercase hex, or empty if unsigned.
    pub unlocking_script: String,

    /// Sequence number.
    pub sequence: u32,
}

/// One assembled output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRecord {
    /// Value in satoshis.
    pub satoshis: u64,

    /// Locking script as lowercase hex.
    pub locking_script: String,
}
