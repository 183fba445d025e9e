//! Script templates for producing unlocking scripts.
//!
//! Provides the `UnlockingScriptTemplate` trait and the P2PKH
//! implementation used by `TxBuilder::sign_input`.

pub mod p2pkh;

use crate::builder::TxBuilder;
use crate::script::Script;
use crate::TransactionError;

/// Trait for script templates that produce unlocking scripts.
///
/// A signing strategy receives the builder and the input index,
/// computes the appropriate signature digest, signs it, and returns the
/// unlocking script to install on that input.
pub trait UnlockingScriptTemplate {
    /// Produce an unlocking script for the given input.
    ///
    /// # Arguments
    /// * `builder` - The transaction under construction.
    /// * `input_index` - The index of the input to sign.
    ///
    /// # Returns
    /// `Ok(Script)` containing the unlocking script, or an error on failure.
    fn sign(&self, builder: &TxBuilder, input_index: usize) -> Result<Script, TransactionError>;
}
