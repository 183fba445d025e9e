//! Coin selection.
//!
//! Greedy largest-first selection: candidates are taken in descending
//! amount order until the accumulated value reaches the target.  The
//! selector does not explore near-target combinations, minimize the
//! resulting change, or avoid a sub-dust remainder - callers that care
//! about those properties must post-process the selection.

use crate::utxo::Utxo;
use crate::TransactionError;

/// Select UTXOs covering `target` satoshis.
///
/// Candidates are sorted by amount descending (a stable sort, so
/// equal-amount UTXOs keep their insertion order) and accumulated until
/// the running total reaches the target, including the UTXO that
/// crosses it.  A target of zero selects nothing.
///
/// Pure function: the caller's slice is never modified, and on failure
/// nothing is selected.
///
/// # Arguments
/// * `available` - The spendable outputs to choose from.
/// * `target` - The amount to cover, in satoshis.
///
/// # Returns
/// The selected UTXOs in accumulation order, or
/// `InsufficientFunds { have, need }` when the sum of all candidates is
/// below the target (`have` is the full available total).
pub fn select_utxos(available: &[Utxo], target: u64) -> Result<Vec<Utxo>, TransactionError> {
    let mut candidates: Vec<&Utxo> = available.iter().collect();
    candidates.sort_by(|a, b| b.satoshis.cmp(&a.satoshis));

    let mut selected = Vec::new();
    let mut total = 0u64;

    for utxo in candidates {
        if total >= target {
            break;
        }
        selected.push(utxo.clone());
        total += utxo.satoshis;
    }

    if total < target {
        return Err(TransactionError::InsufficientFunds {
            have: total,
            need: target,
        });
    }

    Ok(selected)
}
