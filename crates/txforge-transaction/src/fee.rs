//! Fee estimation.
//!
//! The fee is derived from a modeled transaction size, not from
//! counting serialized bytes: a fixed overhead for version, locktime,
//! and counts, plus a fixed per-input and per-output cost assuming the
//! single compressed-key public-key-hash spending template this system
//! produces.

/// Modeled overhead of a transaction in size units (version, locktime, counts).
pub const BASE_SIZE: u64 = 10;

/// Modeled size of one input under the compressed-key P2PKH template.
pub const INPUT_SIZE: u64 = 68;

/// Modeled size of one output.
pub const OUTPUT_SIZE: u64 = 34;

/// Estimate the fee for a transaction with the given shape.
///
/// `fee = (BASE_SIZE + input_count * INPUT_SIZE + output_count * OUTPUT_SIZE) * fee_rate`
///
/// This is an estimate over the size model above, not a measurement of
/// the actual serialized transaction.
///
/// # Arguments
/// * `input_count` - Number of inputs.
/// * `output_count` - Number of outputs.
/// * `fee_rate` - Satoshis per modeled size unit.
///
/// # Returns
/// The estimated fee in satoshis.
pub fn estimate_fee(input_count: usize, output_count: usize, fee_rate: u64) -> u64 {
    let size = BASE_SIZE + input_count as u64 * INPUT_SIZE + output_count as u64 * OUTPUT_SIZE;
    size * fee_rate
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_input_single_output() {
        // 10 + 68 + 34 = 112 size units at 1 sat per unit.
        assert_eq!(estimate_fee(1, 1, 1), 112);
        assert_eq!(estimate_fee(1, 1, 5), 560);
    }

    #[test]
    fn test_empty_shape_pays_overhead_only() {
        assert_eq!(estimate_fee(0, 0, 1), BASE_SIZE);
        assert_eq!(estimate_fee(0, 0, 0), 0);
    }

    #[test]
    fn test_strictly_increasing_in_counts() {
        for inputs in 0..8 {
            for outputs in 0..8 {
                let here = estimate_fee(inputs, outputs, 2);
                assert!(estimate_fee(inputs + 1, outputs, 2) > here);
                assert!(estimate_fee(inputs, outputs + 1, 2) > here);
            }
        }
    }
}
