use proptest::prelude::*;

use txforge_transaction::builder::TxBuilder;
use txforge_transaction::fee::estimate_fee;
use txforge_transaction::selection::select_utxos;
use txforge_transaction::sighash::SIGHASH_ALL;
use txforge_transaction::{Script, TransactionError, Utxo};

/// Strategy for a random UTXO with a bounded value.
fn arb_utxo() -> impl Strategy<Value = Utxo> {
    (
        "[0-9a-f]{8,64}",                          // txid text
        any::<u32>(),                              // vout
        1u64..=10_000_000,                         // satoshis
        prop::collection::vec(any::<u8>(), 0..40), // locking script bytes
    )
        .prop_map(|(txid, vout, satoshis, script)| {
            Utxo::new(txid, vout, satoshis, Script::from_bytes(&script))
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Selection either covers the target with a greedy-minimal prefix
    /// or fails with the full available total.
    #[test]
    fn selection_sufficiency(utxos in prop::collection::vec(arb_utxo(), 0..12), target in 0u64..30_000_000) {
        let available: u64 = utxos.iter().map(|u| u.satoshis).sum();

        match select_utxos(&utxos, target) {
            Ok(selected) => {
                let total: u64 = selected.iter().map(|u| u.satoshis).sum();
                prop_assert!(total >= target);
                if let Some((_, rest)) = selected.split_last() {
                    let without_last: u64 = rest.iter().map(|u| u.satoshis).sum();
                    prop_assert!(without_last < target);
                }
            }
            Err(TransactionError::InsufficientFunds { have, need }) => {
                prop_assert!(available < target);
                prop_assert_eq!(have, available);
                prop_assert_eq!(need, target);
            }
            Err(other) => prop_assert!(false, "unexpected error: {:?}", other),
        }
    }

    /// The fee estimate is strictly increasing in both counts for any
    /// positive rate.
    #[test]
    fn fee_monotonicity(inputs in 0usize..64, outputs in 0usize..64, rate in 1u64..1_000) {
        let here = estimate_fee(inputs, outputs, rate);
        prop_assert!(estimate_fee(inputs + 1, outputs, rate) > here);
        prop_assert!(estimate_fee(inputs, outputs + 1, rate) > here);
    }

    /// The digest is a pure function of builder state, and assembly is
    /// idempotent.
    #[test]
    fn digest_and_assembly_are_deterministic(utxos in prop::collection::vec(arb_utxo(), 1..6), payment in 1u64..100_000) {
        let mut builder = TxBuilder::new();
        for utxo in &utxos {
            builder.add_input(utxo);
        }
        builder.add_output(payment, Script::from_bytes(&[0x51]));

        for index in 0..builder.input_count() {
            let d1 = builder.signature_digest(index, SIGHASH_ALL).unwrap();
            let d2 = builder.signature_digest(index, SIGHASH_ALL).unwrap();
            prop_assert_eq!(d1, d2);
        }

        prop_assert_eq!(builder.build(), builder.build());
    }
}
