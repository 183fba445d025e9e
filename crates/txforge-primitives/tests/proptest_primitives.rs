use proptest::prelude::*;

use txforge_primitives::ec::{PrivateKey, Signature};
use txforge_primitives::hash::{hash160, sha256, sha256d};

/// Strategy for key material that is a valid secp256k1 scalar.
///
/// Hashing the seed keeps the scalar uniformly spread and avoids the
/// (astronomically rare) zero/overflow rejects from raw bytes.
fn arb_private_key() -> impl Strategy<Value = PrivateKey> {
    prop::array::uniform32(any::<u8>())
        .prop_map(|seed| PrivateKey::from_bytes(&sha256(&seed)).expect("hashed seed is a valid scalar"))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn sign_verify_roundtrip(key in arb_private_key(), msg in prop::collection::vec(any::<u8>(), 0..128)) {
        let digest = sha256d(&msg);
        let sig = key.sign(&digest).unwrap();
        prop_assert!(key.pub_key().verify(&digest, &sig));
        prop_assert!(sig.is_low_s());
    }

    #[test]
    fn der_roundtrip(key in arb_private_key(), msg in prop::collection::vec(any::<u8>(), 0..128)) {
        let digest = sha256d(&msg);
        let sig = key.sign(&digest).unwrap();
        let der = sig.to_der();
        let parsed = Signature::from_der(&der).unwrap();
        prop_assert_eq!(&parsed, &sig);
        prop_assert_eq!(parsed.to_der(), der);
    }

    #[test]
    fn hash_lengths_and_determinism(data in prop::collection::vec(any::<u8>(), 0..256)) {
        prop_assert_eq!(sha256(&data), sha256(&data));
        prop_assert_eq!(sha256d(&data), sha256(&sha256(&data)));
        prop_assert_eq!(hash160(&data).len(), 20);
    }
}
