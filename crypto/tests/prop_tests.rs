//! Property tests for the account address codec.

use lattice_crypto::{decode_account, encode_account};
use lattice_types::PublicKey;
use proptest::prelude::*;

const ALPHABET: &[u8; 32] = b"13456789abcdefghijkmnopqrstuwxyz";

proptest! {
    #[test]
    fn account_encoding_round_trips(key in any::<[u8; 32]>()) {
        let key = PublicKey(key);
        let address = encode_account(&key);
        prop_assert_eq!(address.len(), 65);
        prop_assert!(address.starts_with("nano_"));
        prop_assert_eq!(decode_account(&address).unwrap(), key);
    }

    #[test]
    fn single_character_corruption_is_detected(
        key in any::<[u8; 32]>(),
        pos in 0usize..60,
        replacement in 0usize..32,
    ) {
        let address = encode_account(&PublicKey(key));
        let mut bytes = address.into_bytes();
        let target = 5 + pos; // skip the prefix
        prop_assume!(bytes[target] != ALPHABET[replacement]);
        bytes[target] = ALPHABET[replacement];
        let corrupted = String::from_utf8(bytes).unwrap();
        prop_assert!(decode_account(&corrupted).is_err());
    }
}
