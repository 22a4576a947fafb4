//! Account address codec.
//!
//! Address format: `nano_` (or the legacy `xrb_`) + 52 base32 characters of
//! public key + 8 base32 characters of checksum. The checksum is the
//! byte-reversed Blake2b-40 digest of the public key.
//!
//! A 256-bit key does not fall on a 5-bit boundary, so the key is padded on
//! the left with 24 zero bits before encoding and the first four characters
//! (all `1`, the alphabet's zero digit) are dropped; decoding prepends them
//! again and verifies the recovered padding bytes really are zero.

use crate::error::AddressError;
use crate::hash::blake2b_40;
use lattice_types::PublicKey;

/// Base32 alphabet (32 chars, avoids visually ambiguous 0/O, 2/Z, l/I, v).
const ALPHABET: &[u8; 32] = b"13456789abcdefghijkmnopqrstuwxyz";

/// Reverse lookup table: ASCII byte → 5-bit value (0xFF = invalid).
const DECODE_TABLE: [u8; 128] = {
    let mut table = [0xFFu8; 128];
    let mut i = 0;
    while i < 32 {
        table[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
};

/// Preferred prefix for encoded accounts.
const PREFIX: &str = "nano_";
/// Legacy prefix, still accepted on decode.
const LEGACY_PREFIX: &str = "xrb_";
/// Encoded length after the prefix: 52 key chars + 8 checksum chars.
const ENCODED_LEN: usize = 60;
/// Base32 characters carrying the public key (260 bits: 4 pad + 256 key).
const KEY_CHARS: usize = 52;

/// Encode a byte slice as base32.
fn encode_base32(bytes: &[u8]) -> String {
    let total_bits = bytes.len() * 8;
    let mut result = String::with_capacity(total_bits.div_ceil(5));

    let mut buffer: u64 = 0;
    let mut bits_in_buffer = 0;

    for &byte in bytes {
        buffer = (buffer << 8) | byte as u64;
        bits_in_buffer += 8;
        while bits_in_buffer >= 5 {
            bits_in_buffer -= 5;
            let idx = ((buffer >> bits_in_buffer) & 0x1F) as usize;
            result.push(ALPHABET[idx] as char);
        }
    }
    if bits_in_buffer > 0 {
        let idx = ((buffer << (5 - bits_in_buffer)) & 0x1F) as usize;
        result.push(ALPHABET[idx] as char);
    }

    result
}

/// Decode a base32 string into a fixed-size byte array. Returns `None` on
/// invalid characters or wrong length.
fn decode_base32_fixed<const N: usize>(s: &str) -> Option<[u8; N]> {
    if s.len() * 5 / 8 != N {
        return None;
    }

    let mut buffer: u64 = 0;
    let mut bits_in_buffer = 0;
    let mut result = [0u8; N];
    let mut pos = 0;

    for c in s.bytes() {
        if c >= 128 {
            return None;
        }
        let val = DECODE_TABLE[c as usize];
        if val == 0xFF {
            return None;
        }
        buffer = (buffer << 5) | val as u64;
        bits_in_buffer += 5;
        if bits_in_buffer >= 8 {
            bits_in_buffer -= 8;
            if pos < N {
                result[pos] = (buffer >> bits_in_buffer) as u8;
                pos += 1;
            }
        }
    }

    if pos < N {
        return None;
    }
    Some(result)
}

/// Encode a public key as a `nano_`-prefixed account address.
pub fn encode_account(public_key: &PublicKey) -> String {
    let mut padded = [0u8; 35];
    padded[3..].copy_from_slice(public_key.as_bytes());
    let key_encoded = encode_base32(&padded);

    let mut checksum = blake2b_40(public_key.as_bytes());
    checksum.reverse();
    let checksum_encoded = encode_base32(&checksum);

    format!("{}{}{}", PREFIX, &key_encoded[4..], checksum_encoded)
}

/// Extract the public key from an account address.
///
/// Accepts both the `nano_` and the legacy `xrb_` prefix.
pub fn decode_account(address: &str) -> Result<PublicKey, AddressError> {
    let encoded = address
        .strip_prefix(PREFIX)
        .or_else(|| address.strip_prefix(LEGACY_PREFIX))
        .ok_or(AddressError::InvalidFormat)?;
    if encoded.len() != ENCODED_LEN {
        return Err(AddressError::InvalidFormat);
    }

    let (key_part, checksum_part) = encoded.split_at(KEY_CHARS);

    // Restore the 20 padding bits the encoder dropped with its first four
    // characters, giving 280 bits = 35 bytes.
    let padded = format!("1111{}", key_part);
    let decoded: [u8; 35] =
        decode_base32_fixed(&padded).ok_or(AddressError::InvalidFormat)?;
    if decoded[..3] != [0, 0, 0] {
        return Err(AddressError::InvalidFormat);
    }
    let mut key = [0u8; 32];
    key.copy_from_slice(&decoded[3..]);

    let checksum: [u8; 5] =
        decode_base32_fixed(checksum_part).ok_or(AddressError::InvalidFormat)?;
    let mut expected = blake2b_40(&key);
    expected.reverse();
    if checksum != expected {
        return Err(AddressError::InvalidChecksum);
    }

    Ok(PublicKey(key))
}

/// Whether an address string is well-formed with a matching checksum.
pub fn validate_account(address: &str) -> bool {
    decode_account(address).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sign::{generate_keypair, keypair_from_seed};

    const VALID_ADDRESSES: &[&str] = &[
        "xrb_38nm8t5rimw6h6j7wyokbs8jiygzs7baoha4pqzhfw1k79npyr1km8w6y7r8",
        "xrb_1awsn43we17c1oshdru4azeqjz9wii41dy8npubm4rg11so7dx3jtqgoeahy",
        "xrb_3arg3asgtigae3xckabaaewkx3bzsh7nwz7jkmjos79ihyaxwphhm6qgjps4",
        "xrb_3pczxuorp48td8645bs3m6c3xotxd3idskrenmi65rbrga5zmkemzhwkaznh",
        "xrb_3hd4ezdgsp15iemx7h81in7xz5tpxi43b6b41zn3qmwiuypankocw3awes5k",
        "xrb_1anrzcuwe64rwxzcco8dkhpyxpi8kd7zsjc1oeimpc3ppca4mrjtwnqposrs",
    ];

    const INVALID_ADDRESSES: &[&str] = &[
        // Corrupt checksum.
        "xrb_38nm8t5rimw6h6j7wyokbs8jiygzs7baoha4pqzhfw1k79npyr1km8w6y7r7",
        // Unknown prefix.
        "xrc_38nm8t5rimw6h6j7wyokbs8jiygzs7baoha4pqzhfw1k79npyr1km8w6y7r8",
        // Missing separator.
        "xrb38nm8t5rimw6h6j7wyokbs8jiygzs7baoha4pqzhfw1k79npyr1km8w6y7r8",
        "xrb8nm8t5rimw6h6j7wyokbs8jiygzs7baoha4pqzhfw1k79npyr1km8w6y7r8",
        // Truncated payload.
        "xrb_8nm8t5rimw6h6j7wyokbs8jiygzs7baoha4pqzhfw1k79npyr1km8w6y7r8",
    ];

    #[test]
    fn decode_known_account() {
        let key = decode_account("nano_3t6k35gi95xu6tergt6p69ck76ogmitsa8mnijtpxm9fkcm736xtoncuohr3")
            .unwrap();
        assert_eq!(
            key.to_string(),
            "e89208dd038fbb269987689621d52292ae9c35941a7484756ecced92a65093ba"
        );
    }

    #[test]
    fn legacy_prefix_accepted() {
        let via_nano =
            decode_account("nano_3t6k35gi95xu6tergt6p69ck76ogmitsa8mnijtpxm9fkcm736xtoncuohr3")
                .unwrap();
        let via_xrb =
            decode_account("xrb_3t6k35gi95xu6tergt6p69ck76ogmitsa8mnijtpxm9fkcm736xtoncuohr3")
                .unwrap();
        assert_eq!(via_nano, via_xrb);
    }

    #[test]
    fn known_valid_addresses_decode() {
        for address in VALID_ADDRESSES {
            assert!(validate_account(address), "expected {address} to be valid");
        }
    }

    #[test]
    fn known_invalid_addresses_rejected() {
        for address in INVALID_ADDRESSES {
            assert!(
                !validate_account(address),
                "expected {address} to be invalid"
            );
        }
    }

    #[test]
    fn encode_decode_round_trip() {
        let kp = generate_keypair();
        let address = encode_account(&kp.public);
        assert!(address.starts_with("nano_"));
        assert_eq!(address.len(), 65);
        assert_eq!(decode_account(&address).unwrap(), kp.public);
    }

    #[test]
    fn seed_reference_vectors() {
        let mut seed = [0u8; 32];
        hex::decode_to_slice(
            "1234567890123456789012345678901234567890123456789012345678901234",
            &mut seed,
        )
        .unwrap();

        // Generated from the reference wallet using the seed above.
        let expected = [
            "nano_3iwi45me3cgo9aza9wx5f7rder37hw11xtc1ek8psqxw5oxb8cujjad6qp9y",
            "nano_3a9d1h6wt3zp8cqd6dhhgoyizmk1ciemqkrw97ysrphn7anm6xko1wxakaa1",
            "nano_1dz36wby1azyjgh7t9nopjm3k5rduhmntercoz545my9s8nm7gcuthuq9fmq",
            "nano_1fb7kaqaue49kf9w4mb9w3scuxipbdm3ez6ibnri4w8qexzg5f4r7on1dmxb",
            "nano_3h9a64yqueuij1j9odt119r3ymm8n83wyyz7o9u7ram1tgfhsh1zqwjtzid9",
        ];

        for (index, expected_address) in expected.iter().enumerate() {
            let kp = keypair_from_seed(&seed, index as u32);
            assert_eq!(
                encode_account(&kp.public),
                *expected_address,
                "wrong address at seed index {index}"
            );
        }
    }

    #[test]
    fn any_single_character_flip_is_detected() {
        let kp = generate_keypair();
        let address = encode_account(&kp.public);

        for i in 0..address.len() {
            let mut corrupted: Vec<char> = address.chars().collect();
            corrupted[i] = if corrupted[i] == '1' { '3' } else { '1' };
            let corrupted: String = corrupted.into_iter().collect();
            if corrupted == address {
                continue;
            }
            assert!(
                decode_account(&corrupted).is_err(),
                "flip at position {i} went undetected"
            );
        }
    }
}
