//! SHA-256 digests rendered as lowercase hex
//!
//! Record digests use a length-prefixed encoding so that no two distinct
//! `(payload, nonce, previous_hash)` triples share an input byte sequence:
//!
//! ```text
//! "hashchain/record/v1" || u64be(len(payload)) || payload
//!                       || i64be(nonce)
//!                       || u64be(len(previous_hash)) || previous_hash
//! ```

use sha2::{Digest, Sha256};

/// Length of a hex-encoded SHA-256 digest
pub const DIGEST_HEX_LEN: usize = 64;

/// Domain separation tag prepended to every record digest input
pub const RECORD_DOMAIN_TAG: &[u8] = b"hashchain/record/v1";

/// Hash arbitrary bytes and return lowercase hex
pub fn digest(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Hash a UTF-8 string and return lowercase hex
pub fn digest_str(input: &str) -> String {
    digest(input.as_bytes())
}

/// Compute the digest binding a record's payload, nonce and link
pub fn digest_record(payload: &str, nonce: i64, previous_hash: &str) -> String {
    let mut hasher = Sha256::new();

    hasher.update(RECORD_DOMAIN_TAG);
    update_prefixed(&mut hasher, payload.as_bytes());
    hasher.update(nonce.to_be_bytes());
    update_prefixed(&mut hasher, previous_hash.as_bytes());

    hex::encode(hasher.finalize())
}

fn update_prefixed(hasher: &mut Sha256, field: &[u8]) {
    hasher.update((field.len() as u64).to_be_bytes());
    hasher.update(field);
}

/// Check that a string looks like a hex-encoded SHA-256 digest
pub fn is_valid_hex_digest(value: &str) -> bool {
    value.len() == DIGEST_HEX_LEN
        && value
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}
