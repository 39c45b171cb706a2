//! Webhook signature verification.
//!
//! SendCloud signs each callback with HMAC-SHA256 over the byte
//! concatenation `timestamp || token` (no separator) under the shared
//! key, and sends the digest hex-encoded in the `signature` field.
//!
//! Verification compares digests in constant time. An early-exit
//! comparison would leak, through response timing, how many leading
//! bytes of a candidate signature match, allowing a forgery to be
//! built byte by byte.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Verifies a webhook signature.
///
/// Returns `false` if the hex decoding fails, the decoded length does
/// not match the digest length, or the digests differ. The byte
/// comparison is constant-time.
pub fn verify(timestamp: &str, token: &str, signature_hex: &str, key: &[u8]) -> bool {
    let expected = compute_digest(timestamp, token, key);

    let Ok(supplied) = hex::decode(signature_hex) else {
        return false;
    };
    if supplied.len() != expected.len() {
        return false;
    }
    constant_time_eq(&supplied, &expected)
}

/// Computes the hex signature for a timestamp/token pair.
///
/// This is what the remote service sends; exposed for tests and for
/// simulating callbacks.
pub fn sign(timestamp: &str, token: &str, key: &[u8]) -> String {
    hex::encode(compute_digest(timestamp, token, key))
}

fn compute_digest(timestamp: &str, token: &str, key: &[u8]) -> Vec<u8> {
    let mut mac =
        HmacSha256::new_from_slice(key).expect("HMAC accepts keys of any length");
    mac.update(timestamp.as_bytes());
    mac.update(token.as_bytes());
    mac.finalize().into_bytes().to_vec()
}

/// Constant-time byte comparison.
///
/// Both inputs must already have equal length; the loop inspects every
/// byte regardless of where the first mismatch occurs.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    debug_assert_eq!(a.len(), b.len());

    let mut result = 0u8;
    for (a_byte, b_byte) in a.iter().zip(b.iter()) {
        result |= a_byte ^ b_byte;
    }
    result == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    // hmac_sha256(key="secret", message="1000tok")
    const KNOWN_DIGEST: &str = "0e7ed04a9061124155949776378f2269175b7d386e29fa4b361053e84663ab86";

    #[test]
    fn sign_matches_known_vector() {
        assert_eq!(sign("1000", "tok", b"secret"), KNOWN_DIGEST);
    }

    #[test]
    fn verify_accepts_exact_digest() {
        assert!(verify("1000", "tok", KNOWN_DIGEST, b"secret"));
    }

    #[test]
    fn verify_rejects_every_bit_flip() {
        let digest = hex::decode(KNOWN_DIGEST).unwrap();
        for byte_index in 0..digest.len() {
            for bit in 0..8 {
                let mut flipped = digest.clone();
                flipped[byte_index] ^= 1 << bit;
                assert!(
                    !verify("1000", "tok", &hex::encode(flipped), b"secret"),
                    "flipped bit {bit} of byte {byte_index} should be rejected"
                );
            }
        }
    }

    #[test]
    fn verify_rejects_wrong_length() {
        assert!(!verify("1000", "tok", &KNOWN_DIGEST[..62], b"secret"));
        let long = format!("{KNOWN_DIGEST}00");
        assert!(!verify("1000", "tok", &long, b"secret"));
    }

    #[test]
    fn verify_rejects_non_hex() {
        assert!(!verify("1000", "tok", "not-hex-at-all", b"secret"));
        assert!(!verify("1000", "tok", "", b"secret"));
    }

    #[test]
    fn verify_rejects_wrong_key() {
        assert!(!verify("1000", "tok", KNOWN_DIGEST, b"other-key"));
    }

    #[test]
    fn timestamp_and_token_are_concatenated_without_separator() {
        // "10" + "00tok" concatenates to the same message as "1000" + "tok"
        assert!(verify("10", "00tok", KNOWN_DIGEST, b"secret"));
    }
}
