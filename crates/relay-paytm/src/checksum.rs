//! # Checksum Service
//!
//! Signature generation and verification per the gateway's fixed scheme:
//! HMAC-SHA256 over the exact bytes transmitted, hex-encoded.
//!
//! Signing is deterministic over byte-identical input only; two semantically
//! equal but differently serialized payloads produce different signatures.
//! Callers serialize once and sign the string they will send. Callback
//! payloads are first reduced to a canonical form (`canonical_params`) so
//! verification covers every field the gateway sent.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::collections::HashMap;

type HmacSha256 = Hmac<Sha256>;

/// Name of the signature field attached to callback payloads
pub const CHECKSUM_FIELD: &str = "CHECKSUMHASH";

/// Sign a serialized payload with the merchant key
pub fn sign(message: &str, key: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(key.as_bytes()).expect("HMAC can take key of any size");
    mac.update(message.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Verify a received signature against a serialized payload and key
pub fn verify(message: &str, key: &str, signature: &str) -> bool {
    constant_time_compare(&sign(message, key), signature)
}

/// Canonical form of a callback field set: `key=value` pairs sorted by key,
/// joined with `|`. Every field participates, so any single-byte mutation
/// changes the canonical string.
pub fn canonical_params(params: &HashMap<String, String>) -> String {
    let mut entries: Vec<(&str, &str)> = params
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    entries.sort();
    entries
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("|")
}

fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.bytes()
        .zip(b.bytes())
        .fold(0, |acc, (x, y)| acc | (x ^ y))
        == 0
}
