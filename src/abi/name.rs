//! EOSIO name codec.
//!
//! A name is a 64-bit identifier holding up to 13 characters from the
//! 5-bits-per-char alphabet `.12345abcdefghijklmnopqrstuvwxyz`, packed
//! MSB-first. Characters 1–12 take 5 bits each; a 13th character only
//! has the low 4 bits left, which is why it is restricted to `[.1-5a-j]`.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{ClientError, ClientResult};

const ALPHABET: &[u8; 32] = b".12345abcdefghijklmnopqrstuvwxyz";

fn name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[.1-5a-z]{0,12}[.1-5a-j]?$").expect("static regex"))
}

fn symbol(c: u8) -> u64 {
    match c {
        b'.' => 0,
        b'1'..=b'5' => (c - b'0') as u64,
        _ => (c - b'a' + 6) as u64,
    }
}

/// Encode a name to its 64-bit value.
pub fn encode(text: &str) -> ClientResult<u64> {
    if !name_re().is_match(text) {
        return Err(ClientError::TypeMismatch {
            expected: "EOSIO name ([.1-5a-z], max 13 chars, 13th in [.1-5a-j])",
            found: format!("{:?}", text),
        });
    }

    let mut value = 0u64;
    for (i, c) in text.bytes().enumerate() {
        if i < 12 {
            value |= (symbol(c) & 0x1f) << (64 - 5 * (i + 1));
        } else {
            value |= symbol(c) & 0x0f;
        }
    }
    Ok(value)
}

/// Encode a name to its little-endian wire bytes.
pub fn encode_bytes(text: &str) -> ClientResult<[u8; 8]> {
    Ok(encode(text)?.to_le_bytes())
}

/// Decode little-endian wire bytes back to the textual name, trimming
/// the trailing `.` padding.
pub fn decode(bytes: [u8; 8]) -> String {
    let value = u64::from_le_bytes(bytes);
    let mut text = String::with_capacity(13);
    for i in 0..13 {
        let sym = if i < 12 {
            (value >> (64 - 5 * (i + 1))) & 0x1f
        } else {
            value & 0x0f
        };
        text.push(ALPHABET[sym as usize] as char);
    }
    text.trim_end_matches('.').to_string()
}
