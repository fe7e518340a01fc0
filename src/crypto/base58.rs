//! Base58 encode/decode plus the 4-byte checksum helpers shared by the
//! keychain (WIF, public keys) and the signer (SIG_K1 text).

use crate::crypto::hash::ripemd160;

/// Base58-encode `data`.
pub fn encode(data: &[u8]) -> String {
    bs58::encode(data).into_string()
}

/// Base58-decode `text`. Returns `None` on any non-alphabet character.
pub fn decode(text: &str) -> Option<Vec<u8>> {
    bs58::decode(text).into_vec().ok()
}

/// First 4 bytes of RIPEMD-160 over `data || suffix`.
///
/// EOSIO key and signature text forms checksum the payload with an
/// optional type suffix ("K1" for signatures, empty for public keys).
pub fn ripemd_checksum(data: &[u8], suffix: &[u8]) -> [u8; 4] {
    let mut buf = Vec::with_capacity(data.len() + suffix.len());
    buf.extend_from_slice(data);
    buf.extend_from_slice(suffix);
    let digest = ripemd160(&buf);
    [digest[0], digest[1], digest[2], digest[3]]
}

/// Base58-encode `data` with a trailing RIPEMD-160 checksum over
/// `data || suffix`.
pub fn encode_ripemd_check(data: &[u8], suffix: &[u8]) -> String {
    let checksum = ripemd_checksum(data, suffix);
    let mut buf = Vec::with_capacity(data.len() + 4);
    buf.extend_from_slice(data);
    buf.extend_from_slice(&checksum);
    encode(&buf)
}
