//! Wallet Import Format decoding.
//!
//! A WIF string is Base58Check over `0x80 || secret(32)`: 37 bytes once
//! decoded, the last 4 being the double SHA-256 checksum of the first 33.

use crate::crypto::base58;
use crate::crypto::hash::sha256d;
use crate::error::{ClientError, ClientResult};

const WIF_VERSION: u8 = 0x80;
const WIF_DECODED_LEN: usize = 37;

/// Decode a WIF string into the raw 32-byte secret.
pub fn decode(wif: &str) -> ClientResult<[u8; 32]> {
    let raw = base58::decode(wif)
        .ok_or_else(|| ClientError::InvalidKey("not a Base58 string".to_string()))?;

    if raw.len() != WIF_DECODED_LEN {
        return Err(ClientError::InvalidKey(format!(
            "decoded to {} bytes, expected {}",
            raw.len(),
            WIF_DECODED_LEN
        )));
    }

    let (payload, checksum) = raw.split_at(33);
    if payload[0] != WIF_VERSION {
        return Err(ClientError::InvalidKeyVersion { found: payload[0] });
    }
    if sha256d(payload)[..4] != *checksum {
        return Err(ClientError::InvalidChecksum);
    }

    let mut secret = [0u8; 32];
    secret.copy_from_slice(&payload[1..33]);
    Ok(secret)
}
