//! Hashing and Base58 primitives.
//!
//! Everything above this module (WIF decoding, public key display,
//! signature text encoding, transaction digests) is built from these
//! four operations: SHA-256, double SHA-256, RIPEMD-160, and Base58.

use std::sync::OnceLock;

use secp256k1::{All, Secp256k1};

pub mod base58;
pub mod hash;

pub use base58::{decode as base58_decode, encode as base58_encode};
pub use hash::{ripemd160, sha256, sha256d};

/// Process-wide secp256k1 context, initialized on first use.
pub(crate) fn secp() -> &'static Secp256k1<All> {
    static SECP: OnceLock<Secp256k1<All>> = OnceLock::new();
    SECP.get_or_init(Secp256k1::new)
}
