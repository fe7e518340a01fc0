//! Deterministic secp256k1 signing with canonical-form retries.
//!
//! EOSIO consensus rejects signatures whose fixed-width `r`/`s` encodings
//! have a high bit set on the leading byte (or are zero-padded in a way
//! that looks negative). Deterministic ECDSA always produces the same
//! nonce for a given digest, so the loop feeds an attempt counter into
//! the nonce derivation until the result satisfies the predicate. In
//! practice one or two attempts suffice; the cap exists so a logic error
//! can never spin forever.

use secp256k1::{Message, SecretKey};

use crate::crypto::{self, base58};
use crate::error::{ClientError, ClientResult};

/// Retry cap for the canonical-form loop.
const MAX_ATTEMPTS: u32 = 64;

/// A canonical compact signature.
#[derive(Debug, Clone)]
pub struct Signature {
    recovery_id: u8,
    rs: [u8; 64],
    attempts: u32,
}

impl Signature {
    pub fn recovery_id(&self) -> u8 {
        self.recovery_id
    }

    /// `r || s`, each 32 bytes big-endian.
    pub fn rs(&self) -> &[u8; 64] {
        &self.rs
    }

    /// How many nonce attempts the canonical loop needed.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// 65-byte raw form: `header || r || s` with
    /// `header = recovery_id + 27 + 4` marking a compressed key.
    pub fn to_raw(&self) -> [u8; 65] {
        let mut raw = [0u8; 65];
        raw[0] = self.recovery_id + 31;
        raw[1..].copy_from_slice(&self.rs);
        raw
    }
}

impl std::fmt::Display for Signature {
    /// `SIG_K1_` text form: Base58 over the raw bytes plus the first
    /// four bytes of `RIPEMD160(raw || "K1")`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SIG_K1_{}", base58::encode_ripemd_check(&self.to_raw(), b"K1"))
    }
}

/// Sign a 32-byte digest, retrying with fresh nonce data until the
/// signature is canonical.
pub fn sign_canonical(digest: &[u8; 32], secret: &SecretKey) -> ClientResult<Signature> {
    let message = Message::from_digest(*digest);

    for attempt in 1..=MAX_ATTEMPTS {
        let mut noncedata = [0u8; 32];
        noncedata[..4].copy_from_slice(&attempt.to_le_bytes());

        let sig = crypto::secp().sign_ecdsa_recoverable_with_noncedata(
            &message,
            secret,
            &noncedata,
        );
        // serialize_compact yields low-s form; only r can still offend
        let (recovery_id, rs) = sig.serialize_compact();

        if is_canonical(&rs) {
            if attempt > 1 {
                tracing::debug!(attempt, "canonical signature found after retries");
            }
            return Ok(Signature {
                recovery_id: recovery_id.to_i32() as u8,
                rs,
                attempts: attempt,
            });
        }
    }

    Err(ClientError::SigningFailed {
        attempts: MAX_ATTEMPTS,
    })
}

/// EOSIO's low-byte canonicalness predicate over `r || s`.
fn is_canonical(rs: &[u8; 64]) -> bool {
    rs[0] & 0x80 == 0
        && !(rs[0] == 0 && rs[1] & 0x80 == 0)
        && rs[32] & 0x80 == 0
        && !(rs[32] == 0 && rs[33] & 0x80 == 0)
}

#[cfg(test)]
mod tests {
    use secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
    use secp256k1::PublicKey;

    use super::*;
    use crate::crypto::sha256;

    fn test_secret() -> SecretKey {
        SecretKey::from_slice(
            &hex::decode("0c28fca386c7a227600b2fe50b7cae11ec86d3bf1fbe471be89827e19d72aa1d")
                .unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_is_canonical_predicate() {
        let mut rs = [0x01u8; 64];
        assert!(is_canonical(&rs));

        rs[0] = 0x80; // r negative
        assert!(!is_canonical(&rs));

        rs[0] = 0x00;
        rs[1] = 0x01; // r zero-padded without need
        assert!(!is_canonical(&rs));

        rs[1] = 0x80; // necessary padding is fine
        assert!(is_canonical(&rs));

        rs[0] = 0x01;
        rs[1] = 0x01;
        rs[32] = 0x80; // s negative
        assert!(!is_canonical(&rs));
    }

    #[test]
    fn test_signing_is_deterministic() {
        let secret = test_secret();
        let digest = sha256(b"determinism");
        let a = sign_canonical(&digest, &secret).unwrap();
        let b = sign_canonical(&digest, &secret).unwrap();
        assert_eq!(a.rs(), b.rs());
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn test_every_emitted_signature_is_canonical_and_some_retry() {
        let secret = test_secret();
        let mut retried = false;
        for i in 0u32..64 {
            let digest = sha256(&i.to_le_bytes());
            let sig = sign_canonical(&digest, &secret).unwrap();
            assert!(is_canonical(sig.rs()));
            if sig.attempts() > 1 {
                retried = true;
            }
        }
        // roughly half of all nonces yield a non-canonical r, so a sweep
        // of 64 digests without a single retry is statistically impossible
        assert!(retried);
    }

    #[test]
    fn test_signature_recovers_public_key() {
        let secret = test_secret();
        let digest = sha256(b"recover me");
        let sig = sign_canonical(&digest, &secret).unwrap();

        let compact = RecoverableSignature::from_compact(
            sig.rs(),
            RecoveryId::from_i32(sig.recovery_id() as i32).unwrap(),
        )
        .unwrap();
        let message = Message::from_digest(digest);
        let recovered = crypto::secp().recover_ecdsa(&message, &compact).unwrap();
        assert_eq!(recovered, PublicKey::from_secret_key(crypto::secp(), &secret));
    }

    #[test]
    fn test_text_form() {
        let secret = test_secret();
        let digest = sha256(b"text form");
        let sig = sign_canonical(&digest, &secret).unwrap();
        let text = sig.to_string();

        assert!(text.starts_with("SIG_K1_"));
        let raw = base58::decode(&text["SIG_K1_".len()..]).unwrap();
        assert_eq!(raw.len(), 69);
        assert!(raw[0] == 31 || raw[0] == 32);
        assert_eq!(
            raw[65..],
            base58::ripemd_checksum(&raw[..65], b"K1")
        );
    }
}
