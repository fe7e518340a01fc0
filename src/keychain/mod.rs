//! In-memory key storage.
//!
//! Maps authorization strings (`actor@permission`) to secp256k1 secret
//! keys imported from WIF. The keychain is the only state that outlives
//! a single RPC call.
//!
//! # Security Constraints
//! - Secret keys never leave this module except to the signer
//! - Key material is never logged; only the authorization label is
//! - Mutation requires `&mut self`, so torn updates are unrepresentable;
//!   cross-thread sharing is the caller's lock to take

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;
use secp256k1::{PublicKey, SecretKey};

use crate::crypto::{self, base58};
use crate::error::{ClientError, ClientResult};

pub mod wif;

fn authorization_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\w+@\w+$").expect("static regex"))
}

/// Split a validated authorization into `(actor, permission)`.
pub(crate) fn split_authorization(authorization: &str) -> ClientResult<(&str, &str)> {
    if !authorization_re().is_match(authorization) {
        return Err(ClientError::MalformedAuthorization(
            authorization.to_string(),
        ));
    }
    // The regex guarantees exactly one '@' with non-empty sides.
    authorization
        .split_once('@')
        .ok_or_else(|| ClientError::MalformedAuthorization(authorization.to_string()))
}

/// Authorization → private key map.
#[derive(Default)]
pub struct Keychain {
    keys: HashMap<String, SecretKey>,
}

impl Keychain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Import a WIF private key under an authorization label.
    ///
    /// Validates the WIF layout (version byte, checksum) and the
    /// authorization format; re-registering an authorization overwrites
    /// the previous key.
    pub fn add_key(&mut self, authorization: &str, wif: &str) -> ClientResult<()> {
        let secret = wif::decode(wif)?;
        let secret = SecretKey::from_slice(&secret)
            .map_err(|e| ClientError::InvalidKey(e.to_string()))?;

        if !authorization_re().is_match(authorization) {
            return Err(ClientError::MalformedAuthorization(
                authorization.to_string(),
            ));
        }

        self.keys.insert(authorization.to_string(), secret);
        tracing::info!(authorization, "key registered");
        Ok(())
    }

    /// Whether a key is registered for the authorization.
    pub fn contains(&self, authorization: &str) -> bool {
        self.keys.contains_key(authorization)
    }

    /// Secret key for the authorization; exact-string lookup.
    pub(crate) fn secret(&self, authorization: &str) -> ClientResult<&SecretKey> {
        self.keys
            .get(authorization)
            .ok_or_else(|| ClientError::UnknownAuthorization(authorization.to_string()))
    }

    /// Textual EOS public key for the authorization, derived on demand:
    /// `"EOS" || Base58(point || RIPEMD160(point)[0..4])` over the
    /// 33-byte compressed point.
    pub fn public_key(&self, authorization: &str) -> ClientResult<String> {
        let secret = self.secret(authorization)?;
        let point = PublicKey::from_secret_key(crypto::secp(), secret).serialize();
        Ok(format!("EOS{}", base58::encode_ripemd_check(&point, b"")))
    }
}

impl std::fmt::Debug for Keychain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never expose key material; count only.
        f.debug_struct("Keychain")
            .field("keys", &self.keys.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_WIF: &str = "5HpHagT65TZzG1PH3CSu63k8DbpvD8s5ip4nEB3kEsreAbuatmU";
    const TEST_PUBLIC: &str = "EOS6MRyAjQq8ud7hVNYcfnVPJqcVpscN5So8BhtHuGYqET5GDW5CV";

    #[test]
    fn test_add_key_and_lookup() {
        let mut keychain = Keychain::new();
        keychain.add_key("alice@active", TEST_WIF).unwrap();
        assert!(keychain.contains("alice@active"));
        assert!(!keychain.contains("alice@owner"));
    }

    #[test]
    fn test_add_key_overwrites() {
        let mut keychain = Keychain::new();
        keychain.add_key("alice@active", TEST_WIF).unwrap();
        keychain.add_key("alice@active", TEST_WIF).unwrap();
        assert!(keychain.contains("alice@active"));
    }

    #[test]
    fn test_malformed_authorization() {
        let mut keychain = Keychain::new();
        for auth in ["alice", "alice@", "@active", "alice@active@owner", "a lice@active"] {
            assert!(
                matches!(
                    keychain.add_key(auth, TEST_WIF),
                    Err(ClientError::MalformedAuthorization(_))
                ),
                "accepted {:?}",
                auth
            );
        }
    }

    #[test]
    fn test_unknown_authorization() {
        let keychain = Keychain::new();
        assert!(matches!(
            keychain.secret("ghost@active"),
            Err(ClientError::UnknownAuthorization(_))
        ));
    }

    #[test]
    fn test_public_key_derivation() {
        let mut keychain = Keychain::new();
        keychain.add_key("alice@active", TEST_WIF).unwrap();
        assert_eq!(keychain.public_key("alice@active").unwrap(), TEST_PUBLIC);
    }

    #[test]
    fn test_split_authorization() {
        assert_eq!(
            split_authorization("alice@active").unwrap(),
            ("alice", "active")
        );
        assert!(split_authorization("alice.active").is_err());
    }

    #[test]
    fn test_debug_hides_key_material() {
        let mut keychain = Keychain::new();
        keychain.add_key("alice@active", TEST_WIF).unwrap();
        let dump = format!("{:?}", keychain);
        assert!(!dump.contains("5HpHagT6"));
    }
}
