//! Error definitions shared by every subsystem.
//!
//! No error is retried or swallowed locally; each terminates the call
//! that produced it and carries enough context to diagnose it.

use thiserror::Error;

/// Errors surfaced by the client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// WIF string did not decode to the expected 37-byte layout, or the
    /// secret is not a valid curve scalar.
    #[error("invalid private key: {0}")]
    InvalidKey(String),

    /// WIF version byte was not 0x80.
    #[error("invalid key version byte: expected 0x80, got {found:#04x}")]
    InvalidKeyVersion { found: u8 },

    /// WIF double-SHA-256 checksum mismatch.
    #[error("private key checksum mismatch")]
    InvalidChecksum,

    /// Authorization string is not `actor@permission`.
    #[error("malformed authorization '{0}', expected actor@permission")]
    MalformedAuthorization(String),

    /// No key registered for the given authorization.
    #[error("no key in keychain for authorization '{0}'")]
    UnknownAuthorization(String),

    /// Action has no struct in the contract's ABI.
    #[error("action '{action}' not found in ABI of '{account}', known structs: {known:?}")]
    UnknownAction {
        account: String,
        action: String,
        known: Vec<String>,
    },

    /// Struct field absent from the value being serialized.
    #[error("missing field '{field}' while serializing struct '{strct}'")]
    MissingField { strct: String, field: String },

    /// Integer does not fit the declared wire type.
    #[error("value {value} out of range for {ty}")]
    OutOfRange { ty: &'static str, value: u64 },

    /// Type name not part of the supported ABI grammar.
    #[error("unsupported ABI type '{0}'")]
    UnsupportedType(String),

    /// Value has the wrong JSON shape for the declared wire type.
    #[error("type mismatch: expected {expected}, got {found}")]
    TypeMismatch {
        expected: &'static str,
        found: String,
    },

    /// Table row ended before the field currently being decoded.
    #[error("truncated row: field '{field}' needs {needed} bytes, {remaining} left")]
    TruncatedRow {
        field: String,
        needed: usize,
        remaining: usize,
    },

    /// Canonical-form retry loop exhausted.
    #[error("signing failed: no canonical signature after {attempts} attempts")]
    SigningFailed { attempts: u32 },

    /// RPC returned an `error` object or a non-2xx status; carries the
    /// full response body.
    #[error("rpc error: {body}")]
    RpcError { body: serde_json::Value },

    /// Underlying HTTP failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// 2xx response that does not parse into the expected shape.
    #[error("malformed rpc response: {0}")]
    MalformedResponse(String),

    /// RPC endpoint is not a valid URL.
    #[error("invalid endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
