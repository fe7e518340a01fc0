//! Client configuration.
//!
//! All types derive Serde traits so a host application can embed them in
//! its own configuration file; the library itself never touches disk.

use serde::{Deserialize, Serialize};

/// Configuration for [`crate::EosClient`].
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientConfig {
    /// HTTP JSON RPC endpoint URL (e.g. "http://127.0.0.1:8888").
    /// A trailing slash is stripped on client construction.
    pub endpoint: String,

    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// Transaction expiration, in seconds past the last irreversible
    /// block time of the chain snapshot used to build the transaction.
    pub tx_expiration_secs: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8888".to_string(),
            rpc_timeout_secs: 10,
            tx_expiration_secs: 30,
        }
    }
}
