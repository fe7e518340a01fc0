//! HTTP JSON RPC plumbing for the `/v1/chain/*` endpoints.
//!
//! The transport's whole contract is: POST JSON, return parsed JSON,
//! fail on an `error` field or a non-2xx status. Everything smarter
//! (transaction assembly, signing, ABI resolution) lives in
//! [`crate::client`].

pub mod transport;
pub mod types;

pub use transport::Transport;
pub use types::{ChainInfo, GetAbiResponse, GetTableRowsResponse, PushTransactionEnvelope};
