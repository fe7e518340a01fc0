//! EOSIO transaction client library.
//!
//! Builds, signs, and submits transactions to an EOSIO-family chain
//! through its HTTP JSON RPC.
//!
//! # Architecture Overview
//!
//! ```text
//!   caller (account, action, data, authorization)
//!        │
//!        ▼
//!   ┌──────────┐   get_info / get_abi    ┌───────────────┐
//!   │  client  │────────────────────────▶│ rpc transport │──▶ /v1/chain/*
//!   │          │                         └───────────────┘
//!   │          │   ┌────────────────┐
//!   │          │──▶│ abi serializer │  ABI-driven packing of the
//!   │          │   └────────────────┘  transaction wire format
//!   │          │   ┌────────────────┐
//!   │          │──▶│     signer     │  canonical secp256k1 signature,
//!   │          │   └────────────────┘  SIG_K1_ text form
//!   │          │
//!   │          │   push_transaction envelope
//!   └──────────┘────────────────────────────▶ /v1/chain/push_transaction
//!
//!   keychain: authorization → private key (WIF import), the only
//!   state that outlives a call
//! ```
//!
//! # Security Constraints
//! - Private keys enter only through WIF import and never leave the keychain
//! - Key material is never logged or serialized
//! - Every RPC round-trip has a configurable timeout

// Core subsystems
pub mod abi;
pub mod client;
pub mod keychain;
pub mod signer;

// Cross-cutting concerns
pub mod config;
pub mod crypto;
pub mod error;
pub mod rpc;

pub use client::EosClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use keychain::Keychain;
