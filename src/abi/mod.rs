//! ABI-driven wire serialization.
//!
//! # Data Flow
//! ```text
//! caller value (serde_json) + ABI type string
//!     → typeexpr.rs (type grammar → tagged dispatch)
//!     → serializer.rs (recursive packing, ABI lookup via AbiProvider)
//!     → packed bytes
//! ```
//!
//! The serializer never performs network IO itself: resolving a contract
//! account to its ABI goes through the [`AbiProvider`] capability, which
//! the RPC client implements.

use serde::{Deserialize, Serialize};

use crate::error::ClientResult;

pub mod name;
pub mod serializer;
pub mod time;
pub mod typeexpr;
pub mod unserializer;
pub mod varint;

pub use serializer::Serializer;
pub use typeexpr::TypeExpr;

/// Contract ABI as returned by `/v1/chain/get_abi`.
///
/// Only the struct list is consumed; every other ABI section is ignored
/// on deserialization.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Abi {
    #[serde(default)]
    pub structs: Vec<AbiStruct>,
}

impl Abi {
    /// Struct with the given name, if the contract declares one.
    pub fn find_struct(&self, name: &str) -> Option<&AbiStruct> {
        self.structs.iter().find(|s| s.name == name)
    }

    /// Names of every declared struct, for diagnostics.
    pub fn struct_names(&self) -> Vec<String> {
        self.structs.iter().map(|s| s.name.clone()).collect()
    }
}

/// One struct schema: a name plus ordered fields.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AbiStruct {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<AbiField>,
}

/// One field of a struct schema.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AbiField {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

/// Capability for resolving a contract account to its ABI.
pub trait AbiProvider {
    fn get_abi(&self, account: &str) -> ClientResult<Abi>;
}
