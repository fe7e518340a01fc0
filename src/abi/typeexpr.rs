//! The ABI type grammar.
//!
//! Type strings are a tiny DSL mirroring on-chain ABI descriptions: a
//! `[]` suffix denotes an array of the prefix type, everything else is a
//! fixed set of leaf types. Parsing once into [`TypeExpr`] lets the
//! serializer dispatch with a match instead of re-interpreting strings
//! at every level of the recursion.

use crate::abi::AbiStruct;
use crate::error::{ClientError, ClientResult};

/// Parsed ABI type, the serializer's dispatch key.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeExpr {
    Uint8,
    Uint16,
    Uint32,
    VarUint32,
    TimePointSec,
    Bytes,
    Name,
    /// `T[]`: varuint32 count followed by packed elements.
    Array(Box<TypeExpr>),
    /// varuint32 count (0 or 2) followed by both elements.
    Pair(Box<TypeExpr>, Box<TypeExpr>),
    /// Ordered field concatenation under a resolved schema.
    Struct(AbiStruct),
    /// Action with its payload schema looked up from the contract ABI.
    Action,
    /// Six-field header followed by the transaction body.
    Transaction,
}

/// Parse an ABI type string.
pub fn parse(type_name: &str) -> ClientResult<TypeExpr> {
    if let Some(elem) = type_name.strip_suffix("[]") {
        return Ok(TypeExpr::Array(Box::new(parse(elem)?)));
    }
    Ok(match type_name {
        "uint8" => TypeExpr::Uint8,
        "uint16" => TypeExpr::Uint16,
        "uint32" => TypeExpr::Uint32,
        "varuint32" => TypeExpr::VarUint32,
        "time_point_sec" => TypeExpr::TimePointSec,
        "bytes" => TypeExpr::Bytes,
        "name" => TypeExpr::Name,
        "action" => TypeExpr::Action,
        "transaction" => TypeExpr::Transaction,
        other => return Err(ClientError::UnsupportedType(other.to_string())),
    })
}
