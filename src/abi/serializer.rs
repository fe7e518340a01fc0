//! Recursive, ABI-driven packing of the EOSIO wire format.
//!
//! # Design Decisions
//! - Values arrive as `serde_json::Value`; the tagged dispatch happens on
//!   [`TypeExpr`], never on strings inside the recursion
//! - Array and bytes lengths are emitted as varuint32, matching the
//!   chain's wire format (bounded by u32, not by a single length byte)
//! - ABI lookups go through [`AbiProvider`], keeping this module free of
//!   network IO
//!
//! All multi-byte integers are little-endian.

use serde_json::Value;

use crate::abi::{name, time, typeexpr, varint, AbiField, AbiProvider, AbiStruct, TypeExpr};
use crate::error::{ClientError, ClientResult};

/// Packs values under ABI types.
pub struct Serializer<'a> {
    abis: &'a dyn AbiProvider,
}

impl<'a> Serializer<'a> {
    pub fn new(abis: &'a dyn AbiProvider) -> Self {
        Self { abis }
    }

    /// Pack `value` under the named ABI type.
    pub fn serialize(&self, value: &Value, type_name: &str) -> ClientResult<Vec<u8>> {
        let ty = typeexpr::parse(type_name)?;
        let mut out = Vec::new();
        self.write_value(value, &ty, &mut out)?;
        Ok(out)
    }

    fn write_value(&self, value: &Value, ty: &TypeExpr, out: &mut Vec<u8>) -> ClientResult<()> {
        match ty {
            TypeExpr::Uint8 => out.push(uint(value, "uint8", u8::MAX as u64)? as u8),
            TypeExpr::Uint16 => {
                let n = uint(value, "uint16", u16::MAX as u64)? as u16;
                out.extend_from_slice(&n.to_le_bytes());
            }
            TypeExpr::Uint32 => {
                let n = uint(value, "uint32", u32::MAX as u64)? as u32;
                out.extend_from_slice(&n.to_le_bytes());
            }
            TypeExpr::VarUint32 => {
                varint::encode(uint(value, "varuint32", u32::MAX as u64)? as u32, out)
            }
            TypeExpr::TimePointSec => {
                let text = str_value(value, "ISO-8601 timestamp")?;
                // The wire field is 32 bits; values past 2106 truncate.
                let secs = time::parse_timestamp(text)? as u32;
                out.extend_from_slice(&secs.to_le_bytes());
            }
            TypeExpr::Bytes => {
                let text = str_value(value, "hex string")?;
                let raw = hex::decode(text).map_err(|e| ClientError::TypeMismatch {
                    expected: "hex string",
                    found: format!("{:?} ({})", text, e),
                })?;
                write_length(raw.len(), "bytes", out)?;
                out.extend_from_slice(&raw);
            }
            TypeExpr::Name => {
                let text = str_value(value, "EOSIO name")?;
                out.extend_from_slice(&name::encode_bytes(text)?);
            }
            TypeExpr::Array(elem) => {
                let items = value
                    .as_array()
                    .ok_or_else(|| type_mismatch("array", value))?;
                write_length(items.len(), "array", out)?;
                for item in items {
                    self.write_value(item, elem, out)?;
                }
            }
            TypeExpr::Pair(first, second) => {
                let items = value
                    .as_array()
                    .ok_or_else(|| type_mismatch("pair (array of 0 or 2)", value))?;
                match items.as_slice() {
                    [] => varint::encode(0, out),
                    [a, b] => {
                        varint::encode(2, out);
                        self.write_value(a, first, out)?;
                        self.write_value(b, second, out)?;
                    }
                    _ => {
                        return Err(ClientError::TypeMismatch {
                            expected: "pair (array of 0 or 2)",
                            found: format!("array of {}", items.len()),
                        })
                    }
                }
            }
            TypeExpr::Struct(schema) => self.write_struct(value, schema, false, out)?,
            TypeExpr::Action => self.write_action(value, out)?,
            TypeExpr::Transaction => self.write_transaction(value, out)?,
        }
        Ok(())
    }

    /// Concatenate fields in declaration order. With `wrap`, the packed
    /// struct is emitted as a length-prefixed blob (action payloads).
    fn write_struct(
        &self,
        value: &Value,
        schema: &AbiStruct,
        wrap: bool,
        out: &mut Vec<u8>,
    ) -> ClientResult<()> {
        let map = value
            .as_object()
            .ok_or_else(|| type_mismatch("object", value))?;

        let mut buf = Vec::new();
        let target: &mut Vec<u8> = if wrap { &mut buf } else { &mut *out };
        for field in &schema.fields {
            let field_value = map.get(&field.name).ok_or_else(|| ClientError::MissingField {
                strct: schema.name.clone(),
                field: field.name.clone(),
            })?;
            let ty = typeexpr::parse(&field.type_name)?;
            self.write_value(field_value, &ty, target)?;
        }

        if wrap {
            write_length(buf.len(), "bytes", out)?;
            out.extend_from_slice(&buf);
        }
        Ok(())
    }

    /// `account:name || name:name || authorization[] || data as bytes`,
    /// with the data schema looked up from the contract's ABI.
    fn write_action(&self, value: &Value, out: &mut Vec<u8>) -> ClientResult<()> {
        let map = value
            .as_object()
            .ok_or_else(|| type_mismatch("action object", value))?;
        let account = required_str(map, "action", "account")?;
        let action = required_str(map, "action", "name")?;

        let abi = self.abis.get_abi(account)?;
        let schema = abi
            .find_struct(action)
            .ok_or_else(|| ClientError::UnknownAction {
                account: account.to_string(),
                action: action.to_string(),
                known: abi.struct_names(),
            })?;

        out.extend_from_slice(&name::encode_bytes(account)?);
        out.extend_from_slice(&name::encode_bytes(action)?);

        let authorization = required(map, "action", "authorization")?;
        let auth_ty = TypeExpr::Array(Box::new(TypeExpr::Struct(permission_level())));
        self.write_value(authorization, &auth_ty, out)?;

        let data = required(map, "action", "data")?;
        self.write_struct(data, schema, true, out)
    }

    /// Header fields in consensus order, then the body arrays.
    fn write_transaction(&self, value: &Value, out: &mut Vec<u8>) -> ClientResult<()> {
        let map = value
            .as_object()
            .ok_or_else(|| type_mismatch("transaction object", value))?;

        let header = [
            ("expiration", TypeExpr::TimePointSec),
            ("ref_block_num", TypeExpr::Uint16),
            ("ref_block_prefix", TypeExpr::Uint32),
            ("max_net_usage_words", TypeExpr::VarUint32),
            ("max_cpu_usage_ms", TypeExpr::Uint8),
            ("delay_sec", TypeExpr::VarUint32),
        ];
        for (field, ty) in &header {
            self.write_value(required(map, "transaction", field)?, ty, out)?;
        }

        let actions = TypeExpr::Array(Box::new(TypeExpr::Action));
        self.write_value(required(map, "transaction", "context_free_actions")?, &actions, out)?;
        self.write_value(required(map, "transaction", "actions")?, &actions, out)?;

        let extensions = TypeExpr::Pair(Box::new(TypeExpr::Uint16), Box::new(TypeExpr::Bytes));
        self.write_value(
            required(map, "transaction", "transaction_extensions")?,
            &extensions,
            out,
        )
    }
}

/// Schema of one authorization entry on an action.
fn permission_level() -> AbiStruct {
    AbiStruct {
        name: "permission_level".to_string(),
        fields: vec![
            AbiField {
                name: "actor".to_string(),
                type_name: "name".to_string(),
            },
            AbiField {
                name: "permission".to_string(),
                type_name: "name".to_string(),
            },
        ],
    }
}

fn uint(value: &Value, ty: &'static str, max: u64) -> ClientResult<u64> {
    let n = value
        .as_u64()
        .ok_or_else(|| type_mismatch("unsigned integer", value))?;
    if n > max {
        return Err(ClientError::OutOfRange { ty, value: n });
    }
    Ok(n)
}

fn str_value<'v>(value: &'v Value, expected: &'static str) -> ClientResult<&'v str> {
    value
        .as_str()
        .ok_or_else(|| type_mismatch(expected, value))
}

fn required<'v>(
    map: &'v serde_json::Map<String, Value>,
    strct: &str,
    field: &str,
) -> ClientResult<&'v Value> {
    map.get(field).ok_or_else(|| ClientError::MissingField {
        strct: strct.to_string(),
        field: field.to_string(),
    })
}

fn required_str<'v>(
    map: &'v serde_json::Map<String, Value>,
    strct: &str,
    field: &str,
) -> ClientResult<&'v str> {
    str_value(required(map, strct, field)?, "string")
}

fn write_length(len: usize, ty: &'static str, out: &mut Vec<u8>) -> ClientResult<()> {
    let len = u32::try_from(len).map_err(|_| ClientError::OutOfRange {
        ty,
        value: len as u64,
    })?;
    varint::encode(len, out);
    Ok(())
}

fn type_mismatch(expected: &'static str, found: &Value) -> ClientError {
    let found = match found {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {}", b),
        Value::Number(n) => format!("number {}", n),
        Value::String(s) => format!("string {:?}", s),
        Value::Array(_) => "array".to_string(),
        Value::Object(_) => "object".to_string(),
    };
    ClientError::TypeMismatch { expected, found }
}
