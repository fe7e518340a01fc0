//! Partial inverse of the serializer, for reading table rows.
//!
//! Only the field types that appear in key-value table schemas are
//! supported: `name`, `uint64`, and `int64`, each occupying exactly
//! 8 bytes. Anything else is rejected rather than guessed at.

use serde_json::{Map, Value};

use crate::abi::{name, AbiField, AbiStruct};
use crate::error::{ClientError, ClientResult};

/// Decode one packed row against a struct schema.
///
/// Fields are consumed in declaration order; trailing bytes beyond the
/// schema are ignored.
pub fn unserialize_row(bytes: &[u8], schema: &AbiStruct) -> ClientResult<Map<String, Value>> {
    let mut row = Map::new();
    let mut cursor = bytes;
    for field in &schema.fields {
        let value = match field.type_name.as_str() {
            "name" => Value::String(name::decode(take8(&mut cursor, field)?)),
            "uint64" => Value::Number(u64::from_le_bytes(take8(&mut cursor, field)?).into()),
            "int64" => Value::Number(i64::from_le_bytes(take8(&mut cursor, field)?).into()),
            other => return Err(ClientError::UnsupportedType(other.to_string())),
        };
        row.insert(field.name.clone(), value);
    }
    Ok(row)
}

fn take8<'a>(cursor: &mut &'a [u8], field: &AbiField) -> ClientResult<[u8; 8]> {
    if cursor.len() < 8 {
        return Err(ClientError::TruncatedRow {
            field: field.name.clone(),
            needed: 8,
            remaining: cursor.len(),
        });
    }
    let (head, rest) = cursor.split_at(8);
    *cursor = rest;
    let mut out = [0u8; 8];
    out.copy_from_slice(head);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn schema(fields: &[(&str, &str)]) -> AbiStruct {
        AbiStruct {
            name: "row".to_string(),
            fields: fields
                .iter()
                .map(|(name, ty)| AbiField {
                    name: name.to_string(),
                    type_name: ty.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_decode_name_u64_i64_row() {
        let schema = schema(&[("owner", "name"), ("balance", "uint64"), ("delta", "int64")]);
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&[0x00, 0x00, 0x00, 0x00, 0x00, 0x85, 0x1c, 0x34]); // "alice"
        bytes.extend_from_slice(&1000u64.to_le_bytes());
        bytes.extend_from_slice(&(-5i64).to_le_bytes());

        let row = unserialize_row(&bytes, &schema).unwrap();
        assert_eq!(row["owner"], json!("alice"));
        assert_eq!(row["balance"], json!(1000u64));
        assert_eq!(row["delta"], json!(-5i64));
    }

    #[test]
    fn test_u64_is_lossless() {
        let schema = schema(&[("big", "uint64")]);
        let row = unserialize_row(&u64::MAX.to_le_bytes(), &schema).unwrap();
        assert_eq!(row["big"], json!(u64::MAX));
    }

    #[test]
    fn test_round_trip_with_name_encoder() {
        let schema = schema(&[("account", "name")]);
        for text in ["eosio", "eosio.token", "zzzzzzzzzzzz"] {
            let row = unserialize_row(&name::encode_bytes(text).unwrap(), &schema).unwrap();
            assert_eq!(row["account"], json!(text));
        }
    }

    #[test]
    fn test_truncated_row() {
        let schema = schema(&[("owner", "name"), ("balance", "uint64")]);
        let err = unserialize_row(&[0u8; 12], &schema).unwrap_err();
        assert!(matches!(
            err,
            ClientError::TruncatedRow { ref field, needed: 8, remaining: 4 } if field == "balance"
        ));
    }

    #[test]
    fn test_unsupported_field_type() {
        let schema = schema(&[("price", "asset")]);
        assert!(matches!(
            unserialize_row(&[0u8; 16], &schema),
            Err(ClientError::UnsupportedType(t)) if t == "asset"
        ));
    }

    #[test]
    fn test_trailing_bytes_ignored() {
        let schema = schema(&[("owner", "name")]);
        let mut bytes = name::encode_bytes("bob").unwrap().to_vec();
        bytes.extend_from_slice(&[0xff; 4]);
        assert!(unserialize_row(&bytes, &schema).is_ok());
    }
}
