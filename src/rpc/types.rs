//! Wire types for the chain endpoints this client touches.

use serde::{Deserialize, Serialize};

use crate::abi::Abi;

/// Snapshot of `/v1/chain/get_info`, fetched fresh for every
/// transaction. Unknown response fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ChainInfo {
    /// 32-byte network identifier, hex.
    pub chain_id: String,
    pub last_irreversible_block_num: u32,
    /// 32-byte block id, hex.
    pub last_irreversible_block_id: String,
    /// ISO-8601 seconds, UTC.
    pub last_irreversible_block_time: String,
}

/// Response of `/v1/chain/get_abi`.
#[derive(Debug, Clone, Deserialize)]
pub struct GetAbiResponse {
    pub account_name: String,
    /// Absent for accounts with no contract.
    #[serde(default)]
    pub abi: Abi,
}

/// Response of `/v1/chain/get_table_rows` with `json: false`: rows are
/// hex-packed.
#[derive(Debug, Clone, Deserialize)]
pub struct GetTableRowsResponse {
    #[serde(default)]
    pub rows: Vec<String>,
    #[serde(default)]
    pub more: bool,
}

/// Envelope POSTed to `/v1/chain/push_transaction`.
#[derive(Debug, Clone, Serialize)]
pub struct PushTransactionEnvelope {
    pub signatures: Vec<String>,
    pub compression: String,
    pub packed_trx: String,
    pub packed_context_free_data: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_info_ignores_extra_fields() {
        let info: ChainInfo = serde_json::from_str(
            r#"{
                "server_version": "deadbeef",
                "chain_id": "cf057bbfb72640471fd910bcb67639c22df9f92470936cddc1ade0e2f2e7dc4f",
                "head_block_num": 1000,
                "last_irreversible_block_num": 900,
                "last_irreversible_block_id": "0000038465bb4bcba64297bbsomething",
                "last_irreversible_block_time": "2018-06-01T12:00:00"
            }"#,
        )
        .unwrap();
        assert_eq!(info.last_irreversible_block_num, 900);
    }

    #[test]
    fn test_chain_info_missing_field_fails() {
        let result: Result<ChainInfo, _> = serde_json::from_str(r#"{"chain_id": "ab"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_envelope_shape() {
        let envelope = PushTransactionEnvelope {
            signatures: vec!["SIG_K1_xyz".to_string()],
            compression: "none".to_string(),
            packed_trx: "00".to_string(),
            packed_context_free_data: String::new(),
        };
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["compression"], "none");
        assert_eq!(json["packed_context_free_data"], "");
        assert_eq!(json["signatures"][0], "SIG_K1_xyz");
    }
}
