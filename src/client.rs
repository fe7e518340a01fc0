//! Client orchestrator.
//!
//! # Data Flow
//! ```text
//! push_transaction(account, action, data, authorization)
//!     → keychain lookup (fail fast, no network on a bad authorization)
//!     → get_info (chain snapshot: id, last irreversible block)
//!     → serializer (ABI fetched per action through AbiProvider)
//!     → digest = SHA256(chain_id || packed || 32 zero bytes)
//!     → signer (canonical loop, SIG_K1 text)
//!     → POST /v1/chain/push_transaction
//! ```
//!
//! Every call assembles its own chain snapshot; the keychain is the only
//! state shared between calls.

use std::time::Duration;

use serde_json::{json, Map, Value};

use crate::abi::{time, unserializer, Abi, AbiProvider, Serializer};
use crate::config::ClientConfig;
use crate::crypto::sha256;
use crate::error::{ClientError, ClientResult};
use crate::keychain::{self, Keychain};
use crate::rpc::types::{GetAbiResponse, GetTableRowsResponse};
use crate::rpc::{ChainInfo, PushTransactionEnvelope, Transport};
use crate::signer;

/// Client for one EOSIO chain endpoint.
pub struct EosClient {
    config: ClientConfig,
    transport: Transport,
    keychain: Keychain,
}

impl EosClient {
    /// Connect to an RPC endpoint with default configuration.
    pub fn new(endpoint: &str) -> ClientResult<Self> {
        Self::with_config(ClientConfig {
            endpoint: endpoint.to_string(),
            ..ClientConfig::default()
        })
    }

    pub fn with_config(config: ClientConfig) -> ClientResult<Self> {
        let transport = Transport::new(
            &config.endpoint,
            Duration::from_secs(config.rpc_timeout_secs),
        )?;
        tracing::info!(endpoint = %transport.base_url(), "client initialized");
        Ok(Self {
            config,
            transport,
            keychain: Keychain::new(),
        })
    }

    /// Import a WIF private key for an `actor@permission` authorization.
    pub fn add_key(&mut self, authorization: &str, wif: &str) -> ClientResult<()> {
        self.keychain.add_key(authorization, wif)
    }

    /// Textual EOS public key for a registered authorization.
    pub fn public_key(&self, authorization: &str) -> ClientResult<String> {
        self.keychain.public_key(authorization)
    }

    /// Fetch the chain snapshot from `/v1/chain/get_info`.
    pub fn get_info(&self) -> ClientResult<ChainInfo> {
        let body = self.transport.post_empty("/v1/chain/get_info")?;
        serde_json::from_value(body)
            .map_err(|e| ClientError::MalformedResponse(format!("get_info: {}", e)))
    }

    /// Fetch a contract's ABI from `/v1/chain/get_abi`.
    pub fn get_abi(&self, account: &str) -> ClientResult<Abi> {
        let body = self
            .transport
            .post("/v1/chain/get_abi", &json!({ "account_name": account }))?;
        let parsed: GetAbiResponse = serde_json::from_value(body)
            .map_err(|e| ClientError::MalformedResponse(format!("get_abi: {}", e)))?;
        Ok(parsed.abi)
    }

    /// Read a contract table and decode each packed row against the ABI
    /// struct named like the table.
    ///
    /// `extra` is merged into the request parameters (e.g. bounds or a
    /// row limit). Returns an empty list when the contract declares no
    /// struct for the table or the table has no rows.
    pub fn get_table_rows(
        &self,
        account: &str,
        table: &str,
        scope: &str,
        extra: Option<&Value>,
    ) -> ClientResult<Vec<Map<String, Value>>> {
        let abi = self.get_abi(account)?;
        let schema = match abi.find_struct(table) {
            Some(schema) => schema.clone(),
            None => return Ok(Vec::new()),
        };

        let mut params = Map::new();
        params.insert("code".to_string(), json!(account));
        params.insert("table".to_string(), json!(table));
        params.insert("scope".to_string(), json!(scope));
        params.insert("json".to_string(), json!(false));
        if let Some(Value::Object(extra)) = extra {
            for (key, value) in extra {
                params.insert(key.clone(), value.clone());
            }
        }

        let body = self
            .transport
            .post("/v1/chain/get_table_rows", &Value::Object(params))?;
        let parsed: GetTableRowsResponse = serde_json::from_value(body)
            .map_err(|e| ClientError::MalformedResponse(format!("get_table_rows: {}", e)))?;

        parsed
            .rows
            .iter()
            .map(|row| {
                let bytes = hex::decode(row).map_err(|e| {
                    ClientError::MalformedResponse(format!("row is not hex: {}", e))
                })?;
                unserializer::unserialize_row(&bytes, &schema)
            })
            .collect()
    }

    /// Build, sign, and submit a single-action transaction.
    ///
    /// # Arguments
    /// * `account` - Contract account the action belongs to
    /// * `action` - Action name; its payload schema comes from the ABI
    /// * `data` - Action payload matching that schema
    /// * `authorization` - `actor@permission` with a registered key
    ///
    /// The transaction expires `tx_expiration_secs` past the chain's
    /// last irreversible block time.
    pub fn push_transaction(
        &self,
        account: &str,
        action: &str,
        data: Value,
        authorization: &str,
    ) -> ClientResult<Value> {
        if !self.keychain.contains(authorization) {
            return Err(ClientError::UnknownAuthorization(authorization.to_string()));
        }
        let (actor, permission) = keychain::split_authorization(authorization)?;

        let info = self.get_info()?;
        let tx = self.build_transaction(&info, account, action, data, actor, permission)?;
        let packed = Serializer::new(self).serialize(&tx, "transaction")?;

        let chain_id = hex::decode(&info.chain_id)
            .map_err(|e| ClientError::MalformedResponse(format!("chain_id is not hex: {}", e)))?;
        // trailing zero block stands in for the empty context-free data
        let mut preimage = Vec::with_capacity(chain_id.len() + packed.len() + 32);
        preimage.extend_from_slice(&chain_id);
        preimage.extend_from_slice(&packed);
        preimage.extend_from_slice(&[0u8; 32]);
        let digest = sha256(&preimage);

        let secret = self.keychain.secret(authorization)?;
        let signature = signer::sign_canonical(&digest, secret)?;

        let envelope = PushTransactionEnvelope {
            signatures: vec![signature.to_string()],
            compression: "none".to_string(),
            packed_trx: hex::encode(&packed),
            packed_context_free_data: String::new(),
        };
        tracing::debug!(account, action, "pushing transaction");
        self.transport.post("/v1/chain/push_transaction", &envelope)
    }

    /// Assemble the logical transaction around one action.
    fn build_transaction(
        &self,
        info: &ChainInfo,
        account: &str,
        action: &str,
        data: Value,
        actor: &str,
        permission: &str,
    ) -> ClientResult<Value> {
        let lib_time = time::parse_timestamp(&info.last_irreversible_block_time)?;
        let expiration =
            time::format_timestamp(lib_time + i64::from(self.config.tx_expiration_secs))?;

        let block_id = hex::decode(&info.last_irreversible_block_id).map_err(|e| {
            ClientError::MalformedResponse(format!("block id is not hex: {}", e))
        })?;
        if block_id.len() != 32 {
            return Err(ClientError::MalformedResponse(format!(
                "block id is {} bytes, expected 32",
                block_id.len()
            )));
        }
        // the u32 at byte offset 8 of the block id, read little-endian
        let ref_block_prefix =
            u32::from_le_bytes([block_id[8], block_id[9], block_id[10], block_id[11]]);

        Ok(json!({
            "expiration": expiration,
            "ref_block_num": info.last_irreversible_block_num & 0xffff,
            "ref_block_prefix": ref_block_prefix,
            "max_net_usage_words": 0,
            "max_cpu_usage_ms": 0,
            "delay_sec": 0,
            "context_free_actions": [],
            "actions": [{
                "account": account,
                "name": action,
                "authorization": [{ "actor": actor, "permission": permission }],
                "data": data,
            }],
            "transaction_extensions": [],
        }))
    }
}

impl AbiProvider for EosClient {
    /// Refetched on every call; ABI resolution is intentionally uncached.
    fn get_abi(&self, account: &str) -> ClientResult<Abi> {
        EosClient::get_abi(self, account)
    }
}

impl std::fmt::Debug for EosClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EosClient")
            .field("endpoint", &self.transport.base_url())
            .field("keychain", &self.keychain)
            .finish()
    }
}
