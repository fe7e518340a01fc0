//! Blocking HTTP transport.
//!
//! # Responsibilities
//! - Validate the endpoint URL once, at construction
//! - POST JSON with a per-client timeout
//! - Surface `error` bodies and non-2xx statuses as [`ClientError::RpcError`]
//!
//! Calls block the current thread; there is no connection multiplexing
//! and no retry. Dropping the client cancels nothing in flight.

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use crate::error::{ClientError, ClientResult};

/// POST-JSON transport bound to one RPC endpoint.
pub struct Transport {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl Transport {
    /// Build a transport for `endpoint`, stripping any trailing slash.
    pub fn new(endpoint: &str, timeout: Duration) -> ClientResult<Self> {
        let trimmed = endpoint.trim_end_matches('/');
        let parsed: url::Url = trimmed.parse().map_err(|e: url::ParseError| {
            ClientError::InvalidEndpoint {
                endpoint: endpoint.to_string(),
                reason: e.to_string(),
            }
        })?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ClientError::InvalidEndpoint {
                endpoint: endpoint.to_string(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: trimmed.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST `params` as the JSON body of a chain endpoint.
    pub fn post<P: Serialize>(&self, path: &str, params: &P) -> ClientResult<Value> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "rpc call");
        let response = self.http.post(&url).json(params).send()?;
        Self::parse(response)
    }

    /// POST with an empty body (endpoints that take no parameters).
    pub fn post_empty(&self, path: &str) -> ClientResult<Value> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "rpc call");
        let response = self
            .http
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body("")
            .send()?;
        Self::parse(response)
    }

    fn parse(response: reqwest::blocking::Response) -> ClientResult<Value> {
        let status = response.status();
        let text = response.text()?;
        // a non-JSON body still travels inside the error, verbatim
        let body: Value = serde_json::from_str(&text).unwrap_or(Value::String(text));

        if !status.is_success() || body.get("error").is_some() {
            return Err(ClientError::RpcError { body });
        }
        Ok(body)
    }
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport")
            .field("base_url", &self.base_url)
            .finish()
    }
}
