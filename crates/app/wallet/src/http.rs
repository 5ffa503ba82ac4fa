//! JSON-RPC over HTTP wallet provider.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::WalletError;
use crate::provider::WalletProvider;

/// Talks to a wallet that exposes EIP-1193 methods over JSON-RPC 2.0.
///
/// Requests are not retried and have no client-side timeout: a pending
/// wallet prompt is awaited until the wallet answers.
#[derive(Debug)]
pub struct HttpWalletProvider {
    client: reqwest::Client,
    url: String,
    next_id: AtomicU64,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

impl HttpWalletProvider {
    pub fn new(url: impl Into<String>) -> Result<Self, WalletError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| WalletError::Transport(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            url: url.into(),
            next_id: AtomicU64::new(1),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl WalletProvider for HttpWalletProvider {
    async fn request(&self, method: &str, params: Value) -> Result<Value, WalletError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let payload = json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": id,
        });

        tracing::debug!(method, id, url = %self.url, "wallet request");
        let response = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| WalletError::Transport(format!("{method} request failed: {e}")))?;

        let status = response.status();
        let value: Value = response
            .json()
            .await
            .map_err(|e| WalletError::InvalidResponse(format!("{method} invalid JSON: {e}")))?;

        parse_rpc_response(method, status.is_success(), status.as_u16(), value)
    }
}

/// Split a JSON-RPC response body into its result or error object.
fn parse_rpc_response(
    method: &str,
    http_ok: bool,
    http_status: u16,
    value: Value,
) -> Result<Value, WalletError> {
    if let Some(err) = value.get("error") {
        return match serde_json::from_value::<RpcErrorObject>(err.clone()) {
            Ok(obj) => Err(WalletError::rpc(obj.code, obj.message)),
            Err(_) => Err(WalletError::InvalidResponse(format!("{method} error: {err}"))),
        };
    }
    if !http_ok {
        return Err(WalletError::Transport(format!(
            "{method} HTTP {http_status}: {value}"
        )));
    }
    value
        .get("result")
        .cloned()
        .ok_or_else(|| WalletError::InvalidResponse(format!("{method} missing result field")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::codes;

    #[test]
    fn test_result_is_extracted() {
        let body = json!({"jsonrpc": "2.0", "id": 1, "result": ["0xabc"]});
        let result = parse_rpc_response("eth_requestAccounts", true, 200, body).unwrap();
        assert_eq!(result, json!(["0xabc"]));
    }

    #[test]
    fn test_error_object_maps_to_rpc_error() {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": {"code": 4001, "message": "User rejected the request."}
        });
        let err = parse_rpc_response("personal_sign", true, 200, body).unwrap_err();
        assert_eq!(
            err,
            WalletError::rpc(codes::USER_REJECTED, "User rejected the request.")
        );
        assert_eq!(err.to_string(), "User rejected the request.");
    }

    #[test]
    fn test_error_object_wins_over_http_status() {
        let body = json!({"error": {"code": -32601, "message": "method not found"}});
        let err = parse_rpc_response("personal_sign", false, 404, body).unwrap_err();
        assert!(matches!(err, WalletError::Rpc { code: -32601, .. }));
    }

    #[test]
    fn test_http_failure_without_error_object() {
        let body = json!({"oops": true});
        let err = parse_rpc_response("personal_sign", false, 502, body).unwrap_err();
        assert!(matches!(err, WalletError::Transport(msg) if msg.contains("HTTP 502")));
    }

    #[test]
    fn test_missing_result_field() {
        let body = json!({"jsonrpc": "2.0", "id": 1});
        let err = parse_rpc_response("eth_requestAccounts", true, 200, body).unwrap_err();
        assert!(matches!(err, WalletError::InvalidResponse(_)));
    }

    #[test]
    fn test_malformed_error_object() {
        let body = json!({"error": "nope"});
        let err = parse_rpc_response("personal_sign", true, 200, body).unwrap_err();
        assert!(matches!(err, WalletError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        let provider = HttpWalletProvider::new("http://127.0.0.1:9").unwrap();
        let err = provider.request_accounts().await.unwrap_err();
        assert!(matches!(err, WalletError::Transport(_)));
    }
}
