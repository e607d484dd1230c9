use async_trait::async_trait;
use sd_chain_client::{ETH_ACCOUNTS, ETH_REQUEST_ACCOUNTS, Eip1193Provider, ProviderError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

pub const DEFAULT_RPC_URL: &str = "http://localhost:8545";

/// JSON-RPC over HTTP against a node that holds unlocked accounts
/// (anvil, hardhat, geth `--dev`).
///
/// Reads `SD_RPC_URL` from environment at construction time
/// (default: `http://localhost:8545`).
pub struct HttpRpcProvider {
    endpoint: String,
    http: reqwest::Client,
    next_id: AtomicU64,
}

impl Default for HttpRpcProvider {
    fn default() -> Self {
        Self::new(None)
    }
}

impl HttpRpcProvider {
    pub fn new(endpoint: Option<String>) -> Self {
        let endpoint = endpoint
            .or_else(|| std::env::var("SD_RPC_URL").ok())
            .unwrap_or_else(|| DEFAULT_RPC_URL.to_string());
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

// ── JSON-RPC 2.0 envelopes ───────────────────────────────────────────

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

#[async_trait(?Send)]
impl Eip1193Provider for HttpRpcProvider {
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError> {
        // A node has no permission prompt; its unlocked accounts are the authorized ones.
        let method = if method == ETH_REQUEST_ACCOUNTS { ETH_ACCOUNTS } else { method };
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        debug!(id, method, endpoint = %self.endpoint, "json-rpc request");

        let body = RpcRequest {
            jsonrpc: "2.0",
            id,
            method,
            params,
        };

        let response = self
            .http
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|err| ProviderError::Transport(format!("{method}: {err}")))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| ProviderError::Transport(format!("{method}: {err}")))?;

        // Nodes report RPC errors with either 200 or 4xx/5xx; try the envelope first.
        let envelope: RpcResponse = match serde_json::from_str(&text) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => {
                return Err(ProviderError::Transport(format!("{method}: HTTP {status}: {text}")));
            }
            Err(err) => return Err(ProviderError::Malformed(format!("{method}: {err}"))),
        };

        if let Some(err) = envelope.error {
            warn!(method, code = err.code, message = %err.message, "json-rpc error");
            return Err(ProviderError::from_rpc(err.code, err.message));
        }

        Ok(envelope.result.unwrap_or(Value::Null))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{U256, hex};
    use alloy_sol_types::SolCall;
    use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
    use sd_api_types::{DeploymentConfig, Notification, NotificationKind};
    use sd_chain_client::{ETH_CALL, request_accounts};
    use sd_contract::setCall;
    use sd_wallet_core::{Dapp, DappError, View};
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::{Arc, Mutex};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    const ALICE: &str = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266";
    const CONTRACT: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";

    #[derive(Default)]
    struct MockNode {
        stored: Mutex<U256>,
        methods: Mutex<Vec<String>>,
    }

    async fn rpc(State(node): State<Arc<MockNode>>, Json(req): Json<Value>) -> Json<Value> {
        let id = req["id"].clone();
        let method = req["method"].as_str().unwrap_or_default().to_owned();
        node.methods.lock().unwrap().push(method.clone());

        let outcome: Result<Value, (i64, &str)> = match method.as_str() {
            "eth_accounts" => Ok(json!([ALICE])),
            "eth_chainId" => Ok(json!("0x7a69")),
            "eth_call" => {
                let stored = *node.stored.lock().unwrap();
                Ok(json!(hex::encode_prefixed(stored.to_be_bytes::<32>())))
            }
            "eth_sendTransaction" => {
                let tx = &req["params"][0];
                if tx["from"].as_str().map(str::to_lowercase).as_deref() != Some(ALICE) {
                    Err((-32000, "unknown account"))
                } else {
                    let data = hex::decode(tx["data"].as_str().unwrap_or_default()).unwrap_or_default();
                    match setCall::abi_decode(&data) {
                        Ok(call) => {
                            *node.stored.lock().unwrap() = call.x;
                            Ok(json!(format!("0x{}", "11".repeat(32))))
                        }
                        Err(_) => Err((-32000, "execution reverted")),
                    }
                }
            }
            _ => Err((-32601, "method not found")),
        };

        Json(match outcome {
            Ok(result) => json!({ "jsonrpc": "2.0", "id": id, "result": result }),
            Err((code, message)) => {
                json!({ "jsonrpc": "2.0", "id": id, "error": { "code": code, "message": message } })
            }
        })
    }

    async fn broken() -> (StatusCode, &'static str) {
        (StatusCode::BAD_GATEWAY, "upstream unavailable")
    }

    async fn spawn_node() -> anyhow::Result<(String, Arc<MockNode>)> {
        let node = Arc::new(MockNode::default());
        let app = Router::new()
            .route("/", post(rpc))
            .route("/broken", post(broken))
            .with_state(node.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        Ok((format!("http://{addr}/"), node))
    }

    #[tokio::test]
    async fn request_accounts_is_served_by_eth_accounts() -> anyhow::Result<()> {
        let (url, node) = spawn_node().await?;
        let provider = HttpRpcProvider::new(Some(url));

        let accounts = request_accounts(&provider).await?;
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].0, ALICE);
        assert_eq!(*node.methods.lock().unwrap(), vec!["eth_accounts".to_owned()]);
        Ok(())
    }

    #[tokio::test]
    async fn rpc_error_object_maps_to_provider_error() -> anyhow::Result<()> {
        let (url, _) = spawn_node().await?;
        let provider = HttpRpcProvider::new(Some(url));

        let err = provider
            .request("eth_getBalance", json!([ALICE, "latest"]))
            .await
            .expect_err("mock node does not serve balances");
        assert_eq!(
            err,
            ProviderError::Rpc {
                code: -32601,
                message: "method not found".to_owned()
            }
        );
        Ok(())
    }

    #[tokio::test]
    async fn non_json_http_failure_is_transport_error() -> anyhow::Result<()> {
        let (url, _) = spawn_node().await?;
        let provider = HttpRpcProvider::new(Some(format!("{url}broken")));

        let err = provider.request(ETH_CALL, json!([])).await.expect_err("502");
        assert!(matches!(err, ProviderError::Transport(msg) if msg.contains("502")));
        Ok(())
    }

    #[tokio::test]
    async fn truncated_body_is_transport_error() -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            if let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;
                let _ = socket
                    .write_all(b"HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 64\r\n\r\n{\"jsonrpc\"")
                    .await;
                let _ = socket.shutdown().await;
            }
        });
        let provider = HttpRpcProvider::new(Some(format!("http://{addr}")));

        let err = provider.request(ETH_CALL, json!([])).await.expect_err("body cut short");
        assert!(matches!(err, ProviderError::Transport(msg) if msg.starts_with("eth_call: ")));
        Ok(())
    }

    #[test]
    fn endpoint_trailing_slash_is_trimmed() {
        let provider = HttpRpcProvider::new(Some("http://node.local:8545/".to_owned()));
        assert_eq!(provider.endpoint(), "http://node.local:8545");
    }

    #[tokio::test]
    async fn controller_round_trip_against_node() -> anyhow::Result<()> {
        let (url, node) = spawn_node().await?;
        let log: Rc<RefCell<Vec<Notification>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        let config = DeploymentConfig {
            contract_address: CONTRACT.to_owned(),
            chain_id: Some("31337".to_owned()),
            rpc_url: None,
        };
        let dapp = Dapp::new(
            HttpRpcProvider::new(Some(url)),
            move |n: Notification| sink.borrow_mut().push(n),
            &config,
        )?;

        dapp.connect().await?;
        assert_eq!(dapp.state().scalar().map(|s| s.0.as_str()), Some("0"));

        dapp.set_pending_input("42");
        dapp.submit().await?;
        let View::Connected { scalar, input, .. } = dapp.view() else {
            panic!("expected connected view");
        };
        assert_eq!(scalar, "42");
        assert!(input.is_empty());
        assert_eq!(*node.stored.lock().unwrap(), U256::from(42u64));
        assert!(log.borrow().iter().all(|n| n.kind == NotificationKind::Success));

        dapp.disconnect();
        assert_eq!(dapp.refresh().await, Err(DappError::NotConnected));
        Ok(())
    }
}
