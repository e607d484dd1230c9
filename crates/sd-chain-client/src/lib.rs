//! Provider seam shared by the browser and native front ends.
//!
//! Everything talks EIP-1193: one `request(method, params)` call returning JSON.
//! The injected `window.ethereum` object and the HTTP JSON-RPC client both sit
//! behind [`Eip1193Provider`].

use alloy_primitives::Bytes;
use async_trait::async_trait;
use sd_api_types::{Account, ChainId, TxAcknowledgement};
use serde::Serialize;
use serde_json::{Value, json};
use std::rc::Rc;
use thiserror::Error;
use tracing::debug;

pub const ETH_REQUEST_ACCOUNTS: &str = "eth_requestAccounts";
pub const ETH_ACCOUNTS: &str = "eth_accounts";
pub const ETH_CHAIN_ID: &str = "eth_chainId";
pub const ETH_CALL: &str = "eth_call";
pub const ETH_SEND_TRANSACTION: &str = "eth_sendTransaction";

/// EIP-1193 "User Rejected Request".
pub const USER_REJECTED_CODE: i64 = 4001;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    #[error("no wallet provider available")]
    Unavailable,
    #[error("user rejected the request")]
    UserRejected,
    #[error("provider error {code}: {message}")]
    Rpc { code: i64, message: String },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("malformed provider response: {0}")]
    Malformed(String),
}

impl ProviderError {
    /// Classify a JSON-RPC / EIP-1193 error object.
    pub fn from_rpc(code: i64, message: impl Into<String>) -> Self {
        if code == USER_REJECTED_CODE {
            ProviderError::UserRejected
        } else {
            ProviderError::Rpc {
                code,
                message: message.into(),
            }
        }
    }
}

#[async_trait(?Send)]
pub trait Eip1193Provider {
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError>;
}

#[async_trait(?Send)]
impl<P> Eip1193Provider for Rc<P>
where
    P: Eip1193Provider + ?Sized,
{
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError> {
        (**self).request(method, params).await
    }
}

/// Transaction-shaped parameter object used by `eth_call` and `eth_sendTransaction`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CallRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    pub to: String,
    pub data: Bytes,
}

/// `eth_requestAccounts`: ordered list of authorized addresses.
pub async fn request_accounts<P>(provider: &P) -> Result<Vec<Account>, ProviderError>
where
    P: Eip1193Provider + ?Sized,
{
    let value = provider.request(ETH_REQUEST_ACCOUNTS, json!([])).await?;
    let accounts: Vec<String> = serde_json::from_value(value)
        .map_err(|err| ProviderError::Malformed(format!("{ETH_REQUEST_ACCOUNTS}: {err}")))?;
    debug!(count = accounts.len(), "accounts authorized");
    Ok(accounts.into_iter().map(Account).collect())
}

pub async fn chain_id<P>(provider: &P) -> Result<ChainId, ProviderError>
where
    P: Eip1193Provider + ?Sized,
{
    let value = provider.request(ETH_CHAIN_ID, json!([])).await?;
    value
        .as_str()
        .map(|id| ChainId(id.to_owned()))
        .ok_or_else(|| ProviderError::Malformed(format!("{ETH_CHAIN_ID}: expected string, got {value}")))
}

/// `eth_call` against the latest block, returning the raw return data.
pub async fn eth_call<P>(provider: &P, call: &CallRequest) -> Result<Bytes, ProviderError>
where
    P: Eip1193Provider + ?Sized,
{
    debug!(to = %call.to, "eth_call");
    let value = provider.request(ETH_CALL, json!([call, "latest"])).await?;
    serde_json::from_value(value).map_err(|err| ProviderError::Malformed(format!("{ETH_CALL}: {err}")))
}

/// `eth_sendTransaction`; resolves once the node accepts it, not when it is mined.
pub async fn send_transaction<P>(provider: &P, call: &CallRequest) -> Result<TxAcknowledgement, ProviderError>
where
    P: Eip1193Provider + ?Sized,
{
    debug!(to = %call.to, from = ?call.from, "eth_sendTransaction");
    let value = provider.request(ETH_SEND_TRANSACTION, json!([call])).await?;
    let tx_hash = value
        .as_str()
        .ok_or_else(|| ProviderError::Malformed(format!("{ETH_SEND_TRANSACTION}: expected tx hash, got {value}")))?;
    Ok(TxAcknowledgement {
        tx_hash: tx_hash.to_owned(),
    })
}
