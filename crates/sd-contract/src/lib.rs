//! Contract Proxy for the single-integer storage contract.
//!
//! The interface is fixed at compile time; only the address varies per
//! deployment. A [`ContractHandle`] is the pair of the two.

use alloy_primitives::{Address, U256};
use alloy_sol_types::{SolCall, sol};
use sd_api_types::{Account, ContractAddress, StoredScalar, TxAcknowledgement};
use sd_chain_client::{CallRequest, Eip1193Provider, ProviderError, eth_call, send_transaction};
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

sol! {
    interface IStorage {
        function get() external view returns (uint256);
        function set(uint256 x) external;
    }
}

pub use IStorage::{getCall, setCall};

/// Immutable binding of a deployment address to the storage interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractHandle {
    address: Address,
}

impl ContractHandle {
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    /// Parse a configured address.
    pub fn bind(address: &ContractAddress) -> Result<Self, InvalidAddress> {
        Address::from_str(address.0.trim())
            .map(Self::new)
            .map_err(|_| InvalidAddress(address.0.clone()))
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// `get()` via `eth_call`. Returns the value as a decimal string.
    pub async fn read<P>(&self, provider: &P) -> Result<StoredScalar, ProviderError>
    where
        P: Eip1193Provider + ?Sized,
    {
        let call = CallRequest {
            from: None,
            to: self.address.to_string(),
            data: getCall {}.abi_encode().into(),
        };
        let output = eth_call(provider, &call).await?;
        let value = getCall::abi_decode_returns(&output[..])
            .map_err(|err| ProviderError::Malformed(format!("get() return data: {err}")))?;
        debug!(%value, contract = %self.address, "scalar read");
        Ok(StoredScalar(value.to_string()))
    }

    /// `set(value)` via `eth_sendTransaction`, signed by `from`.
    pub async fn write<P>(&self, provider: &P, from: &Account, value: U256) -> Result<TxAcknowledgement, ProviderError>
    where
        P: Eip1193Provider + ?Sized,
    {
        let call = CallRequest {
            from: Some(from.0.clone()),
            to: self.address.to_string(),
            data: setCall { x: value }.abi_encode().into(),
        };
        let ack = send_transaction(provider, &call).await?;
        debug!(tx_hash = %ack.tx_hash, %value, "set accepted");
        Ok(ack)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid contract address: {0:?}")]
pub struct InvalidAddress(pub String);
