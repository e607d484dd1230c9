use serde::{Deserialize, Serialize};

/// Wallet address as reported by the provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Account(pub String);

impl Account {
    /// `0x1234ab...12cdef01`-style short form for headers and toasts.
    pub fn short(&self) -> String {
        shorten(&self.0, 8, 8)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContractAddress(pub String);

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChainId(pub String);

impl ChainId {
    /// Numeric value of the id, accepting both `0x`-hex (provider form) and decimal
    /// (config form).
    pub fn numeric(&self) -> Option<u64> {
        let raw = self.0.trim();
        match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
            Some(hex) => u64::from_str_radix(hex, 16).ok(),
            None => raw.parse().ok(),
        }
    }

    pub fn same_chain(&self, other: &ChainId) -> bool {
        match (self.numeric(), other.numeric()) {
            (Some(a), Some(b)) => a == b,
            _ => self.0.trim().eq_ignore_ascii_case(other.0.trim()),
        }
    }
}

/// The contract's stored integer, kept as a decimal string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredScalar(pub String);

impl std::fmt::Display for StoredScalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a node hands back when it accepts a transaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TxAcknowledgement {
    pub tx_hash: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

impl NotificationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
            NotificationKind::Info => "info",
        }
    }
}

/// Transient, non-blocking message for the user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Info,
            message: message.into(),
        }
    }
}

/// Per-network deployment settings, loaded from `deployment.json` or CLI flags.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeploymentConfig {
    pub contract_address: String,
    #[serde(default)]
    pub chain_id: Option<String>,
    #[serde(default)]
    pub rpc_url: Option<String>,
}

impl DeploymentConfig {
    pub fn contract(&self) -> ContractAddress {
        ContractAddress(self.contract_address.trim().to_owned())
    }

    pub fn expected_chain(&self) -> Option<ChainId> {
        self.chain_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(|id| ChainId(id.to_owned()))
    }
}

pub fn shorten(value: &str, head: usize, tail: usize) -> String {
    if value.len() <= head + tail + 3 || !value.is_ascii() {
        return value.to_owned();
    }
    format!("{}...{}", &value[..head], &value[value.len() - tail..])
}
