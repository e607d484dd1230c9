use sd_chain_client::ProviderError;
use sd_contract::InvalidAddress;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Connect,
    Read,
    Write,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Connect => "connect",
            Operation::Read => "read",
            Operation::Write => "write",
        })
    }
}

/// The two user-facing error classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No wallet in this context; the user has to install one.
    ProviderAbsent,
    /// Anything else; state is rolled back and the user may retry.
    CallFailure,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DappError {
    #[error("no wallet detected; install a browser wallet extension to continue")]
    ProviderAbsent,
    #[error("{operation} failed: {source}")]
    CallFailed {
        operation: Operation,
        #[source]
        source: ProviderError,
    },
    #[error("wallet returned no authorized accounts")]
    NoAccounts,
    #[error("invalid value {0:?}: expected a non-negative integer")]
    InvalidValue(String),
    #[error("wallet is not connected")]
    NotConnected,
    #[error("nothing to submit or a write is already pending")]
    SubmitUnavailable,
    #[error(transparent)]
    InvalidContract(#[from] InvalidAddress),
}

impl DappError {
    pub(crate) fn from_provider(operation: Operation, source: ProviderError) -> Self {
        match source {
            ProviderError::Unavailable => DappError::ProviderAbsent,
            source => DappError::CallFailed { operation, source },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DappError::ProviderAbsent => ErrorKind::ProviderAbsent,
            _ => ErrorKind::CallFailure,
        }
    }

    pub fn is_user_rejection(&self) -> bool {
        matches!(
            self,
            DappError::CallFailed {
                source: ProviderError::UserRejected,
                ..
            }
        )
    }
}
