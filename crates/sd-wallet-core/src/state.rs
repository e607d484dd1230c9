//! View state machine.
//!
//! `Disconnected` → `Connected(Session)`, with an orthogonal `WriteStatus`
//! bracketing the write path. Account and contract handle live together in
//! [`Session`], so one cannot exist without the other.

use sd_api_types::{Account, StoredScalar};
use sd_contract::ContractHandle;

/// Shown in place of the scalar before the first successful read.
pub const SCALAR_PLACEHOLDER: &str = "?";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: u64,
    pub account: Account,
    pub contract: ContractHandle,
    pub scalar: Option<StoredScalar>,
    /// Set once a write is accepted, cleared by the next successful read.
    pub stale: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Connection {
    #[default]
    Disconnected,
    Connected(Session),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WriteStatus {
    #[default]
    Idle,
    Writing,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub connection: Connection,
    pub pending_input: String,
    pub write: WriteStatus,
}

impl ViewState {
    pub fn session(&self) -> Option<&Session> {
        match &self.connection {
            Connection::Connected(session) => Some(session),
            Connection::Disconnected => None,
        }
    }

    /// Mutable session, but only if it is still the one identified by `id`.
    pub fn session_mut(&mut self, id: u64) -> Option<&mut Session> {
        match &mut self.connection {
            Connection::Connected(session) if session.id == id => Some(session),
            _ => None,
        }
    }

    pub fn session_id(&self) -> Option<u64> {
        self.session().map(|session| session.id)
    }

    pub fn is_connected(&self) -> bool {
        self.session().is_some()
    }

    pub fn account(&self) -> Option<&Account> {
        self.session().map(|session| &session.account)
    }

    pub fn contract(&self) -> Option<&ContractHandle> {
        self.session().map(|session| &session.contract)
    }

    pub fn scalar(&self) -> Option<&StoredScalar> {
        self.session().and_then(|session| session.scalar.as_ref())
    }

    pub fn is_writing(&self) -> bool {
        self.write == WriteStatus::Writing
    }

    /// The write affordance: connected, something typed, nothing in flight.
    pub fn can_submit(&self) -> bool {
        self.is_connected() && !self.pending_input.trim().is_empty() && !self.is_writing()
    }

    pub fn view(&self) -> View {
        match self.session() {
            None => View::ConnectPrompt,
            Some(session) => View::Connected {
                account: session.account.0.clone(),
                account_short: session.account.short(),
                scalar: session
                    .scalar
                    .as_ref()
                    .map(|scalar| scalar.0.clone())
                    .unwrap_or_else(|| SCALAR_PLACEHOLDER.to_owned()),
                stale: session.stale,
                input: self.pending_input.clone(),
                submit_enabled: self.can_submit(),
                writing: self.is_writing(),
            },
        }
    }
}

/// Render model derived from [`ViewState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    ConnectPrompt,
    Connected {
        account: String,
        account_short: String,
        scalar: String,
        stale: bool,
        input: String,
        submit_enabled: bool,
        writing: bool,
    },
}
