//! Wallet Bridge, Contract Proxy orchestration and view state for the storage dApp.
//!
//! [`Dapp`] owns the provider and the view state. Every handler runs on a single
//! cooperative executor; state sits in a `RefCell` that is never borrowed across
//! an `.await`, so a read may overlap a settling write without locking.

pub mod error;
pub mod state;

pub use error::{DappError, ErrorKind, Operation};
pub use state::{Connection, SCALAR_PLACEHOLDER, Session, View, ViewState, WriteStatus};

use alloy_primitives::U256;
use sd_api_types::{Account, ChainId, DeploymentConfig, Notification, StoredScalar, TxAcknowledgement};
use sd_chain_client::{Eip1193Provider, chain_id, request_accounts};
use sd_contract::ContractHandle;
use std::cell::{Cell, RefCell};
use tracing::{debug, info, warn};

/// Sink for transient user notifications.
pub trait Notifier {
    fn notify(&self, notification: Notification);
}

impl<F> Notifier for F
where
    F: Fn(Notification),
{
    fn notify(&self, notification: Notification) {
        self(notification)
    }
}

type Listener = Box<dyn Fn(&ViewState)>;

pub struct Dapp<P, N> {
    provider: P,
    notifier: N,
    contract: ContractHandle,
    expected_chain: Option<ChainId>,
    state: RefCell<ViewState>,
    next_session: Cell<u64>,
    listeners: RefCell<Vec<Listener>>,
}

impl<P, N> Dapp<P, N>
where
    P: Eip1193Provider,
    N: Notifier,
{
    /// Binds the configured contract address; fails if it is not a valid address.
    pub fn new(provider: P, notifier: N, config: &DeploymentConfig) -> Result<Self, DappError> {
        let contract = ContractHandle::bind(&config.contract())?;
        Ok(Self {
            provider,
            notifier,
            contract,
            expected_chain: config.expected_chain(),
            state: RefCell::new(ViewState::default()),
            next_session: Cell::new(1),
            listeners: RefCell::new(Vec::new()),
        })
    }

    /// Register a re-render hook, called with a snapshot after every state change.
    pub fn subscribe(&self, listener: impl Fn(&ViewState) + 'static) {
        self.listeners.borrow_mut().push(Box::new(listener));
    }

    pub fn state(&self) -> ViewState {
        self.state.borrow().clone()
    }

    pub fn view(&self) -> View {
        self.state.borrow().view()
    }

    pub fn can_submit(&self) -> bool {
        self.state.borrow().can_submit()
    }

    pub fn set_pending_input(&self, input: &str) {
        self.update(|state| state.pending_input = input.to_owned());
    }

    /// Ask the wallet for accounts, bind the contract for the first one, then read once.
    pub async fn connect(&self) -> Result<Account, DappError> {
        info!("requesting wallet accounts");
        let accounts = request_accounts(&self.provider)
            .await
            .map_err(|err| self.report(DappError::from_provider(Operation::Connect, err)))?;

        let Some(account) = accounts.into_iter().next() else {
            return Err(self.report(DappError::NoAccounts));
        };

        let id = self.next_session.get();
        self.next_session.set(id + 1);
        self.update(|state| {
            state.connection = Connection::Connected(Session {
                id,
                account: account.clone(),
                contract: self.contract.clone(),
                scalar: None,
                stale: false,
            });
            state.write = WriteStatus::Idle;
        });
        info!(account = %account.0, session = id, "wallet connected");
        self.notifier
            .notify(Notification::success(format!("Connected {}", account.short())));

        self.check_chain().await;
        // Failures are already reported; the connection itself stands.
        let _ = self.refresh().await;

        Ok(account)
    }

    /// Forget the account locally. The wallet keeps its permission grant.
    pub fn disconnect(&self) {
        let was_connected = self.update(|state| {
            let was_connected = state.is_connected();
            *state = ViewState::default();
            was_connected
        });
        if was_connected {
            info!("wallet disconnected");
            self.notifier.notify(Notification::info("Disconnected"));
        }
    }

    /// Re-read the stored scalar. A failure leaves the cached value untouched.
    pub async fn refresh(&self) -> Result<StoredScalar, DappError> {
        let Some((id, contract)) = self
            .state
            .borrow()
            .session()
            .map(|session| (session.id, session.contract.clone()))
        else {
            return Err(DappError::NotConnected);
        };

        match contract.read(&self.provider).await {
            Ok(scalar) => {
                self.update(|state| {
                    if let Some(session) = state.session_mut(id) {
                        session.scalar = Some(scalar.clone());
                        session.stale = false;
                    }
                });
                Ok(scalar)
            }
            Err(err) => Err(self.report(DappError::from_provider(Operation::Read, err))),
        }
    }

    /// Submit the pending input as a `set` transaction, then re-read.
    ///
    /// The input stays in place on failure so the user can retry.
    pub async fn submit(&self) -> Result<TxAcknowledgement, DappError> {
        let (id, account, contract, raw) = {
            let state = self.state.borrow();
            let Some(session) = state.session() else {
                return Err(DappError::NotConnected);
            };
            if !state.can_submit() {
                debug!("submit ignored: affordance disabled");
                return Err(DappError::SubmitUnavailable);
            }
            (
                session.id,
                session.account.clone(),
                session.contract.clone(),
                state.pending_input.clone(),
            )
        };

        let value = parse_value(&raw).map_err(|err| self.report(err))?;

        self.update(|state| state.write = WriteStatus::Writing);
        let result = contract.write(&self.provider, &account, value).await;

        match result {
            Ok(ack) => {
                info!(tx_hash = %ack.tx_hash, %value, "write accepted");
                let current = self.update(|state| match state.session_mut(id) {
                    Some(session) => {
                        session.stale = true;
                        state.pending_input.clear();
                        state.write = WriteStatus::Idle;
                        true
                    }
                    None => false,
                });
                if !current {
                    debug!(session = id, "write settled after its session ended");
                    return Ok(ack);
                }
                self.notifier.notify(Notification::success(format!(
                    "Transaction {} accepted",
                    sd_api_types::shorten(&ack.tx_hash, 10, 8)
                )));
                let _ = self.refresh().await;
                Ok(ack)
            }
            Err(err) => {
                self.update(|state| {
                    if state.session_id() == Some(id) {
                        state.write = WriteStatus::Idle;
                    }
                });
                Err(self.report(DappError::from_provider(Operation::Write, err)))
            }
        }
    }

    async fn check_chain(&self) {
        let Some(expected) = self.expected_chain.as_ref() else {
            return;
        };
        match chain_id(&self.provider).await {
            Ok(actual) if actual.same_chain(expected) => {}
            Ok(actual) => {
                warn!(expected = %expected.0, actual = %actual.0, "wallet on unexpected chain");
                self.notifier.notify(Notification::info(format!(
                    "Wallet is on chain {}, contract is deployed on chain {}",
                    actual.0, expected.0
                )));
            }
            Err(err) => debug!(%err, "chain id unavailable"),
        }
    }

    fn update<R>(&self, f: impl FnOnce(&mut ViewState) -> R) -> R {
        let out = f(&mut self.state.borrow_mut());
        let snapshot = self.state.borrow().clone();
        for listener in self.listeners.borrow().iter() {
            listener(&snapshot);
        }
        out
    }

    fn report(&self, err: DappError) -> DappError {
        warn!(%err, "operation failed");
        self.notifier.notify(Notification::error(err.to_string()));
        err
    }
}

/// Decimal uint256; surrounding whitespace is ignored.
pub fn parse_value(raw: &str) -> Result<U256, DappError> {
    U256::from_str_radix(raw.trim(), 10).map_err(|_| DappError::InvalidValue(raw.to_owned()))
}
