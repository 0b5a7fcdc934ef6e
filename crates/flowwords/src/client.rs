//! `FlowWordsClient` builder and the wired-up client.
//!
//! The builder constructs each component once and passes it explicitly to
//! whatever depends on it:
//!
//! ```text
//!   UiCoordinator ──┬──→ SessionController (status sink) ──→ GameFlow
//!   LedgerClient ───┘                                          ↑
//!   UiCoordinator ─────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use flowwords_game::{GameFlow, Scene, UiCoordinator, UiSnapshot};
use flowwords_ledger::{AccountRegistry, Address, DevWallet, LedgerClient};
use flowwords_session::{LoginSuccess, SessionConfig, SessionController};
use tokio::sync::watch;

use crate::{ClientConfig, FlowWordsError};

/// Builder for a [`FlowWordsClient`].
///
/// # Example
///
/// ```rust
/// use flowwords::prelude::*;
///
/// let client = FlowWordsClient::builder()
///     .accounts(AccountRegistry::new(vec![Account::new("alice", "0x1")]))
///     .build();
/// client.start();
/// assert_eq!(client.ui().state(), UiState::Login);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FlowWordsClientBuilder {
    config: ClientConfig,
}

impl FlowWordsClientBuilder {
    /// Creates a builder with default settings and no accounts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the session configuration.
    pub fn session_config(mut self, config: SessionConfig) -> Self {
        self.config.session = config;
        self
    }

    /// Sets the locally known accounts.
    pub fn accounts(mut self, accounts: AccountRegistry) -> Self {
        self.config.accounts = accounts;
        self
    }

    /// Sets the address the development wallet picks by default.
    pub fn default_address(mut self, address: impl Into<Address>) -> Self {
        self.config.wallet.default_address = Some(address.into());
        self
    }

    /// Builds a client backed by the in-memory [`DevWallet`].
    pub fn build(self) -> FlowWordsClient<DevWallet> {
        let mut wallet = DevWallet::new(self.config.accounts.clone())
            .with_submit_delay(self.config.wallet.submit_delay());
        if let Some(address) = &self.config.wallet.default_address {
            wallet = wallet.with_default_address(address.clone());
        }
        self.build_with(wallet)
    }

    /// Builds a client backed by `ledger`.
    pub fn build_with<L: LedgerClient>(self, ledger: L) -> FlowWordsClient<L> {
        let config = self.config.validated();
        tracing::info!(
            accounts = config.accounts.len(),
            progress_rate_hz = config.session.progress_rate_hz,
            "building FlowWords client"
        );

        let ui = Arc::new(UiCoordinator::new());
        let session = Arc::new(SessionController::new(
            ledger,
            Arc::clone(&ui),
            config.accounts,
            config.session,
        ));
        let flow = GameFlow::new(session, Arc::clone(&ui));

        FlowWordsClient { flow }
    }
}

/// A fully wired FlowWords client.
///
/// Thin wrapper over [`GameFlow`] that speaks [`FlowWordsError`].
pub struct FlowWordsClient<L: LedgerClient = DevWallet> {
    flow: GameFlow<L>,
}

impl FlowWordsClient<DevWallet> {
    /// Creates a new builder.
    pub fn builder() -> FlowWordsClientBuilder {
        FlowWordsClientBuilder::new()
    }
}

impl<L: LedgerClient> FlowWordsClient<L> {
    /// Shows the login panel.
    pub fn start(&self) {
        self.flow.start();
    }

    /// Logs in as `username`. See [`GameFlow::login`].
    pub async fn login(&self, username: &str) -> Result<LoginSuccess, FlowWordsError> {
        Ok(self.flow.login(username).await?)
    }

    /// Logs out and returns to the login panel.
    pub fn log_out(&self) {
        self.flow.log_out();
    }

    /// Abandons a login in flight, leaving the UI as it is.
    pub fn cancel_login(&self) -> bool {
        self.flow.session().cancel_login()
    }

    pub fn scene(&self) -> Scene {
        self.flow.current_scene()
    }

    pub fn ui(&self) -> &UiCoordinator {
        self.flow.ui()
    }

    /// Subscribes to UI snapshot changes.
    pub fn subscribe_ui(&self) -> watch::Receiver<UiSnapshot> {
        self.flow.ui().subscribe()
    }

    /// Subscribes to scene changes.
    pub fn subscribe_scene(&self) -> watch::Receiver<Scene> {
        self.flow.subscribe_scene()
    }

    pub fn session(&self) -> &SessionController<L, Arc<UiCoordinator>> {
        self.flow.session()
    }

    pub fn flow(&self) -> &GameFlow<L> {
        &self.flow
    }
}
