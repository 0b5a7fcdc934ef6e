//! # FlowWords
//!
//! Client-side login and session layer for a word game whose player
//! identity lives on a ledger account.
//!
//! The interesting part is the session controller
//! ([`SessionController`](flowwords_session::SessionController)): it
//! authenticates a wallet account, submits a login transaction, animates
//! a "Connecting..." status while the transaction is outstanding, and
//! reports success or failure. This crate wires it to the UI coordinator
//! and game flow and loads everything from one JSON config.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use flowwords::prelude::*;
//!
//! # async fn demo() -> Result<(), FlowWordsError> {
//! let config = ClientConfig::load("flowwords.json")?;
//! let client = FlowWordsClient::builder().config(config).build();
//!
//! client.start();
//! let success = client.login("alice").await?;
//! println!("logged in as {} ({})", success.username, success.address);
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod error;

pub use client::{FlowWordsClient, FlowWordsClientBuilder};
pub use config::{ClientConfig, WalletConfig};
pub use error::FlowWordsError;

/// Everything a host needs, in one import.
pub mod prelude {
    pub use crate::{
        ClientConfig, FlowWordsClient, FlowWordsClientBuilder, FlowWordsError,
        WalletConfig,
    };
    pub use flowwords_game::{
        GameError, GameFlow, LoginPanel, Scene, UiCoordinator, UiSnapshot,
        UiState, EMPTY_USERNAME_STATUS, LOGIN_FAILED_STATUS,
    };
    pub use flowwords_ledger::{
        Account, AccountRegistry, Address, CadenceValue, DevWallet,
        LedgerClient, LedgerError, TransactionId, TransactionOutcome,
        TransactionStatus,
    };
    pub use flowwords_session::{
        LoginSuccess, NoStatus, SessionConfig, SessionController,
        SessionError, SessionState, StatusSink,
    };
    pub use flowwords_tick::{TickConfig, TickScheduler};
}
