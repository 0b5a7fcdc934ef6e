//! Player session management for FlowWords.
//!
//! This crate owns the one thing in the client that is genuinely stateful:
//! who the player is logged in as. It handles:
//!
//! 1. **Authentication** — asking the wallet for an account address
//!    ([`LedgerClient`](flowwords_ledger::LedgerClient))
//! 2. **Sign-in transaction** — submitting the login transaction and
//!    waiting for the ledger's verdict, with a live progress indicator
//! 3. **Session state** — `LoggedOut → Authenticating → Submitting →
//!    LoggedIn`, plus logout and cancellation
//!
//! # How it fits in the stack
//!
//! ```text
//! Game Flow (above)  ← calls login/logout, reacts to the outcome
//!     ↕
//! Session Layer (this crate)  ← owns the account and the state machine
//!     ↕
//! Ledger Layer (below)  ← authenticate, submit_and_await
//! ```

mod controller;
mod error;
mod progress;
mod session;
mod status;

pub use controller::SessionController;
pub use error::SessionError;
pub use progress::ProgressIndicator;
pub use session::{
    LoginSuccess, SessionConfig, SessionState, DEFAULT_LOGIN_TRANSACTION,
};
pub use status::{NoStatus, StatusSink};
