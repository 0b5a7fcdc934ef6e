//! Ledger client layer for FlowWords.
//!
//! A player's identity lives in a ledger account. This crate defines the
//! "contract" the rest of the client speaks when it talks to the ledger:
//!
//! - **Client** ([`LedgerClient`] trait) — authenticate an account, submit
//!   a transaction and wait for its outcome, sign out.
//! - **Types** ([`Account`], [`AccountRegistry`], [`TransactionOutcome`],
//!   etc.) — what comes back from the ledger and how known accounts are
//!   looked up.
//! - **Arguments** ([`CadenceValue`]) — transaction arguments and their
//!   JSON-Cadence encoding.
//! - **Development wallet** ([`DevWallet`]) — an in-memory ledger for local
//!   play and tests.
//!
//! # How it fits in the stack
//!
//! ```text
//! Game Flow (above)   ← asks the session layer to log in / out
//!     ↕
//! Session Layer       ← drives the login protocol
//!     ↕
//! Ledger Layer (this crate)  ← authentication, transaction submission
//! ```

mod cadence;
mod client;
mod dev;
mod error;
mod types;

pub use cadence::{decode_argument, encode_arguments, CadenceValue};
pub use client::LedgerClient;
pub use dev::{DevWallet, Submission};
pub use error::LedgerError;
pub use types::{
    Account, AccountRegistry, Address, ExecutionError, TransactionId,
    TransactionOutcome, TransactionStatus, ADDRESS_CONFIG_KEY,
};
