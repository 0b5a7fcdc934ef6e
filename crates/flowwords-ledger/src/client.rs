//! The ledger client contract.
//!
//! FlowWords doesn't talk to a ledger itself. It defines the
//! [`LedgerClient`] trait and lets the host plug in whatever wallet/SDK
//! binding it uses: a real network client in production, [`DevWallet`]
//! locally and in tests.
//!
//! [`DevWallet`]: crate::DevWallet

use std::future::Future;

use crate::{Account, Address, CadenceValue, LedgerError, TransactionOutcome};

/// Authenticates accounts and submits transactions against a ledger.
///
/// # Trait bounds
///
/// - `Send + Sync + 'static` → the client is owned by the session
///   controller for the whole life of the application and may be driven
///   from any Tokio worker.
pub trait LedgerClient: Send + Sync + 'static {
    /// Authenticates an account and returns its address.
    ///
    /// An empty `selector` means "let the wallet offer every known
    /// account"; otherwise it names the account to use.
    ///
    /// # Errors
    /// [`LedgerError::AuthenticationRejected`] if no account could be
    /// authenticated.
    fn authenticate(
        &self,
        selector: &str,
    ) -> impl Future<Output = Result<Address, LedgerError>> + Send;

    /// Forgets the currently authenticated account. Never fails.
    fn unauthenticate(&self);

    /// Submits a transaction signed by `signer` and waits until it resolves.
    ///
    /// Chain-side failures (execution error, expiry) come back as an `Ok`
    /// outcome; `Err` means the transaction never reached the ledger.
    fn submit_and_await(
        &self,
        signer: &Account,
        script: &str,
        arguments: Vec<CadenceValue>,
    ) -> impl Future<Output = Result<TransactionOutcome, LedgerError>> + Send;
}
