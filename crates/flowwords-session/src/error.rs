//! Error types for the session layer.

use flowwords_ledger::{Address, LedgerError, TransactionId};

use crate::SessionState;

/// Why a login attempt did not produce a session.
///
/// Raw [`LedgerError`]s never reach the game directly; they arrive wrapped
/// in one of these variants.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The wallet could not authenticate any account. No transaction was
    /// submitted.
    #[error("wallet authentication failed: {0}")]
    AuthFailed(#[source] LedgerError),

    /// The wallet authenticated an address that matches none of the
    /// locally known accounts.
    #[error("no known account for address {0}")]
    AccountNotFound(Address),

    /// The login transaction never reached the ledger.
    #[error("login transaction could not be submitted: {0}")]
    Submission(#[source] LedgerError),

    /// The ledger executed the login transaction and reported an error.
    #[error("login transaction failed: {message}")]
    TransactionFailed {
        transaction_id: Option<TransactionId>,
        message: String,
    },

    /// The login transaction expired before it was included.
    #[error("login transaction expired")]
    TransactionExpired {
        transaction_id: Option<TransactionId>,
    },

    /// The attempt was abandoned by `logout()` or `cancel_login()`.
    #[error("login cancelled")]
    Cancelled,

    /// `login` was called while the session was not logged out.
    /// The session in progress is left untouched.
    #[error("cannot log in while {0}")]
    InvalidState(SessionState),
}

impl SessionError {
    /// Returns `true` for errors that end a login attempt as a failure.
    ///
    /// These reset the session to `LoggedOut` and are the ones reported
    /// through the failure callback. Cancellation and rejected calls are
    /// not failures of the attempt in this sense: a cancelled attempt
    /// reports nothing, and a rejected call never started one.
    pub fn is_login_failure(&self) -> bool {
        !matches!(self, Self::Cancelled | Self::InvalidState(_))
    }
}
