//! The session controller: drives the login protocol and owns the session.
//!
//! # Protocol
//!
//! ```text
//! login(username)
//!   │  LoggedOut → Authenticating
//!   ├─ ledger.authenticate(selector) ──── Err ──→ AuthFailed
//!   ├─ accounts.find_by_address(address) ─ None ─→ AccountNotFound
//!   │  Authenticating → Submitting (account held)
//!   ├─ ledger.submit_and_await(login tx, [username])
//!   │      ╰─ meanwhile: progress ticks → status sink
//!   ├─ outcome has error / expired ─────────────→ TransactionFailed / TransactionExpired
//!   │  Submitting → LoggedIn
//!   └─ Ok(LoginSuccess)
//! ```
//!
//! Any failure clears the account and returns to `LoggedOut` before the
//! error is handed back.
//!
//! # Concurrency note
//!
//! The session (state + account) lives behind a plain `std::sync::Mutex`
//! that is only ever held for a few field updates, never across an
//! `.await`. Each login attempt is stamped with a number; `logout()` and
//! `cancel_login()` bump it and ping a `watch` channel, which makes the
//! in-flight attempt stop at its next suspension point without touching
//! the session again.

use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

use flowwords_ledger::{
    Account, AccountRegistry, Address, CadenceValue, LedgerClient,
    TransactionId, TransactionOutcome,
};
use flowwords_tick::TickScheduler;
use tokio::sync::watch;

use crate::{
    LoginSuccess, ProgressIndicator, SessionConfig, SessionError,
    SessionState, StatusSink,
};

struct Session {
    state: SessionState,
    account: Option<Account>,
    /// Stamp of the most recent login attempt. Bumped on every login,
    /// logout and cancel so stale attempts can recognise themselves.
    attempt: u64,
}

/// Owns the player's session and runs the login protocol.
///
/// Construct one at startup and hand references to whoever needs it; the
/// controller is the only thing that ever mutates the session.
///
/// # Example
///
/// ```rust,no_run
/// use flowwords_ledger::{Account, AccountRegistry, DevWallet};
/// use flowwords_session::{NoStatus, SessionConfig, SessionController, SessionState};
///
/// # async fn demo() {
/// let accounts = AccountRegistry::new(vec![Account::new("alice", "0x1")]);
/// let wallet = DevWallet::new(accounts.clone());
/// let session = SessionController::new(wallet, NoStatus, accounts, SessionConfig::default());
///
/// let success = session.login("alice").await.unwrap();
/// assert_eq!(success.address.as_str(), "0x1");
/// assert_eq!(session.state(), SessionState::LoggedIn);
/// # }
/// ```
pub struct SessionController<L: LedgerClient, S: StatusSink> {
    ledger: L,
    status: S,
    accounts: AccountRegistry,
    config: SessionConfig,
    session: Mutex<Session>,
    cancel: watch::Sender<u64>,
}

impl<L: LedgerClient, S: StatusSink> SessionController<L, S> {
    /// Creates a logged-out controller.
    ///
    /// `accounts` is the set of locally known accounts; an authenticated
    /// address must match one of them for login to proceed.
    pub fn new(
        ledger: L,
        status: S,
        accounts: AccountRegistry,
        config: SessionConfig,
    ) -> Self {
        let (cancel, _) = watch::channel(0);
        Self {
            ledger,
            status,
            accounts,
            config,
            session: Mutex::new(Session {
                state: SessionState::LoggedOut,
                account: None,
                attempt: 0,
            }),
            cancel,
        }
    }

    /// Current session state.
    pub fn state(&self) -> SessionState {
        self.session().state
    }

    /// The account of the current session, if any.
    ///
    /// `Some` only while `Submitting` or `LoggedIn`.
    pub fn current_account(&self) -> Option<Account> {
        self.session().account.clone()
    }

    /// Address of the current account, if any.
    pub fn current_address(&self) -> Option<Address> {
        self.session().account.as_ref().and_then(Account::address)
    }

    /// The accounts this controller can log in as.
    pub fn accounts(&self) -> &AccountRegistry {
        &self.accounts
    }

    /// The ledger client this controller drives.
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Logs in as `username`.
    ///
    /// Resolves once the login transaction's outcome is known (or the
    /// attempt fails earlier). While the transaction is outstanding the
    /// status sink receives `"Connecting"`, `"Connecting."`, ... on the
    /// configured progress schedule.
    ///
    /// # Errors
    /// - [`SessionError::InvalidState`] — not logged out; nothing changes
    /// - [`SessionError::Cancelled`] — `logout()`/`cancel_login()` won the race
    /// - any other variant — the attempt failed; the session is back to
    ///   `LoggedOut` with no account
    pub async fn login(
        &self,
        username: &str,
    ) -> Result<LoginSuccess, SessionError> {
        let (attempt, mut cancelled) = self.begin_login()?;
        let guard = AttemptGuard {
            controller: self,
            attempt,
            armed: true,
        };
        tracing::info!(username, attempt, "login started");

        let result = tokio::select! {
            biased;
            _ = cancelled.changed() => Err(SessionError::Cancelled),
            result = self.run_login(username, attempt) => result,
        };

        guard.finish(result)
    }

    /// Callback flavour of [`login`](Self::login).
    ///
    /// Exactly one of `on_success(username, address)` / `on_failure(reason)`
    /// runs when the attempt completes. Neither runs if the attempt is
    /// cancelled or the call is rejected; those come back as `Err`.
    pub async fn login_with<F, G>(
        &self,
        username: &str,
        on_success: F,
        on_failure: G,
    ) -> Result<(), SessionError>
    where
        F: FnOnce(&str, &Address),
        G: FnOnce(&SessionError),
    {
        match self.login(username).await {
            Ok(success) => {
                on_success(&success.username, &success.address);
                Ok(())
            }
            Err(err) if err.is_login_failure() => {
                on_failure(&err);
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    /// Ends the session. Always legal.
    ///
    /// Clears the account, signs the wallet out and returns to `LoggedOut`.
    /// A login in flight is cancelled and will report nothing.
    pub fn logout(&self) {
        let previous = self.reset(false);
        self.ledger.unauthenticate();
        tracing::info!(from = %previous.unwrap_or_default(), "logged out");
    }

    /// Abandons an in-flight login. Returns `false` (and does nothing) if
    /// no login was in flight.
    pub fn cancel_login(&self) -> bool {
        let Some(previous) = self.reset(true) else {
            return false;
        };
        self.ledger.unauthenticate();
        tracing::info!(from = %previous, "login cancelled");
        true
    }

    // -- protocol steps ---------------------------------------------------

    async fn run_login(
        &self,
        username: &str,
        attempt: u64,
    ) -> Result<LoginSuccess, SessionError> {
        tracing::debug!(selector = %self.config.auth_selector, "requesting wallet authentication");
        let address = self
            .ledger
            .authenticate(&self.config.auth_selector)
            .await
            .map_err(SessionError::AuthFailed)?;

        let account = self
            .accounts
            .find_by_address(&address)
            .cloned()
            .ok_or_else(|| SessionError::AccountNotFound(address.clone()))?;

        self.enter_submitting(attempt, account.clone())?;
        tracing::debug!(%address, account = %account.name, "submitting login transaction");

        let submission = self.ledger.submit_and_await(
            &account,
            &self.config.login_transaction,
            vec![CadenceValue::String(username.to_string())],
        );
        let outcome = self
            .with_progress(submission)
            .await
            .map_err(SessionError::Submission)?;

        check_outcome(outcome).map(|transaction_id| LoginSuccess {
            username: username.to_string(),
            address,
            transaction_id,
        })
    }

    /// Awaits `pending` while animating the status text.
    ///
    /// The completion branch is polled first, so a tick can never delay
    /// noticing the result. Ticks only touch the status sink.
    async fn with_progress<F: Future>(&self, pending: F) -> F::Output {
        let mut ticker = TickScheduler::with_rate(self.config.progress_rate_hz);
        let mut progress = ProgressIndicator::new(self.config.status_text.as_str());
        self.status.set_status(&progress.current());

        let mut pending = std::pin::pin!(pending);
        loop {
            tokio::select! {
                biased;
                output = &mut pending => return output,
                tick = ticker.wait_for_tick() => {
                    tracing::trace!(tick = tick.tick, "login progress tick");
                    self.status.set_status(&progress.advance());
                }
            }
        }
    }

    // -- state transitions --------------------------------------------------

    fn begin_login(
        &self,
    ) -> Result<(u64, watch::Receiver<u64>), SessionError> {
        let mut session = self.session();
        if session.state != SessionState::LoggedOut {
            tracing::warn!(state = %session.state, "login rejected");
            return Err(SessionError::InvalidState(session.state));
        }
        session.attempt += 1;
        session.state = SessionState::Authenticating;
        // Subscribing under the lock: a logout can't slip in unseen.
        Ok((session.attempt, self.cancel.subscribe()))
    }

    fn enter_submitting(
        &self,
        attempt: u64,
        account: Account,
    ) -> Result<(), SessionError> {
        let mut session = self.session();
        if session.attempt != attempt {
            return Err(SessionError::Cancelled);
        }
        debug_assert!(session.state.can_transition_to(SessionState::Submitting));
        session.state = SessionState::Submitting;
        session.account = Some(account);
        Ok(())
    }

    fn finish_login(
        &self,
        attempt: u64,
        result: Result<LoginSuccess, SessionError>,
    ) -> Result<LoginSuccess, SessionError> {
        let mut session = self.session();
        if session.attempt != attempt {
            // Superseded by logout/cancel, which already reset the session.
            return Err(SessionError::Cancelled);
        }

        match &result {
            Ok(success) => {
                session.state = SessionState::LoggedIn;
                tracing::info!(
                    username = %success.username,
                    address = %success.address,
                    "login succeeded"
                );
            }
            Err(err) => {
                session.account = None;
                session.state = SessionState::LoggedOut;
                tracing::warn!(error = %err, "login failed");
            }
        }
        result
    }

    /// Forces `LoggedOut`, cancelling any attempt in flight.
    ///
    /// With `only_if_busy`, does nothing unless a login is in flight.
    /// Returns the state that was left, or `None` if nothing was done.
    fn reset(&self, only_if_busy: bool) -> Option<SessionState> {
        let mut session = self.session();
        let previous = session.state;
        if only_if_busy && !previous.is_busy() {
            return None;
        }

        session.account = None;
        session.state = SessionState::LoggedOut;
        session.attempt += 1;
        if previous.is_busy() {
            self.cancel.send_modify(|n| *n += 1);
        }
        Some(previous)
    }

    fn session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Resets the session and signs the wallet out if a `login` future is
/// dropped before it finishes, as `cancel_login` would.
///
/// Without this, dropping the future mid-flight (task aborted, `select!`
/// elsewhere picked another branch) would leave the session stuck in
/// `Authenticating`/`Submitting` and reject every later login.
struct AttemptGuard<'a, L: LedgerClient, S: StatusSink> {
    controller: &'a SessionController<L, S>,
    attempt: u64,
    armed: bool,
}

impl<L: LedgerClient, S: StatusSink> AttemptGuard<'_, L, S> {
    /// Records the attempt's result; the guard no longer fires on drop.
    fn finish(
        mut self,
        result: Result<LoginSuccess, SessionError>,
    ) -> Result<LoginSuccess, SessionError> {
        self.armed = false;
        self.controller.finish_login(self.attempt, result)
    }
}

impl<L: LedgerClient, S: StatusSink> Drop for AttemptGuard<'_, L, S> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let abandoned = {
            let mut session = self.controller.session();
            let abandoned =
                session.attempt == self.attempt && session.state.is_busy();
            if abandoned {
                session.account = None;
                session.state = SessionState::LoggedOut;
                session.attempt += 1;
            }
            abandoned
        };
        if abandoned {
            self.controller.ledger.unauthenticate();
            tracing::warn!(attempt = self.attempt, "login abandoned before completion");
        }
    }
}

/// Turns a resolved outcome into the login's transaction ID or a failure.
fn check_outcome(
    outcome: TransactionOutcome,
) -> Result<Option<TransactionId>, SessionError> {
    if !outcome.is_failure() {
        return Ok(outcome.transaction_id);
    }

    let transaction_id = outcome.transaction_id;
    if let Some(error) = outcome.error {
        let message = if error.message.is_empty() {
            format!("error code {}", error.code)
        } else {
            error.message
        };
        return Err(SessionError::TransactionFailed {
            transaction_id,
            message,
        });
    }
    if !outcome.error_message.is_empty() {
        return Err(SessionError::TransactionFailed {
            transaction_id,
            message: outcome.error_message,
        });
    }
    Err(SessionError::TransactionExpired { transaction_id })
}
