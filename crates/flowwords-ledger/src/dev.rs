//! In-memory development wallet.
//!
//! [`DevWallet`] plays both roles of a ledger client without any network:
//! it "authenticates" one of the locally configured accounts and
//! "executes" transactions by returning a scripted outcome. Everything it
//! was asked to do is recorded so tests can inspect it afterwards.
//!
//! Cloning a `DevWallet` is cheap and every clone shares the same state,
//! so a test can hand one clone to the session controller and keep
//! another to script responses and check what was submitted.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use rand::Rng;

use crate::{
    encode_arguments, Account, AccountRegistry, Address, CadenceValue,
    LedgerClient, LedgerError, TransactionId, TransactionOutcome,
};

/// A transaction the wallet was asked to submit.
#[derive(Debug, Clone)]
pub struct Submission {
    pub transaction_id: TransactionId,
    /// Address of the signing account (`None` if its config had no address).
    pub signer: Option<Address>,
    pub script: String,
    /// One JSON-Cadence document per argument, as they would go on the wire.
    pub arguments: Vec<Vec<u8>>,
}

struct DevWalletState {
    accounts: AccountRegistry,
    default_address: Option<Address>,
    reject_reason: Option<String>,
    submit_error: Option<String>,
    outcome: TransactionOutcome,
    auth_delay: Duration,
    submit_delay: Duration,
    authenticated: Option<Address>,
    auth_calls: usize,
    unauthenticate_calls: usize,
    submissions: Vec<Submission>,
}

impl DevWalletState {
    /// Maps a selector to an address.
    ///
    /// Empty selector: the configured default address, else the first known
    /// account. Otherwise the selector names an account.
    fn resolve(&self, selector: &str) -> Result<Address, LedgerError> {
        if selector.is_empty() {
            if let Some(address) = &self.default_address {
                return Ok(address.clone());
            }
            return self
                .accounts
                .iter()
                .find_map(Account::address)
                .ok_or_else(|| {
                    LedgerError::AuthenticationRejected(
                        "no accounts configured".into(),
                    )
                });
        }

        self.accounts
            .find_by_name(selector)
            .and_then(Account::address)
            .ok_or_else(|| {
                LedgerError::AuthenticationRejected(format!(
                    "unknown account '{selector}'"
                ))
            })
    }
}

/// An in-memory [`LedgerClient`] for local play and tests.
///
/// # Example
///
/// ```rust
/// use flowwords_ledger::{Account, AccountRegistry, DevWallet, TransactionOutcome};
///
/// let wallet = DevWallet::new(AccountRegistry::new(vec![
///     Account::new("alice", "0x1"),
/// ]))
/// .respond_with(TransactionOutcome::expired());
///
/// assert_eq!(wallet.submissions().len(), 0);
/// ```
#[derive(Clone)]
pub struct DevWallet {
    inner: Arc<Mutex<DevWalletState>>,
}

impl DevWallet {
    /// Creates a wallet that knows `accounts` and executes every
    /// transaction successfully.
    pub fn new(accounts: AccountRegistry) -> Self {
        Self {
            inner: Arc::new(Mutex::new(DevWalletState {
                accounts,
                default_address: None,
                reject_reason: None,
                submit_error: None,
                outcome: TransactionOutcome::executed(),
                auth_delay: Duration::ZERO,
                submit_delay: Duration::ZERO,
                authenticated: None,
                auth_calls: 0,
                unauthenticate_calls: 0,
                submissions: Vec::new(),
            })),
        }
    }

    /// Address returned for an empty selector. Need not belong to a known
    /// account.
    pub fn with_default_address(self, address: impl Into<Address>) -> Self {
        self.state().default_address = Some(address.into());
        self
    }

    /// Every authentication attempt fails with `reason`.
    pub fn reject_authentication(self, reason: impl Into<String>) -> Self {
        self.state().reject_reason = Some(reason.into());
        self
    }

    /// Outcome returned for every submitted transaction.
    pub fn respond_with(self, outcome: TransactionOutcome) -> Self {
        self.state().outcome = outcome;
        self
    }

    /// Every submission fails before reaching the ledger.
    pub fn fail_submission(self, reason: impl Into<String>) -> Self {
        self.state().submit_error = Some(reason.into());
        self
    }

    /// How long authentication takes.
    pub fn with_auth_delay(self, delay: Duration) -> Self {
        self.state().auth_delay = delay;
        self
    }

    /// How long a submitted transaction takes to resolve.
    pub fn with_submit_delay(self, delay: Duration) -> Self {
        self.state().submit_delay = delay;
        self
    }

    /// The currently authenticated address, if any.
    pub fn authenticated(&self) -> Option<Address> {
        self.state().authenticated.clone()
    }

    /// Number of `authenticate` calls so far.
    pub fn auth_calls(&self) -> usize {
        self.state().auth_calls
    }

    /// Number of `unauthenticate` calls so far.
    pub fn unauthenticate_calls(&self) -> usize {
        self.state().unauthenticate_calls
    }

    /// Every transaction submitted so far, oldest first.
    pub fn submissions(&self) -> Vec<Submission> {
        self.state().submissions.clone()
    }

    fn state(&self) -> MutexGuard<'_, DevWalletState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl LedgerClient for DevWallet {
    async fn authenticate(&self, selector: &str) -> Result<Address, LedgerError> {
        let delay = self.state().auth_delay;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let mut state = self.state();
        state.auth_calls += 1;

        if let Some(reason) = &state.reject_reason {
            tracing::debug!(%reason, "dev wallet rejecting authentication");
            return Err(LedgerError::AuthenticationRejected(reason.clone()));
        }

        let address = state.resolve(selector)?;
        state.authenticated = Some(address.clone());
        tracing::debug!(%address, "dev wallet authenticated account");
        Ok(address)
    }

    fn unauthenticate(&self) {
        let mut state = self.state();
        state.unauthenticate_calls += 1;
        if let Some(address) = state.authenticated.take() {
            tracing::debug!(%address, "dev wallet signed out");
        }
    }

    async fn submit_and_await(
        &self,
        signer: &Account,
        script: &str,
        arguments: Vec<CadenceValue>,
    ) -> Result<TransactionOutcome, LedgerError> {
        let encoded = encode_arguments(&arguments)?;
        let transaction_id = generate_transaction_id();

        let delay = {
            let mut state = self.state();
            state.submissions.push(Submission {
                transaction_id: transaction_id.clone(),
                signer: signer.address(),
                script: script.to_string(),
                arguments: encoded,
            });
            state.submit_delay
        };
        tracing::debug!(%transaction_id, signer = %signer.name, "dev wallet accepted transaction");

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let state = self.state();
        if let Some(reason) = &state.submit_error {
            return Err(LedgerError::SubmissionFailed(reason.clone()));
        }
        Ok(TransactionOutcome {
            transaction_id: Some(transaction_id),
            ..state.outcome.clone()
        })
    }
}

/// Random 64-character hex transaction ID (32 bytes, like a ledger tx hash).
fn generate_transaction_id() -> TransactionId {
    let bytes: [u8; 32] = rand::rng().random();
    TransactionId(bytes.iter().map(|b| format!("{b:02x}")).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wallet() -> DevWallet {
        DevWallet::new(AccountRegistry::new(vec![
            Account::new("emulator-account", "0xf8d6"),
            Account::new("alice", "0x01cf"),
        ]))
    }

    #[tokio::test]
    async fn test_authenticate_empty_selector_picks_first_account() {
        let w = wallet();
        let address = w.authenticate("").await.expect("should authenticate");
        assert_eq!(address, Address::from("0xf8d6"));
        assert_eq!(w.authenticated(), Some(address));
    }

    #[tokio::test]
    async fn test_authenticate_empty_selector_prefers_default_address() {
        let w = wallet().with_default_address("0x01cf");
        let address = w.authenticate("").await.unwrap();
        assert_eq!(address, Address::from("0x01cf"));
    }

    #[tokio::test]
    async fn test_authenticate_named_selector() {
        let w = wallet();
        assert_eq!(w.authenticate("alice").await.unwrap(), Address::from("0x01cf"));
    }

    #[tokio::test]
    async fn test_authenticate_unknown_selector_rejected() {
        let w = wallet();
        let result = w.authenticate("mallory").await;
        assert!(matches!(result, Err(LedgerError::AuthenticationRejected(r)) if r.contains("mallory")));
    }

    #[tokio::test]
    async fn test_authenticate_no_accounts_rejected() {
        let w = DevWallet::new(AccountRegistry::default());
        assert!(matches!(
            w.authenticate("").await,
            Err(LedgerError::AuthenticationRejected(_))
        ));
    }

    #[tokio::test]
    async fn test_authenticate_scripted_rejection() {
        let w = wallet().reject_authentication("user closed the picker");
        assert!(w.authenticate("").await.is_err());
        assert_eq!(w.auth_calls(), 1);
        assert_eq!(w.authenticated(), None);
    }

    #[test]
    fn test_unauthenticate_clears_and_counts() {
        let w = wallet();
        w.unauthenticate();
        w.unauthenticate();
        assert_eq!(w.unauthenticate_calls(), 2);
        assert_eq!(w.authenticated(), None);
    }

    #[test]
    fn test_generate_transaction_id_is_64_hex_chars() {
        let id = generate_transaction_id();
        assert_eq!(id.0.len(), 64);
        assert!(id.0.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(id, generate_transaction_id());
    }
}
