//! Ledger data types: accounts, addresses, and transaction outcomes.
//!
//! Everything here is plain data. Accounts are configured locally (the
//! player picks one of them in the wallet), outcomes come back from the
//! ledger once a submitted transaction resolves.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Config key holding an account's ledger address.
pub const ADDRESS_CONFIG_KEY: &str = "Address";

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A ledger account address, e.g. `"0xf8d6e0586b0a20c7"`.
///
/// Newtype over `String` so an address can't be confused with a username
/// in function signatures. Serialized as the bare string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(pub String);

impl Address {
    /// Creates an address from anything string-like.
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    /// The address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Address {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Identifier of a submitted transaction (hex string).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(pub String);

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Account
// ---------------------------------------------------------------------------

/// A locally known ledger account.
///
/// The `config` map is provider-specific (keys, signer settings, ...).
/// The only entry this client relies on is [`ADDRESS_CONFIG_KEY`], which
/// is how an authenticated address is matched back to an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Human-friendly label shown in the wallet's account picker.
    pub name: String,

    /// Provider-specific configuration.
    #[serde(default)]
    pub config: BTreeMap<String, String>,
}

impl Account {
    /// Creates an account with just a name and an address.
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        let mut config = BTreeMap::new();
        config.insert(ADDRESS_CONFIG_KEY.to_string(), address.into());
        Self {
            name: name.into(),
            config,
        }
    }

    /// The account's address, if its config carries one.
    pub fn address(&self) -> Option<Address> {
        self.config.get(ADDRESS_CONFIG_KEY).map(|a| Address::new(a.as_str()))
    }

    /// Returns `true` if this account lives at `address`.
    pub fn has_address(&self, address: &Address) -> bool {
        self.config
            .get(ADDRESS_CONFIG_KEY)
            .is_some_and(|a| a == address.as_str())
    }
}

/// The set of accounts this client knows about.
///
/// Serialized as a plain JSON array of [`Account`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountRegistry(Vec<Account>);

impl AccountRegistry {
    /// Creates a registry from a list of accounts.
    pub fn new(accounts: Vec<Account>) -> Self {
        Self(accounts)
    }

    /// First account whose `Address` config entry equals `address`.
    pub fn find_by_address(&self, address: &Address) -> Option<&Account> {
        self.0.iter().find(|account| account.has_address(address))
    }

    /// First account with the given name.
    pub fn find_by_name(&self, name: &str) -> Option<&Account> {
        self.0.iter().find(|account| account.name == name)
    }

    /// Iterates over all known accounts.
    pub fn iter(&self) -> impl Iterator<Item = &Account> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Account> for AccountRegistry {
    fn from_iter<I: IntoIterator<Item = Account>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// ---------------------------------------------------------------------------
// Transaction outcome
// ---------------------------------------------------------------------------

/// Lifecycle status of a ledger transaction.
///
/// ```text
/// Unknown → Pending → Finalized → Executed → Sealed
///              └──────────(too late)──────────→ Expired
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    #[default]
    Unknown,
    Pending,
    Finalized,
    Executed,
    Sealed,
    /// The transaction was not included before its reference block expired.
    Expired,
}

/// Error object attached to an outcome when execution failed on chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionError {
    pub code: u32,
    pub message: String,
}

/// The resolved result of a submitted transaction.
///
/// Consumed once by whoever awaited the submission; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TransactionOutcome {
    /// Which transaction this outcome belongs to, when the ledger assigned one.
    pub transaction_id: Option<TransactionId>,

    pub status: TransactionStatus,

    /// Empty when there was no error.
    #[serde(default)]
    pub error_message: String,

    #[serde(default)]
    pub error: Option<ExecutionError>,
}

impl TransactionOutcome {
    /// An outcome that executed cleanly.
    pub fn executed() -> Self {
        Self {
            status: TransactionStatus::Executed,
            ..Self::default()
        }
    }

    /// An outcome that expired before inclusion.
    pub fn expired() -> Self {
        Self {
            status: TransactionStatus::Expired,
            ..Self::default()
        }
    }

    /// An outcome carrying a chain-side execution error.
    pub fn failed(code: u32, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            status: TransactionStatus::Executed,
            error_message: message.clone(),
            error: Some(ExecutionError { code, message }),
            ..Self::default()
        }
    }

    /// Returns `true` if the ledger reported an error in any form.
    ///
    /// Any of these counts: an error object, a non-empty error message,
    /// or an expired status.
    pub fn is_failure(&self) -> bool {
        self.error.is_some()
            || !self.error_message.is_empty()
            || self.status == TransactionStatus::Expired
    }
}
