//! Session types: configuration, the state machine, and the login result.

use std::fmt;

use flowwords_ledger::{Address, TransactionId};
use serde::{Deserialize, Serialize};

/// Login transaction used when no other script is configured.
///
/// Takes the player's chosen username as its single argument.
pub const DEFAULT_LOGIN_TRANSACTION: &str = r#"transaction(username: String) {
    prepare(signer: AuthAccount) {
        log("FlowWords login: ".concat(username))
    }
}
"#;

// ---------------------------------------------------------------------------
// SessionConfig
// ---------------------------------------------------------------------------

/// Configuration for the login protocol.
///
/// Every field has a default, so a config file only needs to name what
/// it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Cadence source of the login transaction.
    pub login_transaction: String,

    /// Selector passed to the wallet. Empty lets the wallet offer every
    /// known account.
    pub auth_selector: String,

    /// Status text shown while the login transaction is outstanding. The
    /// progress animation appends 0–3 dots to it.
    pub status_text: String,

    /// Progress animation rate in Hz. 0 disables the animation (the plain
    /// status text is still shown once).
    pub progress_rate_hz: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            login_transaction: DEFAULT_LOGIN_TRANSACTION.to_string(),
            auth_selector: String::new(),
            status_text: "Connecting".to_string(),
            progress_rate_hz: 2,
        }
    }
}

// ---------------------------------------------------------------------------
// SessionState
// ---------------------------------------------------------------------------

/// Where the session is in the login lifecycle.
///
/// ```text
///   LoggedOut ──login──→ Authenticating ──address──→ Submitting ──ok──→ LoggedIn
///       ↑                     │                          │                 │
///       └──── failure / logout / cancel ─────────────────┴──── logout ─────┘
/// ```
///
/// An account is held only in `Submitting` and `LoggedIn`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    #[default]
    LoggedOut,
    Authenticating,
    Submitting,
    LoggedIn,
}

impl SessionState {
    /// Returns `true` while a login attempt is in flight.
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Authenticating | Self::Submitting)
    }

    /// Returns `true` if this state may hold an account.
    pub fn holds_account(&self) -> bool {
        matches!(self, Self::Submitting | Self::LoggedIn)
    }

    /// Returns `true` if moving from `self` to `target` is a legal edge.
    ///
    /// Every state may fall back to `LoggedOut` (failure, logout, cancel).
    pub fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::LoggedOut, Self::Authenticating)
                | (Self::Authenticating, Self::Submitting)
                | (Self::Submitting, Self::LoggedIn)
                | (_, Self::LoggedOut)
        )
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LoggedOut => write!(f, "logged out"),
            Self::Authenticating => write!(f, "authenticating"),
            Self::Submitting => write!(f, "submitting"),
            Self::LoggedIn => write!(f, "logged in"),
        }
    }
}

// ---------------------------------------------------------------------------
// LoginSuccess
// ---------------------------------------------------------------------------

/// A completed login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginSuccess {
    /// The username the player chose.
    pub username: String,
    /// Address of the authenticated account.
    pub address: Address,
    /// The login transaction, if the ledger assigned it an ID.
    pub transaction_id: Option<TransactionId>,
}
