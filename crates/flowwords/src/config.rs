//! Client configuration, loaded from JSON.
//!
//! ```json
//! {
//!   "session": { "status_text": "Connecting", "progress_rate_hz": 2 },
//!   "accounts": [
//!     { "name": "emulator-account", "config": { "Address": "0xf8d6e0586b0a20c7" } }
//!   ],
//!   "wallet": { "default_address": "0xf8d6e0586b0a20c7", "submit_delay_ms": 2500 }
//! }
//! ```
//!
//! Every section and field is optional.

use std::path::Path;
use std::time::Duration;

use flowwords_ledger::{AccountRegistry, Address};
use flowwords_session::SessionConfig;
use flowwords_tick::TickConfig;
use serde::{Deserialize, Serialize};

use crate::FlowWordsError;

// ---------------------------------------------------------------------------
// WalletConfig
// ---------------------------------------------------------------------------

/// Settings for the development wallet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletConfig {
    /// Address the wallet returns when asked to pick an account itself.
    /// `None` picks the first known account.
    pub default_address: Option<Address>,

    /// How long the wallet takes to resolve a transaction, in
    /// milliseconds. Lets a local run show the progress animation.
    pub submit_delay_ms: u64,
}

impl WalletConfig {
    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }
}

// ---------------------------------------------------------------------------
// ClientConfig
// ---------------------------------------------------------------------------

/// Everything needed to build a [`FlowWordsClient`](crate::FlowWordsClient).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub session: SessionConfig,
    /// Locally known accounts. An authenticated address must match one.
    pub accounts: AccountRegistry,
    pub wallet: WalletConfig,
}

impl ClientConfig {
    /// Parses a config from JSON and validates it.
    pub fn from_json_str(json: &str) -> Result<Self, FlowWordsError> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.validated())
    }

    /// Reads and parses a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FlowWordsError> {
        let path = path.as_ref();
        let json =
            std::fs::read_to_string(path).map_err(|source| FlowWordsError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Self::from_json_str(&json)
    }

    /// Clamp out-of-range values so the config is safe to use.
    ///
    /// Problems that still leave a usable client (no accounts, a default
    /// address nobody owns) are logged, not rejected.
    pub fn validated(mut self) -> Self {
        self.session.progress_rate_hz =
            TickConfig::with_rate(self.session.progress_rate_hz)
                .validated()
                .tick_rate_hz;

        if self.accounts.is_empty() {
            tracing::warn!("no accounts configured; every login will fail");
        }
        if let Some(address) = &self.wallet.default_address {
            if self.accounts.find_by_address(address).is_none() {
                tracing::warn!(%address, "wallet default address matches no known account");
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_str_empty_object_is_default() {
        let config = ClientConfig::from_json_str("{}").unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.session.status_text, "Connecting");
    }

    #[test]
    fn test_from_json_str_full() {
        let config = ClientConfig::from_json_str(
            r#"{
                "session": { "status_text": "Signing in", "progress_rate_hz": 4 },
                "accounts": [
                    { "name": "alice", "config": { "Address": "0x1" } },
                    { "name": "bob", "config": { "Address": "0x2" } }
                ],
                "wallet": { "default_address": "0x2", "submit_delay_ms": 1500 }
            }"#,
        )
        .unwrap();

        assert_eq!(config.session.status_text, "Signing in");
        assert_eq!(config.session.progress_rate_hz, 4);
        assert_eq!(config.accounts.len(), 2);
        assert_eq!(config.wallet.default_address, Some(Address::from("0x2")));
        assert_eq!(config.wallet.submit_delay(), Duration::from_millis(1500));
    }

    #[test]
    fn test_from_json_str_clamps_progress_rate() {
        let config =
            ClientConfig::from_json_str(r#"{ "session": { "progress_rate_hz": 10000 } }"#)
                .unwrap();
        assert_eq!(config.session.progress_rate_hz, TickConfig::MAX_TICK_RATE_HZ);
    }

    #[test]
    fn test_from_json_str_wrong_shape_is_config_error() {
        let result = ClientConfig::from_json_str(r#"{ "accounts": "alice" }"#);
        assert!(matches!(result, Err(FlowWordsError::Config(_))));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = ClientConfig::load("/definitely/not/here/flowwords.json");
        assert!(matches!(result, Err(FlowWordsError::Io { .. })));
    }
}
