//! Unified error type for the FlowWords client.

use std::path::PathBuf;

use flowwords_game::GameError;

/// Top-level error for the client.
///
/// Ledger and session errors never reach this level on their own: the
/// game flow wraps them in [`GameError`]. `#[from]` lets `?` lift the
/// game and config errors without naming them.
#[derive(Debug, thiserror::Error)]
pub enum FlowWordsError {
    /// A game-flow error (blank username, login failure).
    #[error(transparent)]
    Game(#[from] GameError),

    /// The config file is not valid JSON or has the wrong shape.
    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),

    /// The config file could not be read.
    #[error("cannot read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FlowWordsError {
    /// Returns `true` if this is a login attempt that ran and failed,
    /// as opposed to a refused, cancelled or misconfigured one.
    pub fn is_login_failure(&self) -> bool {
        matches!(self, Self::Game(GameError::LoginFailed(_)))
    }
}
