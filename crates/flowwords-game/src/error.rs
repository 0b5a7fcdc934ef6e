//! Error types for the game flow.

use flowwords_session::SessionError;

/// Errors returned by [`GameFlow`](crate::GameFlow) operations.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// The player submitted a blank username. The controller was not called.
    #[error("username must not be empty")]
    EmptyUsername,

    /// The login attempt ran and failed. The session has been logged out
    /// and the failure message is on the login panel.
    #[error("login failed: {0}")]
    LoginFailed(#[source] SessionError),

    /// The controller refused or abandoned the attempt (already logged
    /// in, cancelled by `log_out`). The UI was left alone.
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl GameError {
    /// The session error underneath, if there is one.
    pub fn session_error(&self) -> Option<&SessionError> {
        match self {
            Self::EmptyUsername => None,
            Self::LoginFailed(err) | Self::Session(err) => Some(err),
        }
    }
}
