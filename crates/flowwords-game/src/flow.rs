//! Game flow: the single caller of the session controller.
//!
//! ```text
//!   start() ──→ Login panel, Login scene
//!      │
//!   login(name) ── ok ──→ panel hidden, Game scene
//!      │         └─ failure ─→ log_out(), "Login Failed." on a fresh panel
//!      │
//!   log_out() ──→ Login panel, Login scene
//! ```

use std::sync::Arc;

use flowwords_ledger::{Address, LedgerClient};
use flowwords_session::{LoginSuccess, SessionController, SessionError};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::{GameError, UiCoordinator, UiState};

/// Status shown on the login panel after a failed login.
pub const LOGIN_FAILED_STATUS: &str = "Login Failed.\nPlease check your credentials.";

/// Status shown when the player submits a blank username.
pub const EMPTY_USERNAME_STATUS: &str = "Please enter a username.";

/// The scene the game is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Scene {
    /// The title scene, showing the login panel.
    #[default]
    Login,
    /// The word game itself. Entered only after a successful login.
    Game,
}

/// Reacts to login results by switching panels and scenes.
///
/// Everything is injected: the flow gets the session controller and the
/// UI coordinator it should drive, and the controller writes its progress
/// text into that same coordinator.
pub struct GameFlow<L: LedgerClient> {
    session: Arc<SessionController<L, Arc<UiCoordinator>>>,
    ui: Arc<UiCoordinator>,
    scene: watch::Sender<Scene>,
}

impl<L: LedgerClient> GameFlow<L> {
    pub fn new(
        session: Arc<SessionController<L, Arc<UiCoordinator>>>,
        ui: Arc<UiCoordinator>,
    ) -> Self {
        let (scene, _) = watch::channel(Scene::Login);
        Self { session, ui, scene }
    }

    /// Shows the login panel.
    pub fn start(&self) {
        self.scene.send_replace(Scene::Login);
        self.ui.set_ui_state(UiState::Login);
        tracing::info!("showing login");
    }

    /// Logs in as `username` and moves the game along.
    ///
    /// - success: the login panel is hidden and the game enters
    ///   [`Scene::Game`]
    /// - failure: [`log_out`](Self::log_out) runs, then the fresh login
    ///   panel shows [`LOGIN_FAILED_STATUS`]
    ///
    /// # Errors
    /// - [`GameError::EmptyUsername`] — blank username; the panel shows
    ///   [`EMPTY_USERNAME_STATUS`] and nothing else happens
    /// - [`GameError::LoginFailed`] — the attempt failed
    /// - [`GameError::Session`] — the controller refused the call or the
    ///   attempt was cancelled; UI untouched
    pub async fn login(&self, username: &str) -> Result<LoginSuccess, GameError> {
        let username = username.trim();
        if username.is_empty() {
            self.ui.set_status(EMPTY_USERNAME_STATUS);
            return Err(GameError::EmptyUsername);
        }

        match self.session.login(username).await {
            Ok(success) => {
                self.on_login_success(&success.username, &success.address);
                Ok(success)
            }
            Err(err) if err.is_login_failure() => {
                self.on_login_failure(&err);
                Err(GameError::LoginFailed(err))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Logs out and returns to the login panel.
    pub fn log_out(&self) {
        self.session.logout();
        self.scene.send_replace(Scene::Login);
        self.ui.set_ui_state(UiState::Login);
    }

    pub fn current_scene(&self) -> Scene {
        *self.scene.borrow()
    }

    /// Subscribes to scene changes.
    pub fn subscribe_scene(&self) -> watch::Receiver<Scene> {
        self.scene.subscribe()
    }

    pub fn session(&self) -> &SessionController<L, Arc<UiCoordinator>> {
        &self.session
    }

    pub fn ui(&self) -> &Arc<UiCoordinator> {
        &self.ui
    }

    fn on_login_success(&self, username: &str, address: &Address) {
        tracing::info!(username, %address, "player logged in");
        self.ui.set_ui_state(UiState::None);
        self.scene.send_replace(Scene::Game);
    }

    fn on_login_failure(&self, reason: &SessionError) {
        tracing::warn!(error = %reason, "login failed");
        self.log_out();
        self.ui.set_status(LOGIN_FAILED_STATUS);
    }
}
