//! UI coordinator: one visible panel at a time, keyed by [`UiState`].
//!
//! The coordinator keeps a [`UiSnapshot`] of what should be on screen and
//! publishes every change through a `tokio::sync::watch` channel. A
//! frontend subscribes once and redraws whenever the receiver reports a
//! change; nothing here knows how drawing works.

use flowwords_session::StatusSink;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// Which panel is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum UiState {
    /// No panel (in-game).
    #[default]
    None,
    /// The login panel: username entry plus a status line.
    Login,
}

/// Contents of the login panel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginPanel {
    pub status: String,
}

/// Everything a frontend needs to draw the UI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiSnapshot {
    pub state: UiState,
    /// Present only while `state` is [`UiState::Login`].
    pub login_panel: Option<LoginPanel>,
    /// Bumped every time a panel is created. A frontend that sees a new
    /// value must throw away the old panel's widgets.
    pub panel_generation: u64,
}

/// Owns the visible panel and the status line.
///
/// Shared as `Arc<UiCoordinator>` between the game flow and the session
/// controller, which writes progress text into it through [`StatusSink`].
#[derive(Debug)]
pub struct UiCoordinator {
    snapshot: watch::Sender<UiSnapshot>,
}

impl UiCoordinator {
    /// Creates a coordinator with no panel showing.
    pub fn new() -> Self {
        let (snapshot, _) = watch::channel(UiSnapshot::default());
        Self { snapshot }
    }

    /// Switches panels.
    ///
    /// The current panel is destroyed and a fresh one for `state` is
    /// created, even if `state` is already showing. A fresh login panel
    /// has an empty status line.
    pub fn set_ui_state(&self, state: UiState) {
        self.snapshot.send_modify(|snapshot| {
            snapshot.state = state;
            snapshot.login_panel = match state {
                UiState::Login => Some(LoginPanel::default()),
                UiState::None => None,
            };
            if state != UiState::None {
                snapshot.panel_generation += 1;
            }
        });
        tracing::debug!(?state, "ui state changed");
    }

    /// Sets the login panel's status line.
    ///
    /// Ignored unless the login panel is showing.
    pub fn set_status(&self, text: &str) {
        let applied = self.snapshot.send_if_modified(|snapshot| {
            match snapshot.login_panel.as_mut() {
                Some(panel) if panel.status != text => {
                    panel.status = text.to_string();
                    true
                }
                _ => false,
            }
        });
        if applied {
            tracing::trace!(status = text, "status updated");
        }
    }

    /// The panel currently showing.
    pub fn state(&self) -> UiState {
        self.snapshot.borrow().state
    }

    /// The login panel's status line, if the login panel is showing.
    pub fn status(&self) -> Option<String> {
        self.snapshot
            .borrow()
            .login_panel
            .as_ref()
            .map(|panel| panel.status.clone())
    }

    /// A copy of the current snapshot.
    pub fn snapshot(&self) -> UiSnapshot {
        self.snapshot.borrow().clone()
    }

    /// Subscribes to snapshot changes.
    pub fn subscribe(&self) -> watch::Receiver<UiSnapshot> {
        self.snapshot.subscribe()
    }
}

impl Default for UiCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusSink for UiCoordinator {
    fn set_status(&self, text: &str) {
        UiCoordinator::set_status(self, text);
    }
}
