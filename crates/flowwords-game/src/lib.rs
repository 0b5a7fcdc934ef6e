//! UI coordination and game flow for the FlowWords client.
//!
//! This crate sits on top of the session controller. It never renders
//! anything; it keeps a description of what should be on screen and
//! publishes it for a frontend to draw.
//!
//! # Key types
//!
//! - [`UiCoordinator`] — owns the one visible panel, receives status text
//! - [`UiSnapshot`] — what the frontend should draw right now
//! - [`GameFlow`] — the only caller of the session controller; turns login
//!   results into panel and scene changes
//! - [`Scene`] — which scene the game is in

mod error;
mod flow;
mod ui;

pub use error::GameError;
pub use flow::{GameFlow, Scene, EMPTY_USERNAME_STATUS, LOGIN_FAILED_STATUS};
pub use ui::{LoginPanel, UiCoordinator, UiSnapshot, UiState};
