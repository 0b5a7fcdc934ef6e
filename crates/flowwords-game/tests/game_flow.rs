//! Integration tests for the game flow driving a real session controller.

use std::sync::Arc;
use std::time::Duration;

use flowwords_game::{
    GameError, GameFlow, Scene, UiCoordinator, UiState, EMPTY_USERNAME_STATUS,
    LOGIN_FAILED_STATUS,
};
use flowwords_ledger::{Account, AccountRegistry, DevWallet, TransactionOutcome};
use flowwords_session::{SessionConfig, SessionController, SessionError, SessionState};

// =========================================================================
// Helpers
// =========================================================================

fn accounts() -> AccountRegistry {
    AccountRegistry::new(vec![
        Account::new("alice", "0x1"),
        Account::new("bob", "0x2"),
    ])
}

/// Wires a started game flow against `wallet`. Returns the flow and a
/// handle to the shared wallet state.
fn started(wallet: DevWallet) -> (GameFlow<DevWallet>, DevWallet) {
    let ui = Arc::new(UiCoordinator::new());
    let session = Arc::new(SessionController::new(
        wallet.clone(),
        Arc::clone(&ui),
        accounts(),
        SessionConfig::default(),
    ));
    let flow = GameFlow::new(session, ui);
    flow.start();
    (flow, wallet)
}

fn wallet() -> DevWallet {
    DevWallet::new(accounts()).with_default_address("0x1")
}

// =========================================================================
// Tests
// =========================================================================

#[test]
fn test_start_shows_login_panel() {
    let (flow, _) = started(wallet());

    assert_eq!(flow.ui().state(), UiState::Login);
    assert_eq!(flow.ui().status(), Some(String::new()));
    assert_eq!(flow.current_scene(), Scene::Login);
}

#[tokio::test]
async fn test_login_success_enters_game_scene() {
    let (flow, _) = started(wallet());
    let mut scenes = flow.subscribe_scene();

    let success = flow.login("alice").await.expect("login should succeed");

    assert_eq!(success.username, "alice");
    assert_eq!(success.address.as_str(), "0x1");
    assert_eq!(flow.current_scene(), Scene::Game);
    assert_eq!(flow.ui().state(), UiState::None, "login panel hidden");
    assert_eq!(flow.session().state(), SessionState::LoggedIn);
    assert!(scenes.has_changed().unwrap());
    assert_eq!(*scenes.borrow_and_update(), Scene::Game);
}

#[tokio::test]
async fn test_login_trims_username() {
    let (flow, wallet) = started(wallet());

    let success = flow.login("  alice \n").await.unwrap();

    assert_eq!(success.username, "alice");
    assert_eq!(wallet.submissions().len(), 1);
}

#[tokio::test]
async fn test_login_failure_logs_out_and_shows_message() {
    let (flow, wallet) = started(wallet().respond_with(TransactionOutcome::expired()));
    let generation = flow.ui().snapshot().panel_generation;

    let result = flow.login("alice").await;

    assert!(matches!(
        result,
        Err(GameError::LoginFailed(SessionError::TransactionExpired { .. }))
    ));
    assert_eq!(
        flow.ui().snapshot().panel_generation,
        generation + 1,
        "failure rebuilds the login panel"
    );
    assert_eq!(flow.ui().state(), UiState::Login);
    assert_eq!(flow.ui().status().as_deref(), Some(LOGIN_FAILED_STATUS));
    assert_eq!(flow.current_scene(), Scene::Login);
    assert_eq!(flow.session().state(), SessionState::LoggedOut);
    assert!(flow.session().current_account().is_none());
    assert_eq!(wallet.unauthenticate_calls(), 1, "failure signs the wallet out");
}

#[tokio::test]
async fn test_login_auth_rejection_shows_message() {
    let (flow, wallet) = started(wallet().reject_authentication("no wallet"));

    let result = flow.login("alice").await;

    assert!(matches!(result, Err(GameError::LoginFailed(SessionError::AuthFailed(_)))));
    assert_eq!(flow.ui().status().as_deref(), Some(LOGIN_FAILED_STATUS));
    assert!(wallet.submissions().is_empty());
}

#[tokio::test]
async fn test_login_empty_username_never_reaches_wallet() {
    let (flow, wallet) = started(wallet());

    let result = flow.login("   ").await;

    assert!(matches!(result, Err(GameError::EmptyUsername)));
    assert_eq!(flow.ui().status().as_deref(), Some(EMPTY_USERNAME_STATUS));
    assert_eq!(wallet.auth_calls(), 0);
    assert_eq!(flow.session().state(), SessionState::LoggedOut);
}

#[tokio::test(start_paused = true)]
async fn test_login_progress_appears_on_panel() {
    let (flow, _) = started(wallet().with_submit_delay(Duration::from_millis(1_200)));

    let observe = async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        let first = flow.ui().status();
        tokio::time::sleep(Duration::from_millis(600)).await;
        (first, flow.ui().status())
    };
    let (result, (at_100ms, at_700ms)) = tokio::join!(flow.login("alice"), observe);

    assert!(result.is_ok());
    assert_eq!(at_100ms.as_deref(), Some("Connecting"));
    assert_eq!(at_700ms.as_deref(), Some("Connecting."));
}

#[tokio::test]
async fn test_login_while_logged_in_leaves_ui_alone() {
    let (flow, _) = started(wallet());
    flow.login("alice").await.unwrap();

    let result = flow.login("alice").await;

    assert!(matches!(
        result,
        Err(GameError::Session(SessionError::InvalidState(SessionState::LoggedIn)))
    ));
    assert_eq!(flow.current_scene(), Scene::Game);
    assert_eq!(flow.ui().state(), UiState::None);
}

#[tokio::test]
async fn test_log_out_returns_to_login() {
    let (flow, wallet) = started(wallet());
    flow.login("alice").await.unwrap();
    let generation = flow.ui().snapshot().panel_generation;

    flow.log_out();

    assert_eq!(flow.current_scene(), Scene::Login);
    assert_eq!(flow.ui().state(), UiState::Login);
    assert_eq!(flow.ui().status(), Some(String::new()));
    assert_eq!(flow.ui().snapshot().panel_generation, generation + 1);
    assert_eq!(flow.session().state(), SessionState::LoggedOut);
    assert_eq!(wallet.unauthenticate_calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_log_out_during_login_cancels_attempt() {
    let (flow, _) = started(wallet().with_submit_delay(Duration::from_secs(5)));

    let interrupt = async {
        tokio::time::sleep(Duration::from_millis(800)).await;
        flow.log_out();
    };
    let (result, ()) = tokio::join!(flow.login("alice"), interrupt);

    assert!(matches!(result, Err(GameError::Session(SessionError::Cancelled))));
    assert_eq!(flow.current_scene(), Scene::Login);
    assert_eq!(flow.ui().status(), Some(String::new()), "no failure message");
    assert_eq!(flow.session().state(), SessionState::LoggedOut);
}

#[tokio::test]
async fn test_retry_after_failure_reaches_game() {
    let (flow, wallet) = started(wallet().respond_with(TransactionOutcome::expired()));
    assert!(flow.login("alice").await.is_err());

    // Clones share state: the next transaction executes.
    let _ = wallet.clone().respond_with(TransactionOutcome::executed());

    assert!(flow.login("alice").await.is_ok());
    assert_eq!(flow.current_scene(), Scene::Game);
    assert_eq!(wallet.submissions().len(), 2);
}
