//! Integration tests for the wired-up client: config → builder → login.

use std::time::Duration;

use flowwords::prelude::*;

// =========================================================================
// Helpers
// =========================================================================

const CONFIG: &str = r#"{
    "session": { "progress_rate_hz": 2 },
    "accounts": [
        { "name": "emulator-account", "config": { "Address": "0xf8d6e0586b0a20c7" } },
        { "name": "alice", "config": { "Address": "0x01cf0e2f2f715450" } }
    ],
    "wallet": { "default_address": "0x01cf0e2f2f715450" }
}"#;

fn client() -> FlowWordsClient {
    let config = ClientConfig::from_json_str(CONFIG).unwrap();
    let client = FlowWordsClient::builder().config(config).build();
    client.start();
    client
}

/// Ledger that always authenticates one address and never resolves a
/// transaction.
struct StuckLedger;

impl LedgerClient for StuckLedger {
    async fn authenticate(&self, _selector: &str) -> Result<Address, LedgerError> {
        Ok(Address::from("0x1"))
    }

    fn unauthenticate(&self) {}

    async fn submit_and_await(
        &self,
        _signer: &Account,
        _script: &str,
        _arguments: Vec<CadenceValue>,
    ) -> Result<TransactionOutcome, LedgerError> {
        std::future::pending().await
    }
}

// =========================================================================
// Tests
// =========================================================================

#[tokio::test]
async fn test_login_from_json_config_uses_default_address() {
    let client = client();

    let success = client.login("wordsmith").await.unwrap();

    assert_eq!(success.address.as_str(), "0x01cf0e2f2f715450");
    assert_eq!(
        client.session().current_account().map(|a| a.name),
        Some("alice".to_string())
    );
    assert_eq!(client.scene(), Scene::Game);
}

#[tokio::test]
async fn test_login_unknown_default_address_is_login_failure() {
    let client = FlowWordsClient::builder()
        .accounts(AccountRegistry::new(vec![Account::new("alice", "0x1")]))
        .default_address("0xdead")
        .build();
    client.start();

    let err = client.login("wordsmith").await.unwrap_err();

    assert!(err.is_login_failure());
    assert!(matches!(
        err,
        FlowWordsError::Game(GameError::LoginFailed(SessionError::AccountNotFound(_)))
    ));
    assert_eq!(client.ui().status().as_deref(), Some(LOGIN_FAILED_STATUS));
}

#[tokio::test]
async fn test_blank_username_is_not_a_login_failure() {
    let client = client();

    let err = client.login("").await.unwrap_err();

    assert!(!err.is_login_failure());
    assert!(matches!(err, FlowWordsError::Game(GameError::EmptyUsername)));
}

#[tokio::test]
async fn test_load_config_file() {
    let path = std::env::temp_dir().join(format!(
        "flowwords-client-test-{}.json",
        std::process::id()
    ));
    std::fs::write(&path, CONFIG).unwrap();

    let config = ClientConfig::load(&path);
    std::fs::remove_file(&path).ok();

    let config = config.unwrap();
    assert_eq!(config.accounts.len(), 2);
    assert_eq!(
        config.wallet.default_address,
        Some(Address::from("0x01cf0e2f2f715450"))
    );
}

#[tokio::test]
async fn test_subscribe_ui_sees_login_panel_after_failure() {
    let client = FlowWordsClient::builder()
        .accounts(AccountRegistry::new(vec![Account::new("alice", "0x1")]))
        .default_address("0x2")
        .build();
    let mut ui = client.subscribe_ui();

    client.start();
    assert!(ui.has_changed().unwrap());
    assert_eq!(ui.borrow_and_update().state, UiState::Login);

    client.login("wordsmith").await.unwrap_err();
    let snapshot = ui.borrow_and_update().clone();
    assert_eq!(
        snapshot.login_panel.map(|p| p.status),
        Some(LOGIN_FAILED_STATUS.to_string())
    );
}

#[tokio::test(start_paused = true)]
async fn test_custom_ledger_cancel_login() {
    let client = FlowWordsClient::builder()
        .accounts(AccountRegistry::new(vec![Account::new("alice", "0x1")]))
        .build_with(StuckLedger);
    client.start();

    let interrupt = async {
        tokio::time::sleep(Duration::from_millis(3_200)).await;
        let status = client.ui().status();
        (client.cancel_login(), status)
    };
    let (result, (cancelled, status)) = tokio::join!(client.login("alice"), interrupt);

    assert!(cancelled);
    assert!(matches!(
        result,
        Err(FlowWordsError::Game(GameError::Session(SessionError::Cancelled)))
    ));
    assert_eq!(client.session().state(), SessionState::LoggedOut);
    // 3.2s at 2 Hz: six ticks, so two dots.
    assert_eq!(status.as_deref(), Some("Connecting.."));
    assert_eq!(client.scene(), Scene::Login);
}
