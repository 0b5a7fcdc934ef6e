use std::io::Write;

use flowwords::prelude::*;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;

/// Used when neither a path argument nor `FLOWWORDS_CONFIG` is given.
const DEFAULT_CONFIG: &str = include_str!("../flowwords.json");

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Draws every UI snapshot and scene change until the client goes away.
async fn render(mut ui: watch::Receiver<UiSnapshot>, mut scene: watch::Receiver<Scene>) {
    let mut generation = 0;
    loop {
        tokio::select! {
            changed = ui.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = ui.borrow_and_update().clone();
                draw(&snapshot, &mut generation);
            }
            changed = scene.changed() => {
                if changed.is_err() {
                    break;
                }
                let scene = *scene.borrow_and_update();
                if scene == Scene::Game {
                    println!("\n*** welcome to FlowWords! type `logout` to leave ***");
                }
            }
        }
    }
}

fn draw(snapshot: &UiSnapshot, generation: &mut u64) {
    let Some(panel) = &snapshot.login_panel else {
        return;
    };
    if snapshot.panel_generation != *generation {
        *generation = snapshot.panel_generation;
        println!("\n=== FlowWords login ===");
        println!("enter a username (`quit` to exit, ctrl-c cancels a login)");
    }
    if !panel.status.is_empty() {
        // Progress frames overwrite each other on one line.
        print!("\r\x1b[2K{}", panel.status.replace('\n', " "));
        let _ = std::io::stdout().flush();
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn load_config() -> Result<ClientConfig, FlowWordsError> {
    match std::env::args().nth(1).or_else(|| std::env::var("FLOWWORDS_CONFIG").ok()) {
        Some(path) => ClientConfig::load(path),
        None => ClientConfig::from_json_str(DEFAULT_CONFIG),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let client = FlowWordsClient::builder().config(load_config()?).build();
    tokio::spawn(render(client.subscribe_ui(), client.subscribe_scene()));
    client.start();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(line) = line else {
            break;
        };

        match line.trim() {
            "quit" | "exit" => break,
            "logout" => client.log_out(),
            username => {
                tokio::select! {
                    result = client.login(username) => match result {
                        Ok(success) => tracing::debug!(
                            username = %success.username,
                            address = %success.address,
                            "login finished"
                        ),
                        Err(FlowWordsError::Game(GameError::Session(err))) => {
                            println!("\n{err}");
                        }
                        // Already on the login panel.
                        Err(_) => println!(),
                    },
                    _ = tokio::signal::ctrl_c() => {
                        client.log_out();
                        println!("\nlogin cancelled");
                    }
                }
            }
        }
    }

    client.log_out();
    Ok(())
}
