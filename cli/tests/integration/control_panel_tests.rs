//! Drive the control panel with key events against the media server emulator

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use cli::app::App;
use cli::notifier::PanelNotifier;
use cli::state::store::{InputKind, Store};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use netcam::{Dispatcher, JsonClient, MediaServer, Scripted, StreamState};
use serde_json::json;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn panel_for(base_url: &str) -> (Arc<Store>, App) {
    let store = Arc::new(Store::with_server_url(base_url));
    let client = JsonClient::new(base_url, None).unwrap();
    let dispatcher = Dispatcher::new(client, Arc::new(PanelNotifier::new(Arc::clone(&store))));
    let app = App::new(Arc::clone(&store), dispatcher);
    (store, app)
}

/// Poll until `check` holds; completions arrive from worker threads
fn wait_until<F>(store: &Store, check: F) -> bool
where
    F: Fn(&cli::state::store::AppState) -> bool,
{
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if store.with_state(&check) {
            return true;
        }
        thread::sleep(Duration::from_millis(20));
    }
    false
}

fn console_contains(store: &Store, line: &str) -> bool {
    wait_until(store, |state| state.console.iter().any(|l| l == line))
}

#[test]
fn test_play_key_logs_success() {
    let server = MediaServer::start().unwrap();
    let (store, mut app) = panel_for(&server.base_url());

    app.handle_key(key(KeyCode::Char('p'))).unwrap();
    assert_eq!(store.with_state(|state| state.last_request), Some("Play"));

    assert!(console_contains(&store, "Play: Media server success"));
    assert_eq!(store.with_state(|state| state.current_alert().map(String::from)), None);
    assert_eq!(server.snapshot().state, StreamState::Playing);
}

#[test]
fn test_failure_raises_blocking_alert() {
    let server = MediaServer::start().unwrap();
    server.script("/stop", Scripted::Status(json!(2)));
    let (store, mut app) = panel_for(&server.base_url());

    app.handle_key(key(KeyCode::Char('s'))).unwrap();
    assert!(wait_until(&store, |state| {
        state.current_alert() == Some("Stop: Media server failed with status 2")
    }));
    assert!(console_contains(&store, "Stop: Media server failed with status 2"));

    // other keys do nothing while the alert is open
    app.handle_key(key(KeyCode::Char('q'))).unwrap();
    app.handle_key(key(KeyCode::Char('p'))).unwrap();
    assert!(!app.is_exiting());
    assert_eq!(server.requests().len(), 1);

    app.handle_key(key(KeyCode::Enter)).unwrap();
    assert_eq!(store.with_state(|state| state.current_alert().map(String::from)), None);

    app.handle_key(key(KeyCode::Char('q'))).unwrap();
    assert!(app.is_exiting());
}

#[test]
fn test_bitrate_input_is_sent_as_number() {
    let server = MediaServer::start().unwrap();
    let (store, mut app) = panel_for(&server.base_url());

    app.handle_key(key(KeyCode::Char('b'))).unwrap();
    assert_eq!(
        store.with_state(|state| state.input.as_ref().map(|input| input.kind)),
        Some(InputKind::Bitrate)
    );

    for c in "5000".chars() {
        app.handle_key(key(KeyCode::Char(c))).unwrap();
    }
    app.handle_key(key(KeyCode::Enter)).unwrap();

    assert!(!store.with_state(|state| state.is_editing()));
    assert_eq!(store.with_state(|state| state.last_request), Some("SetBitrate"));
    assert!(console_contains(&store, "SetBitrate: Media server success"));
    assert_eq!(server.requests()[0].body, r#"{"bitrate":5000}"#);
    assert_eq!(server.snapshot().bitrate, Some(json!(5000)));
}

#[test]
fn test_framerate_input_can_be_cancelled() {
    let server = MediaServer::start().unwrap();
    let (store, mut app) = panel_for(&server.base_url());

    app.handle_key(key(KeyCode::Char('f'))).unwrap();
    app.handle_key(key(KeyCode::Char('q'))).unwrap();
    assert!(!app.is_exiting());
    assert_eq!(
        store.with_state(|state| state.input.as_ref().map(|input| input.text.clone())),
        Some("q".to_string())
    );

    app.handle_key(key(KeyCode::Esc)).unwrap();

    assert!(!store.with_state(|state| state.is_editing()));
    assert_eq!(store.with_state(|state| state.last_request), None);
    assert!(server.requests().is_empty());
}

#[test]
fn test_unreachable_server_alerts_web_failure() {
    let mut server = MediaServer::start().unwrap();
    let base_url = server.base_url();
    server.shutdown().unwrap();
    let (store, mut app) = panel_for(&base_url);

    app.handle_key(key(KeyCode::Char('i'))).unwrap();

    assert!(wait_until(&store, |state| {
        state
            .current_alert()
            .map(|message| message.starts_with("GetInfo: Web server failed <error:"))
            .unwrap_or(false)
    }));
}
