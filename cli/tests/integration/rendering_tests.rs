use std::sync::Arc;

use cli::notifier::PanelNotifier;
use cli::state::reducers::AppAction;
use cli::state::store::{InputKind, Store};
use cli::views::control::ControlView;
use cli::views::View;
use netcam::{Dispatcher, JsonClient};
use ratatui::{backend::TestBackend, Terminal};

fn view_with_store() -> (Arc<Store>, ControlView) {
    let store = Arc::new(Store::with_server_url("http://dm365.local"));
    let client = JsonClient::new("http://dm365.local", None).unwrap();
    let dispatcher = Dispatcher::new(client, Arc::new(PanelNotifier::new(Arc::clone(&store))));
    let view = ControlView::new(Arc::clone(&store), dispatcher);
    (store, view)
}

fn screen(view: &mut ControlView) -> String {
    let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
    terminal.draw(|frame| view.render(frame)).unwrap();
    terminal
        .backend()
        .buffer()
        .content
        .iter()
        .map(|cell| cell.symbol())
        .collect()
}

#[test]
fn test_panel_shows_server_and_keys() {
    let (_store, mut view) = view_with_store();

    let text = screen(&mut view);

    assert!(text.contains("NetCam"));
    assert!(text.contains("Server: http://dm365.local"));
    assert!(text.contains("Last request: -"));
    assert!(text.contains("[p] Play"));
    assert!(text.contains("[b] Set bitrate"));
    assert!(text.contains("Console"));
}

#[test]
fn test_panel_shows_console_and_last_request() {
    let (store, mut view) = view_with_store();
    store.dispatch(AppAction::SetLastRequest("Stop"));
    store.dispatch(AppAction::AppendConsole("Stop: Media server success".to_string()));

    let text = screen(&mut view);

    assert!(text.contains("Last request: Stop"));
    assert!(text.contains("Stop: Media server success"));
}

#[test]
fn test_panel_shows_input_field() {
    let (store, mut view) = view_with_store();
    store.dispatch(AppAction::BeginInput(InputKind::Bitrate));
    store.dispatch(AppAction::InputChar('9'));

    let text = screen(&mut view);

    assert!(text.contains("Bitrate: 9_"));
    assert!(text.contains("[Esc] cancel"));
}

#[test]
fn test_alert_popup_is_drawn() {
    let (store, mut view) = view_with_store();
    store.dispatch(AppAction::PushAlert("Play: Media server failed with status 2".to_string()));

    let text = screen(&mut view);

    assert!(text.contains("Alert"));
    assert!(text.contains("Play: Media server failed with status 2"));
    assert!(text.contains("[Enter] OK"));
}
