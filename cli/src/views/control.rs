use std::io;
use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
  layout::{Constraint, Direction, Layout, Rect},
  style::Stylize,
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
  Frame,
};

use netcam::{parse_value, Command, Dispatcher};

use crate::state::reducers::AppAction;
use crate::state::store::{AppState, InputKind, Store};
use crate::widgets::{alert, console};

use super::View;

const KEY_HELP: [(&str, &str); 6] = [
  ("p", "Play"),
  ("s", "Stop"),
  ("b", "Set bitrate"),
  ("f", "Set framerate"),
  ("i", "Info"),
  ("q", "Quit"),
];

/// The control panel: command keys, console pane and alert popup
pub struct ControlView {
  store: Arc<Store>,
  dispatcher: Dispatcher,
}

impl ControlView {
  pub fn new(store: Arc<Store>, dispatcher: Dispatcher) -> Self {
    Self { store, dispatcher }
  }

  /// Record the label, then fire the request without waiting for it
  fn issue(&self, command: Command, store: &Store) {
    store.dispatch(AppAction::SetLastRequest(command.label()));
    let _ = self.dispatcher.dispatch(command);
  }

  fn submit_input(&self, store: &Store) {
    let input = store.with_state(|state| state.input.clone());
    store.dispatch(AppAction::FinishInput);

    if let Some(input) = input {
      let value = parse_value(&input.text);
      let command = match input.kind {
        InputKind::Bitrate => Command::SetBitrate(value),
        InputKind::Framerate => Command::SetFramerate(value),
      };
      self.issue(command, store);
    }
  }

  fn header(state: &AppState) -> Paragraph<'static> {
    let line = Line::from(vec![
      Span::raw("Server: "),
      Span::raw(state.server_url.clone()).bold(),
      Span::raw("   Last request: "),
      Span::raw(state.last_request.unwrap_or("-")).bold(),
    ]);

    Paragraph::new(line).block(Block::default().title(" NetCam ").borders(Borders::ALL))
  }

  fn controls(state: &AppState) -> Paragraph<'static> {
    let line = match &state.input {
      Some(input) => Line::from(vec![
        Span::raw(format!("{}: ", input.kind.title())),
        Span::raw(format!("{}_", input.text)).bold(),
        Span::raw("   [Enter] send  [Esc] cancel"),
      ]),
      None => {
        let spans: Vec<Span> = KEY_HELP
          .iter()
          .flat_map(|(key, name)| [Span::raw(format!("[{}] ", key)).bold(), Span::raw(format!("{}  ", name))])
          .collect();
        Line::from(spans)
      }
    };

    Paragraph::new(line).block(Block::default().borders(Borders::ALL))
  }

  fn layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
      .direction(Direction::Vertical)
      .constraints([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Min(0),
      ])
      .split(area);

    (chunks[0], chunks[1], chunks[2])
  }
}

impl View for ControlView {
  fn render(&mut self, frame: &mut Frame) {
    let area = frame.area();
    let (header_area, controls_area, console_area) = Self::layout(area);

    self.store.with_state(|state| {
      frame.render_widget(Self::header(state), header_area);
      frame.render_widget(Self::controls(state), controls_area);
      console::draw(frame, console_area, &state.console);

      if let Some(message) = state.current_alert() {
        alert::draw(frame, area, message);
      }
    });
  }

  fn handle_input(&mut self, key_event: KeyEvent, store: &Store) -> io::Result<()> {
    let (alert_shown, editing) = store.with_state(|state| (state.current_alert().is_some(), state.is_editing()));

    // an open alert blocks everything else until dismissed
    if alert_shown {
      if matches!(key_event.code, KeyCode::Enter | KeyCode::Esc) {
        store.dispatch(AppAction::DismissAlert);
      }
      return Ok(());
    }

    if editing {
      match key_event.code {
        KeyCode::Char(c) => store.dispatch(AppAction::InputChar(c)),
        KeyCode::Backspace => store.dispatch(AppAction::InputBackspace),
        KeyCode::Esc => store.dispatch(AppAction::CancelInput),
        KeyCode::Enter => self.submit_input(store),
        _ => {}
      }
      return Ok(());
    }

    match key_event.code {
      KeyCode::Char('p') => self.issue(Command::Play, store),
      KeyCode::Char('s') => self.issue(Command::Stop, store),
      KeyCode::Char('i') => self.issue(Command::GetInfo, store),
      KeyCode::Char('b') => store.dispatch(AppAction::BeginInput(InputKind::Bitrate)),
      KeyCode::Char('f') => store.dispatch(AppAction::BeginInput(InputKind::Framerate)),
      _ => {}
    }
    Ok(())
  }
}
