use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use super::reducers::{self, AppAction};

/// Lines kept in the console pane
pub const CONSOLE_CAPACITY: usize = 200;

/// Which value the input field is collecting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
  Bitrate,
  Framerate,
}

impl InputKind {
  pub fn title(&self) -> &'static str {
    match self {
      InputKind::Bitrate => "Bitrate",
      InputKind::Framerate => "Framerate (fps)",
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputField {
  pub kind: InputKind,
  pub text: String,
}

pub struct AppState {
  pub server_url: String,
  pub last_request: Option<&'static str>,
  pub input: Option<InputField>,
  /// Pending alerts, oldest first. Only the front one is shown.
  pub alerts: VecDeque<String>,
  pub console: VecDeque<String>,
}

impl Default for AppState {
  fn default() -> Self {
    Self {
      server_url: String::new(),
      last_request: None,
      input: None,
      alerts: VecDeque::new(),
      console: VecDeque::new(),
    }
  }
}

impl AppState {
  pub fn current_alert(&self) -> Option<&str> {
    self.alerts.front().map(String::as_str)
  }

  pub fn is_editing(&self) -> bool {
    self.input.is_some()
  }
}

pub struct Store {
  state: Arc<Mutex<AppState>>,
}

impl Store {
  pub fn new() -> Self {
    Self {
      state: Arc::new(Mutex::new(AppState::default())),
    }
  }

  pub fn with_server_url(server_url: impl Into<String>) -> Self {
    let store = Self::new();
    store.dispatch(AppAction::SetServerUrl(server_url.into()));
    store
  }

  pub fn dispatch(&self, action: AppAction) {
    let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
    reducers::app_reducer(&mut state, action);
  }

  pub fn with_state<F, T>(&self, f: F) -> T
  where
    F: FnOnce(&AppState) -> T
  {
    let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
    f(&state)
  }
}

impl Default for Store {
  fn default() -> Self {
    Self::new()
  }
}
