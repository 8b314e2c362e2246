use std::sync::Arc;

use netcam::Notifier;

use crate::state::reducers::AppAction;
use crate::state::store::Store;

/// Routes completion messages into the control panel
///
/// Alerts become a popup the user has to dismiss. Every line also lands in the
/// console pane and in the log file.
pub struct PanelNotifier {
  store: Arc<Store>,
}

impl PanelNotifier {
  pub fn new(store: Arc<Store>) -> Self {
    Self { store }
  }
}

impl Notifier for PanelNotifier {
  fn alert(&self, message: &str) {
    log::warn!("{}", message);
    self.store.dispatch(AppAction::PushAlert(message.to_string()));
  }

  fn log(&self, message: &str) {
    log::info!("{}", message);
    self.store.dispatch(AppAction::AppendConsole(message.to_string()));
  }
}
