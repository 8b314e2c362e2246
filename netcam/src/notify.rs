/// Where completion messages go
///
/// `alert` is for messages the user must see (failures). `log` receives the
/// diagnostic line for every completion, successful or not.
pub trait Notifier: Send + Sync {
  fn alert(&self, message: &str);
  fn log(&self, message: &str);
}

/// Sends both alerts and log lines to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
  fn alert(&self, message: &str) {
    log::warn!("{}", message);
  }

  fn log(&self, message: &str) {
    log::info!("{}", message);
  }
}
