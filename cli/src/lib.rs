pub mod app;
pub mod args;
pub mod error;
pub mod logging;
pub mod notifier;
pub mod oneshot;
pub mod state;
pub mod views;
pub mod widgets;
