pub mod command;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod model;
pub mod notify;
pub mod server;
pub mod transport;

// Re-export key types for easier access
pub use command::{parse_value, Command};
pub use config::Config;
pub use dispatch::{handle_failure, handle_response, Dispatcher, Outcome, PendingRequest, RequestContext};
pub use error::{NetcamError, Result, TransportFailure, TransportKind};
pub use model::ServerResponse;
pub use notify::{LogNotifier, Notifier};
pub use server::{MediaServer, Scripted, StreamState};
pub use transport::JsonClient;
