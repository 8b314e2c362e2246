use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};

use serde_json::Value;
use uuid::Uuid;

use crate::command::Command;
use crate::error::{NetcamError, Result, TransportFailure, TransportKind};
use crate::model::{is_zero, status_text, ServerResponse};
use crate::notify::Notifier;
use crate::transport::JsonClient;

/// Per-request state carried from dispatch to completion
#[derive(Debug, Clone, PartialEq)]
pub struct RequestContext {
  pub id: Uuid,
  pub command: Command,
}

impl RequestContext {
  pub fn new(command: Command) -> Self {
    Self {
      id: Uuid::new_v4(),
      command,
    }
  }

  pub fn label(&self) -> &'static str {
    self.command.label()
  }
}

/// Routed result of a single request
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
  Success {
    context: RequestContext,
    response: ServerResponse,
  },
  MediaServerFailed {
    context: RequestContext,
    status: Value,
  },
  WebServerFailed {
    context: RequestContext,
    failure: TransportFailure,
  },
}

impl Outcome {
  pub fn context(&self) -> &RequestContext {
    match self {
      Outcome::Success { context, .. }
      | Outcome::MediaServerFailed { context, .. }
      | Outcome::WebServerFailed { context, .. } => context,
    }
  }

  pub fn label(&self) -> &'static str {
    self.context().label()
  }

  pub fn is_success(&self) -> bool {
    matches!(self, Outcome::Success { .. })
  }

  /// The line shown to the user, e.g. `Play: Media server failed with status 2`
  pub fn message(&self) -> String {
    match self {
      Outcome::Success { .. } => format!("{}: Media server success", self.label()),
      Outcome::MediaServerFailed { status, .. } => {
        format!("{}: {}", self.label(), NetcamError::MediaServer(status_text(status)))
      }
      Outcome::WebServerFailed { failure, .. } => {
        format!("{}: {}", self.label(), NetcamError::Transport(failure.clone()))
      }
    }
  }

  pub fn into_result(self) -> Result<ServerResponse> {
    match self {
      Outcome::Success { response, .. } => Ok(response),
      Outcome::MediaServerFailed { status, .. } => Err(NetcamError::MediaServer(status_text(&status))),
      Outcome::WebServerFailed { failure, .. } => Err(NetcamError::Transport(failure)),
    }
  }
}

/// Success handler: a reply body was parsed.
pub fn handle_response(
  context: RequestContext,
  response: ServerResponse,
  notifier: &dyn Notifier,
) -> Outcome {
  let status = response.status.clone();
  let outcome = match status {
    Some(status) if is_zero(&status) => Outcome::Success { context, response },
    Some(status) => Outcome::MediaServerFailed { context, status },
    None if !context.command.expects_status() => Outcome::Success { context, response },
    None => Outcome::WebServerFailed {
      context,
      failure: TransportFailure::new(TransportKind::ParserError, "reply has no status field"),
    },
  };

  report(&outcome, notifier);
  outcome
}

/// Error handler: the request failed before a usable reply arrived.
pub fn handle_failure(
  context: RequestContext,
  failure: TransportFailure,
  notifier: &dyn Notifier,
) -> Outcome {
  let outcome = Outcome::WebServerFailed { context, failure };
  report(&outcome, notifier);
  outcome
}

fn report(outcome: &Outcome, notifier: &dyn Notifier) {
  let message = outcome.message();
  if !outcome.is_success() {
    notifier.alert(&message);
  }
  notifier.log(&message);
}

fn complete(client: &JsonClient, context: RequestContext, notifier: &dyn Notifier) -> Outcome {
  let payload = context.command.payload();
  match client.post(context.command.path(), &payload) {
    Ok(response) => handle_response(context, response, notifier),
    Err(failure) => handle_failure(context, failure, notifier),
  }
}

enum Pending {
  Running(JoinHandle<Outcome>),
  Done(Outcome),
}

/// Handle to a request running in the background
///
/// Dropping the handle detaches the request; it still completes and notifies.
pub struct PendingRequest {
  context: RequestContext,
  pending: Pending,
}

impl PendingRequest {
  pub fn context(&self) -> &RequestContext {
    &self.context
  }

  pub fn is_finished(&self) -> bool {
    match &self.pending {
      Pending::Running(handle) => handle.is_finished(),
      Pending::Done(_) => true,
    }
  }

  /// Block until the request completes
  pub fn wait(self) -> Outcome {
    match self.pending {
      Pending::Done(outcome) => outcome,
      Pending::Running(handle) => handle.join().unwrap_or_else(|_| Outcome::WebServerFailed {
        context: self.context,
        failure: TransportFailure::new(TransportKind::Error, "request worker panicked"),
      }),
    }
  }
}

/// Issues commands to the media server and routes completions to a notifier
#[derive(Clone)]
pub struct Dispatcher {
  client: JsonClient,
  notifier: Arc<dyn Notifier>,
  last_request: Arc<Mutex<Option<&'static str>>>,
}

impl Dispatcher {
  pub fn new(client: JsonClient, notifier: Arc<dyn Notifier>) -> Self {
    Self {
      client,
      notifier,
      last_request: Arc::new(Mutex::new(None)),
    }
  }

  pub fn client(&self) -> &JsonClient {
    &self.client
  }

  /// Label of the most recently issued command, for display only
  pub fn last_request(&self) -> Option<&'static str> {
    *self.last_request.lock().unwrap_or_else(PoisonError::into_inner)
  }

  pub fn play(&self) -> PendingRequest {
    self.dispatch(Command::Play)
  }

  pub fn stop(&self) -> PendingRequest {
    self.dispatch(Command::Stop)
  }

  pub fn set_bitrate(&self, bitrate: impl Into<Value>) -> PendingRequest {
    self.dispatch(Command::SetBitrate(bitrate.into()))
  }

  pub fn set_framerate(&self, fps: impl Into<Value>) -> PendingRequest {
    self.dispatch(Command::SetFramerate(fps.into()))
  }

  pub fn get_info(&self) -> PendingRequest {
    self.dispatch(Command::GetInfo)
  }

  /// Fire-and-forget: the request runs on its own worker thread
  pub fn dispatch(&self, command: Command) -> PendingRequest {
    let context = self.begin(command);
    let worker_context = context.clone();
    let client = self.client.clone();
    let notifier = Arc::clone(&self.notifier);

    let spawned = thread::Builder::new()
      .name(format!("netcam-{}", context.label()))
      .spawn(move || complete(&client, worker_context, notifier.as_ref()));

    let pending = match spawned {
      Ok(handle) => Pending::Running(handle),
      Err(e) => {
        log::error!("Failed to spawn request worker: {}", e);
        let failure = TransportFailure::new(TransportKind::Error, e.to_string());
        Pending::Done(handle_failure(context.clone(), failure, self.notifier.as_ref()))
      }
    };

    PendingRequest { context, pending }
  }

  /// Run a command on the calling thread and return its outcome
  pub fn send(&self, command: Command) -> Outcome {
    let context = self.begin(command);
    complete(&self.client, context, self.notifier.as_ref())
  }

  fn begin(&self, command: Command) -> RequestContext {
    let context = RequestContext::new(command);
    *self.last_request.lock().unwrap_or_else(PoisonError::into_inner) = Some(context.label());
    log::debug!(
      "{} request {} -> {}",
      context.label(),
      context.id,
      self.client.url_for(context.command.path())
    );
    context
  }
}
