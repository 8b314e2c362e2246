use std::fmt;

/// How a request failed before a usable reply body was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
  /// Connection problems and non-2xx replies
  Error,
  /// Reply body was not the expected JSON object
  ParserError,
  Timeout,
}

impl TransportKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      TransportKind::Error => "error",
      TransportKind::ParserError => "parsererror",
      TransportKind::Timeout => "timeout",
    }
  }
}

impl fmt::Display for TransportKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A transport-level failure, displayed as `<kind:description>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportFailure {
  pub kind: TransportKind,
  pub description: String,
}

impl TransportFailure {
  pub fn new(kind: TransportKind, description: impl Into<String>) -> Self {
    Self {
      kind,
      description: description.into(),
    }
  }
}

impl fmt::Display for TransportFailure {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "<{}:{}>", self.kind, self.description)
  }
}

#[derive(Debug, thiserror::Error)]
pub enum NetcamError {
  #[error("Web server failed {0}")]
  Transport(TransportFailure),

  /// The server replied with a non-zero status, kept as the text it sent
  #[error("Media server failed with status {0}")]
  MediaServer(String),

  #[error("Configuration error: {0}")]
  Config(String),

  #[error("Emulator error: {0}")]
  Server(String),
}

impl From<TransportFailure> for NetcamError {
  fn from(failure: TransportFailure) -> Self {
    NetcamError::Transport(failure)
  }
}

pub type Result<T> = std::result::Result<T, NetcamError>;
