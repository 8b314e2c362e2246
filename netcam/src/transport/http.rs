use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde_json::Value;

use crate::error::{NetcamError, Result, TransportFailure, TransportKind};
use crate::model::ServerResponse;

pub const JSON_CONTENT_TYPE: &str = "application/json;charset=UTF-8";

/// Posts JSON payloads to the media server and parses JSON replies
#[derive(Debug, Clone)]
pub struct JsonClient {
  http_client: reqwest::blocking::Client,
  base_url: String,
}

impl JsonClient {
  /// `timeout` of `None` lets a request wait for as long as the server takes
  pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
    let http_client = reqwest::blocking::Client::builder()
      .timeout(timeout)
      .build()
      .map_err(|e| NetcamError::Config(format!("failed to build HTTP client: {}", e)))?;

    Ok(Self {
      http_client,
      base_url: base_url.trim_end_matches('/').to_string(),
    })
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  pub fn url_for(&self, path: &str) -> String {
    format!("{}/{}", self.base_url, path.trim_start_matches('/'))
  }

  /// POST `payload` to `path`.
  ///
  /// Every failure before a JSON object is in hand comes back as a
  /// [`TransportFailure`]; the caller decides what the `status` field means.
  pub fn post(&self, path: &str, payload: &Value) -> std::result::Result<ServerResponse, TransportFailure> {
    let url = self.url_for(path);
    log::debug!("POST {} {}", url, payload);

    let response = self
      .http_client
      .post(&url)
      .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
      .header(ACCEPT, "application/json")
      .body(payload.to_string())
      .send()
      .map_err(Self::failure_from)?;

    let status = response.status();
    if !status.is_success() {
      let reason = status.canonical_reason().unwrap_or(status.as_str());
      return Err(TransportFailure::new(TransportKind::Error, reason));
    }

    let body = response.text().map_err(Self::failure_from)?;
    Self::parse_reply(&body)
  }

  fn parse_reply(body: &str) -> std::result::Result<ServerResponse, TransportFailure> {
    serde_json::from_str(body)
      .map_err(|e| TransportFailure::new(TransportKind::ParserError, e.to_string()))
  }

  fn failure_from(error: reqwest::Error) -> TransportFailure {
    if error.is_timeout() {
      TransportFailure::new(TransportKind::Timeout, error.to_string())
    } else {
      TransportFailure::new(TransportKind::Error, error.to_string())
    }
  }
}
