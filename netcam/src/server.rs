//! In-process stand-in for the camera media server
//!
//! Speaks the same JSON API as the real server and keeps the stream state in
//! memory. Replies can be scripted per path so tests can drive every failure
//! branch of the client.

use std::collections::{HashMap, VecDeque};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::{mpsc as std_mpsc, Arc, PoisonError, RwLock};
use std::thread::JoinHandle;
use std::time::Duration;

use bytes::Bytes;
use serde_json::{json, Map, Value};
use tokio::sync::oneshot;
use warp::http::StatusCode;
use warp::reply::Response;
use warp::{Filter, Reply};

use crate::error::{NetcamError, Result};
use crate::model::ServerResponse;

/// Most recent requests kept for [`MediaServer::requests`]
pub const REQUEST_LOG_CAPACITY: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
  Paused,
  Playing,
}

/// Canned reply for one path, taking precedence over the normal handling
#[derive(Debug, Clone, PartialEq)]
pub enum Scripted {
  /// Reply `{"status": value}` without touching the stream
  Status(Value),
  /// Reply with this HTTP status code and its reason phrase as body
  HttpError(u16),
  /// Reply 200 with a body that is not JSON
  Garbage(String),
  /// Hold the reply this long, then answer normally
  Delay(Duration),
}

/// A request as the emulator received it
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
  pub path: String,
  pub content_type: Option<String>,
  pub body: String,
}

impl RecordedRequest {
  pub fn json(&self) -> Option<Value> {
    serde_json::from_str(&self.body).ok()
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StreamSnapshot {
  pub state: StreamState,
  pub bitrate: Option<Value>,
  pub framerate: Option<Value>,
}

#[derive(Debug)]
struct EmulatorState {
  stream: StreamSnapshot,
  info: Map<String, Value>,
  scripts: HashMap<String, Scripted>,
  requests: VecDeque<RecordedRequest>,
}

impl EmulatorState {
  fn new() -> Self {
    let mut info = Map::new();
    info.insert("mach".to_string(), json!(std::env::consts::ARCH));
    info.insert("hostname".to_string(), json!("netcam-emulator"));

    Self {
      stream: StreamSnapshot {
        state: StreamState::Paused,
        bitrate: None,
        framerate: None,
      },
      info,
      scripts: HashMap::new(),
      requests: VecDeque::new(),
    }
  }

  fn record(&mut self, request: RecordedRequest) {
    if self.requests.len() == REQUEST_LOG_CAPACITY {
      self.requests.pop_front();
    }
    self.requests.push_back(request);
  }

  fn handle(&mut self, action: &str, params: &Map<String, Value>) -> Option<Response> {
    let reply = match action {
      "play" => {
        self.stream.state = StreamState::Playing;
        ServerResponse::with_status(0)
      }
      "stop" => {
        self.stream.state = StreamState::Paused;
        ServerResponse::with_status(0)
      }
      "set_bitrate" => ServerResponse::with_status(store_param(params, "bitrate", &mut self.stream.bitrate)),
      "set_framerate" => ServerResponse::with_status(store_param(params, "fps", &mut self.stream.framerate)),
      "get_info" => ServerResponse {
        status: None,
        fields: self.info.clone(),
      },
      _ => return None,
    };
    Some(warp::reply::json(&reply).into_response())
  }
}

fn store_param(params: &Map<String, Value>, key: &str, slot: &mut Option<Value>) -> i64 {
  match params.get(key) {
    None | Some(Value::Null) => {
      log::error!("Missing {} parameter", key);
      -1
    }
    Some(value) => {
      *slot = Some(value.clone());
      0
    }
  }
}

/// Canned response for `script`, or `None` when the request is answered normally
fn scripted_reply(script: &Scripted) -> Option<Response> {
  let response = match script {
    Scripted::Status(status) => warp::reply::json(&ServerResponse::with_status(status.clone())).into_response(),
    Scripted::HttpError(code) => {
      let status = StatusCode::from_u16(*code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
      let reason = status.canonical_reason().unwrap_or("Error");
      warp::reply::with_status(reason.to_string(), status).into_response()
    }
    Scripted::Garbage(body) => warp::reply::html(body.clone()).into_response(),
    Scripted::Delay(_) => return None,
  };
  Some(response)
}

fn not_found() -> Response {
  warp::reply::with_status("Not Found", StatusCode::NOT_FOUND).into_response()
}

async fn handle_request(
  action: String,
  content_type: Option<String>,
  body: Bytes,
  state: Arc<RwLock<EmulatorState>>,
) -> std::result::Result<Response, Infallible> {
  let path = format!("/{}", action);
  let body = String::from_utf8_lossy(&body).into_owned();
  log::debug!("Emulator received {} {}", path, body);

  let params = match serde_json::from_str::<Value>(&body) {
    Ok(Value::Object(params)) => params,
    _ => {
      log::error!("Could not decode JSON encoded data: {}", body);
      Map::new()
    }
  };

  let delay = {
    let mut state = state.write().unwrap_or_else(PoisonError::into_inner);
    state.record(RecordedRequest {
      path: path.clone(),
      content_type,
      body,
    });

    let script = state.scripts.get(&path).cloned();
    match script {
      Some(Scripted::Delay(delay)) => Some(delay),
      Some(script) => return Ok(scripted_reply(&script).unwrap_or_else(not_found)),
      None => None,
    }
  };

  if let Some(delay) = delay {
    log::debug!("Emulator holding {} for {:?}", path, delay);
    tokio::time::sleep(delay).await;
  }

  let mut state = state.write().unwrap_or_else(PoisonError::into_inner);
  Ok(state.handle(&action, &params).unwrap_or_else(not_found))
}

/// HTTP server emulating the media server API on its own thread
pub struct MediaServer {
  server_handle: Option<JoinHandle<()>>,
  addr: SocketAddr,
  state: Arc<RwLock<EmulatorState>>,
  shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MediaServer {
  /// Start on an ephemeral port on the loopback interface
  pub fn start() -> Result<Self> {
    Self::start_on(SocketAddr::from(([127, 0, 0, 1], 0)))
  }

  pub fn start_on(addr: SocketAddr) -> Result<Self> {
    let state = Arc::new(RwLock::new(EmulatorState::new()));
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let (ready_tx, ready_rx) = std_mpsc::channel::<Result<SocketAddr>>();
    let server_state = Arc::clone(&state);

    let server_handle = std::thread::Builder::new()
      .name("netcam-emulator".to_string())
      .spawn(move || {
        let rt = match tokio::runtime::Runtime::new() {
          Ok(rt) => rt,
          Err(e) => {
            let _ = ready_tx.send(Err(NetcamError::Server(e.to_string())));
            return;
          }
        };

        rt.block_on(async move {
          let with_state = warp::any().map(move || Arc::clone(&server_state));

          let routes = warp::post()
            .and(warp::path::param::<String>())
            .and(warp::path::end())
            .and(warp::header::optional::<String>("content-type"))
            .and(warp::body::bytes())
            .and(with_state)
            .and_then(handle_request);

          let bound = warp::serve(routes).try_bind_with_graceful_shutdown(addr, async move {
            let _ = shutdown_rx.await;
          });

          match bound {
            Ok((bound_addr, server)) => {
              let _ = ready_tx.send(Ok(bound_addr));
              server.await;
            }
            Err(e) => {
              let _ = ready_tx.send(Err(NetcamError::Server(e.to_string())));
            }
          }
        });
      })
      .map_err(|e| NetcamError::Server(e.to_string()))?;

    let addr = ready_rx
      .recv()
      .map_err(|_| NetcamError::Server("emulator thread exited during startup".to_string()))??;

    log::info!("Media server emulator listening on {}", addr);

    Ok(Self {
      server_handle: Some(server_handle),
      addr,
      state,
      shutdown_tx: Some(shutdown_tx),
    })
  }

  pub fn addr(&self) -> SocketAddr {
    self.addr
  }

  pub fn base_url(&self) -> String {
    format!("http://{}", self.addr)
  }

  pub fn is_running(&self) -> bool {
    self
      .server_handle
      .as_ref()
      .map(|handle| !handle.is_finished())
      .unwrap_or(false)
  }

  /// Answer requests to `path` (e.g. `/play`) with `script` until cleared
  pub fn script(&self, path: &str, script: Scripted) {
    self.write().scripts.insert(path.to_string(), script);
  }

  pub fn clear_script(&self, path: &str) {
    self.write().scripts.remove(path);
  }

  pub fn set_info(&self, key: &str, value: Value) {
    self.write().info.insert(key.to_string(), value);
  }

  pub fn snapshot(&self) -> StreamSnapshot {
    self.read().stream.clone()
  }

  pub fn requests(&self) -> Vec<RecordedRequest> {
    self.read().requests.iter().cloned().collect()
  }

  pub fn shutdown(&mut self) -> Result<()> {
    if let Some(shutdown_tx) = self.shutdown_tx.take() {
      let _ = shutdown_tx.send(());
    }

    if let Some(handle) = self.server_handle.take() {
      handle
        .join()
        .map_err(|_| NetcamError::Server("failed to join emulator thread".to_string()))?;
    }

    Ok(())
  }

  fn read(&self) -> std::sync::RwLockReadGuard<'_, EmulatorState> {
    self.state.read().unwrap_or_else(PoisonError::into_inner)
  }

  fn write(&self) -> std::sync::RwLockWriteGuard<'_, EmulatorState> {
    self.state.write().unwrap_or_else(PoisonError::into_inner)
  }
}

impl Drop for MediaServer {
  fn drop(&mut self) {
    if let Err(e) = self.shutdown() {
      log::warn!("{}", e);
    }
  }
}
