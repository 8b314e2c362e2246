use serde_json::{json, Value};

/// Commands that can be sent to the media server
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
  /// Start streaming live video
  Play,
  /// Stop streaming
  Stop,
  /// Set the encoder bitrate. The value is passed through unchanged.
  SetBitrate(Value),
  /// Set the stream framerate in frames per second
  SetFramerate(Value),
  /// Query general server information
  GetInfo,
}

impl Command {
  /// Label used when formatting completion messages
  pub fn label(&self) -> &'static str {
    match self {
      Command::Play => "Play",
      Command::Stop => "Stop",
      Command::SetBitrate(_) => "SetBitrate",
      Command::SetFramerate(_) => "SetFramerate",
      Command::GetInfo => "GetInfo",
    }
  }

  pub fn path(&self) -> &'static str {
    match self {
      Command::Play => "/play",
      Command::Stop => "/stop",
      Command::SetBitrate(_) => "/set_bitrate",
      Command::SetFramerate(_) => "/set_framerate",
      Command::GetInfo => "/get_info",
    }
  }

  pub fn payload(&self) -> Value {
    match self {
      Command::Play | Command::Stop | Command::GetInfo => json!({}),
      Command::SetBitrate(bitrate) => json!({ "bitrate": bitrate }),
      Command::SetFramerate(fps) => json!({ "fps": fps }),
    }
  }

  /// Whether a reply must carry a `status` field. The info reply is a bare map.
  pub fn expects_status(&self) -> bool {
    !matches!(self, Command::GetInfo)
  }
}

/// Parse a user-typed argument as JSON, falling back to a JSON string.
///
/// `5000` becomes a number, `"fast"` and `fast` both become the string `fast`.
pub fn parse_value(input: &str) -> Value {
  let trimmed = input.trim();
  serde_json::from_str(trimmed).unwrap_or_else(|_| Value::String(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_command_paths_and_payloads() {
    assert_eq!(Command::Play.path(), "/play");
    assert_eq!(Command::Play.payload(), json!({}));

    assert_eq!(Command::Stop.path(), "/stop");
    assert_eq!(Command::Stop.payload(), json!({}));

    let command = Command::SetBitrate(json!(5000));
    assert_eq!(command.path(), "/set_bitrate");
    assert_eq!(command.payload().to_string(), r#"{"bitrate":5000}"#);

    let command = Command::SetFramerate(json!(30));
    assert_eq!(command.path(), "/set_framerate");
    assert_eq!(command.payload().to_string(), r#"{"fps":30}"#);
  }

  #[test]
  fn test_command_labels() {
    assert_eq!(Command::Play.label(), "Play");
    assert_eq!(Command::Stop.label(), "Stop");
    assert_eq!(Command::SetBitrate(Value::Null).label(), "SetBitrate");
    assert_eq!(Command::SetFramerate(Value::Null).label(), "SetFramerate");
    assert_eq!(Command::GetInfo.label(), "GetInfo");
  }

  #[test]
  fn test_bitrate_is_not_validated() {
    let command = Command::SetBitrate(json!("not a number"));
    assert_eq!(command.payload(), json!({ "bitrate": "not a number" }));

    let command = Command::SetBitrate(json!(-1));
    assert_eq!(command.payload(), json!({ "bitrate": -1 }));
  }

  #[test]
  fn test_parse_value() {
    assert_eq!(parse_value("5000"), json!(5000));
    assert_eq!(parse_value(" 2.5 "), json!(2.5));
    assert_eq!(parse_value("fast"), json!("fast"));
    assert_eq!(parse_value("\"fast\""), json!("fast"));
    assert_eq!(parse_value("null"), Value::Null);
  }

  #[test]
  fn test_only_info_skips_status() {
    assert!(Command::Play.expects_status());
    assert!(Command::SetBitrate(json!(1)).expects_status());
    assert!(!Command::GetInfo.expects_status());
  }
}
