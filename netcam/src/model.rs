use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Reply body from the media server
///
/// A numeric `status` of zero means success; any other value, `null`
/// included, is a failure reported by the media server. Any other field the
/// server sends is kept in `fields`; the info reply carries no `status` at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerResponse {
  #[serde(
    default,
    deserialize_with = "present",
    skip_serializing_if = "Option::is_none"
  )]
  pub status: Option<Value>,
  #[serde(flatten)]
  pub fields: Map<String, Value>,
}

/// Keeps an explicit `"status": null` apart from a missing field
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
  D: Deserializer<'de>,
{
  Value::deserialize(deserializer).map(Some)
}

impl ServerResponse {
  pub fn with_status(status: impl Into<Value>) -> Self {
    Self {
      status: Some(status.into()),
      fields: Map::new(),
    }
  }

  pub fn is_success(&self) -> bool {
    self.status.as_ref().is_some_and(is_zero)
  }
}

pub(crate) fn is_zero(status: &Value) -> bool {
  status.as_f64() == Some(0.0)
}

/// Status as shown to the user: strings unquoted, everything else as JSON
pub fn status_text(status: &Value) -> String {
  match status {
    Value::String(text) => text.clone(),
    other => other.to_string(),
  }
}
