// ABOUTME: Structured fault returned by the platform when a call fails.
// ABOUTME: Carries the error code plus the optional auxiliary fields that qualify it.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// A structured platform fault.
///
/// The wire shape is `{"error": {"code": ..., ...}}` with camelCase field
/// names. Which auxiliary fields are present depends on the code, so every
/// one of them is optional. Empty strings count as absent.
///
/// Decoding is lenient: an auxiliary field of an unexpected type is treated
/// as absent instead of failing the whole fault, and the object as received
/// is kept in `raw`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiFault {
    /// HTTP status the fault arrived with, when it came over the wire.
    #[serde(skip)]
    pub status: Option<u16>,

    #[serde(default)]
    pub code: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domains: Option<Vec<String>>,

    /// Seconds until the caller may try again (rate limiting).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<u64>,

    /// The fault object exactly as the platform sent it.
    #[serde(skip)]
    pub raw: Option<Map<String, Value>>,
}

impl<'de> Deserialize<'de> for ApiFault {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Map::deserialize(deserializer)?;
        Ok(Self::from_wire(raw))
    }
}

/// Response envelope wrapping a fault.
#[derive(Debug, Deserialize)]
pub(crate) struct FaultEnvelope {
    pub error: ApiFault,
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

fn string_field(raw: &Map<String, Value>, key: &str) -> Option<String> {
    raw.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Whole seconds, rounded up; numeric strings are accepted.
fn seconds_field(raw: &Map<String, Value>, key: &str) -> Option<u64> {
    match raw.get(key)? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f.ceil() as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

impl ApiFault {
    /// Build a fault from the `error` object of a response body.
    pub fn from_wire(raw: Map<String, Value>) -> Self {
        let domains = raw.get("domains").and_then(Value::as_array).map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        });

        Self {
            status: None,
            code: string_field(&raw, "code").unwrap_or_default(),
            message: string_field(&raw, "message"),
            value: string_field(&raw, "value"),
            domain: string_field(&raw, "domain"),
            keyword: string_field(&raw, "keyword"),
            data_path: string_field(&raw, "dataPath"),
            params: raw.get("params").filter(|v| !v.is_null()).cloned(),
            domains,
            retry_after: seconds_field(&raw, "retryAfter"),
            raw: Some(raw),
        }
    }

    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            ..Default::default()
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    pub fn with_data_path(mut self, data_path: impl Into<String>) -> Self {
        self.data_path = Some(data_path.into());
        self
    }

    pub fn with_params(mut self, params: serde_json::Value) -> Self {
        self.params = Some(params);
        self
    }

    pub fn with_domains(mut self, domains: Vec<String>) -> Self {
        self.domains = Some(domains);
        self
    }

    pub fn with_retry_after(mut self, seconds: u64) -> Self {
        self.retry_after = Some(seconds);
        self
    }

    pub fn message(&self) -> Option<&str> {
        present(&self.message)
    }

    pub fn value(&self) -> Option<&str> {
        present(&self.value)
    }

    pub fn domain(&self) -> Option<&str> {
        present(&self.domain)
    }

    pub fn keyword(&self) -> Option<&str> {
        present(&self.keyword)
    }

    pub fn data_path(&self) -> Option<&str> {
        present(&self.data_path)
    }
}

impl ApiFault {
    /// Every field other than `code` and `message`, as received when the
    /// fault came over the wire.
    pub fn details(&self) -> Map<String, Value> {
        let mut details = match &self.raw {
            Some(raw) => raw.clone(),
            None => match serde_json::to_value(self) {
                Ok(Value::Object(map)) => map,
                _ => Map::new(),
            },
        };
        details.remove("code");
        details.remove("message");
        details
    }
}

impl fmt::Display for ApiFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.code.is_empty() {
            write!(f, "<no code>")?;
        } else {
            write!(f, "{}", self.code)?;
        }
        if let Some(message) = self.message() {
            write!(f, ": {message}")?;
        }
        if let Some(status) = self.status {
            write!(f, " (HTTP {status})")?;
        }
        let details = self.details();
        if !details.is_empty() {
            write!(f, " {}", Value::Object(details))?;
        }
        Ok(())
    }
}
