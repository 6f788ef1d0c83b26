use std::collections::BTreeMap;

use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
}

impl ResponseBody {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ResponseBody::Json(value) => Some(value),
            ResponseBody::Text(_) => None,
        }
    }

    /// Pretty-printed JSON, or the raw text when the body did not parse.
    pub fn render(&self) -> String {
        match self {
            ResponseBody::Json(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
            ResponseBody::Text(text) => text.clone(),
        }
    }
}

/// Exactly one of `status_code` and `error` is set.
#[derive(Debug, Clone)]
pub struct ProbeResult {
    pub url: String,
    pub method: String,
    pub status_code: Option<u16>,
    pub success: bool,
    pub elapsed_seconds: f64,
    pub headers: BTreeMap<String, String>,
    pub body: ResponseBody,
    pub error: Option<String>,
}

impl ProbeResult {
    pub fn from_response(
        url: String,
        method: String,
        status_code: u16,
        elapsed_seconds: f64,
        headers: BTreeMap<String, String>,
        body: ResponseBody,
    ) -> Self {
        Self {
            url,
            method,
            status_code: Some(status_code),
            success: status_code < 400,
            elapsed_seconds,
            headers,
            body,
            error: None,
        }
    }

    pub fn from_error(url: String, method: String, elapsed_seconds: f64, error: String) -> Self {
        Self {
            url,
            method,
            status_code: None,
            success: false,
            elapsed_seconds,
            headers: BTreeMap::new(),
            body: ResponseBody::Text(String::new()),
            error: Some(error),
        }
    }

    pub fn json(&self) -> Option<&Value> {
        self.body.as_json()
    }
}
