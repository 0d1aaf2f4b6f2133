use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Persisted records
// ---------------------------------------------------------------------------

/// One captured request, written to `request_<ts>.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogRecord {
    pub timestamp: String,
    pub method: String,
    pub client_ip: String,
    pub username: String,
    pub headers: BTreeMap<String, String>,
    /// Parsed JSON body for POST, or a parse-error marker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_body: Option<Value>,
    /// Query string of a GET request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_params: Option<BTreeMap<String, String>>,
}

/// Minimal record of an unexpected failure, written to `error_<ts>.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorRecord {
    pub timestamp: String,
    pub error: String,
    pub method: String,
    pub path: String,
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureResponse {
    pub status: String,
    pub message: String,
    pub method: String,
    pub authenticated_user: String,
}

impl CaptureResponse {
    pub fn logged(file_name: &str, method: &str, user: &str) -> Self {
        Self {
            status: "success".to_string(),
            message: format!("Request logged successfully to {}", file_name),
            method: method.to_string(),
            authenticated_user: user.to_string(),
        }
    }
}
