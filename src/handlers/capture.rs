// ---------------------------------------------------------------------------
// handlers/capture.rs — GET/POST capture endpoint
// ---------------------------------------------------------------------------

use std::collections::BTreeMap;
use std::net::SocketAddr;

use axum::Json;
use axum::body::Bytes;
use axum::extract::{ConnectInfo, Query, State};
use axum::http::{HeaderMap, Method, Uri};
use chrono::{DateTime, Local};
use serde_json::{Value, json};

use crate::auth::BasicAuth;
use crate::files::{self, REQUEST_PREFIX};
use crate::models::{CaptureResponse, ErrorRecord, LogRecord};
use crate::state::AppState;

use super::ApiError;

/// Marker stored in `request_body` when a POST body is not valid JSON.
pub const INVALID_JSON_MARKER: &str = "Invalid JSON body";

/// Capture one authenticated request to `request_<ts>.json`.
///
/// Unexpected failures are recorded to `error_<ts>.json` (best effort) and
/// returned as 500; authentication failures pass through untouched.
pub async fn capture_request(
    auth: BasicAuth,
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<CaptureResponse>, ApiError> {
    match persist(&state, &auth, peer, &method, &uri, &headers, &body).await {
        Ok(response) => Ok(Json(response)),
        Err(e @ ApiError::Unauthorized(_)) => Err(e),
        Err(e) => {
            let at = Local::now();
            let record = ErrorRecord {
                timestamp: files::iso_timestamp(&at),
                error: e.detail().to_string(),
                method: method.to_string(),
                path: uri.path().to_string(),
            };
            files::write_error_record(&state.config.log_dir, &at, &record).await;
            Err(e)
        }
    }
}

async fn persist(
    state: &AppState,
    auth: &BasicAuth,
    peer: SocketAddr,
    method: &Method,
    uri: &Uri,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<CaptureResponse, ApiError> {
    let at = Local::now();
    let record = build_record(&at, method, peer, &auth.username, headers, uri, body)?;

    let path = files::write_record(&state.config.log_dir, REQUEST_PREFIX, &at, &record).await?;
    let file_name = files::base_name(&path);

    tracing::info!(
        method = %method,
        client_ip = %record.client_ip,
        user = %auth.username,
        file = %file_name,
        "request captured"
    );

    Ok(CaptureResponse::logged(&file_name, method.as_str(), &auth.username))
}

/// Assemble the record for one request. POST bodies are parsed as JSON;
/// every other method records its query string instead, when it has one.
pub fn build_record(
    at: &DateTime<Local>,
    method: &Method,
    peer: SocketAddr,
    username: &str,
    headers: &HeaderMap,
    uri: &Uri,
    body: &[u8],
) -> Result<LogRecord, ApiError> {
    let (request_body, query_params) = if method == Method::POST {
        (Some(parse_body(body)), None)
    } else if uri.query().is_some_and(|q| !q.is_empty()) {
        let Query(params) = Query::<BTreeMap<String, String>>::try_from_uri(uri)
            .map_err(|e| ApiError::Internal(format!("Cannot parse query string: {}", e)))?;
        (None, Some(params))
    } else {
        (None, None)
    };

    Ok(LogRecord {
        timestamp: files::iso_timestamp(at),
        method: method.to_string(),
        client_ip: peer.ip().to_string(),
        username: username.to_string(),
        headers: header_map(headers),
        request_body,
        query_params,
    })
}

fn parse_body(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap_or_else(|e| {
        tracing::debug!("request body is not JSON: {}", e);
        json!({
            "error": INVALID_JSON_MARKER,
            "raw_body": String::from_utf8_lossy(body),
        })
    })
}

/// Flatten headers to name -> value. Later duplicates overwrite earlier ones.
fn header_map(headers: &HeaderMap) -> BTreeMap<String, String> {
    headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect()
}
