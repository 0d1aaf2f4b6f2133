// Request Logger - auth
// HTTP Basic authentication against the single configured credential pair.
// Every protected handler takes a `BasicAuth` argument; extraction fails
// with 401 + `WWW-Authenticate: Basic` before the handler body runs.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use subtle::ConstantTimeEq;

use crate::config::Config;
use crate::handlers::ApiError;
use crate::state::AppState;

pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Compare two byte strings without short-circuiting on the first
/// differing byte. Length mismatch is still observable.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}

/// Decode `Basic <base64(user:pass)>`. The password may contain `:`.
pub fn parse_basic(header: &str) -> Option<(String, String)> {
    let (scheme, encoded) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (user, pass) = decoded.split_once(':')?;
    Some((user.to_string(), pass.to_string()))
}

/// Check a submitted pair against the configured one. Both comparisons run
/// regardless of the first result. Returns the username on success.
pub fn verify_credentials(config: &Config, username: &str, password: &str) -> Result<String, ApiError> {
    let user_ok = constant_time_eq(username.as_bytes(), config.username.as_bytes());
    let pass_ok = constant_time_eq(password.as_bytes(), config.password.as_bytes());

    if user_ok & pass_ok {
        Ok(username.to_string())
    } else {
        tracing::warn!(username = %username, "Auth failed: invalid credentials");
        Err(ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()))
    }
}

/// Authenticated principal, extracted from the `Authorization` header.
#[derive(Debug, Clone)]
pub struct BasicAuth {
    pub username: String,
}

impl FromRequestParts<AppState> for BasicAuth {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let (username, password) = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_basic)
            .ok_or_else(|| {
                tracing::warn!("Auth failed: missing or malformed Authorization header");
                ApiError::Unauthorized(INVALID_CREDENTIALS.to_string())
            })?;

        let username = verify_credentials(&state.config, &username, &password)?;
        Ok(BasicAuth { username })
    }
}

/// Encode a `Basic` header value. Used by clients and tests.
pub fn basic_header(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{}:{}", username, password)))
}
