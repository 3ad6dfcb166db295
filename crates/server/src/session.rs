// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Signed-cookie sessions.
//!
//! The whole session lives in one cookie: the JSON-encoded [`Session`],
//! base64url encoded, followed by `.` and a hex HMAC-SHA256 of the encoded
//! payload. A cookie that fails verification reads as an empty session.

use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Response};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::warn;

use crate::state::AppState;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "intake_session";

/// Severity of a flash message, used as its CSS class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlashLevel {
    Success,
    Warning,
    Danger,
}

impl FlashLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlashLevel::Success => "success",
            FlashLevel::Warning => "warning",
            FlashLevel::Danger => "danger",
        }
    }
}

/// A one-shot notice shown on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

/// Per-browser session state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub authenticated: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flashes: Vec<Flash>,
}

impl Session {
    /// Queue a flash message for the next page.
    pub fn flash(&mut self, level: FlashLevel, message: impl Into<String>) {
        self.flashes.push(Flash {
            level,
            message: message.into(),
        });
    }

    /// Remove and return all pending flash messages.
    pub fn take_flashes(&mut self) -> Vec<Flash> {
        std::mem::take(&mut self.flashes)
    }

    /// Reset to the anonymous, empty session.
    pub fn clear(&mut self) {
        *self = Session::default();
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("malformed cookie")]
    Malformed,

    #[error("signature mismatch")]
    BadSignature,

    #[error("invalid encoding: {0}")]
    Encoding(#[from] base64::DecodeError),

    #[error("invalid payload: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Signs and verifies session cookies.
#[derive(Clone)]
pub struct SessionKey {
    key: Arc<[u8]>,
}

impl SessionKey {
    pub fn new(secret: &str) -> Self {
        SessionKey {
            key: Arc::from(secret.as_bytes()),
        }
    }

    /// Encode and sign a session into a cookie value.
    pub fn encode(&self, session: &Session) -> Result<String, SessionError> {
        let json = serde_json::to_vec(session)?;
        let payload = URL_SAFE_NO_PAD.encode(json);
        let signature = hex::encode(hmac_sha256(&self.key, payload.as_bytes()));
        Ok(format!("{payload}.{signature}"))
    }

    /// Verify and decode a cookie value.
    pub fn decode(&self, value: &str) -> Result<Session, SessionError> {
        let (payload, signature) = value.split_once('.').ok_or(SessionError::Malformed)?;
        let signature = hex::decode(signature).map_err(|_| SessionError::Malformed)?;
        let expected = hmac_sha256(&self.key, payload.as_bytes());
        if !constant_time_eq(&signature, &expected) {
            return Err(SessionError::BadSignature);
        }
        let json = URL_SAFE_NO_PAD.decode(payload)?;
        Ok(serde_json::from_slice(&json)?)
    }

    /// Read the session from request headers. Missing or invalid cookies
    /// yield an empty session.
    pub fn read(&self, headers: &HeaderMap) -> Session {
        let Some(value) = cookie_value(headers, SESSION_COOKIE) else {
            return Session::default();
        };
        match self.decode(value) {
            Ok(session) => session,
            Err(e) => {
                warn!("discarding session cookie: {e}");
                Session::default()
            }
        }
    }

    /// Build the `Set-Cookie` header for `session`. An empty session
    /// expires the cookie instead of storing it.
    pub fn set_cookie(&self, session: &Session) -> Result<HeaderValue, SessionError> {
        let cookie = if *session == Session::default() {
            format!("{SESSION_COOKIE}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax")
        } else {
            let value = self.encode(session)?;
            format!("{SESSION_COOKIE}={value}; Path=/; HttpOnly; SameSite=Lax")
        };
        HeaderValue::try_from(cookie).map_err(|_| SessionError::Malformed)
    }

    /// Attach the session cookie to a response.
    pub fn attach(&self, session: &Session, response: impl IntoResponse) -> Response {
        let mut response = response.into_response();
        match self.set_cookie(session) {
            Ok(header) => {
                response.headers_mut().append(SET_COOKIE, header);
            }
            Err(e) => warn!("failed to write session cookie: {e}"),
        }
        response
    }
}

#[axum::async_trait]
impl FromRequestParts<AppState> for Session {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(state.sessions.read(&parts.headers))
    }
}

/// Find a cookie by name across all `Cookie` headers.
fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}

pub(crate) fn hmac_sha256(key: &[u8], message: &[u8]) -> [u8; 32] {
    const BLOCK_SIZE: usize = 64;
    let mut key_block = [0u8; BLOCK_SIZE];
    if key.len() > BLOCK_SIZE {
        let hashed = Sha256::digest(key);
        key_block[..hashed.len()].copy_from_slice(&hashed);
    } else {
        key_block[..key.len()].copy_from_slice(key);
    }

    let mut inner = Sha256::new();
    inner.update(key_block.map(|b| b ^ 0x36));
    inner.update(message);
    let inner_hash = inner.finalize();

    let mut outer = Sha256::new();
    outer.update(key_block.map(|b| b ^ 0x5c));
    outer.update(inner_hash);
    outer.finalize().into()
}

pub(crate) fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |diff, (x, y)| diff | (x ^ y)) == 0
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
