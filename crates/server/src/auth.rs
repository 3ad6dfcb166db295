// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The admin login gate.
//!
//! A session is either anonymous or authenticated. [`Admin`] is the extractor
//! every admin route takes; for an anonymous session it short-circuits with a
//! redirect to the login page carrying the original target as `next`.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::Method;
use axum::response::Redirect;
use tracing::debug;

use crate::config::Config;
use crate::session::{constant_time_eq, Session};
use crate::state::AppState;

/// Where a successful login lands when no usable `next` was captured.
pub const DEFAULT_LANDING: &str = "/admin";

/// Proof of an authenticated session, carrying that session.
pub struct Admin(pub Session);

#[axum::async_trait]
impl FromRequestParts<AppState> for Admin {
    type Rejection = Redirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = state.sessions.read(&parts.headers);
        if session.authenticated {
            return Ok(Admin(session));
        }

        // Only GET targets can be resumed by a redirect.
        let next = if parts.method == Method::GET {
            parts
                .uri
                .path_and_query()
                .map(|pq| pq.as_str())
                .unwrap_or(DEFAULT_LANDING)
        } else {
            DEFAULT_LANDING
        };
        debug!("anonymous access to {}, redirecting to login", parts.uri);
        Err(Redirect::to(&login_url(next)))
    }
}

/// Check submitted credentials against the configured admin pair.
pub fn credentials_match(config: &Config, username: &str, password: &str) -> bool {
    let user_ok = constant_time_eq(username.as_bytes(), config.admin_user.as_bytes());
    let pass_ok = constant_time_eq(password.as_bytes(), config.admin_pass.as_bytes());
    user_ok & pass_ok
}

/// Login page URL that resumes at `next` afterwards.
pub fn login_url(next: &str) -> String {
    format!("/login?next={}", percent_encode(next))
}

/// Accept `next` only if it is a local absolute path.
///
/// Rejects scheme-relative (`//host`) and backslash forms that browsers
/// would resolve to another origin.
pub fn safe_next(next: Option<&str>) -> &str {
    match next {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.contains('\\') =>
        {
            path
        }
        _ => DEFAULT_LANDING,
    }
}

/// Percent-encode everything outside RFC 3986 unreserved characters and `/`.
fn percent_encode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~' | b'/') {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;
