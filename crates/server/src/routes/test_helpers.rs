// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared fixtures for driving the router in tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use axum::body::{to_bytes, Body};
use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use axum::http::{Request as HttpRequest, Response};
use tower::ServiceExt;

use intake_core::Database;

use super::router;
use crate::config::Config;
use crate::session::{Session, SESSION_COOKIE};
use crate::state::AppState;

pub const ADMIN_USER: &str = "admin";
pub const ADMIN_PASS: &str = "hunter2";

pub fn test_config(debug: bool) -> Config {
    Config {
        admin_user: ADMIN_USER.into(),
        admin_pass: ADMIN_PASS.into(),
        secret_key: "test-secret".into(),
        debug,
    }
}

pub fn test_state() -> AppState {
    AppState::new(Database::open_in_memory().unwrap(), test_config(false))
}

/// Send one request through a fresh router over `state`.
pub async fn send(state: &AppState, request: HttpRequest<Body>) -> Response<Body> {
    router(state.clone()).oneshot(request).await.unwrap()
}

pub fn get(uri: &str, cookie: Option<&str>) -> HttpRequest<Body> {
    let mut builder = HttpRequest::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn post_form(uri: &str, body: &str, cookie: Option<&str>) -> HttpRequest<Body> {
    let mut builder = HttpRequest::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(LOCATION)
        .expect("no Location header")
        .to_str()
        .unwrap()
}

/// The `name=value` pair of the session cookie set by `response`, if any.
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter(|v| v.starts_with(&format!("{SESSION_COOKIE}=")))
        .filter_map(|v| v.split(';').next())
        .map(str::to_string)
        .next()
}

/// Decode the session a response left behind.
pub fn session_after(state: &AppState, response: &Response<Body>) -> Session {
    match session_cookie(response) {
        Some(pair) => {
            let value = pair.split_once('=').unwrap().1;
            if value.is_empty() {
                Session::default()
            } else {
                state.sessions.decode(value).unwrap()
            }
        }
        None => Session::default(),
    }
}

/// Log in with the configured credentials and return the session cookie.
pub async fn login(state: &AppState) -> String {
    let body = format!("username={ADMIN_USER}&password={ADMIN_PASS}");
    let response = send(state, post_form("/login", &body, None)).await;
    session_cookie(&response).expect("login did not set a session cookie")
}

/// Run an async test body from a `yare` parameterized (sync) test.
pub fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(future)
}
