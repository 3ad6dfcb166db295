// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP routes.

mod admin;
mod login;
mod submit;

#[cfg(test)]
mod test_helpers;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(submit::form))
        .route("/submit", post(submit::submit))
        .route("/login", get(login::form).post(login::login))
        .route("/logout", get(login::logout))
        .route("/admin", get(admin::list))
        .route("/admin/:id", get(admin::detail))
        .route("/admin/:id/update", post(admin::update))
        .with_state(state)
}
