// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use axum::extract::{Query, State};
use axum::response::{Redirect, Response};
use axum::Form;
use serde::Deserialize;
use tracing::{info, warn};

use crate::auth::{credentials_match, login_url, safe_next};
use crate::session::{FlashLevel, Session};
use crate::state::AppState;
use crate::views;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NextParam {
    next: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    username: String,
    password: String,
    next: Option<String>,
}

/// `GET /login`: the login form, or straight on to `next` if already logged in.
pub async fn form(
    State(state): State<AppState>,
    mut session: Session,
    Query(params): Query<NextParam>,
) -> Response {
    let next = safe_next(params.next.as_deref());
    if session.authenticated {
        return state.sessions.attach(&session, Redirect::to(next));
    }
    let flashes = session.take_flashes();
    state
        .sessions
        .attach(&session, views::login_page(&flashes, next))
}

/// `POST /login`: check credentials and authenticate the session.
pub async fn login(
    State(state): State<AppState>,
    mut session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let next = safe_next(form.next.as_deref());

    if credentials_match(&state.config, &form.username, &form.password) {
        info!(user = %form.username, "admin logged in");
        session.authenticated = true;
        return state.sessions.attach(&session, Redirect::to(next));
    }

    warn!(user = %form.username, "failed admin login");
    session.flash(FlashLevel::Warning, "Invalid credentials.");
    state
        .sessions
        .attach(&session, Redirect::to(&login_url(next)))
}

/// `GET /logout`: drop the whole session.
pub async fn logout(State(state): State<AppState>, mut session: Session) -> Response {
    if session.authenticated {
        info!("admin logged out");
    }
    session.clear();
    state.sessions.attach(&session, Redirect::to("/"))
}
