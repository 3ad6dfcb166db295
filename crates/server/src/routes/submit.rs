// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use axum::extract::State;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use tracing::{debug, info};

use intake_core::SubmissionForm;

use crate::error::AppError;
use crate::session::{FlashLevel, Session};
use crate::state::AppState;
use crate::views;

/// `GET /`: the public submission form.
pub async fn form(State(state): State<AppState>, mut session: Session) -> Response {
    let flashes = session.take_flashes();
    state
        .sessions
        .attach(&session, views::submit_page(&flashes))
}

/// `POST /submit`: validate and store a submission.
pub async fn submit(
    State(state): State<AppState>,
    mut session: Session,
    Form(form): Form<SubmissionForm>,
) -> Result<Response, AppError> {
    let new_request = match form.validate() {
        Ok(new_request) => new_request,
        Err(e) => {
            debug!("rejected submission: {e:?}");
            session.flash(FlashLevel::Danger, e.to_string());
            return Ok(state.sessions.attach(&session, Redirect::to("/")));
        }
    };

    let request = state.db.lock().await.insert_request(&new_request)?;
    info!(id = request.id, title = %request.title, "request submitted");

    Ok(views::thanks_page(&request).into_response())
}
