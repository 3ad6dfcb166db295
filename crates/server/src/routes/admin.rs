// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Admin listing, detail and update handlers.
//!
//! The listing is the one handler that never surfaces a generic error page:
//! a failure while loading it is rendered as a plain-text diagnostic.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use thiserror::Error;
use tracing::{error, info};

use intake_core::{Database, Request, RequestFilter, RequestUpdate};

use crate::auth::Admin;
use crate::error::AppError;
use crate::session::FlashLevel;
use crate::state::AppState;
use crate::views;

/// Everything the listing page shows.
struct Listing {
    requests: Vec<Request>,
    categories: Vec<String>,
}

/// Any failure while building the listing.
#[derive(Debug, Error)]
enum ListingError {
    #[error("{0}")]
    Query(#[from] QueryRejection),

    #[error("{0}")]
    Store(#[from] intake_core::Error),
}

fn load_listing(db: &Database, filter: &RequestFilter) -> Result<Listing, ListingError> {
    let requests = db.list_requests(filter)?;
    let categories = db.distinct_categories()?;
    Ok(Listing {
        requests,
        categories,
    })
}

fn listing_failure(err: &ListingError, debug: bool) -> Response {
    error!("failed to load request listing: {err}");
    let body = if debug {
        format!("Error loading requests: {err}")
    } else {
        "Error loading requests".to_string()
    };
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        [(CONTENT_TYPE, "text/plain; charset=utf-8")],
        body,
    )
        .into_response()
}

/// `GET /admin`: filtered listing.
pub async fn list(
    State(state): State<AppState>,
    Admin(mut session): Admin,
    query: Result<Query<RequestFilter>, QueryRejection>,
) -> Response {
    let filter = match query {
        Ok(Query(filter)) => filter.normalized(),
        Err(rejection) => {
            return listing_failure(&ListingError::from(rejection), state.config.debug)
        }
    };
    let loaded = {
        let db = state.db.lock().await;
        load_listing(&db, &filter)
    };

    match loaded {
        Ok(listing) => {
            let flashes = session.take_flashes();
            let page = views::admin_page(
                &flashes,
                &listing.requests,
                &filter,
                &listing.categories,
            );
            state.sessions.attach(&session, page)
        }
        Err(e) => listing_failure(&e, state.config.debug),
    }
}

/// `GET /admin/:id`: one request with its update form.
pub async fn detail(
    State(state): State<AppState>,
    Admin(mut session): Admin,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let request = state.db.lock().await.get_request(id)?;
    let flashes = session.take_flashes();
    Ok(state
        .sessions
        .attach(&session, views::detail_page(&flashes, &request)))
}

/// `POST /admin/:id/update`: overwrite the submitted status and/or priority.
pub async fn update(
    State(state): State<AppState>,
    Admin(mut session): Admin,
    Path(id): Path<i64>,
    Form(update): Form<RequestUpdate>,
) -> Result<Response, AppError> {
    let request = state.db.lock().await.update_request(id, &update)?;
    info!(
        id,
        status = %request.status,
        priority = %request.priority,
        "request updated"
    );

    session.flash(FlashLevel::Success, "Updated!");
    Ok(state
        .sessions
        .attach(&session, Redirect::to(&format!("/admin/{id}"))))
}
