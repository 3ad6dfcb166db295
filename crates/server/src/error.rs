// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::views;

/// Errors raised while starting or running the intake binary.
#[derive(Debug, Error)]
pub enum Error {
    #[error("missing configuration: {0}\n  hint: set it in the config file or the environment")]
    MissingConfig(&'static str),

    #[error("invalid config file {path}: {source}")]
    InvalidConfig {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("logging setup failed: {0}")]
    Logging(String),

    #[error(transparent)]
    Core(#[from] intake_core::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for the intake binary.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned from request handlers.
///
/// Anything that is not a missing record becomes a generic 500; the details
/// go to the log, not to the browser.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("request not found: {0}")]
    NotFound(i64),

    #[error("internal error: {0}")]
    Internal(intake_core::Error),
}

impl From<intake_core::Error> for AppError {
    fn from(err: intake_core::Error) -> Self {
        match err {
            intake_core::Error::RequestNotFound(id) => AppError::NotFound(id),
            other => AppError::Internal(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound(id) => {
                tracing::debug!(id, "request not found");
                (StatusCode::NOT_FOUND, views::not_found_page()).into_response()
            }
            AppError::Internal(err) => {
                tracing::error!("unhandled error: {err}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
