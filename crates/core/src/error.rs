// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for intake-core operations.

use thiserror::Error;

/// All possible errors that can occur in intake-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("request not found: {0}")]
    RequestNotFound(i64),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupted data: {0}")]
    CorruptedData(String),
}

/// Rejection of a public submission before anything is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// One or more of the required fields was missing or blank after trimming.
    #[error("Name, Title and Details are required.")]
    MissingFields(Vec<&'static str>),
}

/// A specialized Result type for intake-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
