// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! intake-core: Shared library for the intake request tracker
//!
//! This crate provides the request record, submission validation, listing
//! filters and the SQLite store used by the intake web service.

pub mod db;
pub mod error;
pub mod filter;
pub mod request;
pub mod submission;

pub use db::Database;
pub use error::{Error, Result, ValidationError};
pub use filter::RequestFilter;
pub use request::{NewRequest, Request, RequestUpdate};
pub use submission::SubmissionForm;
