// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The request record and its insert/update shapes.
//!
//! `priority` and `status` are plain strings. The known values are listed in
//! [`PRIORITIES`] and [`STATUSES`] for select controls, but nothing rejects
//! other values on write.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Priority assigned when a submission does not carry one.
pub const DEFAULT_PRIORITY: &str = "normal";

/// Status every new request starts in.
pub const DEFAULT_STATUS: &str = "new";

/// Known priority values, lowest first.
pub const PRIORITIES: [&str; 3] = ["low", "normal", "high"];

/// Known status values in workflow order.
pub const STATUSES: [&str; 3] = ["new", "in_progress", "done"];

/// A stored request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Row identifier assigned by the store.
    pub id: i64,
    /// Submitter's display name.
    pub name: String,
    /// Free-form contact detail (email, phone, desk number).
    pub contact: Option<String>,
    /// Short summary.
    pub title: String,
    /// Free text body.
    pub details: String,
    /// Optional grouping; never stored as an empty string.
    pub category: Option<String>,
    pub priority: String,
    pub status: String,
    /// When the request was stored.
    pub created_at: DateTime<Utc>,
}

impl Request {
    /// Convert to a field-keyed JSON object.
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("id".into(), Value::from(self.id));
        map.insert("name".into(), Value::from(self.name.clone()));
        map.insert("contact".into(), opt_value(&self.contact));
        map.insert("title".into(), Value::from(self.title.clone()));
        map.insert("details".into(), Value::from(self.details.clone()));
        map.insert("category".into(), opt_value(&self.category));
        map.insert("priority".into(), Value::from(self.priority.clone()));
        map.insert("status".into(), Value::from(self.status.clone()));
        map.insert(
            "created_at".into(),
            Value::from(format_timestamp(&self.created_at)),
        );
        map
    }
}

fn opt_value(value: &Option<String>) -> Value {
    match value {
        Some(s) => Value::from(s.clone()),
        None => Value::Null,
    }
}

/// Format a timestamp the way it is stored: RFC 3339, UTC, fixed microseconds.
///
/// The fixed width keeps lexical order equal to chronological order, which
/// the listing's `ORDER BY created_at` relies on.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Fields for a request that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRequest {
    pub name: String,
    pub contact: Option<String>,
    pub title: String,
    pub details: String,
    pub category: Option<String>,
    pub priority: String,
    pub status: String,
    /// Explicit creation time; the store uses the current time when `None`.
    pub created_at: Option<DateTime<Utc>>,
}

impl NewRequest {
    /// Creates a request with default priority and status.
    pub fn new(name: impl Into<String>, title: impl Into<String>, details: impl Into<String>) -> Self {
        NewRequest {
            name: name.into(),
            contact: None,
            title: title.into(),
            details: details.into(),
            category: None,
            priority: DEFAULT_PRIORITY.to_string(),
            status: DEFAULT_STATUS.to_string(),
            created_at: None,
        }
    }

    pub fn with_contact(mut self, contact: impl Into<String>) -> Self {
        self.contact = Some(contact.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = priority.into();
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Required fields that are blank after trimming, in form order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("name", &self.name),
            ("title", &self.title),
            ("details", &self.details),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }
}

/// A partial update of the moderator-editable fields.
///
/// `None` leaves the stored value untouched; `Some` overwrites it verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RequestUpdate {
    pub status: Option<String>,
    pub priority: Option<String>,
}

impl RequestUpdate {
    /// Returns true if the update would change nothing.
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.priority.is_none()
    }
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
