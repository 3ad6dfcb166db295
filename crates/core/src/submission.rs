// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Parsing and validation of the public submission form.

use serde::Deserialize;

use crate::error::ValidationError;
use crate::request::{NewRequest, DEFAULT_PRIORITY};

/// Raw submission form fields, exactly as posted. Any of them may be absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SubmissionForm {
    pub name: Option<String>,
    pub contact: Option<String>,
    pub title: Option<String>,
    pub details: Option<String>,
    pub category: Option<String>,
    pub priority: Option<String>,
}

impl SubmissionForm {
    /// Validate the form into an insertable request.
    ///
    /// `name`, `title` and `details` must be non-blank after trimming. A blank
    /// category becomes `None`. A missing or empty priority falls back to
    /// [`DEFAULT_PRIORITY`]; any other value is kept verbatim.
    pub fn validate(&self) -> Result<NewRequest, ValidationError> {
        let priority = match self.priority.as_deref() {
            None | Some("") => DEFAULT_PRIORITY.to_string(),
            Some(p) => p.to_string(),
        };

        let mut request = NewRequest::new(
            trimmed(&self.name),
            trimmed(&self.title),
            trimmed(&self.details),
        )
        .with_priority(priority);

        let missing = request.missing_fields();
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }

        request.contact = Some(trimmed(&self.contact));
        request.category = Some(trimmed(&self.category)).filter(|c| !c.is_empty());
        Ok(request)
    }
}

fn trimmed(value: &Option<String>) -> String {
    value.as_deref().unwrap_or_default().trim().to_string()
}

#[cfg(test)]
#[path = "submission_tests.rs"]
mod tests;
