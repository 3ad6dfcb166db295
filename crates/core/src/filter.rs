// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Listing filters for the admin view.
//!
//! Every field is optional. Empty means "no filter"; active filters are
//! combined with AND. The free-text query matches title, details or name.

use serde::Deserialize;

/// Raw listing query parameters. Absent parameters deserialize as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RequestFilter {
    /// Case-insensitive substring matched against title, details and name.
    pub q: String,
    pub status: String,
    pub priority: String,
    pub category: String,
}

impl RequestFilter {
    /// Normalize raw parameters. Only the free-text query is trimmed; the
    /// equality filters must match stored values exactly.
    pub fn normalized(mut self) -> Self {
        self.q = self.q.trim().to_string();
        self
    }

    /// Build the WHERE clause and its positional parameters.
    ///
    /// Returns an empty clause when no filter is active.
    pub(crate) fn where_clause(&self) -> (String, Vec<String>) {
        let mut conditions = Vec::new();
        let mut params: Vec<String> = Vec::new();

        if !self.q.is_empty() {
            let pattern = like_pattern(&self.q);
            // SQLite's LIKE folds ASCII only; both sides go through
            // `fold_case` so non-ASCII letters match regardless of case.
            conditions.push(
                "(fold_case(title) LIKE ? ESCAPE '\\' \
                 OR fold_case(details) LIKE ? ESCAPE '\\' \
                 OR fold_case(name) LIKE ? ESCAPE '\\')"
                    .to_string(),
            );
            params.extend([pattern.clone(), pattern.clone(), pattern]);
        }

        for (column, value) in [
            ("status", &self.status),
            ("priority", &self.priority),
            ("category", &self.category),
        ] {
            if !value.is_empty() {
                conditions.push(format!("{column} = ?"));
                params.push(value.clone());
            }
        }

        if conditions.is_empty() {
            (String::new(), params)
        } else {
            (format!(" WHERE {}", conditions.join(" AND ")), params)
        }
    }
}

/// Wrap a literal substring in `%` wildcards, escaping LIKE metacharacters.
///
/// The needle is lowercased to match the `fold_case` column values.
fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
