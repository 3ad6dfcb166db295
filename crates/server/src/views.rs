// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Server-rendered HTML pages.
//!
//! Every interpolated value goes through [`escape`].

use std::fmt::Write as _;

use axum::response::Html;
use intake_core::request::{format_timestamp, PRIORITIES, STATUSES};
use intake_core::{Request, RequestFilter};

use crate::session::Flash;

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, flashes: &[Flash], body: &str) -> Html<String> {
    let mut notices = String::new();
    for flash in flashes {
        let _ = write!(
            notices,
            r#"<div class="flash {}">{}</div>"#,
            flash.level.as_str(),
            escape(&flash.message)
        );
    }
    Html(format!(
        r#"<!doctype html>
<html lang="en">
<head><meta charset="utf-8"><title>{title}</title></head>
<body>
<nav><a href="/">Submit a request</a> | <a href="/admin">Admin</a></nav>
{notices}
<main>
{body}
</main>
</body>
</html>"#,
        title = escape(title),
    ))
}

/// `<option>` list with `selected` on the matching value.
fn options(values: &[&str], selected: &str) -> String {
    let mut out = String::new();
    for value in values {
        let marker = if *value == selected { " selected" } else { "" };
        let _ = write!(
            out,
            r#"<option value="{v}"{marker}>{v}</option>"#,
            v = escape(value)
        );
    }
    out
}

/// Like [`options`], but a stored value outside `values` is kept as an extra
/// selected entry so resubmitting the form does not overwrite it.
fn options_with_current(values: &[&str], current: &str) -> String {
    let mut out = options(values, current);
    if !values.contains(&current) {
        let _ = write!(
            out,
            r#"<option value="{v}" selected>{v}</option>"#,
            v = escape(current)
        );
    }
    out
}

/// Like [`options`], with a leading "any" entry for filter controls.
fn filter_options(values: &[&str], selected: &str) -> String {
    let any = if selected.is_empty() { " selected" } else { "" };
    format!(
        r#"<option value=""{any}>any</option>{}"#,
        options(values, selected)
    )
}

fn opt(value: &Option<String>) -> String {
    value.as_deref().map(escape).unwrap_or_default()
}

pub fn submit_page(flashes: &[Flash]) -> Html<String> {
    let body = format!(
        r#"<h1>Submit a request</h1>
<form method="post" action="/submit">
<label>Name <input name="name" required maxlength="120"></label>
<label>Contact <input name="contact" maxlength="180"></label>
<label>Title <input name="title" required maxlength="200"></label>
<label>Details <textarea name="details" required></textarea></label>
<label>Category <input name="category" maxlength="80"></label>
<label>Priority <select name="priority">{priorities}</select></label>
<button type="submit">Submit</button>
</form>"#,
        priorities = options(&PRIORITIES, "normal"),
    );
    layout("Submit a request", flashes, &body)
}

pub fn thanks_page(request: &Request) -> Html<String> {
    let body = format!(
        r#"<h1>Thank you!</h1>
<p>Your request has been received.</p>
{fields}
<p><a href="/">Submit another request</a></p>"#,
        fields = request_fields(request),
    );
    layout("Request received", &[], &body)
}

fn request_fields(request: &Request) -> String {
    format!(
        r#"<dl>
<dt>ID</dt><dd>{id}</dd>
<dt>Name</dt><dd>{name}</dd>
<dt>Contact</dt><dd>{contact}</dd>
<dt>Title</dt><dd>{title}</dd>
<dt>Details</dt><dd><pre>{details}</pre></dd>
<dt>Category</dt><dd>{category}</dd>
<dt>Priority</dt><dd>{priority}</dd>
<dt>Status</dt><dd>{status}</dd>
<dt>Created</dt><dd>{created}</dd>
</dl>"#,
        id = request.id,
        name = escape(&request.name),
        contact = opt(&request.contact),
        title = escape(&request.title),
        details = escape(&request.details),
        category = opt(&request.category),
        priority = escape(&request.priority),
        status = escape(&request.status),
        created = format_timestamp(&request.created_at),
    )
}

pub fn login_page(flashes: &[Flash], next: &str) -> Html<String> {
    let body = format!(
        r#"<h1>Admin login</h1>
<form method="post" action="/login">
<input type="hidden" name="next" value="{next}">
<label>Username <input name="username" required></label>
<label>Password <input name="password" type="password" required></label>
<button type="submit">Log in</button>
</form>"#,
        next = escape(next),
    );
    layout("Admin login", flashes, &body)
}

pub fn admin_page(
    flashes: &[Flash],
    requests: &[Request],
    filter: &RequestFilter,
    categories: &[String],
) -> Html<String> {
    let category_refs: Vec<&str> = categories.iter().map(String::as_str).collect();

    let mut rows = String::new();
    for request in requests {
        let _ = write!(
            rows,
            r#"<tr><td><a href="/admin/{id}">{id}</a></td><td>{created}</td><td>{name}</td><td>{title}</td><td>{category}</td><td>{priority}</td><td>{status}</td></tr>"#,
            id = request.id,
            created = format_timestamp(&request.created_at),
            name = escape(&request.name),
            title = escape(&request.title),
            category = opt(&request.category),
            priority = escape(&request.priority),
            status = escape(&request.status),
        );
    }
    if requests.is_empty() {
        rows.push_str(r#"<tr><td colspan="7">No requests found.</td></tr>"#);
    }

    let body = format!(
        r#"<h1>Requests</h1>
<p><a href="/logout">Log out</a></p>
<form method="get" action="/admin">
<input name="q" value="{q}" placeholder="Search title, details, name">
<select name="status">{statuses}</select>
<select name="priority">{priorities}</select>
<select name="category">{categories}</select>
<button type="submit">Filter</button>
</form>
<table>
<thead><tr><th>ID</th><th>Created</th><th>Name</th><th>Title</th><th>Category</th><th>Priority</th><th>Status</th></tr></thead>
<tbody>{rows}</tbody>
</table>"#,
        q = escape(&filter.q),
        statuses = filter_options(&STATUSES, &filter.status),
        priorities = filter_options(&PRIORITIES, &filter.priority),
        categories = filter_options(&category_refs, &filter.category),
    );
    layout("Requests", flashes, &body)
}

pub fn detail_page(flashes: &[Flash], request: &Request) -> Html<String> {
    let body = format!(
        r#"<h1>Request #{id}</h1>
{fields}
<form method="post" action="/admin/{id}/update">
<label>Status <select name="status">{statuses}</select></label>
<label>Priority <select name="priority">{priorities}</select></label>
<button type="submit">Update</button>
</form>
<p><a href="/admin">Back to list</a></p>"#,
        id = request.id,
        fields = request_fields(request),
        statuses = options_with_current(&STATUSES, &request.status),
        priorities = options_with_current(&PRIORITIES, &request.priority),
    );
    layout(&format!("Request #{}", request.id), flashes, &body)
}

pub fn not_found_page() -> Html<String> {
    layout(
        "Not Found",
        &[],
        "<h1>Not Found</h1><p>The requested record does not exist.</p>",
    )
}

#[cfg(test)]
#[path = "views_tests.rs"]
mod tests;
