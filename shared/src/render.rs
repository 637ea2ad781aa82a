//! Markup and text helpers for the task list.
//!
//! Everything here is pure so it can be exercised without a browser; the
//! frontend only inserts the strings these functions produce.

use chrono::{DateTime, Duration, Utc};
#[cfg(not(target_arch = "wasm32"))]
use chrono::Local;

use crate::Task;

/// Escapes the five characters that can break out of HTML text or
/// attribute context.
pub fn escape_html(unsafe_text: &str) -> String {
    let mut escaped = String::with_capacity(unsafe_text.len());
    for c in unsafe_text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Relative creation time: "just now", "N hours ago", or the local date
/// once a day has passed.
pub fn format_created(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(created_at);
    if elapsed < Duration::hours(1) {
        "just now".to_string()
    } else if elapsed < Duration::hours(24) {
        format!("{} hours ago", elapsed.num_hours())
    } else {
        local_date(created_at)
    }
}

/// Calendar date in the browser's locale and time zone.
#[cfg(target_arch = "wasm32")]
fn local_date(created_at: DateTime<Utc>) -> String {
    let date = js_sys::Date::new(&(created_at.timestamp_millis() as f64).into());
    String::from(date.to_locale_date_string("default", &js_sys::Object::new()))
}

/// Off the browser there is no user locale; fall back to the platform's
/// preferred date representation in local time.
#[cfg(not(target_arch = "wasm32"))]
fn local_date(created_at: DateTime<Utc>) -> String {
    created_at.with_timezone(&Local).format("%x").to_string()
}

/// Class list of the `<li>` wrapping a task.
pub fn task_item_class(task: &Task) -> String {
    if task.completed {
        "list-group-item todo-item completed".to_string()
    } else {
        "list-group-item todo-item".to_string()
    }
}

/// Inner markup of a task's `<li>`. Title and description are escaped.
pub fn task_item_html(task: &Task, now: DateTime<Utc>) -> String {
    let description = match task.description.as_deref() {
        Some(d) if !d.is_empty() => format!(
            r#"<div class="todo-description text-muted small mt-1">{}</div>"#,
            escape_html(d)
        ),
        _ => String::new(),
    };

    format!(
        r#"<div class="d-flex align-items-center">
    <div class="form-check me-3 flex-shrink-0">
        <input class="form-check-input" type="checkbox"{checked} data-id="{id}" style="width: 1.2em; height: 1.2em; cursor: pointer;">
    </div>
    <div class="flex-grow-1">
        <div class="todo-title fw-semibold">{title}</div>
        {description}
        <div class="text-muted small mt-1"><i class="fas fa-clock me-1"></i>{created}</div>
    </div>
    <div class="todo-actions ms-3 flex-shrink-0">
        <button class="btn btn-sm btn-outline-danger delete-btn" data-id="{id}"><i class="fas fa-trash"></i></button>
    </div>
</div>"#,
        checked = if task.completed { " checked" } else { "" },
        id = task.id,
        title = escape_html(&task.title),
        description = description,
        created = escape_html(&format_created(task.created_at, now)),
    )
}
