//! Tolerant parsing of suggested steps from model output

use serde_json::Value;
use tracing::debug;

use super::SuggestedStep;

/// Extract steps from a model reply
///
/// Accepts a bare JSON array, or an object whose first array-valued entry
/// holds the steps (models in JSON mode wrap arrays as `{"steps": [...]}`).
/// Markdown code fences are stripped. Items may be objects with `title` and
/// `description`, or plain strings used as titles. Anything unusable yields
/// an empty list.
pub fn parse_steps(content: &str) -> Vec<SuggestedStep> {
    let body = strip_code_fence(content);
    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(e) => {
            debug!(error = %e, "parse_steps: reply is not JSON");
            return Vec::new();
        }
    };

    let items = match value {
        Value::Array(items) => items,
        Value::Object(map) => match map.into_iter().find_map(|(_, v)| match v {
            Value::Array(items) => Some(items),
            _ => None,
        }) {
            Some(items) => items,
            None => {
                debug!("parse_steps: object has no array entry");
                return Vec::new();
            }
        },
        other => {
            debug!(kind = ?other, "parse_steps: unexpected top-level value");
            return Vec::new();
        }
    };

    items.into_iter().filter_map(step_from_value).collect()
}

fn step_from_value(value: Value) -> Option<SuggestedStep> {
    let (title, description) = match value {
        Value::String(title) => (title, String::new()),
        Value::Object(map) => {
            let text = |key: &str| map.get(key).and_then(Value::as_str).map(str::trim).unwrap_or("").to_string();
            (text("title"), text("description"))
        }
        _ => return None,
    };

    let title = title.trim();
    if title.is_empty() {
        return None;
    }
    Some(SuggestedStep::new(title, description))
}

fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string ("json") on the opening line
    let rest = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest,
    };
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}
