//! Tier 3 response parsing.
//!
//! Language models wrap selectors in prose, code fences or richer JSON. The
//! parser tries each shape in turn and degrades to an empty list.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Upper bound on suggestions taken from one response.
pub const MAX_SUGGESTIONS: usize = 5;

static FENCED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```[a-zA-Z]*\s*(.*?)```").expect("fence pattern must compile"));

static QUOTED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""((?:[^"\\]|\\.)+)"|'([^']+)'"#).expect("quote pattern must compile"));

/// Remove a surrounding markdown code fence, if any.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    match FENCED.captures(trimmed) {
        Some(caps) => caps.get(1).map(|m| m.as_str().trim()).unwrap_or(trimmed),
        None => trimmed,
    }
}

/// Extract selector strings from a free-form model response.
///
/// Shapes tried in order: a JSON array of strings, the same inside a code
/// fence, quoted selector-like strings anywhere in the text, and finally
/// selectors nested in an `{"actions": [...]}` or `{"selectors": [...]}`
/// envelope.
pub fn parse_selector_response(text: &str) -> Vec<String> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }

    let mut found = string_array(text)
        .or_else(|| FENCED.captures(text).and_then(|c| string_array(c[1].trim())))
        .unwrap_or_default();

    if found.is_empty() {
        found = quoted_selectors(text);
    }

    if found.is_empty() {
        found = envelope_selectors(strip_code_fence(text)).unwrap_or_default();
    }

    found.truncate(MAX_SUGGESTIONS);
    found
}

fn string_array(text: &str) -> Option<Vec<String>> {
    match serde_json::from_str::<Value>(text).ok()? {
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|v| v.as_str().map(|s| s.trim().to_string()))
                .filter(|s| !s.is_empty())
                .collect(),
        ),
        _ => None,
    }
}

fn envelope_selectors(text: &str) -> Option<Vec<String>> {
    let value: Value = serde_json::from_str(text).ok()?;
    let mut selectors = Vec::new();

    if let Some(list) = value.get("selectors").and_then(Value::as_array) {
        selectors.extend(list.iter().filter_map(Value::as_str).map(str::to_string));
    }

    if let Some(actions) = value.get("actions").and_then(Value::as_array) {
        for action in actions {
            if let Some(selector) = action.get("selector").and_then(Value::as_str) {
                selectors.push(selector.to_string());
            }
            if let Some(fallbacks) = action.get("fallback_selectors").and_then(Value::as_array) {
                selectors.extend(fallbacks.iter().filter_map(Value::as_str).map(str::to_string));
            }
        }
    }

    Some(selectors.into_iter().filter(|s| !s.trim().is_empty()).collect())
}

fn quoted_selectors(text: &str) -> Vec<String> {
    let mut selectors = Vec::new();
    for line in text.lines() {
        for caps in QUOTED.captures_iter(line) {
            let raw = caps.get(1).or_else(|| caps.get(2)).map(|m| m.as_str()).unwrap_or_default();
            let candidate = raw.replace("\\\"", "\"");
            if looks_like_selector(&candidate) && !selectors.contains(&candidate) {
                selectors.push(candidate);
            }
        }
    }
    selectors
}

/// Heuristic shape check for text pulled out of prose.
pub fn looks_like_selector(text: &str) -> bool {
    let text = text.trim();
    let Some(first) = text.chars().next() else {
        return false;
    };
    match first {
        '#' | '.' | '[' => text.len() > 1,
        c if c.is_ascii_alphabetic() => {
            let head: String = text
                .chars()
                .take_while(|c| c.is_ascii_alphanumeric() || *c == '-')
                .collect();
            head.len() < text.len()
                && text[head.len()..].starts_with(['#', '.', '[', ':', ' ', '>'])
                && text.contains(['#', '.', '[', ':'])
                && !text.contains("://")
        }
        _ => false,
    }
}
