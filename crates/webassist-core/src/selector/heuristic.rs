//! Tier 2: generic selectors templated from a target description.

use crate::action::ActionKind;

const FILLER_WORDS: &[&str] = &[
    "the", "a", "an", "on", "field", "button", "dropdown", "link", "box", "input", "tab",
    "checkbox", "option", "menu",
];

/// Description with filler words removed, e.g. "the submit button" to "submit".
pub fn core_text(description: &str) -> String {
    let words: Vec<&str> = description
        .split_whitespace()
        .filter(|w| !FILLER_WORDS.contains(&w.to_lowercase().as_str()))
        .collect();
    if words.is_empty() {
        description.trim().to_string()
    } else {
        words.join(" ")
    }
}

fn quote(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

fn slug(text: &str, separator: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(separator)
}

/// Selectors for an element described as `description`, shaped by what the
/// action will do with it.
pub fn heuristic_selectors(description: &str, kind: ActionKind) -> Vec<String> {
    let core = core_text(description);
    if core.is_empty() || matches!(kind, ActionKind::Navigate | ActionKind::Wait) {
        return Vec::new();
    }

    let text = quote(&core);
    let underscored = quote(&slug(&core, "_"));
    let dashed = quote(&slug(&core, "-"));
    let compact = quote(&slug(&core, ""));

    let mut selectors = match kind {
        ActionKind::Type => vec![
            format!("input[name=\"{}\"]", compact),
            format!("input[name*=\"{}\" i]", underscored),
            format!("input[id*=\"{}\" i]", dashed),
            format!("input[id*=\"{}\" i]", compact),
            format!("input[placeholder*=\"{}\" i]", text),
            format!("input[aria-label*=\"{}\" i]", text),
            format!("textarea[placeholder*=\"{}\" i]", text),
            format!("label:has-text(\"{}\") + input", text),
            format!("label:has-text(\"{}\") ~ input", text),
            format!("div.field:has(label:has-text(\"{}\")) input", text),
        ],
        ActionKind::Select => vec![
            format!("select[name*=\"{}\" i]", underscored),
            format!("select[id*=\"{}\" i]", compact),
            format!(".p-dropdown:has-text(\"{}\")", text),
            format!(".p-dropdown-label:has-text(\"{}\")", text),
            format!("div.field:has(label:has-text(\"{}\")) .p-dropdown", text),
            format!("[role=\"combobox\"][aria-label*=\"{}\" i]", text),
        ],
        ActionKind::Check => vec![
            format!("input[type=\"checkbox\"][name*=\"{}\" i]", underscored),
            format!("input[type=\"checkbox\"][id*=\"{}\" i]", compact),
            format!("label:has-text(\"{}\") input[type=\"checkbox\"]", text),
            format!("div:has-text(\"{}\") > .p-checkbox", text),
            format!("[role=\"checkbox\"][aria-label*=\"{}\" i]", text),
        ],
        ActionKind::Click | ActionKind::Hover => vec![
            format!("button:has-text(\"{}\")", text),
            format!("a:has-text(\"{}\")", text),
            format!("[role=\"button\"]:has-text(\"{}\")", text),
            format!("input[type=\"submit\"][value*=\"{}\" i]", text),
            format!("input[type=\"button\"][value*=\"{}\" i]", text),
            format!("[aria-label*=\"{}\" i]", text),
            format!("[role=\"tab\"]:has-text(\"{}\")", text),
            format!("li:has-text(\"{}\")", text),
            format!("span:text(\"{}\")", text),
            format!("*:text(\"{}\")", text),
        ],
        ActionKind::Navigate | ActionKind::Wait => return Vec::new(),
    };

    selectors.push(format!("#{}", dashed.replace(['"', '\\'], "")));
    selectors
}
