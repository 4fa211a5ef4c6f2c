//! Transcription cleanup.
//!
//! Three passes run once each, in order: domain corrections, word
//! corrections, then navigation phrasing. There is no iteration to a fixed
//! point; a correction that would enable an earlier pass is not revisited.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::command::Intent;
use crate::phrases::leading_phrase;

const CANONICAL_DOMAIN: &str = "redberyltest.in";

/// Misheard domain variants, longest first so that a shorter variant never
/// consumes part of a longer one.
const DOMAIN_VARIANTS: &[&str] = &[
    "red barely test.in",
    "red barrel test.in",
    "red berry test.in",
    "red beryl test.in",
    "red very test.in",
    "red berry test",
    "red beryl test",
    "red barely.in",
    "red barrel.in",
    "redberry test",
    "redberyl test",
    "red berry.in",
    "redberrytest",
    "redberyltest",
    "red bus.in",
    "redbus.in",
];

const WORD_CORRECTIONS: &[(&str, &str)] = &[
    ("oassword", "password"),
    ("passward", "password"),
    ("pasword", "password"),
    ("passwd", "password"),
    ("wth", "with"),
    ("emaol", "email"),
    ("e-mail", "email"),
    ("adddress", "address"),
    ("clcik", "click"),
    ("clik", "click"),
    ("clck", "click"),
    ("clk", "click"),
    ("selct", "select"),
    ("slect", "select"),
    ("navigat", "navigate"),
    ("navigte", "navigate"),
    ("serch", "search"),
    ("srch", "search"),
    ("buttn", "button"),
    ("buton", "button"),
    ("logn", "login"),
    ("loign", "login"),
    ("signin", "sign in"),
    ("sign-in", "sign in"),
    ("stat", "state"),
    ("stte", "state"),
    ("conty", "county"),
    ("counti", "county"),
];

static DOMAIN_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    DOMAIN_VARIANTS
        .iter()
        .filter_map(|variant| {
            let body = regex::escape(variant).replace(' ', r"\s+");
            // Variants without a TLD also swallow an existing ".in" so the
            // canonical form maps onto itself.
            let suffix = if variant.ends_with(".in") { "" } else { r"(?:\.in)?" };
            Regex::new(&format!(r"(?i)\b{}{}\b", body, suffix)).ok()
        })
        .collect()
});

/// Normalize a raw utterance. Pure and deterministic.
pub fn normalize(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return collapsed;
    }

    let text = correct_domains(&collapsed);
    let text = correct_words(&text);
    let text = canonicalize_navigation(&text);

    if text != collapsed {
        debug!("Normalized '{}' -> '{}'", raw, text);
    }
    text
}

pub(crate) fn correct_domains(text: &str) -> String {
    let mut result = text.to_string();
    for pattern in DOMAIN_PATTERNS.iter() {
        if pattern.is_match(&result) {
            result = pattern.replace_all(&result, CANONICAL_DOMAIN).into_owned();
        }
    }
    result
}

pub(crate) fn correct_words(text: &str) -> String {
    text.split(' ')
        .map(|token| {
            // URLs, emails and selectors keep their exact spelling.
            if token.contains(['.', '/', '@', '#', ':']) {
                return token.to_string();
            }
            let lower = token.to_lowercase();
            WORD_CORRECTIONS
                .iter()
                .find(|(wrong, _)| *wrong == lower)
                .map(|(_, right)| (*right).to_string())
                .unwrap_or_else(|| token.to_string())
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub(crate) fn canonicalize_navigation(text: &str) -> String {
    let lower = text.to_lowercase();
    let Some((Intent::Navigation, phrase)) = leading_phrase(&lower) else {
        return text.to_string();
    };

    let words = phrase.split(' ').count();
    match text.splitn(words + 1, ' ').nth(words) {
        Some(rest) if !rest.is_empty() => format!("go to {}", rest),
        _ => text.to_string(),
    }
}

#[cfg(test)]
#[path = "normalizer_tests.rs"]
mod tests;
