//! Phrase vocabulary shared by the normalizer and the classifier.

use crate::command::Intent;

pub(crate) const NAVIGATION: &[&str] = &[
    "go to", "navigate to", "open", "visit", "browse to", "take me to", "load", "show me",
    "bring up", "access", "view", "display", "get", "pull up", "launch",
];

pub(crate) const FORM_FILLING: &[&str] = &[
    "enter", "input", "type", "fill", "write", "put", "insert", "set", "provide", "supply",
    "submit", "populate", "complete", "add",
];

pub(crate) const CLICK: &[&str] = &[
    "click", "press", "select", "choose", "pick", "tap", "hit", "activate", "trigger", "push",
    "click on", "press on", "tap on",
];

pub(crate) const LOGIN: &[&str] = &[
    "login", "log in", "sign in", "authenticate", "access account", "enter credentials",
    "log me in", "sign me in",
];

pub(crate) const SEARCH: &[&str] = &[
    "search", "find", "look for", "locate", "search for", "query", "hunt for", "seek",
    "browse for", "scan for",
];

pub(crate) const HELP: &[&str] = &[
    "help", "assist", "support", "guide", "what can you do", "show commands",
    "available commands", "show help", "need help", "assistance", "command list",
    "list commands",
];

pub(crate) const EXIT: &[&str] = &[
    "exit", "quit", "goodbye", "bye", "stop", "close", "end", "terminate", "shut down", "leave",
    "finish", "done",
];

pub(crate) const MODE_SWITCH: &[&str] = &[
    "voice", "voice mode", "switch to voice", "switch to voice mode", "text", "text mode",
    "switch to text", "switch to text mode",
];

/// Every intent with its phrase list, in classification priority order.
pub(crate) const INTENT_PHRASES: &[(Intent, &[&str])] = &[
    (Intent::Login, LOGIN),
    (Intent::Navigation, NAVIGATION),
    (Intent::Search, SEARCH),
    (Intent::FormFilling, FORM_FILLING),
    (Intent::Click, CLICK),
    (Intent::Help, HELP),
    (Intent::Exit, EXIT),
];

/// The longest phrase that `lower` starts with on a word boundary.
pub(crate) fn leading_phrase(lower: &str) -> Option<(Intent, &'static str)> {
    INTENT_PHRASES
        .iter()
        .flat_map(|(intent, phrases)| phrases.iter().map(move |p| (*intent, *p)))
        .filter(|(_, phrase)| {
            lower == *phrase
                || lower
                    .strip_prefix(phrase)
                    .is_some_and(|rest| rest.starts_with(' '))
        })
        .max_by_key(|(_, phrase)| phrase.len())
}
