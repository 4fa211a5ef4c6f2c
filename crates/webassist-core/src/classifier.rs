//! Rule-based intent classification.
//!
//! Patterns are checked in a fixed priority order and the first match wins.
//! Specific patterns (login, credentials) precede generic ones (click), so
//! "click login button" is a login command. When no rule matches at the
//! start, the rules are retried from each later phrase in the text ("please
//! go to example.com"). Failing that, each word is fuzzily compared with the
//! phrase vocabulary.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::command::{Command, Intent};
use crate::phrases::{self, EXIT, HELP, INTENT_PHRASES, MODE_SWITCH};

/// Words skipped between a fuzzily matched verb and its target.
const CONNECTORS: &[&str] = &["to", "for", "on", "the", "in"];

/// Default similarity threshold for the fuzzy fallback.
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.8;

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("classifier pattern must compile")
}

static LOGIN_START: Lazy<Regex> = Lazy::new(|| re(r"(?i)^(?:login|log in|sign in|log me in|sign me in)\b"));
static LOGIN_BUTTON: Lazy<Regex> = Lazy::new(|| re(r"(?i)\b(?:login|log in|sign in)\s+(?:button|link)\b"));

static LOGIN_CREDENTIALS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)^log[a-z]*\s+(?:with|using|w[a-z]*)\s+(?:email(?:\s+address)?\s+)?(\S+@\S+)\s+(?:and\s+|with\s+)?(?:password|pass|pwd)\s+(\S+)",
        r"(?i)^(?:login|log in|sign in)\s+(?:with|using)?\s*(?:email|username)?\s*(\S+@\S+)\s+(?:and|with)?\s*(?:password|pass|pwd)?\s*(\S+)",
        r"(?i)^log[a-z]*\b.*?(\S+@\S+)\s+.*?(\S+)$",
    ]
    .into_iter()
    .map(re)
    .collect()
});

static NAVIGATION: Lazy<Regex> = Lazy::new(|| {
    re(r"(?i)^(?:go to|navigate to|open|visit|browse to|take me to)\s+(.+)$")
});

static SEARCH: Lazy<Regex> = Lazy::new(|| re(r"(?i)^(?:search for|search|find|look for|locate)\s+(.+)$"));

static EMAIL_PASSWORD: Lazy<Regex> = Lazy::new(|| {
    re(r"(?i)^(?:enter|input|type|fill|use|put)?\s*(?:the\s+)?(?:email|email address)\s+(\S+)\s+(?:and\s+|with\s+|&\s+)?(?:the\s+)?(?:password|pass|pwd|pword)\s+(\S+)")
});

static EMAIL_ONLY: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)^(?:enter|input|type|fill|use|put)\s+(?:the\s+)?(?:email|email address)\s+(\S+)$",
        r"(?i)^(?:enter|input|type|fill|use|put)\s+(\S+@\S+)$",
        r"(?i)^(?:email|email address)\s+(\S+)$",
    ]
    .into_iter()
    .map(re)
    .collect()
});

static PASSWORD_ONLY: Lazy<Regex> = Lazy::new(|| {
    re(r"(?i)^(?:(?:enter|input|type|fill|use|put)\s+)?(?:the\s+)?(?:password|pass|pwd|pword)\s+(\S+)$")
});

static ROW_ASSIGNMENT: Lazy<Regex> = Lazy::new(|| {
    re(r"(?i)^(?:set|make|change)\s+(?:row|member|person|entry)\s+(\d+)\s+(?:to|as)\s+(?:a\s+)?(member|manager)$")
});

static FILL_INTO: Lazy<Regex> = Lazy::new(|| {
    re(r"(?i)^(?:enter|input|type|fill|put|use|set|write|insert)\s+(?:in\s+)?(.+?)\s+(?:in|into|as|for|to)\s+(?:the\s+)?(.+?)(?:\s+field)?$")
});

static FILL_WITH: Lazy<Regex> = Lazy::new(|| {
    re(r"(?i)^fill\s+(?:in\s+)?(?:the\s+)?(.+?)(?:\s+field)?\s+with\s+(.+)$")
});

static FORM_VERB: Lazy<Regex> = Lazy::new(|| {
    re(r"(?i)^(?:enter|input|type|fill|put|use|set|write|insert|provide|populate)\s+(.+)$")
});

static CLICK: Lazy<Regex> = Lazy::new(|| {
    re(r"(?i)^(?:click|press|tap|hit|push|select|choose|pick|check|uncheck)(?:\s+on)?\s+(?:the\s+)?(.+)$")
});

/// Turn a navigation target into a URL.
///
/// Explicit schemes are kept, dotted hosts get `https://`, and a single bare
/// word becomes `https://www.<word>.com`. Anything else is not a URL.
pub fn target_to_url(target: &str) -> Option<String> {
    let target = target.trim().trim_end_matches(['.', ',', '!', '?']);
    if target.is_empty() {
        return None;
    }

    let lower = target.to_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return Some(target.to_string());
    }

    if !target.contains(' ') {
        if target.contains('.') {
            return Some(format!("https://{}", target));
        }
        if target.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Some(format!("https://www.{}.com", lower));
        }
    }

    None
}

/// Intent classifier.
#[derive(Debug, Clone)]
pub struct CommandClassifier {
    fuzzy_threshold: f64,
}

impl Default for CommandClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_FUZZY_THRESHOLD)
    }
}

impl CommandClassifier {
    pub fn new(fuzzy_threshold: f64) -> Self {
        Self { fuzzy_threshold }
    }

    /// Classify a normalized command.
    pub fn classify(&self, normalized: &str) -> Command {
        let text = normalized.trim();
        let lower = text.to_lowercase();

        if lower.is_empty() {
            return Command::unknown(text);
        }

        if MODE_SWITCH.contains(&lower.as_str()) {
            let mode = if lower.contains("voice") { "voice" } else { "text" };
            return Command::new(Intent::ModeSwitch, "switch_mode", text)
                .with_target(mode)
                .with_param("mode", mode);
        }

        if EXIT.contains(&lower.as_str()) {
            return Command::new(Intent::Exit, "exit", text);
        }

        if HELP.contains(&lower.as_str())
            || lower.starts_with("help ")
            || HELP.iter().any(|p| p.contains(' ') && lower.contains(p))
        {
            return Command::new(Intent::Help, "help", text);
        }

        if let Some(cmd) = self.match_rules(text, &lower) {
            return cmd;
        }

        if let Some(cmd) = self.match_inner_phrase(text) {
            return cmd;
        }

        self.fuzzy(text, &lower)
    }

    /// The anchored rules, in priority order.
    fn match_rules(&self, text: &str, lower: &str) -> Option<Command> {
        if let Some(cmd) = self.match_login(text, lower) {
            return Some(cmd);
        }

        if let Some(caps) = NAVIGATION.captures(text) {
            let target = caps[1].trim().to_string();
            let mut cmd = Command::new(Intent::Navigation, "navigate", text).with_target(&target);
            if let Some(url) = target_to_url(&target) {
                cmd = cmd.with_param("url", url);
            }
            return Some(cmd);
        }

        if let Some(caps) = SEARCH.captures(text) {
            let query = caps[1].trim();
            let query = query.strip_prefix("for ").unwrap_or(query);
            return Some(
                Command::new(Intent::Search, "search", text)
                    .with_target(query)
                    .with_param("query", query),
            );
        }

        // A table row's member/manager pick, not a field named "manager".
        if let Some(caps) = ROW_ASSIGNMENT.captures(text) {
            return Some(
                Command::new(Intent::Click, "select", text)
                    .with_target(format!("row {}", &caps[1]))
                    .with_param("row", &caps[1])
                    .with_param("option", caps[2].to_lowercase()),
            );
        }

        if let Some(cmd) = self.match_form_filling(text) {
            return Some(cmd);
        }

        CLICK.captures(text).map(|caps| {
            let element = caps[1].trim();
            Command::new(Intent::Click, "click", text)
                .with_target(element)
                .with_param("element", element)
        })
    }

    /// Retry the rules from each later word that starts a known phrase, so
    /// leading filler ("can you", "please") does not hide the command. The
    /// command keeps the full text.
    fn match_inner_phrase(&self, text: &str) -> Option<Command> {
        let starts = text
            .char_indices()
            .zip(text.chars().skip(1))
            .filter(|((_, c), next)| c.is_whitespace() && !next.is_whitespace())
            .map(|((i, c), _)| i + c.len_utf8());

        for start in starts {
            let rest = &text[start..];
            let rest_lower = rest.to_lowercase();
            match phrases::leading_phrase(&rest_lower) {
                None | Some((Intent::Exit, _)) | Some((Intent::Help, _)) => continue,
                Some((intent, phrase)) => {
                    if let Some(mut cmd) = self.match_rules(rest, &rest_lower) {
                        debug!("Found {} phrase '{}' inside '{}'", intent, phrase, text);
                        cmd.text = text.to_string();
                        return Some(cmd);
                    }
                }
            }
        }
        None
    }

    fn match_login(&self, text: &str, lower: &str) -> Option<Command> {
        for pattern in LOGIN_CREDENTIALS.iter() {
            if let Some(caps) = pattern.captures(text) {
                return Some(
                    Command::new(Intent::Login, "login", text)
                        .with_target("login form")
                        .with_param("email", &caps[1])
                        .with_param("password", &caps[2]),
                );
            }
        }

        if LOGIN_START.is_match(lower) || LOGIN_BUTTON.is_match(lower) {
            return Some(Command::new(Intent::Login, "login", text).with_target("login button"));
        }

        None
    }

    fn match_form_filling(&self, text: &str) -> Option<Command> {
        if let Some(caps) = EMAIL_PASSWORD.captures(text) {
            return Some(
                Command::new(Intent::FormFilling, "fill", text)
                    .with_target("login form")
                    .with_param("email", &caps[1])
                    .with_param("password", &caps[2]),
            );
        }

        for pattern in EMAIL_ONLY.iter() {
            if let Some(caps) = pattern.captures(text) {
                return Some(
                    Command::new(Intent::FormFilling, "fill", text)
                        .with_target("email")
                        .with_param("email", &caps[1]),
                );
            }
        }

        if let Some(caps) = PASSWORD_ONLY.captures(text) {
            return Some(
                Command::new(Intent::FormFilling, "fill", text)
                    .with_target("password")
                    .with_param("password", &caps[1]),
            );
        }

        if let Some(caps) = FILL_WITH.captures(text) {
            let field = caps[1].trim();
            return Some(
                Command::new(Intent::FormFilling, "fill", text)
                    .with_target(field)
                    .with_param("field", field)
                    .with_param("value", caps[2].trim()),
            );
        }

        if let Some(caps) = FILL_INTO.captures(text) {
            let field = caps[2].trim();
            return Some(
                Command::new(Intent::FormFilling, "fill", text)
                    .with_target(field)
                    .with_param("field", field)
                    .with_param("value", caps[1].trim()),
            );
        }

        FORM_VERB.captures(text).map(|caps| {
            Command::new(Intent::FormFilling, "fill", text)
                .with_target(caps[1].trim())
                .with_confidence(0.6)
        })
    }

    fn fuzzy(&self, text: &str, lower: &str) -> Command {
        let mut best: Option<(Intent, f64, usize)> = None;

        for (index, word) in lower.split_whitespace().enumerate().filter(|(_, w)| w.len() > 3) {
            // Exit is only ever taken from an exact phrase.
            for (intent, phrases) in INTENT_PHRASES.iter().filter(|(i, _)| *i != Intent::Exit) {
                for phrase in phrases.iter() {
                    let candidates = std::iter::once(*phrase)
                        .chain(phrase.split(' ').filter(|token| token.len() > 3));
                    for candidate in candidates {
                        let score = strsim::normalized_damerau_levenshtein(word, candidate);
                        if score >= self.fuzzy_threshold && best.is_none_or(|(_, s, _)| score > s) {
                            best = Some((*intent, score, index));
                        }
                    }
                }
            }
        }

        match best {
            Some((intent, score, index)) => {
                debug!("Fuzzy matched '{}' as {} ({:.2})", text, intent, score);
                let rest = words_after(text, index);
                let mut cmd = Command::new(intent, fuzzy_action(intent), text)
                    .with_target(&rest)
                    .with_confidence(score);
                if intent == Intent::Navigation {
                    if let Some(url) = target_to_url(&rest) {
                        cmd = cmd.with_param("url", url);
                    }
                }
                if intent == Intent::Search && !rest.is_empty() {
                    cmd = cmd.with_param("query", &rest);
                }
                cmd
            }
            None => Command::unknown(text),
        }
    }
}

/// The words following word `index`, minus leading connectors.
fn words_after(text: &str, index: usize) -> String {
    text.split_whitespace()
        .skip(index + 1)
        .skip_while(|w| CONNECTORS.contains(&w.to_lowercase().as_str()))
        .collect::<Vec<_>>()
        .join(" ")
}

fn fuzzy_action(intent: Intent) -> &'static str {
    match intent {
        Intent::Navigation => "navigate",
        Intent::FormFilling => "fill",
        Intent::Click => "click",
        Intent::Login => "login",
        Intent::Search => "search",
        Intent::Help => "help",
        Intent::Exit => "exit",
        Intent::ModeSwitch => "switch_mode",
        Intent::Unknown => "none",
    }
}

#[cfg(test)]
#[path = "classifier_tests.rs"]
mod tests;
