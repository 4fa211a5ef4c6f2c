//! Classified command model.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Coarse category of what a command asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Navigation,
    FormFilling,
    Click,
    Login,
    Search,
    Help,
    Exit,
    ModeSwitch,
    Unknown,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Navigation => "navigation",
            Intent::FormFilling => "form_filling",
            Intent::Click => "click",
            Intent::Login => "login",
            Intent::Search => "search",
            Intent::Help => "help",
            Intent::Exit => "exit",
            Intent::ModeSwitch => "mode_switch",
            Intent::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One classified input line. Created per turn and dropped after dispatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    pub intent: Intent,
    /// Verb chosen by the classifier (`navigate`, `fill`, `click`, ...).
    pub action: String,
    pub target: String,
    pub parameters: BTreeMap<String, String>,
    /// In `[0, 1]`; 1.0 for rule matches, the similarity score for fuzzy ones.
    pub confidence: f64,
    /// The normalized text the command was classified from.
    pub text: String,
}

impl Command {
    pub fn new(intent: Intent, action: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            intent,
            action: action.into(),
            target: String::new(),
            parameters: BTreeMap::new(),
            confidence: 1.0,
            text: text.into(),
        }
    }

    pub fn unknown(text: impl Into<String>) -> Self {
        Self {
            confidence: 0.0,
            ..Self::new(Intent::Unknown, "none", text)
        }
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence.clamp(0.0, 1.0);
        self
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.parameters.get(key).map(String::as_str)
    }

    /// Lowercased text, the form most handler patterns match against.
    pub fn lower(&self) -> String {
        self.text.to_lowercase()
    }
}
