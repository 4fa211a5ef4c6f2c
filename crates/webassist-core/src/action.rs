//! Executable actions and plans.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// What an [`Action`] does to the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Click,
    Type,
    Navigate,
    Select,
    Hover,
    Check,
    Wait,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Click => "click",
            ActionKind::Type => "type",
            ActionKind::Navigate => "navigate",
            ActionKind::Select => "select",
            ActionKind::Hover => "hover",
            ActionKind::Check => "check",
            ActionKind::Wait => "wait",
        }
    }

    /// Verb used in spoken failures ("Could not fill email field").
    pub fn verb(&self) -> &'static str {
        match self {
            ActionKind::Type => "fill",
            ActionKind::Navigate => "open",
            other => other.as_str(),
        }
    }

    /// Whether the action addresses an element.
    pub fn needs_element(&self) -> bool {
        !matches!(self, ActionKind::Navigate | ActionKind::Wait)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionKind {
    type Err = String;

    /// Lenient parse accepting the synonyms language models tend to use.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "click" | "press" | "tap" => Ok(ActionKind::Click),
            "type" | "fill" | "input" | "enter" => Ok(ActionKind::Type),
            "navigate" | "goto" | "go_to" | "open" => Ok(ActionKind::Navigate),
            "select" | "choose" => Ok(ActionKind::Select),
            "hover" => Ok(ActionKind::Hover),
            "check" | "tick" => Ok(ActionKind::Check),
            "wait" | "sleep" => Ok(ActionKind::Wait),
            other => Err(format!("unknown action kind '{}'", other)),
        }
    }
}

/// One executable step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub kind: ActionKind,
    #[serde(default)]
    pub selector: String,
    #[serde(default)]
    pub fallback_selectors: Vec<String>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    /// Human-readable description, also the target name in messages.
    #[serde(default)]
    pub purpose: String,
}

impl Action {
    pub fn new(kind: ActionKind, purpose: impl Into<String>) -> Self {
        Self {
            kind,
            selector: String::new(),
            fallback_selectors: Vec::new(),
            value: None,
            url: None,
            purpose: purpose.into(),
        }
    }

    pub fn click(purpose: impl Into<String>) -> Self {
        Self::new(ActionKind::Click, purpose)
    }

    pub fn type_text(purpose: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(ActionKind::Type, purpose).with_value(text)
    }

    pub fn navigate(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            url: Some(url.clone()),
            ..Self::new(ActionKind::Navigate, url)
        }
    }

    pub fn with_selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = selector.into();
        self
    }

    pub fn with_fallbacks(mut self, fallbacks: Vec<String>) -> Self {
        self.fallback_selectors = fallbacks;
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Primary selector followed by fallbacks, blanks skipped.
    pub fn selectors(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.selector.as_str())
            .chain(self.fallback_selectors.iter().map(String::as_str))
            .filter(|s| !s.trim().is_empty())
    }
}

/// Ordered list of actions with the producer's confidence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionPlan {
    pub actions: Vec<Action>,
    pub confidence: f64,
}

impl ActionPlan {
    pub fn new(actions: Vec<Action>, confidence: f64) -> Self {
        Self {
            actions,
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

/// Successful execution report.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionOutcome {
    /// Selector that worked; `None` for navigation, waits and DOM search.
    pub selector: Option<String>,
    /// True when the tier 4 DOM search did the work.
    pub used_dom_search: bool,
    pub message: String,
}
