//! Engine error taxonomy.

use thiserror::Error;

/// Failure of a resolution, execution or planning step.
///
/// Driver and provider errors are converted into one of these at the
/// smallest boundary that can describe what was being attempted.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AutomationError {
    /// No candidate across all tiers matched a live element.
    #[error("Could not find {0}")]
    Resolution(String),

    /// An element was found but refused the action after all retries.
    #[error("Could not {action} {target}: {reason}")]
    Action {
        action: String,
        target: String,
        reason: String,
    },

    /// The language model was unavailable or produced nothing usable.
    #[error("Planner failed: {0}")]
    Planner(String),

    /// The page did not load, including the alternate URL.
    #[error("Failed to navigate to {url}: {reason}")]
    Navigation { url: String, reason: String },

    #[error("Malformed selector: {0}")]
    MalformedSelector(String),
}

impl AutomationError {
    pub fn action(
        action: impl Into<String>,
        target: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        AutomationError::Action {
            action: action.into(),
            target: target.into(),
            reason: reason.into(),
        }
    }

    pub fn navigation(url: impl Into<String>, reason: impl Into<String>) -> Self {
        AutomationError::Navigation {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Sentence suitable for the speech channel. Never includes driver or
    /// provider error text.
    pub fn spoken(&self) -> String {
        match self {
            AutomationError::Resolution(target) => format!("Could not find {}", target),
            AutomationError::Action { action, target, .. } => {
                format!("Could not {} {}", action, target)
            }
            AutomationError::Planner(_) => "I could not work out how to do that".to_string(),
            AutomationError::Navigation { url, .. } => format!("Failed to navigate to {}", url),
            AutomationError::MalformedSelector(_) => "That selector is not valid".to_string(),
        }
    }
}
