//! LLM action planner.
//!
//! Advisory only: every plan goes back through the selector validity
//! filter before it reaches the page, and every failure is absorbed into
//! [`PlanOutcome::Declined`].

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::action::{Action, ActionKind, ActionPlan};
use crate::context::PageContext;
use crate::generator::{GenerationOptions, TextGenerator};
use crate::selector::{SelectorCandidateSet, parse_selector_response, strip_code_fence};

/// Descriptor caps for prompt construction.
pub const PROMPT_MAX_INPUTS: usize = 10;
pub const PROMPT_MAX_BUTTONS: usize = 10;

/// Confidence assumed for a plan that does not state one.
const DEFAULT_PLAN_CONFIDENCE: f64 = 0.7;

const PLAN_SYSTEM: &str = "You are a web automation assistant. Given a user command and a \
description of the current page, reply with JSON only, in this shape:\n\
{\"actions\": [{\"type\": \"click|type|navigate|select|hover|check|wait\", \
\"selector\": \"CSS selector\", \"fallback_selectors\": [\"...\"], \"value\": \"text to type or option\", \
\"url\": \"for navigate\", \"purpose\": \"short description\"}], \"confidence\": 0.0}\n\
Use CSS selectors. You may use :has-text(\"...\") for text matching. Return \
{\"actions\": []} if the command cannot be performed on this page.";

const SELECTOR_SYSTEM: &str = "You find CSS selectors for elements on a web page. Reply with a \
JSON array of at most five selector strings, most likely first, and nothing else. You may use \
:has-text(\"...\") for text matching.";

/// Result of a planner call.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanOutcome {
    Actions(ActionPlan),
    Selectors(SelectorCandidateSet),
    /// Error, timeout, empty or unusable response.
    Declined(String),
}

impl PlanOutcome {
    pub fn confidence(&self) -> f64 {
        match self {
            PlanOutcome::Actions(plan) => plan.confidence,
            PlanOutcome::Selectors(set) if !set.is_empty() => DEFAULT_PLAN_CONFIDENCE,
            _ => 0.0,
        }
    }

    pub fn is_declined(&self) -> bool {
        self.confidence() == 0.0
    }
}

pub struct ActionPlanner {
    generator: TextGenerator,
    options: GenerationOptions,
}

impl ActionPlanner {
    pub fn new(generator: TextGenerator, options: GenerationOptions) -> Self {
        Self { generator, options }
    }

    /// Turn a command into an action plan or selector list. Never fails.
    pub async fn plan(&self, command: &str, context: &PageContext) -> PlanOutcome {
        let prompt = format!(
            "Command: {}\n\nCurrent page:\n{}",
            command,
            context.to_prompt(PROMPT_MAX_INPUTS, PROMPT_MAX_BUTTONS)
        );

        info!("Asking {} to plan '{}'", self.generator.model(), command);
        match self.generator.generate(PLAN_SYSTEM, &prompt, &self.options).await {
            Ok(text) => {
                let outcome = parse_plan(&text);
                debug!("Planner outcome for '{}': {:?}", command, outcome);
                outcome
            }
            Err(e) => {
                warn!("Planner request failed: {}", e);
                PlanOutcome::Declined(e.to_string())
            }
        }
    }

    /// Ask for selectors matching a target description. Empty on failure.
    pub async fn suggest_selectors(
        &self,
        description: &str,
        context: &PageContext,
        hint: Option<&str>,
    ) -> SelectorCandidateSet {
        let mut prompt = format!(
            "Element wanted: {}\n\nCurrent page:\n{}",
            description,
            context.to_prompt(PROMPT_MAX_INPUTS, PROMPT_MAX_BUTTONS)
        );
        if let Some(hint) = hint {
            prompt.push_str(&format!("\nHint: {}\n", hint));
        }

        match self.generator.generate(SELECTOR_SYSTEM, &prompt, &self.options).await {
            Ok(text) => {
                let set = SelectorCandidateSet::from_raw(parse_selector_response(&text));
                debug!("Suggested selectors for '{}': {:?}", description, set.as_slice());
                set
            }
            Err(e) => {
                warn!("Selector suggestion failed: {}", e);
                SelectorCandidateSet::new()
            }
        }
    }
}

/// Parse a planner response.
pub fn parse_plan(text: &str) -> PlanOutcome {
    let body = strip_code_fence(text);

    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => {
            let actions: Vec<Action> = map
                .get("actions")
                .and_then(Value::as_array)
                .map(|items| items.iter().filter_map(action_from_value).collect())
                .unwrap_or_default();
            if actions.is_empty() {
                if let Some(selectors) = map.get("selectors").and_then(Value::as_array) {
                    return selectors_outcome(selectors.iter().filter_map(Value::as_str));
                }
                return PlanOutcome::Declined("no usable actions".to_string());
            }
            let confidence = map
                .get("confidence")
                .and_then(Value::as_f64)
                .filter(|c| *c > 0.0)
                .unwrap_or(DEFAULT_PLAN_CONFIDENCE);
            PlanOutcome::Actions(ActionPlan::new(actions, confidence))
        }
        Ok(Value::Array(items)) => {
            if items.iter().all(Value::is_string) {
                return selectors_outcome(items.iter().filter_map(Value::as_str));
            }
            let actions: Vec<Action> = items.iter().filter_map(action_from_value).collect();
            if actions.is_empty() {
                PlanOutcome::Declined("no usable actions".to_string())
            } else {
                PlanOutcome::Actions(ActionPlan::new(actions, DEFAULT_PLAN_CONFIDENCE))
            }
        }
        _ => selectors_outcome(parse_selector_response(text).iter().map(String::as_str)),
    }
}

fn selectors_outcome<'a>(raw: impl Iterator<Item = &'a str>) -> PlanOutcome {
    let set = SelectorCandidateSet::from_raw(raw);
    if set.is_empty() {
        PlanOutcome::Declined("no valid selectors".to_string())
    } else {
        PlanOutcome::Selectors(set)
    }
}

fn action_from_value(value: &Value) -> Option<Action> {
    let text = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_string);

    let kind: ActionKind = ["type", "kind", "action"]
        .iter()
        .find_map(|key| text(key))?
        .parse()
        .ok()?;

    let fallbacks = value
        .get("fallback_selectors")
        .and_then(Value::as_array)
        .map(|list| list.iter().filter_map(Value::as_str).map(str::to_string).collect())
        .unwrap_or_default();

    let action = Action {
        kind,
        selector: text("selector").unwrap_or_default(),
        fallback_selectors: fallbacks,
        value: text("value").or_else(|| text("text")),
        url: text("url"),
        purpose: text("purpose")
            .or_else(|| text("description"))
            .unwrap_or_else(|| kind.as_str().to_string()),
    };

    let usable = match kind {
        ActionKind::Navigate => action.url.is_some(),
        ActionKind::Wait => true,
        _ => action.selectors().next().is_some(),
    };
    usable.then_some(action)
}

#[cfg(test)]
#[path = "planner_tests.rs"]
mod tests;
