//! Action executor.
//!
//! Tries each candidate selector in order, retrying every selector with a
//! linearly growing backoff, and finishes with the target's DOM search
//! before giving up.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, info, warn};
use webassist_config::AutomationConfig;
use webassist_protocols::{DriverError, PageDriver};

use crate::action::{Action, ActionKind, ExecutionOutcome};
use crate::error::AutomationError;
use crate::selector::{DomSearch, SelectorCandidateSet, search_succeeded};

/// Retry and timing policy.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Attempts per selector.
    pub max_retries: u32,
    /// Backoff after attempt `n` is `base_delay * n`.
    pub base_delay: Duration,
    pub element_timeout: Duration,
    pub navigation_timeout: Duration,
    /// Pause after clicks and dropdown openings.
    pub settle: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&AutomationConfig::default())
    }
}

impl From<&AutomationConfig> for RetryPolicy {
    fn from(config: &AutomationConfig) -> Self {
        Self {
            max_retries: config.max_retries.max(1),
            base_delay: config.retry_base(),
            element_timeout: config.element_timeout(),
            navigation_timeout: config.navigation_timeout(),
            settle: config.settle(),
        }
    }
}

impl RetryPolicy {
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        self.base_delay * attempt
    }
}

/// Why a single attempt failed.
enum AttemptFailure {
    /// The element never became visible.
    Missing(DriverError),
    /// The element was there but the action failed.
    Refused(DriverError),
}

pub struct ActionExecutor {
    driver: Arc<dyn PageDriver>,
    policy: RetryPolicy,
}

impl ActionExecutor {
    pub fn new(driver: Arc<dyn PageDriver>, policy: RetryPolicy) -> Self {
        Self { driver, policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Execute an action using its own selectors, after the validity filter.
    pub async fn execute_action(&self, action: &Action) -> Result<ExecutionOutcome, AutomationError> {
        let candidates = SelectorCandidateSet::from_raw(action.selectors());
        self.execute(action, &candidates, None).await
    }

    /// Execute `action` against `candidates` in order, then `fallback`.
    pub async fn execute(
        &self,
        action: &Action,
        candidates: &SelectorCandidateSet,
        fallback: Option<&DomSearch>,
    ) -> Result<ExecutionOutcome, AutomationError> {
        match action.kind {
            ActionKind::Navigate => return self.navigate(action).await,
            ActionKind::Wait => return self.wait(action).await,
            _ => {}
        }

        let mut element_found = false;
        let mut last_reason = String::from("no candidate selectors");

        for selector in candidates.iter() {
            for attempt in 1..=self.policy.max_retries {
                debug!(
                    "{} '{}' via {} (attempt {}/{})",
                    action.kind.as_str(),
                    action.purpose,
                    selector,
                    attempt,
                    self.policy.max_retries
                );
                match self.attempt(action, selector).await {
                    Ok(()) => {
                        info!("{} '{}' succeeded with {}", action.kind.as_str(), action.purpose, selector);
                        return Ok(ExecutionOutcome {
                            selector: Some(selector.to_string()),
                            used_dom_search: false,
                            message: describe(action),
                        });
                    }
                    Err(failure) => {
                        let error = match failure {
                            AttemptFailure::Missing(e) => e,
                            AttemptFailure::Refused(e) => {
                                element_found = true;
                                e
                            }
                        };
                        warn!(
                            "Attempt {}/{} on '{}' failed: {}",
                            attempt, self.policy.max_retries, selector, error
                        );
                        last_reason = error.to_string();
                        if attempt < self.policy.max_retries {
                            sleep(self.policy.delay_for_attempt(attempt)).await;
                        }
                    }
                }
            }
        }

        if let Some(search) = fallback {
            if self.dom_search(search).await {
                info!("DOM search '{}' handled '{}'", search.name, action.purpose);
                return Ok(ExecutionOutcome {
                    selector: None,
                    used_dom_search: true,
                    message: describe(action),
                });
            }
        }

        if element_found {
            Err(AutomationError::action(action.kind.verb(), &action.purpose, last_reason))
        } else {
            Err(AutomationError::Resolution(action.purpose.clone()))
        }
    }

    /// Run a DOM search script; errors count as "not found".
    pub async fn dom_search(&self, search: &DomSearch) -> bool {
        match self.driver.evaluate(search.script, search.args.clone()).await {
            Ok(result) => {
                let found = search_succeeded(&result);
                debug!("DOM search '{}' returned {}", search.name, result);
                found
            }
            Err(e) => {
                warn!("DOM search '{}' failed: {}", search.name, e);
                false
            }
        }
    }

    async fn attempt(&self, action: &Action, selector: &str) -> Result<(), AttemptFailure> {
        let state = self
            .driver
            .wait_for_selector(selector, self.policy.element_timeout)
            .await
            .map_err(AttemptFailure::Missing)?;

        if let Err(e) = self.driver.scroll_into_view(selector).await {
            debug!("Scroll into view failed for {}: {}", selector, e);
        }

        let result = match action.kind {
            ActionKind::Click => self.click(selector).await,
            ActionKind::Type => self.fill(selector, action.value.as_deref().unwrap_or("")).await,
            ActionKind::Select => self.select(selector, &state.tag, action.value.as_deref()).await,
            ActionKind::Hover => self.driver.hover(selector).await,
            ActionKind::Check => self.driver.check(selector).await,
            ActionKind::Navigate | ActionKind::Wait => Ok(()),
        };
        result.map_err(AttemptFailure::Refused)
    }

    async fn click(&self, selector: &str) -> Result<(), DriverError> {
        self.driver.click(selector).await?;
        sleep(self.policy.settle).await;
        Ok(())
    }

    /// Clear, fill, then check the value stuck.
    async fn fill(&self, selector: &str, text: &str) -> Result<(), DriverError> {
        self.driver.fill(selector, "").await?;
        self.driver.fill(selector, text).await?;
        match self.driver.read_value(selector).await? {
            Some(value) if value != text => Err(DriverError::Rejected(format!(
                "value of {} is '{}' after fill",
                selector, value
            ))),
            _ => Ok(()),
        }
    }

    async fn select(&self, selector: &str, tag: &str, value: Option<&str>) -> Result<(), DriverError> {
        match value {
            Some(value) if tag == "select" => self.driver.select_option(selector, value).await,
            Some(value) => {
                self.click(selector).await?;
                if self.dom_search(&DomSearch::dropdown_item(value)).await {
                    sleep(self.policy.settle).await;
                    Ok(())
                } else {
                    Err(DriverError::Rejected(format!("no option '{}' in {}", value, selector)))
                }
            }
            None => self.click(selector).await,
        }
    }

    async fn navigate(&self, action: &Action) -> Result<ExecutionOutcome, AutomationError> {
        let Some(url) = action.url.as_deref().or(action.value.as_deref()) else {
            return Err(AutomationError::navigation(&action.purpose, "no URL given"));
        };
        info!("Navigating to {}", url);
        self.driver
            .goto(url, self.policy.navigation_timeout)
            .await
            .map_err(|e| AutomationError::navigation(url, e.to_string()))?;
        Ok(ExecutionOutcome {
            selector: None,
            used_dom_search: false,
            message: format!("Navigated to {}", url),
        })
    }

    async fn wait(&self, action: &Action) -> Result<ExecutionOutcome, AutomationError> {
        let delay = action
            .value
            .as_deref()
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(self.policy.settle);
        sleep(delay).await;
        Ok(ExecutionOutcome {
            selector: None,
            used_dom_search: false,
            message: format!("Waited {} ms", delay.as_millis()),
        })
    }
}

fn describe(action: &Action) -> String {
    match (action.kind, action.value.as_deref()) {
        (ActionKind::Type, _) => format!("Filled {}", action.purpose),
        (ActionKind::Select, Some(value)) => format!("Selected {} in {}", value, action.purpose),
        (ActionKind::Check, _) => format!("Checked {}", action.purpose),
        (ActionKind::Hover, _) => format!("Hovered over {}", action.purpose),
        _ => format!("Clicked {}", action.purpose),
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
