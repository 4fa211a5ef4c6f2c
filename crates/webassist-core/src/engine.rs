//! The automation facade handlers work through.

use std::sync::Arc;

use tracing::{debug, info, warn};
use webassist_config::AutomationConfig;
use webassist_protocols::{ChannelError, PageDriver, SpeechChannel};

use crate::action::{Action, ActionKind, ExecutionOutcome};
use crate::context::PageContext;
use crate::error::AutomationError;
use crate::executor::{ActionExecutor, RetryPolicy};
use crate::planner::{ActionPlanner, PlanOutcome};
use crate::selector::{DomSearch, SelectorCandidateSet, SelectorResolver, Target};

/// True for URLs of a sign-in page, which get one retry at the configured
/// login URL when they fail to load.
pub fn is_signin_url(url: &str) -> bool {
    let lower = url.to_lowercase();
    lower.contains("signin") || lower.contains("sign-in") || lower.contains("/login")
}

pub struct Engine {
    driver: Arc<dyn PageDriver>,
    channel: Arc<dyn SpeechChannel>,
    resolver: SelectorResolver,
    executor: ActionExecutor,
    planner: Option<Arc<ActionPlanner>>,
    config: AutomationConfig,
}

impl Engine {
    pub fn new(
        driver: Arc<dyn PageDriver>,
        channel: Arc<dyn SpeechChannel>,
        planner: Option<Arc<ActionPlanner>>,
        config: AutomationConfig,
    ) -> Self {
        Self {
            resolver: SelectorResolver::new(driver.clone(), planner.clone()),
            executor: ActionExecutor::new(driver.clone(), RetryPolicy::from(&config)),
            driver,
            channel,
            planner,
            config,
        }
    }

    /// Replace the retry policy derived from the configuration.
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.executor = ActionExecutor::new(self.driver.clone(), policy);
        self
    }

    pub fn driver(&self) -> &Arc<dyn PageDriver> {
        &self.driver
    }

    pub fn config(&self) -> &AutomationConfig {
        &self.config
    }

    pub fn has_planner(&self) -> bool {
        self.planner.is_some()
    }

    /// Say something on the speech channel and echo it to the log.
    pub async fn speak(&self, text: &str) {
        info!("Assistant: {}", text);
        self.channel.speak(text).await;
    }

    pub async fn display(&self, text: &str) {
        self.channel.display(text).await;
    }

    pub async fn listen(&self) -> Result<String, ChannelError> {
        self.channel.listen().await
    }

    pub async fn current_url(&self) -> String {
        self.driver.url().await.unwrap_or_default()
    }

    pub async fn title(&self) -> String {
        self.driver.title().await.unwrap_or_default()
    }

    /// Resolve `target` through the selector chain and act on it.
    pub async fn perform(
        &self,
        kind: ActionKind,
        target: &Target,
        value: Option<&str>,
    ) -> Result<ExecutionOutcome, AutomationError> {
        let mut action = Action::new(kind, &target.description);
        action.value = value.map(str::to_string);

        let candidates = match self.resolver.resolve(target, kind, None).await {
            Ok(resolution) => resolution.candidates,
            Err(e) => {
                debug!("{}; falling back to DOM search", e);
                SelectorCandidateSet::new()
            }
        };
        self.executor.execute(&action, &candidates, target.dom_search.as_ref()).await
    }

    pub async fn click(&self, target: &Target) -> Result<ExecutionOutcome, AutomationError> {
        self.perform(ActionKind::Click, target, None).await
    }

    pub async fn fill(&self, target: &Target, text: &str) -> Result<ExecutionOutcome, AutomationError> {
        self.perform(ActionKind::Type, target, Some(text)).await
    }

    pub async fn check(&self, target: &Target) -> Result<ExecutionOutcome, AutomationError> {
        self.perform(ActionKind::Check, target, None).await
    }

    /// Click the option of an open dropdown whose text contains `option`.
    pub async fn choose_option(&self, option: &str) -> Result<ExecutionOutcome, AutomationError> {
        let quoted = option.replace('"', "\\\"");
        let target = Target::new(option)
            .with_kind(None)
            .prefer([
                format!("li.p-dropdown-item:has-text(\"{}\")", quoted),
                format!("[role=\"option\"]:has-text(\"{}\")", quoted),
                format!("option:has-text(\"{}\")", quoted),
            ])
            .with_dom_search(DomSearch::dropdown_item(option));
        self.click(&target).await
    }

    /// Open `dropdown`, optionally narrow it through its filter box, then
    /// pick `option`.
    pub async fn select_from_dropdown(
        &self,
        dropdown: &Target,
        option: &str,
        use_filter: bool,
    ) -> Result<ExecutionOutcome, AutomationError> {
        self.click(dropdown).await?;
        if use_filter && !self.run_dom_search(&DomSearch::dropdown_filter(option)).await {
            debug!("No filter box in {}; picking from the full list", dropdown.description);
        }
        self.choose_option(option).await?;
        Ok(ExecutionOutcome {
            selector: None,
            used_dom_search: false,
            message: format!("Selected {} in {}", option, dropdown.description),
        })
    }

    pub async fn run_dom_search(&self, search: &DomSearch) -> bool {
        self.executor.dom_search(search).await
    }

    pub async fn press(&self, key: &str) -> Result<(), AutomationError> {
        self.driver
            .press_key(key)
            .await
            .map_err(|e| AutomationError::action("press", key, e.to_string()))
    }

    /// Load `url`. A sign-in URL that fails is retried once at the
    /// configured login URL.
    pub async fn navigate(&self, url: &str) -> Result<ExecutionOutcome, AutomationError> {
        match self.executor.execute_action(&Action::navigate(url)).await {
            Ok(outcome) => Ok(outcome),
            Err(e) if is_signin_url(url) && url != self.config.login_url => {
                warn!("{}; retrying at {}", e, self.config.login_url);
                self.executor
                    .execute_action(&Action::navigate(&self.config.login_url))
                    .await
                    .map_err(|_| e)
            }
            Err(e) => Err(e),
        }
    }

    pub async fn capture_context(&self) -> PageContext {
        PageContext::capture(self.driver.as_ref()).await
    }

    /// Hand the command to the planner and execute whatever comes back.
    pub async fn plan_and_execute(&self, command: &str) -> Result<Vec<ExecutionOutcome>, AutomationError> {
        let Some(planner) = &self.planner else {
            return Err(AutomationError::Planner("no language model configured".to_string()));
        };

        let context = self.capture_context().await;
        match planner.plan(command, &context).await {
            PlanOutcome::Actions(plan) => {
                info!("Executing {} planned action(s) at confidence {:.2}", plan.actions.len(), plan.confidence);
                let mut outcomes = Vec::with_capacity(plan.actions.len());
                for action in &plan.actions {
                    let outcome = match action.kind {
                        ActionKind::Navigate => {
                            let url = action.url.as_deref().unwrap_or_default();
                            self.navigate(url).await?
                        }
                        _ => self.executor.execute_action(action).await?,
                    };
                    outcomes.push(outcome);
                }
                Ok(outcomes)
            }
            PlanOutcome::Selectors(candidates) => {
                let action = Action::click(command);
                let outcome = self.executor.execute(&action, &candidates, None).await?;
                Ok(vec![outcome])
            }
            PlanOutcome::Declined(reason) => Err(AutomationError::Planner(reason)),
        }
    }
}
