//! Tiered resolution against the live page.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info};
use webassist_protocols::PageDriver;

use super::{DomSearch, SelectorCandidateSet, TargetKind, heuristic_selectors};
use crate::action::ActionKind;
use crate::context::PageContext;
use crate::error::AutomationError;
use crate::planner::ActionPlanner;

/// Resolution tier. Tier 4 is the DOM search the executor runs last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tier {
    Curated = 1,
    Heuristic = 2,
    Suggested = 3,
    DomSearch = 4,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tier::Curated => "curated",
            Tier::Heuristic => "heuristic",
            Tier::Suggested => "suggested",
            Tier::DomSearch => "dom-search",
        };
        write!(f, "tier {} ({})", *self as u8, name)
    }
}

/// What to find. Handlers describe targets as data instead of bespoke
/// click routines.
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    /// Free-text description, also used in spoken failures.
    pub description: String,
    /// Curated list to try first; inferred from the description when unset.
    pub kind: Option<TargetKind>,
    /// Selectors tried ahead of the curated list.
    pub preferred: Vec<String>,
    /// Tier 4 fallback.
    pub dom_search: Option<DomSearch>,
}

impl Target {
    pub fn new(description: impl Into<String>) -> Self {
        let description = description.into();
        Self {
            kind: TargetKind::from_description(&description),
            description,
            preferred: Vec::new(),
            dom_search: None,
        }
    }

    pub fn of_kind(kind: TargetKind) -> Self {
        Self {
            description: kind.label().to_string(),
            kind: Some(kind),
            preferred: Vec::new(),
            dom_search: None,
        }
    }

    pub fn with_kind(mut self, kind: Option<TargetKind>) -> Self {
        self.kind = kind;
        self
    }

    pub fn prefer<I, S>(mut self, selectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.preferred.extend(selectors.into_iter().map(Into::into));
        self
    }

    pub fn with_dom_search(mut self, search: DomSearch) -> Self {
        self.dom_search = Some(search);
        self
    }
}

/// Live candidates from the first tier that produced any.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub tier: Tier,
    pub candidates: SelectorCandidateSet,
}

pub struct SelectorResolver {
    driver: Arc<dyn PageDriver>,
    planner: Option<Arc<ActionPlanner>>,
}

impl SelectorResolver {
    pub fn new(driver: Arc<dyn PageDriver>, planner: Option<Arc<ActionPlanner>>) -> Self {
        Self { driver, planner }
    }

    /// Tier 1 candidates: preferred selectors, then the curated list.
    pub fn curated(target: &Target) -> SelectorCandidateSet {
        let mut set = SelectorCandidateSet::from_raw(&target.preferred);
        if let Some(kind) = target.kind {
            set.extend_raw(kind.selectors());
        }
        set
    }

    /// Resolve `target` for an action of `kind`.
    ///
    /// Tier `k + 1` runs only if no tier `k` candidate matched a live
    /// element. Errors with [`AutomationError::Resolution`] when tiers 1-3
    /// are exhausted; the caller then falls back to the target's DOM search.
    pub async fn resolve(
        &self,
        target: &Target,
        kind: ActionKind,
        llm_hint: Option<&str>,
    ) -> Result<Resolution, AutomationError> {
        let curated = Self::curated(target);
        if let Some(resolution) = self.probe(Tier::Curated, curated, &target.description).await {
            return Ok(resolution);
        }

        let heuristic = SelectorCandidateSet::from_raw(heuristic_selectors(&target.description, kind));
        if let Some(resolution) = self.probe(Tier::Heuristic, heuristic, &target.description).await {
            return Ok(resolution);
        }

        if let Some(planner) = &self.planner {
            let context = PageContext::capture(self.driver.as_ref()).await;
            let suggested = planner
                .suggest_selectors(&target.description, &context, llm_hint)
                .await;
            if let Some(resolution) = self.probe(Tier::Suggested, suggested, &target.description).await {
                return Ok(resolution);
            }
        }

        info!("No live selector for '{}' after tiers 1-3", target.description);
        Err(AutomationError::Resolution(target.description.clone()))
    }

    async fn probe(
        &self,
        tier: Tier,
        candidates: SelectorCandidateSet,
        description: &str,
    ) -> Option<Resolution> {
        if candidates.is_empty() {
            return None;
        }

        let mut live = SelectorCandidateSet::new();
        for selector in candidates.iter() {
            match self.driver.query(selector).await {
                Ok(Some(_)) => {
                    live.push(selector);
                }
                Ok(None) => {}
                Err(e) => debug!("Query '{}' failed: {}", selector, e),
            }
        }

        if live.is_empty() {
            debug!("{} found nothing for '{}'", tier, description);
            return None;
        }

        info!("{} matched {} candidate(s) for '{}'", tier, live.len(), description);
        Some(Resolution {
            tier,
            candidates: live,
        })
    }
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
