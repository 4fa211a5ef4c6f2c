//! Selector resolution chain.
//!
//! Candidates come from four tiers tried strictly in order: curated
//! selectors, heuristic templates, language-model suggestions and finally a
//! DOM-search script run by the executor.

mod candidates;
mod curated;
mod dom_search;
mod heuristic;
mod llm_parse;
mod resolver;

pub use candidates::{SelectorCandidateSet, is_valid, repair};
pub use curated::TargetKind;
pub use dom_search::{DomSearch, search_succeeded};
pub use heuristic::{core_text, heuristic_selectors};
pub use llm_parse::{MAX_SUGGESTIONS, looks_like_selector, parse_selector_response, strip_code_fence};
pub use resolver::{Resolution, SelectorResolver, Target, Tier};
