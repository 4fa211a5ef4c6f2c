//! # WebAssist Core
//!
//! Command resolution and action execution engine.
//!
//! ## Pipeline
//!
//! - [`normalize`] - misheard domain and word correction, canonical "go to"
//! - [`CommandClassifier`] - ordered pattern matching into an [`Intent`]
//! - [`HandlerRegistry`] - specialized handlers tried in priority order
//! - [`SelectorResolver`] - curated, heuristic and suggested selector tiers
//! - [`ActionExecutor`] - per-selector retries with linear backoff, then DOM search
//! - [`ActionPlanner`] - advisory language-model fallback
//! - [`Assistant`] - the dispatcher owning the [`Session`]

pub mod action;
pub mod classifier;
pub mod command;
pub mod context;
pub mod dispatcher;
pub mod engine;
pub mod error;
pub mod executor;
pub mod generator;
pub mod handlers;
pub mod normalizer;
pub mod planner;
pub mod selector;
pub mod session;

mod phrases;

#[cfg(test)]
pub(crate) mod testing;

pub use action::{Action, ActionKind, ActionPlan, ExecutionOutcome};
pub use classifier::{CommandClassifier, DEFAULT_FUZZY_THRESHOLD, target_to_url};
pub use command::{Command, Intent};
pub use context::PageContext;
pub use dispatcher::{Assistant, DispatchOutcome, HELP_TEXT};
pub use engine::Engine;
pub use error::AutomationError;
pub use executor::{ActionExecutor, RetryPolicy};
pub use generator::{GenerationOptions, TextGenerator};
pub use handlers::{Handler, HandlerContext, HandlerRegistry};
pub use normalizer::normalize;
pub use planner::{ActionPlanner, PlanOutcome};
pub use selector::{SelectorCandidateSet, SelectorResolver, Target, TargetKind, Tier};
pub use session::{CommandHistory, PendingConfirmation, Session};
