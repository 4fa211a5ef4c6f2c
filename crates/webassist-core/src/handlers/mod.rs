//! Command handlers.
//!
//! Each handler is stateless and either claims a command (and fully
//! processes it, speaking the result) or declines it. The registry tries
//! them in a fixed priority order.

mod business;
mod click;
mod form;
mod login;
mod member;
mod navigation;
mod product;
mod selection;

use async_trait::async_trait;
use regex::Regex;
use tracing::{debug, info};

use crate::action::ExecutionOutcome;
use crate::command::Command;
use crate::engine::Engine;
use crate::error::AutomationError;
use crate::session::Session;

pub use business::BusinessPurposeHandler;
pub use click::ClickHandler;
pub use form::FormFillingHandler;
pub use login::LoginHandler;
pub use member::MemberManagerHandler;
pub use navigation::NavigationHandler;
pub use product::ProductHandler;
pub use selection::SelectionHandler;

/// What a handler can reach while processing one command.
pub struct HandlerContext<'a> {
    pub engine: &'a Engine,
    pub session: &'a Session,
}

#[async_trait]
pub trait Handler: Send + Sync {
    fn name(&self) -> &str;

    /// Claim and process `command`, or return false to pass it on.
    async fn handle(&self, command: &Command, ctx: &HandlerContext<'_>) -> bool;
}

/// Ordered handler chain.
pub struct HandlerRegistry {
    handlers: Vec<Box<dyn Handler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self { handlers: Vec::new() }
    }

    /// The built-in chain: login, specialized domain handlers, form
    /// filling, business purpose, member/manager, selection, navigation,
    /// generic click.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(LoginHandler));
        registry.register(Box::new(ProductHandler));
        registry.register(Box::new(FormFillingHandler));
        registry.register(Box::new(BusinessPurposeHandler));
        registry.register(Box::new(MemberManagerHandler));
        registry.register(Box::new(SelectionHandler));
        registry.register(Box::new(NavigationHandler));
        registry.register(Box::new(ClickHandler));
        registry
    }

    /// Append a handler at the lowest priority.
    pub fn register(&mut self, handler: Box<dyn Handler>) {
        self.handlers.push(handler);
    }

    pub fn names(&self) -> Vec<&str> {
        self.handlers.iter().map(|h| h.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Offer `command` to each handler in order. Returns the name of the
    /// handler that claimed it.
    pub async fn dispatch(&self, command: &Command, ctx: &HandlerContext<'_>) -> Option<&str> {
        for handler in &self.handlers {
            if handler.handle(command, ctx).await {
                info!("'{}' handled by {}", command.text, handler.name());
                return Some(handler.name());
            }
            debug!("{} declined '{}'", handler.name(), command.text);
        }
        None
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Verbs that open or focus a control, as a non-capturing group with an
/// optional "on"/"the". "open X" arrives here as "go to X".
pub(crate) const OPEN_VERB: &str = r"(?:click|select|open|go to|find|show|choose)(?:\s+on)?(?:\s+the)?";

/// Verbs that pick a value.
pub(crate) const PICK_VERB: &str = r"(?:select|choose|pick)";

pub(crate) fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("handler pattern must compile")
}

/// Speak `success` or the error's spoken form. Always claims.
pub(crate) async fn report(
    ctx: &HandlerContext<'_>,
    result: Result<ExecutionOutcome, AutomationError>,
    success: &str,
) -> bool {
    match result {
        Ok(_) => ctx.engine.speak(success).await,
        Err(e) => {
            info!("{}", e);
            ctx.engine.speak(&e.spoken()).await;
        }
    }
    true
}

/// Retry a failed command through the planner when one is configured,
/// otherwise report the original failure.
pub(crate) async fn with_planner_fallback(
    ctx: &HandlerContext<'_>,
    command: &Command,
    result: Result<ExecutionOutcome, AutomationError>,
    success: &str,
) -> bool {
    let error = match result {
        Ok(_) => {
            ctx.engine.speak(success).await;
            return true;
        }
        Err(e) => e,
    };

    if ctx.engine.has_planner() {
        info!("{}; asking the planner", error);
        match ctx.engine.plan_and_execute(&command.text).await {
            Ok(outcomes) => {
                let message = outcomes
                    .last()
                    .map(|o| o.message.clone())
                    .unwrap_or_else(|| success.to_string());
                ctx.engine.speak(&message).await;
                return true;
            }
            Err(planner_error) => debug!("Planner fallback failed: {}", planner_error),
        }
    }

    ctx.engine.speak(&error.spoken()).await;
    true
}

#[cfg(test)]
#[path = "handlers_tests.rs"]
mod tests;
