use async_trait::async_trait;

use super::{Handler, HandlerContext, report, with_planner_fallback};
use crate::command::{Command, Intent};
use crate::selector::{DomSearch, Target, TargetKind};

/// Single-field form filling. Email plus password together belongs to
/// the login handler.
pub struct FormFillingHandler;

/// Description used in messages and for the text heuristics.
fn field_target(field: &str, value: &str) -> Target {
    let field = field.trim();
    let field = field.strip_prefix("the ").unwrap_or(field);
    let field = field.strip_suffix(" field").unwrap_or(field);
    match TargetKind::from_description(field) {
        Some(kind) => Target::of_kind(kind).with_dom_search(DomSearch::fill_by_purpose(field, value)),
        None => Target::new(field).with_dom_search(DomSearch::fill_by_purpose(field, value)),
    }
}

#[async_trait]
impl Handler for FormFillingHandler {
    fn name(&self) -> &str {
        "form_filling"
    }

    async fn handle(&self, command: &Command, ctx: &HandlerContext<'_>) -> bool {
        if command.intent != Intent::FormFilling {
            return false;
        }
        let engine = ctx.engine;

        if let Some(email) = command.param("email") {
            let result = engine.fill(&Target::of_kind(TargetKind::Email), email).await;
            return report(ctx, result, &format!("Entered email {}", email)).await;
        }

        if let Some(password) = command.param("password") {
            let result = engine.fill(&Target::of_kind(TargetKind::Password), password).await;
            return report(ctx, result, "Entered password").await;
        }

        let (Some(field), Some(value)) = (command.param("field"), command.param("value")) else {
            return false;
        };

        let target = field_target(field, value);
        let result = engine.fill(&target, value).await;
        let message = format!("Entered {} in {}", value, target.description);
        with_planner_fallback(ctx, command, result, &message).await
    }
}
