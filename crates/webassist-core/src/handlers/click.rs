use async_trait::async_trait;

use super::{Handler, HandlerContext, with_planner_fallback};
use crate::command::{Command, Intent};
use crate::selector::{DomSearch, Target, core_text};

/// Generic click by description, including tabs.
pub struct ClickHandler;

fn click_target(element: &str) -> Target {
    let element = element.trim();
    let quoted = |s: &str| s.replace('"', "\\\"");

    if let Some(name) = element
        .strip_suffix(" tab")
        .or_else(|| element.strip_suffix(" Tab"))
    {
        let name = name.trim();
        return Target::new(element)
            .with_kind(None)
            .prefer([
                format!("[role=\"tab\"]:has-text(\"{}\")", quoted(name)),
                format!(".p-tabview-nav a:has-text(\"{}\")", quoted(name)),
                format!(".nav-tabs a:has-text(\"{}\")", quoted(name)),
            ])
            .with_dom_search(DomSearch::tab(name));
    }

    Target::new(element).with_dom_search(DomSearch::click_by_text(&core_text(element)))
}

#[async_trait]
impl Handler for ClickHandler {
    fn name(&self) -> &str {
        "click"
    }

    async fn handle(&self, command: &Command, ctx: &HandlerContext<'_>) -> bool {
        if command.intent != Intent::Click {
            return false;
        }
        let element = command.param("element").unwrap_or(&command.target);
        if element.trim().is_empty() {
            return false;
        }

        let target = click_target(element);
        let result = ctx.engine.click(&target).await;
        with_planner_fallback(ctx, command, result, &format!("Clicked {}", target.description)).await
    }
}
