use async_trait::async_trait;
use tracing::debug;

use super::{Handler, HandlerContext, with_planner_fallback};
use crate::classifier::target_to_url;
use crate::command::{Command, Intent};
use crate::selector::{Target, TargetKind};

/// Page loads and site search.
pub struct NavigationHandler;

impl NavigationHandler {
    async fn navigate(&self, url: &str, ctx: &HandlerContext<'_>) -> bool {
        let engine = ctx.engine;
        engine.speak(&format!("Navigating to {}", url)).await;
        match engine.navigate(url).await {
            Ok(_) => {
                let title = engine.title().await;
                if title.is_empty() {
                    engine.speak(&format!("Loaded {}", engine.current_url().await)).await;
                } else {
                    engine.speak(&format!("Loaded: {}", title)).await;
                }
            }
            Err(e) => {
                debug!("{}", e);
                engine.speak(&e.spoken()).await;
            }
        }
        true
    }

    async fn search(&self, query: &str, command: &Command, ctx: &HandlerContext<'_>) -> bool {
        let engine = ctx.engine;
        let result = match engine.fill(&Target::of_kind(TargetKind::SearchBox), query).await {
            Ok(outcome) => engine.press("Enter").await.map(|_| outcome),
            Err(e) => Err(e),
        };
        with_planner_fallback(ctx, command, result, &format!("Searching for {}", query)).await
    }
}

#[async_trait]
impl Handler for NavigationHandler {
    fn name(&self) -> &str {
        "navigation"
    }

    async fn handle(&self, command: &Command, ctx: &HandlerContext<'_>) -> bool {
        match command.intent {
            Intent::Navigation => {
                let url = command
                    .param("url")
                    .map(str::to_string)
                    .or_else(|| target_to_url(&command.target));
                match url {
                    Some(url) => self.navigate(&url, ctx).await,
                    None => false,
                }
            }
            Intent::Search => match command.param("query") {
                Some(query) if !query.trim().is_empty() => self.search(query, command, ctx).await,
                _ => false,
            },
            _ => false,
        }
    }
}
