use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

use super::{Handler, HandlerContext, OPEN_VERB, PICK_VERB, re, report};
use crate::command::Command;
use crate::selector::{DomSearch, Target, TargetKind};

static PURPOSE_DROPDOWN: Lazy<Regex> = Lazy::new(|| {
    re(&format!(r"(?i)^{}\s+(?:business\s+)?purpose(?:\s+dropdown)?$", OPEN_VERB))
});
static PURPOSE_AFTER: Lazy<Regex> = Lazy::new(|| {
    re(&format!(r"(?i)^{}\s+(?:business\s+)?purpose\s+(?:of\s+)?(.+)$", PICK_VERB))
});
static PURPOSE_BEFORE: Lazy<Regex> = Lazy::new(|| {
    re(&format!(
        r"(?i)^{}\s+(.+?)\s+(?:as|for)\s+(?:the\s+)?(?:business\s+)?purpose$",
        PICK_VERB
    ))
});

fn purpose_dropdown() -> Target {
    Target::of_kind(TargetKind::BusinessPurposeDropdown).with_dom_search(DomSearch::open_dropdown(
        "CD_Business_Purpose_Details",
        &["business purpose", "purpose"],
        None,
    ))
}

/// Business purpose dropdown of the formation form.
pub struct BusinessPurposeHandler;

#[async_trait]
impl Handler for BusinessPurposeHandler {
    fn name(&self) -> &str {
        "business_purpose"
    }

    async fn handle(&self, command: &Command, ctx: &HandlerContext<'_>) -> bool {
        let text = command.text.trim();

        if PURPOSE_DROPDOWN.is_match(text) {
            let result = ctx.engine.click(&purpose_dropdown()).await;
            return report(ctx, result, "Opened the business purpose dropdown").await;
        }

        let purpose = PURPOSE_AFTER
            .captures(text)
            .or_else(|| PURPOSE_BEFORE.captures(text))
            .map(|caps| caps[1].trim().to_string());
        let Some(purpose) = purpose else {
            return false;
        };

        let result = ctx.engine.select_from_dropdown(&purpose_dropdown(), &purpose, true).await;
        report(ctx, result, &format!("Selected business purpose {}", purpose)).await
    }
}
