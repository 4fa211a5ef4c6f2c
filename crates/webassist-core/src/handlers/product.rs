use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

use super::{Handler, HandlerContext, re};
use crate::command::Command;
use crate::selector::DomSearch;

static PRODUCT: Lazy<Regex> = Lazy::new(|| {
    re(r"(?i)^(?:check|select|tick|choose)\s+(?:the\s+)?(?:product\s+(.+?)|(.+?)\s+product)$")
});
static ALL_PRODUCTS: Lazy<Regex> =
    Lazy::new(|| re(r"(?i)^(?:check|select|tick|choose)\s+(?:all\s+(?:the\s+)?products|every\s+product)$"));

/// Product cards on the order page.
pub struct ProductHandler;

#[async_trait]
impl Handler for ProductHandler {
    fn name(&self) -> &str {
        "product"
    }

    async fn handle(&self, command: &Command, ctx: &HandlerContext<'_>) -> bool {
        let text = command.text.trim();

        if ALL_PRODUCTS.is_match(text) {
            ctx.engine.speak("Checking all products...").await;
            if ctx.engine.run_dom_search(&DomSearch::all_product_checkboxes()).await {
                ctx.engine.speak("Checked all products").await;
            } else {
                ctx.engine.speak("Could not find any product checkboxes").await;
            }
            return true;
        }

        let Some(caps) = PRODUCT.captures(text) else {
            return false;
        };
        let Some(name) = caps.get(1).or_else(|| caps.get(2)).map(|m| m.as_str().trim()) else {
            return false;
        };

        ctx.engine.speak(&format!("Looking for product {}...", name)).await;
        let search = DomSearch::product_checkbox(&[name.to_lowercase()]);
        if ctx.engine.run_dom_search(&search).await {
            ctx.engine.speak(&format!("Checked product {}", name)).await;
        } else {
            ctx.engine.speak(&format!("Could not find product {}", name)).await;
        }
        true
    }
}
