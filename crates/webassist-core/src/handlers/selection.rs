use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::{Handler, HandlerContext, OPEN_VERB, PICK_VERB, re, report};
use crate::command::Command;
use crate::selector::{DomSearch, Target, TargetKind};

static FILTER: Lazy<Regex> =
    Lazy::new(|| re(r"(?i)^filter\s+(?:the\s+)?(?:dropdown|list)\s+(?:for\s+)?(.+)$"));

static ENTITY_DROPDOWN: Lazy<Regex> =
    Lazy::new(|| re(&format!(r"(?i)^{}\s+entity\s+type(?:\s+dropdown)?$", OPEN_VERB)));
static STATE_DROPDOWN: Lazy<Regex> = Lazy::new(|| {
    re(&format!(
        r"(?i)^{}\s+(?:state(?:\s+of\s+formation)?|formation\s+state)(?:\s+dropdown)?$",
        OPEN_VERB
    ))
});
static COUNTY_DROPDOWN: Lazy<Regex> =
    Lazy::new(|| re(&format!(r"(?i)^{}\s+county(?:\s+dropdown)?$", OPEN_VERB)));
static ADDRESS_DROPDOWN: Lazy<Regex> = Lazy::new(|| {
    re(&format!(r"(?i)^{}\s+(?:principal\s+)?address(?:\s+dropdown)?$", OPEN_VERB))
});
static BILLING_DROPDOWN: Lazy<Regex> = Lazy::new(|| {
    re(&format!(r"(?i)^{}\s+billing(?:\s+info(?:rmation)?)?(?:\s+dropdown)?$", OPEN_VERB))
});

static ENTITY_TYPE: Lazy<Regex> = Lazy::new(|| {
    re(&format!(
        r"(?i)^{}\s+(?:entity\s+type\s+)?(llc|corp|corporation|limited\s+liability\s+company)(?:\s+(?:as\s+)?(?:the\s+)?entity\s+type)?$",
        PICK_VERB
    ))
});
static STATE_AFTER: Lazy<Regex> =
    Lazy::new(|| re(&format!(r"(?i)^{}\s+(?:the\s+)?state\s+(?:of\s+)?(.+)$", PICK_VERB)));
static STATE_BEFORE: Lazy<Regex> = Lazy::new(|| {
    re(&format!(r"(?i)^{}\s+(.+?)\s+(?:as\s+(?:the\s+)?)?state$", PICK_VERB))
});
static COUNTY_AFTER: Lazy<Regex> =
    Lazy::new(|| re(&format!(r"(?i)^{}\s+(?:the\s+)?county\s+(?:of\s+)?(.+)$", PICK_VERB)));
static COUNTY_BEFORE: Lazy<Regex> = Lazy::new(|| {
    re(&format!(r"(?i)^{}\s+(.+?)\s+(?:as\s+(?:the\s+)?)?county$", PICK_VERB))
});
static ADDRESS_PICK: Lazy<Regex> = Lazy::new(|| {
    re(&format!(
        r"(?i)^{}\s+(?:the\s+)?(?:principal\s+)?(?:address|location)\s+(?:of\s+)?(.+?)(?:\s+from\s+(?:the\s+)?dropdown)?$",
        PICK_VERB
    ))
});

fn entity_type_dropdown() -> Target {
    Target::of_kind(TargetKind::EntityTypeDropdown)
        .with_dom_search(DomSearch::open_dropdown("entityType", &["entity type"], Some(0)))
}

/// The state of formation dropdown is the second dropdown on the page
/// when nothing else identifies it.
fn state_dropdown() -> Target {
    Target::of_kind(TargetKind::StateDropdown).with_dom_search(DomSearch::open_dropdown(
        "state",
        &["state of formation", "select a state", "state"],
        Some(1),
    ))
}

fn county_dropdown() -> Target {
    Target::of_kind(TargetKind::CountyDropdown)
        .with_dom_search(DomSearch::open_dropdown("county", &["county"], None))
}

fn principal_address_dropdown() -> Target {
    Target::of_kind(TargetKind::PrincipalAddressDropdown).with_dom_search(DomSearch::open_dropdown(
        "principalAddress",
        &["principal address", "address"],
        None,
    ))
}

fn billing_dropdown() -> Target {
    Target::of_kind(TargetKind::BillingInfoDropdown).with_dom_search(DomSearch::open_dropdown(
        "RA_Billing_Information",
        &["billing"],
        None,
    ))
}

fn first_capture(text: &str, patterns: &[&Lazy<Regex>]) -> Option<String> {
    patterns
        .iter()
        .find_map(|p| p.captures(text))
        .map(|caps: Captures<'_>| caps[1].trim().to_string())
}

/// Dropdowns and filters of the formation form.
pub struct SelectionHandler;

impl SelectionHandler {
    async fn open(&self, target: Target, ctx: &HandlerContext<'_>) -> bool {
        let result = ctx.engine.click(&target).await;
        report(ctx, result, &format!("Opened the {}", target.description)).await
    }

    async fn pick(&self, target: Target, option: &str, use_filter: bool, ctx: &HandlerContext<'_>) -> bool {
        ctx.engine.speak(&format!("Looking for {}...", option)).await;
        let result = ctx.engine.select_from_dropdown(&target, option, use_filter).await;
        report(ctx, result, &format!("Selected {}", option)).await
    }
}

#[async_trait]
impl Handler for SelectionHandler {
    fn name(&self) -> &str {
        "selection"
    }

    async fn handle(&self, command: &Command, ctx: &HandlerContext<'_>) -> bool {
        let text = command.text.trim();

        if let Some(caps) = FILTER.captures(text) {
            let query = caps[1].trim();
            if ctx.engine.run_dom_search(&DomSearch::dropdown_filter(query)).await {
                ctx.engine.speak(&format!("Filtered dropdown for '{}'", query)).await;
            } else {
                ctx.engine.speak("Please open a dropdown first").await;
            }
            return true;
        }

        if ENTITY_DROPDOWN.is_match(text) {
            return self.open(entity_type_dropdown(), ctx).await;
        }
        if STATE_DROPDOWN.is_match(text) {
            return self.open(state_dropdown(), ctx).await;
        }
        if COUNTY_DROPDOWN.is_match(text) {
            return self.open(county_dropdown(), ctx).await;
        }
        if ADDRESS_DROPDOWN.is_match(text) {
            return self.open(principal_address_dropdown(), ctx).await;
        }
        if BILLING_DROPDOWN.is_match(text) {
            return self.open(billing_dropdown(), ctx).await;
        }

        if let Some(caps) = ENTITY_TYPE.captures(text) {
            let entity = caps[1].to_uppercase();
            let entity = if entity.starts_with("LIMITED") { "LLC".to_string() } else { entity };
            return self.pick(entity_type_dropdown(), &entity, false, ctx).await;
        }
        if let Some(state) = first_capture(text, &[&STATE_AFTER, &STATE_BEFORE]) {
            return self.pick(state_dropdown(), &state, true, ctx).await;
        }
        if let Some(county) = first_capture(text, &[&COUNTY_AFTER, &COUNTY_BEFORE]) {
            return self.pick(county_dropdown(), &county, true, ctx).await;
        }
        if let Some(address) = first_capture(text, &[&ADDRESS_PICK]) {
            return self.pick(principal_address_dropdown(), &address, false, ctx).await;
        }

        false
    }
}
